//! Record log operations
//!
//! One row per part id, enforced by a UNIQUE constraint; `seq` encodes
//! insertion order so listings read most-recent-first.

use miette::{IntoDiagnostic, Result};
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, StockDb};
use crate::entities::{InventoryRecord, ScanStatus};

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryRecord> {
    let id: String = row.get(0)?;
    let date: String = row.get(1)?;
    let status: String = row.get(2)?;
    Ok(InventoryRecord {
        id: id.parse().unwrap_or_default(),
        inventory_date: parse_datetime(&date),
        status: status.parse().unwrap_or_default(),
        scanned_by: row.get(3)?,
        part_id: row.get(4)?,
        vendor_sn: row.get(5)?,
        project: row.get(6)?,
        class: row.get(7)?,
        location: row.get(8)?,
        vendor: row.get(9)?,
        vendor_pn: row.get(10)?,
        customer_pn: row.get(11)?,
        description: row.get(12)?,
    })
}

const RECORD_COLUMNS: &str = "id, inventory_date, status, scanned_by, part_id, \
     vendor_sn, project, class, location, vendor, vendor_pn, customer_pn, description";

impl StockDb {
    /// Insert a new record at the head of the log.
    ///
    /// Callers check for an existing part id first (the scan processor's
    /// duplicate branch); the UNIQUE constraint is the backstop.
    pub fn insert_record(&mut self, record: &InventoryRecord) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO records
                 (id, inventory_date, status, scanned_by, part_id,
                  vendor_sn, project, class, location, vendor, vendor_pn, customer_pn, description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    record.id.to_string(),
                    record.inventory_date.to_rfc3339(),
                    record.status.to_string(),
                    record.scanned_by,
                    record.part_id,
                    record.vendor_sn,
                    record.project,
                    record.class,
                    record.location,
                    record.vendor,
                    record.vendor_pn,
                    record.customer_pn,
                    record.description,
                ],
            )
            .into_diagnostic()?;
        Ok(())
    }

    /// Look up the record for a part id, if one exists
    pub fn get_record_by_part(&self, part_id: &str) -> Result<Option<InventoryRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM records WHERE part_id = ?1", RECORD_COLUMNS),
                params![part_id],
                record_from_row,
            )
            .optional()
            .into_diagnostic()
    }

    /// All records, most recent first
    pub fn all_records(&self) -> Result<Vec<InventoryRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM records ORDER BY seq DESC",
                RECORD_COLUMNS
            ))
            .into_diagnostic()?;

        let rows = stmt.query_map([], record_from_row).into_diagnostic()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_diagnostic()
    }

    /// Records with a given status, most recent first
    pub fn records_with_status(&self, status: ScanStatus) -> Result<Vec<InventoryRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM records WHERE status = ?1 ORDER BY seq DESC",
                RECORD_COLUMNS
            ))
            .into_diagnostic()?;

        let rows = stmt
            .query_map(params![status.to_string()], record_from_row)
            .into_diagnostic()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_diagnostic()
    }

    /// Force a status onto the selected records; returns how many changed
    pub fn set_status_by_parts(&mut self, part_ids: &[String], status: ScanStatus) -> Result<usize> {
        let tx = self.conn.transaction().into_diagnostic()?;
        let mut changed = 0;
        {
            let mut stmt = tx
                .prepare("UPDATE records SET status = ?1 WHERE part_id = ?2")
                .into_diagnostic()?;
            for part_id in part_ids {
                changed += stmt
                    .execute(params![status.to_string(), part_id])
                    .into_diagnostic()?;
            }
        }
        tx.commit().into_diagnostic()?;
        Ok(changed)
    }

    /// Delete the selected records; returns how many were removed
    pub fn delete_by_parts(&mut self, part_ids: &[String]) -> Result<usize> {
        let tx = self.conn.transaction().into_diagnostic()?;
        let mut removed = 0;
        {
            let mut stmt = tx
                .prepare("DELETE FROM records WHERE part_id = ?1")
                .into_diagnostic()?;
            for part_id in part_ids {
                removed += stmt.execute(params![part_id]).into_diagnostic()?;
            }
        }
        tx.commit().into_diagnostic()?;
        Ok(removed)
    }

    /// Empty the record log; the catalog is untouched
    pub fn clear_records(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM records", [])
            .into_diagnostic()?;
        Ok(())
    }

    /// Number of records in the log
    pub fn record_count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .into_diagnostic()
    }

    /// Record counts grouped by status, descending
    pub fn record_counts_by_status(&self) -> Result<Vec<(String, usize)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM records GROUP BY status ORDER BY COUNT(*) DESC")
            .into_diagnostic()?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })
            .into_diagnostic()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_diagnostic()
    }

    /// Replace the whole log with the given records (snapshot restore).
    ///
    /// Input is in display order (most recent first); rows are inserted in
    /// reverse so `seq DESC` reproduces it.
    pub fn replace_all_records(&mut self, records: &[InventoryRecord]) -> Result<()> {
        let tx = self.conn.transaction().into_diagnostic()?;
        {
            tx.execute("DELETE FROM records", []).into_diagnostic()?;
            let mut stmt = tx
                .prepare(
                    "INSERT INTO records
                     (id, inventory_date, status, scanned_by, part_id,
                      vendor_sn, project, class, location, vendor, vendor_pn, customer_pn, description)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                )
                .into_diagnostic()?;
            for record in records.iter().rev() {
                stmt.execute(params![
                    record.id.to_string(),
                    record.inventory_date.to_rfc3339(),
                    record.status.to_string(),
                    record.scanned_by,
                    record.part_id,
                    record.vendor_sn,
                    record.project,
                    record.class,
                    record.location,
                    record.vendor,
                    record.vendor_pn,
                    record.customer_pn,
                    record.description,
                ])
                .into_diagnostic()?;
            }
        }
        tx.commit().into_diagnostic()
    }
}
