//! Catalog store operations
//!
//! Exact lookup rides the primary key, vendor-PN equality rides a
//! dedicated index, and everything substring-shaped is a full scan -
//! acceptable for the tens-of-thousands-row catalogs this tool targets.

use miette::{IntoDiagnostic, Result};
use rusqlite::{params, OptionalExtension, Row};

use super::StockDb;
use crate::entities::master_item::NA_SENTINEL;
use crate::entities::MasterItem;

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<MasterItem> {
    Ok(MasterItem {
        part_id: row.get(0)?,
        vendor_sn: row.get(1)?,
        project: row.get(2)?,
        class: row.get(3)?,
        location: row.get(4)?,
        vendor: row.get(5)?,
        vendor_pn: row.get(6)?,
        customer_pn: row.get(7)?,
        description: row.get(8)?,
    })
}

const ITEM_COLUMNS: &str =
    "part_id, vendor_sn, project, class, location, vendor, vendor_pn, customer_pn, description";

impl StockDb {
    /// Insert-or-replace a batch of items in a single transaction.
    ///
    /// The batch is atomic; a sequence of batches is not - whole-import
    /// atomicity is the staging swap's job (`stage_batch`/`commit_import`).
    pub fn upsert_batch(&mut self, items: &[MasterItem]) -> Result<()> {
        let tx = self.conn.transaction().into_diagnostic()?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO catalog
                     (part_id, vendor_sn, project, class, location, vendor, vendor_pn, customer_pn, description)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )
                .into_diagnostic()?;
            for item in items {
                stmt.execute(params![
                    item.part_id,
                    item.vendor_sn,
                    item.project,
                    item.class,
                    item.location,
                    item.vendor,
                    item.vendor_pn,
                    item.customer_pn,
                    item.description,
                ])
                .into_diagnostic()?;
            }
        }
        tx.commit().into_diagnostic()
    }

    /// Exact lookup by part id
    pub fn get(&self, part_id: &str) -> Result<Option<MasterItem>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM catalog WHERE part_id = ?1", ITEM_COLUMNS),
                params![part_id],
                item_from_row,
            )
            .optional()
            .into_diagnostic()
    }

    /// Equality lookup over the vendor-PN index, excluding the NA sentinel
    pub fn find_by_vendor_pn(&self, vendor_pn: &str) -> Result<Vec<MasterItem>> {
        if vendor_pn == NA_SENTINEL {
            return Ok(Vec::new());
        }

        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM catalog WHERE vendor_pn = ?1 ORDER BY part_id",
                ITEM_COLUMNS
            ))
            .into_diagnostic()?;

        let rows = stmt
            .query_map(params![vendor_pn], item_from_row)
            .into_diagnostic()?;

        rows.collect::<rusqlite::Result<Vec<_>>>().into_diagnostic()
    }

    /// Full scan returning all items matching an arbitrary predicate
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<MasterItem>>
    where
        F: Fn(&MasterItem) -> bool,
    {
        Ok(self.all()?.into_iter().filter(|i| predicate(i)).collect())
    }

    /// All catalog items, ordered by part id
    pub fn all(&self) -> Result<Vec<MasterItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM catalog ORDER BY part_id",
                ITEM_COLUMNS
            ))
            .into_diagnostic()?;

        let rows = stmt.query_map([], item_from_row).into_diagnostic()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_diagnostic()
    }

    /// Number of catalog rows
    pub fn catalog_count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM catalog", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .into_diagnostic()
    }

    /// Remove every catalog row
    pub fn clear_catalog(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM catalog", [])
            .into_diagnostic()?;
        Ok(())
    }

    /// Case-insensitive substring candidates on part id or vendor PN,
    /// capped for interactive autocomplete
    pub fn suggest(&self, partial: &str, limit: usize) -> Result<Vec<MasterItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM catalog
                 WHERE LOWER(part_id) LIKE LOWER(?1) OR LOWER(vendor_pn) LIKE LOWER(?1)
                 ORDER BY part_id LIMIT ?2",
                ITEM_COLUMNS
            ))
            .into_diagnostic()?;

        let pattern = format!("%{}%", partial);
        let rows = stmt
            .query_map(params![pattern, limit as i64], item_from_row)
            .into_diagnostic()?;

        rows.collect::<rusqlite::Result<Vec<_>>>().into_diagnostic()
    }

    // =========================================================================
    // Staged import: batches land in a side table, the swap is one transaction
    // =========================================================================

    /// Create (or reset) the staging table for a fresh import
    pub fn begin_import(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                "DROP TABLE IF EXISTS catalog_staging;
                 CREATE TABLE catalog_staging (
                     part_id TEXT PRIMARY KEY,
                     vendor_sn TEXT NOT NULL DEFAULT '',
                     project TEXT NOT NULL DEFAULT '',
                     class TEXT NOT NULL DEFAULT '',
                     location TEXT NOT NULL DEFAULT '',
                     vendor TEXT NOT NULL DEFAULT '',
                     vendor_pn TEXT NOT NULL DEFAULT '',
                     customer_pn TEXT NOT NULL DEFAULT '',
                     description TEXT NOT NULL DEFAULT ''
                 );",
            )
            .into_diagnostic()
    }

    /// Upsert one batch into the staging table (atomic per batch)
    pub fn stage_batch(&mut self, items: &[MasterItem]) -> Result<()> {
        let tx = self.conn.transaction().into_diagnostic()?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO catalog_staging
                     (part_id, vendor_sn, project, class, location, vendor, vendor_pn, customer_pn, description)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )
                .into_diagnostic()?;
            for item in items {
                stmt.execute(params![
                    item.part_id,
                    item.vendor_sn,
                    item.project,
                    item.class,
                    item.location,
                    item.vendor,
                    item.vendor_pn,
                    item.customer_pn,
                    item.description,
                ])
                .into_diagnostic()?;
            }
        }
        tx.commit().into_diagnostic()
    }

    /// Atomically replace the catalog with the staged rows
    pub fn commit_import(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                "BEGIN;
                 DELETE FROM catalog;
                 INSERT INTO catalog SELECT * FROM catalog_staging;
                 DROP TABLE catalog_staging;
                 COMMIT;",
            )
            .into_diagnostic()
    }

    /// Drop any staged rows, leaving the live catalog untouched
    pub fn abort_import(&mut self) -> Result<()> {
        self.conn
            .execute_batch("DROP TABLE IF EXISTS catalog_staging;")
            .into_diagnostic()
    }
}
