//! Reconciler - merge exported record CSVs and snapshot backup/restore
//!
//! Merge deduplicates by part id against the live log. Restore is a
//! destructive whole-log (and optionally whole-roster) replacement; the
//! catalog is never touched by either path.

use chrono::{DateTime, Local, TimeZone, Utc};
use csv::StringRecord;
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::core::identity::RecordId;
use crate::core::{Roster, StockDb};
use crate::engine::export::EXPORT_DATE_FORMAT;
use crate::entities::InventoryRecord;

/// Snapshot document format version
const SNAPSHOT_VERSION: u32 = 1;

/// Invalid snapshot document - restore aborts with no mutation
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot document: {0}")]
    Parse(String),

    #[error("unsupported snapshot version {0} (expected {SNAPSHOT_VERSION})")]
    Version(u32),
}

/// Counts reported back from a merge
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Rows appended to the log
    pub added: usize,
    /// Rows skipped: part id missing or already logged
    pub skipped: usize,
}

/// Merge an exported record CSV into the log.
///
/// Rows whose part id is empty or already present are counted and
/// skipped; everything else becomes a record with a best-effort parsed
/// date (falling back to now).
pub fn merge_records_csv(db: &mut StockDb, csv_text: &str) -> Result<MergeOutcome> {
    let mut outcome = MergeOutcome::default();

    let text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map = build_header_map(&headers);

    for row in rdr.records() {
        let row = match row {
            Ok(r) => r,
            Err(_) => {
                outcome.skipped += 1;
                continue;
            }
        };

        let part_id = get_field(&row, &header_map, "partid").unwrap_or_default();
        if part_id.is_empty() {
            outcome.skipped += 1;
            continue;
        }

        if db.get_record_by_part(&part_id)?.is_some() {
            outcome.skipped += 1;
            continue;
        }

        let field = |name: &str| get_field(&row, &header_map, name).unwrap_or_default();

        let record = InventoryRecord {
            id: RecordId::new(),
            inventory_date: parse_export_date(&field("inventorydate")),
            status: field("scanstatus").parse().unwrap_or_default(),
            scanned_by: field("scannedby"),
            part_id,
            vendor_sn: field("vendorsn"),
            project: field("project"),
            class: field("class"),
            location: field("location"),
            vendor: field("vendor"),
            vendor_pn: field("vendorpn"),
            customer_pn: field("customerpn"),
            description: field("description"),
        };

        db.insert_record(&record)?;
        outcome.added += 1;
    }

    Ok(outcome)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Best-effort date parse for merged rows; unparseable dates become now
fn parse_export_date(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }

    for format in [EXPORT_DATE_FORMAT, "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, format) {
            if let Some(local) = Local.from_local_datetime(&naive).single() {
                return local.with_timezone(&Utc);
            }
        }
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            if let Some(local) = Local.from_local_datetime(&naive).single() {
                return local.with_timezone(&Utc);
            }
        }
    }

    Utc::now()
}

/// Whole-state snapshot document.
///
/// Catalog contents are not embedded - backups are record-log-centric and
/// carry only the catalog row count for sanity checks on the other side.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub users: Option<Vec<String>>,
    #[serde(default)]
    pub records: Option<Vec<InventoryRecord>>,
    #[serde(default)]
    pub master_count: usize,
}

/// What a restore actually replaced
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub users_replaced: bool,
    pub records_replaced: Option<usize>,
}

/// Serialize the current state as a snapshot document
pub fn backup(db: &StockDb, roster: &Roster) -> Result<String> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        timestamp: Utc::now(),
        users: Some(roster.operators.clone()),
        records: Some(db.all_records()?),
        master_count: db.catalog_count()?,
    };

    serde_json::to_string_pretty(&snapshot).into_diagnostic()
}

/// Parse a snapshot document, validating before any mutation
pub fn parse_snapshot(json: &str) -> std::result::Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot =
        serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::Version(snapshot.version));
    }

    Ok(snapshot)
}

/// Apply a parsed snapshot: wholesale replacement of the record log and
/// the roster's operator list, when present. The catalog is untouched.
pub fn restore(db: &mut StockDb, roster: &mut Roster, snapshot: Snapshot) -> Result<RestoreOutcome> {
    let mut outcome = RestoreOutcome::default();

    if let Some(users) = snapshot.users {
        roster.replace_operators(users);
        outcome.users_replaced = true;
    }

    if let Some(records) = snapshot.records {
        db.replace_all_records(&records)?;
        outcome.records_replaced = Some(records.len());
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MasterItem, ScanStatus};
    use tempfile::tempdir;

    fn open_db() -> (tempfile::TempDir, StockDb) {
        let tmp = tempdir().unwrap();
        let db = StockDb::open_at_path(&tmp.path().join("stock.db")).unwrap();
        (tmp, db)
    }

    const MERGE_CSV: &str = "\
InventoryDate,PartID,VendorSN,Project,Class,Location,ScanStatus,InvStatus,Vendor,VendorPN,CustomerPN,Description,scannedBy
2025/11/03 14:22:05,P1,SN1,Apollo,IC,A-01,OK,Counted,Acme,V123,C9,\"Widget, large\",bob
2025/11/03 14:25:41,P2,,,,,Not Found,Unlisted,,,,,bob
";

    #[test]
    fn test_merge_adds_new_rows() {
        let (_tmp, mut db) = open_db();
        let outcome = merge_records_csv(&mut db, MERGE_CSV).unwrap();

        assert_eq!(outcome, MergeOutcome { added: 2, skipped: 0 });
        let p1 = db.get_record_by_part("P1").unwrap().unwrap();
        assert_eq!(p1.status, ScanStatus::Ok);
        assert_eq!(p1.description, "Widget, large");
        assert_eq!(p1.scanned_by, "bob");

        let p2 = db.get_record_by_part("P2").unwrap().unwrap();
        assert_eq!(p2.status, ScanStatus::NotFound);
    }

    #[test]
    fn test_merge_skips_existing_part_ids() {
        let (_tmp, mut db) = open_db();
        db.insert_record(&InventoryRecord::not_found("P1", "alice"))
            .unwrap();

        let outcome = merge_records_csv(&mut db, MERGE_CSV).unwrap();
        assert_eq!(outcome, MergeOutcome { added: 1, skipped: 1 });
        // The pre-existing record survives untouched
        assert_eq!(
            db.get_record_by_part("P1").unwrap().unwrap().scanned_by,
            "alice"
        );
    }

    #[test]
    fn test_merge_skips_rows_without_part_id() {
        let (_tmp, mut db) = open_db();
        let csv = "\
InventoryDate,PartID,ScanStatus,scannedBy
2025/11/03 10:00:00,,OK,bob
2025/11/03 10:00:01,P5,OK,bob
";
        let outcome = merge_records_csv(&mut db, csv).unwrap();
        assert_eq!(outcome, MergeOutcome { added: 1, skipped: 1 });
    }

    #[test]
    fn test_merge_parses_export_dates() {
        let (_tmp, mut db) = open_db();
        merge_records_csv(&mut db, MERGE_CSV).unwrap();

        let p1 = db.get_record_by_part("P1").unwrap().unwrap();
        let local = p1.inventory_date.with_timezone(&Local);
        assert_eq!(
            local.format(EXPORT_DATE_FORMAT).to_string(),
            "2025/11/03 14:22:05"
        );
    }

    #[test]
    fn test_merge_accepts_bom_prefixed_input() {
        let (_tmp, mut db) = open_db();
        let text = format!("\u{feff}{}", MERGE_CSV);
        let outcome = merge_records_csv(&mut db, &text).unwrap();
        assert_eq!(outcome.added, 2);
    }

    #[test]
    fn test_parse_export_date_fallback_is_now() {
        let before = Utc::now();
        let parsed = parse_export_date("garbage");
        assert!(parsed >= before);
    }

    #[test]
    fn test_backup_restore_roundtrip() {
        let (_tmp, mut db) = open_db();
        db.insert_record(&InventoryRecord::not_found("P1", "alice"))
            .unwrap();
        let mut roster = Roster::default();
        roster.add("alice");

        let json = backup(&db, &roster).unwrap();

        let (_tmp2, mut db2) = open_db();
        let mut roster2 = Roster::default();
        let outcome = restore(&mut db2, &mut roster2, parse_snapshot(&json).unwrap()).unwrap();

        assert!(outcome.users_replaced);
        assert_eq!(outcome.records_replaced, Some(1));
        assert_eq!(roster2.operators, vec!["alice"]);
        assert!(db2.get_record_by_part("P1").unwrap().is_some());
    }

    #[test]
    fn test_restore_replaces_log_and_leaves_catalog() {
        let (_tmp, mut db) = open_db();
        db.upsert_batch(&[MasterItem {
            part_id: "C1".into(),
            ..Default::default()
        }])
        .unwrap();
        db.insert_record(&InventoryRecord::not_found("P1", "alice"))
            .unwrap();

        let snapshot = parse_snapshot(
            r#"{"version":1,"timestamp":"2025-11-03T00:00:00Z","records":[],"masterCount":0}"#,
        )
        .unwrap();
        let mut roster = Roster::default();
        roster.add("alice");
        let outcome = restore(&mut db, &mut roster, snapshot).unwrap();

        assert_eq!(outcome.records_replaced, Some(0));
        assert!(!outcome.users_replaced);
        assert_eq!(db.record_count().unwrap(), 0);
        // Catalog count unchanged; roster untouched when users is absent
        assert_eq!(db.catalog_count().unwrap(), 1);
        assert_eq!(roster.operators, vec!["alice"]);
    }

    #[test]
    fn test_malformed_snapshot_is_rejected_before_mutation() {
        let err = parse_snapshot("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));

        let err = parse_snapshot(r#"{"version":99,"timestamp":"2025-11-03T00:00:00Z"}"#)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Version(99)));
    }

    #[test]
    fn test_backup_embeds_catalog_count_only() {
        let (_tmp, mut db) = open_db();
        db.upsert_batch(&[MasterItem {
            part_id: "C1".into(),
            description: "secret catalog row".into(),
            ..Default::default()
        }])
        .unwrap();

        let json = backup(&db, &Roster::default()).unwrap();
        let snapshot = parse_snapshot(&json).unwrap();
        assert_eq!(snapshot.master_count, 1);
        assert!(!json.contains("secret catalog row"));
    }
}
