//! Catalog ingestion pipeline
//!
//! Decoded catalog text is tokenized row by row, batched, and staged into
//! the store; the live catalog is swapped in one transaction only after
//! every batch lands. Rows without a part id are skipped, not errors.

use miette::Result;

use crate::core::StockDb;
use crate::engine::tokenize::split_delimited;
use crate::entities::MasterItem;

/// Rows per staged batch; the progress callback fires between batches
pub const BATCH_SIZE: usize = 1000;

/// Catalog import column delimiter
const DELIMITER: char = ',';

/// Outcome of a catalog ingestion
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Rows that produced a catalog item
    pub rows_imported: usize,
    /// Rows skipped for lacking a part id
    pub rows_skipped: usize,
}

/// Ingest decoded catalog text, replacing the whole catalog on success.
///
/// `progress` receives the integer percentage after each committed batch;
/// it is the caller's yield point. On any store error the staging table is
/// dropped and the previous catalog stays in place.
pub fn ingest<F>(db: &mut StockDb, text: &str, mut progress: F) -> Result<IngestReport>
where
    F: FnMut(u8),
{
    let mut report = IngestReport::default();

    // Any newline convention; blank segments (from CRLF or empty lines)
    // are skipped along with blank rows.
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .filter(|l| !l.trim().is_empty())
        .collect();

    // Header row is positional, not matched by name
    let data_lines = if lines.is_empty() { &[][..] } else { &lines[1..] };

    let mut items = Vec::new();
    for line in data_lines {
        let fields = split_delimited(line, DELIMITER);
        match MasterItem::from_fields(&fields) {
            Some(item) => items.push(item),
            None => report.rows_skipped += 1,
        }
    }

    let total_batches = items.len().div_ceil(BATCH_SIZE).max(1);

    db.begin_import()?;
    for (batch_idx, batch) in items.chunks(BATCH_SIZE).enumerate() {
        if let Err(e) = db.stage_batch(batch) {
            let _ = db.abort_import();
            return Err(e);
        }
        report.rows_imported += batch.len();
        let percent = ((batch_idx + 1) * 100 / total_batches) as u8;
        progress(percent);
    }

    if let Err(e) = db.commit_import() {
        let _ = db.abort_import();
        return Err(e);
    }

    if items.is_empty() {
        progress(100);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_db() -> (tempfile::TempDir, StockDb) {
        let tmp = tempdir().unwrap();
        let db = StockDb::open_at_path(&tmp.path().join("stock.db")).unwrap();
        (tmp, db)
    }

    const HEADER: &str = "PartID,VendorSN,Project,Class,Location,Vendor,VendorPN,CustomerPN,Description";

    #[test]
    fn test_ingest_basic_rows() {
        let (_tmp, mut db) = open_db();
        let text = format!("{}\nP1,,,,,,,,Widget A\nP2,SN2,,,,,V2,,Widget B\n", HEADER);

        let report = ingest(&mut db, &text, |_| {}).unwrap();
        assert_eq!(report.rows_imported, 2);
        assert_eq!(report.rows_skipped, 0);

        let p1 = db.get("P1").unwrap().unwrap();
        assert_eq!(p1.description, "Widget A");
        assert_eq!(p1.vendor_sn, "");
    }

    #[test]
    fn test_ingest_skips_rows_without_part_id() {
        let (_tmp, mut db) = open_db();
        let text = format!("{}\n,SN-orphan,,,,,,,\nP1,,,,,,,,ok\n", HEADER);

        let report = ingest(&mut db, &text, |_| {}).unwrap();
        assert_eq!(report.rows_imported, 1);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(db.catalog_count().unwrap(), 1);
    }

    #[test]
    fn test_ingest_rejoins_description_with_raw_commas() {
        let (_tmp, mut db) = open_db();
        let text = format!("{}\nP1,,,,,,,,Resistor,10k,0603\n", HEADER);

        ingest(&mut db, &text, |_| {}).unwrap();
        assert_eq!(
            db.get("P1").unwrap().unwrap().description,
            "Resistor,10k,0603"
        );
    }

    #[test]
    fn test_ingest_handles_quoted_fields() {
        let (_tmp, mut db) = open_db();
        let text = format!("{}\nP1,,,,,,\"V,1\",,\"Widget, large\"\n", HEADER);

        ingest(&mut db, &text, |_| {}).unwrap();
        let item = db.get("P1").unwrap().unwrap();
        assert_eq!(item.vendor_pn, "V,1");
        assert_eq!(item.description, "Widget, large");
    }

    #[test]
    fn test_ingest_replaces_previous_catalog() {
        let (_tmp, mut db) = open_db();
        ingest(&mut db, &format!("{}\nOLD,,,,,,,,x\n", HEADER), |_| {}).unwrap();
        ingest(&mut db, &format!("{}\nNEW,,,,,,,,y\n", HEADER), |_| {}).unwrap();

        assert!(db.get("OLD").unwrap().is_none());
        assert!(db.get("NEW").unwrap().is_some());
        assert_eq!(db.catalog_count().unwrap(), 1);
    }

    #[test]
    fn test_ingest_crlf_and_blank_lines() {
        let (_tmp, mut db) = open_db();
        let text = format!("{}\r\nP1,,,,,,,,a\r\n\r\nP2,,,,,,,,b\r\n", HEADER);

        let report = ingest(&mut db, &text, |_| {}).unwrap();
        assert_eq!(report.rows_imported, 2);
    }

    #[test]
    fn test_ingest_last_duplicate_wins() {
        let (_tmp, mut db) = open_db();
        let text = format!("{}\nP1,,,,,,,,first\nP1,,,,,,,,second\n", HEADER);

        let report = ingest(&mut db, &text, |_| {}).unwrap();
        assert_eq!(report.rows_imported, 2);
        assert_eq!(db.catalog_count().unwrap(), 1);
        assert_eq!(db.get("P1").unwrap().unwrap().description, "second");
    }

    #[test]
    fn test_ingest_reports_progress() {
        let (_tmp, mut db) = open_db();
        let mut rows = String::from(HEADER);
        for i in 0..2500 {
            rows.push_str(&format!("\nP{},,,,,,,,d", i));
        }

        let mut seen = Vec::new();
        ingest(&mut db, &rows, |p| seen.push(p)).unwrap();
        // 3 batches of 1000/1000/500
        assert_eq!(seen, vec![33, 66, 100]);
        assert_eq!(db.catalog_count().unwrap(), 2500);
    }

    #[test]
    fn test_ingest_header_only() {
        let (_tmp, mut db) = open_db();
        let report = ingest(&mut db, HEADER, |_| {}).unwrap();
        assert_eq!(report.rows_imported, 0);
        assert_eq!(db.catalog_count().unwrap(), 0);
    }
}
