//! Scan processor - classifies one identifier event against the log and
//! the catalog
//!
//! Per event: `Received -> {Duplicate, Found, NotFound}`. A duplicate
//! surfaces the stored record untouched; found/not-found materialize a new
//! record at the head of the log.

use miette::Result;

use crate::core::StockDb;
use crate::entities::InventoryRecord;

/// Terminal classification of a scan event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanClass {
    /// New part, present in the catalog
    Found,
    /// New part, absent from the catalog
    NotFound,
    /// Part already in the record log; no mutation happened
    Duplicate,
}

impl std::fmt::Display for ScanClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanClass::Found => write!(f, "OK"),
            ScanClass::NotFound => write!(f, "Not Found"),
            ScanClass::Duplicate => write!(f, "Duplicated"),
        }
    }
}

/// A classified scan and the record to display for it
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub class: ScanClass,
    pub record: InventoryRecord,
}

/// Process one raw identifier.
///
/// Returns `None` for empty input (no state transition, no record).
/// The identifier source is expected to deliver trimmed, cooldown-filtered
/// strings; only the whitespace trim is repeated here.
pub fn process(db: &mut StockDb, operator: &str, raw: &str) -> Result<Option<ScanResult>> {
    let part_id = raw.trim();
    if part_id.is_empty() {
        return Ok(None);
    }

    if let Some(existing) = db.get_record_by_part(part_id)? {
        return Ok(Some(ScanResult {
            class: ScanClass::Duplicate,
            record: existing,
        }));
    }

    let (class, record) = match db.get(part_id)? {
        Some(item) => (
            ScanClass::Found,
            InventoryRecord::found(part_id, &item, operator),
        ),
        None => (
            ScanClass::NotFound,
            InventoryRecord::not_found(part_id, operator),
        ),
    };

    db.insert_record(&record)?;

    Ok(Some(ScanResult { class, record }))
}
