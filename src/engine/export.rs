//! Record-log CSV export
//!
//! The interchange format other stock-take stations produce and consume:
//! UTF-8 with a leading BOM, header row, 13 ordered columns. `InvStatus`
//! is derived at write time, never stored.

use chrono::Local;
use miette::{IntoDiagnostic, Result};
use std::io::Write;

use crate::entities::{InventoryRecord, ScanStatus};

/// The 13 export columns, in order
pub const EXPORT_HEADERS: [&str; 13] = [
    "InventoryDate",
    "PartID",
    "VendorSN",
    "Project",
    "Class",
    "Location",
    "ScanStatus",
    "InvStatus",
    "Vendor",
    "VendorPN",
    "CustomerPN",
    "Description",
    "scannedBy",
];

/// Timestamp layout used in exported rows (local time)
pub const EXPORT_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Annotation handed to purchasing alongside the stored scan status
pub fn derived_inv_status(status: ScanStatus) -> &'static str {
    match status {
        ScanStatus::NotFound => "Unlisted",
        _ => "Counted",
    }
}

/// Write records as the 13-column CSV, most recent first, BOM included
pub fn write_records_csv<W: Write>(mut out: W, records: &[InventoryRecord]) -> Result<()> {
    out.write_all("\u{feff}".as_bytes()).into_diagnostic()?;

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(EXPORT_HEADERS).into_diagnostic()?;

    for record in records {
        let date = record
            .inventory_date
            .with_timezone(&Local)
            .format(EXPORT_DATE_FORMAT)
            .to_string();
        let status = record.status.to_string();
        wtr.write_record([
            date.as_str(),
            record.part_id.as_str(),
            record.vendor_sn.as_str(),
            record.project.as_str(),
            record.class.as_str(),
            record.location.as_str(),
            status.as_str(),
            derived_inv_status(record.status),
            record.vendor.as_str(),
            record.vendor_pn.as_str(),
            record.customer_pn.as_str(),
            record.description.as_str(),
            record.scanned_by.as_str(),
        ])
        .into_diagnostic()?;
    }

    wtr.flush().into_diagnostic()?;
    Ok(())
}
