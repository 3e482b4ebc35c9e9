//! Inventory record - one classified count event in the record log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::RecordId;
use crate::entities::MasterItem;

/// Classification of a count event.
///
/// `Duplicated` is reported to the caller when a part is rescanned but is
/// never written back to the stored record - the log keeps the status the
/// record was created with (or was bulk-set to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScanStatus {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Not Found")]
    NotFound,
    #[serde(rename = "Duplicated")]
    Duplicated,
    #[serde(rename = "Checked")]
    Checked,
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStatus::Ok => write!(f, "OK"),
            ScanStatus::NotFound => write!(f, "Not Found"),
            ScanStatus::Duplicated => write!(f, "Duplicated"),
            ScanStatus::Checked => write!(f, "Checked"),
        }
    }
}

impl std::str::FromStr for ScanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "ok" => Ok(ScanStatus::Ok),
            "notfound" => Ok(ScanStatus::NotFound),
            "duplicated" | "duplicate" => Ok(ScanStatus::Duplicated),
            "checked" => Ok(ScanStatus::Checked),
            _ => Err(format!(
                "Unknown status: {}. Use ok, not-found, duplicated, or checked",
                s
            )),
        }
    }
}

/// One count event, unique per part id in the record log.
///
/// The eight item fields are a snapshot copied from the matching catalog
/// entry at scan time (or left empty when the part was not found). Later
/// catalog imports never rewrite them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: RecordId,
    pub inventory_date: DateTime<Utc>,
    pub status: ScanStatus,
    pub scanned_by: String,
    pub part_id: String,

    #[serde(default)]
    pub vendor_sn: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub vendor_pn: String,
    #[serde(default)]
    pub customer_pn: String,
    #[serde(default)]
    pub description: String,
}

impl InventoryRecord {
    /// New record for a part found in the catalog, snapshotting its fields
    pub fn found(part_id: &str, item: &MasterItem, scanned_by: &str) -> Self {
        Self {
            id: RecordId::new(),
            inventory_date: Utc::now(),
            status: ScanStatus::Ok,
            scanned_by: scanned_by.to_string(),
            part_id: part_id.to_string(),
            vendor_sn: item.vendor_sn.clone(),
            project: item.project.clone(),
            class: item.class.clone(),
            location: item.location.clone(),
            vendor: item.vendor.clone(),
            vendor_pn: item.vendor_pn.clone(),
            customer_pn: item.customer_pn.clone(),
            description: item.description.clone(),
        }
    }

    /// New record for a part missing from the catalog (empty snapshot)
    pub fn not_found(part_id: &str, scanned_by: &str) -> Self {
        Self {
            id: RecordId::new(),
            inventory_date: Utc::now(),
            status: ScanStatus::NotFound,
            scanned_by: scanned_by.to_string(),
            part_id: part_id.to_string(),
            vendor_sn: String::new(),
            project: String::new(),
            class: String::new(),
            location: String::new(),
            vendor: String::new(),
            vendor_pn: String::new(),
            customer_pn: String::new(),
            description: String::new(),
        }
    }
}
