//! Master item - one entry in the parts catalog

use serde::{Deserialize, Serialize};

/// Sentinel used by upstream spreadsheets for "no value"
pub const NA_SENTINEL: &str = "NA";

/// One catalog entry, keyed by part id.
///
/// Every field except `part_id` is optional in the source data; an empty
/// string means the column was absent or blank. Re-ingesting a part id
/// replaces the whole row (upsert, never merge-by-field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterItem {
    /// Unique part identifier (primary key, non-empty)
    pub part_id: String,

    /// Vendor serial number
    #[serde(default)]
    pub vendor_sn: String,

    /// Project the part is allocated to
    #[serde(default)]
    pub project: String,

    /// Part classification
    #[serde(default)]
    pub class: String,

    /// Storage location
    #[serde(default)]
    pub location: String,

    /// Vendor name
    #[serde(default)]
    pub vendor: String,

    /// Vendor part number (secondary lookup key; "NA" means none)
    #[serde(default)]
    pub vendor_pn: String,

    /// Customer part number
    #[serde(default)]
    pub customer_pn: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl MasterItem {
    /// Build an item from the 9 ordered catalog import columns.
    ///
    /// Returns `None` when the part id column is empty - such rows are
    /// skipped by the ingestion pipeline rather than treated as errors.
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        let part_id = fields.first().map(|f| f.trim()).unwrap_or_default();
        if part_id.is_empty() {
            return None;
        }

        let col = |idx: usize| -> String {
            fields.get(idx).map(|f| f.trim().to_string()).unwrap_or_default()
        };

        Some(Self {
            part_id: part_id.to_string(),
            vendor_sn: col(1),
            project: col(2),
            class: col(3),
            location: col(4),
            vendor: col(5),
            vendor_pn: col(6),
            customer_pn: col(7),
            // Descriptions in the wild contain unescaped delimiters, so
            // everything from column 8 onward belongs to the description.
            description: if fields.len() > 8 {
                fields[8..].join(",").trim().to_string()
            } else {
                String::new()
            },
        })
    }

    /// True when the vendor part number carries a usable value
    pub fn has_vendor_pn(&self) -> bool {
        !self.vendor_pn.is_empty() && self.vendor_pn != NA_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_fields_full_row() {
        let item = MasterItem::from_fields(&fields(&[
            "P1", "SN1", "Apollo", "IC", "A-01", "Acme", "V123", "C55", "Widget A",
        ]))
        .unwrap();
        assert_eq!(item.part_id, "P1");
        assert_eq!(item.vendor_pn, "V123");
        assert_eq!(item.description, "Widget A");
    }

    #[test]
    fn test_from_fields_rejoins_description_tail() {
        let item = MasterItem::from_fields(&fields(&[
            "P1", "", "", "", "", "", "", "", "Widget", "10k", "0603",
        ]))
        .unwrap();
        assert_eq!(item.description, "Widget,10k,0603");
    }

    #[test]
    fn test_from_fields_empty_part_id_is_none() {
        assert!(MasterItem::from_fields(&fields(&["", "SN1"])).is_none());
        assert!(MasterItem::from_fields(&fields(&["   "])).is_none());
        assert!(MasterItem::from_fields(&[]).is_none());
    }

    #[test]
    fn test_from_fields_short_row() {
        let item = MasterItem::from_fields(&fields(&["P2", "SN2"])).unwrap();
        assert_eq!(item.vendor_sn, "SN2");
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_has_vendor_pn_excludes_sentinel() {
        let mut item = MasterItem {
            part_id: "P1".into(),
            vendor_pn: "V123".into(),
            ..Default::default()
        };
        assert!(item.has_vendor_pn());
        item.vendor_pn = "NA".into();
        assert!(!item.has_vendor_pn());
        item.vendor_pn.clear();
        assert!(!item.has_vendor_pn());
    }
}
