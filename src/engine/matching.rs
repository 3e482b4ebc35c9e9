//! Related-item matching
//!
//! Given a record's vendor PN and description, find the catalog items in
//! the same product family. Strategies run in order; the first non-empty
//! result wins.

use miette::Result;

use crate::core::StockDb;
use crate::entities::master_item::NA_SENTINEL;
use crate::entities::{InventoryRecord, MasterItem};

/// Vendor PNs this short collide across unrelated parts
const MIN_VENDOR_PN_LEN: usize = 3;

/// Characters of the description used as the comparison key in prefix mode
const PREFIX_KEY_LEN: usize = 15;

/// Description-based comparison rule for the fallback strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionRule {
    /// Case-normalized containment of the description's leading characters
    #[default]
    Prefix,
    /// Case-normalized full-description equality
    Exact,
}

impl std::str::FromStr for DescriptionRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prefix" => Ok(DescriptionRule::Prefix),
            "exact" => Ok(DescriptionRule::Exact),
            _ => Err(format!("Unknown match rule: {}. Use prefix or exact", s)),
        }
    }
}

/// Catalog items in the same family as the given record.
///
/// Strategy 1: exact vendor-PN equality, when the record carries a usable
/// vendor PN. Strategy 2: description comparison per `rule`. An empty
/// result is a valid outcome, not an error.
pub fn related_items(
    db: &StockDb,
    record: &InventoryRecord,
    rule: DescriptionRule,
) -> Result<Vec<MasterItem>> {
    let vendor_pn = record.vendor_pn.trim();
    if !vendor_pn.is_empty() && vendor_pn != NA_SENTINEL && vendor_pn.len() >= MIN_VENDOR_PN_LEN {
        let hits = db.find_by_vendor_pn(vendor_pn)?;
        if !hits.is_empty() {
            return Ok(hits);
        }
    }

    let description = record.description.trim();
    if description.is_empty() || description == NA_SENTINEL {
        return Ok(Vec::new());
    }

    let key = description_key(description, rule);
    db.filter(|item| {
        let candidate = item.description.trim().to_lowercase();
        match rule {
            DescriptionRule::Prefix => !candidate.is_empty() && candidate.contains(&key),
            DescriptionRule::Exact => candidate == key,
        }
    })
}

fn description_key(description: &str, rule: DescriptionRule) -> String {
    let normalized = description.to_lowercase();
    match rule {
        DescriptionRule::Prefix => normalized.chars().take(PREFIX_KEY_LEN).collect(),
        DescriptionRule::Exact => normalized,
    }
}
