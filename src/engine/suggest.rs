//! Autocomplete candidates for interactive part-id entry
//!
//! Debouncing and stale-result handling belong to the caller; this is a
//! plain capped query.

use miette::Result;

use crate::core::StockDb;
use crate::entities::MasterItem;

/// Inputs shorter than this return nothing (suppresses near-empty queries)
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum candidates returned
pub const MAX_RESULTS: usize = 5;

/// Case-insensitive substring candidates on part id or vendor PN
pub fn suggest(db: &StockDb, partial: &str) -> Result<Vec<MasterItem>> {
    let partial = partial.trim();
    if partial.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    db.suggest(partial, MAX_RESULTS)
}
