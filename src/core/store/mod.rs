//! SQLite-backed store for the catalog and the record log
//!
//! Unlike a derived cache, this database is the primary copy of the
//! count-in-progress: a schema mismatch is surfaced to the operator
//! instead of being silently rebuilt.

mod catalog;
mod records;
mod schema;

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use miette::{IntoDiagnostic, Result};
use rusqlite::Connection;

use crate::core::Workspace;

/// Current schema version - mismatches are an error, not a rebuild
const SCHEMA_VERSION: i32 = 2;

/// The stock-take store backed by SQLite
pub struct StockDb {
    conn: Connection,
}

impl StockDb {
    /// Open or create the store for a workspace
    pub fn open(workspace: &Workspace) -> Result<Self> {
        Self::open_at_path(&workspace.db_path())
    }

    /// Open or create the store at an explicit path
    pub fn open_at_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }

        let needs_init = !path.exists();
        let conn = Connection::open(path).into_diagnostic()?;

        // WAL keeps readers live while a batch transaction commits
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .into_diagnostic()?;

        let mut db = Self { conn };

        if needs_init {
            db.init_schema()?;
        } else {
            let version = db.schema_version();
            if version != SCHEMA_VERSION {
                return Err(miette::miette!(
                    "store schema version {} does not match expected {}. \
                     Back up your records, then delete .stocktake/stock.db to reset.",
                    version,
                    SCHEMA_VERSION
                ));
            }
        }

        Ok(db)
    }

    fn schema_version(&self) -> i32 {
        self.conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }
}

/// Parse an RFC 3339 datetime string, falling back to the epoch-ish floor
fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap())
}
