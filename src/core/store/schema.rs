//! Database schema initialization

use miette::{IntoDiagnostic, Result};
use rusqlite::params;

use super::{StockDb, SCHEMA_VERSION};

impl StockDb {
    /// Initialize database schema
    pub(super) fn init_schema(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Parts master catalog
            CREATE TABLE IF NOT EXISTS catalog (
                part_id TEXT PRIMARY KEY,
                vendor_sn TEXT NOT NULL DEFAULT '',
                project TEXT NOT NULL DEFAULT '',
                class TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                vendor TEXT NOT NULL DEFAULT '',
                vendor_pn TEXT NOT NULL DEFAULT '',
                customer_pn TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT ''
            );
            CREATE INDEX IF NOT EXISTS idx_catalog_vendor_pn ON catalog(vendor_pn);

            -- Record log: one row per counted part id, seq gives ordering
            CREATE TABLE IF NOT EXISTS records (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                part_id TEXT NOT NULL UNIQUE,
                inventory_date TEXT NOT NULL,
                status TEXT NOT NULL,
                scanned_by TEXT NOT NULL DEFAULT '',
                vendor_sn TEXT NOT NULL DEFAULT '',
                project TEXT NOT NULL DEFAULT '',
                class TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                vendor TEXT NOT NULL DEFAULT '',
                vendor_pn TEXT NOT NULL DEFAULT '',
                customer_pn TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT ''
            );
            CREATE INDEX IF NOT EXISTS idx_records_status ON records(status);
            "#,
            )
            .into_diagnostic()?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .into_diagnostic()?;

        Ok(())
    }
}
