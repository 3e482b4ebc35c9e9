//! The stock-take engine: decoding, ingestion, scan classification,
//! matching, autocomplete, and reconciliation

pub mod decode;
pub mod export;
pub mod ingest;
pub mod matching;
pub mod reconcile;
pub mod scan;
pub mod suggest;
pub mod tokenize;

pub use decode::{decode_catalog_bytes, DecodeError};
pub use ingest::{ingest, IngestReport};
pub use matching::{related_items, DescriptionRule};
pub use reconcile::{backup, merge_records_csv, parse_snapshot, restore, MergeOutcome, Snapshot};
pub use scan::{process, ScanClass, ScanResult};
pub use suggest::suggest;
