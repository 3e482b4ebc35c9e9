//! Core infrastructure: workspace, configuration, identity, roster, store

pub mod config;
pub mod identity;
pub mod roster;
pub mod store;
pub mod workspace;

pub use config::Config;
pub use roster::Roster;
pub use store::StockDb;
pub use workspace::{Workspace, WorkspaceError};
