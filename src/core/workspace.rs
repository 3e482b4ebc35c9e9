//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents a stock-take workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .stocktake/)
    root: PathBuf,
}

impl Workspace {
    /// Find workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            if current.join(".stocktake").is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Open the workspace rooted at the given directory, or discover one
    pub fn locate(override_root: Option<&Path>) -> Result<Self, WorkspaceError> {
        match override_root {
            Some(path) => {
                if path.join(".stocktake").is_dir() {
                    Ok(Self {
                        root: path
                            .canonicalize()
                            .map_err(|e| WorkspaceError::IoError(e.to_string()))?,
                    })
                } else {
                    Err(WorkspaceError::NotFound {
                        searched_from: path.to_path_buf(),
                    })
                }
            }
            None => Self::discover(),
        }
    }

    /// Create a new workspace structure at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let state_dir = root.join(".stocktake");
        if state_dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root.clone()));
        }

        std::fs::create_dir_all(&state_dir)
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        let config_path = state_dir.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Stocktake workspace configuration

# Default operator recorded on scans when none is selected
# operator: ""

# Default output format (auto, tsv, json, csv, id)
# default_format: auto

# Description-based related-item rule (prefix, exact)
# match_rule: prefix
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .stocktake state directory
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(".stocktake")
    }

    /// Path of the SQLite database holding catalog and record log
    pub fn db_path(&self) -> PathBuf {
        self.state_dir().join("stock.db")
    }

    /// Path of the operator roster file
    pub fn roster_path(&self) -> PathBuf {
        self.state_dir().join("operators.yaml")
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a stocktake workspace (searched from {searched_from:?}). Run 'stocktake init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("stocktake workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
