//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::Workspace;
use crate::engine::matching::DescriptionRule;

/// Stocktake configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default operator recorded on scans when none is selected
    pub operator: Option<String>,

    /// Default output format
    pub default_format: Option<String>,

    /// Description-based related-item comparison rule (prefix, exact)
    pub match_rule: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(workspace: Option<&Workspace>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/stocktake/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Workspace config (.stocktake/config.yaml)
        if let Some(ws) = workspace {
            let ws_config_path = ws.state_dir().join("config.yaml");
            if ws_config_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&ws_config_path) {
                    if let Ok(ws_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(ws_config);
                    }
                }
            }
        }

        // 4. Environment variables
        if let Ok(operator) = std::env::var("STOCKTAKE_OPERATOR") {
            config.operator = Some(operator);
        }
        if let Ok(format) = std::env::var("STOCKTAKE_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stocktake")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.operator.is_some() {
            self.operator = other.operator;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.match_rule.is_some() {
            self.match_rule = other.match_rule;
        }
    }

    /// Get the operator name, falling back to the OS username
    pub fn operator(&self) -> String {
        if let Some(ref operator) = self.operator {
            return operator.clone();
        }

        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Get the configured description-match rule
    pub fn match_rule(&self) -> DescriptionRule {
        self.match_rule
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}
