//! Operator roster - who is counting, who is selected, and the gate flag

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::Workspace;

/// Persisted operator roster.
///
/// The list is ordered (it is exported verbatim into backup snapshots).
/// `selected` and `authenticated` are session state the host UI reads at
/// startup; the password gate itself lives outside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub operators: Vec<String>,

    /// Currently selected operator, if any
    #[serde(default)]
    pub selected: Option<String>,

    /// Whether the operator gate has been passed this session
    #[serde(default)]
    pub authenticated: bool,
}

fn default_version() -> u32 {
    1
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            version: 1,
            operators: Vec::new(),
            selected: None,
            authenticated: false,
        }
    }
}

impl Roster {
    /// Load the roster from the workspace, or start empty
    pub fn load(workspace: &Workspace) -> Self {
        Self::load_from_path(&workspace.roster_path()).unwrap_or_default()
    }

    /// Load the roster from a specific path
    pub fn load_from_path(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str(&contents).ok()
    }

    /// Save the roster to the workspace
    pub fn save(&self, workspace: &Workspace) -> std::io::Result<()> {
        self.save_to_path(&workspace.roster_path())
    }

    /// Save the roster to a specific path
    pub fn save_to_path(&self, path: &Path) -> std::io::Result<()> {
        let contents = serde_yml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, contents)
    }

    /// Add an operator if not already present; returns false on duplicate
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.operators.push(name.to_string());
        true
    }

    /// Remove an operator; clears the selection if it pointed at them
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.operators.len();
        self.operators.retain(|o| o != name);
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        self.operators.len() != before
    }

    /// True when the named operator is on the roster
    pub fn contains(&self, name: &str) -> bool {
        self.operators.iter().any(|o| o == name)
    }

    /// Select an operator; fails when they are not on the roster
    pub fn select(&mut self, name: &str) -> Result<(), String> {
        if !self.contains(name) {
            return Err(format!("'{}' is not on the operator roster", name));
        }
        self.selected = Some(name.to_string());
        Ok(())
    }

    /// Replace the whole operator list (used by snapshot restore)
    pub fn replace_operators(&mut self, operators: Vec<String>) {
        if let Some(selected) = &self.selected {
            if !operators.iter().any(|o| o == selected) {
                self.selected = None;
            }
        }
        self.operators = operators;
    }

    /// The operator to record on new scans, if one is selected
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_and_duplicate() {
        let mut roster = Roster::default();
        assert!(roster.add("alice"));
        assert!(!roster.add("alice"));
        assert_eq!(roster.operators, vec!["alice"]);
    }

    #[test]
    fn test_select_requires_membership() {
        let mut roster = Roster::default();
        assert!(roster.select("alice").is_err());
        roster.add("alice");
        roster.select("alice").unwrap();
        assert_eq!(roster.selected(), Some("alice"));
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut roster = Roster::default();
        roster.add("alice");
        roster.select("alice").unwrap();
        assert!(roster.remove("alice"));
        assert_eq!(roster.selected(), None);
    }

    #[test]
    fn test_replace_operators_drops_stale_selection() {
        let mut roster = Roster::default();
        roster.add("alice");
        roster.select("alice").unwrap();
        roster.replace_operators(vec!["bob".into(), "carol".into()]);
        assert_eq!(roster.operators.len(), 2);
        assert_eq!(roster.selected(), None);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("operators.yaml");

        let mut roster = Roster::default();
        roster.add("alice");
        roster.add("bob");
        roster.select("bob").unwrap();
        roster.authenticated = true;
        roster.save_to_path(&path).unwrap();

        let loaded = Roster::load_from_path(&path).unwrap();
        assert_eq!(loaded.operators, vec!["alice", "bob"]);
        assert_eq!(loaded.selected(), Some("bob"));
        assert!(loaded.authenticated);
    }
}
