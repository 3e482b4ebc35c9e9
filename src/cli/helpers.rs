//! Shared helper functions for CLI commands

use chrono::{DateTime, Local, Utc};

use crate::core::{Config, Roster, Workspace};
use crate::engine::export::EXPORT_DATE_FORMAT;

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render a stored timestamp in local time for display
pub fn format_date_local(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format(EXPORT_DATE_FORMAT)
        .to_string()
}

/// The operator to record on new scans: selected roster entry first,
/// then configuration, then OS fallback
pub fn resolve_operator(roster: &Roster, config: &Config) -> String {
    roster
        .selected()
        .map(|s| s.to_string())
        .unwrap_or_else(|| config.operator())
}

/// Locate the workspace honoring the global --workspace override
pub fn locate_workspace(override_root: Option<&std::path::Path>) -> miette::Result<Workspace> {
    Workspace::locate(override_root).map_err(|e| miette::miette!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_resolve_operator_prefers_selection() {
        let mut roster = Roster::default();
        roster.add("alice");
        roster.select("alice").unwrap();
        let config = Config {
            operator: Some("fallback".into()),
            ..Default::default()
        };
        assert_eq!(resolve_operator(&roster, &config), "alice");
    }

    #[test]
    fn test_resolve_operator_falls_back_to_config() {
        let roster = Roster::default();
        let config = Config {
            operator: Some("fallback".into()),
            ..Default::default()
        };
        assert_eq!(resolve_operator(&roster, &config), "fallback");
    }
}
