//! Integration tests for the stocktake CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a stocktake command
fn stocktake() -> Command {
    Command::cargo_bin("stocktake").unwrap()
}

/// Helper to create a workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    stocktake()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

const CATALOG_CSV: &str = "\
PartID,VendorSN,Project,Class,Location,Vendor,VendorPN,CustomerPN,Description
P1,SN1,Apollo,IC,A-01,Acme,V123,C9,Widget A
P2,SN2,Apollo,IC,A-02,Acme,V123,C10,Widget B
P3,,,,,Globex,NA,,Gear shaft
";

/// Helper to create a workspace with a loaded catalog
fn setup_with_catalog() -> TempDir {
    let tmp = setup_workspace();
    let catalog = tmp.path().join("catalog.csv");
    fs::write(&catalog, CATALOG_CSV).unwrap();
    stocktake()
        .current_dir(tmp.path())
        .args(["import", "catalog.csv"])
        .assert()
        .success();
    tmp
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    stocktake()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stock-take"));
}

#[test]
fn test_version_displays() {
    stocktake()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stocktake"));
}

#[test]
fn test_unknown_command_fails() {
    stocktake()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_commands_fail_outside_workspace() {
    let tmp = TempDir::new().unwrap();
    stocktake()
        .current_dir(tmp.path())
        .args(["catalog", "count"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a stocktake workspace"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_workspace() {
    let tmp = TempDir::new().unwrap();

    stocktake()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(tmp.path().join(".stocktake/config.yaml").exists());
    assert!(tmp.path().join(".stocktake/stock.db").exists());
    assert!(tmp.path().join(".stocktake/operators.yaml").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = setup_workspace();
    stocktake()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure();
}

// ============================================================================
// Import & Catalog Tests
// ============================================================================

#[test]
fn test_import_reports_row_count() {
    let tmp = setup_workspace();
    fs::write(tmp.path().join("catalog.csv"), CATALOG_CSV).unwrap();

    stocktake()
        .current_dir(tmp.path())
        .args(["import", "catalog.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn test_import_missing_file_fails() {
    let tmp = setup_workspace();
    stocktake()
        .current_dir(tmp.path())
        .args(["import", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_import_replaces_catalog() {
    let tmp = setup_with_catalog();
    fs::write(
        tmp.path().join("catalog2.csv"),
        "PartID,VendorSN,Project,Class,Location,Vendor,VendorPN,CustomerPN,Description\nQ1,,,,,,,,Only part\n",
    )
    .unwrap();

    stocktake()
        .current_dir(tmp.path())
        .args(["import", "catalog2.csv"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["catalog", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

#[test]
fn test_catalog_show() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["catalog", "show", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget A"));
}

#[test]
fn test_catalog_search() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["catalog", "search", "widget", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P1").and(predicate::str::contains("P2")));
}

// ============================================================================
// Scan Tests
// ============================================================================

#[test]
fn test_scan_found_part() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK").and(predicate::str::contains("Widget A")));
}

#[test]
fn test_scan_unknown_part_is_not_found() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "MYSTERY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not Found"));
}

#[test]
fn test_rescan_reports_duplicate() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicated"));

    // Still exactly one record
    stocktake()
        .current_dir(tmp.path())
        .args(["log", "list", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff("P1\n"));
}

#[test]
fn test_scan_with_related() {
    let tmp = setup_with_catalog();
    // P1 and P2 share VendorPN V123
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1", "--related"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P2"));
}

// ============================================================================
// Suggest & Related Tests
// ============================================================================

#[test]
fn test_suggest_matches_substring() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["suggest", "V12", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P1").and(predicate::str::contains("P2")));
}

#[test]
fn test_suggest_short_input_is_empty() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["suggest", "P", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_related_requires_counted_part() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["related", "P1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not been counted"));
}

#[test]
fn test_related_after_scan() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["related", "P1", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P1").and(predicate::str::contains("P2")));
}

// ============================================================================
// Log Tests
// ============================================================================

#[test]
fn test_log_set_status_checked() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1", "P2"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "set-status", "checked", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "list", "--status", "checked", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff("P1\n"));
}

#[test]
fn test_log_delete() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1", "P2"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "delete", "P1"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "list", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff("P2\n"));
}

#[test]
fn test_log_clear_leaves_catalog() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "clear", "--yes"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["catalog", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

// ============================================================================
// Export & Merge Tests
// ============================================================================

#[test]
fn test_export_and_merge_roundtrip() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["export", "-o", "records.csv"])
        .assert()
        .success();

    let exported = fs::read_to_string(tmp.path().join("records.csv")).unwrap();
    assert!(exported.starts_with('\u{feff}'));
    assert!(exported.contains("InventoryDate,PartID"));
    assert!(exported.contains("P1"));

    // Merging our own export adds nothing
    stocktake()
        .current_dir(tmp.path())
        .args(["merge", "records.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 added").and(predicate::str::contains("1 skipped")));
}

#[test]
fn test_merge_adds_unseen_parts() {
    let tmp = setup_with_catalog();
    fs::write(
        tmp.path().join("other-station.csv"),
        "InventoryDate,PartID,VendorSN,Project,Class,Location,ScanStatus,InvStatus,Vendor,VendorPN,CustomerPN,Description,scannedBy\n\
         2025/11/03 09:00:00,P7,,,,,OK,Counted,,,,From station 2,bob\n",
    )
    .unwrap();

    stocktake()
        .current_dir(tmp.path())
        .args(["merge", "other-station.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 added"));

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "list", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P7"));
}

// ============================================================================
// Backup & Restore Tests
// ============================================================================

#[test]
fn test_backup_restore_roundtrip() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["operator", "add", "alice"])
        .assert()
        .success();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["backup", "-o", "snap.json"])
        .assert()
        .success();

    // Wipe the log, then restore it
    stocktake()
        .current_dir(tmp.path())
        .args(["log", "clear", "--yes"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["restore", "snap.json", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 record(s)"));

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "list", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff("P1\n"));

    // Catalog untouched throughout
    stocktake()
        .current_dir(tmp.path())
        .args(["catalog", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn test_restore_rejects_malformed_snapshot() {
    let tmp = setup_workspace();
    fs::write(tmp.path().join("bad.json"), "{not json").unwrap();

    stocktake()
        .current_dir(tmp.path())
        .args(["restore", "bad.json", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid snapshot"));
}

// ============================================================================
// Operator Tests
// ============================================================================

#[test]
fn test_operator_add_select_list() {
    let tmp = setup_workspace();
    stocktake()
        .current_dir(tmp.path())
        .args(["operator", "add", "alice"])
        .assert()
        .success();
    stocktake()
        .current_dir(tmp.path())
        .args(["operator", "select", "alice"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["operator", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn test_operator_select_unknown_fails() {
    let tmp = setup_workspace();
    stocktake()
        .current_dir(tmp.path())
        .args(["operator", "select", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not on the operator roster"));
}

#[test]
fn test_scan_records_selected_operator() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["operator", "add", "alice"])
        .assert()
        .success();
    stocktake()
        .current_dir(tmp.path())
        .args(["operator", "select", "alice"])
        .assert()
        .success();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .args(["log", "list", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}

// ============================================================================
// Status Tests
// ============================================================================

#[test]
fn test_status_dashboard() {
    let tmp = setup_with_catalog();
    stocktake()
        .current_dir(tmp.path())
        .args(["scan", "P1", "MYSTERY"])
        .assert()
        .success();

    stocktake()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Catalog rows")
                .and(predicate::str::contains("3"))
                .and(predicate::str::contains("Not Found")),
        );
}
