use api_report::cleanup::clear_temp;
use api_report::paths::ReportPaths;

// ============================================================================
// 1. Emptying keeps the staging directory itself
// ============================================================================

#[test]
fn clear_temp_removes_entries_keeps_dir() {
    let root = std::env::temp_dir().join("api_report_cleanup_basic");
    std::fs::remove_dir_all(&root).ok();

    let paths = ReportPaths::at(&root);
    let temp = paths.temp_dir();
    std::fs::create_dir_all(temp.join("Billing")).unwrap();
    std::fs::write(temp.join("Billing").join("Invoices_latest.json"), "{}").unwrap();
    std::fs::write(temp.join("Billing").join("Invoices_latest.html"), "<html>").unwrap();
    std::fs::write(temp.join("stray.txt"), "x").unwrap();

    let removed = clear_temp(&paths, 0);

    assert_eq!(removed, 2); // the Billing dir and the stray file
    assert!(temp.is_dir());
    assert_eq!(std::fs::read_dir(&temp).unwrap().count(), 0);

    std::fs::remove_dir_all(&root).ok();
}

// ============================================================================
// 2. Missing staging directory is a no-op
// ============================================================================

#[test]
fn clear_temp_missing_dir_is_noop() {
    let root = std::env::temp_dir().join("api_report_cleanup_missing");
    std::fs::remove_dir_all(&root).ok();

    let paths = ReportPaths::at(&root);
    assert_eq!(clear_temp(&paths, 0), 0);
    assert!(!paths.temp_dir().exists());
}

// ============================================================================
// 3. Other root content survives
// ============================================================================

#[test]
fn clear_temp_leaves_siblings_alone() {
    let root = std::env::temp_dir().join("api_report_cleanup_siblings");
    std::fs::remove_dir_all(&root).ok();

    let paths = ReportPaths::at(&root);
    std::fs::create_dir_all(paths.temp_dir()).unwrap();
    std::fs::write(paths.temp_dir().join("old.json"), "{}").unwrap();

    let email_dir = paths.email_dir("2026-08-25");
    std::fs::create_dir_all(&email_dir).unwrap();
    let report = email_dir.join("Digital Api Automation Report.html");
    std::fs::write(&report, "<html>").unwrap();

    clear_temp(&paths, 0);

    assert!(report.is_file());
    assert!(paths.temp_dir().is_dir());

    std::fs::remove_dir_all(&root).ok();
}
