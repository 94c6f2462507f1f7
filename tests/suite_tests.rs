use std::path::Path;

use api_report::model::case::{AssertionRecord, Outcome, TestCase};
use api_report::model::manifest::{SuiteIdentity, SuiteManifest};
use api_report::paths::ReportPaths;
use api_report::report::suite_html::render_suite_html;
use api_report::suite::builder::{SuiteReport, generate_suite_report};

// ============================================================================
// Helper builders
// ============================================================================

fn case_with_assertions(
    folder: &str,
    api: &str,
    outcome: Outcome,
    assertions: Vec<AssertionRecord>,
) -> TestCase {
    TestCase {
        group_key: folder.to_string(),
        api_name: api.to_string(),
        iteration: 1,
        outcome,
        assertions,
        status_code: Some(200),
        response_time_ms: Some(120.0),
        request: None,
        response: None,
    }
}

fn passing_assertion(name: &str) -> AssertionRecord {
    AssertionRecord {
        name: name.to_string(),
        passed: true,
        message: String::new(),
    }
}

fn sample_report() -> SuiteReport {
    let cases = vec![
        case_with_assertions(
            "Orders",
            "Orders / Create Order",
            Outcome::Pass,
            vec![passing_assertion("Status is 201")],
        ),
        case_with_assertions(
            "Orders",
            "Orders / Get <Order>",
            Outcome::Fail,
            vec![AssertionRecord {
                name: "Status is 200".to_string(),
                passed: false,
                message: "got 500".to_string(),
            }],
        ),
        case_with_assertions(
            "Refunds",
            "Refunds / Issue Refund",
            Outcome::Pass,
            vec![passing_assertion("Body schema + --> Failing")],
        ),
    ];

    SuiteReport::build(
        cases,
        "Digital API Automation",
        1000,
        SuiteIdentity::new("Billing", "Invoices"),
        "Billing Collection",
        Some(1756100000000),
    )
}

/// Fresh scratch directory under the system temp dir, unique per test.
fn scratch(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(name);
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// 1. Identity from output path
// ============================================================================

#[test]
fn identity_from_anchored_path() {
    let id = SuiteIdentity::from_output_path(Path::new("/data/Reports/Billing/Invoices/run.html"));
    assert_eq!(id, SuiteIdentity::new("Billing", "Invoices"));
    assert_eq!(id.to_string(), "Billing/Invoices");
}

#[test]
fn identity_single_segment_after_anchor() {
    let id = SuiteIdentity::from_output_path(Path::new("/data/Reports/Billing/run.html"));
    assert_eq!(id, SuiteIdentity::new("Billing", "run"));
}

#[test]
fn identity_anchor_with_no_following_dirs() {
    let id = SuiteIdentity::from_output_path(Path::new("/data/Reports/run.html"));
    assert_eq!(id, SuiteIdentity::new("General", "run"));
}

#[test]
fn identity_without_anchor_uses_parent_dir() {
    let id = SuiteIdentity::from_output_path(Path::new("/srv/output/run.html"));
    assert_eq!(id, SuiteIdentity::new("output", "run"));
}

#[test]
fn identity_bare_file_name() {
    let id = SuiteIdentity::from_output_path(Path::new("run.html"));
    assert_eq!(id, SuiteIdentity::new("General", "run"));
}

#[test]
fn identity_nothing_usable() {
    let id = SuiteIdentity::from_output_path(Path::new(""));
    assert_eq!(id, SuiteIdentity::new("General", "Suite"));
}

#[test]
fn identity_deep_nesting_takes_first_two() {
    let id =
        SuiteIdentity::from_output_path(Path::new("/x/Reports/Billing/Invoices/nested/run.html"));
    assert_eq!(id, SuiteIdentity::new("Billing", "Invoices"));
}

// ============================================================================
// 2. Aggregate build — registry and soft flags
// ============================================================================

#[test]
fn build_collects_api_registry() {
    let report = sample_report();
    assert_eq!(report.api_registry.len(), 3);
    assert!(
        report
            .api_registry
            .contains(&"Orders / Create Order".to_string())
    );
    assert!(
        report
            .api_registry
            .contains(&"Refunds / Issue Refund".to_string())
    );
}

#[test]
fn build_flags_soft_failures() {
    let report = sample_report();
    assert!(report.is_soft_flagged("Refunds"));
    assert!(report.is_soft_flagged("Refunds / Issue Refund"));
    assert!(!report.is_soft_flagged("Orders"));
}

#[test]
fn build_scopes_api_rows_to_folders() {
    let report = sample_report();
    assert_eq!(report.apis_in_folder("Orders").len(), 2);
    assert_eq!(report.apis_in_folder("Refunds").len(), 1);
    assert_eq!(
        report.cases_for("Orders", "Orders / Create Order").len(),
        1
    );
}

// ============================================================================
// 3. Manifest round trip
// ============================================================================

#[test]
fn manifest_save_load_round_trip() {
    let dir = scratch("api_report_manifest_rt");
    let path = dir.join("Invoices_latest.json");

    let manifest = sample_report().manifest();
    manifest.save(&path).unwrap();

    let loaded = SuiteManifest::load(&path).unwrap();
    assert_eq!(loaded, manifest);
    assert_eq!(loaded.identity(), SuiteIdentity::new("Billing", "Invoices"));
    assert_eq!(loaded.total_cases, 3);
    assert_eq!(loaded.passed_cases, 2);
    assert_eq!(loaded.failed_cases, 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn manifest_load_rejects_malformed_file() {
    let dir = scratch("api_report_manifest_bad");
    let path = dir.join("Broken_latest.json");
    std::fs::write(&path, "{not a manifest").unwrap();

    let err = SuiteManifest::load(&path).unwrap_err();
    assert!(err.to_string().contains("malformed"));

    std::fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// 4. Suite document structure
// ============================================================================

#[test]
fn suite_html_structure() {
    let html = render_suite_html(&sample_report()).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("</html>"));
    assert!(html.contains("Digital API Automation"));
    assert!(html.contains("Billing/Invoices"));
    assert!(html.contains("Pass Rate (%)"));
    assert!(html.contains("id=\"suite-manifest\""));
}

#[test]
fn suite_html_escapes_display_names() {
    let html = render_suite_html(&sample_report()).unwrap();
    assert!(html.contains("Orders / Get &lt;Order&gt;"));
}

#[test]
fn suite_html_fail_color_when_any_failure() {
    let html = render_suite_html(&sample_report()).unwrap();
    assert!(html.contains("#f44336"));
}

#[test]
fn suite_html_pass_color_when_all_green() {
    let report = SuiteReport::build(
        vec![case_with_assertions(
            "Orders",
            "Orders / Create Order",
            Outcome::Pass,
            vec![passing_assertion("Status is 201")],
        )],
        "Digital API Automation",
        1000,
        SuiteIdentity::new("Billing", "Invoices"),
        "Billing Collection",
        None,
    );
    let html = render_suite_html(&report).unwrap();
    assert!(html.contains("#4CAF50"));
}

#[test]
fn suite_html_case_anchors_and_soft_rows() {
    let report = sample_report();
    let html = render_suite_html(&report).unwrap();
    let case_id = report.cases[0].case_id();
    assert!(html.contains(&format!("id=\"case-{}\"", case_id)));
    assert!(html.contains("class=\"soft\""));
}

// ============================================================================
// 5. Stage entry point end to end
// ============================================================================

#[test]
fn generate_writes_primary_latest_and_manifest() {
    let base = scratch("api_report_suite_e2e");
    let root = base.join("Reports");
    let paths = ReportPaths::at(&root);

    let input = base.join("run.json");
    std::fs::write(
        &input,
        r#"{"collection":{"info":{"name":"Billing Collection"}},"run":{"executions":[
            {"item":{"name":"Invoices / Get Invoice"},"response":{"code":200,"responseTime":90},
             "assertions":[{"assertion":"Status is 200"}]},
            {"item":{"name":"Invoices / Void Invoice"},"response":{"code":500,"responseTime":150},
             "assertions":[{"assertion":"Status is 200","error":{"message":"got 500"}}]}
        ]}}"#,
    )
    .unwrap();

    let output = root.join("Billing").join("Invoices").join("run.html");
    let outcome = generate_suite_report(&input, &output, "Digital API Automation", 1000, &paths, 0)
        .unwrap();

    assert_eq!(outcome.identity, SuiteIdentity::new("Billing", "Invoices"));
    assert!(output.is_file());
    assert!(outcome.latest_html.is_file());
    assert_eq!(
        outcome.latest_html,
        root.join("Temp").join("Billing").join("Invoices_latest.html")
    );

    let manifest = SuiteManifest::load(&outcome.manifest_path).unwrap();
    assert_eq!(manifest.grouping, "Billing");
    assert_eq!(manifest.module, "Invoices");
    assert_eq!(manifest.total_cases, 2);
    assert_eq!(manifest.passed_cases, 1);
    assert_eq!(manifest.failed_cases, 1);
    assert_eq!(manifest.collection, "Billing Collection");

    // Primary document and staged copy carry the same bytes.
    let primary = std::fs::read_to_string(&output).unwrap();
    let staged = std::fs::read_to_string(&outcome.latest_html).unwrap();
    assert_eq!(primary, staged);

    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn generate_rerun_replaces_outputs() {
    let base = scratch("api_report_suite_rerun");
    let root = base.join("Reports");
    let paths = ReportPaths::at(&root);

    let input = base.join("run.json");
    std::fs::write(
        &input,
        r#"{"run":{"executions":[
            {"item":{"name":"Invoices / Get Invoice"},"response":{"code":200,"responseTime":90},
             "assertions":[{"assertion":"Status is 200"}]}
        ]}}"#,
    )
    .unwrap();

    let output = root.join("Billing").join("Invoices").join("run.html");
    let first = generate_suite_report(&input, &output, "Digital API Automation", 1000, &paths, 0)
        .unwrap();
    let second = generate_suite_report(&input, &output, "Digital API Automation", 1000, &paths, 0)
        .unwrap();

    assert_eq!(first.manifest_path, second.manifest_path);
    let manifest = SuiteManifest::load(&second.manifest_path).unwrap();
    assert_eq!(manifest.total_cases, 1);
    assert_eq!(manifest.passed_cases, 1);

    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn generate_fails_fast_without_partial_output() {
    let base = scratch("api_report_suite_failfast");
    let root = base.join("Reports");
    let paths = ReportPaths::at(&root);

    let input = base.join("run.json");
    std::fs::write(&input, "{definitely not json").unwrap();

    let output = root.join("Billing").join("Invoices").join("run.html");
    let err = generate_suite_report(&input, &output, "Digital API Automation", 1000, &paths, 0)
        .unwrap_err();

    assert!(err.to_string().contains("not valid JSON"));
    assert!(!output.exists());
    assert!(!root.join("Temp").exists());

    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn generate_missing_input_is_read_error() {
    let base = scratch("api_report_suite_noinput");
    let root = base.join("Reports");
    let paths = ReportPaths::at(&root);

    let output = root.join("Billing").join("Invoices").join("run.html");
    let err = generate_suite_report(
        &base.join("absent.json"),
        &output,
        "Digital API Automation",
        1000,
        &paths,
        0,
    )
    .unwrap_err();

    assert!(err.to_string().contains("Cannot read run result"));

    std::fs::remove_dir_all(&base).ok();
}
