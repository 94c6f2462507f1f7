use api_report::model::case::{Outcome, TestCase};
use api_report::model::summary::{
    SuiteStats, display_sort_key, rounded_pct, summarize_apis, summarize_folders,
};

// ============================================================================
// Helper builders
// ============================================================================

fn case(folder: &str, api: &str, outcome: Outcome, time: Option<f64>) -> TestCase {
    TestCase {
        group_key: folder.to_string(),
        api_name: api.to_string(),
        iteration: 1,
        outcome,
        assertions: vec![],
        status_code: Some(200),
        response_time_ms: time,
        request: None,
        response: None,
    }
}

// ============================================================================
// 1. Suite stats — counted outcomes only
// ============================================================================

#[test]
fn suite_stats_exclude_skipped_and_not_run() {
    let cases = vec![
        case("A", "A / One", Outcome::Pass, Some(100.0)),
        case("A", "A / Two", Outcome::Fail, Some(200.0)),
        case("A", "A / Three", Outcome::Skipped, Some(5000.0)),
        case("A", "A / Four", Outcome::NotRun, None),
    ];

    let stats = SuiteStats::compute(&cases, 1000);
    assert_eq!(stats.total_cases, 2);
    assert_eq!(stats.passed_cases, 1);
    assert_eq!(stats.failed_cases, 1);
    assert_eq!(stats.skipped_cases, 1);
    assert_eq!(stats.not_run_cases, 1);
    assert_eq!(stats.total_cases, stats.passed_cases + stats.failed_cases);
}

// ============================================================================
// 2. Empty input
// ============================================================================

#[test]
fn suite_stats_empty() {
    let stats = SuiteStats::compute(&[], 1000);
    assert_eq!(stats.total_cases, 0);
    assert_eq!(stats.pass_pct, 0);
    assert_eq!(stats.within_sla_pct, 0);
    assert_eq!(stats.avg_response_ms, 0);
}

// ============================================================================
// 3. SLA boundary is inclusive
// ============================================================================

#[test]
fn sla_boundary_inclusive() {
    let cases = vec![
        case("A", "A / Exact", Outcome::Pass, Some(1000.0)),
        case("A", "A / Over", Outcome::Pass, Some(1000.1)),
    ];

    let stats = SuiteStats::compute(&cases, 1000);
    assert_eq!(stats.within_sla, 1);
    assert_eq!(stats.within_sla_pct, 50);
}

#[test]
fn missing_time_stays_in_sla_denominator() {
    let cases = vec![
        case("A", "A / Fast", Outcome::Pass, Some(10.0)),
        case("A", "A / NoTime", Outcome::Pass, None),
    ];

    let stats = SuiteStats::compute(&cases, 1000);
    assert_eq!(stats.within_sla, 1);
    assert_eq!(stats.within_sla_pct, 50); // denominator includes the timeless case
}

// ============================================================================
// 4. Average response time
// ============================================================================

#[test]
fn avg_response_over_defined_times_only() {
    let cases = vec![
        case("A", "A / One", Outcome::Pass, Some(100.0)),
        case("A", "A / Two", Outcome::Fail, Some(101.0)),
        case("A", "A / Three", Outcome::Pass, None),
    ];

    let stats = SuiteStats::compute(&cases, 1000);
    assert_eq!(stats.avg_response_ms, 101); // (100 + 101) / 2 rounded
}

// ============================================================================
// 5. Percentage rounding
// ============================================================================

#[test]
fn rounded_pct_values() {
    assert_eq!(rounded_pct(0, 0), 0);
    assert_eq!(rounded_pct(1, 2), 50);
    assert_eq!(rounded_pct(1, 3), 33);
    assert_eq!(rounded_pct(2, 3), 67);
    assert_eq!(rounded_pct(5, 5), 100);
}

// ============================================================================
// 6. Folder summaries — counts and order
// ============================================================================

#[test]
fn folder_summaries_counts() {
    let cases = vec![
        case("Orders", "Orders / Create", Outcome::Pass, Some(100.0)),
        case("Orders", "Orders / Get", Outcome::Fail, Some(300.0)),
        case("Orders", "Orders / Skip", Outcome::Skipped, None),
        case("Accounts", "Accounts / Create", Outcome::Pass, Some(50.0)),
    ];

    let folders = summarize_folders(&cases);
    assert_eq!(folders.len(), 2);

    assert_eq!(folders[0].name, "Accounts");
    assert_eq!(folders[0].total, 1);
    assert_eq!(folders[0].pass_rate_pct, 100);

    assert_eq!(folders[1].name, "Orders");
    assert_eq!(folders[1].total, 2);
    assert_eq!(folders[1].pass_count, 1);
    assert_eq!(folders[1].fail_count, 1);
    assert_eq!(folders[1].pass_rate_pct, 50);
    assert_eq!(folders[1].avg_response_ms, 200);
}

#[test]
fn folder_order_ignores_case_and_punctuation() {
    let cases = vec![
        case("[Admin] Users", "[Admin] Users / List", Outcome::Pass, None),
        case("accounts", "accounts / Get", Outcome::Pass, None),
        case("Billing", "Billing / Pay", Outcome::Pass, None),
    ];

    let names: Vec<String> = summarize_folders(&cases)
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["accounts", "[Admin] Users", "Billing"]);
}

// ============================================================================
// 7. API summaries — one row per (folder, API)
// ============================================================================

#[test]
fn api_summaries_are_folder_scoped() {
    let cases = vec![
        case("A", "A / Shared", Outcome::Pass, Some(100.0)),
        case("B", "B / Shared", Outcome::Fail, Some(200.0)),
        case("A", "A / Shared", Outcome::Pass, Some(300.0)),
    ];

    let apis = summarize_apis(&cases);
    assert_eq!(apis.len(), 2);
    assert_eq!(apis[0].folder, "A");
    assert_eq!(apis[0].total, 2);
    assert_eq!(apis[0].avg_response_ms, 200);
    assert_eq!(apis[1].folder, "B");
    assert_eq!(apis[1].fail_count, 1);
}

// ============================================================================
// 8. Sort key normalization
// ============================================================================

#[test]
fn display_sort_key_strips_punctuation() {
    assert_eq!(display_sort_key("Get-Invoice!"), "getinvoice");
    assert_eq!(display_sort_key("Get Invoice 2"), "get invoice 2");
    assert_eq!(display_sort_key("ALL CAPS"), "all caps");
}
