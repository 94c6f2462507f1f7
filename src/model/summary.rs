use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::case::{Outcome, TestCase};

// ============================================================================
// Aggregate statistics — folder, API, and whole-suite levels
// ============================================================================

/// Pass/fail statistics over every counted case sharing a folder. Skipped
/// and not-run cases never enter these numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderSummary {
    pub name: String,
    pub total: u64,
    pub pass_count: u64,
    pub fail_count: u64,
    pub pass_rate_pct: u32,
    pub avg_response_ms: u64,
}

/// The same five numbers scoped to one API within one folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSummary {
    pub folder: String,
    pub api_name: String,
    pub total: u64,
    pub pass_count: u64,
    pub fail_count: u64,
    pub pass_rate_pct: u32,
    pub avg_response_ms: u64,
}

/// Whole-suite statistics shown in the report header. Counted cases only,
/// except the skipped/not-run tallies which exist for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteStats {
    pub total_cases: u64,
    pub passed_cases: u64,
    pub failed_cases: u64,
    pub skipped_cases: u64,
    pub not_run_cases: u64,
    pub pass_pct: u32,
    pub within_sla: u64,
    pub within_sla_pct: u32,
    pub avg_response_ms: u64,
}

impl SuiteStats {
    /// Compute suite-level statistics. A case is within SLA when its
    /// response time is defined and `<=` the threshold (boundary inclusive);
    /// cases without a response time stay in the denominator.
    pub fn compute(cases: &[TestCase], sla_ms: u64) -> Self {
        let mut tally = Tally::default();
        let mut skipped = 0u64;
        let mut not_run = 0u64;
        let mut within_sla = 0u64;

        for case in cases {
            match case.outcome {
                Outcome::Pass | Outcome::Fail => {
                    tally.add(case);
                    if case.response_time_ms.is_some_and(|ms| ms <= sla_ms as f64) {
                        within_sla += 1;
                    }
                }
                Outcome::Skipped => skipped += 1,
                Outcome::NotRun => not_run += 1,
            }
        }

        SuiteStats {
            total_cases: tally.total(),
            passed_cases: tally.pass,
            failed_cases: tally.fail,
            skipped_cases: skipped,
            not_run_cases: not_run,
            pass_pct: rounded_pct(tally.pass, tally.total()),
            within_sla,
            within_sla_pct: rounded_pct(within_sla, tally.total()),
            avg_response_ms: tally.avg_ms(),
        }
    }
}

// ============================================================================
// Summary construction
// ============================================================================

/// Build one summary per distinct folder, sorted by the human-friendly form
/// of the folder name.
pub fn summarize_folders(cases: &[TestCase]) -> Vec<FolderSummary> {
    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for case in cases {
        tallies.entry(&case.group_key).or_default().add(case);
    }

    let mut folders: Vec<FolderSummary> = tallies
        .into_iter()
        .map(|(name, tally)| FolderSummary {
            name: name.to_string(),
            total: tally.total(),
            pass_count: tally.pass,
            fail_count: tally.fail,
            pass_rate_pct: rounded_pct(tally.pass, tally.total()),
            avg_response_ms: tally.avg_ms(),
        })
        .collect();

    folders.sort_by(|a, b| sort_pair(&a.name, &b.name));
    folders
}

/// Build one summary per distinct (folder, API) pair, sorted by folder then
/// API display form. Renderers filter this list per folder for drill-down.
pub fn summarize_apis(cases: &[TestCase]) -> Vec<ApiSummary> {
    let mut tallies: HashMap<(&str, &str), Tally> = HashMap::new();
    for case in cases {
        tallies
            .entry((&case.group_key, &case.api_name))
            .or_default()
            .add(case);
    }

    let mut apis: Vec<ApiSummary> = tallies
        .into_iter()
        .map(|((folder, api), tally)| ApiSummary {
            folder: folder.to_string(),
            api_name: api.to_string(),
            total: tally.total(),
            pass_count: tally.pass,
            fail_count: tally.fail,
            pass_rate_pct: rounded_pct(tally.pass, tally.total()),
            avg_response_ms: tally.avg_ms(),
        })
        .collect();

    apis.sort_by(|a, b| {
        sort_pair(&a.folder, &b.folder).then_with(|| sort_pair(&a.api_name, &b.api_name))
    });
    apis
}

// ============================================================================
// Helpers
// ============================================================================

/// Running pass/fail/latency tally over counted cases.
#[derive(Debug, Default)]
struct Tally {
    pass: u64,
    fail: u64,
    time_sum: f64,
    time_count: u64,
}

impl Tally {
    fn add(&mut self, case: &TestCase) {
        if !case.counted() {
            return;
        }
        if case.passed() {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        if let Some(ms) = case.response_time_ms {
            self.time_sum += ms;
            self.time_count += 1;
        }
    }

    fn total(&self) -> u64 {
        self.pass + self.fail
    }

    fn avg_ms(&self) -> u64 {
        if self.time_count == 0 {
            0
        } else {
            (self.time_sum / self.time_count as f64).round() as u64
        }
    }
}

/// Rounded integer percentage; 0 when the denominator is 0.
pub fn rounded_pct(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        0
    } else {
        (100.0 * part as f64 / whole as f64).round() as u32
    }
}

/// Human-friendly ordering form of a display name: lowercase with
/// punctuation stripped, so "get-invoice" and "Get Invoice" sort together.
pub fn display_sort_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Ordering on the sort key with the raw name as tiebreaker.
pub fn sort_pair(a: &str, b: &str) -> std::cmp::Ordering {
    display_sort_key(a)
        .cmp(&display_sort_key(b))
        .then_with(|| a.cmp(b))
}
