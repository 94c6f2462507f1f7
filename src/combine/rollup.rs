use std::collections::{HashMap, HashSet};

use crate::model::manifest::SuiteManifest;
use crate::model::summary::{rounded_pct, sort_pair};

// ============================================================================
// Cross-suite rollup — groupings, modules, and API accounts
// ============================================================================

/// One API row on the combined dashboard. Each suite folder row becomes one
/// of these under its grouping and module; rows sharing all three keys merge,
/// with latency averaged by case weight.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRow {
    pub grouping: String,
    pub module: String,
    pub api: String,
    pub pass: u64,
    pub fail: u64,
    pub total: u64,
    pub pass_rate_pct: u32,
    pub avg_response_ms: u64,
    pub soft_failure: bool,
}

/// Headline numbers at the global or per-grouping level. API counts and case
/// counts are deliberately separate figures: an API passes only when every
/// one of its executions passed, so the two percentages usually differ.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rollup {
    pub unique_apis: u64,
    pub passed_apis: u64,
    pub failed_apis: u64,
    pub api_pass_pct: u32,
    pub total_cases: u64,
    pub passed_cases: u64,
    pub failed_cases: u64,
    pub case_pass_pct: u32,
}

/// Rows for one module within a grouping, in display order.
#[derive(Debug, Clone)]
pub struct ModuleSection {
    pub module: String,
    pub rows: Vec<CombinedRow>,
}

/// One business grouping: its own rollup plus its modules.
#[derive(Debug, Clone)]
pub struct GroupingSection {
    pub grouping: String,
    pub rollup: Rollup,
    pub modules: Vec<ModuleSection>,
}

/// The fully aggregated picture across every discovered suite.
#[derive(Debug, Clone)]
pub struct CombinedReport {
    pub generated_on: String,
    pub rollup: Rollup,
    pub groupings: Vec<GroupingSection>,
}

impl CombinedReport {
    /// Aggregate suite manifests into the combined report.
    ///
    /// An API is identified by name within its grouping. The unique set per
    /// grouping is the union of each manifest's registry (or its folder row
    /// names when the registry is empty), so a registered API that produced
    /// no rows still counts, as failed. An API is passed only when it ran at
    /// least once and recorded zero failures across every module.
    pub fn from_manifests(manifests: &[SuiteManifest], generated_on: &str) -> Self {
        let mut rows: HashMap<(String, String, String), RowAccumulator> = HashMap::new();
        let mut accounts: HashMap<String, HashMap<String, ApiAccount>> = HashMap::new();
        let mut unique: HashMap<String, HashSet<String>> = HashMap::new();
        let mut cases: HashMap<String, CaseTally> = HashMap::new();

        for manifest in manifests {
            let grouping = manifest.grouping.clone();
            let soft: HashSet<&str> = manifest
                .soft_failures
                .iter()
                .map(String::as_str)
                .collect();

            let case_tally = cases.entry(grouping.clone()).or_default();
            case_tally.total += manifest.total_cases;
            case_tally.passed += manifest.passed_cases;
            case_tally.failed += manifest.failed_cases;

            let names = unique.entry(grouping.clone()).or_default();
            if manifest.api_registry.is_empty() {
                for folder in &manifest.folders {
                    names.insert(folder.name.clone());
                }
            } else {
                for api in &manifest.api_registry {
                    names.insert(api.clone());
                }
            }

            for folder in &manifest.folders {
                let key = (
                    grouping.clone(),
                    manifest.module.clone(),
                    folder.name.clone(),
                );
                let acc = rows.entry(key).or_default();
                acc.pass += folder.pass_count;
                acc.fail += folder.fail_count;
                acc.weighted_ms += folder.avg_response_ms as f64 * folder.total as f64;
                acc.total += folder.total;
                acc.soft |= soft.contains(folder.name.as_str());

                let account = accounts
                    .entry(grouping.clone())
                    .or_default()
                    .entry(folder.name.clone())
                    .or_default();
                account.total += folder.total;
                account.fail += folder.fail_count;
            }
        }

        let mut row_list: Vec<CombinedRow> = rows
            .into_iter()
            .map(|((grouping, module, api), acc)| CombinedRow {
                pass: acc.pass,
                fail: acc.fail,
                total: acc.total,
                pass_rate_pct: rounded_pct(acc.pass, acc.total),
                avg_response_ms: acc.avg_ms(),
                soft_failure: acc.soft,
                grouping,
                module,
                api,
            })
            .collect();
        row_list.sort_by(|a, b| {
            sort_pair(&a.grouping, &b.grouping)
                .then_with(|| sort_pair(&a.module, &b.module))
                .then_with(|| sort_pair(&a.api, &b.api))
        });

        let mut grouping_names: Vec<String> = cases.keys().cloned().collect();
        grouping_names.sort_by(|a, b| sort_pair(a, b));

        let mut groupings = Vec::new();
        for grouping in grouping_names {
            let names = unique.remove(&grouping).unwrap_or_default();
            let group_accounts = accounts.remove(&grouping).unwrap_or_default();
            let case_tally = cases.remove(&grouping).unwrap_or_default();

            let unique_count = names.len() as u64;
            let passed_apis = names
                .iter()
                .filter(|name| {
                    group_accounts
                        .get(name.as_str())
                        .is_some_and(|acc| acc.total > 0 && acc.fail == 0)
                })
                .count() as u64;

            let rollup = Rollup {
                unique_apis: unique_count,
                passed_apis,
                failed_apis: unique_count - passed_apis,
                api_pass_pct: rounded_pct(passed_apis, unique_count),
                total_cases: case_tally.total,
                passed_cases: case_tally.passed,
                failed_cases: case_tally.failed,
                case_pass_pct: rounded_pct(case_tally.passed, case_tally.total),
            };

            // Rows are already sorted, so consecutive same-module rows fold
            // into one section.
            let mut modules: Vec<ModuleSection> = Vec::new();
            for row in row_list.iter().filter(|r| r.grouping == grouping) {
                match modules.last_mut() {
                    Some(section) if section.module == row.module => {
                        section.rows.push(row.clone())
                    }
                    _ => modules.push(ModuleSection {
                        module: row.module.clone(),
                        rows: vec![row.clone()],
                    }),
                }
            }

            groupings.push(GroupingSection {
                grouping,
                rollup,
                modules,
            });
        }

        let mut overall = Rollup::default();
        for section in &groupings {
            overall.unique_apis += section.rollup.unique_apis;
            overall.passed_apis += section.rollup.passed_apis;
            overall.failed_apis += section.rollup.failed_apis;
            overall.total_cases += section.rollup.total_cases;
            overall.passed_cases += section.rollup.passed_cases;
            overall.failed_cases += section.rollup.failed_cases;
        }
        overall.api_pass_pct = rounded_pct(overall.passed_apis, overall.unique_apis);
        overall.case_pass_pct = rounded_pct(overall.passed_cases, overall.total_cases);

        CombinedReport {
            generated_on: generated_on.to_string(),
            rollup: overall,
            groupings,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Running merge state for one (grouping, module, API) row.
#[derive(Debug, Default)]
struct RowAccumulator {
    pass: u64,
    fail: u64,
    total: u64,
    weighted_ms: f64,
    soft: bool,
}

impl RowAccumulator {
    fn avg_ms(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            (self.weighted_ms / self.total as f64).round() as u64
        }
    }
}

/// Per-API execution account within one grouping, summed across modules.
#[derive(Debug, Default)]
struct ApiAccount {
    total: u64,
    fail: u64,
}

/// Case counts per grouping.
#[derive(Debug, Default)]
struct CaseTally {
    total: u64,
    passed: u64,
    failed: u64,
}
