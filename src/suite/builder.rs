use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::ReportError;
use crate::ingest::normalize::normalize_run;
use crate::ingest::raw::RawRunReport;
use crate::markers::has_soft_failure_marker;
use crate::model::case::TestCase;
use crate::model::manifest::{MANIFEST_SCHEMA, SuiteIdentity, SuiteManifest};
use crate::model::summary::{
    ApiSummary, FolderSummary, SuiteStats, display_sort_key, summarize_apis, summarize_folders,
};
use crate::paths::ReportPaths;
use crate::report::suite_html::render_suite_html;

// ============================================================================
// Suite report — aggregates one normalized run into renderable form
// ============================================================================

/// Everything one suite render needs: the normalized cases plus every
/// statistic derived from them. Built once per run result, then handed to
/// the renderer and the manifest writer.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub title: String,
    pub sla_ms: u64,
    pub identity: SuiteIdentity,
    pub collection: String,
    pub started_at: Option<i64>,
    pub generated_at: String,
    pub stats: SuiteStats,
    pub folders: Vec<FolderSummary>,
    pub apis: Vec<ApiSummary>,
    pub api_registry: Vec<String>,
    pub soft_failures: Vec<String>,
    pub cases: Vec<TestCase>,
}

impl SuiteReport {
    /// Build the full aggregate view over a normalized case list.
    pub fn build(
        cases: Vec<TestCase>,
        title: &str,
        sla_ms: u64,
        identity: SuiteIdentity,
        collection: &str,
        started_at: Option<i64>,
    ) -> Self {
        let stats = SuiteStats::compute(&cases, sla_ms);
        let folders = summarize_folders(&cases);
        let apis = summarize_apis(&cases);
        let api_registry = collect_api_registry(&cases);
        let soft_failures = collect_soft_failures(&cases);

        Self {
            title: title.to_string(),
            sla_ms,
            identity,
            collection: collection.to_string(),
            started_at,
            generated_at: Utc::now().to_rfc3339(),
            stats,
            folders,
            apis,
            api_registry,
            soft_failures,
            cases,
        }
    }

    /// API detail rows belonging to one folder, in display order.
    pub fn apis_in_folder(&self, folder: &str) -> Vec<&ApiSummary> {
        self.apis.iter().filter(|a| a.folder == folder).collect()
    }

    /// Cases belonging to one (folder, API) pair, in normalization order.
    pub fn cases_for(&self, folder: &str, api: &str) -> Vec<&TestCase> {
        self.cases
            .iter()
            .filter(|c| c.group_key == folder && c.api_name == api)
            .collect()
    }

    pub fn is_soft_flagged(&self, name: &str) -> bool {
        self.soft_failures.iter().any(|n| n == name)
    }

    /// The sidecar record the combined stage consumes.
    pub fn manifest(&self) -> SuiteManifest {
        SuiteManifest {
            schema: MANIFEST_SCHEMA,
            title: self.title.clone(),
            grouping: self.identity.grouping.clone(),
            module: self.identity.module.clone(),
            collection: self.collection.clone(),
            generated_at: self.generated_at.clone(),
            total_cases: self.stats.total_cases,
            passed_cases: self.stats.passed_cases,
            failed_cases: self.stats.failed_cases,
            api_registry: self.api_registry.clone(),
            folders: self.folders.clone(),
            apis: self.apis.clone(),
            soft_failures: self.soft_failures.clone(),
        }
    }
}

/// Deduplicated API display names observed in the suite, in display order.
fn collect_api_registry(cases: &[TestCase]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = Vec::new();
    for case in cases {
        if seen.insert(case.api_name.as_str()) {
            names.push(case.api_name.clone());
        }
    }
    names.sort_by_key(|n| display_sort_key(n));
    names
}

/// Folder and API names owning at least one assertion whose name or message
/// carries the soft-failure marker.
fn collect_soft_failures(cases: &[TestCase]) -> Vec<String> {
    let mut flagged: Vec<String> = Vec::new();
    for case in cases {
        let hit = case
            .assertions
            .iter()
            .any(|a| has_soft_failure_marker(&a.name) || has_soft_failure_marker(&a.message));
        if !hit {
            continue;
        }
        for name in [case.group_key.as_str(), case.api_name.as_str()] {
            if !flagged.iter().any(|f| f == name) {
                flagged.push(name.to_string());
            }
        }
    }
    flagged.sort();
    flagged
}

// ============================================================================
// Stage entry point — parse, build, render, write
// ============================================================================

/// Where one suite-report invocation wrote its artifacts.
#[derive(Debug)]
pub struct SuiteRenderOutcome {
    pub identity: SuiteIdentity,
    pub primary_path: PathBuf,
    pub latest_html: PathBuf,
    pub manifest_path: PathBuf,
    pub stats: SuiteStats,
}

/// Generate one suite report: read and parse the run result (fail fast; no
/// partial output is ever written), normalize, aggregate, render, then write
/// the primary document plus the last-known-good HTML/manifest pair the
/// combined stage scans later.
pub fn generate_suite_report(
    input: &Path,
    output: &Path,
    title: &str,
    sla_ms: u64,
    paths: &ReportPaths,
    verbose: u8,
) -> Result<SuiteRenderOutcome, ReportError> {
    let raw = RawRunReport::from_file(input)?;
    let cases = normalize_run(&raw);
    if verbose > 0 {
        eprintln!(
            "  Normalized {} execution(s) from {}",
            cases.len(),
            input.display()
        );
    }

    let identity = SuiteIdentity::from_output_path(output);
    let report = SuiteReport::build(
        cases,
        title,
        sla_ms,
        identity.clone(),
        &raw.collection_name(),
        raw.started_at(),
    );

    let html = render_suite_html(&report)?;

    write_with_dirs(output, &html)?;
    println!("Wrote {}", output.display());

    let latest_html = paths.latest_html(&identity);
    write_with_dirs(&latest_html, &html)?;
    println!("Wrote {}", latest_html.display());

    let manifest_path = paths.latest_manifest(&identity);
    ensure_parent(&manifest_path)?;
    report.manifest().save(&manifest_path)?;
    println!("Wrote {}", manifest_path.display());

    Ok(SuiteRenderOutcome {
        identity,
        primary_path: output.to_path_buf(),
        latest_html,
        manifest_path,
        stats: report.stats,
    })
}

fn ensure_parent(path: &Path) -> Result<(), ReportError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ReportError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn write_with_dirs(path: &Path, content: &str) -> Result<(), ReportError> {
    ensure_parent(path)?;
    std::fs::write(path, content).map_err(|e| ReportError::WriteOutput {
        path: path.to_path_buf(),
        source: e,
    })
}
