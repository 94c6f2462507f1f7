use std::fs;
use std::path::Path;

use chrono::Local;

use crate::cleanup::clear_temp;
use crate::combine::rollup::CombinedReport;
use crate::combine::scan::discover_manifests;
use crate::error::ReportError;
use crate::model::manifest::SuiteManifest;
use crate::paths::{COMBINED_REPORT_FILE, EMAIL_BODY_FILE, EMAIL_BODY_INLINE_FILE, ReportPaths};
use crate::report::combined_html::render_combined_html;
use crate::report::email::render_email_body;
use crate::suite::builder::generate_suite_report;

// ============================================================================
// suite-report subcommand
// ============================================================================

pub fn cmd_suite_report(
    input: &str,
    output: &str,
    title: &str,
    sla_ms: u64,
    paths: &ReportPaths,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose > 0 {
        eprintln!("Building suite report from {}...", input);
    }

    let outcome = generate_suite_report(
        Path::new(input),
        Path::new(output),
        title,
        sla_ms,
        paths,
        verbose,
    )?;

    println!(
        "Suite {}: {} passed, {} failed, {} skipped ({}% pass rate)",
        outcome.identity,
        outcome.stats.passed_cases,
        outcome.stats.failed_cases,
        outcome.stats.skipped_cases,
        outcome.stats.pass_pct,
    );
    Ok(())
}

// ============================================================================
// combine subcommand
// ============================================================================

pub fn cmd_combine(paths: &ReportPaths, verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let discovered = discover_manifests(&paths.temp_dir(), verbose);
    if discovered.is_empty() {
        println!(
            "No suite reports staged under {}; nothing to combine",
            paths.temp_dir().display()
        );
        return Ok(());
    }

    if verbose > 0 {
        eprintln!("Combining {} suite manifest(s)...", discovered.len());
    }

    let manifests: Vec<SuiteManifest> = discovered.into_iter().map(|d| d.manifest).collect();
    let date = Local::now().format("%Y-%m-%d").to_string();
    let report = CombinedReport::from_manifests(&manifests, &date);
    let email_dir = paths.email_dir(&date);

    let dashboard_path = email_dir.join(COMBINED_REPORT_FILE);
    write_file(&dashboard_path, &render_combined_html(&report))?;
    println!("Wrote {}", dashboard_path.display());

    // Both email files carry the same fragment; mail tooling picks whichever
    // name it expects.
    let email = render_email_body(&report);
    for name in [EMAIL_BODY_FILE, EMAIL_BODY_INLINE_FILE] {
        let path = email_dir.join(name);
        write_file(&path, &email)?;
        println!("Wrote {}", path.display());
    }

    println!(
        "Combined {} grouping(s): {}/{} APIs passed, {}/{} cases passed",
        report.groupings.len(),
        report.rollup.passed_apis,
        report.rollup.unique_apis,
        report.rollup.passed_cases,
        report.rollup.total_cases,
    );
    Ok(())
}

// ============================================================================
// cleanup subcommand
// ============================================================================

pub fn cmd_cleanup(paths: &ReportPaths, verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let removed = clear_temp(paths, verbose);
    println!(
        "Removed {} entries from {}",
        removed,
        paths.temp_dir().display()
    );
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| ReportError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| ReportError::WriteOutput {
        path: path.to_path_buf(),
        source: e,
    })
}
