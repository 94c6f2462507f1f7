use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::DateTime;

use crate::error::ReportError;
use crate::markers::has_soft_failure_marker;
use crate::model::case::{Outcome, PayloadSnapshot, TestCase};
use crate::model::summary::FolderSummary;
use crate::report::escape::{escape_html, escape_script_embed};
use crate::suite::builder::SuiteReport;

// ============================================================================
// Suite HTML reporter — one self-contained document per run result
// ============================================================================

/// Render a complete suite document.
///
/// Everything a viewer needs ships in the document itself:
/// - header tiles with suite-level statistics
/// - folder summary table (plain numeric cells, stable column order)
/// - folder → API → case drill-down as nested `<details>` blocks
/// - request/response snapshots base64-encoded in `data-payload` attributes,
///   decoded on demand by a small inline script (no network fetches)
/// - the suite manifest embedded as an `application/json` script block
pub fn render_suite_html(report: &SuiteReport) -> Result<String, ReportError> {
    let header_color = if report.stats.failed_cases == 0 {
        "#4CAF50"
    } else {
        "#f44336"
    };

    let manifest_json = serde_json::to_string(&report.manifest()).map_err(|e| {
        ReportError::JsonEncode {
            context: format!("embedded manifest {}", report.identity),
            source: e,
        }
    })?;

    let started_text = report
        .started_at
        .and_then(format_epoch_ms)
        .unwrap_or_else(|| "unknown".to_string());
    let generated_text = format_rfc3339(&report.generated_at);

    let mut sections = String::new();
    for folder in &report.folders {
        sections.push_str(&folder_section(report, folder));
    }

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} — {identity}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 2px 0; font-size: 14px; opacity: 0.9; }}
.content {{ max-width: 1000px; margin: 20px auto; padding: 0 20px; }}
.tiles {{ display: flex; flex-wrap: wrap; gap: 10px; margin-bottom: 20px; }}
.tile {{ background: white; border-radius: 6px; padding: 10px 16px; min-width: 90px; text-align: center; }}
.tile .num {{ display: block; font-size: 22px; font-weight: bold; }}
.tile .lbl {{ display: block; font-size: 12px; color: #666; }}
table.summary {{ background: white; border-collapse: collapse; width: 100%; margin-bottom: 20px; }}
table.summary th, table.summary td {{ border: 1px solid #ddd; padding: 6px 10px; font-size: 14px; text-align: left; }}
table.summary th {{ background: #eee; }}
details.folder {{ background: white; border-radius: 6px; padding: 10px 16px; margin-bottom: 10px; border-left: 4px solid #ccc; }}
details.folder > summary {{ font-weight: bold; font-size: 15px; cursor: pointer; }}
details.api {{ margin: 8px 0 8px 16px; padding: 6px 10px; border-left: 3px solid #ddd; }}
details.api > summary {{ font-size: 14px; cursor: pointer; }}
details.case {{ margin: 6px 0 6px 16px; padding: 4px 8px; font-size: 13px; }}
details.case > summary {{ cursor: pointer; }}
details.case.pass > summary {{ color: #2e7d32; }}
details.case.fail > summary {{ color: #c62828; }}
details.case.skipped > summary, details.case.not_run > summary {{ color: #777; }}
.soft {{ background: #fff8e1; }}
table.assertions {{ border-collapse: collapse; margin: 6px 0; }}
table.assertions td {{ border: 1px solid #eee; padding: 3px 8px; font-size: 12px; }}
tr.soft td {{ background: #fff8e1; }}
.payload button {{ margin: 4px 6px 4px 0; font-size: 12px; cursor: pointer; }}
pre.payload-view {{ background: #272822; color: #f8f8f2; padding: 8px; overflow-x: auto; font-size: 12px; }}
</style>
</head>
<body>
<div class="header">
<h1>{title}</h1>
<p>{collection} — {identity}</p>
<p>Run started {started} · Generated {generated} · SLA {sla} ms</p>
</div>
<div class="content">
{tiles}
<h2>Folder Summary</h2>
{summary_table}
<h2>Details</h2>
{sections}
</div>
<script type="application/json" id="suite-manifest">{manifest}</script>
<script>
function b64decode(b) {{ try {{ return decodeURIComponent(escape(atob(b))); }} catch (e) {{ return atob(b); }} }}
function togglePayload(btn) {{
  var pre = btn.parentNode.querySelector('pre.payload-view');
  if (!pre.textContent) {{
    var text = b64decode(btn.getAttribute('data-payload'));
    try {{ text = JSON.stringify(JSON.parse(text), null, 2); }} catch (e) {{}}
    pre.textContent = text;
  }}
  pre.hidden = !pre.hidden;
}}
</script>
</body>
</html>"##,
        title = escape_html(&report.title),
        identity = escape_html(&report.identity.to_string()),
        header_color = header_color,
        collection = escape_html(&report.collection),
        started = escape_html(&started_text),
        generated = escape_html(&generated_text),
        sla = report.sla_ms,
        tiles = tiles_html(report),
        summary_table = summary_table_html(&report.folders, report),
        sections = sections,
        manifest = escape_script_embed(&manifest_json),
    ))
}

// ============================================================================
// Header tiles
// ============================================================================

fn tiles_html(report: &SuiteReport) -> String {
    let stats = &report.stats;
    let tiles = [
        (stats.total_cases.to_string(), "Total Cases"),
        (stats.passed_cases.to_string(), "Passed"),
        (stats.failed_cases.to_string(), "Failed"),
        (stats.skipped_cases.to_string(), "Skipped"),
        (stats.not_run_cases.to_string(), "Not Run"),
        (format!("{}%", stats.pass_pct), "Pass Rate"),
        (format!("{}%", stats.within_sla_pct), "Within SLA"),
        (stats.avg_response_ms.to_string(), "Avg Response (ms)"),
    ];

    let mut html = String::from("<div class=\"tiles\">\n");
    for (num, label) in tiles {
        html.push_str(&format!(
            "<div class=\"tile\"><span class=\"num\">{}</span><span class=\"lbl\">{}</span></div>\n",
            num, label
        ));
    }
    html.push_str("</div>\n");
    html
}

// ============================================================================
// Folder summary table — the five numeric columns, plain cells
// ============================================================================

fn summary_table_html(folders: &[FolderSummary], report: &SuiteReport) -> String {
    let mut html = String::from(
        "<table class=\"summary\" id=\"folder-summary\">\n<thead><tr><th>Folder</th><th>Passed</th><th>Failed</th><th>Total</th><th>Pass Rate (%)</th><th>Avg Response (ms)</th></tr></thead>\n<tbody>\n",
    );
    for folder in folders {
        let row_class = if report.is_soft_flagged(&folder.name) {
            " class=\"soft\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            escape_html(&folder.name),
            folder.pass_count,
            folder.fail_count,
            folder.total,
            folder.pass_rate_pct,
            folder.avg_response_ms,
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

// ============================================================================
// Drill-down sections — folder → API → case
// ============================================================================

fn folder_section(report: &SuiteReport, folder: &FolderSummary) -> String {
    let soft_class = if report.is_soft_flagged(&folder.name) {
        " soft"
    } else {
        ""
    };

    let mut html = format!(
        "<details class=\"folder{}\">\n<summary>{} — {} passed, {} failed ({} total)</summary>\n",
        soft_class,
        escape_html(&folder.name),
        folder.pass_count,
        folder.fail_count,
        folder.total,
    );

    for api in report.apis_in_folder(&folder.name) {
        let api_soft = if report.is_soft_flagged(&api.api_name) {
            " soft"
        } else {
            ""
        };
        html.push_str(&format!(
            "<details class=\"api{}\">\n<summary>{} — {}/{} passed, avg {} ms</summary>\n",
            api_soft,
            escape_html(&api.api_name),
            api.pass_count,
            api.total,
            api.avg_response_ms,
        ));

        for case in report.cases_for(&folder.name, &api.api_name) {
            html.push_str(&case_section(case));
        }

        html.push_str("</details>\n");
    }

    html.push_str("</details>\n");
    html
}

fn case_section(case: &TestCase) -> String {
    let outcome_class = match case.outcome {
        Outcome::Pass => "pass",
        Outcome::Fail => "fail",
        Outcome::Skipped => "skipped",
        Outcome::NotRun => "not_run",
    };

    let status_text = case
        .status_code
        .map(|c| format!(" · HTTP {}", c))
        .unwrap_or_default();
    let time_text = case
        .response_time_ms
        .map(|ms| format!(" · {} ms", ms.round() as u64))
        .unwrap_or_default();

    let mut html = format!(
        "<details class=\"case {}\" id=\"case-{}\" data-case-id=\"{}\">\n<summary>Iteration {} — {}{}{} ({} checks)</summary>\n",
        outcome_class,
        case.case_id(),
        case.case_id(),
        case.iteration,
        case.outcome.label(),
        status_text,
        time_text,
        case.checks_total(),
    );

    if !case.assertions.is_empty() {
        html.push_str("<table class=\"assertions\">\n");
        for assertion in &case.assertions {
            let marker = if assertion.passed {
                "\u{2713}"
            } else {
                "\u{2717}"
            };
            let soft = has_soft_failure_marker(&assertion.name)
                || has_soft_failure_marker(&assertion.message);
            let row_class = if soft { " class=\"soft\"" } else { "" };
            html.push_str(&format!(
                "<tr{}><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                row_class,
                marker,
                escape_html(&assertion.name),
                escape_html(&assertion.message),
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("<div class=\"payload\">\n");
    if let Some(encoded) = case.request.as_ref().and_then(payload_b64) {
        html.push_str(&payload_button("Request", &encoded));
    }
    if let Some(encoded) = case.response.as_ref().and_then(payload_b64) {
        html.push_str(&payload_button("Response", &encoded));
    }
    html.push_str("</div>\n</details>\n");
    html
}

fn payload_button(label: &str, encoded: &str) -> String {
    format!(
        "<div><button type=\"button\" data-payload=\"{}\" onclick=\"togglePayload(this)\">{}</button>\n<pre class=\"payload-view\" hidden></pre></div>\n",
        encoded, label
    )
}

/// Reversible snapshot encoding: JSON then base64, so a viewer can rebuild
/// the exact capture without re-contacting the runner. An unencodable
/// snapshot drops its button instead of failing the render.
fn payload_b64(snapshot: &PayloadSnapshot) -> Option<String> {
    serde_json::to_string(snapshot)
        .ok()
        .map(|json| BASE64.encode(json))
}

// ============================================================================
// Timestamp display
// ============================================================================

fn format_epoch_ms(ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

fn format_rfc3339(text: &str) -> String {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| text.to_string())
}
