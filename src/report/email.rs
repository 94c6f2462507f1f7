use crate::combine::rollup::{CombinedReport, GroupingSection, Rollup};
use crate::report::escape::escape_html;

// ============================================================================
// Email body — mail-client-safe rendition of the combined report
// ============================================================================

const CELL_STYLE: &str = "border:1px solid #ddd;padding:5px 9px;font-size:13px;";
const HEAD_STYLE: &str =
    "border:1px solid #ddd;padding:5px 9px;font-size:13px;background:#eeeeee;text-align:left;";
const SOFT_CELL_STYLE: &str =
    "border:1px solid #ddd;padding:5px 9px;font-size:13px;background:#fff8e1;";

/// Render the combined report as an HTML fragment suitable for pasting into
/// an email body. Mail clients strip scripts and external styles, so every
/// style is inline and nothing is interactive.
pub fn render_email_body(report: &CombinedReport) -> String {
    let banner_color = if report.rollup.failed_apis == 0 && report.rollup.failed_cases == 0 {
        "#4CAF50"
    } else {
        "#f44336"
    };

    let mut html = format!(
        "<div style=\"font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;\">\n<div style=\"background:{};color:white;padding:14px 20px;\">\n<h2 style=\"margin:0 0 4px 0;font-size:20px;\">Digital API Automation Report</h2>\n<p style=\"margin:0;font-size:13px;\">Generated on {}</p>\n</div>\n",
        banner_color,
        escape_html(&report.generated_on),
    );

    html.push_str("<h3 style=\"font-size:15px;margin:14px 0 6px 0;\">Overall</h3>\n");
    html.push_str(&rollup_table(&report.rollup));

    for grouping in &report.groupings {
        html.push_str(&grouping_block(grouping));
    }

    html.push_str("</div>\n");
    html
}

// ============================================================================
// Building blocks
// ============================================================================

fn rollup_table(rollup: &Rollup) -> String {
    format!(
        "<table style=\"border-collapse:collapse;\">\n<tr>{h}</tr>\n<tr>{d}</tr>\n</table>\n",
        h = [
            "Total APIs",
            "Passed APIs",
            "Failed APIs",
            "API Pass %",
            "Total Cases",
            "Passed Cases",
            "Failed Cases",
            "Case Pass %",
        ]
        .iter()
        .map(|label| format!("<th style=\"{}\">{}</th>", HEAD_STYLE, label))
        .collect::<String>(),
        d = [
            rollup.unique_apis.to_string(),
            rollup.passed_apis.to_string(),
            rollup.failed_apis.to_string(),
            format!("{}%", rollup.api_pass_pct),
            rollup.total_cases.to_string(),
            rollup.passed_cases.to_string(),
            rollup.failed_cases.to_string(),
            format!("{}%", rollup.case_pass_pct),
        ]
        .iter()
        .map(|value| format!("<td style=\"{}\">{}</td>", CELL_STYLE, value))
        .collect::<String>(),
    )
}

fn grouping_block(grouping: &GroupingSection) -> String {
    let mut html = format!(
        "<h3 style=\"font-size:15px;margin:16px 0 6px 0;\">{} — {}/{} APIs passed</h3>\n{}",
        escape_html(&grouping.grouping),
        grouping.rollup.passed_apis,
        grouping.rollup.unique_apis,
        rollup_table(&grouping.rollup),
    );

    for module in &grouping.modules {
        html.push_str(&format!(
            "<h4 style=\"font-size:14px;margin:10px 0 4px 0;\">{}</h4>\n<table style=\"border-collapse:collapse;width:100%;\">\n<tr>{}</tr>\n",
            escape_html(&module.module),
            ["API", "Passed", "Failed", "Total", "Pass Rate (%)", "Avg Response (ms)"]
                .iter()
                .map(|label| format!("<th style=\"{}\">{}</th>", HEAD_STYLE, label))
                .collect::<String>(),
        ));

        for row in &module.rows {
            let cell_style = if row.soft_failure {
                SOFT_CELL_STYLE
            } else {
                CELL_STYLE
            };
            let fail_style = if row.fail > 0 {
                format!("{}color:#c62828;font-weight:bold;", cell_style)
            } else {
                cell_style.to_string()
            };
            html.push_str(&format!(
                "<tr><td style=\"{cs}\">{api}</td><td style=\"{cs}\">{pass}</td><td style=\"{fs}\">{fail}</td><td style=\"{cs}\">{total}</td><td style=\"{cs}\">{pct}</td><td style=\"{cs}\">{avg}</td></tr>\n",
                cs = cell_style,
                fs = fail_style,
                api = escape_html(&row.api),
                pass = row.pass,
                fail = row.fail,
                total = row.total,
                pct = row.pass_rate_pct,
                avg = row.avg_response_ms,
            ));
        }

        html.push_str("</table>\n");
    }

    html
}
