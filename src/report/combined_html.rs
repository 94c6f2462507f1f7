use crate::combine::rollup::{CombinedReport, GroupingSection, ModuleSection, Rollup};
use crate::report::escape::escape_html;

// ============================================================================
// Combined dashboard — every suite on one page
// ============================================================================

/// Render the cross-suite dashboard document.
///
/// Layout is global rollup tiles, then one collapsible section per business
/// grouping with its own tiles, then one collapsible block per module with
/// the API row table. Rows touched by a soft failure are tinted.
pub fn render_combined_html(report: &CombinedReport) -> String {
    let header_color = if report.rollup.failed_apis == 0 && report.rollup.failed_cases == 0 {
        "#4CAF50"
    } else {
        "#f44336"
    };

    let mut sections = String::new();
    for grouping in &report.groupings {
        sections.push_str(&grouping_section(grouping));
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Digital API Automation Report</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 2px 0; font-size: 14px; opacity: 0.9; }}
.content {{ max-width: 1100px; margin: 20px auto; padding: 0 20px; }}
.tiles {{ display: flex; flex-wrap: wrap; gap: 10px; margin-bottom: 16px; }}
.tile {{ background: white; border-radius: 6px; padding: 10px 16px; min-width: 100px; text-align: center; }}
.tile .num {{ display: block; font-size: 22px; font-weight: bold; }}
.tile .lbl {{ display: block; font-size: 12px; color: #666; }}
details.grouping {{ background: white; border-radius: 6px; padding: 12px 18px; margin-bottom: 14px; border-left: 4px solid #1976d2; }}
details.grouping > summary {{ font-weight: bold; font-size: 17px; cursor: pointer; }}
details.module {{ margin: 10px 0 10px 14px; padding: 6px 10px; border-left: 3px solid #ddd; }}
details.module > summary {{ font-size: 14px; font-weight: bold; cursor: pointer; }}
table.apis {{ border-collapse: collapse; width: 100%; margin: 8px 0; }}
table.apis th, table.apis td {{ border: 1px solid #ddd; padding: 5px 9px; font-size: 13px; text-align: left; }}
table.apis th {{ background: #eee; }}
tr.soft td {{ background: #fff8e1; }}
td.fail {{ color: #c62828; font-weight: bold; }}
</style>
</head>
<body>
<div class="header">
<h1>Digital API Automation Report</h1>
<p>Generated on {generated}</p>
</div>
<div class="content">
{overall_tiles}
{sections}
</div>
</body>
</html>"##,
        header_color = header_color,
        generated = escape_html(&report.generated_on),
        overall_tiles = rollup_tiles(&report.rollup),
        sections = sections,
    )
}

// ============================================================================
// Rollup tiles — API-level and case-level figures kept side by side
// ============================================================================

fn rollup_tiles(rollup: &Rollup) -> String {
    let tiles = [
        (rollup.unique_apis.to_string(), "Total APIs"),
        (rollup.passed_apis.to_string(), "Passed APIs"),
        (rollup.failed_apis.to_string(), "Failed APIs"),
        (format!("{}%", rollup.api_pass_pct), "API Pass %"),
        (rollup.total_cases.to_string(), "Total Cases"),
        (rollup.passed_cases.to_string(), "Passed Cases"),
        (rollup.failed_cases.to_string(), "Failed Cases"),
        (format!("{}%", rollup.case_pass_pct), "Case Pass %"),
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
// Grouping and module sections
// ============================================================================

fn grouping_section(grouping: &GroupingSection) -> String {
    let mut html = format!(
        "<details class=\"grouping\" open>\n<summary>{} — {}/{} APIs passed, {}/{} cases passed</summary>\n{}",
        escape_html(&grouping.grouping),
        grouping.rollup.passed_apis,
        grouping.rollup.unique_apis,
        grouping.rollup.passed_cases,
        grouping.rollup.total_cases,
        rollup_tiles(&grouping.rollup),
    );

    for module in &grouping.modules {
        html.push_str(&module_section(module));
    }

    html.push_str("</details>\n");
    html
}

fn module_section(module: &ModuleSection) -> String {
    let mut html = format!(
        "<details class=\"module\" open>\n<summary>{}</summary>\n<table class=\"apis\">\n<thead><tr><th>API</th><th>Passed</th><th>Failed</th><th>Total</th><th>Pass Rate (%)</th><th>Avg Response (ms)</th></tr></thead>\n<tbody>\n",
        escape_html(&module.module),
    );

    for row in &module.rows {
        let row_class = if row.soft_failure {
            " class=\"soft\""
        } else {
            ""
        };
        let fail_class = if row.fail > 0 { " class=\"fail\"" } else { "" };
        html.push_str(&format!(
            "<tr{}><td>{}</td><td>{}</td><td{}>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            escape_html(&row.api),
            row.pass,
            fail_class,
            row.fail,
            row.total,
            row.pass_rate_pct,
            row.avg_response_ms,
        ));
    }

    html.push_str("</tbody>\n</table>\n</details>\n");
    html
}
