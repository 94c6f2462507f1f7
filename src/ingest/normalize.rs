use serde_json::Value;

use crate::ingest::raw::RawRunReport;
use crate::markers::is_skip_text;
use crate::model::case::{
    AssertionRecord, BodyContent, HeaderEntry, Outcome, PayloadSnapshot, TestCase,
};

// ============================================================================
// Execution record normalizer — raw run result → ordered TestCase list
// ============================================================================

/// Folder used when an item's display name yields no path segment.
pub const DEFAULT_GROUP: &str = "Ungrouped";

/// API name used when an item carries no display name at all.
pub const DEFAULT_API_NAME: &str = "Request";

/// Turn one raw run result into the ordered list of normalized test cases.
/// Pure and infallible: malformed pieces degrade to documented defaults,
/// they never abort the run.
pub fn normalize_run(report: &RawRunReport) -> Vec<TestCase> {
    report.executions().iter().map(normalize_execution).collect()
}

/// Normalize a single execution entry.
pub fn normalize_execution(entry: &Value) -> TestCase {
    let display_name = entry
        .pointer("/item/name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let api_name = display_name.unwrap_or(DEFAULT_API_NAME).to_string();
    let group_key = display_name
        .and_then(|name| name.split('/').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_GROUP)
        .to_string();

    // Runner cursors are 0-based; reports show 1-based iterations.
    let iteration = entry
        .pointer("/cursor/iteration")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32
        + 1;

    let assertions = collect_assertions(entry.get("assertions"));

    let request = entry
        .get("request")
        .filter(|v| !v.is_null())
        .map(snapshot_request);
    let response_value = entry.get("response").filter(|v| !v.is_null());
    let response = response_value.map(snapshot_response);

    let status_code = response_value
        .and_then(|r| r.get("code"))
        .and_then(Value::as_u64)
        .map(|c| c as u16);
    let response_time_ms = response_value
        .and_then(|r| r.get("responseTime"))
        .and_then(Value::as_f64)
        .filter(|ms| *ms >= 0.0);

    let outcome = classify_outcome(response.is_some(), &assertions);

    TestCase {
        group_key,
        api_name,
        iteration,
        outcome,
        assertions,
        status_code,
        response_time_ms,
        request,
        response,
    }
}

/// Outcome precedence: not-run, then skipped, then failed, then passed.
/// An entry with a response but zero assertions is a Pass with zero checks.
pub fn classify_outcome(has_response: bool, assertions: &[AssertionRecord]) -> Outcome {
    if !has_response && assertions.is_empty() {
        return Outcome::NotRun;
    }
    if assertions
        .iter()
        .any(|a| is_skip_text(&a.name) || is_skip_text(&a.message))
    {
        return Outcome::Skipped;
    }
    if assertions.iter().any(|a| !a.passed) {
        return Outcome::Fail;
    }
    Outcome::Pass
}

// ============================================================================
// Assertion capture
// ============================================================================

fn collect_assertions(value: Option<&Value>) -> Vec<AssertionRecord> {
    let Some(list) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|raw| {
            if raw.is_null() {
                return None;
            }
            let name = raw
                .get("assertion")
                .or_else(|| raw.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("Assertion")
                .to_string();
            let error = raw.get("error").filter(|e| !e.is_null());
            let message = error
                .and_then(|e| e.get("message").and_then(Value::as_str).or_else(|| e.as_str()))
                .unwrap_or("")
                .to_string();
            Some(AssertionRecord {
                name,
                passed: error.is_none(),
                message,
            })
        })
        .collect()
}

// ============================================================================
// Request/response capture — must never fail a case
// ============================================================================

fn snapshot_request(request: &Value) -> PayloadSnapshot {
    PayloadSnapshot {
        method: request
            .get("method")
            .and_then(Value::as_str)
            .map(str::to_string),
        url: url_text(request),
        headers: extract_headers(request),
        body: request_body(request),
    }
}

fn snapshot_response(response: &Value) -> PayloadSnapshot {
    PayloadSnapshot {
        method: None,
        url: None,
        headers: extract_headers(response),
        body: response_body(response),
    }
}

/// Normalize header lists arriving as `header` or `headers`, with entries
/// keyed `key` or `name`. Disabled and malformed entries are dropped; order
/// and case of the survivors are preserved.
pub fn extract_headers(container: &Value) -> Vec<HeaderEntry> {
    let Some(list) = container
        .get("header")
        .or_else(|| container.get("headers"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|entry| {
            if entry
                .get("disabled")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                return None;
            }
            let name = entry
                .get("key")
                .or_else(|| entry.get("name"))
                .and_then(Value::as_str)?;
            let value = entry.get("value").map(value_text).unwrap_or_default();
            Some(HeaderEntry {
                name: name.to_string(),
                value,
            })
        })
        .collect()
}

/// Parse body text as JSON when syntactically valid, else keep raw text,
/// else empty.
pub fn capture_body_text(text: &str) -> BodyContent {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return BodyContent::Empty;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(parsed) => BodyContent::Json(parsed),
        Err(_) => BodyContent::Text(text.to_string()),
    }
}

fn request_body(request: &Value) -> BodyContent {
    match request.get("body") {
        None | Some(Value::Null) => BodyContent::Empty,
        Some(Value::String(text)) => capture_body_text(text),
        Some(body) => {
            if let Some(raw) = body.get("raw").and_then(Value::as_str) {
                capture_body_text(raw)
            } else {
                // Already-structured body (urlencoded, formdata, ...)
                BodyContent::Json(body.clone())
            }
        }
    }
}

fn response_body(response: &Value) -> BodyContent {
    // Byte-stream shape first: { "stream": { "data": [..] } } or a string.
    if let Some(stream) = response.get("stream") {
        if let Some(bytes) = stream.get("data").and_then(Value::as_array) {
            let buf: Vec<u8> = bytes
                .iter()
                .filter_map(Value::as_u64)
                .map(|b| b as u8)
                .collect();
            return capture_body_text(&String::from_utf8_lossy(&buf));
        }
        if let Some(text) = stream.as_str() {
            return capture_body_text(text);
        }
    }
    match response.get("body") {
        Some(Value::String(text)) => capture_body_text(text),
        Some(body) if !body.is_null() => BodyContent::Json(body.clone()),
        _ => BodyContent::Empty,
    }
}

/// URL in display form: the raw string when present, else rebuilt from
/// protocol/host/path parts.
fn url_text(request: &Value) -> Option<String> {
    match request.get("url") {
        Some(Value::String(url)) => Some(url.clone()),
        Some(url) => {
            if let Some(raw) = url.get("raw").and_then(Value::as_str) {
                return Some(raw.to_string());
            }
            let host = url.get("host").and_then(Value::as_array).map(|parts| {
                parts
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(".")
            });
            let path = url.get("path").and_then(Value::as_array).map(|parts| {
                parts
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("/")
            });
            match (host, path) {
                (Some(host), Some(path)) => {
                    let joined = match url.get("protocol").and_then(Value::as_str) {
                        Some(protocol) => format!("{}://{}/{}", protocol, host, path),
                        None => format!("{}/{}", host, path),
                    };
                    Some(joined)
                }
                (Some(host), None) => Some(host),
                _ => None,
            }
        }
        None => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
