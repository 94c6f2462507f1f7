use std::path::Path;

use serde_json::Value;

use crate::error::ReportError;

// ============================================================================
// Raw run-result document — schema owned by the upstream test runner
// ============================================================================

/// Display name used when the collection descriptor is absent.
pub const DEFAULT_COLLECTION_NAME: &str = "API Collection";

/// One parsed run-result document. The JSON is kept as-is and navigated
/// lazily, so schema drift upstream degrades to defaults instead of failing
/// a whole run. Only the initial parse is strict.
#[derive(Debug, Clone)]
pub struct RawRunReport {
    doc: Value,
}

impl RawRunReport {
    /// Strict parse of run-result text. Malformed JSON is fatal to the
    /// suite-report invocation; no output is written after this fails.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ReportError> {
        let doc = serde_json::from_str(text).map_err(|e| ReportError::InputParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { doc })
    }

    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path).map_err(|e| ReportError::InputRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&text, path)
    }

    /// Collection display name from the collection descriptor.
    pub fn collection_name(&self) -> String {
        self.doc
            .pointer("/collection/info/name")
            .or_else(|| self.doc.pointer("/collection/name"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_COLLECTION_NAME)
            .to_string()
    }

    /// Run start timestamp in epoch milliseconds, when the runner recorded
    /// one.
    pub fn started_at(&self) -> Option<i64> {
        self.doc
            .pointer("/run/timings/started")
            .or_else(|| self.doc.pointer("/timings/started"))
            .or_else(|| self.doc.get("started"))
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
    }

    /// Execution entries. Accepts both the nested `run.executions` envelope
    /// and a flat top-level `executions` array; anything else is an empty
    /// run, not an error.
    pub fn executions(&self) -> &[Value] {
        self.doc
            .pointer("/run/executions")
            .or_else(|| self.doc.get("executions"))
            .and_then(Value::as_array)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
