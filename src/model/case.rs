use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Normalized test case — one executed request/assertion-set instance
// ============================================================================

/// Final classification of a normalized test case. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
    Skipped,
    NotRun,
}

impl Outcome {
    /// Whether this outcome participates in pass/fail statistics.
    /// Skipped and not-run cases are excluded from every aggregate.
    pub fn counted(self) -> bool {
        matches!(self, Outcome::Pass | Outcome::Fail)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "Pass",
            Outcome::Fail => "Fail",
            Outcome::Skipped => "Skipped",
            Outcome::NotRun => "Not Run",
        }
    }
}

/// One assertion outcome captured from the run result. Never mutated after
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionRecord {
    pub name: String,

    pub passed: bool,

    /// Failure message recorded by the runner; empty for passing assertions.
    #[serde(default)]
    pub message: String,
}

/// Captured request or response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BodyContent {
    /// Body was syntactically valid JSON
    Json(Value),

    /// Body kept as raw text
    Text(String),

    /// No body present
    Empty,
}

impl BodyContent {
    pub fn is_empty(&self) -> bool {
        matches!(self, BodyContent::Empty)
    }
}

/// One header as it appeared on the wire. Order and case preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

/// Opaque snapshot of a request or response, captured once during
/// normalization for later display and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub headers: Vec<HeaderEntry>,

    pub body: BodyContent,
}

/// One executed request/assertion-set instance, owned by a single suite
/// render. Immutable after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Folder/category the case belongs to (first path segment of the
    /// originating item's display name)
    pub group_key: String,

    /// Logical API/request identity (the item's display name)
    pub api_name: String,

    /// 1-based run iteration this case belongs to
    pub iteration: u32,

    pub outcome: Outcome,

    pub assertions: Vec<AssertionRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<PayloadSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<PayloadSnapshot>,
}

impl TestCase {
    /// Compact identifier used for anchors and payload lookup in rendered
    /// output: first 12 hex chars of the SHA-1 over group/api/iteration.
    pub fn case_id(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        hasher.update(self.group_key.as_bytes());
        hasher.update(b"/");
        hasher.update(self.api_name.as_bytes());
        hasher.update(b"/");
        hasher.update(self.iteration.to_string().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..12].to_string()
    }

    pub fn counted(&self) -> bool {
        self.outcome.counted()
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }

    /// Number of assertion checks recorded for this case.
    pub fn checks_total(&self) -> usize {
        self.assertions.len()
    }
}
