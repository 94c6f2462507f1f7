use std::path::{Path, PathBuf};

use crate::model::manifest::SuiteIdentity;

// ============================================================================
// Filesystem layout — resolved once per invocation, threaded into each stage
// ============================================================================

/// Environment variable overriding the working-directory root.
pub const ROOT_ENV_VAR: &str = "API_REPORT_ROOT";

/// Root used when neither the CLI flag nor the environment provides one.
pub const DEFAULT_ROOT: &str = "./Reports";

/// Directory name whose two following segments in a primary output path
/// identify the suite (grouping, module).
pub const IDENTITY_ANCHOR: &str = "Reports";

/// Sub-directory holding per-suite "last known good" renders and manifests.
pub const TEMP_DIR_NAME: &str = "Temp";

/// Sub-directory holding dated combined reports.
pub const EMAIL_DIR_NAME: &str = "EmailReports";

/// File name suffixes for the last-known-good pair written per suite.
pub const LATEST_HTML_SUFFIX: &str = "_latest.html";
pub const LATEST_MANIFEST_SUFFIX: &str = "_latest.json";

/// Combined-stage output file names.
pub const COMBINED_REPORT_FILE: &str = "Digital Api Automation Report.html";
pub const EMAIL_BODY_FILE: &str = "EmailBody.html";
pub const EMAIL_BODY_INLINE_FILE: &str = "EmailBody_Inline.html";

/// Resolved output layout for one process invocation.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    root: PathBuf,
}

impl ReportPaths {
    /// Resolve the root once: CLI flag, then `API_REPORT_ROOT`, then default.
    pub fn resolve(cli_root: Option<&str>) -> Self {
        Self::from_parts(cli_root, std::env::var(ROOT_ENV_VAR).ok())
    }

    /// Pure resolution step, separated so precedence is testable.
    pub fn from_parts(cli_root: Option<&str>, env_root: Option<String>) -> Self {
        let root = cli_root
            .map(PathBuf::from)
            .or_else(|| env_root.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
        Self { root }
    }

    /// Explicit root, used by tests and embedding callers.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join(TEMP_DIR_NAME)
    }

    pub fn email_dir(&self, date: &str) -> PathBuf {
        self.root.join(EMAIL_DIR_NAME).join(date)
    }

    /// Last-known-good rendered document for a suite identity.
    pub fn latest_html(&self, identity: &SuiteIdentity) -> PathBuf {
        self.temp_dir()
            .join(&identity.grouping)
            .join(format!("{}{}", identity.module, LATEST_HTML_SUFFIX))
    }

    /// Sidecar manifest next to the last-known-good document.
    pub fn latest_manifest(&self, identity: &SuiteIdentity) -> PathBuf {
        self.temp_dir()
            .join(&identity.grouping)
            .join(format!("{}{}", identity.module, LATEST_MANIFEST_SUFFIX))
    }
}
