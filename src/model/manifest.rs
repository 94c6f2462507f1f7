use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::summary::{ApiSummary, FolderSummary};
use crate::paths::IDENTITY_ANCHOR;

// ============================================================================
// Suite identity and sidecar manifest
// ============================================================================

/// Current manifest schema version.
pub const MANIFEST_SCHEMA: u32 = 1;

/// Which top-level grouping and sub-module a rendered suite belongs to.
/// This is the join key across suites; the combined stage merges on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteIdentity {
    pub grouping: String,
    pub module: String,
}

impl SuiteIdentity {
    pub fn new(grouping: &str, module: &str) -> Self {
        Self {
            grouping: grouping.to_string(),
            module: module.to_string(),
        }
    }

    /// Derive the identity from the primary output path: the two path
    /// segments following the `Reports` anchor directory.
    ///
    /// - `.../Reports/Billing/Invoices/run.html` → ("Billing", "Invoices")
    /// - `.../Reports/Billing/run.html` → ("Billing", "run")
    /// - no anchor → parent directory name + file stem
    /// - nothing usable → ("General", "Suite")
    pub fn from_output_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("Suite")
            .to_string();

        let dirs: Vec<&str> = path
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(os) => os.to_str(),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(anchor) = dirs.iter().position(|d| *d == IDENTITY_ANCHOR) {
            match &dirs[anchor + 1..] {
                [] => return Self::new("General", &stem),
                [grouping] => return Self::new(grouping, &stem),
                [grouping, module, ..] => return Self::new(grouping, module),
            }
        }

        match dirs.last() {
            Some(parent) => Self::new(parent, &stem),
            None => Self::new("General", &stem),
        }
    }
}

impl std::fmt::Display for SuiteIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.grouping, self.module)
    }
}

/// Structured sidecar written next to each rendered suite document. This is
/// the sole input of the combined-report stage; the HTML next to it is a
/// display artifact only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteManifest {
    pub schema: u32,

    pub title: String,
    pub grouping: String,
    pub module: String,

    /// Collection display name taken from the run result
    pub collection: String,

    /// RFC 3339 timestamp of the render
    pub generated_at: String,

    pub total_cases: u64,
    pub passed_cases: u64,
    pub failed_cases: u64,

    /// Deduplicated API display names observed in this suite. Defines the
    /// "unique APIs" universe during combination.
    pub api_registry: Vec<String>,

    /// One row per folder — the rows the combined tables merge on.
    pub folders: Vec<FolderSummary>,

    /// Per-API detail rows (folder-scoped), carried for drill-down consumers.
    pub apis: Vec<ApiSummary>,

    /// Folder and API names flagged by the soft-failure marker. Affects
    /// highlighting only, never counts.
    pub soft_failures: Vec<String>,
}

impl SuiteManifest {
    pub fn identity(&self) -> SuiteIdentity {
        SuiteIdentity::new(&self.grouping, &self.module)
    }

    /// Read a manifest back from disk.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path).map_err(|e| ReportError::ManifestRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| ReportError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the manifest as pretty JSON. The parent directory must exist.
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ReportError::JsonEncode {
            context: format!("manifest {}/{}", self.grouping, self.module),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ReportError::WriteOutput {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
