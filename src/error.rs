use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ReportError {
    /// Raw run-result file could not be read
    InputRead { path: PathBuf, source: std::io::Error },

    /// Raw run-result file is not valid JSON
    InputParse { path: PathBuf, source: serde_json::Error },

    /// Output directory could not be created
    CreateDir { path: PathBuf, source: std::io::Error },

    /// Rendered document or sidecar could not be written
    WriteOutput { path: PathBuf, source: std::io::Error },

    /// Suite manifest could not be read during the combine scan
    ManifestRead { path: PathBuf, source: std::io::Error },

    /// Suite manifest file is not a valid manifest document
    ManifestParse { path: PathBuf, source: serde_json::Error },

    /// In-memory value failed to serialize (manifest or payload embedding)
    JsonEncode { context: String, source: serde_json::Error },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::InputRead { path, source } => {
                write!(f, "Cannot read run result '{}': {}", path.display(), source)
            }
            ReportError::InputParse { path, source } => {
                write!(f, "Run result '{}' is not valid JSON: {}", path.display(), source)
            }
            ReportError::CreateDir { path, source } => {
                write!(f, "Cannot create directory '{}': {}", path.display(), source)
            }
            ReportError::WriteOutput { path, source } => {
                write!(f, "Cannot write '{}': {}", path.display(), source)
            }
            ReportError::ManifestRead { path, source } => {
                write!(f, "Cannot read suite manifest '{}': {}", path.display(), source)
            }
            ReportError::ManifestParse { path, source } => {
                write!(f, "Suite manifest '{}' is malformed: {}", path.display(), source)
            }
            ReportError::JsonEncode { context, source } => {
                write!(f, "JSON encode error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::InputRead { source, .. }
            | ReportError::CreateDir { source, .. }
            | ReportError::WriteOutput { source, .. }
            | ReportError::ManifestRead { source, .. } => Some(source),
            ReportError::InputParse { source, .. }
            | ReportError::ManifestParse { source, .. }
            | ReportError::JsonEncode { source, .. } => Some(source),
        }
    }
}
