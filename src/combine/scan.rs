use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::model::manifest::SuiteManifest;
use crate::paths::LATEST_MANIFEST_SUFFIX;

// ============================================================================
// Manifest discovery — walk the Temp tree for suite sidecars
// ============================================================================

/// A manifest found on disk, paired with where it came from.
#[derive(Debug)]
pub struct DiscoveredManifest {
    pub path: PathBuf,
    pub manifest: SuiteManifest,
}

/// Walk `temp_dir` and load every suite manifest sidecar.
///
/// Traversal order is sorted by file name at each level, so the combined
/// report is deterministic regardless of filesystem enumeration order.
/// A missing Temp directory yields an empty set. Files that fail to load
/// are reported and skipped; one corrupt sidecar never sinks the combine.
pub fn discover_manifests(temp_dir: &Path, verbose: u8) -> Vec<DiscoveredManifest> {
    if !temp_dir.is_dir() {
        if verbose > 0 {
            eprintln!("No staging directory at {}", temp_dir.display());
        }
        return Vec::new();
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(temp_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let is_manifest = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(LATEST_MANIFEST_SUFFIX));
        if !is_manifest {
            continue;
        }

        match SuiteManifest::load(entry.path()) {
            Ok(manifest) => {
                if verbose > 0 {
                    eprintln!("Found suite manifest: {}", entry.path().display());
                }
                found.push(DiscoveredManifest {
                    path: entry.path().to_path_buf(),
                    manifest,
                });
            }
            Err(e) => {
                eprintln!("Skipping {}: {}", entry.path().display(), e);
            }
        }
    }
    found
}
