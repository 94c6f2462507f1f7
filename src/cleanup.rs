use std::fs;

use crate::paths::ReportPaths;

// ============================================================================
// Staging cleanup — empty Temp without removing it
// ============================================================================

/// Remove every entry under the staging directory, keeping the directory
/// itself so the next suite run can write straight into it.
///
/// Removal is best effort: an entry that cannot be removed is reported and
/// skipped so the rest of the sweep still runs. Returns how many top-level
/// entries were removed.
pub fn clear_temp(paths: &ReportPaths, verbose: u8) -> usize {
    let temp = paths.temp_dir();
    if !temp.is_dir() {
        println!("Nothing to clean: {} does not exist", temp.display());
        return 0;
    }

    let entries = match fs::read_dir(&temp) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Cannot read {}: {}", temp.display(), e);
            return 0;
        }
    };

    let mut removed = 0usize;
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match result {
            Ok(()) => {
                removed += 1;
                if verbose > 0 {
                    eprintln!("Removed {}", path.display());
                }
            }
            Err(e) => eprintln!("Cannot remove {}: {}", path.display(), e),
        }
    }
    removed
}
