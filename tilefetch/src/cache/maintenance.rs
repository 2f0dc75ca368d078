//! Whole-cache maintenance used by the CLI `cache` commands.
//!
//! The fetch path never deletes tiles; these helpers are the only code that
//! removes files from a cache root.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

/// Outcome of clearing a cache directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearResult {
    pub files_deleted: u64,
    pub bytes_freed: u64,
}

/// Counts files and bytes under a cache root.
///
/// A missing directory is an empty cache.
pub fn disk_cache_stats(cache_dir: &Path) -> io::Result<(u64, u64)> {
    if !cache_dir.exists() {
        return Ok((0, 0));
    }

    let mut files = 0;
    let mut bytes = 0;
    visit_files(cache_dir, &mut |path: &Path| {
        if let Ok(metadata) = fs::metadata(path) {
            files += 1;
            bytes += metadata.len();
        }
    })?;
    Ok((files, bytes))
}

/// Deletes every file under a cache root and prunes emptied directories.
///
/// The root directory itself is kept.
pub fn clear_disk_cache(cache_dir: &Path) -> io::Result<ClearResult> {
    let mut result = ClearResult::default();
    if !cache_dir.exists() {
        return Ok(result);
    }

    visit_files(cache_dir, &mut |path: &Path| {
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        match fs::remove_file(path) {
            Ok(()) => {
                result.files_deleted += 1;
                result.bytes_freed += size;
            }
            Err(e) => debug!(path = %path.display(), error = %e, "Failed to delete cached tile"),
        }
    })?;
    cleanup_empty_dirs(cache_dir);

    info!(
        files_deleted = result.files_deleted,
        bytes_freed = result.bytes_freed,
        "Disk cache cleared"
    );
    Ok(result)
}

fn visit_files(dir: &Path, visit: &mut dyn FnMut(&Path)) -> io::Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_files(&path, visit)?;
        } else {
            visit(&path);
        }
    }
    Ok(())
}

/// Walks depth-first and removes directories left empty.
fn cleanup_empty_dirs(dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            cleanup_empty_dirs(&path);
            // Fails silently if not empty
            let _ = fs::remove_dir(&path);
        }
    }
}

/// Formats a byte count with a binary unit suffix.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
