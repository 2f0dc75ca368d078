//! File-per-tile disk cache with age-based freshness.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::debug;

use crate::coord::TileCoord;

/// Extension used for cached tile files.
///
/// Tiles are stored without an image-specific extension; the decoder sniffs
/// the format from the content.
pub const DEFAULT_TILE_EXTENSION: &str = "tile";

/// Age after which a cached tile is considered stale (14 days).
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Errors from writing tiles to the disk cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Parent directory for a tile could not be created.
    #[error("failed to create cache directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// Tile bytes could not be written.
    #[error("failed to write cached tile {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Snapshot of one cached tile's metadata.
#[derive(Debug, Clone)]
pub struct CacheEntryInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
    pub fresh: bool,
}

/// Disk cache mapping tile coordinates to `<root>/{z}/{x}/{y}.<ext>`.
///
/// There is no index: every lookup stats the file. Stale files are never
/// removed, only overwritten by the next successful download.
#[derive(Debug, Clone)]
pub struct TileCache {
    root: PathBuf,
    extension: String,
    max_age: Duration,
}

impl TileCache {
    /// Creates a cache rooted at `root` with the default extension and age.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_TILE_EXTENSION.to_string(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Sets the file extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Sets the maximum age of a fresh tile.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Path of the cache file for `coord`.
    pub fn path(&self, coord: &TileCoord) -> PathBuf {
        self.root
            .join(coord.zoom.to_string())
            .join(coord.x.to_string())
            .join(format!("{}.{}", coord.y, self.extension))
    }

    /// Whether a cache file exists for `coord`, fresh or not.
    pub fn exists(&self, coord: &TileCoord) -> bool {
        self.path(coord).is_file()
    }

    /// Whether the cached tile exists and is younger than the maximum age.
    pub fn is_fresh(&self, coord: &TileCoord) -> bool {
        self.is_fresh_at(coord, SystemTime::now())
    }

    /// Freshness check against an explicit clock reading.
    ///
    /// A file modified at `T` is fresh for `now < T + max_age`. Files with a
    /// modification time in the future count as fresh.
    pub fn is_fresh_at(&self, coord: &TileCoord, now: SystemTime) -> bool {
        match self.modified(coord) {
            Some(modified) => match now.duration_since(modified) {
                Ok(age) => age < self.max_age,
                Err(_) => true,
            },
            None => false,
        }
    }

    /// Reads the cached bytes for `coord` regardless of age.
    pub fn read_stale(&self, coord: &TileCoord) -> Option<Vec<u8>> {
        let path = self.path(coord);
        match fs::read(&path) {
            Ok(data) => Some(data),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!(path = %path.display(), error = %e, "Failed to read cached tile");
                }
                None
            }
        }
    }

    /// Writes `data` for `coord`, replacing any existing file.
    ///
    /// Returns the path that was written.
    pub fn write(&self, coord: &TileCoord, data: &[u8]) -> Result<PathBuf, CacheError> {
        let path = self.path(coord);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, data).map_err(|source| CacheError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Metadata of the cached tile, if present.
    pub fn entry_info(&self, coord: &TileCoord) -> Option<CacheEntryInfo> {
        let path = self.path(coord);
        let metadata = fs::metadata(&path).ok().filter(|m| m.is_file())?;
        let modified = metadata.modified().ok()?;

        Some(CacheEntryInfo {
            size_bytes: metadata.len(),
            modified: DateTime::<Local>::from(modified),
            fresh: self.is_fresh(coord),
            path,
        })
    }

    fn modified(&self, coord: &TileCoord) -> Option<SystemTime> {
        fs::metadata(self.path(coord))
            .ok()
            .filter(|m| m.is_file())
            .and_then(|m| m.modified().ok())
    }
}
