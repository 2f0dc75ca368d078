//! Disk cache for downloaded tiles.
//!
//! Each tile is a single file under the cache root:
//!
//! ```text
//! <cache_root>/
//! └── {z}/
//!     └── {x}/
//!         └── {y}.tile
//! ```
//!
//! Freshness is judged from the file's modification time alone. Stale tiles
//! are still served when nothing better is available and are replaced by the
//! next successful download.

mod disk;
mod maintenance;

pub use disk::{CacheEntryInfo, CacheError, TileCache, DEFAULT_MAX_AGE, DEFAULT_TILE_EXTENSION};
pub use maintenance::{clear_disk_cache, disk_cache_stats, format_size, ClearResult};
