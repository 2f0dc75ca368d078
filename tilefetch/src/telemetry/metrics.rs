//! Lock-free atomic metrics collection.

use super::TelemetrySnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Lock-free counters for tile fetches.
///
/// All operations use `Relaxed` ordering; the counters are independent
/// measurements and are only ever read through [`FetchMetrics::snapshot`].
#[derive(Debug)]
pub struct FetchMetrics {
    start_time: Instant,

    // === Outcomes ===
    /// Tiles served from a fresh cache file or a new download
    fresh: AtomicU64,
    /// Tiles served from an expired cache file
    stale: AtomicU64,
    /// Requests that produced no tile
    absent: AtomicU64,

    // === Network ===
    downloads: AtomicU64,
    bytes_downloaded: AtomicU64,
    download_failures: AtomicU64,
    /// Network checks that found no connectivity
    offline_skips: AtomicU64,

    // === Disk ===
    cache_write_failures: AtomicU64,
    decode_failures: AtomicU64,
}

impl FetchMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            fresh: AtomicU64::new(0),
            stale: AtomicU64::new(0),
            absent: AtomicU64::new(0),
            downloads: AtomicU64::new(0),
            bytes_downloaded: AtomicU64::new(0),
            download_failures: AtomicU64::new(0),
            offline_skips: AtomicU64::new(0),
            cache_write_failures: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
        }
    }

    // === Outcome tracking ===

    /// Record a request answered with a fresh tile.
    pub fn fresh_served(&self) {
        self.fresh.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request answered with an expired cached tile.
    pub fn stale_served(&self) {
        self.stale.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that produced nothing.
    pub fn absent(&self) {
        self.absent.fetch_add(1, Ordering::Relaxed);
    }

    // === Network tracking ===

    /// Record a successful download of `bytes` bytes.
    pub fn download_completed(&self, bytes: u64) {
        self.downloads.fetch_add(1, Ordering::Relaxed);
        self.bytes_downloaded.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a failed download (transport error, non-200, empty body).
    pub fn download_failed(&self) {
        self.download_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a download skipped because the network was unavailable.
    pub fn offline_skipped(&self) {
        self.offline_skips.fetch_add(1, Ordering::Relaxed);
    }

    // === Disk tracking ===

    pub fn cache_write_failed(&self) {
        self.cache_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failed(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all metrics.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            uptime: self.start_time.elapsed(),
            fresh: self.fresh.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            absent: self.absent.load(Ordering::Relaxed),
            downloads: self.downloads.load(Ordering::Relaxed),
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            download_failures: self.download_failures.load(Ordering::Relaxed),
            offline_skips: self.offline_skips.load(Ordering::Relaxed),
            cache_write_failures: self.cache_write_failures.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for FetchMetrics {
    fn default() -> Self {
        Self::new()
    }
}
