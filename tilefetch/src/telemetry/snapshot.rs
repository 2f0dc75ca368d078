//! Point-in-time telemetry snapshot.

use std::fmt;
use std::time::Duration;

use crate::cache::format_size;

/// An immutable copy of [`FetchMetrics`](super::FetchMetrics) counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetrySnapshot {
    /// Time since the metrics were created
    pub uptime: Duration,

    pub fresh: u64,
    pub stale: u64,
    pub absent: u64,

    pub downloads: u64,
    pub bytes_downloaded: u64,
    pub download_failures: u64,
    pub offline_skips: u64,

    pub cache_write_failures: u64,
    pub decode_failures: u64,
}

impl TelemetrySnapshot {
    /// Total tile requests answered.
    pub fn requests(&self) -> u64 {
        self.fresh + self.stale + self.absent
    }

    /// Fraction of requests that produced any tile (0.0 - 1.0).
    pub fn served_rate(&self) -> f64 {
        let total = self.requests();
        if total == 0 {
            0.0
        } else {
            (self.fresh + self.stale) as f64 / total as f64
        }
    }

    /// Download throughput over the snapshot's uptime.
    pub fn bytes_per_second(&self) -> f64 {
        self.bytes_downloaded as f64 / self.uptime.as_secs_f64().max(0.001)
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fetch Telemetry ({:.1}s)", self.uptime.as_secs_f64())?;
        writeln!(f, "─────────────────────────────────────────")?;
        writeln!(f, "Tiles:")?;
        writeln!(f, "  Fresh: {}", self.fresh)?;
        writeln!(f, "  Stale: {}", self.stale)?;
        writeln!(f, "  Absent: {}", self.absent)?;
        writeln!(f, "  Served: {:.1}%", self.served_rate() * 100.0)?;
        writeln!(f, "Network:")?;
        writeln!(
            f,
            "  Downloads: {} ({})",
            self.downloads,
            format_size(self.bytes_downloaded)
        )?;
        writeln!(f, "  Failures: {}", self.download_failures)?;
        writeln!(f, "  Skipped offline: {}", self.offline_skips)?;
        writeln!(f, "Disk:")?;
        writeln!(f, "  Write failures: {}", self.cache_write_failures)?;
        write!(f, "  Decode failures: {}", self.decode_failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_served_rate() {
        let snapshot = TelemetrySnapshot {
            fresh: 6,
            stale: 2,
            absent: 2,
            ..Default::default()
        };
        assert!((snapshot.served_rate() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_served_rate_without_requests() {
        assert_eq!(TelemetrySnapshot::default().served_rate(), 0.0);
    }

    #[test]
    fn test_display_lists_outcomes() {
        let snapshot = TelemetrySnapshot {
            fresh: 3,
            stale: 1,
            downloads: 3,
            bytes_downloaded: 2048,
            ..Default::default()
        };
        let text = snapshot.to_string();
        assert!(text.contains("Fresh: 3"));
        assert!(text.contains("Stale: 1"));
        assert!(text.contains("Downloads: 3 (2.0 KB)"));
    }
}
