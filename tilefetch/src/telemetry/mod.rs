//! Fetch telemetry for observability and user feedback.
//!
//! Every tile request ends in exactly one of three outcomes (fresh, stale,
//! absent); the fetcher counts them together with the download and cache
//! events that led there. Counters are lock-free atomics and one
//! [`FetchMetrics`] is shared by all pool workers.
//!
//! ```text
//! TileFetcher ─────► FetchMetrics ─────► TelemetrySnapshot ─────► CLI
//!                    (atomic counters)   (point-in-time copy)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tilefetch::telemetry::FetchMetrics;
//!
//! let metrics = FetchMetrics::new();
//! metrics.download_completed(18_000);
//! metrics.fresh_served();
//!
//! println!("{}", metrics.snapshot());
//! ```

mod metrics;
mod snapshot;

pub use metrics::FetchMetrics;
pub use snapshot::TelemetrySnapshot;
