//! Tile resolution: disk cache first, remote service second, stale copy last.
//!
//! [`TileFetcher::resolve`] runs one request through this chain and stops at
//! the first step that yields a tile:
//!
//! ```text
//! fresh cache file ──decode ok──────────────────────────────► Fresh
//!        │ missing, expired or undecodable
//!        ▼
//! network available? ──no──────────────► stale copy ─────────► Stale | Absent
//!        │ yes
//!        ▼
//! GET next-subdomain URL ──non-200 / empty / transport──► stale copy
//!        │ 200 + body
//!        ▼
//! write cache file ──write failed──────────────────────► stale copy
//!        │
//!        ▼
//! decode written file ──ok──► Fresh    ──failed──► Absent (file kept)
//! ```
//!
//! Failures never escape `resolve`; callers only see a [`TileOutcome`].

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::budget::ThreadBudget;
use crate::cache::{CacheError, TileCache};
use crate::coord::TileCoord;
use crate::decode::{DecodeError, ImageDecoder, TileDecoder};
use crate::network::{Connectivity, TcpProbe};
use crate::provider::{HttpClient, ProviderError, ReqwestClient};
use crate::telemetry::FetchMetrics;
use crate::template::UrlTemplate;

/// Result of resolving one tile.
#[derive(Debug, Clone, PartialEq)]
pub enum TileOutcome<I> {
    /// Decoded from a fresh cache file or a new download
    Fresh(I),
    /// Decoded from an expired cache file
    Stale(I),
    /// No tile could be produced
    Absent,
}

impl<I> TileOutcome<I> {
    pub fn is_fresh(&self) -> bool {
        matches!(self, TileOutcome::Fresh(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, TileOutcome::Stale(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TileOutcome::Absent)
    }

    pub fn image(&self) -> Option<&I> {
        match self {
            TileOutcome::Fresh(image) | TileOutcome::Stale(image) => Some(image),
            TileOutcome::Absent => None,
        }
    }

    pub fn into_image(self) -> Option<I> {
        match self {
            TileOutcome::Fresh(image) | TileOutcome::Stale(image) => Some(image),
            TileOutcome::Absent => None,
        }
    }

    pub fn map<J>(self, f: impl FnOnce(I) -> J) -> TileOutcome<J> {
        match self {
            TileOutcome::Fresh(image) => TileOutcome::Fresh(f(image)),
            TileOutcome::Stale(image) => TileOutcome::Stale(f(image)),
            TileOutcome::Absent => TileOutcome::Absent,
        }
    }

    /// Short lowercase label for logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            TileOutcome::Fresh(_) => "fresh",
            TileOutcome::Stale(_) => "stale",
            TileOutcome::Absent => "absent",
        }
    }
}

/// Why a remote attempt did not produce a tile.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("network unavailable")]
    Offline,

    #[error(transparent)]
    Download(#[from] ProviderError),

    #[error(transparent)]
    CacheWrite(#[from] CacheError),

    /// The download was stored but the written file does not decode
    #[error("downloaded tile at {} does not decode: {source}", .path.display())]
    Decode { path: PathBuf, source: DecodeError },
}

impl FetchFailure {
    /// Whether the failure should be answered with the stale cache copy.
    ///
    /// A stored download that does not decode has already replaced the
    /// stale copy, so there is nothing left to fall back to.
    pub fn allows_stale_fallback(&self) -> bool {
        !matches!(self, FetchFailure::Decode { .. })
    }
}

/// Resolves tiles for one layer.
///
/// All methods take `&self`; a fetcher is shared by reference across
/// worker threads. The URL template sits behind a lock only so that
/// [`set_url`](Self::set_url) can swap it; the subdomain cursor inside it
/// is atomic.
pub struct TileFetcher<C = ReqwestClient, N = TcpProbe, D = ImageDecoder> {
    template: RwLock<Arc<UrlTemplate>>,
    cache: TileCache,
    client: C,
    connectivity: N,
    decoder: D,
    metrics: Arc<FetchMetrics>,
}

impl<C, N, D> TileFetcher<C, N, D>
where
    C: HttpClient,
    N: Connectivity,
    D: TileDecoder,
{
    pub fn new(
        url: impl Into<String>,
        cache: TileCache,
        client: C,
        connectivity: N,
        decoder: D,
    ) -> Self {
        Self {
            template: RwLock::new(Arc::new(UrlTemplate::parse(url))),
            cache,
            client,
            connectivity,
            decoder,
            metrics: Arc::new(FetchMetrics::new()),
        }
    }

    /// The current raw URL template.
    pub fn url(&self) -> String {
        self.template.read().as_str().to_string()
    }

    /// Replaces the URL template, re-parsing subdomains and resetting the
    /// rotation cursor.
    ///
    /// Requests already past URL construction keep the old template.
    pub fn set_url(&self, url: impl Into<String>) {
        let template = UrlTemplate::parse(url);
        debug!(
            url = template.as_str(),
            subdomains = template.subdomain_count(),
            "Tile URL template updated"
        );
        *self.template.write() = Arc::new(template);
    }

    /// Snapshot of the current template.
    pub fn template(&self) -> Arc<UrlTemplate> {
        Arc::clone(&self.template.read())
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn connectivity(&self) -> &N {
        &self.connectivity
    }

    pub fn metrics(&self) -> &Arc<FetchMetrics> {
        &self.metrics
    }

    pub fn budget(&self) -> ThreadBudget {
        ThreadBudget::new(self.template.read().subdomain_count())
    }

    /// Worker count suited to the current template.
    pub fn max_concurrent_fetches(&self) -> usize {
        self.budget().max_concurrent_fetches()
    }

    /// Resolves `coord` to a fresh tile, a stale tile, or nothing.
    pub fn resolve(&self, coord: &TileCoord) -> TileOutcome<D::Image> {
        let outcome = self.resolve_inner(coord);
        match &outcome {
            TileOutcome::Fresh(_) => self.metrics.fresh_served(),
            TileOutcome::Stale(_) => self.metrics.stale_served(),
            TileOutcome::Absent => self.metrics.absent(),
        }
        debug!(
            zoom = coord.zoom,
            x = coord.x,
            y = coord.y,
            outcome = outcome.label(),
            "Tile resolved"
        );
        outcome
    }

    fn resolve_inner(&self, coord: &TileCoord) -> TileOutcome<D::Image> {
        if self.cache.is_fresh(coord) {
            match self.decoder.decode_file(&self.cache.path(coord)) {
                Ok(image) => return TileOutcome::Fresh(image),
                Err(e) => {
                    // Not fatal: try the network as if the tile were stale
                    self.metrics.decode_failed();
                    warn!(zoom = coord.zoom, x = coord.x, y = coord.y, error = %e, "Fresh cached tile failed to decode");
                }
            }
        }

        match self.fetch_remote(coord) {
            Ok(image) => TileOutcome::Fresh(image),
            Err(failure) if failure.allows_stale_fallback() => {
                debug!(zoom = coord.zoom, x = coord.x, y = coord.y, reason = %failure, "Falling back to cached tile");
                self.stale_fallback(coord)
            }
            Err(failure) => {
                warn!(zoom = coord.zoom, x = coord.x, y = coord.y, error = %failure, "Downloaded tile unusable");
                TileOutcome::Absent
            }
        }
    }

    /// Downloads `coord`, stores it in the cache and decodes the stored file.
    ///
    /// Advances the subdomain cursor whenever the network is available,
    /// whatever the outcome.
    pub fn fetch_remote(&self, coord: &TileCoord) -> Result<D::Image, FetchFailure> {
        if !self.connectivity.is_available() {
            self.metrics.offline_skipped();
            return Err(FetchFailure::Offline);
        }

        let url = self.template().url_for(coord);
        debug!(url = %url, "Downloading tile");

        let body = self.client.get(&url).map_err(|e| {
            self.metrics.download_failed();
            e
        })?;
        self.metrics.download_completed(body.len() as u64);

        let path = self.cache.write(coord, &body).map_err(|e| {
            self.metrics.cache_write_failed();
            warn!(url = %url, error = %e, "Failed to store downloaded tile");
            e
        })?;

        self.decoder.decode_file(&path).map_err(|source| {
            self.metrics.decode_failed();
            FetchFailure::Decode { path, source }
        })
    }

    /// Decodes whatever the cache holds for `coord`, regardless of age.
    fn stale_fallback(&self, coord: &TileCoord) -> TileOutcome<D::Image> {
        if !self.cache.exists(coord) {
            return TileOutcome::Absent;
        }

        match self.decoder.decode_file(&self.cache.path(coord)) {
            Ok(image) => TileOutcome::Stale(image),
            Err(e) => {
                self.metrics.decode_failed();
                debug!(zoom = coord.zoom, x = coord.x, y = coord.y, error = %e, "Cached tile failed to decode");
                TileOutcome::Absent
            }
        }
    }
}
