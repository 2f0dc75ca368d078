//! Layer served only from an existing cache directory.

use tracing::debug;

use crate::budget::HTTP_SEPARATE_THREADS;
use crate::cache::TileCache;
use crate::coord::TileCoord;
use crate::decode::TileDecoder;
use crate::fetcher::TileOutcome;

use super::TileSource;

/// Offline layer over a tile cache; never touches the network.
pub struct LocalTmsLayer<D> {
    cache: TileCache,
    decoder: D,
}

impl<D: TileDecoder> LocalTmsLayer<D> {
    pub fn new(cache: TileCache, decoder: D) -> Self {
        Self { cache, decoder }
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }
}

impl<D: TileDecoder> TileSource for LocalTmsLayer<D> {
    type Image = D::Image;

    fn resolve_tile(&self, coord: &TileCoord) -> TileOutcome<D::Image> {
        if !self.cache.exists(coord) {
            return TileOutcome::Absent;
        }

        let fresh = self.cache.is_fresh(coord);
        match self.decoder.decode_file(&self.cache.path(coord)) {
            Ok(image) if fresh => TileOutcome::Fresh(image),
            Ok(image) => TileOutcome::Stale(image),
            Err(e) => {
                debug!(zoom = coord.zoom, x = coord.x, y = coord.y, error = %e, "Cached tile failed to decode");
                TileOutcome::Absent
            }
        }
    }

    fn max_thread_count(&self) -> usize {
        HTTP_SEPARATE_THREADS
    }
}
