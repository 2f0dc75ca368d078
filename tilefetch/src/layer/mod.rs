//! Map layers that produce tiles.
//!
//! A layer is anything implementing [`TileSource`]. [`RemoteTmsLayer`] wraps
//! a [`TileFetcher`](crate::fetcher::TileFetcher) and downloads from a TMS
//! endpoint; [`LocalTmsLayer`] only reads an existing cache directory.
//! Worker pools size themselves from [`TileSource::max_thread_count`].

mod local;
mod remote;
mod settings;

pub use local::LocalTmsLayer;
pub use remote::RemoteTmsLayer;
pub use settings::{LayerConfigError, LayerSettings};

use crate::coord::{MercatorEnvelope, TileCoord};
use crate::fetcher::TileOutcome;

/// A layer that resolves tile coordinates to images.
pub trait TileSource: Send + Sync {
    type Image: Send;

    fn resolve_tile(&self, coord: &TileCoord) -> TileOutcome<Self::Image>;

    /// Upper bound on useful concurrent `resolve_tile` calls.
    fn max_thread_count(&self) -> usize;

    /// Area covered by the layer, in Web Mercator meters.
    fn extents(&self) -> MercatorEnvelope {
        MercatorEnvelope::world()
    }
}
