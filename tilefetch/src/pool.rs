//! Parallel tile resolution bounded by a layer's thread budget.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use tracing::debug;

use crate::coord::TileCoord;
use crate::fetcher::TileOutcome;
use crate::layer::TileSource;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to build fetch pool: {0}")]
    Build(#[from] ThreadPoolBuildError),
}

/// A dedicated rayon pool sized to `source.max_thread_count()`.
///
/// The size is fixed when the pool is built; rebuild it after changing the
/// layer's URL if the subdomain count changed.
pub struct FetchPool<S> {
    source: S,
    pool: ThreadPool,
}

impl<S: TileSource> FetchPool<S> {
    pub fn for_source(source: S) -> Result<Self, PoolError> {
        let threads = source.max_thread_count().max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("tilefetch-{}", i))
            .build()?;
        debug!(threads, "Fetch pool started");
        Ok(Self { source, pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves every coordinate; outcomes come back in input order.
    pub fn resolve_all(&self, coords: &[TileCoord]) -> Vec<TileOutcome<S::Image>> {
        self.resolve_all_with(coords, |_, outcome| outcome)
    }

    /// Resolves every coordinate and maps each outcome on the worker thread,
    /// so large batches need not keep decoded images around.
    pub fn resolve_all_with<R, F>(&self, coords: &[TileCoord], map: F) -> Vec<R>
    where
        R: Send,
        F: Fn(&TileCoord, TileOutcome<S::Image>) -> R + Sync,
    {
        self.pool.install(|| {
            coords
                .par_iter()
                .map(|coord| map(coord, self.source.resolve_tile(coord)))
                .collect()
        })
    }
}
