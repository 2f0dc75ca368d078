//! Layer backed by a remote tile map service.

use crate::cache::TileCache;
use crate::coord::TileCoord;
use crate::decode::TileDecoder;
use crate::fetcher::{TileFetcher, TileOutcome};
use crate::network::Connectivity;
use crate::provider::HttpClient;

use super::{LayerConfigError, LayerSettings, TileSource};

/// Tiles downloaded from a templated URL and kept in a disk cache.
pub struct RemoteTmsLayer<C, N, D> {
    fetcher: TileFetcher<C, N, D>,
}

impl<C, N, D> RemoteTmsLayer<C, N, D>
where
    C: HttpClient,
    N: Connectivity,
    D: TileDecoder,
{
    pub fn new(fetcher: TileFetcher<C, N, D>) -> Self {
        Self { fetcher }
    }

    /// Builds a layer from its JSON document.
    pub fn from_json(
        json: &str,
        cache: TileCache,
        client: C,
        connectivity: N,
        decoder: D,
    ) -> Result<Self, LayerConfigError> {
        let settings = LayerSettings::from_json(json)?;
        Ok(Self::new(TileFetcher::new(
            settings.url,
            cache,
            client,
            connectivity,
            decoder,
        )))
    }

    /// Re-applies a JSON document to this layer; the URL is re-parsed.
    pub fn load_json(&self, json: &str) -> Result<(), LayerConfigError> {
        let settings = LayerSettings::from_json(json)?;
        self.set_url(settings.url);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, LayerConfigError> {
        self.settings().to_json()
    }

    pub fn settings(&self) -> LayerSettings {
        LayerSettings::new(self.url())
    }

    pub fn url(&self) -> String {
        self.fetcher.url()
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.fetcher.set_url(url);
    }

    pub fn fetcher(&self) -> &TileFetcher<C, N, D> {
        &self.fetcher
    }
}

impl<C, N, D> TileSource for RemoteTmsLayer<C, N, D>
where
    C: HttpClient,
    N: Connectivity,
    D: TileDecoder,
{
    type Image = D::Image;

    fn resolve_tile(&self, coord: &TileCoord) -> TileOutcome<D::Image> {
        self.fetcher.resolve(coord)
    }

    fn max_thread_count(&self) -> usize {
        self.fetcher.max_concurrent_fetches()
    }
}
