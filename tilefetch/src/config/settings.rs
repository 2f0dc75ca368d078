//! Settings structs and their defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{TileCache, DEFAULT_MAX_AGE, DEFAULT_TILE_EXTENSION};
use crate::network::{TcpProbe, DEFAULT_PROBE_ADDRESS, DEFAULT_PROBE_TIMEOUT};
use crate::provider::{
    HttpClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT, USER_AGENT,
};

/// Tile URL used when the config file names none.
pub const DEFAULT_LAYER_URL: &str = "https://{a,b,c}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Default cache age in hours (14 days).
pub const DEFAULT_MAX_AGE_HOURS: u64 = DEFAULT_MAX_AGE.as_secs() / 3600;

/// Contents of `config.ini`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub cache: CacheSettings,
    pub network: NetworkSettings,
    pub layer: LayerUrlSettings,
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub directory: PathBuf,
    pub max_age_hours: u64,
    pub extension: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            directory: default_cache_dir(),
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            extension: DEFAULT_TILE_EXTENSION.to_string(),
        }
    }
}

/// `[network]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    /// `host:port` opened to decide whether the network is up
    pub probe_address: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            read_timeout_secs: DEFAULT_READ_TIMEOUT.as_secs(),
            probe_address: DEFAULT_PROBE_ADDRESS.to_string(),
        }
    }
}

/// `[layer]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerUrlSettings {
    pub url: String,
}

impl Default for LayerUrlSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_LAYER_URL.to_string(),
        }
    }
}

impl ConfigFile {
    /// Disk cache described by the `[cache]` section.
    pub fn tile_cache(&self) -> TileCache {
        TileCache::new(&self.cache.directory)
            .with_extension(self.cache.extension.as_str())
            .with_max_age(Duration::from_secs(self.cache.max_age_hours.saturating_mul(3600)))
    }

    /// HTTP settings described by the `[network]` section.
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            connect_timeout: Duration::from_secs(self.network.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.network.read_timeout_secs),
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn tcp_probe(&self) -> TcpProbe {
        TcpProbe::new(self.network.probe_address.as_str(), DEFAULT_PROBE_TIMEOUT)
    }
}

/// Platform cache directory, e.g. `~/.cache/tilefetch/tiles` on Linux.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tilefetch")
        .join("tiles")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.cache.max_age_hours, 14 * 24);
        assert_eq!(config.cache.extension, "tile");
        assert!(config.cache.directory.ends_with("tilefetch/tiles"));
        assert_eq!(config.network.connect_timeout_secs, 5);
        assert_eq!(config.layer.url, DEFAULT_LAYER_URL);
    }

    #[test]
    fn test_tile_cache_with_huge_max_age_saturates() {
        let mut config = ConfigFile::default();
        config.cache.max_age_hours = u64::MAX;
        assert_eq!(config.tile_cache().max_age(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_tile_cache_from_settings() {
        let mut config = ConfigFile::default();
        config.cache.directory = PathBuf::from("/data/tiles");
        config.cache.max_age_hours = 2;
        config.cache.extension = "png".to_string();

        let cache = config.tile_cache();
        assert_eq!(cache.root(), PathBuf::from("/data/tiles"));
        assert_eq!(cache.max_age(), Duration::from_secs(7200));
        assert_eq!(cache.extension(), "png");
    }

    #[test]
    fn test_http_config_from_settings() {
        let mut config = ConfigFile::default();
        config.network.read_timeout_secs = 7;

        let http = config.http_config();
        assert_eq!(http.read_timeout, Duration::from_secs(7));
        assert_eq!(http.user_agent, USER_AGENT);
    }
}
