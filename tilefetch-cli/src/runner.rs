//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization and layer construction to reduce
//! duplication across command handlers.

use std::sync::Arc;

use tilefetch::config::{config_directory, ConfigFile};
use tilefetch::decode::ImageDecoder;
use tilefetch::fetcher::TileFetcher;
use tilefetch::layer::RemoteTmsLayer;
use tilefetch::logging::{init_logging, LoggingGuard, DEFAULT_LOG_FILE};
use tilefetch::network::{Connectivity, StaticConnectivity};
use tilefetch::provider::ReqwestClient;
use tracing::info;

use crate::commands::common::{load_config, GlobalArgs, LayerArgs};
use crate::error::CliError;

/// Layer type used by every network-facing command.
pub type CliLayer = RemoteTmsLayer<ReqwestClient, Arc<dyn Connectivity>, ImageDecoder>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Loads the config file and starts logging.
    pub fn new(global: &GlobalArgs) -> Result<Self, CliError> {
        let config = load_config(global)?;

        let level = if global.verbose { "debug" } else { "warn" };
        let logging_guard = init_logging(&config_directory(), DEFAULT_LOG_FILE, level)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information.
    pub fn log_startup(&self, command: &str) {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            command,
            cache = %self.config.cache.directory.display(),
            "tilefetch starting"
        );
    }

    /// Builds the remote layer from `--url`/`--layer` or the config file.
    ///
    /// With `offline` the layer never attempts a download.
    pub fn remote_layer(&self, layer: &LayerArgs, offline: bool) -> Result<CliLayer, CliError> {
        let url = layer.resolve_url(&self.config)?;
        let client = ReqwestClient::with_config(&self.config.http_config())?;
        let connectivity: Arc<dyn Connectivity> = if offline {
            Arc::new(StaticConnectivity::offline())
        } else {
            Arc::new(self.config.tcp_probe())
        };

        info!(url = %url, offline, "Layer configured");
        Ok(RemoteTmsLayer::new(TileFetcher::new(
            url,
            self.config.tile_cache(),
            client,
            connectivity,
            ImageDecoder,
        )))
    }
}
