//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use tilefetch::config::{config_file_path, ConfigFile};
use tilefetch::coord::{to_tile_coords, TileCoord, MAX_ZOOM};
use tilefetch::layer::LayerSettings;

use crate::error::CliError;

/// Options accepted by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Config file to use instead of ~/.tilefetch/config.ini
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

/// Loads the selected config file; a missing file yields defaults.
pub fn load_config(global: &GlobalArgs) -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from(&global.config_path())?)
}

/// Where the tile URL template comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct LayerArgs {
    /// Tile URL template, e.g. 'http://{a,b,c}.tile.example.com/{z}/{x}/{y}.png'
    #[arg(long)]
    pub url: Option<String>,

    /// JSON layer document with a "url" key
    #[arg(long, conflicts_with = "url")]
    pub layer: Option<PathBuf>,
}

impl LayerArgs {
    /// `--url`, then `--layer`, then `layer.url` from the config file.
    pub fn resolve_url(&self, config: &ConfigFile) -> Result<String, CliError> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        if let Some(path) = &self.layer {
            return Ok(LayerSettings::load(path)?.url);
        }
        Ok(config.layer.url.clone())
    }
}

/// A tile written as `z/x/y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec(pub TileCoord);

impl FromStr for TileSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let [z, x, y] = parts.as_slice() else {
            return Err(format!("expected z/x/y, got '{}'", s));
        };

        let zoom: u8 = z.parse().map_err(|_| format!("invalid zoom '{}'", z))?;
        if zoom > MAX_ZOOM {
            return Err(format!("zoom {} exceeds maximum {}", zoom, MAX_ZOOM));
        }
        let x: u32 = x.parse().map_err(|_| format!("invalid x '{}'", x))?;
        let y: u32 = y.parse().map_err(|_| format!("invalid y '{}'", y))?;

        let limit = 1u64 << zoom;
        if u64::from(x) >= limit || u64::from(y) >= limit {
            return Err(format!("x and y must be below {} at zoom {}", limit, zoom));
        }

        Ok(TileSpec(TileCoord::new(zoom, x, y)))
    }
}

/// Picks the tile from either `z/x/y` or `--lat/--lon/--zoom`.
pub fn resolve_tile(
    tile: Option<TileSpec>,
    lat: Option<f64>,
    lon: Option<f64>,
    zoom: Option<u8>,
) -> Result<TileCoord, CliError> {
    match (tile, lat, lon, zoom) {
        (Some(TileSpec(coord)), None, None, None) => Ok(coord),
        (None, Some(lat), Some(lon), Some(zoom)) => Ok(to_tile_coords(lat, lon, zoom)?),
        _ => Err(CliError::Config(
            "give either a tile as z/x/y or all of --lat, --lon and --zoom".to_string(),
        )),
    }
}
