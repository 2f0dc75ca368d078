//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use tilefetch::config::ConfigFileError;
use tilefetch::coord::{CoordError, TileCoord};
use tilefetch::layer::LayerConfigError;
use tilefetch::ngw::SchemaError;
use tilefetch::pool::PoolError;
use tilefetch::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid command-line input or configuration value
    Config(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Layer document could not be read
    Layer(LayerConfigError),
    /// Latitude/longitude outside the Web Mercator range
    Coord(CoordError),
    /// HTTP client could not be created
    Client(ProviderError),
    /// Worker pool could not be created
    Pool(PoolError),
    /// Resource schema query failed
    Schema(SchemaError),
    /// Failed to read cache statistics
    CacheStats(String),
    /// Failed to clear the cache
    CacheClear(String),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
    /// Neither the server nor the cache had the tile
    TileUnavailable(TileCoord),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::TileUnavailable(_) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network: check 'tilefetch config get network.probe_address'");
                eprintln!("  2. Wrong URL template: check it with 'tilefetch template'");
                eprintln!("  3. Tile outside the server's coverage or zoom range");
            }
            CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!("Fix the value with 'tilefetch config set <key> <value>' or edit:");
                eprintln!("  {}", tilefetch::config::config_file_path().display());
            }
            CliError::Schema(SchemaError::NoSessionCookie { .. }) => {
                eprintln!();
                eprintln!("The server did not start a session. Check --login and --password.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Layer(e) => write!(f, "Failed to load layer: {}", e),
            CliError::Coord(e) => write!(f, "Invalid coordinates: {}", e),
            CliError::Client(e) => write!(f, "{}", e),
            CliError::Pool(e) => write!(f, "{}", e),
            CliError::Schema(e) => write!(f, "Resource schema query failed: {}", e),
            CliError::CacheStats(msg) => write!(f, "Failed to read cache: {}", msg),
            CliError::CacheClear(msg) => write!(f, "Failed to clear cache: {}", msg),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::TileUnavailable(tile) => write!(f, "Tile {} is not available", tile),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Layer(e) => Some(e),
            CliError::Coord(e) => Some(e),
            CliError::Client(e) => Some(e),
            CliError::Pool(e) => Some(e),
            CliError::Schema(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LayerConfigError> for CliError {
    fn from(e: LayerConfigError) -> Self {
        CliError::Layer(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coord(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Client(e)
    }
}

impl From<PoolError> for CliError {
    fn from(e: PoolError) -> Self {
        CliError::Pool(e)
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        CliError::Schema(e)
    }
}
