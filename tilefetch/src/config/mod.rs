//! User configuration stored in `~/.tilefetch/config.ini`.
//!
//! Settings structs live in [`settings`], parsing in `parser`, serialization
//! in `writer`, and key-by-name access for the CLI in [`keys`].
//!
//! ```ini
//! [cache]
//! directory = ~/.cache/tilefetch/tiles
//! max_age_hours = 336
//! extension = tile
//!
//! [network]
//! connect_timeout_secs = 5
//! read_timeout_secs = 20
//! probe_address = 1.1.1.1:443
//!
//! [layer]
//! url = https://{a,b,c}.tile.openstreetmap.org/{z}/{x}/{y}.png
//! ```

mod file;
pub mod keys;
mod parser;
pub mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    default_cache_dir, CacheSettings, ConfigFile, LayerUrlSettings, NetworkSettings,
    DEFAULT_LAYER_URL, DEFAULT_MAX_AGE_HOURS,
};
