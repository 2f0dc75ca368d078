//! INI serialization for `config.ini`.

use super::settings::{ConfigFile, DEFAULT_MAX_AGE_HOURS};

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[cache]
; Root directory for cached tiles, laid out as <directory>/<z>/<x>/<y>.<extension>
directory = {}
; Hours before a cached tile is refreshed (default: {})
; Expired tiles are still served when the server cannot be reached
max_age_hours = {}
; File extension for cached tiles
extension = {}

[network]
; Seconds allowed to open a connection to the tile server
connect_timeout_secs = {}
; Seconds allowed for the whole response
read_timeout_secs = {}
; host:port opened to check whether the network is up
probe_address = {}

[layer]
; Tile URL template. {{z}}, {{x}} and {{y}} are replaced per tile; one
; {{a,b,c}} block lists subdomains used in turn
url = {}
"#,
        config.cache.directory.display(),
        DEFAULT_MAX_AGE_HOURS,
        config.cache.max_age_hours,
        config.cache.extension,
        config.network.connect_timeout_secs,
        config.network.read_timeout_secs,
        config.network.probe_address,
        config.layer.url,
    )
}
