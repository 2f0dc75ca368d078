//! INI parsing: the single place where INI key names map to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Every `(section, key)` pair the config file understands.
pub(super) const KNOWN_KEYS: &[(&str, &str)] = &[
    ("cache", "directory"),
    ("cache", "max_age_hours"),
    ("cache", "extension"),
    ("network", "connect_timeout_secs"),
    ("network", "read_timeout_secs"),
    ("network", "probe_address"),
    ("layer", "url"),
];

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the
/// INI. Unknown keys are ignored.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    for (section, key) in KNOWN_KEYS {
        if let Some(value) = ini.section(Some(*section)).and_then(|s| s.get(*key)) {
            apply_value(&mut config, section, key, value)?;
        }
    }

    Ok(config)
}

/// Validates `value` and stores it in the field for `section.key`.
pub(super) fn apply_value(
    config: &mut ConfigFile,
    section: &str,
    key: &str,
    value: &str,
) -> Result<(), ConfigFileError> {
    let value = value.trim();
    let invalid = |reason: &str| ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match (section, key) {
        ("cache", "directory") => {
            if value.is_empty() {
                return Err(invalid("must not be empty"));
            }
            config.cache.directory = expand_tilde(value);
        }
        ("cache", "max_age_hours") => {
            config.cache.max_age_hours = parse_positive(value)
                .filter(|hours| hours.checked_mul(3600).is_some())
                .ok_or_else(|| invalid("must be a positive integer (hours)"))?;
        }
        ("cache", "extension") => {
            let extension = value.trim_start_matches('.');
            if extension.is_empty() || extension.contains(['/', '\\']) {
                return Err(invalid("must be a file extension like 'tile' or 'png'"));
            }
            config.cache.extension = extension.to_string();
        }
        ("network", "connect_timeout_secs") => {
            config.network.connect_timeout_secs = parse_positive(value)
                .ok_or_else(|| invalid("must be a positive integer (seconds)"))?;
        }
        ("network", "read_timeout_secs") => {
            config.network.read_timeout_secs = parse_positive(value)
                .ok_or_else(|| invalid("must be a positive integer (seconds)"))?;
        }
        ("network", "probe_address") => {
            if !value.contains(':') {
                return Err(invalid("expected host:port"));
            }
            config.network.probe_address = value.to_string();
        }
        ("layer", "url") => {
            if value.is_empty() {
                return Err(invalid("must not be empty"));
            }
            config.layer.url = value.to_string();
        }
        _ => return Err(invalid("unknown key")),
    }

    Ok(())
}

fn parse_positive(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().filter(|v| *v > 0)
}

/// Expand `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
