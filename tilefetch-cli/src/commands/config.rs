//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use clap::Subcommand;
use tilefetch::config::ConfigKey;

use super::common::{load_config, GlobalArgs};
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., cache.max_age_hours)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., layer.url)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(global: &GlobalArgs, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(global, &key),
        ConfigCommands::Set { key, value } => run_set(global, &key, &value),
        ConfigCommands::List => run_list(global),
        ConfigCommands::Path => {
            println!("{}", global.config_path().display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'tilefetch config list' to see available keys.",
            key
        ))
    })
}

fn run_get(global: &GlobalArgs, key: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = load_config(global)?;
    println!("{}", config_key.get(&config));
    Ok(())
}

fn run_set(global: &GlobalArgs, key: &str, value: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = load_config(global)?;
    config_key
        .set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save_to(&global.config_path())?;

    println!("Set {} = {}", config_key.name(), config_key.get(&config));
    Ok(())
}

fn run_list(global: &GlobalArgs) -> Result<(), CliError> {
    let config = load_config(global)?;

    let mut current_section = "";
    for key in ConfigKey::all() {
        let section = key.section();

        // Print section header when section changes
        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", section);
            current_section = section;
        }

        println!("  {} = {}", key.key_name(), key.get(&config));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tilefetch::config::ConfigFile;

    #[test]
    fn test_set_writes_selected_file() {
        let temp_dir = TempDir::new().unwrap();
        let global = GlobalArgs {
            config: Some(temp_dir.path().join("config.ini")),
            verbose: false,
        };

        run(
            &global,
            ConfigCommands::Set {
                key: "cache.max_age_hours".to_string(),
                value: "72".to_string(),
            },
        )
        .unwrap();

        let saved = ConfigFile::load_from(&global.config_path()).unwrap();
        assert_eq!(saved.cache.max_age_hours, 72);
    }

    #[test]
    fn test_set_rejects_invalid_value() {
        let temp_dir = TempDir::new().unwrap();
        let global = GlobalArgs {
            config: Some(temp_dir.path().join("config.ini")),
            verbose: false,
        };

        let result = run(
            &global,
            ConfigCommands::Set {
                key: "network.connect_timeout_secs".to_string(),
                value: "0".to_string(),
            },
        );

        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(!global.config_path().exists());
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(parse_key("cache.colour"), Err(CliError::Config(_))));
    }
}
