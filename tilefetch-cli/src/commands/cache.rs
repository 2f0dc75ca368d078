//! Cache management CLI commands.

use clap::Subcommand;
use tilefetch::cache::{clear_disk_cache, disk_cache_stats, format_size};

use super::common::{load_config, GlobalArgs};
use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Clear the disk cache, removing all cached tiles
    Clear,
    /// Show disk cache statistics
    Stats,
    /// Print the cache directory
    Path,
}

/// Run a cache subcommand.
pub fn run(global: &GlobalArgs, action: CacheAction) -> Result<(), CliError> {
    let config = load_config(global)?;
    let cache = config.tile_cache();
    let cache_dir = cache.root();

    match action {
        CacheAction::Clear => {
            println!("Clearing disk cache at: {}", cache_dir.display());

            let result =
                clear_disk_cache(cache_dir).map_err(|e| CliError::CacheClear(e.to_string()))?;
            println!(
                "Deleted {} files, freed {}",
                result.files_deleted,
                format_size(result.bytes_freed)
            );
            Ok(())
        }
        CacheAction::Stats => {
            println!("Disk cache: {}", cache_dir.display());

            let (files, bytes) =
                disk_cache_stats(cache_dir).map_err(|e| CliError::CacheStats(e.to_string()))?;
            println!("  Files:   {}", files);
            println!("  Size:    {}", format_size(bytes));
            println!("  Max age: {} hours", config.cache.max_age_hours);
            Ok(())
        }
        CacheAction::Path => {
            println!("{}", cache_dir.display());
            Ok(())
        }
    }
}
