//! Fetch command - resolve one tile through cache and network.

use std::path::PathBuf;

use tilefetch::fetcher::TileOutcome;
use tilefetch::layer::TileSource;

use super::common::{resolve_tile, GlobalArgs, LayerArgs, TileSpec};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub tile: Option<TileSpec>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub zoom: Option<u8>,
    pub output: Option<PathBuf>,
    pub offline: bool,
    pub layer: LayerArgs,
}

/// Run the fetch command.
pub fn run(global: &GlobalArgs, args: FetchArgs) -> Result<(), CliError> {
    let tile = resolve_tile(args.tile, args.lat, args.lon, args.zoom)?;

    let runner = CliRunner::new(global)?;
    runner.log_startup("fetch");
    let layer = runner.remote_layer(&args.layer, args.offline)?;

    println!("Fetching tile {}", tile);
    println!("  URL template: {}", layer.url());

    let start = std::time::Instant::now();
    let outcome = layer.resolve_tile(&tile);
    let elapsed = start.elapsed();

    let image = match &outcome {
        TileOutcome::Fresh(image) | TileOutcome::Stale(image) => image,
        TileOutcome::Absent => return Err(CliError::TileUnavailable(tile)),
    };

    let cache = layer.fetcher().cache();
    println!(
        "Resolved {} tile ({}x{}) in {:.2}s",
        outcome.label(),
        image.width(),
        image.height(),
        elapsed.as_secs_f64()
    );
    if let Some(info) = cache.entry_info(&tile) {
        println!("  Cache file: {}", info.path.display());
        println!("  Modified:   {}", info.modified.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(output) = args.output {
        // The decoded tile is always backed by the cache file
        let data = cache
            .read_stale(&tile)
            .ok_or(CliError::TileUnavailable(tile))?;
        std::fs::write(&output, data).map_err(|error| CliError::FileWrite {
            path: output.display().to_string(),
            error,
        })?;
        println!("  Saved to:   {}", output.display());
    }

    Ok(())
}
