//! Prefetch command - warm the cache for a bounding box.

use tilefetch::coord::{count_tiles_in_bounds, tiles_in_bounds, TileCoord};
use tilefetch::pool::FetchPool;

use super::common::{GlobalArgs, LayerArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the prefetch command.
pub struct PrefetchArgs {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub limit: usize,
    pub layer: LayerArgs,
}

/// Lists every tile of the box across the zoom range, capped at `limit`.
pub fn plan_tiles(args: &PrefetchArgs) -> Result<Vec<TileCoord>, CliError> {
    if args.min_zoom > args.max_zoom {
        return Err(CliError::Config(format!(
            "--min-zoom {} is above --max-zoom {}",
            args.min_zoom, args.max_zoom
        )));
    }

    // Count first so an oversized area is rejected before anything is listed
    let mut total: u64 = 0;
    for zoom in args.min_zoom..=args.max_zoom {
        let count = count_tiles_in_bounds(args.south, args.west, args.north, args.east, zoom)?;
        total = total.saturating_add(count);
        if total > args.limit as u64 {
            return Err(CliError::Config(format!(
                "area covers more than {} tiles; narrow it or raise --limit",
                args.limit
            )));
        }
    }

    let mut tiles = Vec::new();
    for zoom in args.min_zoom..=args.max_zoom {
        tiles.extend(tiles_in_bounds(
            args.south, args.west, args.north, args.east, zoom,
        )?);
    }
    Ok(tiles)
}

/// Run the prefetch command.
pub fn run(global: &GlobalArgs, args: PrefetchArgs) -> Result<(), CliError> {
    let tiles = plan_tiles(&args)?;

    let runner = CliRunner::new(global)?;
    runner.log_startup("prefetch");
    let layer = runner.remote_layer(&args.layer, false)?;
    let metrics = layer.fetcher().metrics().clone();

    let pool = FetchPool::for_source(layer)?;
    println!(
        "Prefetching {} tiles (zoom {}-{}) with {} workers",
        tiles.len(),
        args.min_zoom,
        args.max_zoom,
        pool.threads()
    );

    // Drop decoded images as soon as each tile is resolved
    let results = pool.resolve_all_with(&tiles, |_, outcome| outcome.is_absent());
    let missing = results.iter().filter(|absent| **absent).count();

    println!();
    println!("{}", metrics.snapshot());
    if missing > 0 {
        println!();
        println!("{} of {} tiles could not be fetched", missing, tiles.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(min_zoom: u8, max_zoom: u8, limit: usize) -> PrefetchArgs {
        PrefetchArgs {
            south: 40.70,
            west: -74.02,
            north: 40.72,
            east: -74.00,
            min_zoom,
            max_zoom,
            limit,
            layer: LayerArgs::default(),
        }
    }

    #[test]
    fn test_plan_covers_zoom_range() {
        let tiles = plan_tiles(&args(0, 3, 1000)).unwrap();
        // One tile per zoom level this far out
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0], TileCoord::new(0, 0, 0));
        assert!(tiles.iter().all(|t| t.zoom <= 3));
    }

    #[test]
    fn test_plan_rejects_inverted_range() {
        assert!(plan_tiles(&args(5, 4, 1000)).is_err());
    }

    #[test]
    fn test_plan_respects_limit() {
        assert!(plan_tiles(&args(0, 18, 10)).is_err());
    }

    #[test]
    fn test_plan_rejects_huge_area_at_high_zoom() {
        let args = PrefetchArgs {
            south: -80.0,
            west: -179.0,
            north: 80.0,
            east: 179.0,
            min_zoom: 20,
            max_zoom: 20,
            limit: 10_000,
            layer: LayerArgs::default(),
        };
        assert!(matches!(plan_tiles(&args), Err(CliError::Config(_))));
    }
}
