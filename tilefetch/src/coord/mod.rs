//! Coordinate conversion module
//!
//! Provides the [`TileCoord`] triple used throughout the crate, plus the
//! conversion from geographic coordinates (latitude/longitude) to Web
//! Mercator tile coordinates used by the CLI to address tiles by location.

mod types;

pub use types::{
    CoordError, MercatorEnvelope, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MERCATOR_MAX, MIN_LAT,
    MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 22)
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = n as u32 - 1;

    // lon = 180 and lat = MIN_LAT land exactly on the far edge
    let x = (((lon + 180.0) / 360.0 * n) as u32).min(max_index);

    let lat_rad = lat * PI / 180.0;
    let y = (((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32).min(max_index);

    Ok(TileCoord { zoom, x, y })
}

/// Lists every tile covering a lat/lon bounding box at the given zoom.
///
/// Tiles are ordered row by row from the north-west corner.
pub fn tiles_in_bounds(
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    zoom: u8,
) -> Result<Vec<TileCoord>, CoordError> {
    let (north_west, south_east) = bounds_corners(south, west, north, east, zoom)?;

    let mut tiles = Vec::new();
    for y in north_west.y..=south_east.y {
        for x in north_west.x..=south_east.x {
            tiles.push(TileCoord { zoom, x, y });
        }
    }
    Ok(tiles)
}

/// Number of tiles [`tiles_in_bounds`] would return, without listing them.
pub fn count_tiles_in_bounds(
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    zoom: u8,
) -> Result<u64, CoordError> {
    let (north_west, south_east) = bounds_corners(south, west, north, east, zoom)?;
    let columns = u64::from(south_east.x - north_west.x) + 1;
    let rows = u64::from(south_east.y - north_west.y) + 1;
    Ok(columns * rows)
}

fn bounds_corners(
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    zoom: u8,
) -> Result<(TileCoord, TileCoord), CoordError> {
    let north_west = to_tile_coords(north.max(south), west.min(east), zoom)?;
    let south_east = to_tile_coords(north.min(south), west.max(east), zoom)?;
    Ok((north_west, south_east))
}
