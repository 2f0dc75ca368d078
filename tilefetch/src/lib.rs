//! tilefetch - cached, subdomain-balanced tile retrieval for raster map layers
//!
//! A tile request is answered from the disk cache when the cached file is
//! fresh, downloaded from a templated TMS URL otherwise, and served from a
//! stale cached copy when the download is impossible or fails.
//!
//! # Example
//!
//! ```ignore
//! use tilefetch::cache::TileCache;
//! use tilefetch::coord::TileCoord;
//! use tilefetch::decode::ImageDecoder;
//! use tilefetch::fetcher::TileFetcher;
//! use tilefetch::network::TcpProbe;
//! use tilefetch::provider::ReqwestClient;
//!
//! let fetcher = TileFetcher::new(
//!     "https://{a,b,c}.tile.openstreetmap.org/{z}/{x}/{y}.png",
//!     TileCache::new("/tmp/tiles"),
//!     ReqwestClient::new()?,
//!     TcpProbe::default(),
//!     ImageDecoder,
//! );
//! let outcome = fetcher.resolve(&TileCoord::new(12, 2200, 1343));
//! println!("{}", outcome.label());
//! ```

pub mod budget;
pub mod cache;
pub mod config;
pub mod coord;
pub mod decode;
pub mod fetcher;
pub mod layer;
pub mod logging;
pub mod network;
pub mod ngw;
pub mod pool;
pub mod provider;
pub mod telemetry;
pub mod template;
