//! tilefetch CLI - Command-line interface
//!
//! Fetches map tiles through the tilefetch disk cache, warms the cache for an
//! area, and manages configuration.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::cache::CacheAction;
use commands::capabilities::CapabilitiesArgs;
use commands::common::{GlobalArgs, LayerArgs, TileSpec};
use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;
use commands::prefetch::PrefetchArgs;

#[derive(Parser)]
#[command(name = "tilefetch")]
#[command(version)]
#[command(about = "Fetch and cache map tiles from TMS servers", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one tile through the cache and the network
    Fetch {
        /// Tile as z/x/y
        tile: Option<TileSpec>,

        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Zoom level
        #[arg(long)]
        zoom: Option<u8>,

        /// Write the tile bytes to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the network and answer from the cache only
        #[arg(long)]
        offline: bool,

        #[command(flatten)]
        layer: LayerArgs,
    },

    /// Download every tile of a bounding box into the cache
    Prefetch {
        /// Southern latitude
        #[arg(long, allow_hyphen_values = true)]
        south: f64,

        /// Western longitude
        #[arg(long, allow_hyphen_values = true)]
        west: f64,

        /// Northern latitude
        #[arg(long, allow_hyphen_values = true)]
        north: f64,

        /// Eastern longitude
        #[arg(long, allow_hyphen_values = true)]
        east: f64,

        /// Lowest zoom level
        #[arg(long, default_value = "0")]
        min_zoom: u8,

        /// Highest zoom level
        #[arg(long)]
        max_zoom: u8,

        /// Refuse to run when the area needs more tiles than this
        #[arg(long, default_value = "10000")]
        limit: usize,

        #[command(flatten)]
        layer: LayerArgs,
    },

    /// Show subdomains, worker budget and sample URLs for a template
    Template {
        /// Tile used for the sample URLs
        #[arg(long)]
        sample: Option<TileSpec>,

        #[command(flatten)]
        layer: LayerArgs,
    },

    /// Manage the disk cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List the resource kinds a map server supports
    Capabilities {
        /// Server address, e.g. 'demo.example.com'
        #[arg(long)]
        url: String,

        /// Account login
        #[arg(long, default_value = "")]
        login: String,

        /// Account password
        #[arg(long, default_value = "")]
        password: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let global = cli.global;

    let result = match cli.command {
        Commands::Fetch {
            tile,
            lat,
            lon,
            zoom,
            output,
            offline,
            layer,
        } => commands::fetch::run(
            &global,
            FetchArgs {
                tile,
                lat,
                lon,
                zoom,
                output,
                offline,
                layer,
            },
        ),
        Commands::Prefetch {
            south,
            west,
            north,
            east,
            min_zoom,
            max_zoom,
            limit,
            layer,
        } => commands::prefetch::run(
            &global,
            PrefetchArgs {
                south,
                west,
                north,
                east,
                min_zoom,
                max_zoom,
                limit,
                layer,
            },
        ),
        Commands::Template { sample, layer } => commands::template::run(&global, layer, sample),
        Commands::Cache { action } => commands::cache::run(&global, action),
        Commands::Config { command } => commands::config::run(&global, command),
        Commands::Capabilities {
            url,
            login,
            password,
        } => commands::capabilities::run(
            &global,
            CapabilitiesArgs {
                url,
                login,
                password,
            },
        ),
    };

    if let Err(e) = result {
        e.exit();
    }
}
