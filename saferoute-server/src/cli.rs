use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Safety-aware routing service
#[derive(Debug, Parser)]
#[command(name = "saferoute-server", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listen address from the configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port from the configuration
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Route a single JSON request file and print the response
    Route {
        /// File containing `{"start": [lat, lng], "end": [lat, lng], "safety_points": [...]}`
        request: PathBuf,
        /// Print the route as GeoJSON instead of the path response
        #[arg(long)]
        geojson: bool,
    },
}
