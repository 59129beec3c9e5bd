//! Command-line interface for City Explorer.

mod commands;

use clap::{Args, Parser, Subcommand};

/// City Explorer - cached location, weather and event lookups
#[derive(Parser)]
#[command(name = "city-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API until Ctrl+C (default)
    #[command(alias = "web")]
    Serve,

    /// Resolve a place query to a stored location
    #[command(alias = "loc")]
    Location {
        /// Free-text place query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show stored or freshly fetched forecasts
    Weather(LocationArgs),

    /// Show stored or freshly fetched events
    Events(LocationArgs),

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

/// Either `--id` for stored rows or `--lat`/`--lng` for a fresh fetch.
#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Stored location id
    #[arg(long, conflicts_with_all = ["lat", "lng"], required_unless_present_all = ["lat", "lng"])]
    pub id: Option<i32>,

    /// Latitude for a fresh fetch
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude for a fresh fetch
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Location id the fetched rows are stored under
    #[arg(long)]
    pub location_id: Option<i32>,
}

pub use commands::*;
