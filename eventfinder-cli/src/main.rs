mod app;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[derive(Parser)]
#[command(name = "eventfinder")]
#[command(about = "Find events in your city, save them and get reminded")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search events in a city (replaces the last search)
    Search {
        /// City name, e.g. "Berlin" or "New York"
        city: String,
    },
    /// Show the results of the last search again
    Results,
    /// Show all details of an event
    Show {
        /// Event id (from search results or saved events)
        id: String,
    },
    /// Save an event, or remove it if already saved
    Save { id: String },
    /// List saved events
    Events,
    /// Delete a saved event and its reminder
    Delete { id: String },
    /// Set or remove a reminder for a saved event
    Remind { id: String },
    /// Show the last search as map markers
    Map {
        /// Keep running and redraw whenever a new search is made
        #[arg(short, long)]
        watch: bool,
    },
    /// Forget the last search
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("EVENTFINDER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::load()?;

    match cli.command {
        Commands::Search { city } => commands::search::run(&app, &city).await,
        Commands::Results => commands::results::run(&app),
        Commands::Show { id } => commands::show::run(&app, &id),
        Commands::Save { id } => commands::save::run(&app, &id),
        Commands::Events => commands::events::run(&app),
        Commands::Delete { id } => commands::delete::run(&app, &id),
        Commands::Remind { id } => commands::remind::run(&app, &id),
        Commands::Map { watch } => commands::map::run(&app, watch).await,
        Commands::Clear => commands::clear::run(&app),
    }
}
