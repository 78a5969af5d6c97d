mod animation;
mod app;
mod choreography;
mod config;
mod error;
mod input;
mod logging;
mod pages;
mod positioning;
mod render;
mod state;

use std::path::PathBuf;

use clap::Parser;

use app::{App, AppConfig};
use config::VillageConfig;

/// Village: a portfolio you walk through
///
/// A small mascot stands at the village crossroad. Click a building (or press
/// an arrow key) and it walks there, across then up, before the page fades in.
#[derive(Parser, Debug)]
#[command(name = "village")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overriding waypoints, hotspots and timings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the log file
    #[arg(long, value_name = "DIR", default_value = "logs")]
    log_dir: PathBuf,

    /// Base URL the contact form posts to
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Start with the hotspots ready, without the intro
    #[arg(long)]
    no_intro: bool,

    /// Skip the loading screen
    #[arg(long)]
    no_loading: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let guard = match logging::init(&cli.log_dir) {
        Ok((guard, _)) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let mut village = match &cli.config {
        Some(path) => match VillageConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "invalid configuration");
                eprintln!("Error: {}", e);
                // exit skips destructors; flush the log first
                drop(guard);
                std::process::exit(1);
            }
        },
        None => VillageConfig::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        village.contact_endpoint = endpoint;
    }

    let config = AppConfig {
        village,
        play_intro: !cli.no_intro,
        show_loading: !cli.no_loading,
        ..AppConfig::default()
    };

    let (columns, _) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(config, columns);

    // Run the app
    if let Err(e) = app.run().await {
        tracing::error!(error = %e, "terminal error");
        eprintln!("Error: {}", e);
        drop(guard);
        std::process::exit(1);
    }

    drop(guard);
    Ok(())
}
