//! Leek Crafting Planner - Query Server

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use craft_server::{load_book, ServerConfig};

#[derive(Parser)]
#[command(name = "craft-server")]
#[command(about = "HTTP server for crafting plan queries")]
#[command(version)]
struct Cli {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Recipe book RON file
    #[arg(short, long)]
    recipes: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting crafting planner server");

    let mut config = match cli.config {
        Some(path) => match ServerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.recipes.is_some() {
        config.recipes_path = cli.recipes;
    }

    let book = match load_book(&config) {
        Ok(book) => book,
        Err(e) => {
            tracing::error!("Failed to load recipes: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Serving {} items", book.all_items().len());

    if let Err(e) = craft_server::run(config, book).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
