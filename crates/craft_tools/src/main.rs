//! Leek Crafting Planner - Development Tools

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use craft_core::recipe::RecipeBook;
use craft_tools::calc::{calculate, load_book, render, OutputFormat};

#[derive(Parser)]
#[command(name = "craft-tools")]
#[command(about = "Development tools for the leek crafting planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate recipe data files
    Validate {
        /// Recipe file or directory of recipe files
        #[arg(default_value = "crates/craft_core/assets/data")]
        path: PathBuf,
    },

    /// List all craftable items and base resources
    Items {
        /// Recipe book RON file (defaults to the standard lookup)
        #[arg(short, long)]
        recipes: Option<PathBuf>,
    },

    /// Compute the crafting plan for an item
    Calc {
        /// Item to craft
        item: String,

        /// Quantity to craft
        #[arg(default_value_t = 1.0, allow_negative_numbers = true)]
        qty: f64,

        /// Recipe book RON file (defaults to the standard lookup)
        #[arg(short, long)]
        recipes: Option<PathBuf>,

        /// Print JSON instead of text tables
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating recipe data in: {}", path.display());
            match craft_tools::validate::validate_data_path(&path) {
                Ok(files) => {
                    for file in &files {
                        tracing::info!(
                            "{}: {} recipes, {} items",
                            file.path.display(),
                            file.recipes,
                            file.items
                        );
                    }
                    tracing::info!("Validation passed");
                }
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Items { recipes } => {
            let book = load_or_exit(recipes);
            for item in book.all_items() {
                println!("{item}");
            }
        }
        Commands::Calc {
            item,
            qty,
            recipes,
            json,
        } => {
            let book = load_or_exit(recipes);
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            let report = match calculate(&book, &item, qty) {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!("{e}");
                    std::process::exit(1);
                }
            };
            match render(&report, format) {
                Ok(output) => println!("{output}"),
                Err(e) => {
                    tracing::error!("Failed to render report: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Load the recipe book or exit with code 1.
fn load_or_exit(path: Option<PathBuf>) -> RecipeBook {
    match load_book(path.as_deref()) {
        Ok(book) => book,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
