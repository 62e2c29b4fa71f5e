//! # Craft Query Server
//!
//! Read-only HTTP service over a recipe book.
//!
//! Endpoints:
//! - `GET /api/recipes` - all listed items, sorted
//! - `GET /api/calc?item=<name>&qty=<number>` - rounded crafting plan
//! - `GET /health` - liveness probe

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod routes;

use std::sync::Arc;

use craft_core::data::{resolve_recipe_book, DataLoadError};
use craft_core::recipe::RecipeBook;
use thiserror::Error;

pub use config::{ConfigError, ServerConfig};
pub use routes::{build_router, AppState};

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Server configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Recipe data could not be loaded.
    #[error(transparent)]
    Data(#[from] DataLoadError),

    /// Binding or serving failed.
    #[error("Server IO error on {address}: {source}")]
    Io {
        /// Address being served.
        address: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Load the recipe book named by `config`, falling back to the default lookup.
pub fn load_book(config: &ServerConfig) -> Result<RecipeBook, ServerError> {
    Ok(resolve_recipe_book(config.recipes_path.as_deref())?)
}

/// Serve `book` until Ctrl+C.
pub async fn run(config: ServerConfig, book: RecipeBook) -> Result<(), ServerError> {
    let address = config.socket_address();
    let state = AppState::new(Arc::new(book), config.precision);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Io {
            address: address.clone(),
            source,
        })?;
    tracing::info!("Listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Io { address, source })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
