//! Error types for the crafting planner.

use thiserror::Error;

use crate::data::DataLoadError;
use crate::expansion::ExpansionError;

/// Result type alias using [`CraftError`].
pub type Result<T> = std::result::Result<T, CraftError>;

/// Top-level error type for planner operations.
#[derive(Debug, Error)]
pub enum CraftError {
    /// The requested item is neither craftable nor a known base resource.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Expanding the request failed.
    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    /// Loading recipe data failed.
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
}
