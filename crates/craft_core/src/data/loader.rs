//! Recipe book loading from RON files.
//!
//! Resolution order for the active book:
//! 1. An explicit path (command line flag or server config)
//! 2. Environment variable `CRAFT_RECIPES_PATH`
//! 3. Standard asset locations relative to the working directory
//! 4. The built-in reference book

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::recipe_data::RecipeBookData;
use crate::recipe::{reference_book, RecipeBook};

/// Environment variable naming a recipe file.
pub const RECIPES_PATH_ENV: &str = "CRAFT_RECIPES_PATH";

/// Errors that can occur during recipe data loading.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON.
    #[error("Failed to parse RON file '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// More than one recipe for the same output.
    #[error("Duplicate recipe for '{0}'")]
    DuplicateRecipe(String),

    /// Recipe book validation failed.
    #[error("Recipe validation failed: {}", .errors.join("; "))]
    Validation {
        /// List of validation errors.
        errors: Vec<String>,
    },
}

/// Parse and validate a recipe book from RON text.
///
/// `origin` names the source in error messages.
pub fn parse_recipe_book(content: &str, origin: &str) -> Result<RecipeBook, DataLoadError> {
    let data: RecipeBookData = ron::from_str(content).map_err(|source| DataLoadError::ParseError {
        path: origin.to_string(),
        source,
    })?;
    data.into_book()
}

/// Load and validate a recipe book from a RON file.
pub fn load_recipe_book(path: &Path) -> Result<RecipeBook, DataLoadError> {
    let content = fs::read_to_string(path).map_err(|source| DataLoadError::IoError {
        path: path.display().to_string(),
        source,
    })?;

    let book = parse_recipe_book(&content, &path.display().to_string())?;
    tracing::info!(
        "Loaded {} recipes from {}",
        book.len(),
        path.display()
    );
    Ok(book)
}

/// Resolve the default recipe file.
///
/// Checks `CRAFT_RECIPES_PATH` first, then standard locations:
/// 1. `./crates/craft_core/assets/data/recipes.ron` (repo root)
/// 2. `./assets/data/recipes.ron` (running from craft_core)
/// 3. `../craft_core/assets/data/recipes.ron` (running from a sibling crate)
pub fn default_recipe_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(RECIPES_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        tracing::warn!(
            "{RECIPES_PATH_ENV} points to missing file {}",
            path.display()
        );
    }

    let candidates = [
        "crates/craft_core/assets/data/recipes.ron",
        "assets/data/recipes.ron",
        "../craft_core/assets/data/recipes.ron",
    ];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Resolve the recipe book to serve.
///
/// An explicit path must load; otherwise the default file is tried and the
/// reference book is used when none is found.
pub fn resolve_recipe_book(explicit: Option<&Path>) -> Result<RecipeBook, DataLoadError> {
    if let Some(path) = explicit {
        return load_recipe_book(path);
    }
    match default_recipe_path() {
        Some(path) => load_recipe_book(&path),
        None => {
            tracing::debug!("No recipe file found, using reference book");
            Ok(reference_book().clone())
        }
    }
}
