//! Data-driven recipe configuration.
//!
//! Pure data structures for recipe books, deserialized from RON files, plus
//! the loader that reads them from disk and validates them.

mod loader;
mod recipe_data;

pub use loader::{
    default_recipe_path, load_recipe_book, parse_recipe_book, resolve_recipe_book, DataLoadError,
    RECIPES_PATH_ENV,
};
pub use recipe_data::{RecipeBookData, RecipeData};
