//! # Craft Core
//!
//! Crafting plan computation for data-driven recipe books.
//!
//! Given a target item and quantity, the expansion engine walks the recipe
//! graph and reports how much of every intermediate item must be crafted,
//! how much of every base resource must be gathered, and how much is
//! credited back by byproducts.
//!
//! The expansion engine is pure:
//! - No IO
//! - No shared mutable state
//! - No logging
//!
//! Recipe books are immutable once built, so a single book can be shared
//! across threads and requests.
//!
//! ## Crate Structure
//!
//! - [`recipe`] - Recipes, the recipe book and the reference configuration
//! - [`expansion`] - Plan expansion and net totals
//! - [`report`] - Rounded, serializable plan reports
//! - [`data`] - RON recipe definitions and file loading
//! - [`error`] - Top-level error type

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod data;
pub mod error;
pub mod expansion;
pub mod recipe;
pub mod report;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::data::{resolve_recipe_book, DataLoadError, RecipeBookData, RecipeData};
    pub use crate::error::{CraftError, Result};
    pub use crate::expansion::{expand, net_totals, ExpansionError, Plan, EPSILON};
    pub use crate::recipe::{reference_book, Ingredient, Recipe, RecipeBook, LEEKS};
    pub use crate::report::{round_amount, PlanReport, DEFAULT_PRECISION};
}

/// All listed items of `book`: craftable outputs plus base resources, sorted.
#[must_use]
pub fn list_items(book: &recipe::RecipeBook) -> Vec<String> {
    book.all_items()
}

/// Expand a request after checking the item is listed in `book`.
///
/// # Errors
///
/// Returns [`error::CraftError::UnknownItem`] for names the book does not
/// list, otherwise any [`expansion::ExpansionError`].
pub fn plan_for(
    book: &recipe::RecipeBook,
    item: &str,
    quantity: f64,
) -> error::Result<expansion::Plan> {
    if item.is_empty() || !book.contains(item) {
        return Err(error::CraftError::UnknownItem(item.to_string()));
    }
    Ok(expansion::expand(book, item, quantity)?)
}
