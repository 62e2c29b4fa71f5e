//! Test fixtures and helpers.
//!
//! Pre-built recipe books for consistent testing.

use craft_core::recipe::{Recipe, RecipeBook};

/// Two items that require each other: `A -> B -> A`.
#[must_use]
pub fn cyclic_book() -> RecipeBook {
    RecipeBook::new()
        .with_recipe(Recipe::new("A").with_input("B", 1.0))
        .with_recipe(Recipe::new("B").with_input("A", 1.0))
}

/// A loop hidden below an acyclic prefix: `top -> mid -> A -> B -> A`.
#[must_use]
pub fn deep_cycle_book() -> RecipeBook {
    cyclic_book()
        .with_recipe(Recipe::new("top").with_input("mid", 2.0))
        .with_recipe(Recipe::new("mid").with_input("A", 1.0).with_input("ore", 1.0))
}

/// Linear chain `item_0 -> item_1 -> ... -> item_{depth-1} -> ore`.
///
/// Each step consumes `factor` units of the next item.
#[must_use]
pub fn chain_book(depth: usize, factor: f64) -> RecipeBook {
    let mut book = RecipeBook::new().with_base_resource("ore");
    for level in 0..depth {
        let next = if level + 1 == depth {
            "ore".to_string()
        } else {
            format!("item_{}", level + 1)
        };
        book.register(Recipe::new(format!("item_{level}")).with_input(next, factor));
    }
    book
}

/// Diamond with a shared ingredient and a byproduct that feeds back a base resource.
///
/// `gear` needs 2 `plate` and 1 `rod`; both need `ingot`; smelting an ingot
/// needs 3 `ore` and returns 0.5 `slag`; `plate` credits 1 `ore`.
#[must_use]
pub fn diamond_book() -> RecipeBook {
    RecipeBook::new()
        .with_base_resource("ore")
        .with_recipe(Recipe::new("gear").with_input("plate", 2.0).with_input("rod", 1.0))
        .with_recipe(
            Recipe::new("plate")
                .with_input("ingot", 1.0)
                .with_byproduct("ore", 1.0),
        )
        .with_recipe(Recipe::new("rod").with_input("ingot", 2.0))
        .with_recipe(
            Recipe::new("ingot")
                .with_input("ore", 3.0)
                .with_byproduct("slag", 0.5),
        )
}
