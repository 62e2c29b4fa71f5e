//! Proptest strategies for expansion testing.
//!
//! Generated recipe books are layered: recipe `item_i` only consumes items
//! with a higher index or one of the base resources `raw_0..raw_2`, so every
//! generated book is acyclic.

use proptest::prelude::*;

use craft_core::recipe::{Recipe, RecipeBook};

/// Number of base resources in generated books.
pub const BASE_RESOURCE_COUNT: usize = 3;

/// Per-recipe links: `(target slot, quantity)` for inputs and byproducts.
type RecipeLinks = (Vec<(usize, f64)>, Vec<(usize, f64)>);

/// Generate a requested quantity in a practical range.
///
/// Range: 0 to 1000
pub fn arb_quantity() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0f64..1000.0, (1u32..100).prop_map(f64::from)]
}

/// Generate a per-unit recipe quantity.
///
/// Range: 0 to 10
pub fn arb_per_unit() -> impl Strategy<Value = f64> {
    prop_oneof![(0u32..10).prop_map(f64::from), 0.0f64..10.0]
}

fn arb_recipe_links(slots: usize) -> impl Strategy<Value = RecipeLinks> {
    (
        proptest::collection::vec((0..slots, arb_per_unit()), 0..4),
        proptest::collection::vec((0..slots, 0.0f64..5.0), 0..2),
    )
}

/// Generate an acyclic recipe book with up to `max_items` recipes.
pub fn arb_acyclic_book(max_items: usize) -> impl Strategy<Value = RecipeBook> {
    (1..=max_items.max(1)).prop_flat_map(|count| {
        proptest::collection::vec(arb_recipe_links(count + BASE_RESOURCE_COUNT), count)
            .prop_map(move |links| layered_book(count, links))
    })
}

/// Generate an acyclic book together with one of its recipe outputs.
pub fn arb_book_and_item(max_items: usize) -> impl Strategy<Value = (RecipeBook, String)> {
    arb_acyclic_book(max_items).prop_flat_map(|book| {
        let count = book.len();
        (Just(book), (0..count).prop_map(item_name))
    })
}

/// Name of the recipe output at `index`.
#[must_use]
pub fn item_name(index: usize) -> String {
    format!("item_{index}")
}

/// Name of the base resource at `index`.
#[must_use]
pub fn raw_name(index: usize) -> String {
    format!("raw_{}", index % BASE_RESOURCE_COUNT)
}

fn layered_book(count: usize, links: Vec<RecipeLinks>) -> RecipeBook {
    // Slots at or above the recipe's own index that are still recipes stay
    // recipes; everything else becomes a base resource.
    let input_name = |own: usize, slot: usize| {
        if slot > own && slot < count {
            item_name(slot)
        } else {
            raw_name(slot)
        }
    };
    let any_name = |slot: usize| {
        if slot < count {
            item_name(slot)
        } else {
            raw_name(slot)
        }
    };

    let mut book = RecipeBook::new();
    for index in 0..BASE_RESOURCE_COUNT {
        book.add_base_resource(raw_name(index));
    }
    for (index, (inputs, byproducts)) in links.into_iter().enumerate() {
        let mut recipe = Recipe::new(item_name(index));
        for (slot, quantity) in inputs {
            recipe = recipe.with_input(input_name(index, slot), quantity);
        }
        for (slot, quantity) in byproducts {
            recipe = recipe.with_byproduct(any_name(slot), quantity);
        }
        book.register(recipe);
    }
    book
}
