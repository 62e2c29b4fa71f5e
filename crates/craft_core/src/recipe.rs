//! Recipe definitions and the recipe book.
//!
//! A recipe turns a list of quantified inputs into exactly one unit of its
//! output, optionally crediting fixed byproducts per craft. The recipe book
//! indexes recipes by output name. Any item without a recipe is a base
//! resource that is gathered rather than crafted.
//!
//! The book performs no computation of its own; the expansion engine in
//! [`crate::expansion`] queries it by name.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Base resource of the reference configuration.
pub const LEEKS: &str = "Leeks";

/// An input consumed per craft of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Name of the consumed item.
    pub item: String,
    /// Quantity consumed to produce one unit of the recipe output.
    pub quantity: f64,
}

impl Ingredient {
    /// Create a new ingredient.
    #[must_use]
    pub fn new(item: impl Into<String>, quantity: f64) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// A recipe producing one unit of `output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Name of the produced item.
    pub output: String,
    /// Inputs consumed per unit, in declaration order.
    pub inputs: Vec<Ingredient>,
    /// Items credited back per unit crafted.
    pub byproducts: BTreeMap<String, f64>,
}

impl Recipe {
    /// Create a recipe with no inputs and no byproducts.
    #[must_use]
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            inputs: Vec::new(),
            byproducts: BTreeMap::new(),
        }
    }

    /// Append an input consumed per unit.
    #[must_use]
    pub fn with_input(mut self, item: impl Into<String>, quantity: f64) -> Self {
        self.inputs.push(Ingredient::new(item, quantity));
        self
    }

    /// Add a byproduct credited per unit.
    ///
    /// Declaring the same byproduct twice sums the quantities.
    #[must_use]
    pub fn with_byproduct(mut self, item: impl Into<String>, quantity: f64) -> Self {
        *self.byproducts.entry(item.into()).or_insert(0.0) += quantity;
        self
    }
}

/// Immutable table of recipes keyed by output name.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeBook {
    /// Recipes indexed by output name.
    recipes: HashMap<String, Recipe>,
    /// Items declared as gathered resources.
    base_resources: BTreeSet<String>,
}

impl RecipeBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            recipes: HashMap::new(),
            base_resources: BTreeSet::new(),
        }
    }

    /// Register a recipe, returning the one it replaced for the same output.
    pub fn register(&mut self, recipe: Recipe) -> Option<Recipe> {
        self.recipes.insert(recipe.output.clone(), recipe)
    }

    /// Declare a base resource so it is listed alongside craftable items.
    pub fn add_base_resource(&mut self, item: impl Into<String>) {
        self.base_resources.insert(item.into());
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.register(recipe);
        self
    }

    /// Builder form of [`Self::add_base_resource`].
    #[must_use]
    pub fn with_base_resource(mut self, item: impl Into<String>) -> Self {
        self.add_base_resource(item);
        self
    }

    /// Look up the recipe for an item. `None` means a base resource.
    #[must_use]
    pub fn lookup(&self, item: &str) -> Option<&Recipe> {
        self.recipes.get(item)
    }

    /// Check if an item has a recipe.
    #[must_use]
    pub fn is_craftable(&self, item: &str) -> bool {
        self.recipes.contains_key(item)
    }

    /// Check if an item is a listed item: craftable or a declared base resource.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.is_craftable(item) || self.base_resources.contains(item)
    }

    /// All recipe outputs plus declared base resources, sorted.
    #[must_use]
    pub fn all_items(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self
            .recipes
            .keys()
            .chain(self.base_resources.iter())
            .collect();
        names.into_iter().cloned().collect()
    }

    /// Declared base resources, sorted.
    pub fn base_resources(&self) -> impl Iterator<Item = &str> {
        self.base_resources.iter().map(String::as_str)
    }

    /// All registered recipes, in no particular order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Number of registered recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the book has no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Validate internal consistency of the book.
    ///
    /// Checks for:
    /// - Quantities that are negative or not finite
    /// - Base resources that also have a recipe
    /// - Crafting loops reachable from any recipe
    ///
    /// Returns a list of validation errors.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for recipe in self.sorted_recipes() {
            for input in &recipe.inputs {
                if !is_valid_quantity(input.quantity) {
                    errors.push(format!(
                        "Recipe '{}' consumes invalid quantity {} of '{}'",
                        recipe.output, input.quantity, input.item
                    ));
                }
            }
            for (item, quantity) in &recipe.byproducts {
                if !is_valid_quantity(*quantity) {
                    errors.push(format!(
                        "Recipe '{}' credits invalid quantity {} of '{}'",
                        recipe.output, quantity, item
                    ));
                }
            }
        }

        for item in &self.base_resources {
            if self.is_craftable(item) {
                errors.push(format!("Base resource '{item}' also has a recipe"));
            }
        }

        for cycle in self.find_cycles() {
            errors.push(format!("Crafting loop: {}", cycle.join(" -> ")));
        }

        errors
    }

    /// Find crafting loops in the recipe graph.
    ///
    /// Each returned path starts and ends with the repeated item.
    #[must_use]
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();
        let mut finished = HashSet::new();
        let mut path = Vec::new();

        for recipe in self.sorted_recipes() {
            self.walk_for_cycles(&recipe.output, &mut path, &mut finished, &mut cycles);
        }

        cycles
    }

    fn walk_for_cycles<'a>(
        &'a self,
        item: &'a str,
        path: &mut Vec<&'a str>,
        finished: &mut HashSet<&'a str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        if finished.contains(item) {
            return;
        }
        if let Some(start) = path.iter().position(|p| *p == item) {
            let mut cycle: Vec<String> = path[start..].iter().map(|p| (*p).to_string()).collect();
            cycle.push(item.to_string());
            cycles.push(cycle);
            return;
        }
        let Some(recipe) = self.lookup(item) else {
            finished.insert(item);
            return;
        };

        path.push(item);
        for input in &recipe.inputs {
            self.walk_for_cycles(&input.item, path, finished, cycles);
        }
        path.pop();
        finished.insert(item);
    }

    /// Recipes sorted by output name, for stable reporting.
    fn sorted_recipes(&self) -> Vec<&Recipe> {
        let mut recipes: Vec<&Recipe> = self.recipes.values().collect();
        recipes.sort_by(|a, b| a.output.cmp(&b.output));
        recipes
    }
}

fn is_valid_quantity(quantity: f64) -> bool {
    quantity.is_finite() && quantity >= 0.0
}

static REFERENCE_BOOK: Lazy<RecipeBook> = Lazy::new(build_reference_book);

/// The reference leek recipe book, built on first use.
#[must_use]
pub fn reference_book() -> &'static RecipeBook {
    &REFERENCE_BOOK
}

fn build_reference_book() -> RecipeBook {
    RecipeBook::new()
        .with_base_resource(LEEKS)
        // 1 barrel is a straight conversion of 10000 leeks
        .with_recipe(Recipe::new("Barrel of Leeks").with_input(LEEKS, 10_000.0))
        .with_recipe(Recipe::new("Leek Teas").with_input(LEEKS, 10.0))
        .with_recipe(Recipe::new("Leek Cakes").with_input("Leek Teas", 10.0))
        .with_recipe(
            Recipe::new("Atomic Leeks")
                .with_input("Leek Cakes", 10.0)
                .with_input("Leek Teas", 25.0),
        )
        .with_recipe(
            Recipe::new("Golden Leeks")
                .with_input("Atomic Leeks", 10.0)
                .with_input("Leek Cakes", 50.0)
                .with_input("Barrel of Leeks", 0.2)
                .with_byproduct("Leek Teas", 500.0),
        )
        .with_recipe(
            Recipe::new("Ultraleeks")
                .with_input("Golden Leeks", 10.0)
                .with_input("Atomic Leeks", 20.0)
                .with_input("Leek Teas", 1000.0)
                .with_input("Barrel of Leeks", 0.4)
                .with_byproduct(LEEKS, 100_000.0),
        )
}
