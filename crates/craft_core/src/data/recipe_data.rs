//! Serialized recipe book definitions.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::loader::DataLoadError;
use crate::recipe::{Recipe, RecipeBook};

/// Data-driven recipe definition.
///
/// # Example RON
///
/// ```ron
/// RecipeData(
///     output: "Golden Leeks",
///     inputs: [("Atomic Leeks", 10.0), ("Leek Cakes", 50.0)],
///     byproducts: {"Leek Teas": 500.0},
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeData {
    /// Name of the produced item.
    pub output: String,

    /// `(item, quantity)` pairs consumed per unit, in order.
    #[serde(default)]
    pub inputs: Vec<(String, f64)>,

    /// Items credited per unit crafted.
    #[serde(default)]
    pub byproducts: BTreeMap<String, f64>,
}

impl RecipeData {
    /// Convert into a [`Recipe`].
    #[must_use]
    pub fn into_recipe(self) -> Recipe {
        let mut recipe = Recipe::new(self.output);
        for (item, quantity) in self.inputs {
            recipe = recipe.with_input(item, quantity);
        }
        for (item, quantity) in self.byproducts {
            recipe = recipe.with_byproduct(item, quantity);
        }
        recipe
    }
}

impl From<&Recipe> for RecipeData {
    fn from(recipe: &Recipe) -> Self {
        Self {
            output: recipe.output.clone(),
            inputs: recipe
                .inputs
                .iter()
                .map(|i| (i.item.clone(), i.quantity))
                .collect(),
            byproducts: recipe.byproducts.clone(),
        }
    }
}

/// Complete recipe book definition, loaded from a RON file at startup.
///
/// # Example RON
///
/// ```ron
/// RecipeBookData(
///     base_resources: ["Leeks"],
///     recipes: [
///         RecipeData(output: "Leek Teas", inputs: [("Leeks", 10.0)]),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeBookData {
    /// Gathered resources listed alongside craftable items.
    #[serde(default)]
    pub base_resources: Vec<String>,

    /// All recipes, one per output.
    #[serde(default)]
    pub recipes: Vec<RecipeData>,
}

impl RecipeBookData {
    /// Outputs declared more than once, in first-repeat order.
    #[must_use]
    pub fn duplicate_outputs(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for recipe in &self.recipes {
            let output = recipe.output.as_str();
            if !seen.insert(output) && !duplicates.contains(&output) {
                duplicates.push(output);
            }
        }
        duplicates
    }

    /// Build a validated [`RecipeBook`].
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::DuplicateRecipe`] if an output is declared
    /// twice, or [`DataLoadError::Validation`] if [`RecipeBook::validate`]
    /// reports problems.
    pub fn into_book(self) -> Result<RecipeBook, DataLoadError> {
        if let Some(output) = self.duplicate_outputs().first() {
            return Err(DataLoadError::DuplicateRecipe((*output).to_string()));
        }

        let mut book = RecipeBook::new();
        for item in self.base_resources {
            book.add_base_resource(item);
        }
        for recipe in self.recipes {
            book.register(recipe.into_recipe());
        }

        let errors = book.validate();
        if !errors.is_empty() {
            return Err(DataLoadError::Validation { errors });
        }
        Ok(book)
    }
}

impl From<&RecipeBook> for RecipeBookData {
    fn from(book: &RecipeBook) -> Self {
        let mut recipes: Vec<RecipeData> = book.recipes().map(RecipeData::from).collect();
        recipes.sort_by(|a, b| a.output.cmp(&b.output));
        Self {
            base_resources: book.base_resources().map(str::to_string).collect(),
            recipes,
        }
    }
}
