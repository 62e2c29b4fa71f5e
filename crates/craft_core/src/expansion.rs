//! Crafting plan expansion.
//!
//! Walks the recipe graph depth-first from a requested item, scaling every
//! input and byproduct linearly with the requested quantity. The walk keeps
//! the chain of items currently being expanded so that re-entering one of
//! them is reported as a crafting loop, while the same item appearing in
//! separate branches is expanded once per branch.
//!
//! The engine is a pure function of the book and the request: no IO, no
//! caching, no shared state between calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recipe::RecipeBook;

/// Absolute threshold below which accumulated amounts are treated as zero.
pub const EPSILON: f64 = 1e-9;

/// Errors that can occur while expanding a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpansionError {
    /// The requested quantity is negative, not a finite number, or large
    /// enough that a scaled amount overflows.
    #[error("Invalid quantity {0}: must be a finite, non-negative number")]
    InvalidQuantity(f64),

    /// An item was reached again while it was still being expanded.
    #[error("Crafting loop at '{item}': {}", .path.join(" -> "))]
    Cycle {
        /// The repeated item.
        item: String,
        /// Active expansion path, ending with the repeated item.
        path: Vec<String>,
    },
}

/// Result of expanding one (item, quantity) request.
///
/// Every map holds only amounts of at least [`EPSILON`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Units of each craftable item to produce, including the requested item.
    pub crafts: BTreeMap<String, f64>,
    /// Units of each base resource to gather, before netting against credits.
    pub base: BTreeMap<String, f64>,
    /// Units of each item credited back by byproducts.
    pub credits: BTreeMap<String, f64>,
}

impl Plan {
    /// Create an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all three maps are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crafts.is_empty() && self.base.is_empty() && self.credits.is_empty()
    }

    /// Units of `item` to craft (0 if none).
    #[must_use]
    pub fn crafted(&self, item: &str) -> f64 {
        self.crafts.get(item).copied().unwrap_or(0.0)
    }

    /// Units of base resource `item` to gather (0 if none).
    #[must_use]
    pub fn required(&self, item: &str) -> f64 {
        self.base.get(item).copied().unwrap_or(0.0)
    }

    /// Units of `item` credited by byproducts (0 if none).
    #[must_use]
    pub fn credited(&self, item: &str) -> f64 {
        self.credits.get(item).copied().unwrap_or(0.0)
    }

    /// Base requirements minus credits. See [`net_totals`].
    #[must_use]
    pub fn net_totals(&self) -> BTreeMap<String, f64> {
        net_totals(self)
    }

    fn is_finite(&self) -> bool {
        [&self.crafts, &self.base, &self.credits]
            .iter()
            .all(|map| map.values().all(|amount| amount.is_finite()))
    }

    fn prune(&mut self) {
        prune_negligible(&mut self.crafts);
        prune_negligible(&mut self.base);
        prune_negligible(&mut self.credits);
    }
}

/// Expand a request for `quantity` units of `item` into a [`Plan`].
///
/// Items without a recipe in `book` are treated as base resources. A zero
/// quantity yields an empty plan without touching the book.
///
/// # Errors
///
/// - [`ExpansionError::InvalidQuantity`] if `quantity` is negative, NaN or infinite,
///   or if any scaled or accumulated amount overflows to infinity.
/// - [`ExpansionError::Cycle`] if the recipe graph loops back on the active path.
pub fn expand(book: &RecipeBook, item: &str, quantity: f64) -> Result<Plan, ExpansionError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(ExpansionError::InvalidQuantity(quantity));
    }
    if quantity == 0.0 {
        return Ok(Plan::new());
    }

    let mut expander = Expander::new(book, quantity);
    expander.visit(item, quantity)?;

    let mut plan = expander.plan;
    if !plan.is_finite() {
        return Err(ExpansionError::InvalidQuantity(quantity));
    }
    plan.prune();
    Ok(plan)
}

/// Net requirement per item: `base - credits`.
///
/// Covers every item in either map. Entries whose magnitude does not exceed
/// [`EPSILON`] are dropped. Negative values are surplus.
#[must_use]
pub fn net_totals(plan: &Plan) -> BTreeMap<String, f64> {
    let mut totals = plan.base.clone();
    for (item, credit) in &plan.credits {
        *totals.entry(item.clone()).or_insert(0.0) -= credit;
    }
    totals.retain(|_, amount| amount.abs() > EPSILON);
    totals
}

/// Accumulator state for a single expansion.
struct Expander<'a> {
    book: &'a RecipeBook,
    /// Quantity of the top-level request, reported on overflow.
    requested: f64,
    /// Items currently being expanded, outermost first.
    path: Vec<&'a str>,
    plan: Plan,
}

impl<'a> Expander<'a> {
    fn new(book: &'a RecipeBook, requested: f64) -> Self {
        Self {
            book,
            requested,
            path: Vec::new(),
            plan: Plan::new(),
        }
    }

    fn visit(&mut self, item: &'a str, quantity: f64) -> Result<(), ExpansionError> {
        if quantity <= 0.0 {
            return Ok(());
        }
        if self.path.contains(&item) {
            let mut path: Vec<String> = self.path.iter().map(|p| (*p).to_string()).collect();
            path.push(item.to_string());
            return Err(ExpansionError::Cycle {
                item: item.to_string(),
                path,
            });
        }

        let book = self.book;
        let Some(recipe) = book.lookup(item) else {
            accumulate(&mut self.plan.base, item, quantity);
            return Ok(());
        };

        accumulate(&mut self.plan.crafts, item, quantity);

        self.path.push(item);
        for input in &recipe.inputs {
            let scaled = self.scale(input.quantity, quantity)?;
            self.visit(&input.item, scaled)?;
        }
        for (byproduct, per_unit) in &recipe.byproducts {
            let scaled = self.scale(*per_unit, quantity)?;
            accumulate(&mut self.plan.credits, byproduct, scaled);
        }
        self.path.pop();

        Ok(())
    }

    fn scale(&self, per_unit: f64, quantity: f64) -> Result<f64, ExpansionError> {
        let scaled = per_unit * quantity;
        if scaled.is_finite() {
            Ok(scaled)
        } else {
            Err(ExpansionError::InvalidQuantity(self.requested))
        }
    }
}

fn accumulate(map: &mut BTreeMap<String, f64>, item: &str, amount: f64) {
    if let Some(total) = map.get_mut(item) {
        *total += amount;
    } else {
        map.insert(item.to_string(), amount);
    }
}

fn prune_negligible(map: &mut BTreeMap<String, f64>) {
    map.retain(|_, amount| amount.abs() >= EPSILON);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{reference_book, Recipe, LEEKS};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    // =========================================================================
    // Preconditions
    // =========================================================================

    #[test]
    fn test_zero_quantity_is_empty_plan() {
        let plan = expand(reference_book(), "Ultraleeks", 0.0).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = expand(reference_book(), "Leek Teas", -1.0).unwrap_err();
        assert_eq!(err, ExpansionError::InvalidQuantity(-1.0));
    }

    #[test]
    fn test_non_finite_quantity_rejected() {
        assert!(matches!(
            expand(reference_book(), "Leek Teas", f64::NAN),
            Err(ExpansionError::InvalidQuantity(_))
        ));
        assert!(matches!(
            expand(reference_book(), "Leek Teas", f64::INFINITY),
            Err(ExpansionError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_scaled_overflow_rejected() {
        let err = expand(reference_book(), "Ultraleeks", 1e304).unwrap_err();
        assert_eq!(err, ExpansionError::InvalidQuantity(1e304));
    }

    #[test]
    fn test_accumulated_overflow_rejected() {
        let book = RecipeBook::new()
            .with_recipe(Recipe::new("pair").with_input("ore", 1.0).with_input("ore", 1.0))
            .with_base_resource("ore");
        let quantity = f64::MAX * 0.75;

        let err = expand(&book, "pair", quantity).unwrap_err();
        assert_eq!(err, ExpansionError::InvalidQuantity(quantity));
    }

    // =========================================================================
    // Reference configuration
    // =========================================================================

    #[test]
    fn test_base_resource_request() {
        let plan = expand(reference_book(), LEEKS, 42.0).unwrap();
        assert!(plan.crafts.is_empty());
        assert!(plan.credits.is_empty());
        assert_eq!(plan.base.len(), 1);
        assert_close(plan.required(LEEKS), 42.0);
    }

    #[test]
    fn test_leek_teas() {
        let plan = expand(reference_book(), "Leek Teas", 1.0).unwrap();
        assert_eq!(plan.crafts.len(), 1);
        assert_close(plan.crafted("Leek Teas"), 1.0);
        assert_eq!(plan.base.len(), 1);
        assert_close(plan.required(LEEKS), 10.0);
        assert!(plan.credits.is_empty());
    }

    #[test]
    fn test_leek_cakes() {
        let plan = expand(reference_book(), "Leek Cakes", 1.0).unwrap();
        assert_eq!(plan.crafts.len(), 2);
        assert_close(plan.crafted("Leek Cakes"), 1.0);
        assert_close(plan.crafted("Leek Teas"), 10.0);
        assert_close(plan.required(LEEKS), 100.0);
        assert!(plan.credits.is_empty());
    }

    #[test]
    fn test_atomic_leeks_merges_branches() {
        // 10 cakes need 100 teas, plus 25 direct teas
        let plan = expand(reference_book(), "Atomic Leeks", 1.0).unwrap();
        assert_close(plan.crafted("Leek Cakes"), 10.0);
        assert_close(plan.crafted("Leek Teas"), 125.0);
        assert_close(plan.required(LEEKS), 1250.0);
    }

    #[test]
    fn test_golden_leeks_credits_teas() {
        let plan = expand(reference_book(), "Golden Leeks", 1.0).unwrap();

        // Teas: 10 atomic * 125 + 50 cakes * 10
        assert_close(plan.crafted("Atomic Leeks"), 10.0);
        assert_close(plan.crafted("Leek Cakes"), 150.0);
        assert_close(plan.crafted("Leek Teas"), 1750.0);
        assert_close(plan.crafted("Barrel of Leeks"), 0.2);
        assert_close(plan.required(LEEKS), 17_500.0 + 2_000.0);
        assert_close(plan.credited("Leek Teas"), 500.0);

        // Leek Teas is crafted, not gathered, so it nets to a surplus
        let totals = plan.net_totals();
        assert_close(totals["Leeks"], 19_500.0);
        assert_close(totals["Leek Teas"], -500.0);
    }

    #[test]
    fn test_ultraleeks_credits_leeks() {
        let plan = expand(reference_book(), "Ultraleeks", 1.0).unwrap();
        assert_close(plan.credited(LEEKS), 100_000.0);

        let totals = plan.net_totals();
        assert_close(plan.required(LEEKS) - totals[LEEKS], 100_000.0);
        assert_close(totals["Leek Teas"], -5_000.0);
    }

    #[test]
    fn test_scaling_is_linear() {
        let one = expand(reference_book(), "Golden Leeks", 1.0).unwrap();
        let half = expand(reference_book(), "Golden Leeks", 0.5).unwrap();
        for (item, amount) in &one.crafts {
            assert_close(half.crafted(item), amount / 2.0);
        }
        assert_close(half.credited("Leek Teas"), 250.0);
    }

    // =========================================================================
    // Graph shapes
    // =========================================================================

    #[test]
    fn test_two_node_cycle_detected() {
        let book = RecipeBook::new()
            .with_recipe(Recipe::new("A").with_input("B", 1.0))
            .with_recipe(Recipe::new("B").with_input("A", 1.0));

        let err = expand(&book, "A", 3.0).unwrap_err();
        assert_eq!(
            err,
            ExpansionError::Cycle {
                item: "A".to_string(),
                path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            }
        );
        assert_eq!(err.to_string(), "Crafting loop at 'A': A -> B -> A");
    }

    #[test]
    fn test_self_cycle_detected() {
        let book = RecipeBook::new().with_recipe(Recipe::new("A").with_input("A", 0.5));
        assert!(matches!(
            expand(&book, "A", 1.0),
            Err(ExpansionError::Cycle { .. })
        ));
    }

    #[test]
    fn test_cycle_behind_zero_quantity_input_is_inert() {
        let book = RecipeBook::new()
            .with_recipe(Recipe::new("A").with_input("B", 0.0).with_input("X", 1.0))
            .with_recipe(Recipe::new("B").with_input("A", 1.0));
        let plan = expand(&book, "A", 1.0).unwrap();
        assert_close(plan.required("X"), 1.0);
        assert!(!plan.crafts.contains_key("B"));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let book = RecipeBook::new()
            .with_recipe(Recipe::new("A").with_input("B", 1.0).with_input("C", 2.0))
            .with_recipe(Recipe::new("B").with_input("D", 1.0))
            .with_recipe(Recipe::new("C").with_input("D", 1.0))
            .with_recipe(Recipe::new("D").with_input("ore", 4.0));

        let plan = expand(&book, "A", 1.0).unwrap();
        assert_close(plan.crafted("D"), 3.0);
        assert_close(plan.required("ore"), 12.0);
    }

    #[test]
    fn test_recipe_without_inputs() {
        let book = RecipeBook::new().with_recipe(Recipe::new("Gift").with_byproduct("Coin", 2.0));
        let plan = expand(&book, "Gift", 3.0).unwrap();
        assert_close(plan.crafted("Gift"), 3.0);
        assert!(plan.base.is_empty());
        assert_close(plan.credited("Coin"), 6.0);
        assert_close(plan.net_totals()["Coin"], -6.0);
    }

    // =========================================================================
    // Netting and pruning
    // =========================================================================

    #[test]
    fn test_negligible_amounts_pruned() {
        let book = RecipeBook::new().with_recipe(
            Recipe::new("A")
                .with_input("dust", 1e-12)
                .with_input("ore", 1.0),
        );
        let plan = expand(&book, "A", 1.0).unwrap();
        assert!(!plan.base.contains_key("dust"));
        assert_close(plan.required("ore"), 1.0);
    }

    #[test]
    fn test_net_totals_cancel_exactly() {
        let book = RecipeBook::new()
            .with_recipe(Recipe::new("A").with_input("ore", 5.0).with_byproduct("ore", 5.0));
        let plan = expand(&book, "A", 1.0).unwrap();
        assert_close(plan.required("ore"), 5.0);
        assert_close(plan.credited("ore"), 5.0);
        assert!(plan.net_totals().is_empty());
    }

    #[test]
    fn test_net_totals_of_empty_plan() {
        assert!(net_totals(&Plan::new()).is_empty());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ExpansionError::InvalidQuantity(-2.0).to_string(),
            "Invalid quantity -2: must be a finite, non-negative number"
        );
    }
}
