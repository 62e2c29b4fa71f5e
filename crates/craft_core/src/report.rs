//! Display-ready plan reports.
//!
//! Rounds plan amounts for presentation and bundles them with the derived
//! net totals. This is the shape served by the HTTP endpoint and printed by
//! `craft-tools calc --json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expansion::Plan;

/// Default number of decimal places in reports.
pub const DEFAULT_PRECISION: u32 = 6;

/// Round `value` to `places` decimal places, halves toward positive infinity.
///
/// `-0.5` at zero places becomes `-0.0`, not `-1.0`.
#[must_use]
pub fn round_amount(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    let rounded = (value * scale + 0.5).floor() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Round every amount in a map.
#[must_use]
pub fn round_map(map: &BTreeMap<String, f64>, places: u32) -> BTreeMap<String, f64> {
    map.iter()
        .map(|(item, amount)| (item.clone(), round_amount(*amount, places)))
        .collect()
}

/// Rounded view of a plan for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// Requested item.
    pub item: String,
    /// Requested quantity.
    pub qty: f64,
    /// Units to craft per item.
    pub crafts: BTreeMap<String, f64>,
    /// Base resources to gather, before credits.
    pub base: BTreeMap<String, f64>,
    /// Byproduct credits.
    pub credits: BTreeMap<String, f64>,
    /// Net requirement per item (base - credits).
    pub totals: BTreeMap<String, f64>,
}

impl PlanReport {
    /// Build a report, rounding all amounts to `precision` decimal places.
    #[must_use]
    pub fn new(item: impl Into<String>, qty: f64, plan: &Plan, precision: u32) -> Self {
        Self {
            item: item.into(),
            qty,
            crafts: round_map(&plan.crafts, precision),
            base: round_map(&plan.base, precision),
            credits: round_map(&plan.credits, precision),
            totals: round_map(&plan.net_totals(), precision),
        }
    }
}
