//! Tolerance-based assertions for floating-point plan amounts.

use std::collections::{BTreeMap, BTreeSet};

/// Default absolute tolerance for comparing amounts in tests.
pub const TOLERANCE: f64 = 1e-6;

/// Check if two amounts agree within a tolerance scaled by their magnitude.
#[must_use]
pub fn amounts_close(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= TOLERANCE * scale
}

/// Describe every key whose amounts differ, treating missing keys as zero.
///
/// Returns an empty list when the maps agree.
#[must_use]
pub fn map_differences(
    actual: &BTreeMap<String, f64>,
    expected: &BTreeMap<String, f64>,
) -> Vec<String> {
    let keys: BTreeSet<&String> = actual.keys().chain(expected.keys()).collect();
    keys.into_iter()
        .filter_map(|key| {
            let a = actual.get(key).copied().unwrap_or(0.0);
            let e = expected.get(key).copied().unwrap_or(0.0);
            (!amounts_close(a, e)).then(|| format!("{key}: expected {e}, got {a}"))
        })
        .collect()
}

/// Assert two amount maps agree within tolerance.
///
/// # Panics
///
/// Panics listing every differing key.
pub fn assert_maps_close(actual: &BTreeMap<String, f64>, expected: &BTreeMap<String, f64>) {
    let differences = map_differences(actual, expected);
    assert!(
        differences.is_empty(),
        "amount maps differ:\n  {}",
        differences.join("\n  ")
    );
}

/// Sum two amount maps key by key.
#[must_use]
pub fn sum_maps(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let mut total = a.clone();
    for (key, amount) in b {
        *total.entry(key.clone()).or_insert(0.0) += amount;
    }
    total
}

/// Build an amount map from `(item, amount)` pairs.
#[must_use]
pub fn amounts(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs
        .iter()
        .map(|(item, amount)| ((*item).to_string(), *amount))
        .collect()
}
