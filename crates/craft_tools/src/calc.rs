//! Plan calculation for the command line.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use craft_core::data::resolve_recipe_book;
use craft_core::error::Result;
use craft_core::plan_for;
use craft_core::recipe::RecipeBook;
use craft_core::report::{PlanReport, DEFAULT_PRECISION};

/// Output format of `calc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text tables.
    #[default]
    Text,
    /// Pretty-printed JSON, same shape as the HTTP endpoint.
    Json,
}

/// Resolve the recipe book for a command.
///
/// Uses `recipes` when given, otherwise the same default lookup as the server
/// (`CRAFT_RECIPES_PATH`, standard asset paths, then the reference book).
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read, parsed or validated.
pub fn load_book(recipes: Option<&Path>) -> Result<RecipeBook> {
    Ok(resolve_recipe_book(recipes)?)
}

/// Compute a rounded report for `quantity` units of `item`.
///
/// # Errors
///
/// Returns an error for unknown items, invalid quantities or crafting loops.
pub fn calculate(book: &RecipeBook, item: &str, quantity: f64) -> Result<PlanReport> {
    let plan = plan_for(book, item, quantity)?;
    Ok(PlanReport::new(item, quantity, &plan, DEFAULT_PRECISION))
}

/// Render a report in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &PlanReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

/// Render a report as text tables.
#[must_use]
pub fn render_text(report: &PlanReport) -> String {
    let mut out = format!("Plan for {} x {}\n", report.qty, report.item);
    push_section(&mut out, "Crafts", &report.crafts);
    push_section(&mut out, "Base resources", &report.base);
    push_section(&mut out, "Byproduct credits", &report.credits);
    push_section(&mut out, "Net totals", &report.totals);
    out
}

fn push_section(out: &mut String, title: &str, amounts: &BTreeMap<String, f64>) {
    let _ = write!(out, "\n{title}:\n");
    if amounts.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    let width = amounts.keys().map(String::len).max().unwrap_or(0);
    for (item, amount) in amounts {
        let _ = writeln!(out, "  {item:<width$}  {amount:>14}");
    }
}
