//! HTTP routes and handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use craft_core::expansion::{expand, ExpansionError};
use craft_core::recipe::RecipeBook;
use craft_core::report::PlanReport;
use serde::Deserialize;

/// Quantity used when `qty` is missing or not a number.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Shared, read-only handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    book: Arc<RecipeBook>,
    precision: u32,
}

impl AppState {
    /// Create handler state serving `book`.
    #[must_use]
    pub fn new(book: Arc<RecipeBook>, precision: u32) -> Self {
        Self { book, precision }
    }
}

/// Query parameters of `/api/calc`.
#[derive(Debug, Default, Deserialize)]
pub struct CalcQuery {
    /// Item to craft.
    pub item: Option<String>,
    /// Quantity as sent by the client; parsed leniently.
    pub qty: Option<String>,
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/recipes", get(list_recipes))
        .route("/api/calc", get(calculate))
        .with_state(state)
}

/// Parse a client quantity, falling back to [`DEFAULT_QUANTITY`].
#[must_use]
pub fn parse_quantity(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(DEFAULT_QUANTITY)
}

async fn health_check() -> &'static str {
    "ok"
}

/// `GET /api/recipes`
pub async fn list_recipes(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.book.all_items())
}

/// `GET /api/calc`
pub async fn calculate(
    State(state): State<AppState>,
    Query(query): Query<CalcQuery>,
) -> Result<Json<PlanReport>, (StatusCode, String)> {
    let qty = parse_quantity(query.qty.as_deref());
    let item = match query.item {
        Some(item) if !item.is_empty() && state.book.contains(&item) => item,
        other => {
            tracing::debug!("Rejected calc request for unknown item {other:?}");
            return Err((StatusCode::BAD_REQUEST, "unknown item".to_string()));
        }
    };

    match expand(&state.book, &item, qty) {
        Ok(plan) => {
            tracing::debug!("Computed plan for {qty} x {item}");
            Ok(Json(PlanReport::new(item, qty, &plan, state.precision)))
        }
        Err(e @ ExpansionError::InvalidQuantity(_)) => {
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e @ ExpansionError::Cycle { .. }) => {
            tracing::error!("Recipe data error while expanding {item}: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::recipe::{reference_book, LEEKS};
    use craft_test_utils::fixtures::cyclic_book;

    fn reference_state() -> AppState {
        AppState::new(Arc::new(reference_book().clone()), 6)
    }

    async fn calc(
        state: AppState,
        item: Option<&str>,
        qty: Option<&str>,
    ) -> Result<Json<PlanReport>, (StatusCode, String)> {
        let query = CalcQuery {
            item: item.map(str::to_string),
            qty: qty.map(str::to_string),
        };
        calculate(State(state), Query(query)).await
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(Some("2.5")), 2.5);
        assert_eq!(parse_quantity(Some(" 3 ")), 3.0);
        assert_eq!(parse_quantity(Some("lots")), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(Some("")), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(None), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(Some("-4")), -4.0);
    }

    #[tokio::test]
    async fn test_list_recipes() {
        let Json(items) = list_recipes(State(reference_state())).await;
        assert_eq!(items.len(), 7);
        assert_eq!(items.first().map(String::as_str), Some("Atomic Leeks"));
        assert!(items.iter().any(|i| i == LEEKS));
    }

    #[tokio::test]
    async fn test_calculate_leek_cakes() {
        let Json(report) = calc(reference_state(), Some("Leek Cakes"), Some("2")).await.unwrap();

        assert_eq!(report.item, "Leek Cakes");
        assert_eq!(report.qty, 2.0);
        assert_eq!(report.crafts["Leek Teas"], 20.0);
        assert_eq!(report.base[LEEKS], 200.0);
        assert!(report.credits.is_empty());
        assert_eq!(report.totals[LEEKS], 200.0);
    }

    #[tokio::test]
    async fn test_calculate_defaults_quantity() {
        let Json(report) = calc(reference_state(), Some("Leek Teas"), Some("abc")).await.unwrap();
        assert_eq!(report.qty, 1.0);
        assert_eq!(report.base[LEEKS], 10.0);
    }

    #[tokio::test]
    async fn test_calculate_base_resource() {
        let Json(report) = calc(reference_state(), Some(LEEKS), Some("5")).await.unwrap();
        assert!(report.crafts.is_empty());
        assert_eq!(report.base[LEEKS], 5.0);
    }

    #[tokio::test]
    async fn test_calculate_unknown_item() {
        for item in [None, Some(""), Some("Onions")] {
            let (status, body) = calc(reference_state(), item, None).await.unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, "unknown item");
        }
    }

    #[tokio::test]
    async fn test_calculate_negative_quantity() {
        let (status, body) = calc(reference_state(), Some("Leek Teas"), Some("-1"))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Invalid quantity"));
    }

    #[tokio::test]
    async fn test_calculate_cycle_is_server_error() {
        let state = AppState::new(Arc::new(cyclic_book()), 6);
        let (status, body) = calc(state, Some("A"), Some("1")).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Crafting loop at 'A': A -> B -> A");
    }

    #[tokio::test]
    async fn test_report_json_shape() {
        let Json(report) = calc(reference_state(), Some("Golden Leeks"), None).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();

        for field in ["item", "qty", "crafts", "base", "credits", "totals"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["credits"]["Leek Teas"], 500.0);
        assert_eq!(json["totals"]["Leek Teas"], -500.0);
    }
}
