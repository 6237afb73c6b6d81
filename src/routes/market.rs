use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppResult;
use crate::models::{ApiResponse, MarketSummary};
use crate::services::quote_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_market_summary))
}

/// GET /api/market/summary
///
/// Index levels are re-drawn on every request; breadth and most-active
/// figures come from the stored price history.
pub async fn get_market_summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<MarketSummary>>> {
    info!("GET /api/market/summary - Building market summary");
    let summary = {
        let store = state.store.read();
        quote_service::market_summary(&store, &mut rand::rng())
    }
    .map_err(|e| {
        error!("Failed to build market summary: {}", e);
        e
    })?;
    Ok(Json(ApiResponse::ok(summary)))
}
