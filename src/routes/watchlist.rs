use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{AddWatchlistItemRequest, ApiResponse, StockQuote, WatchlistQueryParams};
use crate::services::{catalog, quote_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_watchlist).post(add_to_watchlist))
        .route("/:symbol", delete(remove_from_watchlist))
}

/// GET /api/watchlist?userId=...
///
/// Each watched symbol enriched with its current price movement.
pub async fn get_watchlist(
    Query(params): Query<WatchlistQueryParams>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<StockQuote>>>> {
    let user_id = params.user_id();
    info!("GET /api/watchlist - Getting watchlist for user {}", user_id);

    let symbols = state.watchlists.get_or_create(user_id);
    let quotes = {
        let store = state.store.read();
        quote_service::quotes_for_symbols(&store, &symbols)?
    };
    Ok(Json(ApiResponse::ok(quotes)))
}

/// POST /api/watchlist?userId=...  body: `{ "symbol": "AAPL" }`
pub async fn add_to_watchlist(
    Query(params): Query<WatchlistQueryParams>,
    State(state): State<AppState>,
    payload: Result<Json<AddWatchlistItemRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let user_id = params.user_id();
    info!("POST /api/watchlist - Adding to watchlist for user {}", user_id);

    let Json(req) = payload.map_err(|rejection| {
        warn!("Rejected watchlist body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    let symbol = req
        .symbol
        .as_deref()
        .map(catalog::normalize_symbol)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Symbol is required".to_string()))?;

    if state.store.read().find_stock(&symbol).is_none() {
        warn!("Cannot add unknown symbol {} to watchlist", symbol);
        return Err(AppError::stock_not_found());
    }

    let list = state.watchlists.add(user_id, &symbol);
    info!("✅ {} added to watchlist for user {} ({} symbols)", symbol, user_id, list.len());
    Ok(Json(ApiResponse::ok_with_message(
        list,
        format!("{} added to watchlist", symbol),
    )))
}

/// DELETE /api/watchlist/:symbol?userId=...
pub async fn remove_from_watchlist(
    Path(symbol): Path<String>,
    Query(params): Query<WatchlistQueryParams>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let user_id = params.user_id();
    let symbol = catalog::normalize_symbol(&symbol);
    info!("DELETE /api/watchlist/{} - Removing from watchlist for user {}", symbol, user_id);

    let list = state.watchlists.remove(user_id, &symbol).ok_or_else(|| {
        warn!("No watchlist exists for user {}", user_id);
        AppError::NotFound("Watchlist not found".to_string())
    })?;

    Ok(Json(ApiResponse::ok_with_message(
        list,
        format!("{} removed from watchlist", symbol),
    )))
}
