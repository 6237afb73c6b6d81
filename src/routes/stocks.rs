use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{
    ApiResponse, HistoryQueryParams, HistoryRange, IntradaySeries, NewsItem, PriceHistory,
    StockDetail, StockQuote,
};
use crate::services::quote_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/:symbol", get(get_stock))
        .route("/:symbol/history", get(get_history))
        .route("/:symbol/intraday", get(get_intraday))
        .route("/:symbol/news", get(get_news))
}

fn log_lookup_failure(symbol: &str, e: AppError) -> AppError {
    match &e {
        AppError::NotFound(_) => warn!("Unknown stock symbol requested: {}", symbol),
        _ => tracing::error!("Failed to serve data for {}: {}", symbol, e),
    }
    e
}

pub async fn list_stocks(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<StockQuote>>>> {
    info!("GET /api/stocks - Listing all stocks");
    let quotes = {
        let store = state.store.read();
        quote_service::list_quotes(&store)?
    };
    Ok(Json(ApiResponse::ok(quotes)))
}

pub async fn get_stock(
    Path(symbol): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StockDetail>>> {
    info!("GET /api/stocks/{} - Getting stock details", symbol);
    let detail = {
        let store = state.store.read();
        quote_service::stock_detail(&store, &mut rand::rng(), &symbol)
    }
    .map_err(|e| log_lookup_failure(&symbol, e))?;
    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn get_history(
    Path(symbol): Path<String>,
    Query(params): Query<HistoryQueryParams>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PriceHistory>>> {
    let range = HistoryRange::parse(params.range.as_deref());
    info!("GET /api/stocks/{}/history - Getting price history ({:?})", symbol, range);
    let history = {
        let store = state.store.read();
        quote_service::price_history(&store, &mut rand::rng(), &symbol, range)
    }
    .map_err(|e| log_lookup_failure(&symbol, e))?;
    Ok(Json(ApiResponse::ok(history)))
}

pub async fn get_intraday(
    Path(symbol): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<IntradaySeries>>> {
    info!("GET /api/stocks/{}/intraday - Simulating intraday prices", symbol);
    let series = {
        let store = state.store.read();
        quote_service::intraday(&store, &mut rand::rng(), &symbol, Local::now())
    }
    .map_err(|e| log_lookup_failure(&symbol, e))?;
    Ok(Json(ApiResponse::ok(series)))
}

pub async fn get_news(
    Path(symbol): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<NewsItem>>>> {
    info!("GET /api/stocks/{}/news - Getting stock news", symbol);
    let news = {
        let store = state.store.read();
        quote_service::stock_news(&store, &symbol)
    }
    .map_err(|e| log_lookup_failure(&symbol, e))?;
    Ok(Json(ApiResponse::ok(news)))
}
