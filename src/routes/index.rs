use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::info;

use crate::models::ApiResponse;
use crate::state::AppState;

pub const API_NAME: &str = "Mock Stock Market API";

const ENDPOINTS: [(&str, &str); 7] = [
    ("/api/stocks", "Get list of all available stocks"),
    ("/api/stocks/:symbol", "Get details for a specific stock"),
    ("/api/stocks/:symbol/history", "Get price history for a stock"),
    ("/api/stocks/:symbol/intraday", "Get intraday price data"),
    ("/api/stocks/:symbol/news", "Get news related to a stock"),
    ("/api/market/summary", "Get overall market summary"),
    ("/api/watchlist", "Manage user watchlist (POST to add, DELETE to remove)"),
];

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiIndex {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_index))
}

async fn api_index() -> Json<ApiResponse<ApiIndex>> {
    info!("GET / - API index");
    Json(ApiResponse::ok(ApiIndex {
        name: API_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(path, description)| EndpointInfo { path, description })
            .collect(),
    }))
}
