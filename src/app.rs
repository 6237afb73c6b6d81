use axum::http::Uri;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::errors::AppError;
use crate::routes::{health, index, market, stocks, watchlist};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::<AppState>::new()
        .merge(index::router())
        .nest("/health", health::router())
        .nest("/api/stocks", stocks::router())
        .nest("/api/market", market::router())
        .nest("/api/watchlist", watchlist::router())
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn unknown_route(uri: Uri) -> AppError {
    warn!("No route for {}", uri);
    AppError::NotFound("Endpoint not found".to_string())
}
