use mock_stock_api::config::ServerConfig;
use mock_stock_api::logging::{init_logging, LoggingConfig};
use mock_stock_api::services::job_scheduler_service::JobSchedulerService;
use mock_stock_api::store::MarketStore;
use mock_stock_api::{create_app, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = ServerConfig::from_env();

    let state = AppState::new(MarketStore::initialize());

    let mut scheduler = JobSchedulerService::new(
        state.store.clone(),
        &config.price_update_schedule,
    ).await?;
    scheduler.start().await?;

    let app = create_app(state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Mock Stock API running at http://{}/", addr);
    tracing::info!("Try these endpoints:");
    for path in ["/api/stocks", "/api/stocks/AAPL", "/api/market/summary"] {
        tracing::info!("  - http://localhost:{}{}", config.port, path);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
