//! Walks every endpoint of a running mock stock API and prints the responses.
//!
//! Point it at a server with `API_URL` (default `http://localhost:3000`).

use anyhow::{bail, Context, Result};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use tracing::{error, info};

const DEFAULT_API_URL: &str = "http://localhost:3000";

struct DemoClient {
    http: Client,
    base_url: String,
}

impl DemoClient {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error! Status: {}", status);
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("invalid JSON from {}", url))
    }

    /// Run one call and print the outcome. Failures are reported, not fatal.
    async fn show(&self, label: &str, method: Method, path: &str, body: Option<Value>) {
        info!("📊 {} {}...", label, path);
        match self.send(method, path, body).await {
            Ok(data) => match serde_json::to_string_pretty(&data) {
                Ok(pretty) => println!("✅ Success! Response:\n{}", pretty),
                Err(e) => error!("❌ Could not format response: {}", e),
            },
            Err(e) => error!("❌ Error: {:#}", e),
        }
    }

    async fn fetch(&self, path: &str) {
        self.show("Fetching", Method::GET, path, None).await;
    }

    async fn add_to_watchlist(&self, symbol: &str) {
        let body = json!({ "symbol": symbol });
        self.show("Adding to watchlist via", Method::POST, "/api/watchlist", Some(body))
            .await;
    }

    async fn remove_from_watchlist(&self, symbol: &str) {
        let path = format!("/api/watchlist/{}", symbol);
        self.show("Removing from watchlist via", Method::DELETE, &path, None)
            .await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let base_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = DemoClient::new(base_url);
    info!("🚀 Starting API test for {}", client.base_url);

    for path in [
        "/",
        "/api/stocks",
        "/api/stocks/NIFTY50",
        "/api/stocks/AAPL/history",
        "/api/stocks/AAPL/history?range=5d",
        "/api/stocks/AAPL/intraday",
        "/api/stocks/AAPL/news",
        "/api/market/summary",
    ] {
        client.fetch(path).await;
    }

    client.fetch("/api/watchlist").await;
    client.add_to_watchlist("AAPL").await;
    client.add_to_watchlist("MSFT").await;
    client.fetch("/api/watchlist").await;
    client.remove_from_watchlist("AAPL").await;
    client.fetch("/api/watchlist").await;

    info!("🏁 API testing completed!");
    Ok(())
}
