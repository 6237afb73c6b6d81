use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Static listing metadata, fixed for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub sector: String,
}

/// A stock with its latest price movement, as returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    #[serde(flatten)]
    pub stock: Stock,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Full stock view with synthetic fundamentals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    #[serde(flatten)]
    pub stock: Stock,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub market_cap: f64,
    pub pe: f64,
    pub eps: f64,
    pub dividend: f64,
    pub dividend_yield: f64,
    #[serde(rename = "high52Week")]
    pub high_52_week: f64,
    #[serde(rename = "low52Week")]
    pub low_52_week: f64,
    pub volume: u64,
    pub avg_volume: u64,
    pub updated_at: DateTime<Utc>,
}
