use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MostActiveStock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStats {
    pub advancers: usize,
    pub decliners: usize,
    pub unchanged: usize,
    pub most_active: Vec<MostActiveStock>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub indices: Vec<MarketIndex>,
    pub market_stats: MarketStats,
    pub timestamp: DateTime<Utc>,
}
