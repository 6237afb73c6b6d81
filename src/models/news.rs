use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated headline attached to a single stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub date: DateTime<Utc>,
    pub headline: String,
    pub source: String,
    pub url: String,
    pub summary: String,
}
