use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// One trading day of OHLCV data for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,        // YYYY-MM-DD
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    pub symbol: String,
    pub name: String,
    pub history: Vec<PriceBar>,
}

/// A single simulated 5-minute intraday print
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntradayTick {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntradaySeries {
    pub symbol: String,
    pub name: String,
    pub interval: String,
    pub intraday: Vec<IntradayTick>,
}

/// Window selector accepted by the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    /// Anything unrecognised: the full stored history.
    All,
}

impl HistoryRange {
    /// A missing `range` means one month; an unknown one means everything.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => HistoryRange::OneMonth,
            Some("1d") => HistoryRange::OneDay,
            Some("5d") => HistoryRange::FiveDays,
            Some("1m") => HistoryRange::OneMonth,
            Some("3m") => HistoryRange::ThreeMonths,
            Some(_) => HistoryRange::All,
        }
    }

    /// Number of trailing stored bars the range selects, `None` for all of them.
    pub fn trailing_bars(&self) -> Option<usize> {
        match self {
            HistoryRange::OneDay => Some(1),
            HistoryRange::FiveDays => Some(5),
            HistoryRange::OneMonth | HistoryRange::ThreeMonths => Some(30),
            HistoryRange::All => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQueryParams {
    pub range: Option<String>,
}
