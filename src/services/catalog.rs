//! The fixed universe of listed stocks and their seed prices.

use crate::models::Stock;

/// Seed price used for symbols missing from the table.
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

// (symbol, name, sector, base price)
const LISTINGS: [(&str, &str, &str, f64); 10] = [
    ("AAPL", "Apple Inc.", "Technology", 175.0),
    ("MSFT", "Microsoft Corporation", "Technology", 330.0),
    ("AMZN", "Amazon.com Inc.", "Consumer Discretionary", 140.0),
    ("GOOGL", "Alphabet Inc.", "Communication Services", 175.0),
    ("META", "Meta Platforms Inc.", "Communication Services", 300.0),
    ("TSLA", "Tesla Inc.", "Consumer Discretionary", 250.0),
    ("JPM", "JPMorgan Chase & Co.", "Financials", 150.0),
    ("V", "Visa Inc.", "Financials", 240.0),
    ("JNJ", "Johnson & Johnson", "Healthcare", 160.0),
    ("WMT", "Walmart Inc.", "Consumer Staples", 65.0),
];

/// All listed stocks, in listing order.
pub fn all_stocks() -> Vec<Stock> {
    LISTINGS
        .iter()
        .map(|(symbol, name, sector, _)| Stock {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
        })
        .collect()
}

/// Seed price for the first generated trading day.
pub fn base_price(symbol: &str) -> f64 {
    LISTINGS
        .iter()
        .find(|(s, ..)| s.eq_ignore_ascii_case(symbol))
        .map(|(.., price)| *price)
        .unwrap_or(DEFAULT_BASE_PRICE)
}

/// Canonical form of a user-supplied symbol.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
