//! Request-time views over the market store.
//!
//! Nothing here mutates stored history: changes, fundamentals, range
//! windows and the market summary are all derived per call.

use chrono::{DateTime, Days, Months, NaiveDate, TimeZone, Utc};
use rand::Rng;
use tracing::error;

use crate::errors::{AppError, AppResult};
use crate::models::{
    HistoryRange, IntradaySeries, MarketIndex, MarketStats, MarketSummary, MostActiveStock,
    NewsItem, PriceBar, PriceHistory, Stock, StockDetail, StockQuote,
};
use crate::services::price_service;
use crate::store::MarketStore;
use crate::utils::round2;

pub const INTRADAY_INTERVAL: &str = "5min";
const MOST_ACTIVE_COUNT: usize = 3;
const SYNTHETIC_MONTHS: u32 = 2;

// (symbol, name, floor, spread)
const INDICES: [(&str, &str, f64, f64); 3] = [
    ("^DJI", "Dow Jones Industrial Average", 38_000.0, 1_000.0),
    ("^SPX", "S&P 500", 5_000.0, 100.0),
    ("^IXIC", "NASDAQ Composite", 16_000.0, 500.0),
];

/// Latest close and its move against the prior session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl PriceChange {
    /// `None` unless there are at least two bars to compare.
    pub fn from_history(history: &[PriceBar]) -> Option<Self> {
        let [.., prev, last] = history else {
            return None;
        };
        let change = round2(last.close - prev.close);
        Some(Self {
            price: last.close,
            change,
            change_percent: round2(change / prev.close * 100.0),
        })
    }
}

fn stock_or_not_found<'a>(store: &'a MarketStore, symbol: &str) -> AppResult<&'a Stock> {
    store.find_stock(symbol).ok_or_else(AppError::stock_not_found)
}

fn history_for<'a>(store: &'a MarketStore, stock: &Stock) -> AppResult<&'a [PriceBar]> {
    store.history(&stock.symbol).ok_or_else(|| {
        error!("No price history stored for listed stock {}", stock.symbol);
        AppError::Internal(format!("missing price history for {}", stock.symbol))
    })
}

fn change_for(store: &MarketStore, stock: &Stock) -> AppResult<PriceChange> {
    PriceChange::from_history(history_for(store, stock)?).ok_or_else(|| {
        error!("Not enough bars to compute change for {}", stock.symbol);
        AppError::Internal(format!("insufficient price history for {}", stock.symbol))
    })
}

fn quote(
    store: &MarketStore,
    stock: &Stock,
    updated_at: Option<DateTime<Utc>>,
) -> AppResult<StockQuote> {
    let change = change_for(store, stock)?;
    Ok(StockQuote {
        stock: stock.clone(),
        price: change.price,
        change: change.change,
        change_percent: change.change_percent,
        updated_at,
    })
}

/// Every listed stock with its current price movement.
pub fn list_quotes(store: &MarketStore) -> AppResult<Vec<StockQuote>> {
    let now = Utc::now();
    store
        .stocks()
        .iter()
        .map(|stock| quote(store, stock, Some(now)))
        .collect()
}

/// Quotes for the given symbols, skipping any that are not listed.
pub fn quotes_for_symbols(store: &MarketStore, symbols: &[String]) -> AppResult<Vec<StockQuote>> {
    symbols
        .iter()
        .filter_map(|symbol| store.find_stock(symbol))
        .map(|stock| quote(store, stock, None))
        .collect()
}

/// Stock view with synthetic fundamentals, re-drawn on every call.
pub fn stock_detail<R: Rng>(
    store: &MarketStore,
    rng: &mut R,
    symbol: &str,
) -> AppResult<StockDetail> {
    let stock = stock_or_not_found(store, symbol)?;
    let history = history_for(store, stock)?;
    let change = change_for(store, stock)?;
    let last_close = change.price;

    let pe = round2(rng.random_range(15.0..35.0));
    let dividend = round2(last_close * rng.random_range(0.0..0.03));
    let total_volume: u64 = history.iter().map(|bar| bar.volume).sum();

    Ok(StockDetail {
        stock: stock.clone(),
        price: last_close,
        change: change.change,
        change_percent: change.change_percent,
        market_cap: round2(last_close * rng.random_range(10.0..15.0) * 1_000_000_000.0),
        pe,
        eps: round2(last_close / pe),
        dividend,
        dividend_yield: round2(dividend / last_close * 100.0),
        high_52_week: round2(last_close * 1.2),
        low_52_week: round2(last_close * 0.8),
        volume: history.last().map(|bar| bar.volume).unwrap_or_default(),
        avg_volume: total_volume / history.len().max(1) as u64,
        updated_at: Utc::now(),
    })
}

/// Price history trimmed (or, for three months, extended) to `range`.
pub fn price_history<R: Rng>(
    store: &MarketStore,
    rng: &mut R,
    symbol: &str,
    range: HistoryRange,
) -> AppResult<PriceHistory> {
    let stock = stock_or_not_found(store, symbol)?;
    let stored = history_for(store, stock)?;

    let window = match range.trailing_bars() {
        Some(n) => &stored[stored.len().saturating_sub(n)..],
        None => stored,
    };

    let history = if range == HistoryRange::ThreeMonths {
        with_synthetic_months(rng, window)
    } else {
        window.to_vec()
    };

    Ok(PriceHistory {
        symbol: stock.symbol.clone(),
        name: stock.name.clone(),
        history,
    })
}

/// Prepend jittered copies of `window` for each of the previous months.
///
/// Each block ends on the last window date shifted back by its month count,
/// pulled earlier when needed so it finishes before the following block
/// starts. Dates inside a block are consecutive days.
fn with_synthetic_months<R: Rng>(rng: &mut R, window: &[PriceBar]) -> Vec<PriceBar> {
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return Vec::new();
    };

    let mut blocks = Vec::with_capacity(SYNTHETIC_MONTHS as usize);
    let mut next_start = first.date;
    for months_back in 1..=SYNTHETIC_MONTHS {
        let shifted = last
            .date
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(last.date);
        let end = next_start.pred_opt().map_or(shifted, |day| shifted.min(day));

        let block: Vec<PriceBar> = window
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let days_before_end = (window.len() - 1 - i) as u64;
                let date = end.checked_sub_days(Days::new(days_before_end)).unwrap_or(end);
                jittered(rng, bar, date)
            })
            .collect();

        next_start = block.first().map_or(end, |bar| bar.date);
        blocks.push(block);
    }

    let mut bars = Vec::with_capacity(window.len() * (SYNTHETIC_MONTHS as usize + 1));
    for block in blocks.into_iter().rev() {
        bars.extend(block);
    }
    bars.extend_from_slice(window);
    bars
}

fn jittered<R: Rng>(rng: &mut R, bar: &PriceBar, date: NaiveDate) -> PriceBar {
    let open = round2(bar.open * rng.random_range(0.95..1.05));
    let high = round2(bar.high * rng.random_range(0.95..1.05));
    let low = round2(bar.low * rng.random_range(0.95..1.05));
    let close = round2(bar.close * rng.random_range(0.95..1.05));

    // Independent jitter can cross high and low; re-derive the envelope.
    PriceBar {
        date,
        open,
        high: high.max(low).max(open).max(close),
        low: low.min(high).min(open).min(close),
        close,
        volume: bar.volume,
    }
}

/// Simulated 5-minute prints for the current (or last) session.
pub fn intraday<R: Rng, Tz: TimeZone>(
    store: &MarketStore,
    rng: &mut R,
    symbol: &str,
    now: DateTime<Tz>,
) -> AppResult<IntradaySeries> {
    let stock = stock_or_not_found(store, symbol)?;
    let last_close = change_for(store, stock)?.price;

    Ok(IntradaySeries {
        symbol: stock.symbol.clone(),
        name: stock.name.clone(),
        interval: INTRADAY_INTERVAL.to_string(),
        intraday: price_service::generate_intraday(rng, last_close, now),
    })
}

pub fn stock_news(store: &MarketStore, symbol: &str) -> AppResult<Vec<NewsItem>> {
    let stock = stock_or_not_found(store, symbol)?;
    Ok(store.news(&stock.symbol).map(<[_]>::to_vec).unwrap_or_default())
}

/// Index levels, breadth and the most traded names.
pub fn market_summary<R: Rng>(store: &MarketStore, rng: &mut R) -> AppResult<MarketSummary> {
    let indices = INDICES
        .iter()
        .map(|(symbol, name, floor, spread)| {
            let price = floor + rng.random_range(0.0..*spread);
            let change = round2(price * rng.random_range(-0.01..0.01));
            MarketIndex {
                symbol: symbol.to_string(),
                name: name.to_string(),
                price: round2(price),
                change,
                change_percent: round2(change / price * 100.0),
            }
        })
        .collect();

    let (mut advancers, mut decliners, mut unchanged) = (0, 0, 0);
    let mut activity = Vec::with_capacity(store.stocks().len());

    for stock in store.stocks() {
        let history = history_for(store, stock)?;
        let change = change_for(store, stock)?;

        match change.change.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => advancers += 1,
            Some(std::cmp::Ordering::Less) => decliners += 1,
            _ => unchanged += 1,
        }

        activity.push(MostActiveStock {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            price: change.price,
            volume: history.last().map(|bar| bar.volume).unwrap_or_default(),
        });
    }

    // Stable sort keeps listing order among equal volumes
    activity.sort_by(|a, b| b.volume.cmp(&a.volume));
    activity.truncate(MOST_ACTIVE_COUNT);

    Ok(MarketSummary {
        indices,
        market_stats: MarketStats {
            advancers,
            decliners,
            unchanged,
            most_active: activity,
        },
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    fn store() -> MarketStore {
        let now = Utc::now();
        MarketStore::generate(&mut rng(), catalog::all_stocks(), now.date_naive(), now)
    }

    fn bar(close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_price_change_uses_last_two_closes() {
        let change = PriceChange::from_history(&[bar(90.0), bar(100.0), bar(102.5)]).unwrap();
        assert_eq!(change.price, 102.5);
        assert_eq!(change.change, 2.5);
        assert_eq!(change.change_percent, 2.5);
    }

    #[test]
    fn test_price_change_needs_two_bars() {
        assert!(PriceChange::from_history(&[bar(10.0)]).is_none());
        assert!(PriceChange::from_history(&[]).is_none());
    }

    #[test]
    fn test_list_quotes_covers_catalog() {
        let quotes = list_quotes(&store()).unwrap();
        assert_eq!(quotes.len(), 10);
        assert_eq!(quotes[0].stock.symbol, "AAPL");
        assert!(quotes.iter().all(|q| q.updated_at.is_some()));
    }

    #[test]
    fn test_quotes_for_symbols_skips_unknown() {
        let symbols = vec!["MSFT".to_string(), "NOPE".to_string(), "V".to_string()];
        let quotes = quotes_for_symbols(&store(), &symbols).unwrap();
        let found: Vec<_> = quotes.iter().map(|q| q.stock.symbol.as_str()).collect();
        assert_eq!(found, vec!["MSFT", "V"]);
    }

    #[test]
    fn test_stock_detail_fundamentals_are_in_range() {
        let store = store();
        let mut rng = rng();
        let detail = stock_detail(&store, &mut rng, "jpm").unwrap();
        let price = detail.price;

        assert_eq!(detail.stock.symbol, "JPM");
        assert!(detail.pe >= 15.0 && detail.pe <= 35.0);
        assert!(detail.market_cap >= price * 10e9 - 1.0 && detail.market_cap <= price * 15e9 + 1.0);
        assert!(detail.dividend >= 0.0 && detail.dividend <= round2(price * 0.03));
        assert_eq!(detail.high_52_week, round2(price * 1.2));
        assert_eq!(detail.low_52_week, round2(price * 0.8));
        assert!((detail.eps - round2(price / detail.pe)).abs() < 1e-9);
        assert!(detail.avg_volume >= 1_000_000 && detail.avg_volume < 11_000_000);
    }

    #[test]
    fn test_stock_detail_unknown_symbol() {
        let err = stock_detail(&store(), &mut rng(), "NIFTY50").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_history_range_lengths() {
        let store = store();
        let mut rng = rng();
        let mut len = |range| price_history(&store, &mut rng, "AAPL", range).unwrap().history.len();

        assert_eq!(len(HistoryRange::OneDay), 1);
        assert_eq!(len(HistoryRange::FiveDays), 5);
        assert_eq!(len(HistoryRange::OneMonth), 30);
        assert_eq!(len(HistoryRange::ThreeMonths), 90);
        assert_eq!(len(HistoryRange::All), 31);
    }

    #[test]
    fn test_three_month_history_is_oldest_first_and_consistent() {
        let store = store();
        let history = price_history(&store, &mut rng(), "AAPL", HistoryRange::ThreeMonths)
            .unwrap()
            .history;
        let real = store.history("AAPL").unwrap();

        assert_eq!(&history[60..], &real[1..]);
        assert!(history[0].date < history[30].date);
        assert!(history[30].date < history[60].date);
        for bar in &history[..60] {
            assert!(bar.low <= bar.open && bar.low <= bar.close);
            assert!(bar.high >= bar.open && bar.high >= bar.close);
        }
    }

    #[test]
    fn test_three_month_history_stays_ordered_across_february() {
        let days = [(2025, 3, 1), (2025, 3, 15), (2025, 3, 31), (2024, 3, 30), (2025, 5, 31)];
        for (y, m, d) in days {
            let today = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            let now = today.and_hms_opt(16, 0, 0).unwrap().and_utc();
            let store = MarketStore::generate(&mut rng(), catalog::all_stocks(), today, now);
            let history = price_history(&store, &mut rng(), "AAPL", HistoryRange::ThreeMonths)
                .unwrap()
                .history;

            assert_eq!(history.len(), 90);
            assert!(
                history.windows(2).all(|w| w[0].date < w[1].date),
                "dates out of order for today={}",
                today
            );
            assert_eq!(history[89].date, today);
        }
    }

    #[test]
    fn test_synthetic_blocks_keep_month_shift_when_it_fits() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        let now = today.and_hms_opt(12, 0, 0).unwrap().and_utc();
        let store = MarketStore::generate(&mut rng(), catalog::all_stocks(), today, now);
        let history = price_history(&store, &mut rng(), "MSFT", HistoryRange::ThreeMonths)
            .unwrap()
            .history;

        assert_eq!(history[29].date, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
        assert_eq!(history[59].date, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());
    }

    #[test]
    fn test_history_does_not_mutate_store() {
        let store = store();
        let before = store.history("TSLA").unwrap().to_vec();
        let _ = price_history(&store, &mut rng(), "TSLA", HistoryRange::ThreeMonths).unwrap();
        assert_eq!(store.history("TSLA").unwrap(), before.as_slice());
    }

    #[test]
    fn test_intraday_series_metadata() {
        let series = intraday(&store(), &mut rng(), "googl", Utc::now()).unwrap();
        assert_eq!(series.symbol, "GOOGL");
        assert_eq!(series.name, "Alphabet Inc.");
        assert_eq!(series.interval, "5min");
        assert!(series.intraday.len() <= 78);
    }

    #[test]
    fn test_stock_news() {
        let news = stock_news(&store(), "wmt").unwrap();
        assert_eq!(news.len(), 5);
        assert!(news.iter().all(|n| n.id.starts_with("WMT-news-")));
        assert!(stock_news(&store(), "XYZ").is_err());
    }

    #[test]
    fn test_market_summary_breadth_and_most_active() {
        let store = store();
        let summary = market_summary(&store, &mut rng()).unwrap();
        let stats = &summary.market_stats;

        assert_eq!(stats.advancers + stats.decliners + stats.unchanged, 10);
        assert_eq!(stats.most_active.len(), 3);
        assert!(stats.most_active.windows(2).all(|w| w[0].volume >= w[1].volume));

        let max_volume = store
            .stocks()
            .iter()
            .filter_map(|s| store.history(&s.symbol).and_then(|h| h.last()))
            .map(|b| b.volume)
            .max()
            .unwrap();
        assert_eq!(stats.most_active[0].volume, max_volume);

        assert_eq!(summary.indices.len(), 3);
        let dow = &summary.indices[0];
        assert_eq!(dow.symbol, "^DJI");
        assert!(dow.price >= 38_000.0 && dow.price <= 39_000.0);
        assert!(dow.change.abs() <= dow.price * 0.01 + 0.01);
    }
}
