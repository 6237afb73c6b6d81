use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use rand::Rng;
use tracing::{debug, info};

use crate::models::{NewsItem, PriceBar, Stock};
use crate::services::{catalog, news_service, price_service};

pub type SharedMarketStore = Arc<RwLock<MarketStore>>;

/// In-memory market data: listings, daily bars and news per symbol.
///
/// Built once at startup. Afterwards only the last bar's close of each
/// symbol is rewritten, by [`MarketStore::update_current_prices`].
#[derive(Debug, Clone)]
pub struct MarketStore {
    stocks: Vec<Stock>,
    price_history: HashMap<String, Vec<PriceBar>>,
    news: HashMap<String, Vec<NewsItem>>,
}

impl MarketStore {
    /// Populate the store for every listed stock using the thread RNG.
    pub fn initialize() -> Self {
        let now = Utc::now();
        Self::generate(&mut rand::rng(), catalog::all_stocks(), now.date_naive(), now)
    }

    pub fn generate<R: Rng>(
        rng: &mut R,
        stocks: Vec<Stock>,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        let mut price_history = HashMap::with_capacity(stocks.len());
        let mut news = HashMap::with_capacity(stocks.len());

        for stock in &stocks {
            let base = catalog::base_price(&stock.symbol);
            let bars = price_service::generate_history(rng, base, today);
            debug!("Generated {} bars for {} from base {}", bars.len(), stock.symbol, base);
            price_history.insert(stock.symbol.clone(), bars);
            news.insert(stock.symbol.clone(), news_service::generate_news(rng, stock, now));
        }

        info!("📈 Market store initialized with {} stocks", stocks.len());

        Self {
            stocks,
            price_history,
            news,
        }
    }

    pub fn into_shared(self) -> SharedMarketStore {
        Arc::new(RwLock::new(self))
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    /// Case-insensitive lookup.
    pub fn find_stock(&self, symbol: &str) -> Option<&Stock> {
        let symbol = catalog::normalize_symbol(symbol);
        self.stocks.iter().find(|s| s.symbol == symbol)
    }

    pub fn history(&self, symbol: &str) -> Option<&[PriceBar]> {
        self.price_history
            .get(&catalog::normalize_symbol(symbol))
            .map(Vec::as_slice)
    }

    pub fn news(&self, symbol: &str) -> Option<&[NewsItem]> {
        self.news
            .get(&catalog::normalize_symbol(symbol))
            .map(Vec::as_slice)
    }

    /// Nudge the latest close of every symbol. Returns how many were moved.
    pub fn update_current_prices<R: Rng>(&mut self, rng: &mut R) -> usize {
        let mut updated = 0;
        for stock in &self.stocks {
            let Some(last) = self
                .price_history
                .get_mut(&stock.symbol)
                .and_then(|bars| bars.last_mut())
            else {
                continue;
            };

            let previous = last.close;
            last.close = price_service::nudge_close(rng, previous);
            debug!("{}: {} -> {}", stock.symbol, previous, last.close);
            updated += 1;
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::quote_service;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> MarketStore {
        let now = Utc::now();
        MarketStore::generate(
            &mut StdRng::seed_from_u64(1),
            catalog::all_stocks(),
            now.date_naive(),
            now,
        )
    }

    #[test]
    fn test_every_stock_has_history_and_news() {
        let store = store();
        assert_eq!(store.stocks().len(), 10);
        for stock in store.stocks() {
            assert_eq!(store.history(&stock.symbol).map(<[_]>::len), Some(31));
            assert_eq!(store.news(&stock.symbol).map(<[_]>::len), Some(5));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = store();
        assert_eq!(store.find_stock("aapl").map(|s| s.name.as_str()), Some("Apple Inc."));
        assert!(store.history("msft").is_some());
        assert!(store.find_stock("NIFTY50").is_none());
        assert!(store.history("NIFTY50").is_none());
    }

    #[test]
    fn test_update_only_moves_last_close() {
        let mut store = store();
        let before = store.clone();

        let updated = store.update_current_prices(&mut StdRng::seed_from_u64(99));
        assert_eq!(updated, 10);

        for stock in before.stocks() {
            let old = before.history(&stock.symbol).unwrap();
            let new = store.history(&stock.symbol).unwrap();

            assert_eq!(old.len(), new.len());
            assert_eq!(&old[..old.len() - 1], &new[..new.len() - 1]);

            let (old_last, new_last) = (old.last().unwrap(), new.last().unwrap());
            assert_eq!(old_last.open, new_last.open);
            assert_eq!(old_last.high, new_last.high);
            assert_eq!(old_last.low, new_last.low);
            assert_eq!(old_last.volume, new_last.volume);
            assert_eq!(old_last.date, new_last.date);

            let band = old_last.close * 0.015 + 0.005;
            assert!((new_last.close - old_last.close).abs() <= band);
        }
    }

    #[test]
    fn test_summary_counts_flat_closes_and_keeps_listing_order_on_ties() {
        let mut store = store();
        for bars in store.price_history.values_mut() {
            let n = bars.len();
            bars[n - 1].close = bars[n - 2].close;
            bars[n - 1].volume = 5_000_000;
        }

        let summary = quote_service::market_summary(&store, &mut StdRng::seed_from_u64(3)).unwrap();
        let stats = &summary.market_stats;

        assert_eq!(stats.unchanged, 10);
        assert_eq!(stats.advancers, 0);
        assert_eq!(stats.decliners, 0);

        let symbols: Vec<&str> = stats.most_active.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "AMZN"]);
    }
}
