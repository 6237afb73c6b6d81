use crate::store::{MarketStore, SharedMarketStore, WatchlistRegistry};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedMarketStore,
    pub watchlists: WatchlistRegistry,
}

impl AppState {
    pub fn new(store: MarketStore) -> Self {
        Self {
            store: store.into_shared(),
            watchlists: WatchlistRegistry::new(),
        }
    }
}
