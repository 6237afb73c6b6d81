pub mod market;
pub mod watchlists;

pub use market::{MarketStore, SharedMarketStore};
pub use watchlists::WatchlistRegistry;
