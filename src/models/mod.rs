mod api_response;
mod stock;
mod price_bar;
mod news;
pub mod market;
pub mod watchlist;

pub use api_response::ApiResponse;
pub use stock::{Stock, StockQuote, StockDetail};
pub use price_bar::{
    HistoryQueryParams, HistoryRange, IntradaySeries, IntradayTick, PriceBar, PriceHistory,
};
pub use news::NewsItem;
pub use market::{MarketIndex, MarketStats, MarketSummary, MostActiveStock};
pub use watchlist::{AddWatchlistItemRequest, WatchlistQueryParams, DEFAULT_USER_ID};
