pub(crate) mod health;
pub(crate) mod index;
pub(crate) mod market;
pub(crate) mod stocks;
pub(crate) mod watchlist;
