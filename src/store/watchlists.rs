use std::sync::Arc;

use dashmap::DashMap;

use crate::models::DEFAULT_USER_ID;

/// Thread-safe per-user watchlists, keyed by user id.
///
/// Each list keeps insertion order and never holds the same symbol twice.
/// The default user's list exists from startup; other users' lists are
/// created on first read or add.
#[derive(Clone)]
pub struct WatchlistRegistry {
    lists: Arc<DashMap<String, Vec<String>>>,
}

impl WatchlistRegistry {
    pub fn new() -> Self {
        let lists = DashMap::new();
        lists.insert(DEFAULT_USER_ID.to_string(), Vec::new());
        Self {
            lists: Arc::new(lists),
        }
    }

    /// Symbols on the user's list, creating an empty list if needed.
    pub fn get_or_create(&self, user_id: &str) -> Vec<String> {
        self.lists.entry(user_id.to_string()).or_default().clone()
    }

    /// Append `symbol` unless already present. Returns the updated list.
    pub fn add(&self, user_id: &str, symbol: &str) -> Vec<String> {
        let mut list = self.lists.entry(user_id.to_string()).or_default();
        if !list.iter().any(|s| s == symbol) {
            list.push(symbol.to_string());
        }
        list.clone()
    }

    /// Drop `symbol` from an existing list. `None` if the user was never seen.
    pub fn remove(&self, user_id: &str, symbol: &str) -> Option<Vec<String>> {
        let mut list = self.lists.get_mut(user_id)?;
        list.retain(|s| s != symbol);
        Some(list.clone())
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.lists.contains_key(user_id)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }
}

impl Default for WatchlistRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_exists_at_startup() {
        let registry = WatchlistRegistry::new();
        assert!(registry.contains_user("default"));
        assert_eq!(registry.remove("default", "AAPL"), Some(vec![]));
    }

    #[test]
    fn test_add_is_idempotent_and_ordered() {
        let registry = WatchlistRegistry::new();
        registry.add("default", "AAPL");
        registry.add("default", "MSFT");
        let list = registry.add("default", "AAPL");
        assert_eq!(list, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[test]
    fn test_remove_missing_symbol_is_noop() {
        let registry = WatchlistRegistry::new();
        registry.add("alice", "TSLA");
        assert_eq!(registry.remove("alice", "AAPL"), Some(vec!["TSLA".to_string()]));
        assert_eq!(registry.remove("alice", "TSLA"), Some(vec![]));
    }

    #[test]
    fn test_remove_for_unknown_user() {
        let registry = WatchlistRegistry::new();
        assert_eq!(registry.remove("nobody", "AAPL"), None);
        assert!(!registry.contains_user("nobody"));
    }

    #[test]
    fn test_reading_creates_list_lazily() {
        let registry = WatchlistRegistry::new();
        assert!(registry.get_or_create("bob").is_empty());
        assert!(registry.contains_user("bob"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = WatchlistRegistry::new();
        let handle = registry.clone();
        handle.add("default", "JPM");
        assert_eq!(registry.get_or_create("default"), vec!["JPM".to_string()]);
    }
}
