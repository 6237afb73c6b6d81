use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "default";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistQueryParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl WatchlistQueryParams {
    pub fn user_id(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_USER_ID)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddWatchlistItemRequest {
    pub symbol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_defaults() {
        assert_eq!(WatchlistQueryParams::default().user_id(), "default");
        let empty = WatchlistQueryParams { user_id: Some(String::new()) };
        assert_eq!(empty.user_id(), "default");
        let alice = WatchlistQueryParams { user_id: Some("alice".into()) };
        assert_eq!(alice.user_id(), "alice");
    }
}
