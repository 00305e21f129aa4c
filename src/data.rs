//! Per-user data access: JSON blobs namespaced by user id over a
//! key-value collection. An explicit session context replaces the
//! ambient "current user" global of typical web ports.

use crate::core::model::Portfolio;
use crate::store::KeyValueCollection;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

pub const PORTFOLIO_KEY: &str = "portfolio";

/// Handle to one user's slice of the data collection.
#[derive(Clone)]
pub struct UserData {
    collection: Arc<dyn KeyValueCollection>,
    user_id: String,
}

impl UserData {
    pub fn new(collection: Arc<dyn KeyValueCollection>, user_id: &str) -> Self {
        Self {
            collection,
            user_id: user_id.to_string(),
        }
    }

    fn scoped_key(&self, key: &str) -> String {
        format!("{}/{}", self.user_id, key)
    }

    fn prefix(&self) -> String {
        format!("{}/", self.user_id)
    }

    /// Reads a JSON value, returning `default` when the key is absent or
    /// the stored bytes fail to parse.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let scoped = self.scoped_key(key);
        match self.collection.get(&scoped).await {
            Some(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Unreadable data for key {scoped}: {e}");
                    default
                }
            },
            None => default,
        }
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.collection
                    .put(&self.scoped_key(key), &bytes, None)
                    .await;
            }
            Err(e) => debug!("Failed to serialize value for key {key}: {e}"),
        }
    }

    /// Loads the portfolio, defaulting to an empty one on first use.
    pub async fn load_portfolio(&self) -> Portfolio {
        self.get_json(PORTFOLIO_KEY, Portfolio::empty()).await
    }

    /// Persists the portfolio, refreshing `last_updated` first. Every
    /// mutation goes through here.
    pub async fn save_portfolio(&self, portfolio: &mut Portfolio) {
        portfolio.last_updated = Utc::now();
        self.put_json(PORTFOLIO_KEY, portfolio).await;
    }

    /// Removes every stored blob belonging to this user.
    pub async fn clear(&self) {
        self.collection.remove_prefix(&self.prefix()).await;
    }
}
