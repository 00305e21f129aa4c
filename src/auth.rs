//! Name+PIN user registry and session. A deliberately low bar: this gates
//! family members apart, it is not a security boundary, and PINs are
//! stored as-is alongside the data they protect.

use crate::store::KeyValueCollection;
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const USERS_KEY: &str = "users";
const SESSION_KEY: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub pin: String,
    pub created_at: DateTime<Utc>,
}

pub struct AuthService {
    collection: Arc<dyn KeyValueCollection>,
}

impl AuthService {
    pub fn new(collection: Arc<dyn KeyValueCollection>) -> Self {
        Self { collection }
    }

    pub async fn users(&self) -> Vec<User> {
        match self.collection.get(USERS_KEY).await {
            Some(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                debug!("Unreadable users list: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    async fn save_users(&self, users: &[User]) {
        if let Ok(bytes) = serde_json::to_vec(users) {
            self.collection.put(USERS_KEY, &bytes, None).await;
        }
    }

    async fn set_session(&self, user: &User) {
        if let Ok(bytes) = serde_json::to_vec(user) {
            self.collection.put(SESSION_KEY, &bytes, None).await;
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        let bytes = self.collection.get(SESSION_KEY).await?;
        match serde_json::from_slice(&bytes) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Unreadable session: {e}");
                None
            }
        }
    }

    /// Registers a new user and logs them in. An existing name with a
    /// matching PIN logs in instead of failing; a mismatched PIN is an
    /// error.
    pub async fn register(&self, name: &str, pin: &str) -> Result<User> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Please enter a name");
        }
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            bail!("PIN must be exactly 4 digits");
        }

        let mut users = self.users().await;
        if let Some(existing) = users
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
        {
            if existing.pin == pin {
                return self.login(name, pin).await;
            }
            bail!(
                "A user with this name already exists. Please use a different name or enter the correct PIN."
            );
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            pin: pin.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.save_users(&users).await;
        self.set_session(&user).await;

        Ok(user)
    }

    pub async fn login(&self, name: &str, pin: &str) -> Result<User> {
        let users = self.users().await;
        let Some(user) = users
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name.trim()) && u.pin == pin)
        else {
            bail!("Incorrect name or PIN. Please try again.");
        };

        self.set_session(user).await;
        Ok(user.clone())
    }

    pub async fn logout(&self) {
        self.collection.remove(SESSION_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryCollection;

    fn auth() -> AuthService {
        AuthService::new(Arc::new(MemoryCollection::new()))
    }

    #[tokio::test]
    async fn test_register_creates_user_and_session() {
        let auth = auth();
        let user = auth.register("Asha", "1234").await.unwrap();
        assert_eq!(user.name, "Asha");

        let current = auth.current_user().await.unwrap();
        assert_eq!(current.id, user.id);
        assert_eq!(auth.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_pin() {
        let auth = auth();
        assert!(auth.register("Asha", "123").await.is_err());
        assert!(auth.register("Asha", "12345").await.is_err());
        assert!(auth.register("Asha", "12a4").await.is_err());
        assert!(auth.users().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_existing_name_matching_pin_logs_in() {
        let auth = auth();
        let first = auth.register("Asha", "1234").await.unwrap();
        let again = auth.register("asha", "1234").await.unwrap();
        assert_eq!(first.id, again.id);
        assert_eq!(auth.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_register_existing_name_wrong_pin_fails() {
        let auth = auth();
        auth.register("Asha", "1234").await.unwrap();
        assert!(auth.register("Asha", "9999").await.is_err());
    }

    #[tokio::test]
    async fn test_login_is_case_insensitive_on_name() {
        let auth = auth();
        auth.register("Asha", "1234").await.unwrap();
        auth.logout().await;

        let user = auth.login("ASHA", "1234").await.unwrap();
        assert_eq!(user.name, "Asha");
    }

    #[tokio::test]
    async fn test_login_wrong_pin_fails() {
        let auth = auth();
        auth.register("Asha", "1234").await.unwrap();
        auth.logout().await;

        assert!(auth.login("Asha", "0000").await.is_err());
        assert!(auth.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let auth = auth();
        auth.register("Asha", "1234").await.unwrap();
        auth.logout().await;
        assert!(auth.current_user().await.is_none());
    }
}
