use crate::store::KeyValueCollection;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

/// In-memory collection for tests and non-persistent data.
pub struct MemoryCollection {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueCollection for MemoryCollection {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let map = self.inner.lock().await;
        if let Some(entry) = map.get(key) {
            if let Some(expiry) = entry.expires_at {
                if expiry < Instant::now() {
                    debug!("Entry expired for key: {key}");
                    return None;
                }
            }
            debug!("Store HIT for key: {key}");
            return Some(entry.value.clone());
        }
        debug!("Store MISS for key: {key}");
        None
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        let entry = Entry {
            value: value.to_vec(),
            expires_at: ttl.map(|duration| Instant::now() + duration),
        };
        let mut map = self.inner.lock().await;
        debug!("Store PUT for key: {key}");
        map.insert(key.to_string(), entry);
    }

    async fn remove(&self, key: &str) {
        let mut map = self.inner.lock().await;
        map.remove(key);
        debug!("Store REMOVE for key: {key}");
    }

    async fn remove_prefix(&self, prefix: &str) {
        let mut map = self.inner.lock().await;
        map.retain(|key, _| !key.starts_with(prefix));
        debug!("Store REMOVE prefix: {prefix}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_get_put() {
        let collection = MemoryCollection::new();

        assert!(collection.get("key1").await.is_none());

        collection.put("key1", b"value1", None).await;
        assert_eq!(
            collection.get("key1").await.as_deref(),
            Some(b"value1".as_slice())
        );

        assert!(collection.get("key2").await.is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let collection = MemoryCollection::new();

        collection
            .put("key1", b"value1", Some(Duration::from_millis(10)))
            .await;
        assert!(collection.get("key1").await.is_some());

        sleep(Duration::from_millis(20)).await;
        assert!(collection.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_remove_and_remove_prefix() {
        let collection = MemoryCollection::new();

        collection.put("a/1", b"x", None).await;
        collection.put("a/2", b"y", None).await;
        collection.put("b/1", b"z", None).await;

        collection.remove("a/1").await;
        assert!(collection.get("a/1").await.is_none());

        collection.remove_prefix("a/").await;
        assert!(collection.get("a/2").await.is_none());
        assert!(collection.get("b/1").await.is_some());
    }
}
