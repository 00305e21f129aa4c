//! Remote key-value store over HTTP, and the remote-with-local-fallback
//! strategy that user data runs through when a remote store is configured.

use crate::providers::util::with_retry;
use crate::store::KeyValueCollection;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Collection talking to a plain HTTP key-value service
/// (`GET`/`PUT`/`DELETE {base_url}/kv/{key}`).
///
/// All failures are swallowed here: a failed read is a miss, a failed
/// write is dropped. The fallback collection keeps the data safe locally.
pub struct RemoteCollection {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteCollection {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, key: &str) -> String {
        format!("{}/kv/{}", self.base_url, key)
    }
}

#[async_trait]
impl KeyValueCollection for RemoteCollection {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let url = self.url(key);
        let response = match with_retry(|| async { self.client.get(&url).send().await }, 2, 250)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Remote get failed for key {key}: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("Remote MISS for key {key} ({})", response.status());
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => {
                debug!("Remote HIT for key: {key}");
                Some(bytes.to_vec())
            }
            Err(e) => {
                debug!("Remote get body error for key {key}: {e}");
                None
            }
        }
    }

    async fn put(&self, key: &str, value: &[u8], _ttl: Option<Duration>) {
        let url = self.url(key);
        let body = value.to_vec();
        let result = with_retry(
            || async { self.client.put(&url).body(body.clone()).send().await },
            2,
            250,
        )
        .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("Remote PUT for key: {key}");
            }
            Ok(response) => {
                warn!("Remote put rejected for key {key}: {}", response.status());
            }
            Err(e) => {
                warn!("Remote put failed for key {key}: {e}");
            }
        }
    }

    async fn remove(&self, key: &str) {
        let url = self.url(key);
        if let Err(e) = with_retry(|| async { self.client.delete(&url).send().await }, 2, 250)
            .await
        {
            warn!("Remote remove failed for key {key}: {e}");
        }
    }

    async fn remove_prefix(&self, prefix: &str) {
        // The remote contract has no key listing; local fallback handles it.
        debug!("Remote remove_prefix skipped for prefix: {prefix}");
    }
}

/// Remote-first reads, write-through to both, local store always written.
/// The caller never learns whether the remote side is reachable.
pub struct FallbackCollection {
    remote: Arc<dyn KeyValueCollection>,
    local: Arc<dyn KeyValueCollection>,
}

impl FallbackCollection {
    pub fn new(remote: Arc<dyn KeyValueCollection>, local: Arc<dyn KeyValueCollection>) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl KeyValueCollection for FallbackCollection {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(value) = self.remote.get(key).await {
            return Some(value);
        }
        self.local.get(key).await
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        self.remote.put(key, value, ttl).await;
        self.local.put(key, value, ttl).await;
    }

    async fn remove(&self, key: &str) {
        self.remote.remove(key).await;
        self.local.remove(key).await;
    }

    async fn remove_prefix(&self, prefix: &str) {
        self.remote.remove_prefix(prefix).await;
        self.local.remove_prefix(prefix).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryCollection;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_remote_get_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kv/u1/portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{}".to_vec()))
            .mount(&server)
            .await;

        let remote = RemoteCollection::new(&server.uri());
        assert_eq!(
            remote.get("u1/portfolio").await.as_deref(),
            Some(b"{}".as_slice())
        );
    }

    #[tokio::test]
    async fn test_remote_get_miss_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kv/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let remote = RemoteCollection::new(&server.uri());
        assert!(remote.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_remote_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/kv/u1/portfolio"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let remote = RemoteCollection::new(&server.uri());
        remote.put("u1/portfolio", b"{}", None).await;
    }

    #[tokio::test]
    async fn test_fallback_reads_local_when_remote_misses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let local = Arc::new(MemoryCollection::new());
        local.put("k", b"local", None).await;

        let fallback = FallbackCollection::new(
            Arc::new(RemoteCollection::new(&server.uri())),
            local,
        );
        assert_eq!(fallback.get("k").await.as_deref(), Some(b"local".as_slice()));
    }

    #[tokio::test]
    async fn test_fallback_prefers_remote_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kv/k"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"remote".to_vec()))
            .mount(&server)
            .await;

        let local = Arc::new(MemoryCollection::new());
        local.put("k", b"local", None).await;

        let fallback = FallbackCollection::new(
            Arc::new(RemoteCollection::new(&server.uri())),
            local,
        );
        assert_eq!(
            fallback.get("k").await.as_deref(),
            Some(b"remote".as_slice())
        );
    }

    #[tokio::test]
    async fn test_fallback_put_always_writes_local() {
        // Remote is down; the write must still land locally.
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let local = Arc::new(MemoryCollection::new());
        let fallback = FallbackCollection::new(
            Arc::new(RemoteCollection::new(&server.uri())),
            Arc::clone(&local) as Arc<dyn KeyValueCollection>,
        );

        fallback.put("k", b"v", None).await;
        assert_eq!(local.get("k").await.as_deref(), Some(b"v".as_slice()));
    }
}
