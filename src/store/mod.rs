//! Key-value persistence. The rest of the crate only sees
//! [`KeyValueCollection`]; whether a collection is disk-backed, in-memory
//! or remote-with-local-fallback is decided at assembly time.

pub mod disk;
pub mod memory;
pub mod remote;

use anyhow::{Context, Result};
use async_trait::async_trait;
use disk::DiskCollection;
use fjall::{Keyspace, PartitionCreateOptions};
use memory::MemoryCollection;
use std::time::Duration;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

/// A named key-value collection with string keys, byte values and optional
/// per-entry TTL. Storage failures are swallowed at this boundary: reads
/// degrade to a miss, writes to a no-op. Callers never observe them.
#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<u8>>;
    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>);
    async fn remove(&self, key: &str);
    async fn remove_prefix(&self, prefix: &str);
}

/// A store that hands out named collections backed by a single fjall
/// keyspace. Non-persistent collections live in memory only.
pub struct KeyValueStore {
    keyspace: Arc<Keyspace>,
    collections: RwLock<HashMap<String, Arc<dyn KeyValueCollection>>>,
}

impl KeyValueStore {
    pub fn open(path: &Path) -> Result<Self> {
        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open data store at {}", path.display()))?;

        Ok(Self {
            keyspace: Arc::new(keyspace),
            collections: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the collection with the given name, creating it on first
    /// use. `persist` picks a fjall partition over an in-memory map.
    pub fn collection(&self, name: &str, persist: bool) -> Result<Arc<dyn KeyValueCollection>> {
        {
            let collections = self.collections.read().unwrap();
            if let Some(collection) = collections.get(name) {
                return Ok(Arc::clone(collection));
            }
        }

        let collection: Arc<dyn KeyValueCollection> = if persist {
            let partition = self
                .keyspace
                .open_partition(name, PartitionCreateOptions::default())
                .with_context(|| format!("Failed to open collection: {name}"))?;
            Arc::new(DiskCollection::new(partition))
        } else {
            Arc::new(MemoryCollection::new())
        };

        let mut collections = self.collections.write().unwrap();
        Ok(Arc::clone(
            collections
                .entry(name.to_string())
                .or_insert(collection),
        ))
    }
}
