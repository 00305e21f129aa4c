use crate::store::KeyValueCollection;
use async_trait::async_trait;
use fjall::PartitionHandle;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

// Stored entries start with an 8-byte little-endian expiry timestamp in
// epoch milliseconds (0 = no expiry) so TTLs survive process restarts and
// sub-second TTLs expire on time.
const HEADER_LEN: usize = 8;

/// Collection backed by one fjall partition.
pub struct DiskCollection {
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn new(partition: PartitionHandle) -> Self {
        Self { partition }
    }

    fn encode(value: &[u8], ttl: Option<Duration>) -> Vec<u8> {
        let expires_at = ttl
            .and_then(|d| SystemTime::now().checked_add(d))
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0u64, |d| d.as_millis() as u64);

        let mut buf = Vec::with_capacity(HEADER_LEN + value.len());
        buf.extend_from_slice(&expires_at.to_le_bytes());
        buf.extend_from_slice(value);
        buf
    }

    fn decode(raw: &[u8]) -> Option<Vec<u8>> {
        if raw.len() < HEADER_LEN {
            return None;
        }
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&raw[..HEADER_LEN]);
        let expires_at = u64::from_le_bytes(header);

        if expires_at != 0 {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64);
            if now >= expires_at {
                return None;
            }
        }
        Some(raw[HEADER_LEN..].to_vec())
    }
}

#[async_trait]
impl KeyValueCollection for DiskCollection {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.partition.get(key) {
            Ok(Some(raw)) => {
                let value = Self::decode(&raw);
                if value.is_none() {
                    debug!("Entry expired for key: {key}");
                    if let Err(e) = self.partition.remove(key) {
                        debug!("DiskCollection remove-on-expiry error: {e}");
                    }
                } else {
                    debug!("Store HIT for key: {key}");
                }
                value
            }
            Ok(None) => {
                debug!("Store MISS for key: {key}");
                None
            }
            Err(e) => {
                debug!("DiskCollection get error: {e}");
                None
            }
        }
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        debug!("Store PUT for key: {key}");
        if let Err(e) = self.partition.insert(key, Self::encode(value, ttl)) {
            debug!("DiskCollection put error: {e}");
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.partition.remove(key) {
            debug!("DiskCollection remove error: {e}");
        }
    }

    async fn remove_prefix(&self, prefix: &str) {
        let keys: Vec<_> = self
            .partition
            .prefix(prefix)
            .filter_map(|entry| match entry {
                Ok((key, _)) => Some(key),
                Err(e) => {
                    debug!("DiskCollection prefix scan error: {e}");
                    None
                }
            })
            .collect();

        for key in keys {
            if let Err(e) = self.partition.remove(key) {
                debug!("DiskCollection remove error: {e}");
            }
        }
    }
}
