//! Process-local cache store.

use super::{glob_to_regex, CacheStats, CacheStore};
use async_trait::async_trait;
use campus_config::MAX_CACHE_TTL_SECS;
use campus_core::CrmResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Notification emitted by [`MemoryCacheStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// An entry outlived its TTL and was dropped by a sweep.
    Expired { key: String },
    /// Every entry was dropped.
    Flushed,
}

/// Callback registered with [`MemoryCacheStore::on_event`].
pub type CacheListener = Arc<dyn Fn(&CacheEvent) + Send + Sync>;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory cache store with per-key TTL.
///
/// Expired entries are invisible to every read as soon as their TTL lapses.
/// They are physically dropped either lazily by `get_raw` or by [`sweep`],
/// which the background sweeper calls periodically.
///
/// [`sweep`]: MemoryCacheStore::sweep
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    listeners: RwLock<Vec<CacheListener>>,
}

impl MemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            listeners: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Registers a listener for expiry and flush events.
    pub fn on_event<F>(&self, listener: F)
    where
        F: Fn(&CacheEvent) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    /// Drops expired entries and reports each one. Returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = {
            let mut entries = self.entries.write();
            let keys: Vec<String> = entries
                .iter()
                .filter(|(_, entry)| !entry.is_live(now))
                .map(|(key, _)| key.clone())
                .collect();
            for key in &keys {
                entries.remove(key);
            }
            keys
        };

        for key in &expired {
            self.emit(&CacheEvent::Expired { key: key.clone() });
        }
        expired.len()
    }

    fn emit(&self, event: &CacheEvent) {
        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            listener(event);
        }
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_raw(&self, key: &str) -> CrmResult<Option<String>> {
        let now = Instant::now();
        let found = self
            .entries
            .read()
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.value.clone()));

        match found {
            Some(Some(value)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key '{}'", key);
                Ok(Some(value))
            }
            Some(None) => {
                let mut entries = self.entries.write();
                if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
                    entries.remove(key);
                }
                drop(entries);
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for key '{}' (expired)", key);
                Ok(None)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for key '{}'", key);
                Ok(None)
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> CrmResult<()> {
        let ttl = ttl
            .unwrap_or(self.default_ttl)
            .min(Duration::from_secs(MAX_CACHE_TTL_SECS));
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.to_string(), entry);

        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CrmResult<bool> {
        let existed = self.entries.write().remove(key).is_some();
        debug!("Deleted key '{}': {}", key, existed);
        Ok(existed)
    }

    async fn delete_pattern(&self, pattern: &str) -> CrmResult<u64> {
        let matcher = glob_to_regex(pattern)?;

        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !matcher.is_match(key));
        let deleted = (before - entries.len()) as u64;
        drop(entries);

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }

    async fn flush_all(&self) -> CrmResult<()> {
        self.entries.write().clear();
        self.emit(&CacheEvent::Flushed);
        Ok(())
    }

    async fn has(&self, key: &str) -> CrmResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .get(key)
            .is_some_and(|entry| entry.is_live(now)))
    }

    async fn keys(&self) -> CrmResult<Vec<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .iter()
            .filter(|(_, entry)| entry.is_live(now))
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn stats(&self) -> CacheStats {
        let now = Instant::now();
        CacheStats {
            keys: self
                .entries
                .read()
                .values()
                .filter(|entry| entry.is_live(now))
                .count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for MemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheStore")
            .field("entries", &self.entries.read().len())
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
