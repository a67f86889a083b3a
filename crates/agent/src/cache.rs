//! Response Cache
//!
//! Exact-text cache from the asked question to its reading. Keys are the
//! stripped, untranslated question; different phrasings are different
//! entries. Store failures never reach the caller: they read as misses and
//! failed writes are dropped.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;
use tara_config::CacheConfig;
use tara_core::{CacheStore, CachedReading, Result};

/// Reading cache over any [`CacheStore`]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    enabled: bool,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            enabled: true,
        }
    }

    /// Cache that never hits and never stores
    pub fn disabled(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get(&self, question: &str) -> Option<CachedReading> {
        if !self.enabled {
            return None;
        }

        let raw = match self.store.get(question).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Cache lookup failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::warn!(error = %e, "Undecodable cache entry, treating as miss");
                None
            }
        }
    }

    /// Store `reading` under `question`, replacing any previous entry
    pub async fn put(&self, question: &str, reading: &CachedReading) {
        if !self.enabled {
            return;
        }

        let raw = match serde_json::to_string(reading) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode reading for cache");
                return;
            }
        };

        if let Err(e) = self.store.set(question, raw).await {
            tracing::warn!(error = %e, "Cache write failed");
        }
    }
}

struct Entry {
    value: String,
    inserted_at: Instant,
    seq: u64,
}

#[derive(Default)]
struct Entries {
    map: HashMap<String, Entry>,
    /// Keys in insertion order; a slot is stale once its key was rewritten or removed
    order: VecDeque<(String, u64)>,
    next_seq: u64,
}

impl Entries {
    /// Remove the oldest live entry
    fn evict_oldest(&mut self) -> Option<String> {
        while let Some((key, seq)) = self.order.pop_front() {
            if self.map.get(&key).map(|e| e.seq) == Some(seq) {
                self.map.remove(&key);
                return Some(key);
            }
        }
        None
    }

    /// Remove expired entries from the front of the queue
    fn evict_expired(&mut self, ttl: Duration) {
        while let Some((key, seq)) = self.order.front() {
            let live = self.map.get(key).filter(|entry| entry.seq == *seq);
            if let Some(entry) = live {
                if entry.inserted_at.elapsed() < ttl {
                    break;
                }
                let key = key.clone();
                self.map.remove(&key);
            }
            self.order.pop_front();
        }
    }

    fn compact(&mut self) {
        let map = &self.map;
        self.order
            .retain(|(key, seq)| map.get(key).map(|e| e.seq) == Some(*seq));
    }
}

/// Process-local [`CacheStore`] with optional TTL and a size bound
///
/// At capacity the oldest write is evicted first.
pub struct InMemoryCacheStore {
    entries: RwLock<Entries>,
    ttl: Option<Duration>,
    capacity: usize,
}

impl InMemoryCacheStore {
    pub fn new(ttl: Option<Duration>, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// `ttl_seconds == 0` disables expiry
    pub fn from_config(config: &CacheConfig) -> Self {
        let ttl = (config.ttl_seconds > 0).then(|| Duration::from_secs(config.ttl_seconds));
        Self::new(ttl, config.max_entries)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        self.ttl
            .map(|ttl| entry.inserted_at.elapsed() >= ttl)
            .unwrap_or(false)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        {
            let entries = self.entries.read();
            match entries.map.get(key) {
                None => return Ok(None),
                Some(entry) if !self.is_expired(entry) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Its queue slot goes stale and is skipped later
        self.entries.write().map.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write();

        if !entries.map.contains_key(key) && entries.map.len() >= self.capacity {
            if let Some(ttl) = self.ttl {
                entries.evict_expired(ttl);
            }
            if entries.map.len() >= self.capacity {
                if let Some(evicted) = entries.evict_oldest() {
                    tracing::trace!(key = %evicted, "Cache entry evicted");
                }
            }
        }

        let seq = entries.next_seq;
        entries.next_seq += 1;
        entries.order.push_back((key.to_string(), seq));
        entries.map.insert(
            key.to_string(),
            Entry {
                value,
                inserted_at: Instant::now(),
                seq,
            },
        );

        if entries.order.len() > self.capacity.saturating_mul(2) {
            entries.compact();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tara_core::{DateRange, Error, Intent, ReadingResult};

    fn timeline() -> CachedReading {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 3, 21).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 30).unwrap(),
        )
        .unwrap();
        CachedReading::new(
            Intent::Timeline,
            ReadingResult::Timeline {
                card: "Two of Wands".to_string(),
                date_range: range,
                interpretation: "Plans take shape.".to_string(),
            },
        )
    }

    fn cache() -> (ResponseCache, Arc<InMemoryCacheStore>) {
        let store = Arc::new(InMemoryCacheStore::new(None, 10));
        (ResponseCache::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (cache, _) = cache();
        let reading = timeline();

        cache.put("When will I travel?", &reading).await;
        assert_eq!(cache.get("When will I travel?").await, Some(reading.clone()));
        assert_eq!(cache.get("When will I travel?").await, Some(reading));
    }

    #[tokio::test]
    async fn test_keys_are_exact() {
        let (cache, _) = cache();
        cache.put("When will I travel?", &timeline()).await;

        assert!(cache.get("when will I travel?").await.is_none());
        assert!(cache.get("When will I travel? ").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (cache, _) = cache();
        let second = CachedReading::new(
            Intent::Conversation,
            ReadingResult::Conversation {
                interpretation: "Hello again".to_string(),
            },
        );

        cache.put("hi", &timeline()).await;
        cache.put("hi", &second).await;
        assert_eq!(cache.get("hi").await, Some(second));
    }

    #[tokio::test]
    async fn test_dates_are_stored_as_iso_strings() {
        let (cache, store) = cache();
        cache.put("q", &timeline()).await;

        let raw = store.get("q").await.unwrap().unwrap();
        assert!(raw.contains("\"2026-03-21\""));
        assert!(raw.contains("\"intent\":\"timeline\""));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let (cache, store) = cache();
        store.set("q", "not json".to_string()).await.unwrap();
        assert!(cache.get("q").await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache() {
        let store = Arc::new(InMemoryCacheStore::new(None, 10));
        let cache = ResponseCache::disabled(store.clone());

        cache.put("q", &timeline()).await;
        assert!(cache.get("q").await.is_none());
        assert!(store.is_empty());
    }

    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Cache("connection reset".to_string()))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(Error::Cache("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_errors_are_swallowed() {
        let cache = ResponseCache::new(Arc::new(BrokenStore));
        cache.put("q", &timeline()).await;
        assert!(cache.get("q").await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let store = InMemoryCacheStore::new(None, 2);
        store.set("a", "1".into()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.set("b", "2".into()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.set("c", "3".into()).await.unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("a").await.unwrap().is_none());
        assert_eq!(store.get("c").await.unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_rewrite_refreshes_eviction_order() {
        let store = InMemoryCacheStore::new(None, 2);
        store.set("a", "1".into()).await.unwrap();
        store.set("b", "2".into()).await.unwrap();
        store.set("a", "3".into()).await.unwrap();
        store.set("c", "4".into()).await.unwrap();

        assert!(store.get("b").await.unwrap().is_none());
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("3"));
        assert_eq!(store.get("c").await.unwrap().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_order_queue_stays_bounded() {
        let store = InMemoryCacheStore::new(None, 3);
        for i in 0..100 {
            store.set("same", i.to_string()).await.unwrap();
        }

        assert_eq!(store.len(), 1);
        assert!(store.entries.read().order.len() <= 6);
        assert_eq!(store.get("same").await.unwrap().as_deref(), Some("99"));
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let store = InMemoryCacheStore::new(Some(Duration::from_millis(20)), 10);
        store.set("a", "1".into()).await.unwrap();
        assert!(store.get("a").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.get("a").await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
