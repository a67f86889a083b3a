//! Key/value store behind the response cache

use crate::Result;
use async_trait::async_trait;

/// Opaque string key/value store
///
/// Expiry, if any, is the store's business.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl CacheStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: String) -> Result<()> {
            self.0.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MapStore::default();
        store.set("q", "a".into()).await.unwrap();
        store.set("q", "b".into()).await.unwrap();
        assert_eq!(store.get("q").await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.get("other").await.unwrap(), None);
    }
}
