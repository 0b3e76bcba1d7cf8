//! In-process key/value adapter.

use super::KeyValueBackend;
use async_trait::async_trait;
use parking_lot::RwLock;
use relief_core::ReliefResult;
use std::collections::HashMap;

/// Realtime backend held in process memory.
///
/// Used when no Redis is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryKeyValue {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryKeyValue {
    async fn get(&self, key: &str) -> ReliefResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ReliefResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> ReliefResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let kv = MemoryKeyValue::new();
        assert!(kv.is_empty());
        kv.set("a", "1").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(kv.len(), 1);
        assert!(kv.delete("a").await.unwrap());
        assert!(!kv.delete("a").await.unwrap());
    }
}
