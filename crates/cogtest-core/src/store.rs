use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{CogError, CogResult};

/// String key-value persistence used for the image cache, the progress
/// record and the results history.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> CogResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CogResult<()>;
    fn remove(&self, key: &str) -> CogResult<()>;
    fn list_keys(&self) -> CogResult<Vec<String>>;
    fn remove_many(&self, keys: &[String]) -> CogResult<usize>;
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CogResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| CogError::Store(format!("memory store poisoned: {e}")))
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> CogResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CogResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CogResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn list_keys(&self) -> CogResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn remove_many(&self, keys: &[String]) -> CogResult<usize> {
        let mut entries = self.lock()?;
        Ok(keys.iter().filter(|k| entries.remove(*k).is_some()).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let kv = MemoryKv::new();
        assert!(kv.get("a").unwrap().is_none());
        kv.set("a", "1").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
        kv.set("a", "2").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("2"));
        kv.remove("a").unwrap();
        assert!(kv.get("a").unwrap().is_none());
    }

    #[test]
    fn test_remove_many_counts_existing() {
        let kv = MemoryKv::new();
        kv.set("x", "1").unwrap();
        kv.set("y", "2").unwrap();
        kv.set("z", "3").unwrap();
        let removed = kv
            .remove_many(&["x".into(), "y".into(), "missing".into()])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(kv.list_keys().unwrap(), vec!["z".to_string()]);
    }
}
