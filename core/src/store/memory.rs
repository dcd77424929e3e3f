//! In-memory key-value store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use super::KvStore;

/// HashMap-backed store. Optionally enforces a total byte quota so
/// capacity-exceeded write failures can be exercised.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: None,
        }
    }

    /// Store refusing writes once the total stored value size would exceed
    /// `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))?;

        if let Some(quota) = self.quota_bytes {
            let projected: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum::<usize>()
                + value.len();
            if projected > quota {
                anyhow::bail!(
                    "storage quota exceeded: {} bytes needed, {} allowed",
                    projected,
                    quota
                );
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_of_unwritten_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("setupParams").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("proof", "1,2,3").unwrap();
        assert_eq!(store.get("proof").unwrap().as_deref(), Some("1,2,3"));
    }

    #[test]
    fn quota_blocks_oversized_writes() {
        let store = MemoryStore::with_quota(4);
        store.set("a", "1234").unwrap();
        assert!(store.set("b", "5").is_err());

        // Overwriting under the quota is still allowed
        store.set("a", "12").unwrap();
        store.set("b", "56").unwrap();
    }
}
