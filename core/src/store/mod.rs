//! Durable artifact persistence between the prove and verify workflows.
//!
//! The two workflows run at different times and communicate only through
//! this store. Values are kept as comma-separated decimal strings so any
//! string-valued device store can hold them.

pub mod memory;
pub mod rocks;

pub use memory::MemoryStore;
pub use rocks::RocksStore;

use std::sync::Arc;

use crate::error::{LifecycleError, Result};

/// Key holding the current setup parameters.
pub const KEY_SETUP_PARAMS: &str = "setupParams";
/// Key holding the current proof.
pub const KEY_PROOF: &str = "proof";

/// String-keyed durable storage boundary.
///
/// Decouples the lifecycle from the concrete device store; implementations
/// are device/session-scoped and never shared across users.
pub trait KvStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Writes or overwrites the value for `key`.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Byte-sequence persistence on top of any [`KvStore`].
///
/// A new save under an existing key supersedes the previous record; no
/// history is kept.
#[derive(Clone)]
pub struct ArtifactStore {
    kv: Arc<dyn KvStore>,
}

impl ArtifactStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Persists `bytes` under `key`, overwriting any previous record.
    pub fn save(&self, key: &'static str, bytes: &[u8]) -> Result<()> {
        self.kv
            .set(key, &encode_bytes(bytes))
            .map_err(LifecycleError::Storage)
    }

    /// Loads the bytes persisted under `key`.
    pub fn load(&self, key: &'static str) -> Result<Vec<u8>> {
        match self.kv.get(key).map_err(LifecycleError::Storage)? {
            Some(value) => decode_bytes(&value)
                .map_err(|reason| LifecycleError::CorruptArtifact { key, reason }),
            None => Err(LifecycleError::MissingArtifact(key)),
        }
    }

    /// Whether `key` currently holds a record.
    pub fn contains(&self, key: &'static str) -> Result<bool> {
        Ok(self.kv.get(key).map_err(LifecycleError::Storage)?.is_some())
    }
}

/// Serializes a byte sequence as comma-separated decimal values 0-255.
pub fn encode_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes the comma-separated decimal format produced by [`encode_bytes`].
///
/// The empty string decodes to a zero-length sequence. Splitting `""` on
/// `,` would yield one empty token, which must not become a bogus byte.
pub fn decode_bytes(s: &str) -> std::result::Result<Vec<u8>, String> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|tok| {
            tok.parse::<u8>()
                .map_err(|_| format!("invalid byte token {tok:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_codec_round_trips() {
        for bytes in [
            vec![],
            vec![0],
            vec![255],
            vec![17, 0, 255, 3],
            (0..=255).collect::<Vec<u8>>(),
        ] {
            let encoded = encode_bytes(&bytes);
            assert_eq!(decode_bytes(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn empty_string_decodes_to_empty_sequence() {
        assert_eq!(decode_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_rejects_malformed_tokens() {
        assert!(decode_bytes("256").is_err());
        assert!(decode_bytes("1,,2").is_err());
        assert!(decode_bytes("1,x").is_err());
        assert!(decode_bytes("-1").is_err());
    }

    #[test]
    fn save_then_load_returns_same_bytes() {
        let store = ArtifactStore::new(Arc::new(MemoryStore::new()));
        store.save(KEY_PROOF, &[9, 0, 200]).unwrap();
        assert_eq!(store.load(KEY_PROOF).unwrap(), vec![9, 0, 200]);

        store.save(KEY_PROOF, &[]).unwrap();
        assert_eq!(store.load(KEY_PROOF).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn load_of_absent_key_is_missing_artifact() {
        let store = ArtifactStore::new(Arc::new(MemoryStore::new()));
        let err = store.load(KEY_SETUP_PARAMS).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::MissingArtifact("setupParams")
        ));
    }

    #[test]
    fn save_supersedes_previous_record() {
        let store = ArtifactStore::new(Arc::new(MemoryStore::new()));
        store.save(KEY_SETUP_PARAMS, &[1, 2, 3]).unwrap();
        store.save(KEY_SETUP_PARAMS, &[4, 5]).unwrap();
        assert_eq!(store.load(KEY_SETUP_PARAMS).unwrap(), vec![4, 5]);
    }

    #[test]
    fn corrupt_value_is_reported_as_such() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(KEY_PROOF, "not,bytes,at,all").unwrap();
        let store = ArtifactStore::new(kv);
        let err = store.load(KEY_PROOF).unwrap_err();
        assert!(matches!(err, LifecycleError::CorruptArtifact { .. }));
    }
}
