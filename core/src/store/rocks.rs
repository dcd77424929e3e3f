//! RocksDB-backed artifact store, durable across sessions on one device.

use anyhow::{Context, Result};
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

use super::KvStore;

const CF_ARTIFACTS: &str = "artifacts";

/// A thread-safe wrapper around RocksDB holding the artifact records.
#[derive(Clone)]
pub struct RocksStore {
    db: Arc<DB>,
}

impl RocksStore {
    /// Opens the database at the specified path, creating it if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let families = vec![ColumnFamilyDescriptor::new(CF_ARTIFACTS, Options::default())];

        let db = DB::open_cf_descriptors(&opts, path, families)
            .map_err(|e| anyhow::anyhow!("Failed to open RocksDB: {}", e))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl KvStore for RocksStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let cf = self
            .db
            .cf_handle(CF_ARTIFACTS)
            .context("artifacts CF missing")?;

        match self.db.get_cf(cf, key.as_bytes())? {
            Some(bytes) => {
                let value =
                    String::from_utf8(bytes).context("artifact record is not valid UTF-8")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let cf = self
            .db
            .cf_handle(CF_ARTIFACTS)
            .context("artifacts CF missing")?;

        self.db.put_cf(cf, key.as_bytes(), value.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create a temporary DB for each test
    fn temp_store() -> (TempDir, RocksStore) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn set_and_get_record() {
        let (_dir, store) = temp_store();

        store.set("setupParams", "1,2,3").unwrap();
        assert_eq!(
            store.get("setupParams").unwrap().as_deref(),
            Some("1,2,3")
        );
    }

    #[test]
    fn missing_key_returns_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("proof").unwrap(), None);
    }

    #[test]
    fn overwrite_replaces_record() {
        let (_dir, store) = temp_store();

        store.set("proof", "1").unwrap();
        store.set("proof", "2,3").unwrap();
        assert_eq!(store.get("proof").unwrap().as_deref(), Some("2,3"));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.set("setupParams", "9,9,9").unwrap();
        }
        let store = RocksStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("setupParams").unwrap().as_deref(),
            Some("9,9,9")
        );
    }
}
