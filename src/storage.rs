//! Key-value persistence for the catalog.
//!
//! The catalog stores its whole collection as one JSON string under a single
//! key, so the storage contract is small: read a value, overwrite
//! it, remove it. [`LmdbStore`] is the durable backend; [`MemoryStore`] keeps
//! everything in process and is what tests and ephemeral hosts use.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::config::CatalogConfig;

/// A string-valued key-value store.
///
/// All methods take `&self` so backends with internal locking or
/// transactions can be shared behind a plain reference.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, AppResponse>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), AppResponse>;

    /// Removes `key`. Returns whether a value was present.
    fn remove(&self, key: &str) -> Result<bool, AppResponse>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AppResponse {
    AppResponse::StorageError("Memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, AppResponse> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        Ok(data.remove(key).is_some())
    }
}

/// LMDB-backed store living in `<name>.lmdb`.
pub struct LmdbStore {
    env: Option<Environment>,
    db: Database,
    path: String,
}

impl LmdbStore {
    pub fn init(config: &CatalogConfig) -> Result<Self, AppResponse> {
        config.validate()?;

        let path = config.lmdb_dir();
        if !Path::new(&path).exists() {
            info!("Creating storage directory: {}", path);
            fs::create_dir_all(&path)?;
        }

        let env = Environment::new()
            .set_map_size(config.map_size)
            .set_max_dbs(1)
            .open(Path::new(&path))?;
        let db = env.create_db(None, DatabaseFlags::empty())?;

        info!("LMDB environment opened at {}", path);
        Ok(Self { env: Some(env), db, path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.env.is_none()
    }

    fn env(&self) -> Result<&Environment, AppResponse> {
        self.env
            .as_ref()
            .ok_or_else(|| AppResponse::StorageError(format!("Storage at {} is closed", self.path)))
    }

    /// Flushes and drops the environment. Further calls fail with `StorageError`.
    pub fn close(&mut self) -> Result<(), AppResponse> {
        match self.env.take() {
            Some(env) => {
                if let Err(e) = env.sync(true) {
                    warn!("Failed to sync LMDB environment before close: {e}");
                }
                info!("LMDB environment at {} closed", self.path);
                Ok(())
            }
            None => {
                debug!("LMDB environment at {} already closed", self.path);
                Ok(())
            }
        }
    }
}

impl KeyValueStore for LmdbStore {
    fn read(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let env = self.env()?;
        let txn = env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    AppResponse::SerializationError(format!("Stored value is not UTF-8: {e}"))
                })?;
                Some(text)
            }
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(AppResponse::from(e)),
        };
        txn.commit()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        let env = self.env()?;
        let mut txn = env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        debug!("Wrote {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, AppResponse> {
        let env = self.env()?;
        let mut txn = env.begin_rw_txn()?;
        let removed = match txn.del(self.db, &key, None) {
            Ok(()) => true,
            Err(lmdb::Error::NotFound) => false,
            Err(e) => return Err(AppResponse::from(e)),
        };
        txn.commit()?;
        Ok(removed)
    }
}

impl Drop for LmdbStore {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Error closing LMDB store on drop: {e}");
        }
    }
}
