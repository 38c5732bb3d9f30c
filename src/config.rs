//! Catalog configuration.
//!
//! [`CatalogConfig`] carries everything needed to open a catalog: where the
//! LMDB environment lives, which key holds the serialized collection, and how
//! large the memory map may grow. Hosts either build it in code or send it as
//! JSON through [`create_catalog_with_config`](crate::create_catalog_with_config);
//! omitted fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

/// Key under which the whole collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "items-storage";

/// Default LMDB map size (10 MiB). Images may be stored inline as data URIs.
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Database name or path prefix; the environment lives in `<name>.lmdb`.
    pub name: String,
    pub storage_key: String,
    pub map_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            name: "inventory_catalog".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            map_size: DEFAULT_MAP_SIZE,
        }
    }
}

impl CatalogConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    /// Directory holding the LMDB environment.
    pub fn lmdb_dir(&self) -> String {
        format!("{}.lmdb", self.name)
    }

    pub fn validate(&self) -> Result<(), AppResponse> {
        if self.name.trim().is_empty() {
            return Err(AppResponse::BadRequest("Catalog name cannot be empty".to_string()));
        }
        if self.storage_key.is_empty() {
            return Err(AppResponse::BadRequest("Storage key cannot be empty".to_string()));
        }
        if self.map_size == 0 {
            return Err(AppResponse::BadRequest("Map size must be greater than zero".to_string()));
        }
        Ok(())
    }
}
