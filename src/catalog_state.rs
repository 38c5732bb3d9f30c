use log::{debug, error, info, warn};

use crate::app_response::AppResponse;
use crate::item_model::{Item, NewItem};
use crate::search::filter_items;
use crate::seed::seed_items;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    NotReady,
    Ready(Vec<Item>),
}

/// Owns the item collection and keeps it in sync with a [`KeyValueStore`].
///
/// A fresh state is `NotReady`; call [`initialize`](Self::initialize) before
/// reading. Items are kept newest first.
pub struct CatalogState<S: KeyValueStore> {
    storage: S,
    storage_key: String,
    lifecycle: Lifecycle,
}

impl<S: KeyValueStore> CatalogState<S> {
    pub fn new(storage: S, storage_key: impl Into<String>) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
            lifecycle: Lifecycle::NotReady,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::NotReady)
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Loads the persisted collection, falling back to the seed items when
    /// nothing usable is stored. Never fails; problems are logged.
    pub fn initialize(&mut self) -> &[Item] {
        if self.is_loading() {
            let items = self.load();
            self.lifecycle = Lifecycle::Ready(items);
        } else {
            debug!("Catalog already initialized");
        }
        self.ready_items()
    }

    fn ready_items(&self) -> &[Item] {
        match &self.lifecycle {
            Lifecycle::Ready(items) => items,
            Lifecycle::NotReady => &[],
        }
    }

    fn load(&self) -> Vec<Item> {
        match self.storage.read(&self.storage_key) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Item>>(&json) {
                Ok(items) => {
                    info!("Loaded {} items from '{}'", items.len(), self.storage_key);
                    return items;
                }
                Err(e) => warn!("Stored catalog under '{}' is unreadable: {e}", self.storage_key),
            },
            Ok(None) => info!("No stored catalog under '{}'; using seed items", self.storage_key),
            Err(e) => error!("Error loading items: {e}"),
        }

        let seed = seed_items();
        self.persist(&seed);
        seed
    }

    fn persist(&self, items: &[Item]) {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize catalog: {e}");
                return;
            }
        };
        match self.storage.write(&self.storage_key, &json) {
            Ok(()) => debug!("Persisted {} items", items.len()),
            Err(e) => warn!("Failed to persist catalog, keeping in-memory state: {e}"),
        }
    }

    pub fn items(&self) -> Result<&[Item], AppResponse> {
        match &self.lifecycle {
            Lifecycle::Ready(items) => Ok(items),
            Lifecycle::NotReady => Err(not_ready("items")),
        }
    }

    /// Creates an item from `fields`, puts it first and persists the catalog.
    ///
    /// No validation happens here; see [`NewItem::validate`].
    pub fn add_item(&mut self, fields: NewItem) -> Result<Item, AppResponse> {
        let items = match &mut self.lifecycle {
            Lifecycle::Ready(items) => items,
            Lifecycle::NotReady => return Err(not_ready("add_item")),
        };

        let item = fields.into_item();
        items.insert(0, item.clone());
        info!("Added item {} ({})", item.id, item.name);

        self.persist(self.ready_items());
        Ok(item)
    }

    pub fn get_item_by_id(&self, id: &str) -> Result<Option<&Item>, AppResponse> {
        Ok(self.items()?.iter().find(|item| item.id == id))
    }

    pub fn search(&self, query: &str) -> Result<Vec<&Item>, AppResponse> {
        Ok(filter_items(self.items()?, query))
    }

    /// Drops the persisted catalog and loads again from scratch.
    pub fn reset(&mut self) -> Result<&[Item], AppResponse> {
        let removed = self.storage.remove(&self.storage_key)?;
        info!("Reset catalog '{}' (stored value present: {removed})", self.storage_key);
        self.lifecycle = Lifecycle::NotReady;
        Ok(self.initialize())
    }

    /// Ends the lifecycle and hands back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn not_ready(operation: &str) -> AppResponse {
    AppResponse::NotReady(format!("{operation} called before the catalog finished loading"))
}
