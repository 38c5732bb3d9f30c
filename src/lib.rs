//! # Inventory Catalog Core
//!
//! A local item catalog for inventory apps, designed for FFI (Foreign Function
//! Interface) integration with Flutter, desktop and other cross-platform hosts.
//! Items (name, type, description, images) are kept in memory, newest first,
//! and persisted as a single JSON document in an LMDB key-value store.
//!
//! ## Features
//!
//! - **Load-on-start**: the stored catalog is revived on load; an empty or
//!   unreadable store falls back to a seed collection which is written back
//! - **Persist-on-change**: every new item rewrites the stored collection
//! - **Search**: case-insensitive substring search over name, type and description
//! - **Graceful storage failures**: read and write errors are logged, never fatal
//! - **Safe error handling**: No `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use inventory_catalog_core::{create_catalog, load_catalog, search_items, close_catalog};
//! use std::ffi::CString;
//!
//! let name = CString::new("my_catalog").unwrap();
//! let catalog = create_catalog(name.as_ptr());
//!
//! // Load stored items (or the seed collection)
//! let _items = load_catalog(catalog);
//!
//! let query = CString::new("shirt").unwrap();
//! let _shirts = search_items(catalog, query.as_ptr());
//!
//! close_catalog(catalog);
//! ```
//!
//! From Rust, use [`CatalogState`](catalog_state::CatalogState) directly with
//! any [`KeyValueStore`](storage::KeyValueStore).
//!
//! ## FFI Functions
//!
//! - [`create_catalog`] / [`create_catalog_with_config`] - Open a catalog (not yet loaded)
//! - [`load_catalog`] - Load stored items, or the seed collection
//! - [`is_loading`] - Whether loading has completed
//! - [`get_items`] - All items, newest first
//! - [`add_item`] - Validate and add a new item
//! - [`get_item_by_id`] - Look up an item by ID
//! - [`search_items`] - Filter items by a free-text query
//! - [`reset_catalog`] - Clear the stored catalog and reload the seed collection
//! - [`close_catalog`] - Release the catalog
//! - [`free_c_string`] - Release a string returned by this library
//!
//! Every string returned is a JSON-serialized [`AppResponse`], e.g.
//! `{"Ok":"[...]"}` or `{"NotFound":"No item found with id: 42"}`.

pub mod app_response;
pub mod catalog_state;
pub mod config;
pub mod item_model;
pub mod search;
pub mod seed;
pub mod storage;

use crate::catalog_state::CatalogState;
use crate::config::CatalogConfig;
use crate::item_model::NewItem;
use crate::storage::LmdbStore;

use log::{info, warn};
use serde::Serialize;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

pub use crate::app_response::AppResponse;

/// Catalog instance handed across the FFI boundary.
pub type CatalogHandle = CatalogState<LmdbStore>;

/// Opens a catalog stored under the given name.
///
/// The LMDB environment is created in `<name>.lmdb` if it does not exist yet.
/// The returned catalog is not loaded: call [`load_catalog`] before reading.
///
/// # Parameters
///
/// * `name` - A null-terminated C string containing the catalog name or path prefix
///
/// # Returns
///
/// Returns a pointer to the [`CatalogHandle`] on success, or a null pointer on failure.
/// Release it with [`close_catalog`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use inventory_catalog_core::create_catalog;
///
/// let name = CString::new("inventory").unwrap();
/// let catalog = create_catalog(name.as_ptr());
///
/// if !catalog.is_null() {
///     // Catalog opened successfully
/// }
/// ```
///
/// # Errors
///
/// Returns null pointer if:
/// - Input name pointer is null
/// - Input string contains invalid UTF-8
/// - Storage initialization fails
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_catalog(name: *const c_char) -> *mut CatalogHandle {
    if name.is_null() {
        warn!("Null name pointer passed to create_catalog");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    open_catalog(CatalogConfig::new(name_str))
}

/// Opens a catalog from a JSON [`CatalogConfig`].
///
/// Omitted fields use their defaults:
///
/// ```json
/// { "name": "inventory", "storage_key": "items-storage", "map_size": 10485760 }
/// ```
///
/// Returns a null pointer on invalid input or storage failure.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_catalog_with_config(config_json: *const c_char) -> *mut CatalogHandle {
    if config_json.is_null() {
        warn!("Null config pointer passed to create_catalog_with_config");
        return std::ptr::null_mut();
    }

    let json = match unsafe { CStr::from_ptr(config_json).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match serde_json::from_str::<CatalogConfig>(json) {
        Ok(config) => open_catalog(config),
        Err(e) => {
            warn!("Invalid catalog config: {e}");
            std::ptr::null_mut()
        }
    }
}

fn open_catalog(config: CatalogConfig) -> *mut CatalogHandle {
    info!("Attempting to open catalog at: {}", config.lmdb_dir());

    match LmdbStore::init(&config) {
        Ok(store) => {
            info!("✅ Catalog storage opened successfully");
            Box::into_raw(Box::new(CatalogState::new(store, config.storage_key)))
        }
        Err(e) => {
            warn!("❌ Failed to open catalog storage: {e}");
            warn!("Attempted path: {}", config.lmdb_dir());
            std::ptr::null_mut()
        }
    }
}

/// Loads the catalog and returns its items.
///
/// Reads the stored collection; if nothing is stored or the stored value
/// cannot be parsed, the seed collection is used and written back. Calling
/// this on an already loaded catalog just returns the current items.
///
/// # Returns
///
/// `{"Ok":"[<items>]"}` on success, `BadRequest` on a null pointer.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_catalog(state: *mut CatalogHandle) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => return bad_request("Null state pointer passed to load_catalog"),
    };

    json_response(Ok(state.initialize()))
}

/// Returns `true` until [`load_catalog`] has completed. A null pointer reports `true`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn is_loading(state: *const CatalogHandle) -> bool {
    match unsafe { state.as_ref() } {
        Some(s) => s.is_loading(),
        None => {
            warn!("Null state pointer passed to is_loading");
            true
        }
    }
}

/// Retrieves all items, newest first.
///
/// # Returns
///
/// `{"Ok":"[<items>]"}`, or `NotReady` if the catalog has not been loaded.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_items(state: *const CatalogHandle) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => return bad_request("Null state pointer passed to get_items"),
    };

    json_response(state.items())
}

/// Validates and adds a new item.
///
/// The catalog assigns `id` and `createdAt`; the new item is placed first and
/// the catalog is persisted.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "Cap",
///   "type": "Accessories",
///   "description": "Blue cap",
///   "coverImage": "data:image/png;base64,...",
///   "additionalImages": []
/// }
/// ```
///
/// `type` must be one of `Shirt`, `Pant`, `Shoes`, `Sports Gear`,
/// `Accessories`, `Other`.
///
/// # Returns
///
/// `{"Ok":"<item>"}` with the created item, `ValidationError` when name,
/// description or cover image is missing, `SerializationError` on malformed JSON.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use inventory_catalog_core::{create_catalog, load_catalog, add_item};
///
/// let name = CString::new("inventory").unwrap();
/// let catalog = create_catalog(name.as_ptr());
/// load_catalog(catalog);
///
/// let json = CString::new(
///     r#"{"name":"Cap","type":"Accessories","description":"Blue cap","coverImage":"img1","additionalImages":[]}"#,
/// ).unwrap();
/// let result = add_item(catalog, json.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_item(state: *mut CatalogHandle, json_ptr: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => return bad_request("Null state pointer passed to add_item"),
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let fields: NewItem = match serde_json::from_str(&json_str) {
        Ok(f) => f,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    if let Err(e) = fields.validate() {
        return response_to_c_string(&e);
    }

    json_response(state.add_item(fields))
}

/// Retrieves an item by its ID.
///
/// # Returns
///
/// `{"Ok":"<item>"}`, or `NotFound` if no item has that ID.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_item_by_id(state: *const CatalogHandle, id: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => return bad_request("Null state pointer passed to get_item_by_id"),
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    match state.get_item_by_id(&id_str) {
        Ok(Some(item)) => json_response(Ok(item)),
        Ok(None) => {
            let error = AppResponse::NotFound(format!("No item found with id: {id_str}"));
            response_to_c_string(&error)
        }
        Err(e) => response_to_c_string(&e),
    }
}

/// Returns the items matching a free-text query.
///
/// Matching is a case-insensitive substring test against name, type and
/// description. An empty query returns every item.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_items(state: *const CatalogHandle, query: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => return bad_request("Null state pointer passed to search_items"),
    };

    let query_str = match c_ptr_to_string(query, "query") {
        Ok(q) => q,
        Err(error_ptr) => return error_ptr,
    };

    json_response(state.search(&query_str))
}

/// Clears the stored catalog and reloads it, which restores the seed collection.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn reset_catalog(state: *mut CatalogHandle) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => return bad_request("Null state pointer passed to reset_catalog"),
    };

    json_response(state.reset())
}

/// Closes the catalog and frees the handle.
///
/// The pointer must not be used afterwards.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_catalog(state: *mut CatalogHandle) -> *const c_char {
    if state.is_null() {
        return bad_request("Null state pointer passed to close_catalog");
    }

    let catalog = unsafe { Box::from_raw(state) };
    let mut store = (*catalog).into_storage();

    match store.close() {
        Ok(()) => {
            let success = AppResponse::success("Catalog closed successfully");
            response_to_c_string(&success)
        }
        Err(e) => response_to_c_string(&e),
    }
}

/// Frees a string previously returned by this library. Null is ignored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_c_string(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

/// Serializes a successful value into an `Ok` envelope, or passes the error through.
fn json_response<T: Serialize>(result: Result<T, AppResponse>) -> *const c_char {
    match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
            Err(e) => {
                let error = AppResponse::SerializationError(format!("Failed to serialize result: {e}"));
                response_to_c_string(&error)
            }
        },
        Err(e) => response_to_c_string(&e),
    }
}

fn bad_request(msg: &str) -> *const c_char {
    response_to_c_string(&AppResponse::BadRequest(msg.to_string()))
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Returns a null pointer if serialization or C string creation fails.
/// The caller releases the string with [`free_c_string`].
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// # Returns
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - A `BadRequest` response for null pointers or invalid UTF-8
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
