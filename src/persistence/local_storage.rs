//! Browser LocalStorage backend

use wasm_bindgen::JsValue;

use super::KeyValueStorage;
use crate::error::{Result, StoreError};

/// `window.localStorage`, looked up on every call so a page that disables
/// storage mid-session degrades instead of holding a dead handle
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    /// Whether the browser exposes LocalStorage at all
    pub fn is_available() -> bool {
        storage().is_ok()
    }
}

fn storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| unavailable("no window"))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| unavailable("localStorage disabled"))
}

fn unavailable(reason: &str) -> StoreError {
    StoreError::StorageUnavailable(reason.to_string())
}

fn js_error(err: JsValue) -> StoreError {
    let reason = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"));
    StoreError::StorageUnavailable(reason)
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Throws QuotaExceededError when full
        storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        storage()?.remove_item(key).map_err(js_error)
    }
}
