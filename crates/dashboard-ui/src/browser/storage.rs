//! localStorage backend.
//!
//! Values are read and written through the raw `web_sys::Storage` handle so
//! they stay bit-exact (`true`, `large`, `{"k":1}`) instead of being JSON
//! quoted, which keeps them readable by the existing persisted data.

use std::collections::BTreeMap;

use dashboard_settings::{SettingsError, SettingsResult, StorageBackend};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

/// The page's origin-scoped localStorage.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| storage_error("get", key, &err))
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| storage_error("set", key, &err))
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| storage_error("remove", key, &err))
    }

    fn clear(&mut self) -> SettingsResult<()> {
        LocalStorage::raw()
            .clear()
            .map_err(|err| storage_error("clear", "*", &err))
    }

    fn all_entries(&self) -> SettingsResult<BTreeMap<String, String>> {
        let raw = LocalStorage::raw();
        let length = raw
            .length()
            .map_err(|err| storage_error("length", "*", &err))?;
        let mut entries = BTreeMap::new();
        for index in 0..length {
            let Some(key) = raw
                .key(index)
                .map_err(|err| storage_error("key", "*", &err))?
            else {
                continue;
            };
            if let Some(value) = self.get(&key)? {
                entries.insert(key, value);
            }
        }
        Ok(entries)
    }
}

fn storage_error(operation: &'static str, key: &str, err: &JsValue) -> SettingsError {
    let detail = err
        .as_string()
        .unwrap_or_else(|| format!("{err:?}"));
    console::error!("storage operation failed", operation, key, detail.as_str());
    SettingsError::Persist {
        key: key.to_string(),
        detail,
    }
}
