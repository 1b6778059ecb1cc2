//! Persistent key-value storage capability.
//!
//! # Design
//! - The store only needs `get`, `set`, `remove` and `clear` on string values;
//!   `all_entries` serves the statistics view.
//! - Change notifications from other contexts arrive separately as
//!   [`StorageChange`] values; backends never call back into the store.

use crate::error::{SettingsError, SettingsResult};
use std::collections::BTreeMap;

/// Origin-scoped string storage shared across execution contexts.
pub trait StorageBackend {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read at all.
    fn get(&self, key: &str) -> SettingsResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Persist`] when the write is refused.
    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()>;

    /// Delete the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Persist`] when the delete is refused.
    fn remove(&mut self, key: &str) -> SettingsResult<()>;

    /// Delete every value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Persist`] when the backend refuses.
    fn clear(&mut self) -> SettingsResult<()>;

    /// Copy of every stored entry, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be enumerated.
    fn all_entries(&self) -> SettingsResult<BTreeMap<String, String>>;
}

/// Size of the storage serialized as one JSON object, the figure the
/// statistics view reports as storage used.
///
/// # Errors
///
/// Propagates enumeration failures from the backend.
pub fn used_bytes<S: StorageBackend + ?Sized>(storage: &S) -> SettingsResult<usize> {
    let entries = storage.all_entries()?;
    Ok(serde_json::to_string(&entries)?.len())
}

/// Notification that another context modified storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    /// Key that changed; `None` when the whole storage was cleared.
    pub key: Option<String>,
    /// New raw value; `None` when the key was removed.
    pub new_value: Option<String>,
}

impl StorageChange {
    /// A write of `value` under `key`.
    #[must_use]
    pub fn written(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            new_value: Some(value.into()),
        }
    }

    /// Removal of `key`.
    #[must_use]
    pub fn removed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            new_value: None,
        }
    }

    /// Whole-storage clear.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            key: None,
            new_value: None,
        }
    }
}

/// In-memory storage with an optional byte quota, mirroring browser limits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    /// Empty, unbounded storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty storage that refuses writes once keys plus values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota_bytes: Some(bytes),
        }
    }

    /// Storage pre-populated with raw entries.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            quota_bytes: None,
        }
    }

    /// Every stored entry, ordered by key.
    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(SettingsError::Persist {
                    key: key.to_string(),
                    detail: format!("quota of {quota} bytes exceeded"),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> SettingsResult<()> {
        self.entries.clear();
        Ok(())
    }

    fn all_entries(&self) -> SettingsResult<BTreeMap<String, String>> {
        Ok(self.entries.clone())
    }
}
