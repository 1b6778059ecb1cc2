//! File-backed storage for the CLI.
//!
//! The profile is a JSON object mapping storage keys to raw strings, the same
//! shape a browser's localStorage has. Edits are buffered in memory and
//! written back by [`ProfileStorage::save`].

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use dashboard_settings::{SettingsResult, StorageBackend};
use serde_json::{Map, Value};
use tracing::debug;

/// Storage backed by a JSON profile file.
#[derive(Debug, Clone)]
pub struct ProfileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl ProfileStorage {
    /// Read the profile at `path`; a missing file is an empty profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse_entries(&text)
                .with_context(|| format!("profile {} is not valid", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "profile not found; starting empty");
                BTreeMap::new()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Location of the profile file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every entry, ordered by key.
    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Write pending edits back to disk. Does nothing when unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        let text = serde_json::to_string_pretty(&Value::Object(object))?;
        fs::write(&self.path, text + "\n")
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        self.dirty = false;
        debug!(path = %self.path.display(), entries = self.entries.len(), "profile saved");
        Ok(())
    }
}

fn parse_entries(text: &str) -> Result<BTreeMap<String, String>> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    match serde_json::from_str::<Value>(text)? {
        Value::Object(object) => Ok(object
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(raw) => (key, raw),
                other => (key, other.to_string()),
            })
            .collect()),
        _ => Err(anyhow!("expected a JSON object of strings")),
    }
}

impl StorageBackend for ProfileStorage {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        self.dirty |= self.entries.remove(key).is_some();
        Ok(())
    }

    fn clear(&mut self) -> SettingsResult<()> {
        self.dirty |= !self.entries.is_empty();
        self.entries.clear();
        Ok(())
    }

    fn all_entries(&self) -> SettingsResult<BTreeMap<String, String>> {
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_and_save_creates_it() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("profile.json");
        let mut profile = ProfileStorage::open(&path)?;
        assert!(profile.entries().is_empty());
        profile.save()?;
        assert!(!path.exists());

        profile.set("darkMode", "true")?;
        profile.save()?;
        let reopened = ProfileStorage::open(&path)?;
        assert_eq!(reopened.get("darkMode")?, Some("true".to_string()));
        Ok(())
    }

    #[test]
    fn non_string_values_are_kept_as_json_text() -> Result<()> {
        let entries = parse_entries(r#"{"darkMode": true, "apiConfig": {"a": 1}}"#)?;
        assert_eq!(entries["darkMode"], "true");
        assert_eq!(entries["apiConfig"], r#"{"a":1}"#);
        Ok(())
    }

    #[test]
    fn arrays_are_rejected() {
        assert!(parse_entries("[1, 2]").is_err());
        assert!(parse_entries("{").is_err());
    }
}
