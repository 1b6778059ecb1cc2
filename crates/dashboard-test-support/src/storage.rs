//! Storage shared by several simulated tabs.
//!
//! Each [`TabStorage`] handle behaves like one tab's view of localStorage:
//! writes land in the shared map immediately and a [`StorageChange`] is
//! queued for every *other* tab, never for the writer.

use dashboard_settings::{SettingsResult, StorageBackend, StorageChange};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Hub {
    entries: BTreeMap<String, String>,
    inboxes: Vec<VecDeque<StorageChange>>,
    writes: Vec<Vec<(String, String)>>,
}

impl Hub {
    fn broadcast(&mut self, writer: usize, change: &StorageChange) {
        for (tab, inbox) in self.inboxes.iter_mut().enumerate() {
            if tab != writer {
                inbox.push_back(change.clone());
            }
        }
    }
}

/// Origin-wide storage; hand out one [`TabStorage`] per simulated tab.
#[derive(Debug, Clone, Default)]
pub struct SharedStorage {
    hub: Rc<RefCell<Hub>>,
}

impl SharedStorage {
    /// Empty shared storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared storage pre-populated without notifying anyone.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        storage.hub.borrow_mut().entries = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        storage
    }

    /// Open a new tab handle.
    #[must_use]
    pub fn tab(&self) -> TabStorage {
        let mut hub = self.hub.borrow_mut();
        hub.inboxes.push(VecDeque::new());
        hub.writes.push(Vec::new());
        TabStorage {
            hub: Rc::clone(&self.hub),
            id: hub.inboxes.len() - 1,
        }
    }

    /// Copy of every stored entry.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.hub.borrow().entries.clone()
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.hub.borrow().entries.get(key).cloned()
    }
}

/// One tab's handle onto [`SharedStorage`].
#[derive(Debug)]
pub struct TabStorage {
    hub: Rc<RefCell<Hub>>,
    id: usize,
}

impl TabStorage {
    /// Take every notification queued for this tab.
    #[must_use]
    pub fn drain(&self) -> Vec<StorageChange> {
        self.hub.borrow_mut().inboxes[self.id].drain(..).collect()
    }

    /// Every `(key, value)` this tab wrote, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.hub.borrow().writes[self.id].clone()
    }

    /// Number of writes this tab issued.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.hub.borrow().writes[self.id].len()
    }
}

impl StorageBackend for TabStorage {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.hub.borrow().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        let mut hub = self.hub.borrow_mut();
        hub.entries.insert(key.to_string(), value.to_string());
        hub.writes[self.id].push((key.to_string(), value.to_string()));
        hub.broadcast(self.id, &StorageChange::written(key, value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        let mut hub = self.hub.borrow_mut();
        hub.entries.remove(key);
        hub.broadcast(self.id, &StorageChange::removed(key));
        Ok(())
    }

    fn clear(&mut self) -> SettingsResult<()> {
        let mut hub = self.hub.borrow_mut();
        hub.entries.clear();
        hub.broadcast(self.id, &StorageChange::cleared());
        Ok(())
    }

    fn all_entries(&self) -> SettingsResult<BTreeMap<String, String>> {
        Ok(self.hub.borrow().entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_notify_other_tabs_only() -> SettingsResult<()> {
        let shared = SharedStorage::new();
        let mut first = shared.tab();
        let second = shared.tab();

        first.set("darkMode", "true")?;

        assert!(first.drain().is_empty());
        assert_eq!(
            second.drain(),
            vec![StorageChange::written("darkMode", "true")]
        );
        assert!(second.drain().is_empty());
        assert_eq!(second.get("darkMode")?, Some("true".into()));
        assert_eq!(first.write_count(), 1);
        assert_eq!(second.write_count(), 0);
        Ok(())
    }

    #[test]
    fn clear_and_remove_are_broadcast() -> SettingsResult<()> {
        let shared = SharedStorage::with_entries([("fontSize", "large")]);
        let mut first = shared.tab();
        let second = shared.tab();
        first.remove("fontSize")?;
        first.clear()?;
        assert_eq!(
            second.drain(),
            vec![StorageChange::removed("fontSize"), StorageChange::cleared()]
        );
        assert!(shared.entries().is_empty());
        Ok(())
    }
}
