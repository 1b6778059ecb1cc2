//! The single owner of the live settings snapshot.
//!
//! # Design
//! - One store per page, passed explicitly to whatever needs it; there is no
//!   global instance.
//! - `update` is the only local mutation path: validate, persist, apply
//!   effects, swap the snapshot, notify. Persist failures are logged and the
//!   in-memory change still happens.
//! - External changes and reloads skip persistence but otherwise follow the
//!   same apply/swap/notify sequence.

use crate::codec::{decode_external, encode};
use crate::config::StoreConfig;
use crate::effects::{DisplayEnvironment, EffectApplier};
use crate::error::{SettingsError, SettingsResult};
use crate::events::{ChangeOrigin, SettingsNotice, SnapshotUpdate};
use crate::model::{SettingKey, SettingValue};
use crate::snapshot::SettingsSnapshot;
use crate::storage::StorageBackend;
use dashboard_events::{EventBus, EventBusResult, EventEnvelope, SubscriptionId};
use std::rc::Rc;
use tracing::{debug, error};

/// Settings store bound to a storage backend and a display environment.
pub struct SettingsStore<S, E> {
    storage: S,
    environment: E,
    snapshot: Rc<SettingsSnapshot>,
    applier: EffectApplier,
    updates: EventBus<SnapshotUpdate>,
}

impl<S, E> std::fmt::Debug for SettingsStore<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.updates.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl<S: StorageBackend, E: DisplayEnvironment> SettingsStore<S, E> {
    /// Load the snapshot from `storage` and, if configured, apply every
    /// setting to `environment`.
    pub fn open(storage: S, environment: E, config: &StoreConfig) -> Self {
        let snapshot = SettingsSnapshot::load(&storage);
        let mut store = Self {
            storage,
            environment,
            snapshot: Rc::new(snapshot),
            applier: EffectApplier::new(EventBus::with_capacity(config.notice_replay)),
            updates: EventBus::with_capacity(0),
        };
        if config.apply_on_open {
            store
                .applier
                .apply_all(&mut store.environment, &store.snapshot);
        }
        store
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Rc<SettingsSnapshot> {
        Rc::clone(&self.snapshot)
    }

    /// Current value of `key`.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> &SettingValue {
        self.snapshot.get(key)
    }

    /// Change one setting from this context.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] when `value` does not fit the
    /// key's kind. Nothing is persisted or applied in that case. Storage
    /// failures are logged, not returned.
    pub fn update(&mut self, key: SettingKey, value: impl Into<SettingValue>) -> SettingsResult<()> {
        let value = value.into();
        key.kind()
            .check(&value)
            .map_err(|reason| SettingsError::InvalidValue {
                key: key.as_str(),
                value: value.to_string(),
                reason,
            })?;

        let next = self.snapshot.with(key, value.clone());
        if let Err(err) = self.storage.set(key.as_str(), &encode(&value)) {
            error!(key = key.as_str(), error = ?err, "failed to persist setting; keeping in-memory value");
        }
        debug!(key = key.as_str(), value = %value, "setting updated");
        self.commit(key, &value, next, ChangeOrigin::Local);
        Ok(())
    }

    /// Change a setting addressed by its storage key.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownKey`] for names outside the schema and
    /// [`SettingsError::InvalidValue`] as [`Self::update`] does.
    pub fn update_named(&mut self, name: &str, value: impl Into<SettingValue>) -> SettingsResult<()> {
        let key: SettingKey = name.parse()?;
        self.update(key, value)
    }

    /// Mirror a value another context already wrote to storage.
    pub fn on_external_change(&mut self, key: SettingKey, raw: &str) {
        let value = decode_external(key, raw);
        let next = self.snapshot.with(key, value.clone());
        debug!(key = key.as_str(), value = %value, "mirroring external setting change");
        self.commit(key, &value, next, ChangeOrigin::External);
    }

    /// Rebuild the snapshot from storage and reapply every setting.
    pub fn reload(&mut self) {
        let next = SettingsSnapshot::load(&self.storage);
        self.applier.apply_all(&mut self.environment, &next);
        self.snapshot = Rc::new(next);
        debug!("settings reloaded from storage");
        let _ = self.updates.publish(SnapshotUpdate {
            snapshot: Rc::clone(&self.snapshot),
            changed: None,
            origin: ChangeOrigin::Reload,
        });
    }

    fn commit(
        &mut self,
        key: SettingKey,
        value: &SettingValue,
        next: SettingsSnapshot,
        origin: ChangeOrigin,
    ) {
        self.applier
            .apply(&mut self.environment, key, value, &next);
        self.snapshot = Rc::new(next);
        let _ = self.updates.publish(SnapshotUpdate {
            snapshot: Rc::clone(&self.snapshot),
            changed: Some(key),
            origin,
        });
    }
}

impl<S, E> SettingsStore<S, E> {
    /// Observe every snapshot change.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SnapshotUpdate) + 'static,
    {
        self.updates
            .subscribe(None, move |envelope: &EventEnvelope<SnapshotUpdate>| {
                handler(&envelope.event);
            })
    }

    /// Stop observing snapshot changes.
    ///
    /// # Errors
    ///
    /// Returns an error when `subscription` is not registered.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> EventBusResult<()> {
        self.updates.unsubscribe(subscription)
    }

    /// Theme and rotation notices produced by the effect applier.
    #[must_use]
    pub const fn notices(&self) -> &EventBus<SettingsNotice> {
        self.applier.notices()
    }

    /// Underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the storage backend, for collaborators that write
    /// non-setting keys (tasks, shortcuts).
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Display environment the store applies effects to.
    #[must_use]
    pub const fn environment(&self) -> &E {
        &self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::HeadlessEnvironment;
    use crate::model::{FontSize, RotationSpeed, ThemeColor};
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::cell::RefCell;

    fn open(storage: MemoryStorage) -> SettingsStore<MemoryStorage, HeadlessEnvironment> {
        SettingsStore::open(storage, HeadlessEnvironment, &StoreConfig::default())
    }

    #[test]
    fn update_persists_and_swaps_snapshot() -> SettingsResult<()> {
        let mut store = open(MemoryStorage::new());
        let before = store.snapshot();
        store.update(SettingKey::FontSize, FontSize::Large)?;
        store.update(SettingKey::DarkMode, true)?;
        store.update(SettingKey::ApiConfig, json!({"endpoint": "local"}))?;

        assert_eq!(before.font_size(), FontSize::Medium);
        assert_eq!(store.snapshot().font_size(), FontSize::Large);
        let entries = store.storage().entries();
        assert_eq!(entries["fontSize"], "large");
        assert_eq!(entries["darkMode"], "true");
        assert_eq!(entries["apiConfig"], r#"{"endpoint":"local"}"#);
        Ok(())
    }

    #[test]
    fn mismatched_values_are_rejected_without_side_effects() {
        let mut store = open(MemoryStorage::new());
        let err = store.update(SettingKey::DarkMode, "yes").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue {
                key: "darkMode",
                reason: "expected_flag",
                ..
            }
        ));
        let err = store.update(SettingKey::FontSize, "huge").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue {
                reason: "not_an_option",
                ..
            }
        ));
        assert!(store.storage().entries().is_empty());
        assert_eq!(*store.snapshot(), SettingsSnapshot::defaults());
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut store = open(MemoryStorage::new());
        let err = store.update_named("sidebarWidth", "300").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownKey { ref key } if key == "sidebarWidth"));
        assert!(store.storage().entries().is_empty());
    }

    #[test]
    fn named_updates_resolve_storage_keys() -> SettingsResult<()> {
        let mut store = open(MemoryStorage::new());
        store.update_named("customCSS", "body { margin: 0 }")?;
        assert_eq!(store.snapshot().custom_css(), "body { margin: 0 }");
        Ok(())
    }

    #[test]
    fn persist_failure_still_updates_memory() -> SettingsResult<()> {
        let mut store = open(MemoryStorage::with_quota(4));
        store.update(SettingKey::ThemeColor, "accent")?;
        assert!(store.storage().entries().is_empty());
        assert_eq!(store.get(SettingKey::ThemeColor), &SettingValue::from("accent"));
        Ok(())
    }

    #[test]
    fn external_change_does_not_write() {
        let mut store = open(MemoryStorage::new());
        store.on_external_change(SettingKey::DarkMode, "true");
        assert!(store.snapshot().dark_mode());
        assert!(store.storage().entries().is_empty());
    }

    #[test]
    fn subscribers_see_origin_and_key() -> SettingsResult<()> {
        let mut store = open(MemoryStorage::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = store.subscribe(move |update| {
            sink.borrow_mut().push((update.changed, update.origin));
        });

        store.update(SettingKey::QuickNotes, false)?;
        store.on_external_change(SettingKey::TodoPanel, "false");
        store.reload();
        assert!(store.unsubscribe(subscription).is_ok());
        store.update(SettingKey::QuickNotes, true)?;

        assert_eq!(
            *seen.borrow(),
            vec![
                (Some(SettingKey::QuickNotes), ChangeOrigin::Local),
                (Some(SettingKey::TodoPanel), ChangeOrigin::External),
                (None, ChangeOrigin::Reload),
            ]
        );
        Ok(())
    }

    #[test]
    fn reload_picks_up_storage_written_behind_the_store() -> SettingsResult<()> {
        let mut store = open(MemoryStorage::new());
        store.storage_mut().set("fontSize", "small")?;
        assert_eq!(store.snapshot().font_size(), FontSize::Medium);
        store.reload();
        assert_eq!(store.snapshot().font_size(), FontSize::Small);
        Ok(())
    }

    #[test]
    fn open_broadcasts_initial_notices_for_replay() {
        let store = open(MemoryStorage::from_entries([("themeColor", "neutral")]));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _ = store
            .notices()
            .subscribe(Some(0), move |envelope| sink.borrow_mut().push(envelope.event));
        assert_eq!(
            *seen.borrow(),
            vec![
                SettingsNotice::ThemeChanged(ThemeColor::Neutral),
                SettingsNotice::RotationSpeedChanged(RotationSpeed::FiveMinutes),
            ]
        );
    }
}
