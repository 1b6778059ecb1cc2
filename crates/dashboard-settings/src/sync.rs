//! Routing of storage notifications from other tabs into the store.

use crate::effects::DisplayEnvironment;
use crate::model::SettingKey;
use crate::storage::{StorageBackend, StorageChange};
use crate::store::SettingsStore;
use tracing::debug;

/// Why a storage notification did not touch the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another tab cleared the whole storage.
    StorageCleared,
    /// The key is not a setting (tasks, shortcuts, foreign data).
    UnknownKey,
    /// The setting was removed rather than written.
    Removed,
}

impl IgnoreReason {
    /// Stable identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StorageCleared => "storage_cleared",
            Self::UnknownKey => "unknown_key",
            Self::Removed => "removed",
        }
    }
}

/// Result of routing one storage notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The store mirrored the new value of this setting.
    Applied(SettingKey),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

/// Forward `change` to [`SettingsStore::on_external_change`] when it concerns
/// a tracked setting. Never persists.
pub fn route_storage_change<S, E>(
    store: &mut SettingsStore<S, E>,
    change: &StorageChange,
) -> SyncOutcome
where
    S: StorageBackend,
    E: DisplayEnvironment,
{
    let outcome = match (change.key.as_deref(), change.new_value.as_deref()) {
        (None, _) => SyncOutcome::Ignored(IgnoreReason::StorageCleared),
        (Some(name), raw) => match (SettingKey::lookup(name), raw) {
            (None, _) => SyncOutcome::Ignored(IgnoreReason::UnknownKey),
            (Some(_), None) => SyncOutcome::Ignored(IgnoreReason::Removed),
            (Some(key), Some(raw)) => {
                store.on_external_change(key, raw);
                SyncOutcome::Applied(key)
            }
        },
    };
    if let SyncOutcome::Ignored(reason) = outcome {
        debug!(
            key = change.key.as_deref().unwrap_or_default(),
            reason = reason.as_str(),
            "ignoring storage notification"
        );
    }
    outcome
}
