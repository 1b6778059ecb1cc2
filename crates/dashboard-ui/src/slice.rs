//! Yewdux slice mirroring the settings snapshot for widgets.
//!
//! # Design
//! - The settings store stays the single writer; the slice is a read model
//!   refreshed from every `SnapshotUpdate`.
//! - `revision` increases on every refresh so widgets can cheaply tell
//!   updates apart even when the snapshot is unchanged.

use std::rc::Rc;

use dashboard_settings::{ChangeOrigin, SettingKey, SettingsSnapshot, SnapshotUpdate};
use yewdux::store::Store;

/// Read model of the live settings.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct SettingsSlice {
    /// Latest snapshot.
    pub snapshot: Rc<SettingsSnapshot>,
    /// Number of updates absorbed.
    pub revision: u64,
    /// Setting touched by the latest update, if it was a single setting.
    pub last_changed: Option<SettingKey>,
    /// Source of the latest update.
    pub last_origin: Option<ChangeOrigin>,
}

impl SettingsSlice {
    /// Slice seeded with a freshly opened snapshot.
    #[must_use]
    pub const fn seeded(snapshot: Rc<SettingsSnapshot>) -> Self {
        Self {
            snapshot,
            revision: 0,
            last_changed: None,
            last_origin: None,
        }
    }

    /// Fold one store update into the slice.
    pub fn absorb(&mut self, update: &SnapshotUpdate) {
        self.snapshot = Rc::clone(&update.snapshot);
        self.revision = self.revision.saturating_add(1);
        self.last_changed = update.changed;
        self.last_origin = Some(update.origin);
    }
}
