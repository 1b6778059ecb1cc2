//! Typed notifications published by the settings store.

use crate::model::{RotationSpeed, SettingKey, ThemeColor};
use crate::snapshot::SettingsSnapshot;
use dashboard_events::EventKind;
use std::rc::Rc;

/// Broadcast for widgets that react to a setting without reading the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsNotice {
    /// Accent palette changed.
    ThemeChanged(ThemeColor),
    /// Slideshow rotation interval changed.
    RotationSpeedChanged(RotationSpeed),
}

impl EventKind for SettingsNotice {
    fn kind(&self) -> &'static str {
        match self {
            Self::ThemeChanged(_) => "theme_changed",
            Self::RotationSpeedChanged(_) => "rotation_speed_changed",
        }
    }
}

/// Where a snapshot change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// `update` in this context.
    Local,
    /// Storage notification from another context.
    External,
    /// Full reload from storage (import, clear).
    Reload,
}

/// Delivered to snapshot subscribers after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotUpdate {
    /// Snapshot after the change.
    pub snapshot: Rc<SettingsSnapshot>,
    /// Setting that changed; `None` after a reload.
    pub changed: Option<SettingKey>,
    /// Source of the change.
    pub origin: ChangeOrigin,
}

impl EventKind for SnapshotUpdate {
    fn kind(&self) -> &'static str {
        match self.origin {
            ChangeOrigin::Local => "snapshot_local",
            ChangeOrigin::External => "snapshot_external",
            ChangeOrigin::Reload => "snapshot_reload",
        }
    }
}
