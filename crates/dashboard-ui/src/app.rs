//! Browser session wiring: store, slice, notices and the cross-tab listener.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use dashboard_settings::{
    Backup, ImportReport, SettingKey, SettingValue, SettingsNotice, SettingsResult, StoreConfig,
    clear_all, export_backup, import_backup,
};
use gloo::console;
use yewdux::prelude::Dispatch;

use crate::browser::{BrowserStorage, BrowserStore, DocumentEnvironment, bridge};
use crate::notices::NoticeFeed;
use crate::slice::SettingsSlice;

/// Handle to the page's settings store, cloned into every widget that edits
/// settings. Widgets that only read use the [`SettingsSlice`]; the slideshow
/// and themed widgets follow [`DashboardSession::notices`].
#[derive(Clone)]
pub struct DashboardSession {
    store: Rc<RefCell<BrowserStore>>,
    notices: NoticeFeed,
}

impl std::fmt::Debug for DashboardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardSession").finish_non_exhaustive()
    }
}

/// Open the settings store against localStorage, apply every stored setting
/// to the document and start following other tabs for the page's lifetime.
#[must_use]
pub fn run_app() -> DashboardSession {
    console_error_panic_hook::set_once();

    let store = BrowserStore::open(BrowserStorage, DocumentEnvironment, &StoreConfig::default());
    let dispatch = Dispatch::<SettingsSlice>::global();
    dispatch.set(SettingsSlice::seeded(store.snapshot()));
    store.subscribe(move |update| {
        dispatch.reduce_mut(|slice| slice.absorb(update));
    });
    let notices = NoticeFeed::new(store.notices().clone());
    notices.subscribe(None, |_, notice| match notice {
        SettingsNotice::ThemeChanged(theme) => {
            console::debug!("theme changed", theme.as_str());
        }
        SettingsNotice::RotationSpeedChanged(speed) => {
            console::debug!("rotation speed changed", speed.as_str());
        }
    });

    let store = Rc::new(RefCell::new(store));
    bridge::listen(Rc::clone(&store)).forget();
    console::info!("dashboard settings ready");
    DashboardSession { store, notices }
}

impl DashboardSession {
    /// Theme and rotation notices, with replay for widgets mounted late.
    #[must_use]
    pub fn notices(&self) -> NoticeFeed {
        self.notices.clone()
    }

    fn with_store<T>(
        &self,
        action: impl FnOnce(&mut BrowserStore) -> SettingsResult<T>,
    ) -> Option<SettingsResult<T>> {
        let Ok(mut store) = self.store.try_borrow_mut() else {
            console::warn!("settings store busy");
            return None;
        };
        Some(action(&mut store))
    }

    /// Change one setting from a widget.
    ///
    /// Returns `None` when called re-entrantly from a store callback.
    pub fn update_setting(
        &self,
        key: SettingKey,
        value: impl Into<SettingValue>,
    ) -> Option<SettingsResult<()>> {
        let value = value.into();
        self.with_store(move |store| store.update(key, value))
    }

    /// Snapshot the dashboard into a backup document stamped with the current time.
    #[must_use]
    pub fn export_current(&self) -> Option<Backup> {
        self.with_store(|store| Ok(export_backup(&store.snapshot(), store.storage(), Utc::now())))
            .and_then(Result::ok)
    }

    /// Restore a backup document picked by the user.
    pub fn import_document(&self, text: &str) -> Option<SettingsResult<ImportReport>> {
        self.with_store(|store| import_backup(store, text))
    }

    /// Wipe the dashboard's storage and fall back to defaults.
    pub fn clear_dashboard(&self) -> Option<SettingsResult<()>> {
        self.with_store(clear_all)
    }
}
