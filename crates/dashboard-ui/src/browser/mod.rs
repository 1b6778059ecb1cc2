//! Browser adapters for the settings core.

pub mod bridge;
pub mod display;
pub mod storage;

use dashboard_settings::SettingsStore;

pub use display::DocumentEnvironment;
pub use storage::BrowserStorage;

/// Settings store bound to localStorage and the live document.
pub type BrowserStore = SettingsStore<BrowserStorage, DocumentEnvironment>;
