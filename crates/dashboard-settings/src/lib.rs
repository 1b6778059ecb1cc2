#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unused_imports, unused_must_use, unreachable_pub, missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! Settings core for the personal dashboard.
//!
//! The crate owns the typed preference schema, the persisted string codec,
//! the live snapshot store, the table of display effects each preference
//! drives, and the routing of storage notifications from other tabs. It is
//! free of DOM types: storage and display are reached through the
//! [`StorageBackend`] and [`DisplayEnvironment`] traits so the same core runs
//! in the browser, in the CLI and in tests.
//!
//! Layout: `model.rs` (keys, kinds, values, choice enums), `codec.rs`
//! (persisted text), `snapshot.rs` (complete view + startup load),
//! `store.rs` (`SettingsStore`), `effects.rs` (effect table + applier),
//! `sync.rs` (cross-tab routing), `backup.rs` (export/import/clear/stats),
//! `storage.rs` (backend trait + in-memory backend), `events.rs` (typed
//! notifications), `config.rs`, `defaults.rs`, `error.rs`.

pub mod backup;
pub mod codec;
pub mod config;
pub mod defaults;
pub mod effects;
pub mod error;
pub mod events;
pub mod model;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod sync;

pub use backup::{
    Backup, DashboardStats, ImportReport, clear_all, export_backup, import_backup, stats,
};
pub use codec::{decode_external, decode_persisted, encode};
pub use config::StoreConfig;
pub use effects::{DisplayEnvironment, Effect, EffectApplier, HeadlessEnvironment, Surface, plan};
pub use error::{SettingsError, SettingsResult};
pub use events::{ChangeOrigin, SettingsNotice, SnapshotUpdate};
pub use model::{
    AnimationSpeed, AutoBackup, BackgroundBlur, FontSize, RotationSpeed, SearchEngine, SettingKey,
    SettingKind, SettingValue, ThemeColor,
};
pub use snapshot::SettingsSnapshot;
pub use storage::{MemoryStorage, StorageBackend, StorageChange, used_bytes};
pub use store::SettingsStore;
pub use sync::{IgnoreReason, SyncOutcome, route_storage_change};
