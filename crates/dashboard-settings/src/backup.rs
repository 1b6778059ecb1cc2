//! Whole-profile export, import, wipe and statistics.
//!
//! # Design
//! - Export reads the task and shortcut lists straight from storage; they
//!   belong to other widgets and are carried through as opaque JSON.
//! - Import writes raw entries and then reloads the store, so imported
//!   settings take the same decode path as any value found at startup.

use crate::codec::encode;
use crate::defaults::{BACKUP_VERSION, SHORTCUTS_KEY, TASKS_KEY};
use crate::effects::DisplayEnvironment;
use crate::error::{SettingsError, SettingsResult};
use crate::model::{SettingKey, SettingValue, ThemeColor};
use crate::snapshot::SettingsSnapshot;
use crate::storage::{StorageBackend, used_bytes};
use crate::store::SettingsStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

/// Exported profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// To-do items as stored by the task widget.
    pub tasks: Vec<Value>,
    /// Shortcut tiles as stored by the shortcut widget.
    pub shortcuts: Vec<Value>,
    /// Every setting keyed by storage key.
    pub settings: Map<String, Value>,
    /// Moment of export.
    pub export_date: DateTime<Utc>,
    /// Document format version.
    pub version: String,
}

impl Backup {
    /// Pretty-printed JSON text of the document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Serialize`] if serialisation fails.
    pub fn to_json_pretty(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Suggested download name, e.g. `dashboard-backup-2024-05-01.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "dashboard-backup-{}.json",
            self.export_date.format("%Y-%m-%d")
        )
    }
}

/// Build an export document from the live snapshot and storage.
#[must_use]
pub fn export_backup<S: StorageBackend + ?Sized>(
    snapshot: &SettingsSnapshot,
    storage: &S,
    exported_at: DateTime<Utc>,
) -> Backup {
    Backup {
        tasks: read_list(storage, TASKS_KEY),
        shortcuts: read_list(storage, SHORTCUTS_KEY),
        settings: snapshot.to_json(),
        export_date: exported_at,
        version: BACKUP_VERSION.to_string(),
    }
}

/// What an import wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Number of tasks restored, if the document carried a task list.
    pub tasks: Option<usize>,
    /// Number of shortcuts restored, if the document carried any.
    pub shortcuts: Option<usize>,
    /// Settings written to storage.
    pub settings_written: usize,
    /// Setting names in the document that are not part of the schema.
    pub unknown_settings: Vec<String>,
    /// Entries the storage backend refused.
    pub failed_writes: usize,
}

#[derive(Debug, Deserialize)]
struct ImportDocument {
    #[serde(default)]
    tasks: Option<Value>,
    #[serde(default)]
    shortcuts: Option<Value>,
    #[serde(default)]
    settings: Option<Map<String, Value>>,
}

/// Restore a document produced by [`export_backup`] and reload the store.
///
/// # Errors
///
/// Returns [`SettingsError::Import`] when `text` is not a JSON object of the
/// expected shape. Nothing is written in that case.
pub fn import_backup<S, E>(
    store: &mut SettingsStore<S, E>,
    text: &str,
) -> SettingsResult<ImportReport>
where
    S: StorageBackend,
    E: DisplayEnvironment,
{
    let document = parse_document(text)?;

    let mut report = ImportReport::default();
    let storage = store.storage_mut();
    if let Some(tasks) = document.tasks.filter(|value| !value.is_null()) {
        if write_entry(storage, TASKS_KEY, &tasks.to_string(), &mut report) {
            report.tasks = Some(list_len(&tasks));
        }
    }
    if let Some(shortcuts) = document.shortcuts.filter(|value| !value.is_null()) {
        if write_entry(storage, SHORTCUTS_KEY, &shortcuts.to_string(), &mut report) {
            report.shortcuts = Some(list_len(&shortcuts));
        }
    }
    for (name, value) in document.settings.unwrap_or_default() {
        let Some(key) = SettingKey::lookup(&name) else {
            warn!(key = %name, "skipping unknown setting in backup");
            report.unknown_settings.push(name);
            continue;
        };
        let raw = encode(&setting_value(value));
        if write_entry(storage, key.as_str(), &raw, &mut report) {
            report.settings_written += 1;
        }
    }

    store.reload();
    info!(
        settings = report.settings_written,
        skipped = report.unknown_settings.len(),
        failed = report.failed_writes,
        "backup imported"
    );
    Ok(report)
}

fn parse_document(text: &str) -> SettingsResult<ImportDocument> {
    let invalid = |err: serde_json::Error| SettingsError::Import {
        detail: err.to_string(),
    };
    match serde_json::from_str::<Value>(text).map_err(invalid)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(invalid),
        _ => Err(SettingsError::Import {
            detail: "backup must be a JSON object".to_string(),
        }),
    }
}

/// Wipe every stored entry and reload the store with defaults.
///
/// # Errors
///
/// Returns [`SettingsError::Persist`] when the backend refuses to clear.
pub fn clear_all<S, E>(store: &mut SettingsStore<S, E>) -> SettingsResult<()>
where
    S: StorageBackend,
    E: DisplayEnvironment,
{
    store.storage_mut().clear()?;
    store.reload();
    info!("all dashboard data cleared");
    Ok(())
}

/// Summary counts shown by the statistics action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Total to-do items.
    pub total_tasks: usize,
    /// To-do items marked done.
    pub completed_tasks: usize,
    /// Shortcut tiles.
    pub shortcuts: usize,
    /// Selected accent palette.
    pub theme: ThemeColor,
    /// Whether dark mode is on.
    pub dark_mode: bool,
    /// Size of the whole storage serialized as a JSON object.
    pub storage_bytes: usize,
}

/// Compute statistics from the snapshot and the widget data in storage.
#[must_use]
pub fn stats<S: StorageBackend + ?Sized>(snapshot: &SettingsSnapshot, storage: &S) -> DashboardStats {
    let tasks = read_list(storage, TASKS_KEY);
    let completed_tasks = tasks
        .iter()
        .filter(|task| task.get("done").and_then(Value::as_bool) == Some(true))
        .count();
    DashboardStats {
        total_tasks: tasks.len(),
        completed_tasks,
        shortcuts: read_list(storage, SHORTCUTS_KEY).len(),
        theme: snapshot.theme_color(),
        dark_mode: snapshot.dark_mode(),
        storage_bytes: used_bytes(storage).unwrap_or_else(|err| {
            warn!(error = ?err, "failed to measure storage usage");
            0
        }),
    }
}

fn read_list<S: StorageBackend + ?Sized>(storage: &S, key: &str) -> Vec<Value> {
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key, error = %err, "stored list is not a JSON array; treating as empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(key, error = ?err, "failed to read stored list");
            Vec::new()
        }
    }
}

fn list_len(value: &Value) -> usize {
    value.as_array().map_or(0, Vec::len)
}

fn setting_value(value: Value) -> SettingValue {
    match value {
        Value::Bool(flag) => SettingValue::Flag(flag),
        Value::String(text) => SettingValue::Text(text),
        other => SettingValue::Json(other),
    }
}

fn write_entry<S: StorageBackend + ?Sized>(
    storage: &mut S,
    key: &str,
    raw: &str,
    report: &mut ImportReport,
) -> bool {
    match storage.set(key, raw) {
        Ok(()) => true,
        Err(err) => {
            error!(key, error = ?err, "failed to write imported entry");
            report.failed_writes += 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::effects::HeadlessEnvironment;
    use crate::model::FontSize;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;
    use serde_json::json;

    fn store(storage: MemoryStorage) -> SettingsStore<MemoryStorage, HeadlessEnvironment> {
        SettingsStore::open(storage, HeadlessEnvironment, &StoreConfig::default())
    }

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn export_carries_widget_data_and_every_setting() -> SettingsResult<()> {
        let storage = MemoryStorage::from_entries([
            ("dash_todos", r#"[{"text":"ship","done":true}]"#),
            ("dash_shortcuts", "not json"),
            ("darkMode", "true"),
        ]);
        let store = store(storage);
        let backup = export_backup(&store.snapshot(), store.storage(), exported_at());

        assert_eq!(backup.tasks.len(), 1);
        assert!(backup.shortcuts.is_empty());
        assert_eq!(backup.settings["darkMode"], json!(true));
        assert_eq!(backup.settings.len(), SettingKey::COUNT);
        assert_eq!(backup.file_name(), "dashboard-backup-2024-05-01.json");

        let text = backup.to_json_pretty()?;
        let parsed: Value = serde_json::from_str(&text)?;
        assert_eq!(parsed["version"], json!("1.0"));
        assert_eq!(parsed["exportDate"], json!("2024-05-01T08:30:00Z"));
        Ok(())
    }

    #[test]
    fn import_writes_known_entries_and_reloads() -> SettingsResult<()> {
        let mut store = store(MemoryStorage::new());
        let document = json!({
            "tasks": [{"text": "a", "done": false}, {"text": "b", "done": true}],
            "settings": {
                "fontSize": "large",
                "darkMode": true,
                "apiConfig": {"token": "t"},
                "sidebarWidth": 320
            }
        });
        let report = import_backup(&mut store, &document.to_string())?;

        assert_eq!(report.tasks, Some(2));
        assert_eq!(report.shortcuts, None);
        assert_eq!(report.settings_written, 3);
        assert_eq!(report.unknown_settings, vec!["sidebarWidth".to_string()]);
        assert_eq!(store.snapshot().font_size(), FontSize::Large);
        assert!(store.snapshot().dark_mode());
        assert_eq!(store.storage().entries()["apiConfig"], r#"{"token":"t"}"#);
        assert!(!store.storage().entries().contains_key("sidebarWidth"));

        let stats = stats(&store.snapshot(), store.storage());
        assert_eq!((stats.total_tasks, stats.completed_tasks), (2, 1));
        Ok(())
    }

    #[test]
    fn invalid_documents_write_nothing() {
        let mut store = store(MemoryStorage::new());
        for text in ["{oops", "[1, 2]", r#"{"settings": 5}"#] {
            let err = import_backup(&mut store, text).unwrap_err();
            assert!(matches!(err, SettingsError::Import { .. }), "{text}");
        }
        assert!(store.storage().entries().is_empty());
    }

    #[test]
    fn clear_all_restores_defaults() -> SettingsResult<()> {
        let mut store = store(MemoryStorage::from_entries([
            ("darkMode", "true"),
            ("dash_todos", "[]"),
        ]));
        clear_all(&mut store)?;
        assert!(store.storage().entries().is_empty());
        assert_eq!(*store.snapshot(), SettingsSnapshot::defaults());
        Ok(())
    }

    #[test]
    fn stats_report_theme_and_counts() {
        let storage = MemoryStorage::from_entries([
            ("dash_shortcuts", r#"[{"name":"mail"},{"name":"docs"}]"#),
            ("themeColor", "accent"),
        ]);
        let snapshot = SettingsSnapshot::load(&storage);
        let stats = stats(&snapshot, &storage);
        assert_eq!(
            stats,
            DashboardStats {
                total_tasks: 0,
                completed_tasks: 0,
                shortcuts: 2,
                theme: ThemeColor::Accent,
                dark_mode: false,
                storage_bytes: r#"{"dash_shortcuts":"[{\"name\":\"mail\"},{\"name\":\"docs\"}]","themeColor":"accent"}"#
                    .len(),
            }
        );
    }

    #[test]
    fn refused_list_writes_are_not_reported_as_restored() -> SettingsResult<()> {
        let mut store = store(MemoryStorage::with_quota(8));
        let document = json!({"tasks": [{"text": "a", "done": false}], "shortcuts": []});
        let report = import_backup(&mut store, &document.to_string())?;

        assert_eq!(report.tasks, None);
        assert_eq!(report.shortcuts, None);
        assert_eq!(report.failed_writes, 2);
        assert!(store.storage().entries().is_empty());
        Ok(())
    }
}
