//! Immutable, complete view of every setting.
//!
//! # Design
//! - A snapshot can only be built from defaults, so every key is always
//!   present; replacing a value yields a new snapshot.
//! - Loading never fails: unreadable or undecodable entries fall back to
//!   their default and are logged.

use crate::codec::decode_persisted;
use crate::model::{
    AnimationSpeed, AutoBackup, BackgroundBlur, FontSize, RotationSpeed, SearchEngine, SettingKey,
    SettingValue, ThemeColor,
};
use crate::storage::StorageBackend;
use serde_json::{Map, Value};
use tracing::warn;

/// Every known setting mapped to its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSnapshot {
    values: [SettingValue; SettingKey::COUNT],
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}

impl SettingsSnapshot {
    /// Snapshot holding every documented default.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            values: SettingKey::ALL.map(SettingKey::default_value),
        }
    }

    /// Build the startup snapshot from persistent storage.
    ///
    /// Missing entries use their default. Entries that cannot be read or
    /// decoded are replaced by their default without affecting other keys.
    #[must_use]
    pub fn load<S: StorageBackend + ?Sized>(storage: &S) -> Self {
        let mut snapshot = Self::defaults();
        for key in SettingKey::ALL {
            let raw = match storage.get(key.as_str()) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(err) => {
                    warn!(key = key.as_str(), error = %err, "failed to read setting; using default");
                    continue;
                }
            };
            match decode_persisted(key, &raw) {
                Ok(value) => snapshot.values[key.index()] = value,
                Err(err) => {
                    warn!(key = key.as_str(), raw = %raw, error = ?err, "failed to decode setting; using default");
                }
            }
        }
        snapshot
    }

    /// Current value of `key`.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> &SettingValue {
        &self.values[key.index()]
    }

    /// Copy of this snapshot with `key` replaced by `value`.
    #[must_use]
    pub fn with(&self, key: SettingKey, value: SettingValue) -> Self {
        let mut next = self.clone();
        next.values[key.index()] = value;
        next
    }

    /// Iterate over every setting in key order.
    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &SettingValue)> {
        SettingKey::ALL.into_iter().zip(self.values.iter())
    }

    /// Snapshot as a JSON object keyed by storage key.
    #[must_use]
    pub fn to_json(&self) -> Map<String, Value> {
        self.iter()
            .map(|(key, value)| (key.as_str().to_string(), value.to_json()))
            .collect()
    }

    /// Boolean view of a flag; non-flag values read as the key's default.
    #[must_use]
    pub fn flag(&self, key: SettingKey) -> bool {
        self.get(key)
            .as_flag()
            .or_else(|| key.default_value().as_flag())
            .unwrap_or(false)
    }

    /// Text view of a setting; non-text values read as empty.
    #[must_use]
    pub fn text(&self, key: SettingKey) -> &str {
        self.get(key).as_text().unwrap_or_default()
    }

    /// Whether dark mode is on.
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.flag(SettingKey::DarkMode)
    }

    /// Whether performance mode is on.
    #[must_use]
    pub fn performance_mode(&self) -> bool {
        self.flag(SettingKey::PerformanceMode)
    }

    /// Whether glass surfaces are enabled.
    #[must_use]
    pub fn glass_effect(&self) -> bool {
        self.flag(SettingKey::GlassEffect)
    }

    /// Selected accent palette.
    #[must_use]
    pub fn theme_color(&self) -> ThemeColor {
        ThemeColor::from_value(self.get(SettingKey::ThemeColor))
    }

    /// Selected backdrop blur.
    #[must_use]
    pub fn background_blur(&self) -> BackgroundBlur {
        BackgroundBlur::from_value(self.get(SettingKey::BackgroundBlur))
    }

    /// Selected root font size.
    #[must_use]
    pub fn font_size(&self) -> FontSize {
        FontSize::from_value(self.get(SettingKey::FontSize))
    }

    /// Selected animation speed.
    #[must_use]
    pub fn animation_speed(&self) -> AnimationSpeed {
        AnimationSpeed::from_value(self.get(SettingKey::AnimationSpeed))
    }

    /// Selected slideshow rotation speed.
    #[must_use]
    pub fn rotation_speed(&self) -> RotationSpeed {
        RotationSpeed::from_value(self.get(SettingKey::BgRotationSpeed))
    }

    /// Selected search engine.
    #[must_use]
    pub fn default_search(&self) -> SearchEngine {
        SearchEngine::from_value(self.get(SettingKey::DefaultSearch))
    }

    /// Selected backup cadence.
    #[must_use]
    pub fn auto_backup(&self) -> AutoBackup {
        AutoBackup::from_value(self.get(SettingKey::AutoBackup))
    }

    /// User stylesheet text.
    #[must_use]
    pub fn custom_css(&self) -> &str {
        self.text(SettingKey::CustomCss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    #[test]
    fn empty_storage_yields_every_default() {
        let snapshot = SettingsSnapshot::load(&MemoryStorage::new());
        assert_eq!(snapshot, SettingsSnapshot::defaults());
        assert_eq!(snapshot.iter().count(), SettingKey::ALL.len());
        for key in SettingKey::ALL {
            assert_eq!(snapshot.get(key), &key.default_value());
        }
        assert_eq!(snapshot.font_size(), FontSize::Medium);
        assert!(snapshot.glass_effect());
    }

    #[test]
    fn persisted_values_override_defaults() {
        let storage = MemoryStorage::from_entries([
            ("darkMode", "true"),
            ("fontSize", "large"),
            ("apiConfig", r#"{"token":"abc"}"#),
        ]);
        let snapshot = SettingsSnapshot::load(&storage);
        assert!(snapshot.dark_mode());
        assert_eq!(snapshot.font_size(), FontSize::Large);
        assert_eq!(
            snapshot.get(SettingKey::ApiConfig),
            &SettingValue::Json(json!({"token": "abc"}))
        );
    }

    #[test]
    fn malformed_entry_only_resets_its_own_key() {
        let storage = MemoryStorage::from_entries([
            ("apiConfig", "{not json"),
            ("darkMode", "true"),
            ("themeColor", "accent"),
        ]);
        let snapshot = SettingsSnapshot::load(&storage);
        assert_eq!(
            snapshot.get(SettingKey::ApiConfig),
            &SettingKey::ApiConfig.default_value()
        );
        assert!(snapshot.dark_mode());
        assert_eq!(snapshot.theme_color(), ThemeColor::Accent);
    }

    #[test]
    fn with_replaces_a_single_key() {
        let base = SettingsSnapshot::defaults();
        let next = base.with(SettingKey::FontSize, FontSize::Small.into());
        assert_eq!(next.font_size(), FontSize::Small);
        assert_eq!(base.font_size(), FontSize::Medium);
        assert_eq!(next.iter().count(), base.iter().count());
    }

    #[test]
    fn flag_view_tolerates_text_values() {
        let snapshot =
            SettingsSnapshot::defaults().with(SettingKey::GlassEffect, SettingValue::from("??"));
        assert!(snapshot.glass_effect());
    }

    #[test]
    fn json_export_uses_storage_keys() {
        let json = SettingsSnapshot::defaults().to_json();
        assert_eq!(json.len(), SettingKey::ALL.len());
        assert_eq!(json["customCSS"], json!(""));
        assert_eq!(json["bgRotationSpeed"], json!("5min"));
        assert_eq!(json["apiConfig"], json!({}));
    }
}
