//! Typed setting schema and value carriers.
//!
//! # Design
//! - `SettingKey` is the closed set of persisted preferences; the storage key
//!   strings are part of the on-disk contract and must not change.
//! - Every key carries a `SettingKind`, which is the type tag used by the codec.
//! - Choice settings are stored as text; typed views parse leniently so
//!   unrecognized stored text degrades to the documented default variant.

use crate::error::SettingsError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Shape of a setting's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Boolean toggle, stored as `"true"` / `"false"`.
    Flag,
    /// One of a fixed list of strings.
    Choice(&'static [&'static str]),
    /// Free-form text.
    Text,
    /// JSON document, stored as JSON text.
    Json,
}

impl SettingKind {
    /// Check that `value` has the shape this kind requires.
    ///
    /// # Errors
    ///
    /// Returns a machine-readable reason when the value does not fit.
    pub fn check(self, value: &SettingValue) -> Result<(), &'static str> {
        match (self, value) {
            (Self::Flag, SettingValue::Flag(_)) | (Self::Text, SettingValue::Text(_)) => Ok(()),
            (Self::Json, SettingValue::Json(json)) => {
                if json.is_object() || json.is_array() {
                    Ok(())
                } else {
                    Err("expected_object")
                }
            }
            (Self::Choice(options), SettingValue::Text(text)) => {
                if options.contains(&text.as_str()) {
                    Ok(())
                } else {
                    Err("not_an_option")
                }
            }
            (Self::Flag, _) => Err("expected_flag"),
            (Self::Choice(_) | Self::Text, _) => Err("expected_text"),
            (Self::Json, _) => Err("expected_json"),
        }
    }
}

/// Current value of one setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean toggle.
    Flag(bool),
    /// Choice or free-form text.
    Text(String),
    /// Structured JSON document.
    Json(Value),
}

impl SettingValue {
    /// Boolean payload, if this is a flag.
    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// Text payload, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// JSON payload, if this is a document.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// JSON rendering used by exports and structured output.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Flag(value) => Value::Bool(*value),
            Self::Text(value) => Value::String(value.clone()),
            Self::Json(value) => value.clone(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(value) => write!(formatter, "{value}"),
            Self::Text(value) => formatter.write_str(value),
            Self::Json(value) => write!(formatter, "{value}"),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

macro_rules! choice_setting {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            /// Stored text for every variant, in display order.
            pub const OPTIONS: &'static [&'static str] = &[$($text),+];

            /// Stored text for this variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Strict parse of stored text.
            #[must_use]
            pub fn parse(text: &str) -> Option<Self> {
                match text {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Lenient parse; unrecognized text yields the default variant.
            #[must_use]
            pub fn from_text(text: &str) -> Self {
                Self::parse(text).unwrap_or(Self::$default)
            }

            /// Lenient view over a setting value.
            #[must_use]
            pub fn from_value(value: &SettingValue) -> Self {
                value.as_text().map_or(Self::$default, Self::from_text)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl From<$name> for SettingValue {
            fn from(value: $name) -> Self {
                Self::Text(value.as_str().to_string())
            }
        }
    };
}

choice_setting!(
    /// Accent palette used by the dashboard chrome and slideshow tint.
    ThemeColor, default = Primary, {
        /// Purple gradient.
        #[default]
        Primary => "primary",
        /// Green gradient.
        Secondary => "secondary",
        /// Orange gradient.
        Accent => "accent",
        /// Grey gradient.
        Neutral => "neutral",
    }
);

choice_setting!(
    /// Blur radius behind translucent surfaces.
    BackgroundBlur, default = Medium, {
        /// 2px.
        Low => "low",
        /// 6px.
        #[default]
        Medium => "medium",
        /// 12px.
        High => "high",
    }
);

choice_setting!(
    /// Root font size preset.
    FontSize, default = Medium, {
        /// 14px.
        Small => "small",
        /// 16px.
        #[default]
        Medium => "medium",
        /// 18px.
        Large => "large",
    }
);

choice_setting!(
    /// Global animation duration preset.
    AnimationSpeed, default = Normal, {
        /// 0.5s.
        Slow => "slow",
        /// 0.3s.
        #[default]
        Normal => "normal",
        /// 0.2s.
        Fast => "fast",
    }
);

choice_setting!(
    /// Background slideshow rotation interval.
    RotationSpeed, default = FiveMinutes, {
        /// Every two minutes.
        TwoMinutes => "2min",
        /// Every five minutes.
        #[default]
        FiveMinutes => "5min",
        /// Every ten minutes.
        TenMinutes => "10min",
    }
);

choice_setting!(
    /// Engine used by the search bar.
    SearchEngine, default = Both, {
        /// Web search only.
        Google => "google",
        /// Assistant only.
        Ai => "ai",
        /// Open both.
        #[default]
        Both => "both",
    }
);

choice_setting!(
    /// Automatic backup cadence.
    AutoBackup, default = Never, {
        /// Disabled.
        #[default]
        Never => "never",
        /// Once per day.
        Daily => "daily",
        /// Once per week.
        Weekly => "weekly",
    }
);

impl BackgroundBlur {
    /// Blur radius as a CSS length.
    #[must_use]
    pub const fn radius(self) -> &'static str {
        match self {
            Self::Low => "2px",
            Self::Medium => "6px",
            Self::High => "12px",
        }
    }
}

impl FontSize {
    /// Root font size as a CSS length.
    #[must_use]
    pub const fn root_size(self) -> &'static str {
        match self {
            Self::Small => "14px",
            Self::Medium => "16px",
            Self::Large => "18px",
        }
    }
}

impl AnimationSpeed {
    /// Animation duration as a CSS time.
    #[must_use]
    pub const fn duration(self) -> &'static str {
        match self {
            Self::Slow => "0.5s",
            Self::Normal => "0.3s",
            Self::Fast => "0.2s",
        }
    }
}

impl RotationSpeed {
    /// Time between slideshow advances.
    #[must_use]
    pub const fn interval(self) -> Duration {
        match self {
            Self::TwoMinutes => Duration::from_secs(120),
            Self::FiveMinutes => Duration::from_secs(300),
            Self::TenMinutes => Duration::from_secs(600),
        }
    }
}

/// Every persisted preference, named by its storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    /// `darkMode`
    DarkMode,
    /// `themeColor`
    ThemeColor,
    /// `backgroundBlur`
    BackgroundBlur,
    /// `glassEffect`
    GlassEffect,
    /// `fontSize`
    FontSize,
    /// `animationSpeed`
    AnimationSpeed,
    /// `bgRotationSpeed`
    BgRotationSpeed,
    /// `autoClearTasks`
    AutoClearTasks,
    /// `defaultSearch`
    DefaultSearch,
    /// `startupPage`
    StartupPage,
    /// `keyboardShortcuts`
    KeyboardShortcuts,
    /// `weatherWidget`
    WeatherWidget,
    /// `quickNotes`
    QuickNotes,
    /// `todoPanel`
    TodoPanel,
    /// `desktopNotifications`
    DesktopNotifications,
    /// `taskSounds`
    TaskSounds,
    /// `browserAlerts`
    BrowserAlerts,
    /// `dailyReports`
    DailyReports,
    /// `autoBackup`
    AutoBackup,
    /// `dataEncryption`
    DataEncryption,
    /// `privacyMode`
    PrivacyMode,
    /// `developerMode`
    DeveloperMode,
    /// `experimentalFeatures`
    ExperimentalFeatures,
    /// `performanceMode`
    PerformanceMode,
    /// `customCSS`
    CustomCss,
    /// `apiConfig`
    ApiConfig,
}

impl SettingKey {
    /// Number of known settings.
    pub const COUNT: usize = 26;

    /// Every known setting, in load and apply order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::DarkMode,
        Self::ThemeColor,
        Self::BackgroundBlur,
        Self::GlassEffect,
        Self::FontSize,
        Self::AnimationSpeed,
        Self::BgRotationSpeed,
        Self::AutoClearTasks,
        Self::DefaultSearch,
        Self::StartupPage,
        Self::KeyboardShortcuts,
        Self::WeatherWidget,
        Self::QuickNotes,
        Self::TodoPanel,
        Self::DesktopNotifications,
        Self::TaskSounds,
        Self::BrowserAlerts,
        Self::DailyReports,
        Self::AutoBackup,
        Self::DataEncryption,
        Self::PrivacyMode,
        Self::DeveloperMode,
        Self::ExperimentalFeatures,
        Self::PerformanceMode,
        Self::CustomCss,
        Self::ApiConfig,
    ];

    /// Verbatim storage key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DarkMode => "darkMode",
            Self::ThemeColor => "themeColor",
            Self::BackgroundBlur => "backgroundBlur",
            Self::GlassEffect => "glassEffect",
            Self::FontSize => "fontSize",
            Self::AnimationSpeed => "animationSpeed",
            Self::BgRotationSpeed => "bgRotationSpeed",
            Self::AutoClearTasks => "autoClearTasks",
            Self::DefaultSearch => "defaultSearch",
            Self::StartupPage => "startupPage",
            Self::KeyboardShortcuts => "keyboardShortcuts",
            Self::WeatherWidget => "weatherWidget",
            Self::QuickNotes => "quickNotes",
            Self::TodoPanel => "todoPanel",
            Self::DesktopNotifications => "desktopNotifications",
            Self::TaskSounds => "taskSounds",
            Self::BrowserAlerts => "browserAlerts",
            Self::DailyReports => "dailyReports",
            Self::AutoBackup => "autoBackup",
            Self::DataEncryption => "dataEncryption",
            Self::PrivacyMode => "privacyMode",
            Self::DeveloperMode => "developerMode",
            Self::ExperimentalFeatures => "experimentalFeatures",
            Self::PerformanceMode => "performanceMode",
            Self::CustomCss => "customCSS",
            Self::ApiConfig => "apiConfig",
        }
    }

    /// Type tag used by the codec.
    #[must_use]
    pub const fn kind(self) -> SettingKind {
        match self {
            Self::ThemeColor => SettingKind::Choice(ThemeColor::OPTIONS),
            Self::BackgroundBlur => SettingKind::Choice(BackgroundBlur::OPTIONS),
            Self::FontSize => SettingKind::Choice(FontSize::OPTIONS),
            Self::AnimationSpeed => SettingKind::Choice(AnimationSpeed::OPTIONS),
            Self::BgRotationSpeed => SettingKind::Choice(RotationSpeed::OPTIONS),
            Self::DefaultSearch => SettingKind::Choice(SearchEngine::OPTIONS),
            Self::AutoBackup => SettingKind::Choice(AutoBackup::OPTIONS),
            Self::StartupPage | Self::CustomCss => SettingKind::Text,
            Self::ApiConfig => SettingKind::Json,
            Self::DarkMode
            | Self::GlassEffect
            | Self::AutoClearTasks
            | Self::KeyboardShortcuts
            | Self::WeatherWidget
            | Self::QuickNotes
            | Self::TodoPanel
            | Self::DesktopNotifications
            | Self::TaskSounds
            | Self::BrowserAlerts
            | Self::DailyReports
            | Self::DataEncryption
            | Self::PrivacyMode
            | Self::DeveloperMode
            | Self::ExperimentalFeatures
            | Self::PerformanceMode => SettingKind::Flag,
        }
    }

    /// Value used when nothing usable is persisted.
    #[must_use]
    pub fn default_value(self) -> SettingValue {
        match self {
            Self::GlassEffect
            | Self::KeyboardShortcuts
            | Self::QuickNotes
            | Self::TodoPanel
            | Self::TaskSounds
            | Self::BrowserAlerts => SettingValue::Flag(true),
            Self::DarkMode
            | Self::AutoClearTasks
            | Self::WeatherWidget
            | Self::DesktopNotifications
            | Self::DailyReports
            | Self::DataEncryption
            | Self::PrivacyMode
            | Self::DeveloperMode
            | Self::ExperimentalFeatures
            | Self::PerformanceMode => SettingValue::Flag(false),
            Self::ThemeColor => ThemeColor::default().into(),
            Self::BackgroundBlur => BackgroundBlur::default().into(),
            Self::FontSize => FontSize::default().into(),
            Self::AnimationSpeed => AnimationSpeed::default().into(),
            Self::BgRotationSpeed => RotationSpeed::default().into(),
            Self::DefaultSearch => SearchEngine::default().into(),
            Self::AutoBackup => AutoBackup::default().into(),
            Self::StartupPage => SettingValue::from("dashboard"),
            Self::CustomCss => SettingValue::from(""),
            Self::ApiConfig => SettingValue::Json(Value::Object(Map::new())),
        }
    }

    /// Position of this key within [`SettingKey::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a key by its storage name without allocating an error.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| SettingsError::UnknownKey { key: s.to_string() })
    }
}
