//! Display constants and auxiliary storage keys.
//!
//! # Design
//! - Centralize DOM-facing names so the applier and browser bindings agree.
//! - Keep auxiliary (non-setting) storage keys next to each other for backups.

/// Class toggled on the document root while dark mode is on.
pub const DARK_CLASS: &str = "dark";
/// CSS custom property carrying the backdrop blur radius.
pub const BACKDROP_BLUR_VAR: &str = "--backdrop-blur";
/// CSS custom property carrying the glass surface filter.
pub const GLASS_EFFECT_VAR: &str = "--glass-effect";
/// CSS custom property carrying the animation duration.
pub const ANIMATION_SPEED_VAR: &str = "--animation-speed";
/// Filter applied to glass surfaces while the glass effect is on.
pub const GLASS_FILTER_ON: &str = "blur(10px) saturate(180%)";
/// Filter applied to glass surfaces while the glass effect is off.
pub const GLASS_FILTER_OFF: &str = "none";
/// Animation duration forced by performance mode.
pub const PERFORMANCE_ANIMATION: &str = "0.1s";
/// Element id of the injected user stylesheet.
pub const CUSTOM_CSS_ELEMENT_ID: &str = "custom-css";

/// Storage key holding the JSON-encoded to-do list.
pub const TASKS_KEY: &str = "dash_todos";
/// Storage key holding the JSON-encoded shortcut list.
pub const SHORTCUTS_KEY: &str = "dash_shortcuts";
/// Version stamped into exported backups.
pub const BACKUP_VERSION: &str = "1.0";
