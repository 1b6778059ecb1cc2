//! Translation of setting changes into display mutations.
//!
//! # Design
//! - `plan` is pure: it maps one changed setting (plus the snapshot, for
//!   settings that depend on each other) to a list of [`Effect`]s.
//! - [`EffectApplier`] executes a plan against a [`DisplayEnvironment`] and the
//!   notice bus. It never touches persistent storage.
//! - Every effect is a replace-style write, so applying a plan twice leaves
//!   the environment exactly as applying it once.

use crate::defaults::{
    ANIMATION_SPEED_VAR, BACKDROP_BLUR_VAR, CUSTOM_CSS_ELEMENT_ID, DARK_CLASS, GLASS_EFFECT_VAR,
    GLASS_FILTER_OFF, GLASS_FILTER_ON, PERFORMANCE_ANIMATION,
};
use crate::events::SettingsNotice;
use crate::model::{
    AnimationSpeed, BackgroundBlur, FontSize, RotationSpeed, SettingKey, SettingValue, ThemeColor,
};
use crate::snapshot::SettingsSnapshot;
use dashboard_events::EventBus;
use tracing::debug;

/// Group of mounted elements restyled directly for immediate feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Surface {
    /// Elements carrying a backdrop blur.
    Backdrop,
    /// Translucent "glass" panels.
    Glass,
}

/// One display mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add or remove a class on the document root.
    RootClass {
        /// Class name.
        class: &'static str,
        /// Whether the class should be present.
        enabled: bool,
    },
    /// Set the root font size.
    RootFontSize(&'static str),
    /// Set a CSS custom property on the document root.
    CssVariable {
        /// Property name, including the leading dashes.
        name: &'static str,
        /// Property value.
        value: String,
    },
    /// Set the backdrop filter of every mounted element of a surface group.
    SurfaceFilter {
        /// Affected surface group.
        surface: Surface,
        /// Filter value.
        filter: String,
    },
    /// Replace the text of the dedicated injected stylesheet.
    Stylesheet {
        /// Element id of the stylesheet.
        element_id: &'static str,
        /// Stylesheet text.
        css: String,
    },
    /// Broadcast a notice to interested widgets.
    Notice(SettingsNotice),
}

/// Display capabilities the applier writes to.
pub trait DisplayEnvironment {
    /// Add (`enabled`) or remove a class on the document root.
    fn toggle_root_class(&mut self, class: &str, enabled: bool);
    /// Set the root font size.
    fn set_root_font_size(&mut self, size: &str);
    /// Set a CSS custom property on the document root.
    fn set_css_variable(&mut self, name: &str, value: &str);
    /// Set the backdrop filter of every mounted element in `surface`.
    fn set_surface_filter(&mut self, surface: Surface, filter: &str);
    /// Create the stylesheet `element_id` if needed and replace its text.
    fn replace_stylesheet(&mut self, element_id: &str, css: &str);
}

/// Environment for hosts without a display (CLI, tests that only check state).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEnvironment;

impl DisplayEnvironment for HeadlessEnvironment {
    fn toggle_root_class(&mut self, _class: &str, _enabled: bool) {}
    fn set_root_font_size(&mut self, _size: &str) {}
    fn set_css_variable(&mut self, _name: &str, _value: &str) {}
    fn set_surface_filter(&mut self, _surface: Surface, _filter: &str) {}
    fn replace_stylesheet(&mut self, _element_id: &str, _css: &str) {}
}

/// Effects implied by `key` taking `value`, given the rest of `snapshot`.
#[must_use]
pub fn plan(key: SettingKey, value: &SettingValue, snapshot: &SettingsSnapshot) -> Vec<Effect> {
    match key {
        SettingKey::DarkMode => vec![Effect::RootClass {
            class: DARK_CLASS,
            enabled: value.as_flag().unwrap_or(false),
        }],
        SettingKey::ThemeColor => vec![Effect::Notice(SettingsNotice::ThemeChanged(
            ThemeColor::from_value(value),
        ))],
        SettingKey::FontSize => vec![Effect::RootFontSize(
            FontSize::from_value(value).root_size(),
        )],
        SettingKey::BackgroundBlur => {
            let radius = BackgroundBlur::from_value(value).radius();
            vec![
                Effect::CssVariable {
                    name: BACKDROP_BLUR_VAR,
                    value: radius.to_string(),
                },
                Effect::SurfaceFilter {
                    surface: Surface::Backdrop,
                    filter: format!("blur({radius})"),
                },
            ]
        }
        SettingKey::GlassEffect => {
            let filter = if value.as_flag().unwrap_or(false) {
                GLASS_FILTER_ON
            } else {
                GLASS_FILTER_OFF
            };
            vec![
                Effect::CssVariable {
                    name: GLASS_EFFECT_VAR,
                    value: filter.to_string(),
                },
                Effect::SurfaceFilter {
                    surface: Surface::Glass,
                    filter: filter.to_string(),
                },
            ]
        }
        SettingKey::AnimationSpeed => {
            let duration = if snapshot.performance_mode() {
                PERFORMANCE_ANIMATION
            } else {
                AnimationSpeed::from_value(value).duration()
            };
            vec![animation_effect(duration)]
        }
        SettingKey::PerformanceMode => {
            let duration = if value.as_flag().unwrap_or(false) {
                PERFORMANCE_ANIMATION
            } else {
                snapshot.animation_speed().duration()
            };
            vec![animation_effect(duration)]
        }
        SettingKey::BgRotationSpeed => vec![Effect::Notice(SettingsNotice::RotationSpeedChanged(
            RotationSpeed::from_value(value),
        ))],
        SettingKey::CustomCss => vec![Effect::Stylesheet {
            element_id: CUSTOM_CSS_ELEMENT_ID,
            css: value.as_text().unwrap_or_default().to_string(),
        }],
        SettingKey::AutoClearTasks
        | SettingKey::DefaultSearch
        | SettingKey::StartupPage
        | SettingKey::KeyboardShortcuts
        | SettingKey::WeatherWidget
        | SettingKey::QuickNotes
        | SettingKey::TodoPanel
        | SettingKey::DesktopNotifications
        | SettingKey::TaskSounds
        | SettingKey::BrowserAlerts
        | SettingKey::DailyReports
        | SettingKey::AutoBackup
        | SettingKey::DataEncryption
        | SettingKey::PrivacyMode
        | SettingKey::DeveloperMode
        | SettingKey::ExperimentalFeatures
        | SettingKey::ApiConfig => Vec::new(),
    }
}

fn animation_effect(duration: &str) -> Effect {
    Effect::CssVariable {
        name: ANIMATION_SPEED_VAR,
        value: duration.to_string(),
    }
}

/// Executes effect plans against a display and the notice bus.
#[derive(Debug, Clone)]
pub struct EffectApplier {
    notices: EventBus<SettingsNotice>,
}

impl EffectApplier {
    /// Applier publishing notices on `notices`.
    #[must_use]
    pub const fn new(notices: EventBus<SettingsNotice>) -> Self {
        Self { notices }
    }

    /// Bus carrying theme and rotation notices.
    #[must_use]
    pub const fn notices(&self) -> &EventBus<SettingsNotice> {
        &self.notices
    }

    /// Plan and execute the effects of `key` taking `value`.
    pub fn apply<E: DisplayEnvironment + ?Sized>(
        &self,
        environment: &mut E,
        key: SettingKey,
        value: &SettingValue,
        snapshot: &SettingsSnapshot,
    ) {
        let effects = plan(key, value, snapshot);
        if !effects.is_empty() {
            debug!(key = key.as_str(), effects = effects.len(), "applying setting effects");
        }
        for effect in effects {
            self.execute(environment, effect);
        }
    }

    /// Apply every setting in `snapshot`, as done once when the page mounts.
    pub fn apply_all<E: DisplayEnvironment + ?Sized>(
        &self,
        environment: &mut E,
        snapshot: &SettingsSnapshot,
    ) {
        for (key, value) in snapshot.iter() {
            self.apply(environment, key, value, snapshot);
        }
    }

    fn execute<E: DisplayEnvironment + ?Sized>(&self, environment: &mut E, effect: Effect) {
        match effect {
            Effect::RootClass { class, enabled } => environment.toggle_root_class(class, enabled),
            Effect::RootFontSize(size) => environment.set_root_font_size(size),
            Effect::CssVariable { name, value } => environment.set_css_variable(name, &value),
            Effect::SurfaceFilter { surface, filter } => {
                environment.set_surface_filter(surface, &filter);
            }
            Effect::Stylesheet { element_id, css } => {
                environment.replace_stylesheet(element_id, &css);
            }
            Effect::Notice(notice) => {
                let _ = self.notices.publish(notice);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn css(name: &'static str, value: &str) -> Effect {
        Effect::CssVariable {
            name,
            value: value.to_string(),
        }
    }

    #[test]
    fn font_size_maps_presets_and_defaults_unknown_to_medium() {
        let snapshot = SettingsSnapshot::defaults();
        let cases = [
            ("small", "14px"),
            ("medium", "16px"),
            ("large", "18px"),
            ("enormous", "16px"),
        ];
        for (text, expected) in cases {
            assert_eq!(
                plan(SettingKey::FontSize, &SettingValue::from(text), &snapshot),
                vec![Effect::RootFontSize(expected)],
                "{text}"
            );
        }
    }

    #[test]
    fn dark_mode_toggles_root_class() {
        let snapshot = SettingsSnapshot::defaults();
        assert_eq!(
            plan(SettingKey::DarkMode, &SettingValue::Flag(true), &snapshot),
            vec![Effect::RootClass {
                class: "dark",
                enabled: true
            }]
        );
    }

    #[test]
    fn background_blur_sets_variable_and_restyles_backdrops() {
        let snapshot = SettingsSnapshot::defaults();
        assert_eq!(
            plan(SettingKey::BackgroundBlur, &SettingValue::from("high"), &snapshot),
            vec![
                css("--backdrop-blur", "12px"),
                Effect::SurfaceFilter {
                    surface: Surface::Backdrop,
                    filter: "blur(12px)".into()
                },
            ]
        );
    }

    #[test]
    fn glass_effect_switches_between_filter_and_none() {
        let snapshot = SettingsSnapshot::defaults();
        let on = plan(SettingKey::GlassEffect, &SettingValue::Flag(true), &snapshot);
        assert_eq!(on[0], css("--glass-effect", "blur(10px) saturate(180%)"));
        let off = plan(SettingKey::GlassEffect, &SettingValue::Flag(false), &snapshot);
        assert_eq!(
            off[1],
            Effect::SurfaceFilter {
                surface: Surface::Glass,
                filter: "none".into()
            }
        );
    }

    #[test]
    fn performance_mode_overrides_and_restores_animation_speed() {
        let slow = SettingsSnapshot::defaults()
            .with(SettingKey::AnimationSpeed, AnimationSpeed::Slow.into());
        let boosted = slow.with(SettingKey::PerformanceMode, SettingValue::Flag(true));
        assert_eq!(
            plan(SettingKey::PerformanceMode, &SettingValue::Flag(true), &boosted),
            vec![css("--animation-speed", "0.1s")]
        );
        let restored = slow.with(SettingKey::PerformanceMode, SettingValue::Flag(false));
        assert_eq!(
            plan(SettingKey::PerformanceMode, &SettingValue::Flag(false), &restored),
            vec![css("--animation-speed", "0.5s")]
        );
    }

    #[test]
    fn animation_speed_respects_active_performance_mode() {
        let boosted = SettingsSnapshot::defaults()
            .with(SettingKey::PerformanceMode, SettingValue::Flag(true));
        assert_eq!(
            plan(SettingKey::AnimationSpeed, &SettingValue::from("fast"), &boosted),
            vec![css("--animation-speed", "0.1s")]
        );
        assert_eq!(
            plan(
                SettingKey::AnimationSpeed,
                &SettingValue::from("fast"),
                &SettingsSnapshot::defaults()
            ),
            vec![css("--animation-speed", "0.2s")]
        );
    }

    #[test]
    fn custom_css_targets_dedicated_stylesheet() {
        assert_eq!(
            plan(
                SettingKey::CustomCss,
                &SettingValue::from("body{}"),
                &SettingsSnapshot::defaults()
            ),
            vec![Effect::Stylesheet {
                element_id: "custom-css",
                css: "body{}".into()
            }]
        );
    }

    #[test]
    fn settings_without_display_effects_plan_nothing() {
        let snapshot = SettingsSnapshot::defaults();
        for key in [
            SettingKey::AutoClearTasks,
            SettingKey::DefaultSearch,
            SettingKey::TodoPanel,
            SettingKey::KeyboardShortcuts,
            SettingKey::QuickNotes,
            SettingKey::ApiConfig,
        ] {
            assert!(plan(key, snapshot.get(key), &snapshot).is_empty(), "{key}");
        }
    }

    #[test]
    fn applier_broadcasts_theme_and_rotation_notices() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _ = bus.subscribe(None, move |envelope| sink.borrow_mut().push(envelope.event));

        let applier = EffectApplier::new(bus);
        let snapshot = SettingsSnapshot::defaults();
        let mut display = HeadlessEnvironment;
        applier.apply(
            &mut display,
            SettingKey::ThemeColor,
            &SettingValue::from("accent"),
            &snapshot,
        );
        applier.apply(
            &mut display,
            SettingKey::BgRotationSpeed,
            &SettingValue::from("10min"),
            &snapshot,
        );

        assert_eq!(
            *seen.borrow(),
            vec![
                SettingsNotice::ThemeChanged(ThemeColor::Accent),
                SettingsNotice::RotationSpeedChanged(RotationSpeed::TenMinutes),
            ]
        );
    }
}
