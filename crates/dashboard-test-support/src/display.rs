//! Display environment that records state instead of touching a document.

use dashboard_settings::{DisplayEnvironment, Surface};
use std::collections::{BTreeMap, BTreeSet};

/// Plain-data model of the document root and the mounted surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingEnvironment {
    /// Classes on the document root.
    pub root_classes: BTreeSet<String>,
    /// Root font size, once set.
    pub root_font_size: Option<String>,
    /// CSS custom properties on the document root.
    pub css_variables: BTreeMap<String, String>,
    /// Backdrop filter applied to each surface group.
    pub surface_filters: BTreeMap<Surface, String>,
    /// Text of injected stylesheets keyed by element id.
    pub stylesheets: BTreeMap<String, String>,
}

impl RecordingEnvironment {
    /// Fresh, untouched environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the root carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }

    /// Value of a root CSS custom property.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.css_variables.get(name).map(String::as_str)
    }

    /// Current root font size.
    #[must_use]
    pub fn font_size(&self) -> Option<&str> {
        self.root_font_size.as_deref()
    }
}

impl DisplayEnvironment for RecordingEnvironment {
    fn toggle_root_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.root_classes.insert(class.to_string());
        } else {
            self.root_classes.remove(class);
        }
    }

    fn set_root_font_size(&mut self, size: &str) {
        self.root_font_size = Some(size.to_string());
    }

    fn set_css_variable(&mut self, name: &str, value: &str) {
        self.css_variables
            .insert(name.to_string(), value.to_string());
    }

    fn set_surface_filter(&mut self, surface: Surface, filter: &str) {
        self.surface_filters.insert(surface, filter.to_string());
    }

    fn replace_stylesheet(&mut self, element_id: &str, css: &str) {
        self.stylesheets
            .insert(element_id.to_string(), css.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_toggle_is_set_like() {
        let mut env = RecordingEnvironment::new();
        env.toggle_root_class("dark", true);
        env.toggle_root_class("dark", true);
        assert_eq!(env.root_classes.len(), 1);
        env.toggle_root_class("dark", false);
        assert!(!env.has_class("dark"));
    }
}
