//! CSS selectors for the element groups restyled on blur and glass changes.

use dashboard_settings::Surface;

/// Translucent overlays carrying a backdrop blur utility class.
pub const BACKDROP_SELECTOR: &str =
    r#".backdrop-blur-sm, .backdrop-blur-lg, [class*="backdrop-blur"]"#;

/// Frosted panels, light and dark variants.
pub const GLASS_SELECTOR: &str = r".bg-white\/95, .bg-white\/90, .bg-white\/80, .dark\:bg-gray-800\/95, .dark\:bg-gray-800\/90, .dark\:bg-gray-800\/80";

/// Selector matching every mounted element of `surface`.
#[must_use]
pub const fn selector(surface: Surface) -> &'static str {
    match surface {
        Surface::Backdrop => BACKDROP_SELECTOR,
        Surface::Glass => GLASS_SELECTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glass_selector_escapes_utility_punctuation() {
        assert!(selector(Surface::Glass).contains(r".bg-white\/95"));
        assert!(selector(Surface::Glass).contains(r".dark\:bg-gray-800\/80"));
        assert_eq!(selector(Surface::Glass).split(", ").count(), 6);
    }

    #[test]
    fn backdrop_selector_catches_any_blur_utility() {
        assert!(selector(Surface::Backdrop).ends_with(r#"[class*="backdrop-blur"]"#));
    }
}
