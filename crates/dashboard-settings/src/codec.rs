//! Encoding between setting values and persisted strings.
//!
//! Two decoders exist on purpose. Load-time decoding is strict and the caller
//! substitutes the default on failure; decoding of values written by another
//! tab never fails and keeps anything it cannot type as raw text. Both use the
//! key's `SettingKind` as the type tag, so boolean detection only ever applies
//! to flag settings.

use crate::error::{SettingsError, SettingsResult};
use crate::model::{SettingKey, SettingKind, SettingValue};
use serde_json::Value;

/// Render a value in its persisted form.
#[must_use]
pub fn encode(value: &SettingValue) -> String {
    match value {
        SettingValue::Flag(true) => "true".to_string(),
        SettingValue::Flag(false) => "false".to_string(),
        SettingValue::Text(text) => text.clone(),
        SettingValue::Json(json) => json.to_string(),
    }
}

/// Decode a persisted string read at startup.
///
/// # Errors
///
/// Returns [`SettingsError::Decode`] when a flag is neither `"true"` nor
/// `"false"`, or when a JSON setting does not hold a JSON object or array.
pub fn decode_persisted(key: SettingKey, raw: &str) -> SettingsResult<SettingValue> {
    match key.kind() {
        SettingKind::Flag => match raw {
            "true" => Ok(SettingValue::Flag(true)),
            "false" => Ok(SettingValue::Flag(false)),
            _ => Err(SettingsError::Decode {
                key: key.as_str(),
                raw: raw.to_string(),
                reason: "not_a_boolean",
            }),
        },
        SettingKind::Json => match serde_json::from_str::<Value>(raw) {
            Ok(json) if json.is_object() || json.is_array() => Ok(SettingValue::Json(json)),
            Ok(_) => Err(SettingsError::Decode {
                key: key.as_str(),
                raw: raw.to_string(),
                reason: "expected_object",
            }),
            Err(_) => Err(SettingsError::Decode {
                key: key.as_str(),
                raw: raw.to_string(),
                reason: "malformed_json",
            }),
        },
        SettingKind::Choice(_) | SettingKind::Text => Ok(SettingValue::Text(raw.to_string())),
    }
}

/// Best-effort decode of a value written by another execution context.
#[must_use]
pub fn decode_external(key: SettingKey, raw: &str) -> SettingValue {
    match key.kind() {
        SettingKind::Flag => match raw {
            "true" => SettingValue::Flag(true),
            "false" => SettingValue::Flag(false),
            _ => SettingValue::Text(raw.to_string()),
        },
        SettingKind::Json if looks_structured(raw) => serde_json::from_str::<Value>(raw)
            .map_or_else(|_| SettingValue::Text(raw.to_string()), SettingValue::Json),
        SettingKind::Json | SettingKind::Choice(_) | SettingKind::Text => {
            SettingValue::Text(raw.to_string())
        }
    }
}

fn looks_structured(raw: &str) -> bool {
    raw.starts_with('{') || raw.starts_with('[')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_uses_literal_booleans_and_compact_json() {
        assert_eq!(encode(&SettingValue::Flag(true)), "true");
        assert_eq!(encode(&SettingValue::Flag(false)), "false");
        assert_eq!(encode(&SettingValue::from("large")), "large");
        assert_eq!(
            encode(&SettingValue::Json(json!({"endpoint": "x"}))),
            r#"{"endpoint":"x"}"#
        );
    }

    #[test]
    fn persisted_flags_must_be_literal_booleans() {
        assert_eq!(
            decode_persisted(SettingKey::DarkMode, "true").ok(),
            Some(SettingValue::Flag(true))
        );
        assert!(matches!(
            decode_persisted(SettingKey::DarkMode, "yes"),
            Err(SettingsError::Decode {
                reason: "not_a_boolean",
                ..
            })
        ));
    }

    #[test]
    fn persisted_json_must_parse() {
        assert_eq!(
            decode_persisted(SettingKey::ApiConfig, r#"{"a":1}"#).ok(),
            Some(SettingValue::Json(json!({"a": 1})))
        );
        assert!(matches!(
            decode_persisted(SettingKey::ApiConfig, "{oops"),
            Err(SettingsError::Decode {
                key: "apiConfig",
                ..
            })
        ));
        assert!(matches!(
            decode_persisted(SettingKey::ApiConfig, "42"),
            Err(SettingsError::Decode {
                reason: "expected_object",
                ..
            })
        ));
    }

    #[test]
    fn persisted_text_is_kept_raw() {
        assert_eq!(
            decode_persisted(SettingKey::FontSize, "gigantic").ok(),
            Some(SettingValue::from("gigantic"))
        );
    }

    #[test]
    fn external_flags_become_booleans() {
        assert_eq!(
            decode_external(SettingKey::DarkMode, "true"),
            SettingValue::Flag(true)
        );
        assert_eq!(
            decode_external(SettingKey::DarkMode, "maybe"),
            SettingValue::from("maybe")
        );
    }

    #[test]
    fn external_text_that_looks_boolean_stays_text() {
        assert_eq!(
            decode_external(SettingKey::StartupPage, "true"),
            SettingValue::from("true")
        );
        assert_eq!(
            decode_external(SettingKey::CustomCss, "[x]"),
            SettingValue::from("[x]")
        );
    }

    #[test]
    fn external_json_is_parsed_only_when_structured() {
        assert_eq!(
            decode_external(SettingKey::ApiConfig, r#"{"k":true}"#),
            SettingValue::Json(json!({"k": true}))
        );
        assert_eq!(
            decode_external(SettingKey::ApiConfig, "{broken"),
            SettingValue::from("{broken")
        );
        assert_eq!(
            decode_external(SettingKey::ApiConfig, "42"),
            SettingValue::from("42")
        );
    }
}
