//! Error types for settings operations.

use thiserror::Error;

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Name does not match any known setting.
    #[error("unknown setting")]
    UnknownKey {
        /// Name supplied by the caller.
        key: String,
    },
    /// Value does not fit the setting's kind or allowed options.
    #[error("invalid setting value")]
    InvalidValue {
        /// Storage key of the setting.
        key: &'static str,
        /// Offending value rendered as text.
        value: String,
        /// Machine-readable reason for the rejection.
        reason: &'static str,
    },
    /// Persisted text could not be decoded for the setting's kind.
    #[error("failed to decode persisted setting")]
    Decode {
        /// Storage key of the setting.
        key: &'static str,
        /// Raw persisted text.
        raw: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// The storage backend refused a write.
    #[error("failed to persist setting")]
    Persist {
        /// Storage key that was being written.
        key: String,
        /// Backend-specific detail.
        detail: String,
    },
    /// A backup document could not be imported.
    #[error("invalid backup document")]
    Import {
        /// Human-readable detail.
        detail: String,
    },
    /// Serialising a document failed.
    #[error("failed to serialize document")]
    Serialize {
        /// Source serializer error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias for settings results.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_stay_terse() {
        let err = SettingsError::UnknownKey {
            key: "bogus".into(),
        };
        assert_eq!(err.to_string(), "unknown setting");

        let err = SettingsError::Persist {
            key: "darkMode".into(),
            detail: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "failed to persist setting");
    }

    #[test]
    fn serde_errors_convert() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SettingsError = source.into();
        assert!(matches!(err, SettingsError::Serialize { .. }));
    }
}
