//! CLI error classification.

use dashboard_settings::SettingsError;

/// Failure of a CLI invocation.
#[derive(Debug)]
pub(crate) enum CliError {
    /// The user supplied something unusable; exit code 2.
    Validation(String),
    /// The operation itself failed; exit code 3.
    Failure(anyhow::Error),
}

pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::UnknownKey { key } => Self::validation(format!(
                "unknown setting '{key}' (run `dashboard show` to list settings)"
            )),
            SettingsError::InvalidValue { key, value, reason } => {
                Self::validation(format!("invalid value '{value}' for {key}: {reason}"))
            }
            SettingsError::Decode { key, raw, reason } => {
                Self::validation(format!("cannot read '{raw}' as {key}: {reason}"))
            }
            SettingsError::Import { detail } => {
                Self::validation(format!("backup file is not valid: {detail}"))
            }
            err @ (SettingsError::Persist { .. } | SettingsError::Serialize { .. }) => {
                Self::failure(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_errors_map_to_exit_codes() {
        let unknown = CliError::from(SettingsError::UnknownKey {
            key: "nope".into(),
        });
        assert_eq!(unknown.exit_code(), 2);
        assert!(unknown.display_message().contains("'nope'"));

        let persist = CliError::from(SettingsError::Persist {
            key: "darkMode".into(),
            detail: "read-only file system".into(),
        });
        assert_eq!(persist.exit_code(), 3);
        assert_eq!(persist.display_message(), "failed to persist setting");
    }
}
