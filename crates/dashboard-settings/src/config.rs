//! Store tuning knobs.

use dashboard_events::DEFAULT_REPLAY_CAPACITY;
use serde::{Deserialize, Serialize};

/// Behaviour of a [`crate::SettingsStore`] at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Run the effect applier for every setting when the store opens.
    pub apply_on_open: bool,
    /// Number of notices kept for late subscribers; `0` disables replay.
    pub notice_replay: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            apply_on_open: true,
            notice_replay: DEFAULT_REPLAY_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() -> Result<(), serde_json::Error> {
        let config: StoreConfig = serde_json::from_str(r#"{"notice_replay": 4}"#)?;
        assert!(config.apply_on_open);
        assert_eq!(config.notice_replay, 4);
        assert_eq!(StoreConfig::default().notice_replay, 32);
        Ok(())
    }
}
