//! Command handlers grouped by concern.

pub(crate) mod backup;
pub(crate) mod settings;
