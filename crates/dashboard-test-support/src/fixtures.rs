//! Profile and backup fixtures.

use serde_json::{Map, Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

/// Write a profile file (JSON object of raw strings) holding `entries`.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written.
pub fn profile_file<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> anyhow::Result<NamedTempFile> {
    let object: Map<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer_pretty(&mut file, &Value::Object(object))?;
    file.flush()?;
    Ok(file)
}

/// A backup document with two tasks, one shortcut, three known settings and
/// one foreign setting.
#[must_use]
pub fn sample_backup() -> Value {
    json!({
        "tasks": [
            {"id": 1, "text": "water plants", "done": true},
            {"id": 2, "text": "book flights", "done": false}
        ],
        "shortcuts": [{"name": "Mail", "url": "https://mail.example.com"}],
        "settings": {
            "darkMode": true,
            "themeColor": "secondary",
            "apiConfig": {"weatherKey": "abc123"},
            "legacyLayout": "grid"
        },
        "exportDate": "2024-05-01T08:30:00.000Z",
        "version": "1.0"
    })
}
