//! Output renderers and formatting helpers for CLI commands.

use std::io::Write;

use anyhow::anyhow;
use dashboard_settings::{DashboardStats, ImportReport, SettingKey, SettingKind, SettingsSnapshot};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

pub(crate) fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    line(out, &text)
}

pub(crate) fn line(out: &mut dyn Write, text: &str) -> CliResult<()> {
    writeln!(out, "{text}").map_err(|err| CliError::failure(anyhow!("failed to write output: {err}")))
}

pub(crate) fn render_snapshot(
    snapshot: &SettingsSnapshot,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, &snapshot.to_json()),
        OutputFormat::Table => {
            line(out, &format!("{:<22} {:<7} {:<8} VALUE", "KEY", "KIND", "DEFAULT"))?;
            for (key, value) in snapshot.iter() {
                let marker = if *value == key.default_value() { "yes" } else { "no" };
                line(
                    out,
                    &format!(
                        "{:<22} {:<7} {:<8} {}",
                        key.as_str(),
                        kind_label(key.kind()),
                        marker,
                        value
                    ),
                )?;
            }
            Ok(())
        }
    }
}

pub(crate) fn render_setting(
    key: SettingKey,
    snapshot: &SettingsSnapshot,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let value = snapshot.get(key);
    match format {
        OutputFormat::Json => write_json(out, &value.to_json()),
        OutputFormat::Table => line(out, &value.to_string()),
    }
}

pub(crate) fn render_stats(
    stats: &DashboardStats,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, stats),
        OutputFormat::Table => {
            line(out, &format!("total tasks: {}", stats.total_tasks))?;
            line(out, &format!("completed: {}", stats.completed_tasks))?;
            line(out, &format!("shortcuts: {}", stats.shortcuts))?;
            line(out, &format!("theme: {}", stats.theme))?;
            line(
                out,
                &format!("dark mode: {}", if stats.dark_mode { "on" } else { "off" }),
            )?;
            line(out, &format!("storage used: {} bytes", stats.storage_bytes))
        }
    }
}

pub(crate) fn render_import(
    report: &ImportReport,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Table => {
            line(out, &format!("settings written: {}", report.settings_written))?;
            if let Some(tasks) = report.tasks {
                line(out, &format!("tasks restored: {tasks}"))?;
            }
            if let Some(shortcuts) = report.shortcuts {
                line(out, &format!("shortcuts restored: {shortcuts}"))?;
            }
            if !report.unknown_settings.is_empty() {
                line(
                    out,
                    &format!("skipped unknown: {}", report.unknown_settings.join(", ")),
                )?;
            }
            if report.failed_writes > 0 {
                line(out, &format!("failed writes: {}", report.failed_writes))?;
            }
            Ok(())
        }
    }
}

const fn kind_label(kind: SettingKind) -> &'static str {
    match kind {
        SettingKind::Flag => "flag",
        SettingKind::Choice(_) => "choice",
        SettingKind::Text => "text",
        SettingKind::Json => "json",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_settings::ThemeColor;

    fn rendered(render: impl FnOnce(&mut dyn Write) -> CliResult<()>) -> String {
        let mut buffer = Vec::new();
        let out: &mut dyn Write = &mut buffer;
        assert!(render(out).is_ok());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    #[test]
    fn table_lists_every_setting() {
        let snapshot = SettingsSnapshot::defaults();
        let text = rendered(|out| render_snapshot(&snapshot, OutputFormat::Table, out));
        assert_eq!(text.lines().count(), SettingKey::COUNT + 1);
        assert!(text.lines().any(|row| row.starts_with("fontSize") && row.ends_with("medium")));
    }

    #[test]
    fn stats_table_spells_out_dark_mode() {
        let stats = DashboardStats {
            total_tasks: 3,
            completed_tasks: 1,
            shortcuts: 0,
            theme: ThemeColor::Neutral,
            dark_mode: true,
            storage_bytes: 512,
        };
        let text = rendered(|out| render_stats(&stats, OutputFormat::Table, out));
        assert!(text.contains("theme: neutral"));
        assert!(text.contains("dark mode: on"));
        assert!(text.ends_with("storage used: 512 bytes\n"));
    }

    #[test]
    fn single_setting_json_is_typed() {
        let snapshot = SettingsSnapshot::defaults();
        let text =
            rendered(|out| render_setting(SettingKey::GlassEffect, &snapshot, OutputFormat::Json, out));
        assert_eq!(text.trim(), "true");
    }
}
