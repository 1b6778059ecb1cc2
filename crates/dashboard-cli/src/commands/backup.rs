use std::fs;
use std::io::Write;

use anyhow::Context;
use chrono::Utc;
use dashboard_settings::{export_backup, import_backup, stats};

use crate::cli::{ExportArgs, ImportArgs, OutputFormat, ProfileStore};
use crate::error::{CliError, CliResult};
use crate::output::{line, render_import, render_stats};

pub(crate) fn handle_export(
    store: &ProfileStore,
    args: &ExportArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let backup = export_backup(&store.snapshot(), store.storage(), Utc::now());
    let text = backup.to_json_pretty()?;
    match &args.output_file {
        Some(path) => {
            fs::write(path, text + "\n")
                .with_context(|| format!("failed to write {}", path.display()))
                .map_err(CliError::failure)?;
            line(out, &format!("backup written to {}", path.display()))
        }
        None => line(out, &text),
    }
}

pub(crate) fn handle_import(
    store: &mut ProfileStore,
    args: &ImportArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))
        .map_err(CliError::failure)?;
    let report = import_backup(store, &text)?;
    render_import(&report, format, out)
}

pub(crate) fn handle_stats(
    store: &ProfileStore,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    render_stats(&stats(&store.snapshot(), store.storage()), format, out)
}
