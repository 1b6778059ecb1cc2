//! Argument parsing and command dispatch.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dashboard_settings::{HeadlessEnvironment, SettingsStore, StoreConfig};
use dashboard_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, validate_level,
};

use crate::commands::{backup, settings};
use crate::error::{CliError, CliResult};
use crate::profile::ProfileStorage;

const DEFAULT_PROFILE: &str = "dashboard-profile.json";

pub(crate) type ProfileStore = SettingsStore<ProfileStorage, HeadlessEnvironment>;

/// Parse process arguments, run the command, and return the exit code.
#[must_use]
pub fn run() -> i32 {
    run_from(std::env::args_os(), &mut io::stdout().lock())
}

/// Run with explicit arguments, rendering to `out`. Returns the exit code.
pub fn run_from<I, T>(args: I, out: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            return code;
        }
    };

    match dispatch(cli, out) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn dispatch(cli: Cli, out: &mut dyn Write) -> CliResult<()> {
    validate_level(&cli.log_level).map_err(|err| CliError::validation(err.to_string()))?;
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&logging) {
        tracing::debug!(error = %err, "logging already initialised");
    }

    let storage = ProfileStorage::open(&cli.profile).map_err(CliError::failure)?;
    let config = StoreConfig {
        apply_on_open: false,
        ..StoreConfig::default()
    };
    let mut store = SettingsStore::open(storage, HeadlessEnvironment, &config);

    match cli.command {
        Command::Show => settings::handle_show(&store, cli.output, out)?,
        Command::Get(args) => settings::handle_get(&store, &args, cli.output, out)?,
        Command::Set(args) => settings::handle_set(&mut store, &args, out)?,
        Command::Reset(args) => settings::handle_reset(&mut store, &args, out)?,
        Command::Export(args) => backup::handle_export(&store, &args, out)?,
        Command::Import(args) => backup::handle_import(&mut store, &args, cli.output, out)?,
        Command::Stats => backup::handle_stats(&store, cli.output, out)?,
    }

    store.storage_mut().save().map_err(CliError::failure)
}

#[derive(Parser)]
#[command(
    name = "dashboard",
    about = "Inspect and edit personal dashboard profiles"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "DASHBOARD_PROFILE",
        default_value = DEFAULT_PROFILE,
        help = "Profile file mirroring the browser's localStorage"
    )]
    profile: PathBuf,
    #[arg(
        long,
        global = true,
        env = "DASHBOARD_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[arg(long, global = true, help = "Log output format: json or pretty")]
    log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every setting with its current value.
    Show,
    /// Print one setting.
    Get(GetArgs),
    /// Change one setting.
    Set(SetArgs),
    /// Restore one setting, or every setting, to its default.
    Reset(ResetArgs),
    /// Write a backup document of the whole profile.
    Export(ExportArgs),
    /// Restore a backup document into the profile.
    Import(ImportArgs),
    /// Summarise tasks, shortcuts and appearance.
    Stats,
}

#[derive(Args, Debug)]
pub(crate) struct GetArgs {
    /// Storage key, e.g. `fontSize`.
    pub(crate) key: String,
}

#[derive(Args, Debug)]
pub(crate) struct SetArgs {
    /// Storage key, e.g. `fontSize`.
    pub(crate) key: String,
    /// New value in its stored form (`true`, `large`, `{"k":1}`).
    pub(crate) value: String,
}

#[derive(Args, Debug)]
pub(crate) struct ResetArgs {
    /// Setting to reset; omit to reset every setting.
    pub(crate) key: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Write to this file instead of standard output.
    #[arg(long)]
    pub(crate) output_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Backup document to restore.
    pub(crate) file: PathBuf,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "get",
            "fontSize",
            "--output",
            "json",
            "--profile",
            "/tmp/p.json",
            "--log-format",
            "json",
        ]);
        let cli = match cli {
            Ok(cli) => cli,
            Err(err) => panic!("parse failed: {err}"),
        };
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.profile, PathBuf::from("/tmp/p.json"));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Command::Get(ref args) if args.key == "fontSize"));
    }

    #[test]
    fn unknown_log_format_is_a_usage_error() {
        assert!(Cli::try_parse_from(["dashboard", "--log-format", "xml", "show"]).is_err());
    }
}
