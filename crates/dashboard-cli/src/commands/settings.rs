use std::io::Write;

use dashboard_settings::{SettingKey, StorageBackend, decode_persisted};

use crate::cli::{GetArgs, OutputFormat, ProfileStore, ResetArgs, SetArgs};
use crate::error::{CliError, CliResult};
use crate::output::{line, render_setting, render_snapshot};

pub(crate) fn handle_show(
    store: &ProfileStore,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    render_snapshot(&store.snapshot(), format, out)
}

pub(crate) fn handle_get(
    store: &ProfileStore,
    args: &GetArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let key: SettingKey = args.key.parse()?;
    render_setting(key, &store.snapshot(), format, out)
}

pub(crate) fn handle_set(
    store: &mut ProfileStore,
    args: &SetArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let key: SettingKey = args.key.parse()?;
    let value = decode_persisted(key, &args.value)?;
    store.update(key, value)?;
    line(out, &format!("{key} = {}", store.get(key)))
}

pub(crate) fn handle_reset(
    store: &mut ProfileStore,
    args: &ResetArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let keys: Vec<SettingKey> = match &args.key {
        Some(name) => vec![name.parse()?],
        None => SettingKey::ALL.to_vec(),
    };
    for key in &keys {
        store
            .storage_mut()
            .remove(key.as_str())
            .map_err(CliError::from)?;
    }
    store.reload();
    match keys.as_slice() {
        [key] => line(out, &format!("{key} = {}", store.get(*key))),
        _ => line(out, &format!("reset {} settings to defaults", keys.len())),
    }
}
