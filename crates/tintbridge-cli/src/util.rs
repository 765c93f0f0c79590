use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use tintbridge_style::TokenSet;
use tintbridge_web::{BridgeConfig, normalize_host_theme};

use crate::error::{CliError, Result};

/// Load a bridge config, picking the format from the file extension.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    let Some(path) = path else {
        return Ok(BridgeConfig::default());
    };
    debug!(path = %path.display(), "loading bridge config");
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config = if is_toml {
        BridgeConfig::from_toml_file(path)?
    } else {
        BridgeConfig::from_json_file(path)?
    };
    Ok(config)
}

pub fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Read and normalize a host theme snapshot.
pub fn read_host_theme(path: &Path) -> Result<TokenSet> {
    let snapshot = read_json(path)?;
    normalize_host_theme(&snapshot).map_err(|source| CliError::HostTheme {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{text}")?;
    Ok(())
}
