//! Scripted theme store sessions against an in-memory document.
//!
//! Each operation is one argument:
//!
//! | op                | store call                         |
//! |-------------------|------------------------------------|
//! | `accent:<name>`   | `select_accent(name)`              |
//! | `predefined:<name>` | `apply_predefined(name)`         |
//! | `toggle`          | `toggle_dark_mode()`               |
//! | `reset`           | `reset_to_host_default()`          |
//! | `explicit:<file>` | `set_explicit_theme(tokens)`       |
//! | `host:<file>`     | host publishes the snapshot        |
//! | `host:none`       | host withdraws its theme           |
//!
//! With `--keep-going`, an explicit token file that fails to parse is
//! reported as rejected like any other refused operation.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use tracing::{info, warn};

use tintbridge_style::{Slot, TokenSet};
use tintbridge_web::{MemoryDom, StaticSource, ThemeOrigin, ThemeStore};

use crate::error::{CliError, Result};
use crate::util::{load_config, read_json};

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Host theme snapshot published before the session starts.
    #[arg(long)]
    pub host: Option<PathBuf>,

    /// Bridge config (TOML by extension, JSON otherwise).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep going when an operation is rejected.
    #[arg(long)]
    pub keep_going: bool,

    /// Operations to run after initialization, in order.
    pub ops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimOp {
    Accent(String),
    Predefined(String),
    Toggle,
    Reset,
    Explicit(PathBuf),
    Host(Option<PathBuf>),
}

impl FromStr for SimOp {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (s, None),
        };
        match (verb, arg) {
            ("toggle", None) => Ok(Self::Toggle),
            ("reset", None) => Ok(Self::Reset),
            ("accent", Some(name)) if !name.trim().is_empty() => Ok(Self::Accent(name.into())),
            ("predefined", Some(name)) if !name.trim().is_empty() => {
                Ok(Self::Predefined(name.into()))
            }
            ("explicit", Some(path)) if !path.is_empty() => Ok(Self::Explicit(path.into())),
            ("host", Some("none")) => Ok(Self::Host(None)),
            ("host", Some(path)) if !path.is_empty() => Ok(Self::Host(Some(path.into()))),
            _ => Err(CliError::invalid(format!("unknown op '{s}'"))),
        }
    }
}

fn origin_label(origin: Option<ThemeOrigin>) -> &'static str {
    match origin {
        None => "none",
        Some(ThemeOrigin::Derived) => "derived",
        Some(ThemeOrigin::External) => "external",
        Some(ThemeOrigin::ExternalDarkVariant) => "external-dark-variant",
        Some(ThemeOrigin::Explicit) => "explicit",
        Some(ThemeOrigin::Predefined) => "predefined",
    }
}

fn read_snapshot(path: Option<&Path>) -> Result<Option<serde_json::Value>> {
    path.map(read_json).transpose()
}

fn read_tokens(path: &Path) -> Result<TokenSet> {
    let value = read_json(path)?;
    Ok(serde_json::from_value(value)?)
}

fn report(
    out: &mut dyn Write,
    step: &str,
    store: &ThemeStore<StaticSource, MemoryDom>,
) -> Result<()> {
    let state = store.state();
    let primary = state
        .active_tokens
        .as_ref()
        .and_then(|tokens| tokens.slot(Slot::ThemePrimary))
        .unwrap_or("-");
    writeln!(
        out,
        "{step}: accent={} dark={} origin={} themePrimary={primary}",
        state.selected_accent,
        state.is_dark_mode,
        origin_label(store.origin()),
    )?;
    Ok(())
}

pub fn run_simulate(args: SimulateArgs, out: &mut dyn Write) -> Result<()> {
    let ops = args
        .ops
        .iter()
        .map(|op| op.parse::<SimOp>())
        .collect::<Result<Vec<_>>>()?;
    let config = load_config(args.config.as_deref())?;
    let source = StaticSource::new(read_snapshot(args.host.as_deref())?);
    let mut store = ThemeStore::new(source.clone(), MemoryDom::new(), config)?;

    store.initialize()?;
    report(out, "initialize", &store)?;

    for (raw, op) in args.ops.iter().zip(ops) {
        let result: Result<()> = match op {
            SimOp::Accent(name) => store.select_accent(&name).map_err(CliError::from),
            SimOp::Predefined(name) => store.apply_predefined(&name).map_err(CliError::from),
            SimOp::Toggle => store.toggle_dark_mode().map_err(CliError::from),
            SimOp::Reset => store.reset_to_host_default().map_err(CliError::from),
            SimOp::Explicit(path) => read_tokens(&path)
                .and_then(|tokens| store.set_explicit_theme(tokens).map_err(CliError::from)),
            SimOp::Host(path) => {
                source.set(read_snapshot(path.as_deref())?);
                info!(op = raw.as_str(), "host snapshot changed");
                Ok(())
            }
        };
        match result {
            Ok(()) => report(out, raw, &store)?,
            Err(err) if args.keep_going => {
                warn!(op = raw.as_str(), error = %err, "operation rejected");
                writeln!(out, "{raw}: rejected ({err})")?;
            }
            Err(err) => return Err(err),
        }
    }

    writeln!(out, "{}", store.sink().to_css())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::{SimOp, SimulateArgs, run_simulate};

    fn simulate(host: Option<std::path::PathBuf>, ops: &[&str], keep_going: bool) -> String {
        let mut out = Vec::new();
        run_simulate(
            SimulateArgs {
                host,
                config: None,
                keep_going,
                ops: ops.iter().map(|op| op.to_string()).collect(),
            },
            &mut out,
        )
        .expect("simulate");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn parses_ops() {
        assert_eq!("toggle".parse::<SimOp>().ok(), Some(SimOp::Toggle));
        assert_eq!(
            "accent:rose".parse::<SimOp>().ok(),
            Some(SimOp::Accent("rose".into()))
        );
        assert_eq!("host:none".parse::<SimOp>().ok(), Some(SimOp::Host(None)));
        assert_eq!(
            "predefined:green".parse::<SimOp>().ok(),
            Some(SimOp::Predefined("green".into()))
        );
        assert!("predefined: ".parse::<SimOp>().is_err());
        assert!("toggle:now".parse::<SimOp>().is_err());
        assert!("accent:".parse::<SimOp>().is_err());
        assert!("spin".parse::<SimOp>().is_err());
    }

    #[test]
    fn accent_then_toggle_session() {
        let text = simulate(None, &["accent:emerald", "toggle"], false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "initialize: accent=blue dark=false origin=derived themePrimary=#3b82f6"
        );
        assert!(lines[1].starts_with("accent:emerald: accent=emerald dark=false origin=derived"));
        assert!(lines[2].starts_with("toggle: accent=emerald dark=true origin=derived"));
        assert!(text.contains(":root {"));
    }

    #[test]
    fn light_host_toggles_into_dark_variant_and_back() {
        let dir = tempdir().expect("tempdir");
        let host = dir.path().join("host.json");
        fs::write(
            &host,
            r##"{"themePrimary": "#0f6cbd", "themeDarkAlt": "#115ea3", "white": "#ffffff", "black": "#000000"}"##,
        )
        .expect("write");

        let text = simulate(Some(host), &["toggle", "toggle"], false);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("origin=external themePrimary=#0f6cbd"));
        assert!(lines[1].contains("dark=true origin=external-dark-variant"));
        assert!(lines[2].contains("dark=false origin=external themePrimary=#0f6cbd"));
    }

    #[test]
    fn rejected_explicit_theme_is_reported_with_keep_going() {
        let dir = tempdir().expect("tempdir");
        let tokens = dir.path().join("tokens.json");
        fs::write(&tokens, r##"{"themePrimary": "#000000", "isInverted": true}"##).expect("write");
        let op = format!("explicit:{}", tokens.display());

        let text = simulate(None, &[op.as_str(), "accent:red"], true);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with(&format!("{op}: rejected (")));
        assert!(lines[2].starts_with("accent:red: accent=red dark=false"));
    }

    #[test]
    fn predefined_theme_session_toggles_with_its_palette() {
        let text = simulate(None, &["predefined:green", "toggle"], false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[1],
            "predefined:green: accent=green dark=false origin=predefined themePrimary=#107c10"
        );
        assert_eq!(
            lines[2],
            "toggle: accent=green dark=true origin=predefined themePrimary=#107c10"
        );
    }

    #[test]
    fn explicit_theme_without_mode_flag_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let tokens = dir.path().join("tokens.json");
        fs::write(&tokens, r##"{"themePrimary": "#000000"}"##).expect("write");
        let op = format!("explicit:{}", tokens.display());

        let text = simulate(None, &["toggle", op.as_str(), "toggle"], true);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("toggle: accent=blue dark=true origin=derived"));
        assert!(lines[2].starts_with(&format!("{op}: rejected (")));
        assert!(lines[2].contains("isInverted"), "got {}", lines[2]);
        assert!(lines[3].starts_with("toggle: accent=blue dark=false origin=derived"));
    }
}
