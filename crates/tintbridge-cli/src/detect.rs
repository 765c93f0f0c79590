use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use tintbridge_style::{Slot, TokenSet, audit_contrast};
use tintbridge_web::{approximate_accent_family, match_accent_family, normalize_host_theme};

use crate::error::Result;
use crate::util::{load_config, read_json, write_json};

#[derive(Debug, Clone, Args)]
pub struct DetectArgs {
    /// Host theme snapshot as JSON (the value of `__themeState__.theme`).
    #[arg(long)]
    pub input: PathBuf,

    /// Bridge config supplying extra accent families.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// What the detector would make of a host snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectReport {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Whether `themePrimary` is exactly a family's 500 shade.
    pub exact_accent: bool,
    pub is_inverted: bool,
    /// Known slots the host left out.
    pub missing: Vec<String>,
    /// Slot pairs below the WCAG AA threshold.
    pub low_contrast: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenSet>,
}

impl DetectReport {
    fn not_found(reason: String) -> Self {
        Self {
            found: false,
            reason: Some(reason),
            accent: None,
            exact_accent: false,
            is_inverted: false,
            missing: Vec::new(),
            low_contrast: Vec::new(),
            tokens: None,
        }
    }
}

pub fn run_detect(args: DetectArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let table = config.palette_table()?;
    let snapshot = read_json(&args.input)?;

    let report = match normalize_host_theme(&snapshot) {
        Ok(tokens) => {
            let primary = tokens.slot(Slot::ThemePrimary).unwrap_or_default();
            DetectReport {
                found: true,
                reason: None,
                accent: Some(approximate_accent_family(&table, primary)),
                exact_accent: match_accent_family(&table, primary).is_some(),
                is_inverted: tokens.is_inverted(),
                missing: tokens
                    .missing_slots()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                low_contrast: audit_contrast(&tokens)
                    .iter()
                    .map(|issue| {
                        format!(
                            "{} on {} ({:.2})",
                            issue.foreground, issue.background, issue.ratio
                        )
                    })
                    .collect(),
                tokens: Some(tokens),
            }
        }
        Err(err) => DetectReport::not_found(err.to_string()),
    };
    write_json(out, &report)
}
