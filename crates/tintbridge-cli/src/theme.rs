use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use tintbridge_style::{TokenSet, derive_dark_variant};
use tintbridge_web::{ComponentPreset, MemoryDom, ThemeApplier};

use crate::error::Result;
use crate::util::{load_config, read_host_theme, write_json};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    /// `:root { --slot: value; }` as the document would hold it.
    Css,
}

#[derive(Debug, Clone, Args)]
pub struct DeriveArgs {
    /// Accent family name.
    #[arg(long)]
    pub accent: String,

    /// Derive the dark-mode token set.
    #[arg(long)]
    pub dark: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Bridge config (TOML by extension, JSON otherwise).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DarkVariantArgs {
    /// Light host theme snapshot as JSON.
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct PresetArgs {
    #[arg(long)]
    pub accent: String,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct AccentsArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_accents(args: AccentsArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let table = config.palette_table()?;
    for name in table.names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

pub fn run_derive(args: DeriveArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let table = config.palette_table()?;
    let tokens = table.derive(&args.accent, args.dark);
    info!(accent = args.accent.as_str(), dark = args.dark, "derived theme");
    emit_tokens(&tokens, args.format, out)
}

pub fn run_dark_variant(args: DarkVariantArgs, out: &mut dyn Write) -> Result<()> {
    let light = read_host_theme(&args.input)?;
    let dark = derive_dark_variant(&light);
    emit_tokens(&dark, args.format, out)
}

pub fn run_preset(args: PresetArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let table = config.palette_table()?;
    let preset = ComponentPreset::for_accent(&table, &args.accent, &config)?;
    writeln!(out, "{}", preset.to_json()?)?;
    Ok(())
}

fn emit_tokens(tokens: &TokenSet, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, tokens),
        OutputFormat::Css => {
            writeln!(out, "{}", render_css(tokens)?)?;
            Ok(())
        }
    }
}

/// Render `tokens` through the applier into an in-memory document.
pub fn render_css(tokens: &TokenSet) -> Result<String> {
    let config = tintbridge_web::BridgeConfig::default();
    let mut applier = ThemeApplier::new(MemoryDom::new(), &config);
    applier.apply(tokens)?;
    Ok(applier.sink().to_css())
}
