use std::io::Write;

use clap::{Parser, Subcommand};

use crate::detect::{DetectArgs, run_detect};
use crate::error::Result;
use crate::simulate::{SimulateArgs, run_simulate};
use crate::theme::{
    AccentsArgs, DarkVariantArgs, DeriveArgs, PresetArgs, run_accents, run_dark_variant,
    run_derive, run_preset,
};

#[derive(Debug, Parser)]
#[command(
    name = "tintbridge",
    about = "Derive, detect, and simulate TintBridge themes without a browser",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the available accent families.
    Accents(AccentsArgs),

    /// Derive a complete token set from an accent family.
    Derive(DeriveArgs),

    /// Approximate a dark rendition of a light host theme.
    #[command(name = "dark-variant")]
    DarkVariant(DarkVariantArgs),

    /// Report what the detector makes of a host theme snapshot.
    Detect(DetectArgs),

    /// Print the component-library preset for an accent.
    Preset(PresetArgs),

    /// Run a theme store session against an in-memory document.
    Simulate(SimulateArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Dispatch `cli`, writing command output to `out`.
pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Accents(args) => run_accents(args, out),
        Commands::Derive(args) => run_derive(args, out),
        Commands::DarkVariant(args) => run_dark_variant(args, out),
        Commands::Detect(args) => run_detect(args, out),
        Commands::Preset(args) => run_preset(args, out),
        Commands::Simulate(args) => run_simulate(args, out),
    }
}
