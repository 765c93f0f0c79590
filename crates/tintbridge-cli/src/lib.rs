#![forbid(unsafe_code)]

pub mod cli;
pub mod detect;
pub mod error;
pub mod simulate;
pub mod theme;
pub mod util;

use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Commands, execute, run, run_from_env};
pub use error::{CliError, Result};

/// Install a stderr subscriber filtered by `TINTBRIDGE_LOG` (default `warn`).
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("TINTBRIDGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
