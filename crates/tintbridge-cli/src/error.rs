use std::path::PathBuf;

use thiserror::Error;

use tintbridge_style::PaletteError;
use tintbridge_web::{ApplyError, ConfigError, SourceError, ThemeError};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),

    #[error("host theme in {path} is not usable: {source}")]
    HostTheme { path: PathBuf, source: SourceError },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        1
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;

    #[test]
    fn invalid_constructor_formats_message() {
        let error = CliError::invalid("unknown op 'spin'");
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "invalid argument: unknown op 'spin'");
    }

    #[test]
    fn host_theme_error_names_path() {
        let error = CliError::HostTheme {
            path: "host.json".into(),
            source: tintbridge_web::SourceError::Malformed("missing themePrimary".into()),
        };
        assert_eq!(
            error.to_string(),
            "host theme in host.json is not usable: host theme state is malformed: missing themePrimary"
        );
    }
}
