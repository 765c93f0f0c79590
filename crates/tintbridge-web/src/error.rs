use thiserror::Error;

use tintbridge_style::{PaletteError, TokenError};

/// Failure to read the host's published theme.
///
/// The detector never surfaces these to callers; they are logged and turned
/// into "not found".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("host theme state is unavailable: {0}")]
    Unavailable(String),

    #[error("host theme state is malformed: {0}")]
    Malformed(String),
}

/// Failure while writing a token set to the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("invalid custom property name: {name:?}")]
    InvalidVariableName { name: String },

    #[error("document sink failed: {0}")]
    Sink(String),
}

/// Failure of a theme store operation. State is unchanged when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("theme store is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Validation(#[from] TokenError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Errors that can occur when loading a bridge configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
