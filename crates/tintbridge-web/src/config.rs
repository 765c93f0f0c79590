#![forbid(unsafe_code)]

//! Policy-as-data configuration for the theme bridge.
//!
//! # Loading
//!
//! ```toml
//! # tintbridge.toml
//! default_accent = "emerald"
//! mode_class = "sp-dark-theme"
//! audit_contrast = true
//!
//! [custom_families.brand]
//! 50 = "#f5f8ff"
//! 100 = "#e6eeff"
//! # ... through 800
//! ```
//!
//! ```rust,ignore
//! let config = BridgeConfig::from_toml_file("tintbridge.toml")?;
//! let config = BridgeConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field has a default matching the host integration the bridge was
//! written for, so `BridgeConfig::default()` needs no file at all.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tintbridge_style::{AccentFamily, PaletteError, PaletteTable, Ramp};

use crate::error::ConfigError;

/// Bridge configuration. Loaders reject a config that fails [`validate`].
///
/// [`validate`]: BridgeConfig::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Accent used when no host theme is found and on reset.
    pub default_accent: String,
    /// Class toggled on the root element while dark mode is active.
    pub mode_class: String,
    /// DOM event name used to re-broadcast change notifications.
    pub change_event: String,
    /// Selector handed to the component library for dark mode.
    pub dark_mode_selector: String,
    /// Install the host override stylesheet during initialization.
    pub install_host_overrides: bool,
    /// Log WCAG contrast problems whenever a theme is applied.
    pub audit_contrast: bool,
    /// Extra accent families, `name -> {shade -> colour}`.
    pub custom_families: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_accent: "blue".into(),
            mode_class: "sp-dark-theme".into(),
            change_event: "sp-theme-changed".into(),
            dark_mode_selector: ".ecn-app-dark".into(),
            install_host_overrides: true,
            audit_contrast: false,
            custom_families: BTreeMap::new(),
        }
    }
}

impl BridgeConfig {
    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.mode_class.is_empty() || self.mode_class.contains(char::is_whitespace) {
            errors.push(format!(
                "mode_class must be a single class name, got {:?}",
                self.mode_class
            ));
        }
        if self.change_event.trim().is_empty() {
            errors.push("change_event must not be empty".into());
        }
        if self.dark_mode_selector.trim().is_empty() {
            errors.push("dark_mode_selector must not be empty".into());
        }

        let mut table = PaletteTable::builtin().clone();
        for (name, shades) in &self.custom_families {
            match custom_family(name, shades) {
                Ok(family) => table.register(family),
                Err(err) => errors.push(format!("custom_families.{name}: {err}")),
            }
        }

        if !table.contains(&self.default_accent) {
            errors.push(format!(
                "default_accent {:?} is not a known accent family",
                self.default_accent
            ));
        }

        errors
    }

    /// Built-in palette plus the configured families.
    pub fn palette_table(&self) -> Result<PaletteTable, PaletteError> {
        let mut table = PaletteTable::builtin().clone();
        for (name, shades) in &self.custom_families {
            table.register(custom_family(name, shades)?);
        }
        Ok(table)
    }
}

fn custom_family(
    name: &str,
    shades: &BTreeMap<String, String>,
) -> Result<AccentFamily, PaletteError> {
    AccentFamily::new(name, Ramp::from_keyed(shades)?)
}
