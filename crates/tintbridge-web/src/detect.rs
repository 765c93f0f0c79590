#![forbid(unsafe_code)]

//! Host theme detection.
//!
//! Reads the host snapshot through an [`ExternalThemeSource`] and normalizes
//! it into a [`TokenSet`]. Two host shapes are accepted:
//!
//! - flat: `{ "themePrimary": "#0078d4", ..., "isInverted": false }`
//! - nested: `{ "palette": { "themePrimary": ... }, "isInverted": false }`
//!
//! Detection never fails outward. Anything short of a usable theme is
//! logged and reported as `None`. A usable but partial host theme is
//! completed from the light or dark defaults before it is returned.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use tintbridge_style::{
    FALLBACK_ACCENT, PaletteTable, Shade, Slot, TokenSet, dark_defaults, light_defaults,
};

use crate::apply::is_valid_variable_name;
use crate::error::SourceError;
use crate::source::ExternalThemeSource;

/// Slots a host snapshot must carry to be used at all.
pub const REQUIRED_HOST_SLOTS: [Slot; 2] = [Slot::ThemePrimary, Slot::ThemeDarkAlt];

const INVERTED_KEY: &str = "isInverted";

/// Host truthiness for the inversion flag.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Convert a raw host snapshot into a token set.
///
/// Non-string entries and names that cannot become custom properties are
/// dropped. Fails when the snapshot is not an object or lacks a
/// [`REQUIRED_HOST_SLOTS`] entry.
pub fn normalize_host_theme(snapshot: &Value) -> Result<TokenSet, SourceError> {
    let object = snapshot
        .as_object()
        .ok_or_else(|| SourceError::Malformed("theme is not an object".into()))?;
    let colors: &Map<String, Value> = object
        .get("palette")
        .and_then(Value::as_object)
        .unwrap_or(object);

    let inverted = match object.get(INVERTED_KEY) {
        Some(flag) => is_truthy(Some(flag)),
        None => is_truthy(colors.get(INVERTED_KEY)),
    };

    let mut tokens = TokenSet::new(inverted);
    for (name, entry) in colors {
        if name == INVERTED_KEY {
            continue;
        }
        match entry.as_str() {
            Some(color) if is_valid_variable_name(name) => tokens.set(name.as_str(), color),
            _ => debug!(name = name.as_str(), "dropping host theme entry"),
        }
    }

    for slot in REQUIRED_HOST_SLOTS {
        if tokens.slot(slot).is_none_or(|v| v.trim().is_empty()) {
            return Err(SourceError::Malformed(format!("missing {slot}")));
        }
    }
    Ok(tokens)
}

/// Fill the known slots a host theme leaves out from the defaults for its
/// mode. Host values, extra names included, win.
#[must_use]
pub fn complete_host_theme(host: &TokenSet) -> TokenSet {
    let defaults = if host.is_inverted() {
        dark_defaults()
    } else {
        light_defaults()
    };
    let mut tokens = defaults.clone();
    tokens.extend(host.iter());
    tokens.set_inverted(host.is_inverted());
    tokens
}

/// Reads and validates the host theme on demand. Holds no cache.
#[derive(Debug)]
pub struct Detector<S> {
    source: S,
}

impl<S: ExternalThemeSource> Detector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current host theme, or `None` when absent or unusable.
    pub fn detect(&self) -> Option<TokenSet> {
        let snapshot = match self.source.read() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("host has not published a theme");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "host theme read failed");
                return None;
            }
        };
        match normalize_host_theme(&snapshot) {
            Ok(tokens) => {
                debug!(
                    entries = tokens.len(),
                    missing = tokens.missing_slots().len(),
                    dark = tokens.is_inverted(),
                    "host theme detected"
                );
                Some(complete_host_theme(&tokens))
            }
            Err(err) => {
                warn!(error = %err, "ignoring host theme");
                None
            }
        }
    }
}

/// Family whose 500 shade equals `theme_primary` (ASCII case-insensitive).
pub fn match_accent_family<'a>(table: &'a PaletteTable, theme_primary: &str) -> Option<&'a str> {
    let wanted = theme_primary.trim();
    table
        .iter()
        .find(|family| {
            family
                .shade(Shade::S500)
                .is_some_and(|value| value.eq_ignore_ascii_case(wanted))
        })
        .map(|family| family.name())
}

/// Best-effort accent identity for a host theme, defaulting to
/// [`FALLBACK_ACCENT`]. Host colours rarely match a ramp exactly.
#[must_use]
pub fn approximate_accent_family(table: &PaletteTable, theme_primary: &str) -> String {
    match_accent_family(table, theme_primary)
        .unwrap_or(FALLBACK_ACCENT)
        .to_string()
}
