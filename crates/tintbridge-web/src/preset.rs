#![forbid(unsafe_code)]

//! Start-up preset for the embedded component library.
//!
//! The component library reads this once when it is created: the accent
//! ramp as primitives, semantic shade references into that ramp, and the
//! selector that marks dark mode. Later theme changes reach it through the
//! change notification, not through a new preset.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use tintbridge_style::{AccentFamily, FALLBACK_ACCENT, PaletteError, PaletteTable, Shade};

use crate::config::BridgeConfig;

/// Shade number to colour or reference. Serializes with string keys.
pub type ShadeMap = BTreeMap<u16, String>;

const SUCCESS_FAMILY: &str = "green";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorRef {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeTokens {
    pub primary: ColorRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<ColorRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSchemes {
    pub light: SchemeTokens,
    pub dark: SchemeTokens,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTokens {
    pub primary: ShadeMap,
    pub color_scheme: ColorSchemes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetOptions {
    pub dark_mode_selector: String,
}

/// Configuration object consumed by the component library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentPreset {
    pub primitive: BTreeMap<String, ShadeMap>,
    pub semantic: SemanticTokens,
    pub options: PresetOptions,
}

fn shade_ref(family: &str, shade: Shade) -> String {
    format!("{{{family}.{shade}}}")
}

fn primitive_ramp(family: &AccentFamily) -> ShadeMap {
    family
        .ramp()
        .iter()
        .map(|(shade, value)| (shade.value(), value.to_string()))
        .collect()
}

impl ComponentPreset {
    /// Preset for `accent`, falling back like theme derivation does.
    pub fn for_accent(
        table: &PaletteTable,
        accent: &str,
        config: &BridgeConfig,
    ) -> Result<Self, PaletteError> {
        let family = match table.family(accent) {
            Some(family) => family,
            None => {
                warn!(accent, fallback = FALLBACK_ACCENT, "unknown accent family for preset");
                table
                    .family(FALLBACK_ACCENT)
                    .ok_or_else(|| PaletteError::UnknownFamily {
                        name: accent.to_string(),
                    })?
            }
        };
        let name = family.name();

        let mut primitive = BTreeMap::new();
        primitive.insert(name.to_string(), primitive_ramp(family));

        let success = table.family(SUCCESS_FAMILY).map(|green| {
            primitive
                .entry(green.name().to_string())
                .or_insert_with(|| primitive_ramp(green));
            ColorRef {
                color: shade_ref(green.name(), Shade::S400),
            }
        });

        let scheme = SchemeTokens {
            primary: ColorRef {
                color: shade_ref(name, Shade::S800),
            },
            success,
        };

        Ok(Self {
            primitive,
            semantic: SemanticTokens {
                primary: family
                    .ramp()
                    .iter()
                    .map(|(shade, _)| (shade.value(), shade_ref(name, shade)))
                    .collect(),
                color_scheme: ColorSchemes {
                    light: scheme.clone(),
                    dark: scheme,
                },
            },
            options: PresetOptions {
                dark_mode_selector: config.dark_mode_selector.clone(),
            },
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
