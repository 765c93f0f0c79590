#![forbid(unsafe_code)]

//! Named themes shipped by the host platform.
//!
//! Unlike accent families these are fixed accent palettes, not ramps. Each
//! one carries the nine accent slots; neutrals and semantic slots come from
//! the light or dark defaults for the requested mode.

use crate::palette::{dark_defaults, light_defaults};
use crate::token::{Slot, TokenSet};

/// Predefined theme used when a requested name is unknown.
pub const FALLBACK_PREDEFINED: &str = "blue";

/// A fixed accent palette with a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedTheme {
    name: &'static str,
    accents: [(Slot, &'static str); 9],
}

impl PredefinedTheme {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Accent slot values in canonical slot order.
    pub fn accents(&self) -> impl Iterator<Item = (Slot, &'static str)> + '_ {
        self.accents.iter().copied()
    }

    /// Complete token set for this theme in the requested mode.
    #[must_use]
    pub fn tokens(&self, dark: bool) -> TokenSet {
        let mut tokens = if dark {
            dark_defaults().clone()
        } else {
            light_defaults().clone()
        };
        for (slot, value) in self.accents {
            tokens.set_slot(slot, value);
        }
        tokens.set_inverted(dark);
        tokens
    }
}

const fn theme(name: &'static str, values: [&'static str; 9]) -> PredefinedTheme {
    PredefinedTheme {
        name,
        accents: [
            (Slot::ThemeDarker, values[0]),
            (Slot::ThemeDark, values[1]),
            (Slot::ThemeDarkAlt, values[2]),
            (Slot::ThemePrimary, values[3]),
            (Slot::ThemeSecondary, values[4]),
            (Slot::ThemeTertiary, values[5]),
            (Slot::ThemeLight, values[6]),
            (Slot::ThemeLighter, values[7]),
            (Slot::ThemeLighterAlt, values[8]),
        ],
    }
}

// darker, dark, darkAlt, primary, secondary, tertiary, light, lighter, lighterAlt
static PREDEFINED_THEMES: [PredefinedTheme; 5] = [
    theme(
        "blue",
        [
            "#004578", "#005a9e", "#106ebe", "#0078d4", "#2b88d8", "#71afe5", "#c7e0f4",
            "#deecf9", "#eff6fc",
        ],
    ),
    theme(
        "green",
        [
            "#094409", "#0c5e0c", "#0e6b0e", "#107c10", "#369637", "#5eb45f", "#92ce94",
            "#c8e6c9", "#f1faf1",
        ],
    ),
    theme(
        "purple",
        [
            "#331a53", "#462270", "#532885", "#5c2d91", "#6b39a7", "#9365c1", "#c5addf",
            "#dfd0ee", "#f5f0fa",
        ],
    ),
    theme(
        "orange",
        [
            "#782100", "#a42d00", "#c23500", "#d83b01", "#db4b1e", "#d67e54", "#ebb09f",
            "#f5d4c8", "#fdf6f2",
        ],
    ),
    theme(
        "red",
        [
            "#820a14", "#b10d1b", "#d10f1f", "#e81123", "#e13841", "#ea6870", "#f6b0b5",
            "#fad4d6", "#fdf3f4",
        ],
    ),
];

/// All predefined themes, in table order.
#[must_use]
pub fn predefined_themes() -> &'static [PredefinedTheme] {
    &PREDEFINED_THEMES
}

/// Predefined theme by name (ASCII case-insensitive, surrounding whitespace
/// ignored).
#[must_use]
pub fn predefined_theme(name: &str) -> Option<&'static PredefinedTheme> {
    let wanted = name.trim();
    PREDEFINED_THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(wanted))
}
