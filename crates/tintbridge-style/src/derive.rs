#![forbid(unsafe_code)]

//! Accent-to-theme derivation.
//!
//! A derived theme starts from the light or dark defaults and overwrites the
//! nine accent slots with shades from one family. Neutral and semantic slots
//! are never touched by an accent, so every derived set stays complete.

use tracing::{debug, error, warn};

use crate::palette::{
    AccentFamily, FALLBACK_ACCENT, PaletteTable, Shade, dark_defaults, light_defaults,
};
use crate::token::{Slot, TokenSet};

/// Which shade fills which accent slot.
pub const ACCENT_SLOT_SHADES: [(Slot, Shade); 9] = [
    (Slot::ThemePrimary, Shade::S500),
    (Slot::ThemeDarkAlt, Shade::S600),
    (Slot::ThemeDark, Shade::S700),
    (Slot::ThemeDarker, Shade::S800),
    (Slot::ThemeSecondary, Shade::S400),
    (Slot::ThemeTertiary, Shade::S300),
    (Slot::ThemeLight, Shade::S200),
    (Slot::ThemeLighter, Shade::S100),
    (Slot::ThemeLighterAlt, Shade::S50),
];

fn mode_defaults(dark: bool) -> &'static TokenSet {
    if dark { dark_defaults() } else { light_defaults() }
}

/// Complete token set for one family in the requested mode.
#[must_use]
pub fn derive_from_family(family: &AccentFamily, dark: bool) -> TokenSet {
    let mut tokens = mode_defaults(dark).clone();
    for (slot, shade) in ACCENT_SLOT_SHADES {
        if let Some(value) = family.shade(shade) {
            tokens.set_slot(slot, value);
        }
    }
    tokens.set_inverted(dark);
    tokens
}

impl PaletteTable {
    /// Derive a theme from the named family in this table.
    ///
    /// Unknown names fall back to [`FALLBACK_ACCENT`]. If the table has no
    /// fallback family either, the plain mode defaults are returned.
    #[must_use]
    pub fn derive(&self, accent: &str, dark: bool) -> TokenSet {
        if let Some(family) = self.family(accent) {
            return derive_from_family(family, dark);
        }
        warn!(accent, fallback = FALLBACK_ACCENT, "unknown accent family");
        match self.family(FALLBACK_ACCENT) {
            Some(family) => derive_from_family(family, dark),
            None => {
                error!("palette table has no fallback family, using defaults");
                mode_defaults(dark).clone()
            }
        }
    }
}

/// Derive a theme from the built-in palette table.
#[must_use]
pub fn derive_from_accent(accent: &str, dark: bool) -> TokenSet {
    PaletteTable::builtin().derive(accent, dark)
}

// target <- first present source
const DARK_VARIANT_SOURCES: [(Slot, &[&str]); 12] = [
    (Slot::White, &["black"]),
    (Slot::Black, &["white"]),
    (Slot::NeutralLighter, &["neutralDark"]),
    (Slot::NeutralLight, &["neutralDarker", "neutralDark"]),
    (Slot::NeutralQuaternaryAlt, &["neutralTertiary"]),
    (Slot::NeutralQuaternary, &["neutralSecondary"]),
    (Slot::NeutralTertiaryAlt, &["neutralPrimary"]),
    (Slot::NeutralTertiary, &["neutralPrimaryAlt"]),
    (Slot::NeutralSecondary, &["neutralQuaternaryAlt"]),
    (Slot::NeutralPrimaryAlt, &["neutralQuaternary"]),
    (Slot::NeutralPrimary, &["neutralLight"]),
    (Slot::NeutralDark, &["neutralLighter"]),
];

/// Approximate a dark rendition of a light host theme.
///
/// Neutral slots are swapped across the ramp, every source value read from
/// the input rather than from partially rewritten output. Accent slots and
/// any extra names pass through unchanged. A target whose sources are all
/// absent keeps its input value.
///
/// This is an approximation: applying it twice does not give back the input.
#[must_use]
pub fn derive_dark_variant(light: &TokenSet) -> TokenSet {
    let mut dark = light.clone();
    for (target, sources) in DARK_VARIANT_SOURCES {
        match sources.iter().find_map(|name| light.get(name)) {
            Some(value) => dark.set_slot(target, value),
            None => debug!(slot = %target, "no source for dark variant slot, keeping value"),
        }
    }
    dark.set_inverted(true);
    dark
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn emerald_light_maps_shades_onto_accent_slots() {
        let tokens = derive_from_accent("emerald", false);
        assert_eq!(tokens.slot(Slot::ThemePrimary), Some("#10b981"));
        assert_eq!(tokens.slot(Slot::ThemeDarker), Some("#065f46"));
        assert_eq!(tokens.slot(Slot::ThemeLighterAlt), Some("#ecfdf5"));
        assert_eq!(tokens.slot(Slot::White), Some("#ffffff"));
        assert!(!tokens.is_inverted());
        assert!(tokens.is_complete());
    }

    #[test]
    fn red_dark_uses_dark_neutrals() {
        let tokens = derive_from_accent("red", true);
        assert_eq!(tokens.slot(Slot::ThemePrimary), Some("#ef4444"));
        assert_eq!(tokens.slot(Slot::White), Some("#1f1f1f"));
        assert_eq!(tokens.slot(Slot::BodyText), Some("#f3f2f1"));
        assert!(tokens.is_inverted());
    }

    #[traced_test]
    #[test]
    fn unknown_accent_falls_back_to_blue() {
        let tokens = derive_from_accent("doesnotexist", false);
        assert_eq!(tokens, derive_from_accent("blue", false));
        assert_eq!(tokens.slot(Slot::ThemePrimary), Some("#3b82f6"));
        assert!(logs_contain("unknown accent family"));
    }

    #[test]
    fn neutral_slots_never_depend_on_accent() {
        let blue = derive_from_accent("blue", true);
        let pink = derive_from_accent("pink", true);
        for slot in Slot::ALL {
            if ACCENT_SLOT_SHADES.iter().all(|(s, _)| *s != slot) {
                assert_eq!(blue.slot(slot), pink.slot(slot), "{slot}");
            }
        }
    }

    #[test]
    fn table_without_fallback_returns_defaults() {
        let table = PaletteTable::empty();
        assert_eq!(&table.derive("blue", true), dark_defaults());
    }

    #[test]
    fn dark_variant_swaps_neutrals() {
        let light = light_defaults().clone().with_slot(Slot::ThemePrimary, "#ff0000");
        let dark = derive_dark_variant(&light);
        assert!(dark.is_inverted());
        assert_eq!(dark.slot(Slot::White), Some("#000000"));
        assert_eq!(dark.slot(Slot::Black), Some("#ffffff"));
        assert_eq!(dark.slot(Slot::NeutralPrimary), Some("#edebe9"));
        assert_eq!(dark.slot(Slot::NeutralLighter), Some("#201f1e"));
        assert_eq!(dark.slot(Slot::NeutralLight), Some("#201f1e"));
        assert_eq!(dark.slot(Slot::ThemePrimary), Some("#ff0000"));
    }

    #[test]
    fn dark_variant_prefers_neutral_darker() {
        let mut light = light_defaults().clone();
        light.set("neutralDarker", "#111111");
        let dark = derive_dark_variant(&light);
        assert_eq!(dark.slot(Slot::NeutralLight), Some("#111111"));
        assert_eq!(dark.get("neutralDarker"), Some("#111111"));
    }

    #[test]
    fn dark_variant_keeps_value_when_source_missing() {
        let mut light = light_defaults().clone();
        light.remove("black");
        let dark = derive_dark_variant(&light);
        assert_eq!(dark.slot(Slot::White), Some("#ffffff"));
        assert_eq!(dark.slot(Slot::Black), Some("#ffffff"));
    }

    #[test]
    fn dark_variant_is_deterministic() {
        let light = light_defaults();
        assert_eq!(derive_dark_variant(light), derive_dark_variant(light));
    }
}
