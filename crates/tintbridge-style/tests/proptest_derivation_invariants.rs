//! Property-based invariant tests for theme derivation.
//!
//! 1. Every derived theme is complete, for any accent name and mode.
//! 2. The inversion flag always equals the requested mode.
//! 3. Unknown accent names derive exactly the fallback family.
//! 4. Known names derive the same theme regardless of case or padding.
//! 5. The dark variant is deterministic, inverted, and keeps extra names.
//! 6. Contrast ratio stays within [1, 21] and is symmetric.
//! 7. Resolving a placeholder-free style string returns it unchanged.

use proptest::prelude::*;
use tintbridge_style::{
    FALLBACK_ACCENT, PaletteTable, Rgb, Slot, ThemableStyle, TokenSet, contrast_ratio,
    derive_dark_variant, derive_from_accent, light_defaults,
};

// ── Strategies ────────────────────────────────────────────────────────────

fn builtin_name() -> impl Strategy<Value = String> {
    let names: Vec<String> = PaletteTable::builtin().names().map(str::to_string).collect();
    proptest::sample::select(names)
}

fn hex_color() -> impl Strategy<Value = String> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| Rgb::new(r, g, b).to_hex())
}

fn rgb() -> impl Strategy<Value = Rgb> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| Rgb::new(r, g, b))
}

/// Arbitrary light host theme: every known slot plus a few extra names.
fn host_theme() -> impl Strategy<Value = TokenSet> {
    (
        proptest::collection::vec(hex_color(), Slot::COUNT),
        proptest::collection::btree_map("x[a-z]{1,8}", hex_color(), 0..4),
    )
        .prop_map(|(values, extras)| {
            let mut tokens = TokenSet::from_slots(Slot::ALL.into_iter().zip(values), false);
            tokens.extend(extras);
            tokens
        })
}

// ═══════════════════════════════════════════════════════════════════════════
// 1–4. Accent derivation
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derived_theme_is_complete(accent in ".{0,16}", dark in any::<bool>()) {
        let tokens = derive_from_accent(&accent, dark);
        prop_assert!(tokens.is_complete(), "missing {:?}", tokens.missing_slots());
        prop_assert_eq!(tokens.is_inverted(), dark);
    }

    #[test]
    fn unknown_accent_equals_fallback(accent in "zz[a-z]{0,10}", dark in any::<bool>()) {
        prop_assert_eq!(
            derive_from_accent(&accent, dark),
            derive_from_accent(FALLBACK_ACCENT, dark)
        );
    }

    #[test]
    fn lookup_ignores_case_and_padding(name in builtin_name(), dark in any::<bool>()) {
        let decorated = format!("  {}\t", name.to_ascii_uppercase());
        prop_assert_eq!(derive_from_accent(&decorated, dark), derive_from_accent(&name, dark));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 5. Dark variant
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dark_variant_is_deterministic_and_inverted(host in host_theme()) {
        let first = derive_dark_variant(&host);
        let second = derive_dark_variant(&host);
        prop_assert!(first.is_inverted());
        prop_assert!(first.is_complete());
        prop_assert_eq!(&first, &second);
        for (name, value) in host.iter().filter(|(name, _)| Slot::from_name(name).is_none()) {
            prop_assert_eq!(first.get(name), Some(value));
        }
    }

    #[test]
    fn dark_variant_swaps_black_and_white(host in host_theme()) {
        let dark = derive_dark_variant(&host);
        prop_assert_eq!(dark.slot(Slot::White), host.slot(Slot::Black));
        prop_assert_eq!(dark.slot(Slot::Black), host.slot(Slot::White));
        prop_assert_eq!(dark.slot(Slot::ThemePrimary), host.slot(Slot::ThemePrimary));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 6–7. Colour and style helpers
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contrast_ratio_bounded_and_symmetric(a in rgb(), b in rgb()) {
        let ratio = contrast_ratio(a, b);
        prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio), "ratio {}", ratio);
        prop_assert!((ratio - contrast_ratio(b, a)).abs() < 1e-12);
    }

    #[test]
    fn hex_round_trips(color in rgb()) {
        prop_assert_eq!(Rgb::parse_hex(&color.to_hex()), Some(color));
    }

    #[test]
    fn placeholder_free_style_is_unchanged(css in "[a-z0-9 :;{}.#-]{0,64}") {
        let style = ThemableStyle::parse(&css);
        prop_assert!(!style.has_tokens());
        prop_assert_eq!(style.resolve(light_defaults()), css);
    }
}
