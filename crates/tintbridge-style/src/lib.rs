#![forbid(unsafe_code)]

//! Palette, token, and derivation primitives for TintBridge.
//!
//! # Role in TintBridge
//! `tintbridge-style` is the pure half of the theme bridge. It owns the
//! static accent palette, the flat token-set model the host platform speaks,
//! and the rules that turn one accent family into a complete light or dark
//! token set. Nothing in here touches a document, a global, or a clock.
//!
//! # This crate provides
//! - [`PaletteTable`] with the built-in accent families and [`Ramp`]s.
//! - [`TokenSet`] and the 28 known [`Slot`]s, with completeness checks.
//! - [`derive_from_accent`] and [`derive_dark_variant`].
//! - The host's fixed [`PredefinedTheme`]s.
//! - Colour parsing and WCAG contrast helpers.
//! - [`ThemableStyle`] for `[theme:slot, default:value]` style strings.
//!
//! # How it fits in the system
//! `tintbridge-web` detects the host theme, applies token sets to the
//! document, and runs the state store on top of these types.

/// Hex colour parsing and contrast utilities.
pub mod color;
/// Theme derivation rules.
pub mod derive;
/// Error types.
pub mod error;
/// Accent families, ramps, and default token sets.
pub mod palette;
/// Named host-platform themes.
pub mod predefined;
/// Themable style strings.
pub mod themable;
/// Token-set model and slot names.
pub mod token;

pub use color::{
    ContrastIssue, Rgb, WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, audit_contrast, contrast_ratio,
    relative_luminance,
};
pub use derive::{ACCENT_SLOT_SHADES, derive_dark_variant, derive_from_accent, derive_from_family};
pub use error::{PaletteError, TokenError};
pub use palette::{
    AccentFamily, FALLBACK_ACCENT, PaletteTable, Ramp, Shade, dark_defaults, light_defaults,
};
pub use predefined::{
    FALLBACK_PREDEFINED, PredefinedTheme, predefined_theme, predefined_themes,
};
pub use themable::{ThemableSegment, ThemableStyle};
pub use token::{Slot, SlotGroup, TokenSet};
