#![forbid(unsafe_code)]

//! Hex colour parsing and WCAG contrast checks.

use tracing::debug;

use crate::token::{Slot, TokenSet};

/// Minimum contrast for body text (WCAG 2.1 AA).
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum contrast for large text (WCAG 2.1 AA).
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;

/// Foreground/background pairs checked by [`audit_contrast`].
const AUDITED_PAIRS: [(Slot, Slot); 3] = [
    (Slot::BodyText, Slot::BodyBackground),
    (Slot::PrimaryText, Slot::PrimaryBackground),
    (Slot::NeutralPrimary, Slot::White),
];

/// 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, `#` optional).
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
                Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::new(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }

    /// Lower-case `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let s = f64::from(c) / 255.0;
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * srgb_to_linear(color.r) + 0.7152 * srgb_to_linear(color.g)
        + 0.0722 * srgb_to_linear(color.b)
}

/// WCAG contrast ratio in `[1, 21]`. Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(fg: Rgb, bg: Rgb) -> f64 {
    let l1 = relative_luminance(fg);
    let l2 = relative_luminance(bg);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// A text/background pair below [`WCAG_AA_NORMAL_TEXT`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastIssue {
    pub foreground: Slot,
    pub background: Slot,
    pub ratio: f64,
}

/// Check the text/background pairs of a token set.
///
/// Pairs with a missing or non-hex value are skipped.
#[must_use]
pub fn audit_contrast(tokens: &TokenSet) -> Vec<ContrastIssue> {
    AUDITED_PAIRS
        .into_iter()
        .filter_map(|(foreground, background)| {
            let fg = tokens.slot(foreground).and_then(Rgb::parse_hex);
            let bg = tokens.slot(background).and_then(Rgb::parse_hex);
            let (Some(fg), Some(bg)) = (fg, bg) else {
                debug!(%foreground, %background, "skipping contrast pair without hex values");
                return None;
            };
            let ratio = contrast_ratio(fg, bg);
            (ratio < WCAG_AA_NORMAL_TEXT).then_some(ContrastIssue {
                foreground,
                background,
                ratio,
            })
        })
        .collect()
}
