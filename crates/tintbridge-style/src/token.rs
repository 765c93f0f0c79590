#![forbid(unsafe_code)]

//! Flat token sets in the shape the host platform publishes.
//!
//! A [`TokenSet`] maps slot names to colour strings plus the single
//! `isInverted` flag. The 28 [`Slot`]s are the names this crate knows
//! about; a token set may carry additional host-specific names (for example
//! `neutralDarker`), which are kept and written through but never required.
//!
//! Completeness is only checked when a token set is about to become the
//! active theme; building and editing token sets never fails.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Logical grouping of the known slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotGroup {
    /// Accent slots (`themeDarker` … `themeLighterAlt`).
    Theme,
    /// Neutral ramp (`black` … `white`).
    Neutral,
    /// Background/text pairs.
    Semantic,
}

/// A known token slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    ThemeDarker,
    ThemeDark,
    ThemeDarkAlt,
    ThemePrimary,
    ThemeSecondary,
    ThemeTertiary,
    ThemeLight,
    ThemeLighter,
    ThemeLighterAlt,
    Black,
    NeutralDark,
    NeutralPrimary,
    NeutralPrimaryAlt,
    NeutralSecondary,
    NeutralTertiary,
    NeutralTertiaryAlt,
    NeutralQuaternary,
    NeutralQuaternaryAlt,
    NeutralLight,
    NeutralLighter,
    NeutralLighterAlt,
    White,
    PrimaryBackground,
    PrimaryText,
    BodyBackground,
    BodyText,
    DisabledBackground,
    DisabledText,
}

impl Slot {
    pub const COUNT: usize = 28;

    /// Every known slot in canonical order.
    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::ThemeDarker,
        Slot::ThemeDark,
        Slot::ThemeDarkAlt,
        Slot::ThemePrimary,
        Slot::ThemeSecondary,
        Slot::ThemeTertiary,
        Slot::ThemeLight,
        Slot::ThemeLighter,
        Slot::ThemeLighterAlt,
        Slot::Black,
        Slot::NeutralDark,
        Slot::NeutralPrimary,
        Slot::NeutralPrimaryAlt,
        Slot::NeutralSecondary,
        Slot::NeutralTertiary,
        Slot::NeutralTertiaryAlt,
        Slot::NeutralQuaternary,
        Slot::NeutralQuaternaryAlt,
        Slot::NeutralLight,
        Slot::NeutralLighter,
        Slot::NeutralLighterAlt,
        Slot::White,
        Slot::PrimaryBackground,
        Slot::PrimaryText,
        Slot::BodyBackground,
        Slot::BodyText,
        Slot::DisabledBackground,
        Slot::DisabledText,
    ];

    /// Host-facing slot name (also the CSS variable stem).
    pub const fn name(self) -> &'static str {
        match self {
            Slot::ThemeDarker => "themeDarker",
            Slot::ThemeDark => "themeDark",
            Slot::ThemeDarkAlt => "themeDarkAlt",
            Slot::ThemePrimary => "themePrimary",
            Slot::ThemeSecondary => "themeSecondary",
            Slot::ThemeTertiary => "themeTertiary",
            Slot::ThemeLight => "themeLight",
            Slot::ThemeLighter => "themeLighter",
            Slot::ThemeLighterAlt => "themeLighterAlt",
            Slot::Black => "black",
            Slot::NeutralDark => "neutralDark",
            Slot::NeutralPrimary => "neutralPrimary",
            Slot::NeutralPrimaryAlt => "neutralPrimaryAlt",
            Slot::NeutralSecondary => "neutralSecondary",
            Slot::NeutralTertiary => "neutralTertiary",
            Slot::NeutralTertiaryAlt => "neutralTertiaryAlt",
            Slot::NeutralQuaternary => "neutralQuaternary",
            Slot::NeutralQuaternaryAlt => "neutralQuaternaryAlt",
            Slot::NeutralLight => "neutralLight",
            Slot::NeutralLighter => "neutralLighter",
            Slot::NeutralLighterAlt => "neutralLighterAlt",
            Slot::White => "white",
            Slot::PrimaryBackground => "primaryBackground",
            Slot::PrimaryText => "primaryText",
            Slot::BodyBackground => "bodyBackground",
            Slot::BodyText => "bodyText",
            Slot::DisabledBackground => "disabledBackground",
            Slot::DisabledText => "disabledText",
        }
    }

    /// Look up a slot by its exact host name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }

    pub const fn group(self) -> SlotGroup {
        match self {
            Slot::ThemeDarker
            | Slot::ThemeDark
            | Slot::ThemeDarkAlt
            | Slot::ThemePrimary
            | Slot::ThemeSecondary
            | Slot::ThemeTertiary
            | Slot::ThemeLight
            | Slot::ThemeLighter
            | Slot::ThemeLighterAlt => SlotGroup::Theme,
            Slot::PrimaryBackground
            | Slot::PrimaryText
            | Slot::BodyBackground
            | Slot::BodyText
            | Slot::DisabledBackground
            | Slot::DisabledText => SlotGroup::Semantic,
            _ => SlotGroup::Neutral,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat mapping from slot name to colour value, plus the dark-mode flag.
///
/// Serializes as the host shape: one string entry per slot and a boolean
/// `isInverted`. The flag is required when deserializing; a set without it
/// does not say which mode it is for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenSet {
    #[cfg_attr(feature = "serde", serde(flatten))]
    colors: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(rename = "isInverted"))]
    is_inverted: bool,
}

impl TokenSet {
    /// Create an empty token set.
    #[must_use]
    pub fn new(is_inverted: bool) -> Self {
        Self {
            colors: BTreeMap::new(),
            is_inverted,
        }
    }

    /// Build a token set from known slots.
    pub fn from_slots<I, V>(slots: I, is_inverted: bool) -> Self
    where
        I: IntoIterator<Item = (Slot, V)>,
        V: Into<String>,
    {
        let colors = slots
            .into_iter()
            .map(|(slot, value)| (slot.name().to_string(), value.into()))
            .collect();
        Self {
            colors,
            is_inverted,
        }
    }

    /// Value stored under `name`, known slot or not.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn slot(&self, slot: Slot) -> Option<&str> {
        self.get(slot.name())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.colors.insert(name.into(), value.into());
    }

    pub fn set_slot(&mut self, slot: Slot, value: impl Into<String>) {
        self.set(slot.name(), value);
    }

    /// Builder-style [`TokenSet::set_slot`].
    #[must_use]
    pub fn with_slot(mut self, slot: Slot, value: impl Into<String>) -> Self {
        self.set_slot(slot, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.colors.remove(name)
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.is_inverted
    }

    pub fn set_inverted(&mut self, is_inverted: bool) {
        self.is_inverted = is_inverted;
    }

    #[must_use]
    pub fn with_inverted(mut self, is_inverted: bool) -> Self {
        self.is_inverted = is_inverted;
        self
    }

    /// Colour entries in name order. The flag is not included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of colour entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Known slots that are absent or blank, in canonical order.
    #[must_use]
    pub fn missing_slots(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.slot(*slot).is_none_or(|value| value.trim().is_empty()))
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_slots().is_empty()
    }

    /// Check that all 28 known slots carry a value.
    pub fn validate(&self) -> Result<(), TokenError> {
        let missing = self.missing_slots();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TokenError::Incomplete { missing })
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for TokenSet {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}
