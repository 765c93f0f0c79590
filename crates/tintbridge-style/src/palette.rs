#![forbid(unsafe_code)]

//! Accent colour families and the default light/dark token sets.
//!
//! The built-in table carries the Tailwind-style ramps the widget offers as
//! accent choices. Every family must define at least shades 50 through 800;
//! a gap is an error at construction time rather than a silent default,
//! because a missing shade shows up as an invisible styling bug much later.

use std::fmt;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;
use crate::token::{Slot, TokenSet};

/// Accent used when a requested family does not exist.
pub const FALLBACK_ACCENT: &str = "blue";

/// Intensity key of a ramp, lightest (`S50`) to darkest (`S950`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl Shade {
    pub const COUNT: usize = 11;

    pub const ALL: [Shade; Shade::COUNT] = [
        Shade::S50,
        Shade::S100,
        Shade::S200,
        Shade::S300,
        Shade::S400,
        Shade::S500,
        Shade::S600,
        Shade::S700,
        Shade::S800,
        Shade::S900,
        Shade::S950,
    ];

    /// Shades every accent family must define.
    pub const REQUIRED: [Shade; 9] = [
        Shade::S50,
        Shade::S100,
        Shade::S200,
        Shade::S300,
        Shade::S400,
        Shade::S500,
        Shade::S600,
        Shade::S700,
        Shade::S800,
    ];

    pub const fn value(self) -> u16 {
        match self {
            Shade::S50 => 50,
            Shade::S100 => 100,
            Shade::S200 => 200,
            Shade::S300 => 300,
            Shade::S400 => 400,
            Shade::S500 => 500,
            Shade::S600 => 600,
            Shade::S700 => 700,
            Shade::S800 => 800,
            Shade::S900 => 900,
            Shade::S950 => 950,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_value(value: u16) -> Result<Self, PaletteError> {
        Self::ALL
            .into_iter()
            .find(|shade| shade.value() == value)
            .ok_or(PaletteError::UnknownShade { value })
    }
}

impl TryFrom<u16> for Shade {
    type Error = PaletteError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Shade> for u16 {
    fn from(shade: Shade) -> Self {
        shade.value()
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Ordered mapping from [`Shade`] to colour value. May have gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ramp {
    shades: [Option<String>; Shade::COUNT],
}

impl Ramp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ramp with every shade from 50 to 950 set.
    #[must_use]
    pub fn from_hex(values: [&str; Shade::COUNT]) -> Self {
        Self {
            shades: values.map(|value| Some(value.to_string())),
        }
    }

    /// Build from textual keys such as `"500"`, as found in config files.
    pub fn from_keyed<I, K, V>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut ramp = Ramp::new();
        for (key, value) in entries {
            let key = key.as_ref().trim();
            let number: u16 = key.parse().map_err(|_| PaletteError::InvalidShadeKey {
                key: key.to_string(),
            })?;
            ramp.set(Shade::from_value(number)?, value);
        }
        Ok(ramp)
    }

    #[must_use]
    pub fn with(mut self, shade: Shade, value: impl Into<String>) -> Self {
        self.set(shade, value);
        self
    }

    pub fn set(&mut self, shade: Shade, value: impl Into<String>) {
        self.shades[shade.index()] = Some(value.into());
    }

    #[must_use]
    pub fn get(&self, shade: Shade) -> Option<&str> {
        self.shades[shade.index()].as_deref()
    }

    /// Defined shades, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (Shade, &str)> {
        Shade::ALL
            .into_iter()
            .filter_map(|shade| self.get(shade).map(|value| (shade, value)))
    }

    /// Required shades that are absent or blank.
    #[must_use]
    pub fn missing_required(&self) -> Vec<Shade> {
        Shade::REQUIRED
            .into_iter()
            .filter(|shade| self.get(*shade).is_none_or(|value| value.trim().is_empty()))
            .collect()
    }
}

impl FromIterator<(Shade, String)> for Ramp {
    fn from_iter<T: IntoIterator<Item = (Shade, String)>>(iter: T) -> Self {
        let mut ramp = Ramp::new();
        for (shade, value) in iter {
            ramp.set(shade, value);
        }
        ramp
    }
}

/// A named ramp that satisfies the required-shade invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentFamily {
    name: String,
    ramp: Ramp,
}

impl AccentFamily {
    /// Validate and build a family. Names are stored lower-case.
    pub fn new(name: impl Into<String>, ramp: Ramp) -> Result<Self, PaletteError> {
        let name = normalize_name(&name.into());
        if name.is_empty() {
            return Err(PaletteError::EmptyFamilyName);
        }
        if let Some(&shade) = ramp.missing_required().first() {
            return Err(PaletteError::MissingShade {
                family: name,
                shade,
            });
        }
        Ok(Self { name, ramp })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    #[must_use]
    pub fn shade(&self, shade: Shade) -> Option<&str> {
        self.ramp.get(shade)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Named accent families, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PaletteTable {
    families: Vec<AccentFamily>,
}

static BUILTIN: OnceLock<PaletteTable> = OnceLock::new();

impl PaletteTable {
    /// Table with no families.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared built-in table.
    pub fn builtin() -> &'static PaletteTable {
        BUILTIN.get_or_init(|| PaletteTable {
            families: TAILWIND_FAMILIES
                .iter()
                .map(|(name, values)| AccentFamily {
                    name: (*name).to_string(),
                    ramp: Ramp::from_hex(*values),
                })
                .collect(),
        })
    }

    /// Family by name (ASCII case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn family(&self, name: &str) -> Option<&AccentFamily> {
        let wanted = normalize_name(name);
        self.families.iter().find(|family| family.name == wanted)
    }

    #[must_use]
    pub fn get_ramp(&self, name: &str) -> Option<&Ramp> {
        self.family(name).map(AccentFamily::ramp)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.family(name).is_some()
    }

    /// Add a family, replacing any existing family with the same name.
    pub fn register(&mut self, family: AccentFamily) {
        match self.families.iter_mut().find(|f| f.name == family.name) {
            Some(existing) => {
                tracing::debug!(family = %family.name, "replacing accent family");
                *existing = family;
            }
            None => self.families.push(family),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(AccentFamily::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccentFamily> {
        self.families.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Light-mode defaults covering all 28 slots.
pub fn light_defaults() -> &'static TokenSet {
    static LIGHT: OnceLock<TokenSet> = OnceLock::new();
    LIGHT.get_or_init(|| TokenSet::from_slots(LIGHT_DEFAULTS, false))
}

/// Dark-mode defaults covering all 28 slots.
pub fn dark_defaults() -> &'static TokenSet {
    static DARK: OnceLock<TokenSet> = OnceLock::new();
    DARK.get_or_init(|| TokenSet::from_slots(DARK_DEFAULTS, true))
}

const TAILWIND_FAMILIES: [(&str, [&str; Shade::COUNT]); 11] = [
    (
        "blue",
        [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
            "#1e40af", "#1e3a8a", "#172554",
        ],
    ),
    (
        "emerald",
        [
            "#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669", "#047857",
            "#065f46", "#064e3b", "#022c22",
        ],
    ),
    (
        "amber",
        [
            "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309",
            "#92400e", "#78350f", "#451a03",
        ],
    ),
    (
        "red",
        [
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
            "#991b1b", "#7f1d1d", "#450a0a",
        ],
    ),
    (
        "purple",
        [
            "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9",
            "#5b21b6", "#4c1d95", "#3b0764",
        ],
    ),
    (
        "indigo",
        [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca",
            "#3730a3", "#312e81", "#1e1b4b",
        ],
    ),
    (
        "teal",
        [
            "#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488", "#0f766e",
            "#115e59", "#134e4a", "#042f2e",
        ],
    ),
    (
        "green",
        [
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
            "#166534", "#14532d", "#052e16",
        ],
    ),
    (
        "cyan",
        [
            "#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4", "#0891b2", "#0e7490",
            "#155e75", "#164e63", "#083344",
        ],
    ),
    (
        "pink",
        [
            "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d",
            "#9d174d", "#831843", "#500724",
        ],
    ),
    (
        "orange",
        [
            "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c",
            "#9a3412", "#7c2d12", "#431407",
        ],
    ),
];

const LIGHT_DEFAULTS: [(Slot, &str); Slot::COUNT] = [
    (Slot::ThemeDarker, "#004578"),
    (Slot::ThemeDark, "#005a9e"),
    (Slot::ThemeDarkAlt, "#106ebe"),
    (Slot::ThemePrimary, "#0078d4"),
    (Slot::ThemeSecondary, "#2b88d8"),
    (Slot::ThemeTertiary, "#71afe5"),
    (Slot::ThemeLight, "#c7e0f4"),
    (Slot::ThemeLighter, "#deecf9"),
    (Slot::ThemeLighterAlt, "#eff6fc"),
    (Slot::Black, "#000000"),
    (Slot::NeutralDark, "#201f1e"),
    (Slot::NeutralPrimary, "#323130"),
    (Slot::NeutralPrimaryAlt, "#3b3a39"),
    (Slot::NeutralSecondary, "#605e5c"),
    (Slot::NeutralTertiary, "#a19f9d"),
    (Slot::NeutralTertiaryAlt, "#c8c6c4"),
    (Slot::NeutralQuaternary, "#d0d0d0"),
    (Slot::NeutralQuaternaryAlt, "#e1dfdd"),
    (Slot::NeutralLight, "#edebe9"),
    (Slot::NeutralLighter, "#f3f2f1"),
    (Slot::NeutralLighterAlt, "#faf9f8"),
    (Slot::White, "#ffffff"),
    (Slot::PrimaryBackground, "#ffffff"),
    (Slot::PrimaryText, "#323130"),
    (Slot::BodyBackground, "#ffffff"),
    (Slot::BodyText, "#323130"),
    (Slot::DisabledBackground, "#f3f2f1"),
    (Slot::DisabledText, "#a19f9d"),
];

const DARK_DEFAULTS: [(Slot, &str); Slot::COUNT] = [
    (Slot::ThemeDarker, "#82c7ff"),
    (Slot::ThemeDark, "#6cb8f6"),
    (Slot::ThemeDarkAlt, "#3aa0f3"),
    (Slot::ThemePrimary, "#2899f5"),
    (Slot::ThemeSecondary, "#0078d4"),
    (Slot::ThemeTertiary, "#235a85"),
    (Slot::ThemeLight, "#106ebe"),
    (Slot::ThemeLighter, "#004578"),
    (Slot::ThemeLighterAlt, "#002b4d"),
    (Slot::Black, "#ffffff"),
    (Slot::NeutralDark, "#faf9f8"),
    (Slot::NeutralPrimary, "#f3f2f1"),
    (Slot::NeutralPrimaryAlt, "#edebe9"),
    (Slot::NeutralSecondary, "#d0d0d0"),
    (Slot::NeutralTertiary, "#c8c6c4"),
    (Slot::NeutralTertiaryAlt, "#6e6e6e"),
    (Slot::NeutralQuaternary, "#5c5c5c"),
    (Slot::NeutralQuaternaryAlt, "#484848"),
    (Slot::NeutralLight, "#3c3c3c"),
    (Slot::NeutralLighter, "#313131"),
    (Slot::NeutralLighterAlt, "#282828"),
    (Slot::White, "#1f1f1f"),
    (Slot::PrimaryBackground, "#1f1f1f"),
    (Slot::PrimaryText, "#f3f2f1"),
    (Slot::BodyBackground, "#1f1f1f"),
    (Slot::BodyText, "#f3f2f1"),
    (Slot::DisabledBackground, "#313131"),
    (Slot::DisabledText, "#6e6e6e"),
];
