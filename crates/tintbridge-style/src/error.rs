use thiserror::Error;

use crate::palette::Shade;
use crate::token::Slot;

/// Errors raised while building or extending the palette table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("unknown shade key: {value}")]
    UnknownShade { value: u16 },

    #[error("shade key must be a number, got {key:?}")]
    InvalidShadeKey { key: String },

    #[error("unknown accent family '{name}'")]
    UnknownFamily { name: String },

    #[error("accent family '{family}' is missing shade {shade}")]
    MissingShade { family: String, shade: Shade },

    #[error("accent family name must not be empty")]
    EmptyFamilyName,
}

/// Errors raised when a token set is checked before becoming active.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("incomplete token set, missing: {}", join_slots(.missing))]
    Incomplete { missing: Vec<Slot> },
}

fn join_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|slot| slot.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_lists_slot_names_in_order() {
        let err = TokenError::Incomplete {
            missing: vec![Slot::ThemePrimary, Slot::White],
        };
        assert_eq!(
            err.to_string(),
            "incomplete token set, missing: themePrimary, white"
        );
    }

    #[test]
    fn missing_shade_names_family_and_key() {
        let err = PaletteError::MissingShade {
            family: "sky".to_string(),
            shade: Shade::S300,
        };
        assert_eq!(err.to_string(), "accent family 'sky' is missing shade 300");
    }
}
