#![forbid(unsafe_code)]

//! Style strings with `[theme:slot, default:value]` placeholders.
//!
//! Host components ship CSS with placeholders instead of literal colours.
//! [`ThemableStyle::parse`] splits such a string once; [`ThemableStyle::resolve`]
//! can then be called for every theme change. A placeholder wrapped in a
//! matching pair of quotes loses the quotes, so `"[theme:white]"` resolves to
//! a bare colour.

use crate::token::TokenSet;

/// Value used when a placeholder has neither a slot value nor a default.
const UNRESOLVED: &str = "inherit";

/// One piece of a parsed style string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemableSegment {
    Raw(String),
    Token {
        slot: String,
        default: Option<String>,
    },
}

/// A style string split into raw text and theme placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemableStyle {
    segments: Vec<ThemableSegment>,
}

impl ThemableStyle {
    /// Split `input`. Malformed placeholders are kept as raw text.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut raw = String::new();
        let mut rest = input;

        while let Some(pos) = rest.find('[') {
            raw.push_str(&rest[..pos]);
            let candidate = &rest[pos..];
            let Some((slot, default, consumed)) = parse_placeholder(candidate) else {
                raw.push('[');
                rest = &candidate[1..];
                continue;
            };

            let mut after = &candidate[consumed..];
            if let Some(quote) = raw.chars().last().filter(|c| matches!(c, '"' | '\'')) {
                if let Some(stripped) = after.strip_prefix(quote) {
                    raw.pop();
                    after = stripped;
                }
            }

            if !raw.is_empty() {
                segments.push(ThemableSegment::Raw(std::mem::take(&mut raw)));
            }
            segments.push(ThemableSegment::Token { slot, default });
            rest = after;
        }

        raw.push_str(rest);
        if !raw.is_empty() {
            segments.push(ThemableSegment::Raw(raw));
        }
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[ThemableSegment] {
        &self.segments
    }

    #[must_use]
    pub fn has_tokens(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, ThemableSegment::Token { .. }))
    }

    /// Substitute every placeholder from `tokens`.
    ///
    /// Order of preference: the slot's non-blank value, the placeholder
    /// default, then `inherit`.
    #[must_use]
    pub fn resolve(&self, tokens: &TokenSet) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                ThemableSegment::Raw(text) => out.push_str(text),
                ThemableSegment::Token { slot, default } => {
                    let value = tokens
                        .get(slot)
                        .filter(|value| !value.trim().is_empty())
                        .or_else(|| default.as_deref().map(str::trim_end))
                        .unwrap_or(UNRESOLVED);
                    out.push_str(value);
                }
            }
        }
        out
    }
}

/// Parse one placeholder at the start of `s`.
///
/// Returns the slot name, the default, and the byte length consumed.
fn parse_placeholder(s: &str) -> Option<(String, Option<String>, usize)> {
    let body = s.strip_prefix("[theme:")?.trim_start();
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if name_len == 0 {
        return None;
    }
    let name = &body[..name_len];
    let rest = body[name_len..].trim_start();

    let (default, tail) = match rest.strip_prefix(',') {
        Some(rest) => {
            let rest = rest.trim_start().strip_prefix("default:")?.trim_start();
            let end = rest.find(']')?;
            (Some(rest[..end].to_string()), &rest[end..])
        }
        None => (None, rest),
    };
    let tail = tail.strip_prefix(']')?;
    Some((name.to_string(), default, s.len() - tail.len()))
}
