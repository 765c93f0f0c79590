#![forbid(unsafe_code)]

//! Writes token sets to the document and announces the change.
//!
//! # Ordering
//!
//! 1. Every variable name is checked before anything is written, so an
//!    invalid token set leaves the document untouched.
//! 2. One `--<slot>` custom property per colour entry.
//! 3. Properties written by an earlier apply that the new set lacks are
//!    removed, so the root carries exactly the active set.
//! 4. The mode class follows `isInverted`.
//! 5. Subscribers are notified with the full token set.
//!
//! A sink failure part-way through steps 2 to 4 aborts the call with
//! [`ApplyError::Sink`]; the caller keeps its previous state and may retry.
//! [`ThemeApplier::write`] and [`ThemeApplier::notify`] split the call for
//! owners that must commit their own state in between.

use std::collections::BTreeSet;

use tracing::{debug, info, info_span, warn};

use tintbridge_style::{TokenSet, audit_contrast};

use crate::config::BridgeConfig;
use crate::dom::DomSink;
use crate::error::ApplyError;
use crate::notify::{Subscription, ThemeChange, ThemeChannel};

/// Whether `name` can follow `--` in a custom property.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Side-effecting boundary between derived token sets and the page.
#[derive(Debug)]
pub struct ThemeApplier<D> {
    sink: D,
    channel: ThemeChannel,
    mode_class: String,
    audit_contrast: bool,
    /// Property names currently set on the root by this applier.
    written: BTreeSet<String>,
}

impl<D: DomSink> ThemeApplier<D> {
    pub fn new(sink: D, config: &BridgeConfig) -> Self {
        Self {
            sink,
            channel: ThemeChannel::new(),
            mode_class: config.mode_class.clone(),
            audit_contrast: config.audit_contrast,
            written: BTreeSet::new(),
        }
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn channel(&self) -> &ThemeChannel {
        &self.channel
    }

    pub fn subscribe(&self, callback: impl Fn(&ThemeChange) + 'static) -> Subscription {
        self.channel.subscribe(callback)
    }

    /// Apply `tokens` to the document root and notify subscribers.
    pub fn apply(&mut self, tokens: &TokenSet) -> Result<(), ApplyError> {
        self.write(tokens)?;
        self.notify(tokens);
        Ok(())
    }

    /// Write `tokens` to the document root without notifying anyone.
    pub fn write(&mut self, tokens: &TokenSet) -> Result<(), ApplyError> {
        let _span = info_span!(
            "tintbridge.apply",
            entries = tokens.len(),
            dark = tokens.is_inverted()
        )
        .entered();

        if let Some((name, _)) = tokens.iter().find(|(name, _)| !is_valid_variable_name(name)) {
            warn!(name, "refusing token set with invalid variable name");
            return Err(ApplyError::InvalidVariableName {
                name: name.to_string(),
            });
        }

        if self.audit_contrast {
            for issue in audit_contrast(tokens) {
                warn!(
                    foreground = %issue.foreground,
                    background = %issue.background,
                    ratio = issue.ratio,
                    "contrast below WCAG AA"
                );
            }
        }

        let mut current = BTreeSet::new();
        for (name, value) in tokens.iter() {
            let var = format!("--{name}");
            self.sink.set_variable(&var, value)?;
            self.written.insert(var.clone());
            current.insert(var);
        }

        let stale: Vec<String> = self.written.difference(&current).cloned().collect();
        for var in stale {
            self.sink.remove_variable(&var)?;
            debug!(var = var.as_str(), "removed stale custom property");
            self.written.remove(&var);
        }

        self.sink
            .set_mode_class(&self.mode_class, tokens.is_inverted())?;

        info!(
            primary = tokens.get("themePrimary").unwrap_or_default(),
            dark = tokens.is_inverted(),
            "theme applied"
        );
        Ok(())
    }

    /// Deliver `tokens` to subscribers.
    pub fn notify(&self, tokens: &TokenSet) {
        self.channel.emit(&ThemeChange::new(tokens.clone()));
    }

    pub fn install_stylesheet(&mut self, id: &str, css: &str) -> Result<(), ApplyError> {
        self.sink.install_stylesheet(id, css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use std::cell::Cell;
    use std::rc::Rc;
    use tintbridge_style::{Slot, derive_from_accent};
    use tracing_test::traced_test;

    fn applier() -> ThemeApplier<MemoryDom> {
        ThemeApplier::new(MemoryDom::new(), &BridgeConfig::default())
    }

    #[test]
    fn writes_variables_class_and_notifies() {
        let mut applier = applier();
        let seen = Rc::new(Cell::new(None));
        let _sub = {
            let seen = Rc::clone(&seen);
            applier.subscribe(move |change| seen.set(Some(change.is_dark_mode)))
        };
        let tokens = derive_from_accent("emerald", true);
        applier.apply(&tokens).expect("apply");

        let dom = applier.sink();
        assert_eq!(dom.variable("--themePrimary"), Some("#10b981"));
        assert_eq!(dom.variable("--isInverted"), None);
        assert!(dom.has_class("sp-dark-theme"));
        assert_eq!(dom.variables().count(), Slot::COUNT);
        assert_eq!(seen.get(), Some(true));
    }

    #[test]
    fn names_missing_from_the_new_set_are_removed() {
        let mut applier = applier();
        let mut host = derive_from_accent("blue", false);
        host.set("brandX", "#abcdef");
        applier.apply(&host).expect("host");
        assert_eq!(applier.sink().variable("--brandX"), Some("#abcdef"));

        let derived = derive_from_accent("red", false);
        applier.apply(&derived).expect("derived");
        assert_eq!(applier.sink().variable("--brandX"), None);
        assert_eq!(applier.sink().variables().count(), derived.len());
    }

    #[test]
    fn write_does_not_notify() {
        let mut applier = applier();
        let tokens = derive_from_accent("teal", false);
        applier.write(&tokens).expect("write");
        assert_eq!(applier.channel().emitted(), 0);
        applier.notify(&tokens);
        assert_eq!(applier.channel().emitted(), 1);
    }

    #[test]
    fn light_theme_clears_mode_class() {
        let mut applier = applier();
        applier.apply(&derive_from_accent("blue", true)).expect("dark");
        applier.apply(&derive_from_accent("blue", false)).expect("light");
        assert!(!applier.sink().has_class("sp-dark-theme"));
        assert_eq!(applier.channel().emitted(), 2);
    }

    #[test]
    fn invalid_name_writes_nothing() {
        let mut applier = applier();
        let mut tokens = derive_from_accent("blue", false);
        tokens.set("bad name;", "red");
        assert_eq!(
            applier.apply(&tokens),
            Err(ApplyError::InvalidVariableName {
                name: "bad name;".into()
            })
        );
        assert_eq!(applier.sink().writes(), 0);
        assert_eq!(applier.channel().emitted(), 0);
    }

    #[traced_test]
    #[test]
    fn contrast_audit_logs_when_enabled() {
        let config = BridgeConfig {
            audit_contrast: true,
            ..BridgeConfig::default()
        };
        let mut applier = ThemeApplier::new(MemoryDom::new(), &config);
        let tokens = derive_from_accent("blue", false).with_slot(Slot::BodyText, "#f0f0f0");
        applier.apply(&tokens).expect("apply");
        assert!(logs_contain("contrast below WCAG AA"));
    }

    #[test]
    fn variable_names() {
        assert!(is_valid_variable_name("themePrimary"));
        assert!(is_valid_variable_name("neutral-darker_2"));
        assert!(!is_valid_variable_name(""));
        assert!(!is_valid_variable_name("a b"));
        assert!(!is_valid_variable_name("x;y"));
    }
}
