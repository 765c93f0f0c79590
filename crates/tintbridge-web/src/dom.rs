#![forbid(unsafe_code)]

//! Document write capability.
//!
//! [`DomSink`] is the only path by which a theme reaches the page: custom
//! properties and the mode class on the root element, plus named
//! stylesheets. [`MemoryDom`] records the same writes for headless use.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ApplyError;

/// Write access to the document root.
pub trait DomSink {
    /// Set custom property `name` (including the leading `--`) on the root.
    fn set_variable(&mut self, name: &str, value: &str) -> Result<(), ApplyError>;

    /// Remove custom property `name` from the root. Removing an unset
    /// property is not an error.
    fn remove_variable(&mut self, name: &str) -> Result<(), ApplyError>;

    /// Add or remove `class` on the root element.
    fn set_mode_class(&mut self, class: &str, enabled: bool) -> Result<(), ApplyError>;

    /// Install or replace the stylesheet identified by `id`.
    fn install_stylesheet(&mut self, id: &str, css: &str) -> Result<(), ApplyError> {
        let _ = (id, css);
        Ok(())
    }
}

impl<T: DomSink + ?Sized> DomSink for &mut T {
    fn set_variable(&mut self, name: &str, value: &str) -> Result<(), ApplyError> {
        (**self).set_variable(name, value)
    }

    fn remove_variable(&mut self, name: &str) -> Result<(), ApplyError> {
        (**self).remove_variable(name)
    }

    fn set_mode_class(&mut self, class: &str, enabled: bool) -> Result<(), ApplyError> {
        (**self).set_mode_class(class, enabled)
    }

    fn install_stylesheet(&mut self, id: &str, css: &str) -> Result<(), ApplyError> {
        (**self).install_stylesheet(id, css)
    }
}

/// In-memory document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDom {
    variables: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    stylesheets: BTreeMap<String, String>,
    writes: u64,
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    #[must_use]
    pub fn stylesheet(&self, id: &str) -> Option<&str> {
        self.stylesheets.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.len()
    }

    /// Total number of successful writes of any kind.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Root element rendered as a `:root { ... }` rule.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.variables {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push('}');
        css
    }
}

impl DomSink for MemoryDom {
    fn set_variable(&mut self, name: &str, value: &str) -> Result<(), ApplyError> {
        self.variables.insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_variable(&mut self, name: &str) -> Result<(), ApplyError> {
        if self.variables.remove(name).is_some() {
            self.writes += 1;
        }
        Ok(())
    }

    fn set_mode_class(&mut self, class: &str, enabled: bool) -> Result<(), ApplyError> {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
        self.writes += 1;
        Ok(())
    }

    fn install_stylesheet(&mut self, id: &str, css: &str) -> Result<(), ApplyError> {
        self.stylesheets.insert(id.to_string(), css.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_variables_and_class() {
        let mut dom = MemoryDom::new();
        dom.set_variable("--themePrimary", "#0078d4").unwrap();
        dom.set_mode_class("dark", true).unwrap();
        assert_eq!(dom.variable("--themePrimary"), Some("#0078d4"));
        assert!(dom.has_class("dark"));
        dom.set_mode_class("dark", false).unwrap();
        assert!(!dom.has_class("dark"));
        assert_eq!(dom.writes(), 3);
    }

    #[test]
    fn stylesheet_install_replaces_by_id() {
        let mut dom = MemoryDom::new();
        dom.install_stylesheet("a", "x{}").unwrap();
        dom.install_stylesheet("a", "y{}").unwrap();
        assert_eq!(dom.stylesheet("a"), Some("y{}"));
        assert_eq!(dom.stylesheet_count(), 1);
    }

    #[test]
    fn remove_variable_counts_only_real_removals() {
        let mut dom = MemoryDom::new();
        dom.set_variable("--brandX", "#abcdef").unwrap();
        dom.remove_variable("--brandX").unwrap();
        dom.remove_variable("--brandX").unwrap();
        assert_eq!(dom.variable("--brandX"), None);
        assert_eq!(dom.writes(), 2);
    }

    #[test]
    fn renders_root_rule() {
        let mut dom = MemoryDom::new();
        dom.set_variable("--white", "#fff").unwrap();
        dom.set_variable("--black", "#000").unwrap();
        assert_eq!(dom.to_css(), ":root {\n  --black: #000;\n  --white: #fff;\n}");
    }

    #[test]
    fn default_stylesheet_install_is_noop() {
        struct VarsOnly;
        impl DomSink for VarsOnly {
            fn set_variable(&mut self, _: &str, _: &str) -> Result<(), ApplyError> {
                Ok(())
            }
            fn remove_variable(&mut self, _: &str) -> Result<(), ApplyError> {
                Ok(())
            }
            fn set_mode_class(&mut self, _: &str, _: bool) -> Result<(), ApplyError> {
                Ok(())
            }
        }
        assert_eq!(VarsOnly.install_stylesheet("id", "css"), Ok(()));
    }
}
