#![forbid(unsafe_code)]

//! Read-only providers of the host's published theme object.
//!
//! The host exposes its theme through ambient global state that may be
//! absent, half-populated, or replaced at any time. The store never touches
//! that global directly; it reads through an [`ExternalThemeSource`] so tests
//! and the CLI can substitute a fixed snapshot.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::error::SourceError;

/// Provider of the host's raw theme snapshot.
///
/// `Ok(None)` means the host has not published a theme. Implementations must
/// not cache: every call reflects the host state at that moment.
pub trait ExternalThemeSource {
    fn read(&self) -> Result<Option<Value>, SourceError>;
}

/// Snapshot held in memory.
///
/// Clones share the snapshot, so a handle kept outside the store can change
/// what the next read sees.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: Rc<RefCell<Option<Value>>>,
}

impl StaticSource {
    #[must_use]
    pub fn new(snapshot: Option<Value>) -> Self {
        Self {
            snapshot: Rc::new(RefCell::new(snapshot)),
        }
    }

    /// Source with no published theme.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the snapshot seen by subsequent reads.
    pub fn set(&self, snapshot: Option<Value>) {
        *self.snapshot.borrow_mut() = snapshot;
    }
}

impl ExternalThemeSource for StaticSource {
    fn read(&self) -> Result<Option<Value>, SourceError> {
        Ok(self.snapshot.borrow().clone())
    }
}

/// Source backed by a closure.
pub struct FnSource<F> {
    read: F,
}

impl<F> FnSource<F>
where
    F: Fn() -> Result<Option<Value>, SourceError>,
{
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

impl<F> ExternalThemeSource for FnSource<F>
where
    F: Fn() -> Result<Option<Value>, SourceError>,
{
    fn read(&self) -> Result<Option<Value>, SourceError> {
        (self.read)()
    }
}

impl<T: ExternalThemeSource + ?Sized> ExternalThemeSource for Box<T> {
    fn read(&self) -> Result<Option<Value>, SourceError> {
        (**self).read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn static_source_clones_share_snapshot() {
        let source = StaticSource::empty();
        let handle = source.clone();
        assert_eq!(source.read(), Ok(None));
        handle.set(Some(json!({ "themePrimary": "#123456" })));
        assert_eq!(
            source.read(),
            Ok(Some(json!({ "themePrimary": "#123456" })))
        );
    }

    #[test]
    fn fn_source_calls_closure_each_read() {
        let calls = std::cell::Cell::new(0);
        let source = FnSource::new(|| {
            calls.set(calls.get() + 1);
            Err(SourceError::Unavailable("no window".into()))
        });
        assert!(source.read().is_err());
        assert!(source.read().is_err());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn boxed_source_delegates() {
        let source: Box<dyn ExternalThemeSource> =
            Box::new(StaticSource::new(Some(json!({ "a": 1 }))));
        assert_eq!(source.read(), Ok(Some(json!({ "a": 1 }))));
    }
}
