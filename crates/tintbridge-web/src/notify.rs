#![forbid(unsafe_code)]

//! Synchronous change notification for applied themes.
//!
//! # Design
//!
//! [`ThemeChannel`] keeps subscribers as weak references in shared
//! `Rc<RefCell<..>>` storage. [`ThemeChannel::emit`] upgrades the live ones,
//! prunes the dead, and calls them in registration order after releasing the
//! borrow, so a callback may subscribe or emit again.
//!
//! # Failure Modes
//!
//! - **Re-entrant store mutation**: a callback that reaches back into a
//!   store shared through `RefCell` will hit a borrow panic. Push changes
//!   into a [`ChangeQueue`] and deliver them after the store call returns.
//! - **Subscriber leak**: callbacks live as long as their [`Subscription`]
//!   guard. Dead entries are pruned lazily during `emit()`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;
use tracing::{debug, debug_span};

use tintbridge_style::TokenSet;

type CallbackRc = Rc<dyn Fn(&ThemeChange)>;
type CallbackWeak = Weak<dyn Fn(&ThemeChange)>;

/// Payload delivered to subscribers after a theme has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChange {
    pub tokens: TokenSet,
    pub is_dark_mode: bool,
}

impl ThemeChange {
    #[must_use]
    pub fn new(tokens: TokenSet) -> Self {
        let is_dark_mode = tokens.is_inverted();
        Self {
            tokens,
            is_dark_mode,
        }
    }
}

#[derive(Default)]
struct ChannelInner {
    emitted: u64,
    subscribers: Vec<CallbackWeak>,
}

/// Shared list of change subscribers.
///
/// Cloning creates another handle to the same subscriber list.
#[derive(Clone, Default)]
pub struct ThemeChannel {
    inner: Rc<RefCell<ChannelInner>>,
}

impl std::fmt::Debug for ThemeChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ThemeChannel")
            .field("emitted", &inner.emitted)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl ThemeChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`. Dropping the returned guard unsubscribes it.
    pub fn subscribe(&self, callback: impl Fn(&ThemeChange) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Deliver `change` to every live subscriber.
    pub fn emit(&self, change: &ThemeChange) {
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            inner.emitted += 1;
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        let _span = debug_span!(
            "tintbridge.notify",
            subscribers = callbacks.len(),
            dark = change.is_dark_mode
        )
        .entered();
        for cb in &callbacks {
            cb(change);
        }
        debug!("theme change delivered");
    }

    /// Number of emits so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.inner.borrow().emitted
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// RAII guard for a subscriber callback.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Changes held back until the owner of the store is free to deliver them.
///
/// Subscribers run while the store is mutably borrowed. An embedding whose
/// listeners read the store back pushes changes here from a subscriber and
/// drains the queue once the store call has returned.
#[derive(Debug, Clone, Default)]
pub struct ChangeQueue {
    pending: Rc<RefCell<Vec<ThemeChange>>>,
}

impl ChangeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, change: &ThemeChange) {
        self.pending.borrow_mut().push(change.clone());
    }

    /// Take every queued change, oldest first.
    pub fn drain(&self) -> Vec<ThemeChange> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tintbridge_style::Slot;

    fn change(dark: bool) -> ThemeChange {
        ThemeChange::new(TokenSet::new(dark).with_slot(Slot::ThemePrimary, "#0078d4"))
    }

    #[test]
    fn subscribers_receive_changes_in_order() {
        let channel = ThemeChannel::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = {
            let log = Rc::clone(&log);
            channel.subscribe(move |c| log.borrow_mut().push(("first", c.is_dark_mode)))
        };
        let second = {
            let log = Rc::clone(&log);
            channel.subscribe(move |c| log.borrow_mut().push(("second", c.is_dark_mode)))
        };
        channel.emit(&change(true));
        assert_eq!(*log.borrow(), vec![("first", true), ("second", true)]);
        drop((first, second));
    }

    #[test]
    fn dropped_subscription_stops_delivery_and_is_pruned() {
        let channel = ThemeChannel::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            channel.subscribe(move |_| hits.set(hits.get() + 1))
        };
        channel.emit(&change(false));
        drop(sub);
        channel.emit(&change(false));
        assert_eq!(hits.get(), 1);
        assert_eq!(channel.subscriber_count(), 0);
        assert_eq!(channel.emitted(), 2);
    }

    #[test]
    fn callback_may_subscribe_during_emit() {
        let channel = ThemeChannel::new();
        let nested = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let channel = channel.clone();
            let nested = Rc::clone(&nested);
            channel.clone().subscribe(move |_| {
                nested.borrow_mut().push(channel.subscribe(|_| {}));
            })
        };
        channel.emit(&change(false));
        assert_eq!(channel.subscriber_count(), 2);
    }

    #[test]
    fn change_serializes_with_host_flag_names() {
        let value = serde_json::to_value(change(true)).expect("serialize");
        assert_eq!(value["isDarkMode"], serde_json::json!(true));
        assert_eq!(value["tokens"]["isInverted"], serde_json::json!(true));
        assert_eq!(value["tokens"]["themePrimary"], serde_json::json!("#0078d4"));
    }

    #[test]
    fn queue_holds_changes_until_drained() {
        let channel = ThemeChannel::new();
        let queue = ChangeQueue::new();
        let _sub = {
            let queue = queue.clone();
            channel.subscribe(move |c| queue.push(c))
        };
        channel.emit(&change(false));
        channel.emit(&change(true));
        assert_eq!(queue.len(), 2);

        let drained: Vec<bool> = queue.drain().iter().map(|c| c.is_dark_mode).collect();
        assert_eq!(drained, vec![false, true]);
        assert!(queue.is_empty());
    }
}
