// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=liana_dispatch --heading-base-level=0

//! Liana Dispatch: single-threaded publish/subscribe primitives.
//!
//! This crate provides [`Dispatcher`], a small typed event bus for
//! single-threaded UI code. Consumers subscribe a handler under a key (an
//! event kind), producers publish an event under a key, and every handler
//! subscribed under that key runs synchronously, in subscription order,
//! before `publish` returns.
//!
//! The dispatcher is deliberately minimal:
//! - Generic over the subscription key `K` and the event payload `E`; no
//!   trait objects or downcasting in the public API.
//! - Interior mutability throughout, so a dispatcher can be shared as
//!   `Rc<Dispatcher<K, E>>` and driven from any of its handles.
//! - No queuing: `publish` delivers immediately. Callers that need deferred
//!   or batched delivery build it on top.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::RefCell;
//! use std::rc::Rc;
//!
//! use liana_dispatch::Dispatcher;
//!
//! let dispatcher: Dispatcher<&str, u32> = Dispatcher::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! let id = dispatcher.subscribe("tick", move |value| sink.borrow_mut().push(*value));
//!
//! dispatcher.publish("tick", &1);
//! dispatcher.publish("tock", &2); // different key, not delivered
//! dispatcher.publish("tick", &3);
//! assert_eq!(*seen.borrow(), [1, 3]);
//!
//! dispatcher.unsubscribe(id);
//! dispatcher.publish("tick", &4);
//! assert_eq!(*seen.borrow(), [1, 3]);
//! ```
//!
//! ## Delivery rules
//!
//! Handlers may freely call back into the dispatcher they are being invoked
//! from. The rules are:
//!
//! - Handlers run in subscription order.
//! - A handler subscribed while a `publish` is in flight does not observe
//!   the in-flight event; it starts with the next one.
//! - Unsubscribing a handler that has not yet run in the current delivery
//!   skips it, including a handler unsubscribing itself.
//! - A nested `publish` from inside a handler delivers immediately, but
//!   never re-enters a handler that is already running.
//! - [`HandlerId`]s are unique per dispatcher and never reused.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// Identifies one subscription on one [`Dispatcher`].
///
/// Ids are handed out by [`Dispatcher::subscribe`] and are never reused, so a
/// stale id after an unsubscribe is harmless: it simply no longer matches
/// anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct Entry<K, E> {
    id: HandlerId,
    kind: K,
    /// `None` while the handler is executing, so nested deliveries and
    /// mid-delivery unsubscribes cannot re-enter it.
    handler: Option<Box<dyn FnMut(&E)>>,
}

struct Inner<K, E> {
    entries: Vec<Entry<K, E>>,
    next_id: u64,
}

/// A synchronous, single-threaded, typed publish/subscribe bus.
///
/// `K` is the subscription key (an event kind), `E` the event payload.
/// All methods take `&self`; share a dispatcher by cloning an
/// `Rc<Dispatcher<K, E>>` handle. See the crate docs for the delivery rules.
pub struct Dispatcher<K, E> {
    inner: RefCell<Inner<K, E>>,
}

impl<K, E> Dispatcher<K, E> {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                entries: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Subscribes `handler` to events published under `kind`.
    ///
    /// Returns the id to pass to [`Dispatcher::unsubscribe`]. May be called
    /// from inside a handler; the new subscription starts with the next
    /// published event.
    pub fn subscribe<F>(&self, kind: K, handler: F) -> HandlerId
    where
        F: FnMut(&E) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = HandlerId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push(Entry {
            id,
            kind,
            handler: Some(Box::new(handler)),
        });
        id
    }

    /// Removes the subscription with the given id.
    ///
    /// Returns `true` if the id matched a live subscription. May be called
    /// from inside a handler, including by the handler being removed.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|entry| entry.id != id);
        inner.entries.len() != before
    }

    /// Number of live subscriptions, across all kinds.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether the dispatcher has no subscriptions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handler_count() == 0
    }
}

impl<K: PartialEq, E> Dispatcher<K, E> {
    /// Publishes `event` to every handler subscribed under `kind`.
    ///
    /// Delivery is synchronous and in subscription order; see the crate docs
    /// for how subscriptions changed mid-delivery are treated.
    pub fn publish(&self, kind: K, event: &E) {
        // Snapshot the matching ids first: handlers subscribed during
        // delivery must not observe the in-flight event.
        let snapshot: Vec<HandlerId> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.id)
            .collect();

        for id in snapshot {
            // Take the handler out so no borrow is held while it runs. A
            // missing entry (unsubscribed mid-delivery) or a missing handler
            // (already running in an outer delivery) is skipped.
            let taken = self
                .inner
                .borrow_mut()
                .entries
                .iter_mut()
                .find(|entry| entry.id == id)
                .and_then(|entry| entry.handler.take());
            let Some(mut handler) = taken else {
                continue;
            };
            handler(event);
            // Put it back unless the handler unsubscribed itself.
            if let Some(entry) = self
                .inner
                .borrow_mut()
                .entries
                .iter_mut()
                .find(|entry| entry.id == id)
            {
                entry.handler = Some(handler);
            }
        }
    }
}

impl<K, E> Default for Dispatcher<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> fmt::Debug for Dispatcher<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handler_count())
            .finish_non_exhaustive()
    }
}
