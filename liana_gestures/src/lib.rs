// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=liana_gestures --heading-base-level=0

//! Liana Gestures: pointer gesture classification for UI surfaces.
//!
//! This crate turns a normalized stream of pointer and wheel events into
//! higher-level gesture events, scoped per **surface** — whatever
//! `Copy + Eq + Hash` id the host uses for the regions that should receive
//! gestures. It classifies:
//!
//! - **tap** — press and release with no qualifying movement in between.
//! - **drag** and **seconddrag** — a single pointer travelling strictly
//!   farther than the drag threshold; the family is decided by whether the
//!   secondary button is held on the move that crosses the threshold.
//!   Start/move/end phases, with the pre-threshold event history delivered
//!   in the start event.
//! - **multitouch** — two or more concurrent pointers on one surface, with
//!   start/move/end phases re-announced as the composition grows and
//!   shrinks.
//! - **wheel** — scroll input forwarded per surface, stateless.
//!
//! Classification is purely geometric and ordinal: no timers, no velocity,
//! and no hit-testing. The host resolves each press to a surface; after
//! that, the pointer's gesture follows it by id, even off the surface.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use liana_gestures::{EventFeed, GestureKind, GestureRouter, PointerEvent, PointerId};
//!
//! // The feed stands in for a host input loop; clones share it.
//! let feed = EventFeed::<u32>::new();
//! let router = GestureRouter::new(feed.clone());
//!
//! let surface = router.register(7);
//! let taps = Rc::new(RefCell::new(0));
//! let seen = Rc::clone(&taps);
//! surface.subscribe(GestureKind::Tap, move |_| *seen.borrow_mut() += 1);
//!
//! let finger = PointerId::new(1);
//! feed.push(PointerEvent::press(finger, 7, Point::new(10.0, 10.0)).into());
//! feed.push(PointerEvent::release(finger, 7, Point::new(12.0, 11.0)).into());
//! assert_eq!(*taps.borrow(), 1);
//! ```
//!
//! ## Architecture
//!
//! Input flows through four pieces, each usable on its own:
//!
//! - [`InputSource`] is the seam to the host: anything that can deliver
//!   [`InputEvent`]s to a subscribed handler. [`EventFeed`] is the built-in
//!   hand-driven source for tests and headless hosts.
//! - [`GestureRouter`] binds a source to a recognizer for the life of the
//!   router (or until [`GestureRouter::detach`]).
//! - [`Recognizer`] owns the surface registry, the global pointer index that
//!   routes moves and releases to the surface owning each pointer, and the
//!   drag-threshold configuration.
//! - [`GestureState`] is the per-surface machine. Embedders that need no
//!   registry can feed it routed events directly and handle the returned
//!   [`GestureEvent`]s themselves.
//!
//! Everything is single-threaded and synchronous; an input event is
//! processed to completion before the next one, and gesture events are
//! published on each surface's [`GestureDispatcher`] in the order they were
//! produced.
//!
//! ## Features
//!
//! - `std` (default): rely on the standard library for floating-point
//!   functions.
//! - `libm`: use `libm` for those instead, for no_std targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod gesture;
mod recognizer;
mod router;
mod source;
mod state;

pub use event::{
    InputEvent, PointerButtons, PointerEvent, PointerEventKind, PointerId, WheelEvent,
};
pub use gesture::{GestureEvent, GestureKind};
pub use recognizer::{
    ConfigOption, DEFAULT_DRAG_THRESHOLD, Emission, GestureDispatcher, Recognizer,
    RecognizerDebugInfo,
};
pub use router::GestureRouter;
pub use source::{EventFeed, FeedSubscription, InputHandler, InputSource};
pub use state::{GesturePhase, GestureState, PointerRecord};

// The dispatcher backing `GestureDispatcher` hands out these ids.
pub use liana_dispatch::HandlerId;
