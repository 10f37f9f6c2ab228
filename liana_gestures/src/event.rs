// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The normalized input model fed into gesture classification.
//!
//! Hosts translate their platform's input (DOM pointer events, winit device
//! events, a test script) into [`InputEvent`]s. The recognizer assumes the
//! stream is already normalized: pointer ids are unique among concurrently
//! active pointers, every press is eventually matched by a release, cancel,
//! or leave, and press events carry the surface the host resolved them to.

use kurbo::{Point, Vec2};

/// Identifies one pointer (mouse, pen, or touch contact) for its lifetime.
///
/// Hosts supply ids from their input layer, for example the platform pointer
/// id. An id must stay stable from press to release/cancel/leave and must not
/// be shared by two concurrently active pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(u64);

impl PointerId {
    /// Wraps a raw host pointer id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host pointer id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

bitflags::bitflags! {
    /// Device buttons currently held, in the conventional `buttons` mask layout.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Left mouse button, pen tip, or touch contact.
        const PRIMARY = 0b0000_0001;
        /// Right mouse button or pen barrel button.
        const SECONDARY = 0b0000_0010;
        /// Middle mouse button.
        const AUXILIARY = 0b0000_0100;
        /// Back navigation button.
        const BACK = 0b0000_1000;
        /// Forward navigation button.
        const FORWARD = 0b0001_0000;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::empty()
    }
}

/// The lifecycle stage a [`PointerEvent`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// The pointer came down.
    Press,
    /// The pointer moved while active.
    Move,
    /// The pointer was lifted normally.
    Release,
    /// The host cancelled the pointer (palm rejection, system grab, ...).
    Cancel,
    /// The pointer left the tracked area while active.
    Leave,
}

/// One normalized pointer event.
///
/// `target` is the surface the host resolved the event to. It decides which
/// surface owns the pointer at press time; for later events the recognizer
/// routes by pointer id instead, so a move that wanders off the surface still
/// belongs to the gesture it started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent<S> {
    /// The pointer this event belongs to.
    pub pointer: PointerId,
    /// Lifecycle stage.
    pub kind: PointerEventKind,
    /// The surface the host resolved this event to.
    pub target: S,
    /// Position in the host's coordinate space.
    pub position: Point,
    /// Device buttons held at the time of the event.
    pub buttons: PointerButtons,
}

impl<S> PointerEvent<S> {
    /// Creates an event of the given kind with no buttons held.
    #[must_use]
    pub const fn new(
        pointer: PointerId,
        kind: PointerEventKind,
        target: S,
        position: Point,
    ) -> Self {
        Self {
            pointer,
            kind,
            target,
            position,
            buttons: PointerButtons::empty(),
        }
    }

    /// Creates a press event.
    #[must_use]
    pub const fn press(pointer: PointerId, target: S, position: Point) -> Self {
        Self::new(pointer, PointerEventKind::Press, target, position)
    }

    /// Creates a move event.
    #[must_use]
    pub const fn moved(pointer: PointerId, target: S, position: Point) -> Self {
        Self::new(pointer, PointerEventKind::Move, target, position)
    }

    /// Creates a release event.
    #[must_use]
    pub const fn release(pointer: PointerId, target: S, position: Point) -> Self {
        Self::new(pointer, PointerEventKind::Release, target, position)
    }

    /// Creates a cancel event.
    #[must_use]
    pub const fn cancel(pointer: PointerId, target: S, position: Point) -> Self {
        Self::new(pointer, PointerEventKind::Cancel, target, position)
    }

    /// Creates a leave event.
    #[must_use]
    pub const fn leave(pointer: PointerId, target: S, position: Point) -> Self {
        Self::new(pointer, PointerEventKind::Leave, target, position)
    }

    /// Replaces the button mask.
    #[must_use]
    pub const fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

/// One scroll-wheel event, forwarded per surface without classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent<S> {
    /// The surface the host resolved this event to.
    pub target: S,
    /// Position in the host's coordinate space.
    pub position: Point,
    /// Scroll delta, in the host's scroll units.
    pub delta: Vec2,
}

impl<S> WheelEvent<S> {
    /// Creates a wheel event.
    #[must_use]
    pub const fn new(target: S, position: Point, delta: Vec2) -> Self {
        Self {
            target,
            position,
            delta,
        }
    }
}

/// Any input the recognizer consumes, in host delivery order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent<S> {
    /// A pointer lifecycle event.
    Pointer(PointerEvent<S>),
    /// A scroll-wheel event.
    Wheel(WheelEvent<S>),
    /// A context-menu request. Part of the subscribed set so hosts route it
    /// through the same seam, and intentionally ignored by classification.
    ContextMenu,
    /// The host window or view lost input focus; all gesture state is
    /// discarded without emitting end events.
    Blur,
}

impl<S> From<PointerEvent<S>> for InputEvent<S> {
    fn from(event: PointerEvent<S>) -> Self {
        Self::Pointer(event)
    }
}

impl<S> From<WheelEvent<S>> for InputEvent<S> {
    fn from(event: WheelEvent<S>) -> Self {
        Self::Wheel(event)
    }
}
