// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classified gesture events and their subscription kinds.

use alloc::vec::Vec;

use crate::event::{PointerEvent, WheelEvent};

/// The payload-free identity of a [`GestureEvent`], used as subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Press and release with no qualifying movement in between.
    Tap,
    /// Scroll-wheel input on a registered surface.
    Wheel,
    /// A primary drag began.
    DragStart,
    /// A primary drag continued.
    Drag,
    /// A primary drag ended.
    DragEnd,
    /// A secondary-button drag began.
    SecondDragStart,
    /// A secondary-button drag continued.
    SecondDrag,
    /// A secondary-button drag ended.
    SecondDragEnd,
    /// A multitouch composition formed or re-formed.
    MultitouchStart,
    /// A pointer moved within a multitouch composition.
    Multitouch,
    /// A multitouch composition ended or lost a pointer.
    MultitouchEnd,
}

/// One classified gesture event.
///
/// The variant set is closed; consumers match on it directly or subscribe by
/// [`GestureKind`]. Payloads carry the raw [`PointerEvent`]s behind the
/// gesture, so positions, buttons, and pointer ids are always available.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent<S> {
    /// A completed tap.
    Tap {
        /// The release that completed the tap.
        event: PointerEvent<S>,
    },
    /// Scroll-wheel input forwarded for a registered surface.
    Wheel {
        /// The wheel event as delivered by the host.
        event: WheelEvent<S>,
    },
    /// A single pointer crossed the drag threshold without the secondary
    /// button held.
    DragStart {
        /// The event that began the episode: the press, or the reseed point
        /// after a multitouch composition collapsed.
        event: PointerEvent<S>,
        /// The episode start followed by the moves observed before the
        /// threshold was crossed, oldest first. The crossing move itself
        /// appears in neither field.
        pre_events: Vec<PointerEvent<S>>,
    },
    /// A dragging pointer moved.
    Drag {
        /// The move that continued the drag.
        event: PointerEvent<S>,
    },
    /// A drag ended.
    DragEnd {
        /// The terminating event: the release, cancel, or leave, or the
        /// pointer's last known event when a new press supersedes the drag.
        event: PointerEvent<S>,
    },
    /// A single pointer crossed the drag threshold with the secondary button
    /// held.
    SecondDragStart {
        /// The event that began the episode; see [`GestureEvent::DragStart`].
        event: PointerEvent<S>,
        /// The pre-crossing history; see [`GestureEvent::DragStart`].
        pre_events: Vec<PointerEvent<S>>,
    },
    /// A secondary-button-dragging pointer moved.
    SecondDrag {
        /// The move that continued the drag.
        event: PointerEvent<S>,
    },
    /// A secondary-button drag ended.
    SecondDragEnd {
        /// The terminating event; see [`GestureEvent::DragEnd`].
        event: PointerEvent<S>,
    },
    /// Two or more pointers are now active on the surface.
    MultitouchStart {
        /// The latest event of every active pointer, in press order.
        events: Vec<PointerEvent<S>>,
    },
    /// A pointer moved while two or more were active.
    Multitouch {
        /// The latest event of every active pointer, in press order.
        events: Vec<PointerEvent<S>>,
    },
    /// The composition lost a pointer or was superseded.
    MultitouchEnd {
        /// The latest event of every pointer that was part of the
        /// composition, including the one that is departing.
        events: Vec<PointerEvent<S>>,
    },
}

impl<S> GestureEvent<S> {
    /// The payload-free kind of this event.
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Tap { .. } => GestureKind::Tap,
            Self::Wheel { .. } => GestureKind::Wheel,
            Self::DragStart { .. } => GestureKind::DragStart,
            Self::Drag { .. } => GestureKind::Drag,
            Self::DragEnd { .. } => GestureKind::DragEnd,
            Self::SecondDragStart { .. } => GestureKind::SecondDragStart,
            Self::SecondDrag { .. } => GestureKind::SecondDrag,
            Self::SecondDragEnd { .. } => GestureKind::SecondDragEnd,
            Self::MultitouchStart { .. } => GestureKind::MultitouchStart,
            Self::Multitouch { .. } => GestureKind::Multitouch,
            Self::MultitouchEnd { .. } => GestureKind::MultitouchEnd,
        }
    }
}
