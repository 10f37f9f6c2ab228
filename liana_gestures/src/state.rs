// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-surface gesture state machine.

use alloc::vec;
use alloc::vec::Vec;
use core::mem;

use crate::event::{PointerButtons, PointerEvent, PointerId};
use crate::gesture::GestureEvent;

/// Classification phase of one surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No gesture has qualified yet; a release now reads as a tap.
    #[default]
    Idle,
    /// Like [`GesturePhase::Idle`], except a release emits nothing: the
    /// surface just came out of a multitouch composition, and the lift-off of
    /// the last finger must not read as a tap.
    IdleDrag,
    /// A single pointer is dragging.
    Drag,
    /// A single pointer is dragging with the secondary button held.
    SecondDrag,
    /// Two or more pointers are active.
    Multitouch,
}

/// Book-keeping for one active pointer on one surface.
#[derive(Clone, Debug)]
pub struct PointerRecord<S> {
    start: PointerEvent<S>,
    latest: PointerEvent<S>,
    pre_events: Vec<PointerEvent<S>>,
}

impl<S> PointerRecord<S> {
    /// The pointer id this record tracks.
    #[must_use]
    pub fn id(&self) -> PointerId {
        self.latest.pointer
    }

    /// The event that began the current episode: the press, or the reseed
    /// point after a multitouch composition collapsed.
    #[must_use]
    pub fn start(&self) -> &PointerEvent<S> {
        &self.start
    }

    /// The most recent event observed for the pointer.
    #[must_use]
    pub fn latest(&self) -> &PointerEvent<S> {
        &self.latest
    }

    /// The events observed before the threshold was crossed, oldest first.
    /// The episode start seeds the history, so it is never empty while the
    /// pointer is still a tap candidate.
    #[must_use]
    pub fn pre_events(&self) -> &[PointerEvent<S>] {
        &self.pre_events
    }
}

impl<S: Copy> PointerRecord<S> {
    fn new(event: PointerEvent<S>) -> Self {
        Self {
            start: event,
            latest: event,
            pre_events: vec![event],
        }
    }

    /// Restarts the episode at the pointer's current event. Survivors of a
    /// shrinking multitouch composition measure future drag distance from
    /// here, with the history reseeded the same way a fresh press seeds it.
    fn reseed(&mut self) {
        self.start = self.latest;
        self.pre_events = vec![self.latest];
    }
}

/// The gesture state machine for a single surface.
///
/// Tracks the pointers active on the surface and classifies their event
/// stream into [`GestureEvent`]s: taps, drags (primary or secondary button),
/// and multitouch compositions. The machine is pure bookkeeping. Feed it
/// already-routed events through [`press`](Self::press),
/// [`update`](Self::update), and [`release`](Self::release), and publish or
/// inspect the returned events; cross-surface routing by pointer id, wheel
/// forwarding, and dispatch live a layer up in
/// [`Recognizer`](crate::Recognizer).
///
/// The drag threshold is strict Euclidean distance: a move qualifies only
/// when it is strictly farther from the episode start than the threshold, so
/// a move at exactly the threshold still counts as a tap candidate.
#[derive(Clone, Debug)]
pub struct GestureState<S> {
    phase: GesturePhase,
    pointers: Vec<PointerRecord<S>>,
}

impl<S> GestureState<S> {
    /// Creates an idle machine with no active pointers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            pointers: Vec::new(),
        }
    }

    /// The current classification phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The active pointer records, in press order.
    #[must_use]
    pub fn pointers(&self) -> &[PointerRecord<S>] {
        &self.pointers
    }

    /// Number of active pointers.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Whether the given pointer is active on this surface.
    #[must_use]
    pub fn is_tracking(&self, pointer: PointerId) -> bool {
        self.pointers.iter().any(|record| record.id() == pointer)
    }

    /// Discards all pointer state and returns to [`GesturePhase::Idle`].
    ///
    /// No end events are emitted: reset models the host losing input focus,
    /// where synthesizing releases would fabricate input the device never
    /// produced.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.pointers.clear();
    }

    fn latest_events(&self) -> Vec<PointerEvent<S>>
    where
        S: Copy,
    {
        self.pointers.iter().map(|record| record.latest).collect()
    }

    /// Emits the end event for the gesture in progress, if there is one.
    fn end_current(&self, out: &mut Vec<GestureEvent<S>>)
    where
        S: Copy,
    {
        match self.phase {
            GesturePhase::Drag => {
                if let Some(record) = self.pointers.first() {
                    out.push(GestureEvent::DragEnd {
                        event: record.latest,
                    });
                }
            }
            GesturePhase::SecondDrag => {
                if let Some(record) = self.pointers.first() {
                    out.push(GestureEvent::SecondDragEnd {
                        event: record.latest,
                    });
                }
            }
            GesturePhase::Multitouch => {
                out.push(GestureEvent::MultitouchEnd {
                    events: self.latest_events(),
                });
            }
            GesturePhase::Idle | GesturePhase::IdleDrag => {}
        }
    }
}

impl<S: Copy> GestureState<S> {
    /// Feeds a press event.
    ///
    /// A press while other pointers are active supersedes the gesture in
    /// progress: its end event is emitted first, then the new composition is
    /// announced with [`GestureEvent::MultitouchStart`] once two or more
    /// pointers are active. A press for a pointer already tracked replaces
    /// that record in place.
    pub fn press(&mut self, event: PointerEvent<S>) -> Vec<GestureEvent<S>> {
        let mut out = Vec::new();
        if !self.pointers.is_empty() {
            self.end_current(&mut out);
        }
        let record = PointerRecord::new(event);
        match self
            .pointers
            .iter_mut()
            .find(|record| record.id() == event.pointer)
        {
            Some(existing) => *existing = record,
            None => self.pointers.push(record),
        }
        if self.pointers.len() >= 2 {
            self.phase = GesturePhase::Multitouch;
            out.push(GestureEvent::MultitouchStart {
                events: self.latest_events(),
            });
        } else {
            self.phase = GesturePhase::Idle;
        }
        out
    }

    /// Feeds a move event, using `drag_threshold` for the qualification test.
    ///
    /// Sub-threshold moves accumulate silently in the record's pre-events,
    /// behind the episode start that seeds the history. The move that
    /// crosses the threshold decides the drag family from its button mask
    /// (secondary held means a seconddrag) and emits the start event
    /// carrying the episode start and the accumulated history; the crossing
    /// move itself appears in neither payload field. Moves for pointers this
    /// machine does not track are ignored.
    pub fn update(&mut self, event: PointerEvent<S>, drag_threshold: f64) -> Vec<GestureEvent<S>> {
        let Some(index) = self
            .pointers
            .iter()
            .position(|record| record.id() == event.pointer)
        else {
            return Vec::new();
        };
        self.pointers[index].latest = event;

        let mut out = Vec::new();
        match self.phase {
            GesturePhase::Idle | GesturePhase::IdleDrag => {
                let record = &mut self.pointers[index];
                let distance = record.start.position.distance(event.position);
                if distance > drag_threshold {
                    let start = record.start;
                    let pre_events = mem::take(&mut record.pre_events);
                    if event.buttons.contains(PointerButtons::SECONDARY) {
                        self.phase = GesturePhase::SecondDrag;
                        out.push(GestureEvent::SecondDragStart {
                            event: start,
                            pre_events,
                        });
                    } else {
                        self.phase = GesturePhase::Drag;
                        out.push(GestureEvent::DragStart {
                            event: start,
                            pre_events,
                        });
                    }
                } else {
                    record.pre_events.push(event);
                }
            }
            GesturePhase::Drag => out.push(GestureEvent::Drag { event }),
            GesturePhase::SecondDrag => out.push(GestureEvent::SecondDrag { event }),
            GesturePhase::Multitouch => out.push(GestureEvent::Multitouch {
                events: self.latest_events(),
            }),
        }
        out
    }

    /// Feeds a terminating event: a release, cancel, or leave. All three end
    /// the pointer identically; the payload keeps the original kind.
    ///
    /// Ending a multitouch composition emits [`GestureEvent::MultitouchEnd`]
    /// with the departing pointer still included, then recomposes from the
    /// survivors: each one restarts its episode where it stands, and the
    /// phase becomes [`GesturePhase::IdleDrag`] for a single survivor or a
    /// fresh [`GestureEvent::MultitouchStart`] for several. Events for
    /// pointers this machine does not track are ignored.
    pub fn release(&mut self, event: PointerEvent<S>) -> Vec<GestureEvent<S>> {
        let Some(index) = self
            .pointers
            .iter()
            .position(|record| record.id() == event.pointer)
        else {
            return Vec::new();
        };
        self.pointers[index].latest = event;

        let mut out = Vec::new();
        match self.phase {
            GesturePhase::Multitouch => {
                out.push(GestureEvent::MultitouchEnd {
                    events: self.latest_events(),
                });
                self.pointers.remove(index);
                for record in &mut self.pointers {
                    record.reseed();
                }
                match self.pointers.len() {
                    0 => self.phase = GesturePhase::Idle,
                    1 => self.phase = GesturePhase::IdleDrag,
                    _ => out.push(GestureEvent::MultitouchStart {
                        events: self.latest_events(),
                    }),
                }
            }
            GesturePhase::Drag => {
                out.push(GestureEvent::DragEnd { event });
                self.pointers.remove(index);
                self.phase = GesturePhase::Idle;
            }
            GesturePhase::SecondDrag => {
                out.push(GestureEvent::SecondDragEnd { event });
                self.pointers.remove(index);
                self.phase = GesturePhase::Idle;
            }
            GesturePhase::Idle => {
                out.push(GestureEvent::Tap { event });
                self.pointers.remove(index);
            }
            GesturePhase::IdleDrag => {
                self.pointers.remove(index);
                self.phase = GesturePhase::Idle;
            }
        }
        out
    }
}

impl<S> Default for GestureState<S> {
    fn default() -> Self {
        Self::new()
    }
}
