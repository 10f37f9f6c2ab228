// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface registry, pointer routing, and configuration.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use liana_dispatch::{Dispatcher, HandlerId};

use crate::event::{InputEvent, PointerEvent, PointerEventKind, PointerId, WheelEvent};
use crate::gesture::{GestureEvent, GestureKind};
use crate::state::GestureState;

/// Distance a pointer must travel before a drag qualifies, unless configured
/// otherwise.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;

/// Runtime-adjustable recognizer settings, as a closed enumerated set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigOption {
    /// Distance a pointer must travel before a drag qualifies. Takes effect
    /// at the next comparison, including for episodes already in flight.
    DragThreshold(f64),
}

/// Handle to the gesture dispatcher of one registered surface.
///
/// Cloning shares the dispatcher. [`Recognizer::register`] hands out a handle
/// to the same dispatcher every time for the same surface;
/// [`GestureDispatcher::ptr_eq`] makes that observable.
pub struct GestureDispatcher<S> {
    inner: Rc<Dispatcher<GestureKind, GestureEvent<S>>>,
}

impl<S> GestureDispatcher<S> {
    fn new() -> Self {
        Self {
            inner: Rc::new(Dispatcher::new()),
        }
    }

    /// Subscribes `handler` to gesture events of the given kind.
    pub fn subscribe<F>(&self, kind: GestureKind, handler: F) -> HandlerId
    where
        F: FnMut(&GestureEvent<S>) + 'static,
    {
        self.inner.subscribe(kind, handler)
    }

    /// Removes a subscription; returns `true` if the id matched one.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        self.inner.unsubscribe(id)
    }

    /// Publishes `event` to the handlers subscribed under its kind.
    pub fn publish(&self, event: &GestureEvent<S>) {
        self.inner.publish(event.kind(), event);
    }

    /// Number of live subscriptions on this surface's dispatcher.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.inner.handler_count()
    }

    /// Whether two handles refer to the same dispatcher.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> Clone for GestureDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for GestureDispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureDispatcher")
            .field("handlers", &self.handler_count())
            .finish_non_exhaustive()
    }
}

/// One gesture event produced by [`Recognizer::handle_input`], paired with
/// the surface that produced it and that surface's dispatcher.
///
/// The recognizer returns emissions instead of publishing inline so that
/// handler execution happens outside any borrow of the recognizer; a handler
/// is then free to re-enter it, for example to register another surface or
/// adjust the threshold.
#[derive(Clone, Debug)]
pub struct Emission<S> {
    /// The surface the gesture happened on.
    pub surface: S,
    /// The dispatcher of that surface.
    pub dispatcher: GestureDispatcher<S>,
    /// The gesture event itself.
    pub event: GestureEvent<S>,
}

impl<S> Emission<S> {
    /// Publishes the event on its surface's dispatcher.
    pub fn publish(&self) {
        self.dispatcher.publish(&self.event);
    }
}

struct SurfaceEntry<S> {
    dispatcher: GestureDispatcher<S>,
    state: GestureState<S>,
}

/// Snapshot of recognizer bookkeeping, for debugging and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizerDebugInfo {
    /// Number of registered surfaces.
    pub surfaces: usize,
    /// Number of pointers currently tracked, across all surfaces.
    pub active_pointers: usize,
    /// The drag threshold currently in force.
    pub drag_threshold: f64,
}

/// Classifies routed input into gesture events across registered surfaces.
///
/// The recognizer keeps one [`GestureState`] and one [`GestureDispatcher`]
/// per registered surface, plus the global pointer index mapping every
/// active pointer to the surface it pressed on. Press and wheel events route
/// by their target; moves and terminating events route by the index, so a
/// gesture follows its pointer even when it wanders off the surface; blur
/// discards all state. Input that fits nothing (unknown pointer ids,
/// unregistered targets) is dropped silently.
///
/// [`handle_input`](Self::handle_input) returns [`Emission`]s for the caller
/// to publish once its mutable borrow has ended. The
/// [`GestureRouter`](crate::GestureRouter) does that wiring for hosts that
/// deliver input through an [`InputSource`](crate::InputSource); drive the
/// recognizer directly when embedding it somewhere else.
pub struct Recognizer<S> {
    surfaces: HashMap<S, SurfaceEntry<S>>,
    pointer_index: HashMap<PointerId, S>,
    drag_threshold: f64,
    surface_hook: Option<Box<dyn FnMut(&S)>>,
}

impl<S: Copy + Eq + Hash> Recognizer<S> {
    /// Creates a recognizer with the default drag threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_drag_threshold(DEFAULT_DRAG_THRESHOLD)
    }

    /// Creates a recognizer with the given drag threshold.
    #[must_use]
    pub fn with_drag_threshold(drag_threshold: f64) -> Self {
        Self {
            surfaces: HashMap::new(),
            pointer_index: HashMap::new(),
            drag_threshold,
            surface_hook: None,
        }
    }

    /// Registers `surface` for gesture classification and returns the handle
    /// to its dispatcher.
    ///
    /// Registration is idempotent: a surface registered again yields a
    /// handle to the same dispatcher, with all existing subscriptions and
    /// gesture state intact. The surface hook, if one is installed, runs
    /// only when the surface is first seen.
    pub fn register(&mut self, surface: S) -> GestureDispatcher<S> {
        if let Some(entry) = self.surfaces.get(&surface) {
            return entry.dispatcher.clone();
        }
        if let Some(hook) = self.surface_hook.as_mut() {
            hook(&surface);
        }
        let dispatcher = GestureDispatcher::new();
        self.surfaces.insert(
            surface,
            SurfaceEntry {
                dispatcher: dispatcher.clone(),
                state: GestureState::new(),
            },
        );
        dispatcher
    }

    /// Installs a hook that runs once for each newly registered surface.
    ///
    /// Hosts use this to prepare a surface for gesture input, typically to
    /// suppress the platform's native gesture handling on it.
    pub fn set_surface_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&S) + 'static,
    {
        self.surface_hook = Some(Box::new(hook));
    }

    /// Applies one configuration option.
    pub fn set_option(&mut self, option: ConfigOption) {
        match option {
            ConfigOption::DragThreshold(value) => self.drag_threshold = value,
        }
    }

    /// Sets the drag threshold. Takes effect at the next distance
    /// comparison, including for episodes already in flight.
    pub fn set_drag_threshold(&mut self, value: f64) {
        self.drag_threshold = value;
    }

    /// The drag threshold currently in force.
    #[must_use]
    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold
    }

    /// Feeds one input event and returns the gesture events it produced.
    ///
    /// Publish the returned emissions (usually via [`Emission::publish`])
    /// after releasing any mutable borrow of the recognizer.
    pub fn handle_input(&mut self, input: InputEvent<S>) -> Vec<Emission<S>> {
        match input {
            InputEvent::Pointer(event) => match event.kind {
                PointerEventKind::Press => self.on_press(event),
                PointerEventKind::Move => self.on_move(event),
                PointerEventKind::Release | PointerEventKind::Cancel | PointerEventKind::Leave => {
                    self.on_release(event)
                }
            },
            InputEvent::Wheel(event) => self.on_wheel(event),
            // Subscribed so hosts can route suppression decisions through
            // one seam; classification has no use for it.
            InputEvent::ContextMenu => Vec::new(),
            InputEvent::Blur => {
                self.reset();
                Vec::new()
            }
        }
    }

    /// Whether `surface` has been registered.
    #[must_use]
    pub fn contains(&self, surface: S) -> bool {
        self.surfaces.contains_key(&surface)
    }

    /// Number of registered surfaces.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of pointers currently tracked, across all surfaces.
    #[must_use]
    pub fn active_pointer_count(&self) -> usize {
        self.pointer_index.len()
    }

    /// The gesture machine of a registered surface, for inspection.
    #[must_use]
    pub fn surface_state(&self, surface: S) -> Option<&GestureState<S>> {
        self.surfaces.get(&surface).map(|entry| &entry.state)
    }

    /// The surface that owns an active pointer.
    #[must_use]
    pub fn owner_of(&self, pointer: PointerId) -> Option<S> {
        self.pointer_index.get(&pointer).copied()
    }

    /// Snapshot of the bookkeeping counters.
    #[must_use]
    pub fn debug_info(&self) -> RecognizerDebugInfo {
        RecognizerDebugInfo {
            surfaces: self.surfaces.len(),
            active_pointers: self.pointer_index.len(),
            drag_threshold: self.drag_threshold,
        }
    }

    fn on_press(&mut self, event: PointerEvent<S>) -> Vec<Emission<S>> {
        if let Some(owner) = self.pointer_index.get(&event.pointer) {
            // A live id pressing on a different surface breaks the host's
            // id-uniqueness contract; honoring it would corrupt the owner's
            // composition. Same-surface re-presses are legitimate and the
            // machine replaces the record.
            if *owner != event.target {
                return Vec::new();
            }
        }
        let Some(entry) = self.surfaces.get_mut(&event.target) else {
            return Vec::new();
        };
        let events = entry.state.press(event);
        self.pointer_index.insert(event.pointer, event.target);
        Self::wrap(event.target, &entry.dispatcher, events)
    }

    fn on_move(&mut self, event: PointerEvent<S>) -> Vec<Emission<S>> {
        let Some(owner) = self.pointer_index.get(&event.pointer).copied() else {
            return Vec::new();
        };
        let Some(entry) = self.surfaces.get_mut(&owner) else {
            return Vec::new();
        };
        let events = entry.state.update(event, self.drag_threshold);
        Self::wrap(owner, &entry.dispatcher, events)
    }

    fn on_release(&mut self, event: PointerEvent<S>) -> Vec<Emission<S>> {
        let Some(owner) = self.pointer_index.get(&event.pointer).copied() else {
            return Vec::new();
        };
        // The index entry and the surface's record go together; both end in
        // this step.
        self.pointer_index.remove(&event.pointer);
        let Some(entry) = self.surfaces.get_mut(&owner) else {
            return Vec::new();
        };
        let events = entry.state.release(event);
        Self::wrap(owner, &entry.dispatcher, events)
    }

    fn on_wheel(&mut self, event: WheelEvent<S>) -> Vec<Emission<S>> {
        let Some(entry) = self.surfaces.get(&event.target) else {
            return Vec::new();
        };
        Self::wrap(
            event.target,
            &entry.dispatcher,
            vec![GestureEvent::Wheel { event }],
        )
    }

    fn reset(&mut self) {
        self.pointer_index.clear();
        for entry in self.surfaces.values_mut() {
            entry.state.reset();
        }
    }

    fn wrap(
        surface: S,
        dispatcher: &GestureDispatcher<S>,
        events: Vec<GestureEvent<S>>,
    ) -> Vec<Emission<S>> {
        events
            .into_iter()
            .map(|event| Emission {
                surface,
                dispatcher: dispatcher.clone(),
                event,
            })
            .collect()
    }
}

impl<S: Copy + Eq + Hash> Default for Recognizer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Recognizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("surfaces", &self.surfaces.len())
            .field("active_pointers", &self.pointer_index.len())
            .field("drag_threshold", &self.drag_threshold)
            .finish_non_exhaustive()
    }
}
