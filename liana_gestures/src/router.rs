// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding an input source to a recognizer.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::hash::Hash;

use crate::event::InputEvent;
use crate::recognizer::{ConfigOption, GestureDispatcher, Recognizer, RecognizerDebugInfo};
use crate::source::InputSource;

/// Routes an [`InputSource`]'s events into a shared [`Recognizer`] and
/// publishes the resulting gesture events.
///
/// The router subscribes one handler to the source at construction. Each
/// incoming event is processed to completion: the recognizer mutates its
/// state and returns the produced emissions, its borrow ends, and only then
/// is anything published to the surface dispatchers. Gesture handlers can
/// therefore call back into the router — to register another surface, say,
/// or tighten the drag threshold — without hitting a held borrow.
///
/// Dropping the router (or calling [`detach`](Self::detach)) stops input
/// delivery. Registered surfaces, their dispatchers, and consumer
/// subscriptions all survive; only the source binding ends.
pub struct GestureRouter<S, I: InputSource<S>> {
    source: I,
    subscription: Option<I::Subscription>,
    recognizer: Rc<RefCell<Recognizer<S>>>,
}

impl<S, I> GestureRouter<S, I>
where
    S: Copy + Eq + Hash + 'static,
    I: InputSource<S>,
{
    /// Creates a router over `source` with a fresh default recognizer.
    #[must_use]
    pub fn new(source: I) -> Self {
        Self::with_recognizer(source, Rc::new(RefCell::new(Recognizer::new())))
    }

    /// Creates a router over `source` driving a shared recognizer.
    ///
    /// Lets several sources feed one recognizer, or a host adopt a
    /// recognizer it constructed and configured up front.
    #[must_use]
    pub fn with_recognizer(mut source: I, recognizer: Rc<RefCell<Recognizer<S>>>) -> Self {
        let sink = Rc::clone(&recognizer);
        let subscription = source.subscribe(Box::new(move |input: InputEvent<S>| {
            let emissions = sink.borrow_mut().handle_input(input);
            for emission in &emissions {
                emission.publish();
            }
        }));
        Self {
            source,
            subscription: Some(subscription),
            recognizer,
        }
    }

    /// Registers a surface and returns the handle to its dispatcher.
    ///
    /// Idempotent, like [`Recognizer::register`].
    pub fn register(&self, surface: S) -> GestureDispatcher<S> {
        self.recognizer.borrow_mut().register(surface)
    }

    /// Installs the hook that prepares newly registered surfaces.
    ///
    /// See [`Recognizer::set_surface_hook`].
    pub fn set_surface_hook<F>(&self, hook: F)
    where
        F: FnMut(&S) + 'static,
    {
        self.recognizer.borrow_mut().set_surface_hook(hook);
    }

    /// Applies one configuration option.
    pub fn set_option(&self, option: ConfigOption) {
        self.recognizer.borrow_mut().set_option(option);
    }

    /// Sets the drag threshold for all surfaces.
    pub fn set_drag_threshold(&self, value: f64) {
        self.recognizer.borrow_mut().set_drag_threshold(value);
    }

    /// The drag threshold currently in force.
    #[must_use]
    pub fn drag_threshold(&self) -> f64 {
        self.recognizer.borrow().drag_threshold()
    }

    /// Snapshot of the recognizer's bookkeeping counters.
    #[must_use]
    pub fn debug_info(&self) -> RecognizerDebugInfo {
        self.recognizer.borrow().debug_info()
    }

    /// Shared handle to the recognizer, for inspection or for driving it
    /// outside the source binding.
    #[must_use]
    pub fn recognizer(&self) -> Rc<RefCell<Recognizer<S>>> {
        Rc::clone(&self.recognizer)
    }
}

impl<S, I: InputSource<S>> GestureRouter<S, I> {
    /// Detaches the router from its input source. Idempotent; also runs on
    /// drop. Surfaces and their dispatchers are unaffected.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.source.unsubscribe(subscription);
        }
    }

    /// Whether the router is still subscribed to its source.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// The underlying input source.
    #[must_use]
    pub fn source(&self) -> &I {
        &self.source
    }

    /// Mutable access to the underlying input source.
    pub fn source_mut(&mut self) -> &mut I {
        &mut self.source
    }
}

impl<S, I: InputSource<S>> Drop for GestureRouter<S, I> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<S, I: InputSource<S>> fmt::Debug for GestureRouter<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureRouter")
            .field("attached", &self.is_attached())
            .field("recognizer", &self.recognizer.borrow())
            .finish_non_exhaustive()
    }
}
