// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The injectable seam between host input delivery and recognition.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::event::InputEvent;

/// Boxed callback receiving normalized input events.
pub type InputHandler<S> = Box<dyn FnMut(InputEvent<S>)>;

/// A source of normalized input events.
///
/// Implementors bridge a host's event delivery — a window's pointer events,
/// a replayed trace, a test script — to subscribed handlers. The
/// [`GestureRouter`](crate::GestureRouter) subscribes exactly one handler at
/// construction and unsubscribes it when detached, so an implementation only
/// has to honor the pairing of the two calls.
pub trait InputSource<S> {
    /// Token identifying one subscription, for later removal.
    type Subscription;

    /// Starts delivering events to `handler`.
    fn subscribe(&mut self, handler: InputHandler<S>) -> Self::Subscription;

    /// Stops delivering events to the handler behind `subscription`.
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// Token returned by [`EventFeed`]'s [`InputSource::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeedSubscription(u64);

struct FeedEntry<S> {
    id: u64,
    /// `None` while the handler is executing.
    handler: Option<InputHandler<S>>,
}

struct FeedInner<S> {
    entries: Vec<FeedEntry<S>>,
    queue: VecDeque<InputEvent<S>>,
    delivering: bool,
    next_id: u64,
}

/// A hand-driven [`InputSource`] for headless hosts and tests.
///
/// Clones share the feed: one clone can sit inside a
/// [`GestureRouter`](crate::GestureRouter) while the host keeps another to
/// [`push`](EventFeed::push) events into. Delivery is synchronous and
/// run-to-completion: an event pushed from inside a handler is queued and
/// delivered only after every subscriber has seen the current one.
pub struct EventFeed<S> {
    inner: Rc<RefCell<FeedInner<S>>>,
}

impl<S> EventFeed<S> {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FeedInner {
                entries: Vec::new(),
                queue: VecDeque::new(),
                delivering: false,
                next_id: 0,
            })),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl<S: Copy> EventFeed<S> {
    /// Delivers `event` to every subscriber.
    ///
    /// When called from inside a handler, the event is queued behind the one
    /// being delivered and this call returns immediately; the outermost
    /// `push` drains the queue in order.
    pub fn push(&self, event: InputEvent<S>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.queue.push_back(event);
            if inner.delivering {
                return;
            }
            inner.delivering = true;
        }
        loop {
            let next = self.inner.borrow_mut().queue.pop_front();
            let Some(event) = next else { break };
            self.deliver(event);
        }
        self.inner.borrow_mut().delivering = false;
    }

    fn deliver(&self, event: InputEvent<S>) {
        // Snapshot first: a handler subscribed during delivery starts with
        // the next event.
        let snapshot: Vec<u64> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.id)
            .collect();
        for id in snapshot {
            // Take the handler out so no borrow is held while it runs;
            // handlers may push events or change subscriptions freely.
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

impl<S> InputSource<S> for EventFeed<S> {
    type Subscription = FeedSubscription;

    fn subscribe(&mut self, handler: InputHandler<S>) -> FeedSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(FeedEntry {
            id,
            handler: Some(handler),
        });
        FeedSubscription(id)
    }

    fn unsubscribe(&mut self, subscription: FeedSubscription) {
        self.inner
            .borrow_mut()
            .entries
            .retain(|entry| entry.id != subscription.0);
    }
}

impl<S> Clone for EventFeed<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S> Default for EventFeed<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for EventFeed<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventFeed")
            .field("subscribers", &inner.entries.len())
            .field("queued", &inner.queue.len())
            .field("delivering", &inner.delivering)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PointerEvent, PointerId};

    use alloc::vec;
    use kurbo::Point;

    fn ping(n: u64) -> InputEvent<u32> {
        PointerEvent::press(PointerId::new(n), 0, Point::ZERO).into()
    }

    fn id_of(event: InputEvent<u32>) -> u64 {
        match event {
            InputEvent::Pointer(pointer) => pointer.pointer.get(),
            _ => panic!("expected a pointer event, got {event:?}"),
        }
    }

    #[test]
    fn push_delivers_to_all_subscribers_in_order() {
        let mut feed = EventFeed::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        feed.subscribe(Box::new(move |event| {
            sink.borrow_mut().push((1_u8, id_of(event)));
        }));
        let sink = Rc::clone(&log);
        feed.subscribe(Box::new(move |event| {
            sink.borrow_mut().push((2_u8, id_of(event)));
        }));

        feed.push(ping(7));
        assert_eq!(*log.borrow(), vec![(1, 7), (2, 7)]);
        assert_eq!(feed.subscriber_count(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut feed = EventFeed::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        let subscription = feed.subscribe(Box::new(move |event| {
            sink.borrow_mut().push(id_of(event));
        }));

        feed.push(ping(1));
        feed.unsubscribe(subscription);
        feed.push(ping(2));

        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn events_pushed_during_delivery_queue_fifo() {
        let mut feed = EventFeed::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        // The first subscriber reacts to event 1 by pushing event 2. Every
        // subscriber must still see event 1 before anyone sees event 2.
        let inject = feed.clone();
        let sink = Rc::clone(&log);
        feed.subscribe(Box::new(move |event| {
            let id = id_of(event);
            sink.borrow_mut().push((1_u8, id));
            if id == 1 {
                inject.push(ping(2));
            }
        }));
        let sink = Rc::clone(&log);
        feed.subscribe(Box::new(move |event| {
            sink.borrow_mut().push((2_u8, id_of(event)));
        }));

        feed.push(ping(1));
        assert_eq!(*log.borrow(), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn handler_subscribed_during_delivery_starts_with_the_next_event() {
        let mut feed = EventFeed::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut registrar = feed.clone();
        let sink = Rc::clone(&log);
        feed.subscribe(Box::new(move |event| {
            let id = id_of(event);
            sink.borrow_mut().push((1_u8, id));
            if id == 1 {
                let late_sink = Rc::clone(&sink);
                registrar.subscribe(Box::new(move |event| {
                    late_sink.borrow_mut().push((9_u8, id_of(event)));
                }));
            }
        }));

        feed.push(ping(1));
        assert_eq!(*log.borrow(), vec![(1, 1)]);

        feed.push(ping(2));
        assert_eq!(*log.borrow(), vec![(1, 1), (1, 2), (9, 2)]);
    }

    #[test]
    fn clones_share_the_feed() {
        let mut feed = EventFeed::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        feed.subscribe(Box::new(move |event| {
            sink.borrow_mut().push(id_of(event));
        }));

        feed.clone().push(ping(3));
        assert_eq!(*log.borrow(), vec![3]);
    }
}
