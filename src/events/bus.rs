//! # Event bus: ordered synchronous delivery with an async observer tap.
//!
//! [`Bus`] is the channel over which the interception layer and the
//! sequencer report lifecycle events.
//!
//! ## Architecture
//! ```text
//! emit(Event)
//!    │
//!    ├──► sync handlers for the event's topic, in registration order
//!    │      (wrapped hooks, the sequencer's change listener, observers)
//!    │
//!    └──► broadcast mirror ───► watch() receivers (async, fire-and-forget)
//! ```
//!
//! ## Rules
//! - **Synchronous delivery**: handlers registered via [`Bus::on`] run
//!   inline during `emit`, in registration order. This is what lets the
//!   sequencer observe every navigation burst before a handler can settle.
//! - **Reentrancy**: handlers are cloned out of the registry before being
//!   invoked, so a handler may `emit`, `on` or `off` without deadlocking.
//! - **Async tap**: every event is also mirrored into a
//!   [`tokio::sync::broadcast`] channel. Slow receivers get
//!   `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: mirrored events are lost if nobody is watching at
//!   send time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;

use super::event::{Event, Topic};

/// Synchronous handler invoked inline during [`Bus::emit`].
pub type TopicHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Opaque token identifying one [`Bus::on`] registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Registration {
    id: u64,
    topic: Topic,
    handler: TopicHandler,
}

struct BusInner {
    handlers: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
    tx: broadcast::Sender<Event>,
}

/// Ordered synchronous publish/subscribe channel keyed by [`Topic`].
///
/// Cheap to clone (internally holds an `Arc`). Multiple publishers may emit
/// concurrently; per-emit, handlers run on the emitting thread.
#[derive(Clone)]
pub struct Bus {
    inner: Arc<BusInner>,
}

impl Bus {
    /// Creates a new bus.
    ///
    /// `capacity` sizes the async mirror channel's ring buffer and is
    /// clamped to a minimum of 1. Synchronous delivery is unaffected by it.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self {
            inner: Arc::new(BusInner {
                handlers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                tx,
            }),
        }
    }

    /// Registers a synchronous handler for one topic.
    ///
    /// Handlers for the same topic run in registration order during `emit`.
    pub fn on(&self, topic: Topic, handler: impl Fn(&Event) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.inner.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        self.lock_handlers().push(Registration {
            id,
            topic,
            handler: Arc::new(handler),
        });
        SubscriptionId(id)
    }

    /// Removes a registration. Returns `false` if it was already gone.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.lock_handlers();
        let before = handlers.len();
        handlers.retain(|r| r.id != id.0);
        handlers.len() != before
    }

    /// Emits an event: matching synchronous handlers first (in registration
    /// order), then the async mirror.
    ///
    /// Handlers are invoked outside the registry lock; emitting from inside
    /// a handler is allowed and simply recurses.
    pub fn emit(&self, ev: Event) {
        let matched: Vec<TopicHandler> = self
            .lock_handlers()
            .iter()
            .filter(|r| r.topic == ev.topic)
            .map(|r| Arc::clone(&r.handler))
            .collect();
        for handler in matched {
            handler(&ev);
        }
        // Mirror after sync delivery; dropped if nobody is watching.
        let _ = self.inner.tx.send(ev);
    }

    /// Creates an async observer that will see subsequent events.
    ///
    /// - Each call creates an **independent** receiver.
    /// - A receiver only gets events **sent after** it subscribes.
    /// - Slow receivers get `RecvError::Lagged(n)` and skip missed items.
    pub fn watch(&self) -> broadcast::Receiver<Event> {
        self.inner.tx.subscribe()
    }

    /// Number of live synchronous registrations.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.lock_handlers().len()
    }

    fn lock_handlers(&self) -> std::sync::MutexGuard<'_, Vec<Registration>> {
        // Handlers run outside the lock, so a poisoned registry only means
        // a panic mid-push/retain; the Vec itself is still consistent.
        self.inner
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let bus = Bus::new(8);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        bus.on(Topic::Push, move |_| s.lock().unwrap().push("first"));
        let s = Arc::clone(&seen);
        bus.on(Topic::Push, move |_| s.lock().unwrap().push("second"));

        bus.emit(Event::new(Topic::Push));
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_off_stops_delivery() {
        let bus = Bus::new(8);
        let seen = Arc::new(Mutex::new(0u32));

        let s = Arc::clone(&seen);
        let id = bus.on(Topic::Pop, move |_| *s.lock().unwrap() += 1);

        bus.emit(Event::new(Topic::Pop));
        assert!(bus.off(id));
        assert!(!bus.off(id));
        bus.emit(Event::new(Topic::Pop));

        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_topic_filtering() {
        let bus = Bus::new(8);
        let seen = Arc::new(Mutex::new(0u32));

        let s = Arc::clone(&seen);
        bus.on(Topic::Replace, move |_| *s.lock().unwrap() += 1);

        bus.emit(Event::new(Topic::Push));
        bus.emit(Event::new(Topic::Replace));
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_reentrant_emit_does_not_deadlock() {
        let bus = Bus::new(8);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let b = bus.clone();
        let s = Arc::clone(&seen);
        bus.on(Topic::Push, move |_| {
            s.lock().unwrap().push(Topic::Push);
            b.emit(Event::new(Topic::StateChange).with_cause(Topic::Push));
        });
        let s = Arc::clone(&seen);
        bus.on(Topic::StateChange, move |ev| {
            assert_eq!(ev.cause, Some(Topic::Push));
            s.lock().unwrap().push(Topic::StateChange);
        });

        bus.emit(Event::new(Topic::Push));
        assert_eq!(*seen.lock().unwrap(), vec![Topic::Push, Topic::StateChange]);
    }

    #[tokio::test]
    async fn test_watch_mirrors_events() {
        let bus = Bus::new(8);
        let mut rx = bus.watch();

        bus.emit(Event::new(Topic::Halted));
        let ev = rx.recv().await.expect("mirrored event");
        assert_eq!(ev.topic, Topic::Halted);
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let bus = Bus::new(1);
        bus.emit(Event::new(Topic::Warning).with_reason("nobody listening"));
    }
}
