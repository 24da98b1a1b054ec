//! # Sequencer: single-flight handler invocations with collapse-to-latest.
//!
//! The [`Sequencer`] owns exactly two mutable cells, kept together in a
//! [`Flight`] record inside a `tokio::sync::watch` channel:
//!
//! - `running`: whether a handler invocation chain is currently executing;
//! - `pending`: the topic of the most recent navigation event that arrived
//!   while running, or `None`. At most one pending marker exists; later
//!   arrivals overwrite it, never queue.
//!
//! ## State machine
//! ```text
//! on_change(topic):
//!   Idle   (running == false) ──► running = true, spawn chain(topic)
//!   Active (running == true)  ──► pending = Some(topic)   (collapse)
//!
//! chain(topic):
//!   loop {
//!     snapshot = capture(source, topic)        // latest state, not event-time
//!     result   = handler(snapshot, warnings)   // panics caught
//!     Ok(true)  ── pending? take it and loop : running = false, exit
//!     Ok(false) ── emit Halted, clear both cells, exit
//!     Err(_)    ── emit Error(reason), clear both cells, exit
//!   }
//! }
//! ```
//!
//! Every transition happens inside `watch::Sender::send_modify`, so the
//! start-vs-collapse decision is atomic even when hooks fire from another
//! thread. One chain task exists per Active period: the Idle→Active winner
//! spawns it, and collapsed follow-ups run inside the same task, so
//! `running` stays true across a collapse and
//! [`SequenceHandle::settled`](crate::SequenceHandle::settled) drains the
//! whole chain.
//!
//! No timeouts and no cancellation: a hung handler blocks processing while
//! later events merely accumulate into the single pending slot.

use std::sync::{Arc, Weak};

use futures::FutureExt;
use tokio::runtime;
use tokio::sync::watch;

use crate::events::{Bus, Event, Topic};
use crate::handler::{HandlerRef, WarningSink};
use crate::snapshot::NavigationSnapshot;
use crate::source::SourceRef;

/// Live view of the sequencer's two cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flight {
    /// A handler invocation chain is currently executing.
    pub running: bool,
    /// Topic of the collapsed navigation event awaiting dispatch.
    pub pending: Option<Topic>,
}

/// Outcome of one handler invocation.
enum Outcome {
    Continue,
    Halt,
    Failed(String),
}

/// Owns the flight state and drives handler invocation chains.
pub(crate) struct Sequencer {
    me: Weak<Sequencer>,
    source: SourceRef,
    handler: HandlerRef,
    bus: Bus,
    flight: watch::Sender<Flight>,
    runtime: runtime::Handle,
}

impl Sequencer {
    /// Creates the sequencer. Captures the current Tokio runtime handle so
    /// hooks may fire from any thread.
    pub(crate) fn new(source: SourceRef, handler: HandlerRef, bus: Bus) -> Arc<Self> {
        let (flight, _) = watch::channel(Flight::default());
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            source,
            handler,
            bus,
            flight,
            runtime: runtime::Handle::current(),
        })
    }

    /// Read-only view for the public handle.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Flight> {
        self.flight.subscribe()
    }

    /// Triggers the initial run: one invocation with no triggering topic,
    /// reflecting the source's state at install time.
    ///
    /// Skipped if a navigation event won the race between hook
    /// installation and this call; that event's chain already reflects the
    /// newest state.
    pub(crate) fn start_initial(&self) {
        let mut start = false;
        self.flight.send_modify(|f| {
            if !f.running {
                f.running = true;
                start = true;
            }
        });
        if start {
            self.spawn_chain(None);
        }
    }

    /// Navigation-event entry point, called synchronously from the bus.
    ///
    /// Never awaits; either starts a chain or overwrites the pending slot.
    pub(crate) fn on_change(&self, topic: Topic) {
        let mut start = false;
        self.flight.send_modify(|f| {
            if f.running {
                f.pending = Some(topic);
            } else {
                f.running = true;
                start = true;
            }
        });
        if start {
            self.spawn_chain(Some(topic));
        }
    }

    fn spawn_chain(&self, cause: Option<Topic>) {
        let Some(core) = self.me.upgrade() else {
            return;
        };
        self.runtime.spawn(async move {
            core.run_chain(cause).await;
        });
    }

    async fn run_chain(self: Arc<Self>, mut cause: Option<Topic>) {
        loop {
            match self.invoke(cause).await {
                Outcome::Continue => {
                    let mut next = None;
                    self.flight.send_modify(|f| match f.pending.take() {
                        Some(topic) => next = Some(topic),
                        None => f.running = false,
                    });
                    match next {
                        // Stay Active; the collapsed follow-up runs in this
                        // same task.
                        Some(topic) => cause = Some(topic),
                        None => return,
                    }
                }
                Outcome::Halt => {
                    self.bus.emit(Event::new(Topic::Halted));
                    // Pending state is discarded, not carried across a halt.
                    self.reset();
                    return;
                }
                Outcome::Failed(reason) => {
                    // Name which handler failed; observers may watch several
                    // sequences over one bus.
                    let reason = format!("{}: {reason}", self.handler.name());
                    self.bus.emit(Event::new(Topic::Error).with_reason(reason));
                    self.reset();
                    return;
                }
            }
        }
    }

    fn reset(&self) {
        self.flight.send_modify(|f| {
            f.running = false;
            f.pending = None;
        });
    }

    async fn invoke(&self, cause: Option<Topic>) -> Outcome {
        let snapshot = NavigationSnapshot::capture(self.source.as_ref(), cause);
        let warnings = WarningSink::new(self.bus.clone());
        let fut = self.handler.handle(snapshot, warnings);
        match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(true)) => Outcome::Continue,
            Ok(Ok(false)) => Outcome::Halt,
            Ok(Err(err)) => Outcome::Failed(err.to_string()),
            Err(panic) => Outcome::Failed(panic_reason(panic)),
        }
    }
}

fn panic_reason(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {msg}")
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("handler panicked: {msg}")
    } else {
        "handler panicked".to_string()
    }
}
