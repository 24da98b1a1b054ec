//! # Lifecycle events emitted by the interception layer and the sequencer.
//!
//! The [`Topic`] enum classifies events across three categories:
//! - **Navigation events**: a hook on the source fired (push, replace, pop),
//!   always followed by a generic [`Topic::StateChange`] carrying the
//!   specific topic as its `cause`.
//! - **Sequencer outcomes**: the handler halted ([`Topic::Halted`]), failed
//!   ([`Topic::Error`]) or reported a soft issue ([`Topic::Warning`]).
//! - **Teardown**: interception is about to be reversed
//!   ([`Topic::BeforeTeardown`]).
//!
//! The [`Event`] struct carries additional metadata: a timestamp, the
//! triggering topic for state changes, and a reason string for errors and
//! warnings.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! observed out of band.
//!
//! ## Example
//! ```rust
//! use navflow::{Event, Topic};
//!
//! let ev = Event::new(Topic::StateChange).with_cause(Topic::Push);
//!
//! assert_eq!(ev.topic, Topic::StateChange);
//! assert_eq!(ev.cause, Some(Topic::Push));
//! assert_eq!(ev.topic.as_label(), "state_change");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The handler resolved `false`; sequencing pauses until the next
    /// fresh navigation event.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Halted,

    /// The handler failed or panicked during an invocation.
    ///
    /// Sets:
    /// - `reason`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Error,

    /// The handler reported a recoverable issue via
    /// [`WarningSink`](crate::WarningSink); sequencing continues.
    ///
    /// Sets:
    /// - `reason`: the reported message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Warning,

    /// The navigation source is tearing down; original hooks are about to
    /// be restored.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    BeforeTeardown,

    /// A back/forward traversal fired on the source.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Pop,

    /// A replace navigation fired on the source.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Replace,

    /// A push navigation fired on the source.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Push,

    /// Generic state-change notification, emitted right after each specific
    /// navigation topic.
    ///
    /// Sets:
    /// - `cause`: the specific topic that triggered it
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StateChange,
}

impl Topic {
    /// Every topic, in declaration order. Handy for observers that want to
    /// subscribe across the board.
    pub const ALL: [Topic; 8] = [
        Topic::Halted,
        Topic::Error,
        Topic::Warning,
        Topic::BeforeTeardown,
        Topic::Pop,
        Topic::Replace,
        Topic::Push,
        Topic::StateChange,
    ];

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Topic::Halted => "halted",
            Topic::Error => "error",
            Topic::Warning => "warning",
            Topic::BeforeTeardown => "before_teardown",
            Topic::Pop => "pop",
            Topic::Replace => "replace",
            Topic::Push => "push",
            Topic::StateChange => "state_change",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`Topic`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub topic: Topic,
    /// The specific navigation topic behind a [`Topic::StateChange`].
    pub cause: Option<Topic>,
    /// Human-readable reason (handler failures, warnings).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given topic with current timestamp and
    /// next sequence number.
    pub fn new(topic: Topic) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            topic,
            cause: None,
            reason: None,
        }
    }

    /// Attaches the specific topic that triggered this event.
    #[inline]
    pub fn with_cause(mut self, cause: Topic) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(Topic::Push);
        let b = Event::new(Topic::Pop);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::new(Topic::Error).with_reason("boom");
        assert_eq!(ev.topic, Topic::Error);
        assert_eq!(ev.reason.as_deref(), Some("boom"));
        assert_eq!(ev.cause, None);

        let ev = Event::new(Topic::StateChange).with_cause(Topic::Replace);
        assert_eq!(ev.cause, Some(Topic::Replace));
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(Topic::BeforeTeardown.as_label(), "before_teardown");
        assert_eq!(Topic::StateChange.to_string(), "state_change");
        assert_eq!(Topic::ALL.len(), 8);
    }
}
