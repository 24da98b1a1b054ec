//! # Public handle over the sequencer's flight state.
//!
//! [`SequenceHandle`] exposes the `running` and `pending` cells as live
//! read accessors (each read reflects the state at read time, not a
//! snapshot), plus [`SequenceHandle::settled`] for awaiting quiescence.
//!
//! The handle is only a view: dropping it does not stop the sequencer,
//! which lives until the navigation source tears down.

use std::fmt;

use tokio::sync::watch;

use crate::events::Topic;

use super::sequencer::Flight;

/// Read-only view of a running sequence.
#[derive(Clone)]
pub struct SequenceHandle {
    flight: watch::Receiver<Flight>,
}

impl SequenceHandle {
    pub(crate) fn new(flight: watch::Receiver<Flight>) -> Self {
        Self { flight }
    }

    /// Whether a handler invocation chain is currently executing.
    pub fn is_running(&self) -> bool {
        self.flight.borrow().running
    }

    /// Topic of the collapsed navigation event awaiting dispatch, if any.
    pub fn pending(&self) -> Option<Topic> {
        self.flight.borrow().pending
    }

    /// Both cells at once.
    pub fn flight(&self) -> Flight {
        self.flight.borrow().clone()
    }

    /// Resolves once the current invocation chain, including any collapsed
    /// follow-up, has drained and nothing is pending.
    ///
    /// Resolves immediately when the sequence is already idle, and treats a
    /// dropped sequencer (torn down with no chain in flight) as settled.
    pub async fn settled(&self) {
        let mut flight = self.flight.clone();
        let _ = flight
            .wait_for(|f| !f.running && f.pending.is_none())
            .await;
    }
}

impl fmt::Debug for SequenceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceHandle")
            .field("flight", &self.flight())
            .finish()
    }
}
