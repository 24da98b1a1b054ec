//! # Simple logging observer for debugging and demos.
//!
//! [`LogObserver`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [push]
//! [state_change] cause=push
//! [warning] reason="navigated without a title"
//! [error] reason="handler failed: Nope"
//! [halted]
//! [before_teardown]
//! ```

use crate::events::{Bus, Event, SubscriptionId, Topic};

/// Simple stdout logging observer.
///
/// Enabled via the `logging` feature. Prints one line per event for
/// debugging and demonstration purposes.
///
/// Not intended for production use - register custom handlers via
/// [`Bus::on`] or consume [`Bus::watch`] for structured logging or
/// metrics collection.
pub struct LogObserver;

impl LogObserver {
    /// Subscribes the observer to every topic on the bus.
    ///
    /// Returns the subscription ids so callers can detach it again.
    pub fn attach(bus: &Bus) -> Vec<SubscriptionId> {
        Topic::ALL
            .iter()
            .map(|&topic| bus.on(topic, Self::print))
            .collect()
    }

    fn print(ev: &Event) {
        match (&ev.cause, &ev.reason) {
            (Some(cause), _) => println!("[{}] cause={cause}", ev.topic),
            (None, Some(reason)) => println!("[{}] reason={reason:?}", ev.topic),
            (None, None) => println!("[{}]", ev.topic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_covers_every_topic() {
        let bus = Bus::new(8);
        let ids = LogObserver::attach(&bus);
        assert_eq!(ids.len(), Topic::ALL.len());
        assert_eq!(bus.subscription_count(), Topic::ALL.len());

        for id in ids {
            assert!(bus.off(id));
        }
        assert_eq!(bus.subscription_count(), 0);
    }
}
