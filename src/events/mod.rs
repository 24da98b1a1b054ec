//! Lifecycle events: types and the delivery bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! report what the interception layer and the sequencer are doing.
//!
//! ## Contents
//! - [`Topic`], [`Event`] event classification and payload metadata
//! - [`Bus`] ordered synchronous emitter with a `tokio::sync::broadcast` tap
//!
//! ## Quick reference
//! - **Publishers**: wrapped navigation hooks (`Push`/`Replace`/`Pop` +
//!   `StateChange`), the sequencer (`Halted`/`Error`), [`WarningSink`]
//!   (`Warning`), and the teardown wrapper (`BeforeTeardown`).
//! - **Consumers**: the sequencer's change listener (synchronous, via
//!   [`Bus::on`]) and any external observers (via [`Bus::watch`]).
//!
//! [`WarningSink`]: crate::WarningSink

mod bus;
mod event;

pub use bus::{Bus, SubscriptionId, TopicHandler};
pub use event::{Event, Topic};
