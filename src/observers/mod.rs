//! # Built-in event observers.
//!
//! Observers consume lifecycle events from the [`Bus`](crate::Bus) without
//! taking part in sequencing. Only [`LogObserver`] ships with the crate;
//! anything else registers via [`Bus::on`](crate::Bus::on) or consumes
//! [`Bus::watch`](crate::Bus::watch).

mod log;

pub use log::LogObserver;
