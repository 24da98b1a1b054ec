//! # Handler abstractions.
//!
//! This module provides the callback-side types:
//! - [`Handler`] - trait for the user-supplied navigation callback
//! - [`HandlerFn`] - function-based handler implementation
//! - [`HandlerRef`] - shared reference to a handler (`Arc<dyn Handler>`)
//! - [`WarningSink`] - recoverable-issue reporter bound to the bus

mod handler;
mod handler_fn;

pub use handler::{Handler, HandlerRef, WarningSink};
pub use handler_fn::HandlerFn;
