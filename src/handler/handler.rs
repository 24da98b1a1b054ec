//! # Core handler trait
//!
//! [`Handler`] is the single user-supplied callback every navigation
//! mutation is funneled through. The sequencer guarantees invocations
//! never overlap and that bursts collapse to the most recent event.
//!
//! ## Contract
//! - Return `Ok(true)` to keep accepting navigation events.
//! - Return `Ok(false)` to halt: sequencing pauses (reported via
//!   [`Topic::Halted`]) until a fresh navigation event arrives.
//! - Return `Err(_)` (or panic) to report a failure: a [`Topic::Error`]
//!   event fires once and the sequencer recovers to idle.
//! - Call [`WarningSink::report`] for soft issues that should not stop the
//!   sequence.
//!
//! [`Topic::Halted`]: crate::Topic::Halted
//! [`Topic::Error`]: crate::Topic::Error

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{Bus, Event, Topic};
use crate::snapshot::NavigationSnapshot;

/// Reports recoverable issues from inside a handler invocation.
///
/// Each report emits a [`Topic::Warning`](crate::Topic::Warning) event
/// carrying the message; sequencing continues unaffected.
#[derive(Clone, Debug)]
pub struct WarningSink {
    bus: Bus,
}

impl WarningSink {
    pub(crate) fn new(bus: Bus) -> Self {
        Self { bus }
    }

    /// Emits a `Warning` event with the given error as its reason.
    pub fn report(&self, error: impl std::fmt::Display) {
        self.bus
            .emit(Event::new(Topic::Warning).with_reason(error.to_string()));
    }
}

/// # Asynchronous navigation handler.
///
/// Receives an immutable [`NavigationSnapshot`] captured at the moment the
/// invocation begins (not when the triggering event fired), so a collapsed
/// run reflects the latest navigation.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use navflow::{Handler, HandlerError, NavigationSnapshot, WarningSink};
///
/// struct Router;
///
/// #[async_trait]
/// impl Handler for Router {
///     async fn handle(
///         &self,
///         snapshot: NavigationSnapshot,
///         warnings: WarningSink,
///     ) -> Result<bool, HandlerError> {
///         if snapshot.title.is_none() {
///             warnings.report("navigated without a title");
///         }
///         // route to snapshot.resource...
///         Ok(true)
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Processes one navigation snapshot.
    ///
    /// `Ok(true)` continues the sequence, `Ok(false)` halts it, `Err(_)`
    /// reports a failure. See the module docs for the full contract.
    async fn handle(
        &self,
        snapshot: NavigationSnapshot,
        warnings: WarningSink,
    ) -> Result<bool, HandlerError>;

    /// Human-readable name; prefixes the reason of [`Topic::Error`] events
    /// reported for this handler's failures.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a handler.
pub type HandlerRef = Arc<dyn Handler>;
