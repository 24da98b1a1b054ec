//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(NavigationSnapshot, WarningSink) -> Fut`,
//! producing a fresh future per invocation. This avoids shared mutable
//! state; if invocations need common state, move an `Arc<...>` into the
//! closure explicitly.
//!
//! ## Example
//! ```rust
//! use navflow::{HandlerFn, HandlerRef, NavigationSnapshot, WarningSink};
//!
//! let h: HandlerRef = HandlerFn::arc(|snapshot: NavigationSnapshot, _w: WarningSink| async move {
//!     println!("now at {}", snapshot.resource);
//!     Ok(true)
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::snapshot::NavigationSnapshot;

use super::handler::{Handler, WarningSink};

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per invocation.
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a
    /// [`HandlerRef`](crate::HandlerRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(NavigationSnapshot, WarningSink) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<bool, HandlerError>> + Send + 'static,
{
    async fn handle(
        &self,
        snapshot: NavigationSnapshot,
        warnings: WarningSink,
    ) -> Result<bool, HandlerError> {
        (self.f)(snapshot, warnings).await
    }

    fn name(&self) -> &'static str {
        "handler_fn"
    }
}
