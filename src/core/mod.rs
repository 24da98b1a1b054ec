//! Serialization core: interception, sequencing, and the public handle.
//!
//! The entry point is [`bind`], which validates the source surface and
//! returns a [`Binding`]; [`Binding::start`] installs interception, kicks
//! off the initial run, and hands back a [`SequenceHandle`].
//!
//! Internal modules:
//! - [`interceptor`]: reversible hook wrapping, restore on teardown;
//! - [`sequencer`]: the single-flight collapsing state machine;
//! - [`handle`]: read-only flight-state view.

mod handle;
mod interceptor;
mod sequencer;

use std::fmt;
use std::sync::Arc;

use crate::error::SetupError;
use crate::events::Bus;
use crate::handler::HandlerRef;
use crate::source::SourceRef;

pub use handle::SequenceHandle;
pub use sequencer::Flight;

use sequencer::Sequencer;

/// Validates the navigation source's surface and returns a [`Binding`].
///
/// Fails synchronously with [`SetupError::MissingSurface`] if the source
/// lacks location, document, or history inspection; nothing is installed
/// in that case.
///
/// # Example
/// ```
/// use navflow::{MemorySource, SourceSurface, bind};
///
/// let incomplete = MemorySource::with_surface(
///     "/a",
///     SourceSurface { location: true, document: false, history: true },
/// );
/// assert!(bind(incomplete).is_err());
///
/// let complete = MemorySource::new("/a");
/// assert!(bind(complete).is_ok());
/// ```
pub fn bind(source: SourceRef) -> Result<Binding, SetupError> {
    if let Some(missing) = source.surface().missing() {
        return Err(SetupError::MissingSurface { missing });
    }
    Ok(Binding { source })
}

/// A validated navigation source, ready to start sequences on.
///
/// The bus-side surface requirement is enforced by the type system: only a
/// [`Bus`] can be passed to [`Binding::start`].
pub struct Binding {
    source: SourceRef,
}

impl Binding {
    /// Installs interception on the source, triggers the initial run (one
    /// invocation with no triggering topic), and returns the handle.
    ///
    /// Must be called within a Tokio runtime; the runtime handle is
    /// captured so navigation hooks may fire from any thread.
    ///
    /// The sequencer stays alive through the bus subscription until the
    /// source's teardown hook fires; the returned handle is only a view.
    pub fn start(&self, handler: HandlerRef, bus: &Bus) -> SequenceHandle {
        let core = Sequencer::new(Arc::clone(&self.source), handler, bus.clone());
        let listener = Arc::clone(&core);
        interceptor::install(&self.source, bus, move |topic| listener.on_change(topic));
        core.start_initial();
        SequenceHandle::new(core.subscribe())
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").finish_non_exhaustive()
    }
}
