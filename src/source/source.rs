//! # Navigation source capability.
//!
//! [`NavigationSource`] is the injected surface the whole system runs
//! against: current resource/title/state inspection plus four mutable hook
//! slots. It is always passed explicitly — never looked up ambiently — so
//! multiple independent instances can coexist (in tests and otherwise)
//! without cross-talk.

use std::sync::Arc;

use serde_json::Value;

use super::hooks::{HookSlot, NavHook};

/// What a navigation source can be inspected for.
///
/// A source missing any part of the surface cannot be bound; setup fails
/// with [`SetupError::MissingSurface`](crate::SetupError::MissingSurface)
/// before any interception occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceSurface {
    /// The source exposes a current resource path.
    pub location: bool,
    /// The source exposes a current title.
    pub document: bool,
    /// The source exposes history-like navigation hooks.
    pub history: bool,
}

impl SourceSurface {
    /// A surface with every capability present.
    pub fn complete() -> Self {
        Self {
            location: true,
            document: true,
            history: true,
        }
    }

    /// Returns the name of the first missing capability, if any.
    pub fn missing(&self) -> Option<&'static str> {
        if !self.location {
            Some("location")
        } else if !self.document {
            Some("document")
        } else if !self.history {
            Some("history")
        } else {
            None
        }
    }
}

impl Default for SourceSurface {
    fn default() -> Self {
        Self::complete()
    }
}

/// # Injected navigation capability.
///
/// Exposes the current navigation state and the mutable hook slots the
/// interception layer wraps. Implementations fire the occupant of the
/// matching slot whenever a navigation action happens.
///
/// See [`MemorySource`](crate::MemorySource) for a complete in-memory
/// implementation.
pub trait NavigationSource: Send + Sync + 'static {
    /// Reports which parts of the inspectable surface exist.
    fn surface(&self) -> SourceSurface {
        SourceSurface::complete()
    }

    /// Current resource path.
    fn resource(&self) -> String;

    /// Current title, if any.
    fn title(&self) -> Option<String>;

    /// Current state payload, if any.
    fn state(&self) -> Option<Value>;

    /// Current occupant of a hook slot.
    fn hook(&self, slot: HookSlot) -> Option<NavHook>;

    /// Replaces the occupant of a hook slot; `None` clears it.
    fn set_hook(&self, slot: HookSlot, hook: Option<NavHook>);
}

/// Shared handle to a navigation source.
pub type SourceRef = Arc<dyn NavigationSource>;
