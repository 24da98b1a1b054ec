//! # Navigation source abstractions.
//!
//! This module provides the source-side types:
//! - [`NavigationSource`] - trait for the injected navigation capability
//! - [`SourceRef`] - shared reference to a source (`Arc<dyn NavigationSource>`)
//! - [`SourceSurface`] - capability probe validated at setup
//! - [`HookSlot`], [`NavHook`], [`NavArgs`], [`HookTable`] - mutable hooks
//! - [`MemorySource`] - in-memory implementation with a back/forward stack

mod hooks;
mod memory;
mod source;

pub use hooks::{HookSlot, HookTable, NavArgs, NavHook};
pub use memory::MemorySource;
pub use source::{NavigationSource, SourceRef, SourceSurface};
