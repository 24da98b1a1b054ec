//! # In-memory navigation source.
//!
//! [`MemorySource`] is a complete [`NavigationSource`] backed by an entry
//! stack, usable wherever a real browser surface is unavailable: crate
//! tests, server-side embedding, simulations.
//!
//! ## Traversal model
//! ```text
//!   back stack        current        forward stack
//!   [/a, /b]    ◄──    /c      ──►   [/d]
//!
//!   push(/e)  : back += /c, current = /e, forward cleared
//!   replace(/e): current = /e, stacks untouched
//!   back()    : forward += /c, current = /b        → fires Pop hook
//!   forward() : back += current, current = popped  → fires Pop hook
//! ```
//!
//! Both traversal directions fire the [`HookSlot::Pop`] hook, matching
//! browser history semantics where back and forward are the same kind of
//! traversal.
//!
//! ## Example
//! ```rust
//! use navflow::MemorySource;
//!
//! let source = MemorySource::new("/a");
//! source.push("/b", Some("B".into()), None);
//! assert_eq!(source.resource_now(), "/b");
//! assert!(source.back());
//! assert_eq!(source.resource_now(), "/a");
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use super::hooks::{HookSlot, HookTable, NavArgs, NavHook};
use super::source::{NavigationSource, SourceSurface};

#[derive(Clone, Debug, Default)]
struct EntryRecord {
    resource: String,
    title: Option<String>,
    state: Option<Value>,
}

#[derive(Default)]
struct Entries {
    back: Vec<EntryRecord>,
    current: EntryRecord,
    forward: Vec<EntryRecord>,
}

/// In-memory navigation source with a back/forward entry stack.
pub struct MemorySource {
    entries: Mutex<Entries>,
    hooks: Mutex<HookTable>,
    surface: SourceSurface,
}

impl MemorySource {
    /// Creates a source positioned at `resource`, with a complete surface.
    pub fn new(resource: impl Into<String>) -> Arc<Self> {
        Self::with_surface(resource, SourceSurface::complete())
    }

    /// Creates a source reporting the given surface. Useful for exercising
    /// setup validation.
    pub fn with_surface(resource: impl Into<String>, surface: SourceSurface) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Entries {
                back: Vec::new(),
                current: EntryRecord {
                    resource: resource.into(),
                    title: None,
                    state: None,
                },
                forward: Vec::new(),
            }),
            hooks: Mutex::new(HookTable::default()),
            surface,
        })
    }

    /// Pushes a new entry: the current one moves to the back stack and the
    /// forward stack is cleared. Fires the `Push` hook.
    pub fn push(&self, resource: impl Into<String>, title: Option<String>, state: Option<Value>) {
        let entry = EntryRecord {
            resource: resource.into(),
            title,
            state,
        };
        let args = NavArgs {
            resource: Some(entry.resource.clone()),
            title: entry.title.clone(),
            state: entry.state.clone(),
        };
        {
            let mut entries = self.lock_entries();
            let previous = std::mem::replace(&mut entries.current, entry);
            entries.back.push(previous);
            entries.forward.clear();
        }
        self.fire(HookSlot::Push, &args);
    }

    /// Replaces the current entry in place. Fires the `Replace` hook.
    pub fn replace(&self, resource: impl Into<String>, title: Option<String>, state: Option<Value>) {
        let entry = EntryRecord {
            resource: resource.into(),
            title,
            state,
        };
        let args = NavArgs {
            resource: Some(entry.resource.clone()),
            title: entry.title.clone(),
            state: entry.state.clone(),
        };
        {
            let mut entries = self.lock_entries();
            entries.current = entry;
        }
        self.fire(HookSlot::Replace, &args);
    }

    /// Traverses one entry back. Fires the `Pop` hook and returns `true`
    /// if there was somewhere to go.
    pub fn back(&self) -> bool {
        let moved = {
            let mut entries = self.lock_entries();
            match entries.back.pop() {
                Some(previous) => {
                    let displaced = std::mem::replace(&mut entries.current, previous);
                    entries.forward.push(displaced);
                    true
                }
                None => false,
            }
        };
        if moved {
            self.fire(HookSlot::Pop, &NavArgs::empty());
        }
        moved
    }

    /// Traverses one entry forward. Fires the `Pop` hook and returns
    /// `true` if there was somewhere to go.
    pub fn forward(&self) -> bool {
        let moved = {
            let mut entries = self.lock_entries();
            match entries.forward.pop() {
                Some(next) => {
                    let displaced = std::mem::replace(&mut entries.current, next);
                    entries.back.push(displaced);
                    true
                }
                None => false,
            }
        };
        if moved {
            self.fire(HookSlot::Pop, &NavArgs::empty());
        }
        moved
    }

    /// Fires the `BeforeTeardown` hook.
    pub fn teardown(&self) {
        self.fire(HookSlot::BeforeTeardown, &NavArgs::empty());
    }

    /// Current resource path, without going through the trait object.
    pub fn resource_now(&self) -> String {
        self.lock_entries().current.resource.clone()
    }

    fn fire(&self, slot: HookSlot, args: &NavArgs) {
        // Clone the hook out of the lock: the occupant may replace hooks
        // while running (the teardown wrapper restores originals).
        let hook = self.lock_hooks().get(slot);
        if let Some(hook) = hook {
            hook(args);
        }
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_hooks(&self) -> std::sync::MutexGuard<'_, HookTable> {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NavigationSource for MemorySource {
    fn surface(&self) -> SourceSurface {
        self.surface
    }

    fn resource(&self) -> String {
        self.lock_entries().current.resource.clone()
    }

    fn title(&self) -> Option<String> {
        self.lock_entries().current.title.clone()
    }

    fn state(&self) -> Option<Value> {
        self.lock_entries().current.state.clone()
    }

    fn hook(&self, slot: HookSlot) -> Option<NavHook> {
        self.lock_hooks().get(slot)
    }

    fn set_hook(&self, slot: HookSlot, hook: Option<NavHook>) {
        self.lock_hooks().set(slot, hook);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_advances_and_clears_forward() {
        let source = MemorySource::new("/a");
        source.push("/b", None, None);
        source.push("/c", None, None);
        assert!(source.back());
        assert_eq!(source.resource_now(), "/b");

        // A push from the middle of the stack drops the forward entries.
        source.push("/d", None, None);
        assert!(!source.forward());
        assert_eq!(source.resource_now(), "/d");
    }

    #[test]
    fn test_replace_keeps_stacks() {
        let source = MemorySource::new("/a");
        source.push("/b", None, None);
        source.replace("/b2", Some("B2".into()), Some(json!({"n": 2})));

        assert_eq!(source.resource(), "/b2");
        assert_eq!(source.title().as_deref(), Some("B2"));
        assert_eq!(source.state(), Some(json!({"n": 2})));

        assert!(source.back());
        assert_eq!(source.resource_now(), "/a");
        assert!(source.forward());
        assert_eq!(source.resource_now(), "/b2");
    }

    #[test]
    fn test_traversal_at_the_edges() {
        let source = MemorySource::new("/a");
        assert!(!source.back());
        assert!(!source.forward());
        assert_eq!(source.resource_now(), "/a");
    }

    #[test]
    fn test_hooks_fire_with_arguments() {
        let source = MemorySource::new("/a");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        source.set_hook(
            HookSlot::Push,
            Some(Arc::new(move |args: &NavArgs| {
                s.lock().unwrap().push(args.resource.clone());
            })),
        );

        source.push("/b", None, None);
        source.replace("/c", None, None); // no Replace hook set
        assert_eq!(*seen.lock().unwrap(), vec![Some("/b".to_string())]);
    }

    #[test]
    fn test_both_traversals_fire_pop() {
        let source = MemorySource::new("/a");
        let pops = Arc::new(Mutex::new(0u32));

        let p = Arc::clone(&pops);
        source.set_hook(
            HookSlot::Pop,
            Some(Arc::new(move |_| *p.lock().unwrap() += 1)),
        );

        source.push("/b", None, None);
        source.back();
        source.forward();
        assert_eq!(*pops.lock().unwrap(), 2);
    }
}
