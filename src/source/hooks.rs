//! # Mutable navigation hooks.
//!
//! A navigation source exposes four hook slots, one per navigation action
//! plus one for teardown. The interception layer swaps these slots for
//! wrappers that delegate to the original hook and then notify the bus,
//! and restores the originals verbatim at teardown.

use std::sync::Arc;

use serde_json::Value;

/// Arguments forwarded to a navigation hook.
///
/// All fields are optional: a pop traversal carries no arguments, while a
/// push typically carries the new resource, and possibly a title and a
/// state payload.
#[derive(Clone, Debug, Default)]
pub struct NavArgs {
    /// Target resource path, if the action carries one.
    pub resource: Option<String>,
    /// Target title, if the action carries one.
    pub title: Option<String>,
    /// Associated state payload, if the action carries one.
    pub state: Option<Value>,
}

impl NavArgs {
    /// Arguments for an action that carries nothing (pop, teardown).
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Shared navigation hook. Wrappers installed by the interception layer
/// forward to the previous occupant of the slot with identical arguments.
pub type NavHook = Arc<dyn Fn(&NavArgs) + Send + Sync>;

/// Identifies one of the four hook slots on a navigation source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookSlot {
    /// Fired on a push navigation.
    Push,
    /// Fired on a replace navigation.
    Replace,
    /// Fired on a back/forward traversal.
    Pop,
    /// Fired when the source is about to tear down.
    BeforeTeardown,
}

/// Hook slots of a navigation source. Sources keep one of these behind a
/// lock; any slot may be unset.
#[derive(Clone, Default)]
pub struct HookTable {
    pub push: Option<NavHook>,
    pub replace: Option<NavHook>,
    pub pop: Option<NavHook>,
    pub before_teardown: Option<NavHook>,
}

impl HookTable {
    /// Returns the current occupant of a slot.
    pub fn get(&self, slot: HookSlot) -> Option<NavHook> {
        match slot {
            HookSlot::Push => self.push.clone(),
            HookSlot::Replace => self.replace.clone(),
            HookSlot::Pop => self.pop.clone(),
            HookSlot::BeforeTeardown => self.before_teardown.clone(),
        }
    }

    /// Replaces the occupant of a slot; `None` clears it.
    pub fn set(&mut self, slot: HookSlot, hook: Option<NavHook>) {
        match slot {
            HookSlot::Push => self.push = hook,
            HookSlot::Replace => self.replace = hook,
            HookSlot::Pop => self.pop = hook,
            HookSlot::BeforeTeardown => self.before_teardown = hook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_independent() {
        let mut table = HookTable::default();
        let hook: NavHook = Arc::new(|_| {});

        table.set(HookSlot::Push, Some(Arc::clone(&hook)));
        assert!(table.get(HookSlot::Push).is_some());
        assert!(table.get(HookSlot::Replace).is_none());

        table.set(HookSlot::Push, None);
        assert!(table.get(HookSlot::Push).is_none());
    }

    #[test]
    fn test_get_preserves_identity() {
        let mut table = HookTable::default();
        let hook: NavHook = Arc::new(|_| {});
        table.set(HookSlot::Pop, Some(Arc::clone(&hook)));

        let got = table.get(HookSlot::Pop).expect("hook present");
        assert!(Arc::ptr_eq(&got, &hook));
    }
}
