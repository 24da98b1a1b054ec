//! # Reversible interception of navigation hooks.
//!
//! Wraps the source's push/replace/pop/teardown hooks with delegates that
//! notify the bus, and restores the captured originals verbatim when the
//! teardown hook fires. An explicit decorator-with-undo: nothing mutates
//! ambient state, and the saved record is taken exactly once so teardown
//! is idempotent.
//!
//! ## Wiring
//! ```text
//! install:
//!   capture originals ──► wrap Push/Replace/Pop   (delegate, emit topic,
//!   capture teardown  ──► wrap BeforeTeardown      emit StateChange+cause)
//!   subscribe on_change to StateChange            (final step)
//!
//! wrapped teardown fires:
//!   forward to original teardown
//!   emit BeforeTeardown
//!   unsubscribe on_change from StateChange
//!   restore all captured hooks verbatim
//! ```
//!
//! After teardown, navigations on the source are invisible to this system:
//! no wrapped closure is left behind and nothing emits into the bus.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::events::{Bus, Event, SubscriptionId, Topic};
use crate::source::{HookSlot, NavArgs, NavHook, NavigationSource, SourceRef};

/// Original hooks captured at install time, plus the change subscription.
struct SavedHooks {
    push: Option<NavHook>,
    replace: Option<NavHook>,
    pop: Option<NavHook>,
    before_teardown: Option<NavHook>,
    subscription: SubscriptionId,
}

/// Installs the interception wrappers and subscribes `on_change` to
/// [`Topic::StateChange`] as the final step.
///
/// Returns the change subscription id (mostly useful to tests).
pub(crate) fn install(
    source: &SourceRef,
    bus: &Bus,
    on_change: impl Fn(Topic) + Send + Sync + 'static,
) -> SubscriptionId {
    let saved = Arc::new(Mutex::new(None::<SavedHooks>));

    let push = source.hook(HookSlot::Push);
    let replace = source.hook(HookSlot::Replace);
    let pop = source.hook(HookSlot::Pop);
    let before_teardown = source.hook(HookSlot::BeforeTeardown);

    source.set_hook(HookSlot::Push, Some(wrap_nav(bus, push.clone(), Topic::Push)));
    source.set_hook(
        HookSlot::Replace,
        Some(wrap_nav(bus, replace.clone(), Topic::Replace)),
    );
    source.set_hook(HookSlot::Pop, Some(wrap_nav(bus, pop.clone(), Topic::Pop)));
    source.set_hook(
        HookSlot::BeforeTeardown,
        Some(wrap_teardown(
            source,
            bus,
            before_teardown.clone(),
            Arc::clone(&saved),
        )),
    );

    let subscription = bus.on(Topic::StateChange, move |ev| {
        if let Some(topic) = ev.cause {
            on_change(topic);
        }
    });

    *saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(SavedHooks {
        push,
        replace,
        pop,
        before_teardown,
        subscription,
    });
    subscription
}

/// Wraps one navigation hook: forward to the original with identical
/// arguments, emit the specific topic, then the generic state change.
fn wrap_nav(bus: &Bus, original: Option<NavHook>, topic: Topic) -> NavHook {
    let bus = bus.clone();
    Arc::new(move |args: &NavArgs| {
        if let Some(original) = &original {
            original(args);
        }
        bus.emit(Event::new(topic));
        bus.emit(Event::new(Topic::StateChange).with_cause(topic));
    })
}

/// Wraps the teardown hook: forward, announce, unsubscribe, restore.
fn wrap_teardown(
    source: &SourceRef,
    bus: &Bus,
    original: Option<NavHook>,
    saved: Arc<Mutex<Option<SavedHooks>>>,
) -> NavHook {
    // Weak back-reference: the hook sits inside the source's own table and
    // must not keep the source alive.
    let source: Weak<dyn NavigationSource> = Arc::downgrade(source);
    let bus = bus.clone();
    Arc::new(move |args: &NavArgs| {
        if let Some(original) = &original {
            original(args);
        }
        let Some(record) = saved.lock().unwrap_or_else(PoisonError::into_inner).take() else {
            // Already torn down.
            return;
        };
        bus.emit(Event::new(Topic::BeforeTeardown));
        bus.off(record.subscription);
        if let Some(source) = source.upgrade() {
            source.set_hook(HookSlot::Push, record.push);
            source.set_hook(HookSlot::Replace, record.replace);
            source.set_hook(HookSlot::Pop, record.pop);
            source.set_hook(HookSlot::BeforeTeardown, record.before_teardown);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use std::sync::Mutex;

    fn collect_topics(bus: &Bus) -> Arc<Mutex<Vec<(Topic, Option<Topic>)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        for topic in Topic::ALL {
            let s = Arc::clone(&seen);
            bus.on(topic, move |ev| s.lock().unwrap().push((ev.topic, ev.cause)));
        }
        seen
    }

    #[test]
    fn test_wrapped_hook_forwards_then_emits() {
        let memory = MemorySource::new("/a");
        let forwarded = Arc::new(Mutex::new(Vec::new()));
        let f = Arc::clone(&forwarded);
        memory.set_hook(
            HookSlot::Push,
            Some(Arc::new(move |args: &NavArgs| {
                f.lock().unwrap().push(args.resource.clone());
            })),
        );

        let bus = Bus::new(16);
        let seen = collect_topics(&bus);
        let source: SourceRef = memory.clone();
        install(&source, &bus, |_| {});

        memory.push("/b", None, None);

        assert_eq!(*forwarded.lock().unwrap(), vec![Some("/b".to_string())]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Topic::Push, None),
                (Topic::StateChange, Some(Topic::Push)),
            ]
        );
    }

    #[test]
    fn test_teardown_restores_and_unsubscribes() {
        let memory = MemorySource::new("/a");
        let prior: NavHook = Arc::new(|_| {});
        memory.set_hook(HookSlot::Push, Some(Arc::clone(&prior)));

        let bus = Bus::new(16);
        let changes = Arc::new(Mutex::new(0u32));
        let c = Arc::clone(&changes);
        let source: SourceRef = memory.clone();
        install(&source, &bus, move |_| *c.lock().unwrap() += 1);

        memory.push("/b", None, None);
        assert_eq!(*changes.lock().unwrap(), 1);

        memory.teardown();

        // Originals back in place, by identity.
        let restored = memory.hook(HookSlot::Push).expect("prior hook");
        assert!(Arc::ptr_eq(&restored, &prior));
        assert!(memory.hook(HookSlot::BeforeTeardown).is_none());

        // Subsequent navigations are invisible.
        memory.push("/c", None, None);
        assert_eq!(*changes.lock().unwrap(), 1);

        // Teardown is idempotent.
        memory.teardown();
    }
}
