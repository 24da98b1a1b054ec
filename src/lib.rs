//! # navflow
//!
//! **navflow** intercepts navigation mutations (pushes, replacements, and
//! back/forward traversal) on an injected navigation source and funnels
//! them through a single user-supplied async handler, guaranteeing that
//! handler invocations never overlap and that navigation bursts collapse
//! to the most recent event instead of being replayed one by one.
//!
//! ## Architecture
//! ```text
//!  ┌──────────────────────┐      push / replace / pop / teardown
//!  │  NavigationSource    │◄──── (application or browser binding)
//!  │  (injected, hooks)   │
//!  └──────────┬───────────┘
//!             │ wrapped hooks (delegate, then notify; restored at teardown)
//!             ▼
//!  ┌──────────────────────┐   Push/Replace/Pop + StateChange{cause}
//!  │  Interception layer  ├──────────────► Bus ──► observers (sync + watch)
//!  └──────────┬───────────┘                 ▲
//!             │ StateChange (sync)          │ Halted / Error / Warning
//!             ▼                             │
//!  ┌──────────────────────┐                 │
//!  │  Sequencer           ├─────────────────┘
//!  │  running + pending   │
//!  └──────────┬───────────┘
//!             │ one invocation at a time, snapshot at invocation start
//!             ▼
//!  ┌──────────────────────┐
//!  │  Handler             │  Ok(true) continue · Ok(false) halt · Err fail
//!  └──────────────────────┘
//! ```
//!
//! ### Sequencing discipline
//! ```text
//! event arrives:
//!   Idle   ──► start invocation (running = true)
//!   Active ──► overwrite the single pending slot (collapse)
//!
//! invocation resolves:
//!   Ok(true) + pending  ──► consume it, invoke again (still Active)
//!   Ok(true), no pending ──► back to Idle
//!   Ok(false)            ──► emit Halted, drop pending, back to Idle
//!   Err / panic          ──► emit Error, drop pending, back to Idle
//! ```
//!
//! Of N events arriving while Active, only the *last* can reach a
//! follow-up invocation, and its snapshot reflects the source at that
//! follow-up's start. "I only care about where you are now, not every
//! step."
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------------|-------------------------------------------|
//! | **Handler API**   | One async callback receiving immutable snapshots.                 | [`Handler`], [`HandlerFn`], [`HandlerRef`]|
//! | **Sources**       | Injected navigation capability with reversible hooks.             | [`NavigationSource`], [`MemorySource`]    |
//! | **Events**        | Ordered synchronous bus with an async tap.                        | [`Bus`], [`Event`], [`Topic`]             |
//! | **Observability** | Live `running`/`pending` reads, quiescence await.                 | [`SequenceHandle`], [`Flight`]            |
//! | **Errors**        | Typed setup and handler failures.                                 | [`SetupError`], [`HandlerError`]          |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogObserver`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use navflow::{Bus, HandlerFn, MemorySource, NavigationSnapshot, Topic, bind};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = MemorySource::new("/home");
//!     let bus = Bus::new(64);
//!
//!     let handler = HandlerFn::arc(|snapshot: NavigationSnapshot, _warnings| async move {
//!         println!("now at {} (cause: {:?})", snapshot.resource, snapshot.cause);
//!         Ok(true)
//!     });
//!
//!     let handle = bind(source.clone())?.start(handler, &bus);
//!     handle.settled().await; // initial run, cause None
//!
//!     source.push("/settings", Some("Settings".into()), None);
//!     handle.settled().await; // cause Some(Topic::Push)
//!     assert_eq!(handle.pending(), None);
//!
//!     source.teardown(); // restores original hooks, detaches everything
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod handler;
mod snapshot;
mod source;

// ---- Public re-exports ----

pub use crate::core::{Binding, Flight, SequenceHandle, bind};
pub use error::{HandlerError, SetupError};
pub use events::{Bus, Event, SubscriptionId, Topic, TopicHandler};
pub use handler::{Handler, HandlerFn, HandlerRef, WarningSink};
pub use snapshot::NavigationSnapshot;
pub use source::{
    HookSlot, HookTable, MemorySource, NavArgs, NavHook, NavigationSource, SourceRef,
    SourceSurface,
};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod observers;
#[cfg(feature = "logging")]
pub use observers::LogObserver;
