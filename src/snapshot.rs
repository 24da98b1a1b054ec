//! # Immutable navigation snapshots.
//!
//! A [`NavigationSnapshot`] is a read of the navigation source taken at the
//! moment a handler invocation begins, never at the moment the triggering
//! event fired. When several events collapse into one follow-up run, the
//! snapshot therefore reflects the *latest* navigation, not the one that
//! originally triggered it.

use serde_json::Value;

use crate::events::Topic;
use crate::source::NavigationSource;

/// Immutable view of the navigation source, passed to each handler
/// invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationSnapshot {
    /// Resource path at capture time.
    pub resource: String,
    /// Title at capture time, if any.
    pub title: Option<String>,
    /// State payload at capture time, if any.
    pub state: Option<Value>,
    /// Topic of the navigation event that triggered this invocation;
    /// `None` for the initial run at install time.
    pub cause: Option<Topic>,
}

impl NavigationSnapshot {
    /// Reads the source's current resource/title/state.
    pub(crate) fn capture(source: &dyn NavigationSource, cause: Option<Topic>) -> Self {
        Self {
            resource: source.resource(),
            title: source.title(),
            state: source.state(),
            cause,
        }
    }
}
