//! Error types used by the navflow runtime and handlers.
//!
//! This module defines two main error enums:
//!
//! - [`SetupError`] — errors raised while binding to a navigation source.
//! - [`HandlerError`] — errors raised by a navigation handler invocation.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use thiserror::Error;

/// # Errors raised during setup.
///
/// These represent configuration failures detected synchronously before any
/// interception takes place; nothing is partially installed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SetupError {
    /// The navigation source does not expose the minimal inspectable
    /// surface (location, document, history).
    #[error("navigation source is missing required surface: {missing}")]
    MissingSurface {
        /// Name of the first missing capability.
        missing: &'static str,
    },
}

impl SetupError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use navflow::SetupError;
    ///
    /// let err = SetupError::MissingSurface { missing: "document" };
    /// assert_eq!(err.as_label(), "setup_missing_surface");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SetupError::MissingSurface { .. } => "setup_missing_surface",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SetupError::MissingSurface { missing } => {
                format!("source lacks required surface: {missing}")
            }
        }
    }
}

/// # Errors produced by handler invocations.
///
/// Returned (or mapped from a panic) when a handler cannot process a
/// snapshot. Reported once via a [`Topic::Error`](crate::Topic::Error)
/// event; the sequencer recovers to idle and the next distinct navigation
/// event is processed normally.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler execution failed for this invocation.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl HandlerError {
    /// Creates a [`HandlerError::Failed`] from any displayable error.
    ///
    /// # Example
    /// ```
    /// use navflow::HandlerError;
    ///
    /// let err = HandlerError::failed("Nope");
    /// assert!(err.to_string().contains("Nope"));
    /// ```
    pub fn failed(error: impl std::fmt::Display) -> Self {
        HandlerError::Failed {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { error } => format!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_display() {
        let err = SetupError::MissingSurface { missing: "history" };
        assert!(err.to_string().contains("history"));
        assert_eq!(err.as_label(), "setup_missing_surface");
    }

    #[test]
    fn test_handler_error_helpers() {
        let err = HandlerError::failed("boom");
        assert_eq!(err.as_label(), "handler_failed");
        assert_eq!(err.as_message(), "error: boom");
    }
}
