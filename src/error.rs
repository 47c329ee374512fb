//! Error types used by the bus and by handlers.
//!
//! This module defines two error enums:
//!
//! - [`HandlerError`] — errors returned by individual handlers.
//! - [`BusError`] — errors surfaced by [`EventBus::publish`](crate::EventBus::publish).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors returned by a handler.
///
/// A handler returning an error aborts the fan-out it belongs to: subscribers
/// after it are not invoked for that publish.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandlerError {
    /// Handler could not complete its work.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Positional argument missing or of an unexpected type.
    #[error("bad argument #{index}: expected {expected}")]
    BadArgument {
        /// Zero-based argument position.
        index: usize,
        /// Human-readable description of the expected type.
        expected: &'static str,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        HandlerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use vidbus::HandlerError;
    ///
    /// let err = HandlerError::BadArgument { index: 0, expected: "float" };
    /// assert_eq!(err.as_label(), "handler_bad_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
            HandlerError::BadArgument { .. } => "handler_bad_argument",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { error } => format!("error: {error}"),
            HandlerError::BadArgument { index, expected } => {
                format!("argument {index}: expected {expected}")
            }
        }
    }
}

/// # Errors produced by the bus.
///
/// The bus itself never fails; it only forwards the failure of a handler.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BusError {
    /// A handler failed; remaining subscribers of this publish were skipped.
    #[error("handler #{position} for event {event:?} failed: {source}")]
    Handler {
        /// Event name being published.
        event: String,
        /// Position of the failing handler within the fan-out (0-based).
        position: usize,
        /// Error returned by the handler.
        #[source]
        source: HandlerError,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use vidbus::{BusError, HandlerError};
    ///
    /// let err = BusError::Handler {
    ///     event: "vol".into(),
    ///     position: 1,
    ///     source: HandlerError::failed("boom"),
    /// };
    /// assert_eq!(err.as_label(), "bus_handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::Handler { .. } => "bus_handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::Handler {
                event,
                position,
                source,
            } => format!("event={event} position={position} {}", source.as_message()),
        }
    }

    /// Returns the handler error carried by this bus error.
    pub fn handler_error(&self) -> &HandlerError {
        match self {
            BusError::Handler { source, .. } => source,
        }
    }
}
