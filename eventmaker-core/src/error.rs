//! Error types for EventMaker.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`EmitError`] - Errors surfaced by a single emission
//! - [`HandlerError`] - A ready-made error for handlers and pipeline functions

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort an emission.
///
/// Neither listener nor middleware failures are swallowed: the first one stops
/// the emission and is returned to the caller of `emit`.
#[derive(Error, Debug)]
pub enum EmitError {
    /// A listener returned an error. Listeners after it did not run.
    #[error("listener {listener} failed while handling \"{event}\"")]
    Listener {
        /// The emitted event name.
        event: String,
        /// Debug description of the failing listener.
        listener: String,
        /// The error returned by the handler.
        #[source]
        source: BoxError,
    },

    /// A pipeline function returned an error. No listener ran.
    #[error("middleware failed while handling \"{event}\"")]
    Middleware {
        /// The emitted event name.
        event: String,
        /// The error returned by the pipeline function.
        #[source]
        source: BoxError,
    },
}

impl EmitError {
    /// The event name of the failed emission.
    pub fn event(&self) -> &str {
        match self {
            EmitError::Listener { event, .. } | EmitError::Middleware { event, .. } => event,
        }
    }
}

/// Errors raised by handlers and pipeline functions.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// A plain message.
    #[error("{0}")]
    Message(String),

    /// A custom error.
    #[error(transparent)]
    Custom(BoxError),
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::Message(message.to_owned())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::Message(message)
    }
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        HandlerError::Custom(err)
    }
}
