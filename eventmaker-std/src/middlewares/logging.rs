//! Logging middleware for event observation.

use eventmaker_core::{ActionRecord, BoxError, Flow, PipelineFn};

/// A middleware that logs every emission and lets it through.
///
/// Uses `tracing` when the `tracing` feature is enabled and does nothing
/// otherwise.
///
/// # Example
///
/// ```rust,ignore
/// engine.middleware(LoggingMiddleware::named("chat"));
/// ```
pub struct LoggingMiddleware {
    name: &'static str,
}

impl LoggingMiddleware {
    /// Create a new `LoggingMiddleware` with a default name.
    pub fn new() -> Self {
        Self { name: "event" }
    }

    /// Create a new `LoggingMiddleware` with a custom name.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log lines.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineFn for LoggingMiddleware {
    fn run(&self, event: &str, action: &mut ActionRecord) -> Result<Flow, BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                event,
                args = action.payload.len(),
                "Processing event"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (event, action);
        }

        Ok(Flow::Next)
    }
}
