//! The middleware unit and its helpers.

use eventmaker_core::{ActionRecord, BoxError, Flow, PipelineFn, Value};
use eventmaker_std::cooldown::Cooldowns;
use std::{fmt, sync::Arc, time::Duration};

/// A registered pipeline function.
///
/// Units are only built by [`EventMaker::middleware`](crate::EventMaker::middleware)
/// and have no identity beyond their position in the pipeline.
#[derive(Clone)]
pub struct Middleware {
    function: Arc<dyn PipelineFn>,
}

impl Middleware {
    pub(crate) fn new(function: impl PipelineFn) -> Self {
        Self {
            function: Arc::new(function),
        }
    }

    /// Run the wrapped function.
    pub fn invoke(&self, event: &str, action: &mut ActionRecord) -> Result<Flow, BoxError> {
        self.function.run(event, action)
    }

    /// Rate-limit helper backed by [`Cooldowns::global`].
    ///
    /// Returns `true` while `key` is cooling down. Otherwise starts a cooldown
    /// of `duration` and returns `false`.
    ///
    /// ```rust,ignore
    /// // Allows each event once every 3 seconds.
    /// engine.middleware(|event: &str, _: &mut ActionRecord| {
    ///     !Middleware::cooldown(event, Duration::from_secs(3))
    /// });
    /// ```
    pub fn cooldown(key: &str, duration: Duration) -> bool {
        Cooldowns::global().try_begin(key, duration)
    }

    /// Keep only the payload arguments for which `predicate(value, index)` holds.
    pub fn filter_payload<F>(action: &mut ActionRecord, predicate: F)
    where
        F: FnMut(&Value, usize) -> bool,
    {
        action.filter_payload(predicate);
    }

    /// Replace every payload argument with `transform(value, index)`.
    pub fn map_payload<F>(action: &mut ActionRecord, transform: F)
    where
        F: FnMut(&Value, usize) -> Value,
    {
        action.map_payload(transform);
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}
