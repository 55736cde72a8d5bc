//! # Pipeline Functions (Middleware Kernel)
//!
//! Pipeline functions run for every emission, in registration order, before
//! any listener. Each one sees the event name and the per-emission
//! [`ActionRecord`] and decides whether dispatch continues ([`Flow::Next`])
//! or is aborted ([`Flow::Stop`]).
//!
//! # Use Cases
//!
//! - Observing events (logging)
//! - Rate limiting (cooldowns)
//! - Rewriting the payload before listeners see it

use crate::{action::ActionRecord, error::BoxError};

/// Whether an emission continues past a pipeline function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// No objection; run the next pipeline function, then the listeners.
    #[default]
    Next,
    /// Abort the emission; no listener runs.
    Stop,
}

/// Conversion of a pipeline function's return value into a [`Flow`].
///
/// # Default Implementations
///
/// - `()` → `Next` (no opinion)
/// - `bool` → `false` = `Stop`, `true` = `Next`
/// - `Flow` → As is
/// - `Option<T>` → `None` = `Next`, otherwise delegates
/// - `Result<T, E>` → Delegates to inner `T` or propagates error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be turned into a `Flow`",
    label = "missing `IntoFlow` implementation",
    note = "Return `()`, `bool`, `Flow`, `Option<_>` or `Result<_, _>` from pipeline functions."
)]
pub trait IntoFlow {
    /// Convert the output into a flow decision and optional error.
    fn into_flow(self) -> Result<Flow, BoxError>;
}

impl IntoFlow for () {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(Flow::Next)
    }
}

impl IntoFlow for bool {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(if self { Flow::Next } else { Flow::Stop })
    }
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(self)
    }
}

impl<T: IntoFlow> IntoFlow for Option<T> {
    fn into_flow(self) -> Result<Flow, BoxError> {
        match self {
            Some(t) => t.into_flow(),
            None => Ok(Flow::Next),
        }
    }
}

impl<T, E> IntoFlow for Result<T, E>
where
    T: IntoFlow,
    E: Into<BoxError>,
{
    fn into_flow(self) -> Result<Flow, BoxError> {
        match self {
            Ok(t) => t.into_flow(),
            Err(e) => Err(e.into()),
        }
    }
}

/// A function run for every emission before listeners.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a pipeline function",
    label = "missing `PipelineFn` implementation",
    note = "Closures must take `(&str, &mut ActionRecord)`; annotate both argument types."
)]
pub trait PipelineFn: Send + Sync + 'static {
    /// Inspect or rewrite the action for `event`.
    fn run(&self, event: &str, action: &mut ActionRecord) -> Result<Flow, BoxError>;
}

impl<F, R> PipelineFn for F
where
    F: Fn(&str, &mut ActionRecord) -> R + Send + Sync + 'static,
    R: IntoFlow,
{
    fn run(&self, event: &str, action: &mut ActionRecord) -> Result<Flow, BoxError> {
        (self)(event, action).into_flow()
    }
}
