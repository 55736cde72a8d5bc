//! Listener callbacks.
//!
//! A [`Handler`] is the code a [`Listener`] runs when its event is emitted.
//! It receives the (possibly middleware-rewritten) payload as a slice of
//! positional arguments.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|args: &[Value]| { ... }`
//! 2. **Fallible closure**: `|args: &[Value]| -> Result<(), HandlerError> { ... }`
//! 3. **Struct implementation**: `impl Handler for MyHandler`
//!
//! [`Listener`]: crate::Listener

use crate::{error::BoxError, value::Value};

/// Conversion of a handler's return value into a dispatch result.
///
/// - `()` → success
/// - `Result<(), E>` → success or the boxed error
pub trait IntoHandlerResult {
    /// Convert into the result the engine propagates.
    fn into_handler_result(self) -> Result<(), BoxError>;
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> IntoHandlerResult for Result<(), E> {
    fn into_handler_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// The callback of a listener.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an event handler",
    label = "missing `Handler` implementation",
    note = "Closures must take `&[Value]`; annotate the argument type: `|args: &[Value]| ...`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Run the handler with the emitted arguments.
    fn call(&self, args: &[Value]) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<F, R> Handler for F
where
    F: Fn(&[Value]) -> R + Send + Sync + 'static,
    R: IntoHandlerResult,
{
    fn call(&self, args: &[Value]) -> Result<(), BoxError> {
        (self)(args).into_handler_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;

    fn call(handler: &dyn Handler, args: &[Value]) -> Result<(), BoxError> {
        handler.call(args)
    }

    #[test]
    fn test_unit_closure_succeeds() {
        let handler = |args: &[Value]| {
            assert_eq!(args.len(), 1);
        };
        assert!(call(&handler, &[Value::new(1_i32)]).is_ok());
    }

    #[test]
    fn test_fallible_closure_propagates() {
        let handler = |_: &[Value]| -> Result<(), HandlerError> { Err("nope".into()) };
        let err = call(&handler, &[]).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
