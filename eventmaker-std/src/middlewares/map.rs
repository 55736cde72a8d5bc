//! Map middlewares for payload transformation.

use eventmaker_core::{ActionRecord, BoxError, Flow, PipelineFn, Value};
use std::{any::Any, marker::PhantomData};
use thiserror::Error;

/// Errors raised by typed payload middlewares.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// An argument did not have the type the transform expects.
    #[error("payload argument {index} is `{found}`, expected `{expected}`")]
    TypeMismatch {
        /// Position of the offending argument.
        index: usize,
        /// The type the transform accepts.
        expected: &'static str,
        /// The type actually emitted.
        found: &'static str,
    },
}

/// A middleware that replaces every payload argument.
///
/// The transform receives each argument and its index; the payload keeps its
/// length and order.
pub struct MapPayload<F> {
    transform: F,
    event: Option<String>,
}

impl<F> MapPayload<F>
where
    F: Fn(&Value, usize) -> Value + Send + Sync + 'static,
{
    /// Create a new map middleware.
    pub fn new(transform: F) -> Self {
        Self {
            transform,
            event: None,
        }
    }

    /// Only transform emissions of `event`.
    pub fn for_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }
}

impl<F> PipelineFn for MapPayload<F>
where
    F: Fn(&Value, usize) -> Value + Send + Sync + 'static,
{
    fn run(&self, event: &str, action: &mut ActionRecord) -> Result<Flow, BoxError> {
        if self.event.as_deref().is_none_or(|only| only == event) {
            action.map_payload(&self.transform);
        }
        Ok(Flow::Next)
    }
}

/// A [`MapPayload`] over arguments of a known type `T`.
///
/// An emission carrying any argument of another type fails with
/// [`PayloadError::TypeMismatch`] and leaves the payload untouched.
pub struct TypedMapPayload<T, F> {
    transform: F,
    event: Option<String>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, U, F> TypedMapPayload<T, F>
where
    T: Any,
    U: Any + Send + Sync,
    F: Fn(&T, usize) -> U + Send + Sync + 'static,
{
    /// Create a typed map middleware.
    pub fn new(transform: F) -> Self {
        Self {
            transform,
            event: None,
            _phantom: PhantomData,
        }
    }

    /// Only transform emissions of `event`.
    pub fn for_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }
}

impl<T, U, F> PipelineFn for TypedMapPayload<T, F>
where
    T: Any,
    U: Any + Send + Sync,
    F: Fn(&T, usize) -> U + Send + Sync + 'static,
{
    fn run(&self, event: &str, action: &mut ActionRecord) -> Result<Flow, BoxError> {
        if self.event.as_deref().is_some_and(|only| only != event) {
            return Ok(Flow::Next);
        }

        let mut mapped = Vec::with_capacity(action.payload.len());
        for (index, value) in action.payload.iter().enumerate() {
            let typed = value
                .downcast_ref::<T>()
                .ok_or_else(|| PayloadError::TypeMismatch {
                    index,
                    expected: std::any::type_name::<T>(),
                    found: value.type_name(),
                })?;
            mapped.push(Value::new((self.transform)(typed, index)));
        }
        action.payload = mapped;
        Ok(Flow::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmaker_core::args;

    fn ints(action: &ActionRecord) -> Vec<i32> {
        action
            .payload
            .iter()
            .filter_map(|v| v.downcast_ref::<i32>().copied())
            .collect()
    }

    #[test]
    fn test_map_replaces_arguments() {
        let middleware = MapPayload::new(|v: &Value, index| {
            Value::new(v.downcast_ref::<i32>().copied().unwrap_or_default() + index as i32)
        });
        let mut action = ActionRecord::new(args![10_i32, 10_i32]);

        middleware.run("n", &mut action).unwrap();
        assert_eq!(ints(&action), vec![10, 11]);
    }

    #[test]
    fn test_typed_map_doubles() {
        let middleware = TypedMapPayload::new(|n: &i32, _| n * 2);
        let mut action = ActionRecord::new(args![5_i32, 7_i32]);

        middleware.run("n", &mut action).unwrap();
        assert_eq!(ints(&action), vec![10, 14]);
    }

    #[test]
    fn test_typed_map_rejects_foreign_types() {
        let middleware = TypedMapPayload::new(|n: &i32, _| n * 2);
        let mut action = ActionRecord::new(args![5_i32, "five"]);

        let err = middleware.run("n", &mut action).unwrap_err();
        let err = err.downcast_ref::<PayloadError>().unwrap();
        assert_eq!(
            *err,
            PayloadError::TypeMismatch {
                index: 1,
                expected: "i32",
                found: "&str",
            }
        );
        // Untouched on failure.
        assert_eq!(action.payload.len(), 2);
        assert_eq!(ints(&action), vec![5]);
    }

    #[test]
    fn test_typed_map_scoped_to_event() {
        let middleware = TypedMapPayload::new(|n: &i32, _| n * 2).for_event("n");
        let mut action = ActionRecord::new(args!["text"]);

        assert_eq!(middleware.run("other", &mut action).unwrap(), Flow::Next);
        assert_eq!(action.payload.len(), 1);
    }
}
