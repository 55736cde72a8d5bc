//! Type-erased emission arguments.

use std::{any::Any, fmt, sync::Arc};

/// A single emitted argument.
///
/// Values are reference counted, so cloning a payload never clones the
/// underlying data. Listeners recover the concrete type with
/// [`downcast_ref`](Value::downcast_ref).
///
/// # Example
///
/// ```rust
/// use eventmaker_core::Value;
///
/// let value = Value::new(42_i32);
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// assert!(value.downcast_ref::<u8>().is_none());
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wrap any thread-safe value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow the value as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }

    /// Whether the value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        (*self.inner).is::<T>()
    }

    /// Name of the wrapped Rust type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.type_name).finish()
    }
}

/// Builds a `Vec<Value>` from a list of expressions.
///
/// ```rust
/// use eventmaker_core::args;
///
/// let payload = args![1_i32, "two", 3.0_f64];
/// assert_eq!(payload.len(), 3);
/// assert_eq!(payload[1].downcast_ref::<&str>(), Some(&"two"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::new($arg)),+]
    };
}
