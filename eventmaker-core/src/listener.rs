//! # Listener
//!
//! A listener binds an event name to a [`Handler`] under an identity token
//! that is unique per construction.
//!
//! # Identity vs. Event Name
//!
//! Two distinct questions are asked about a listener and they must not be
//! confused:
//!
//! - [`same_identity_as`](Listener::same_identity_as): is this the very
//!   registration unit I hold? Used for exact removal.
//! - [`has_event_name`](Listener::has_event_name): does it listen to this
//!   event? Used for delivery and bulk removal.
//!
//! Cloning a listener keeps its identity, so one listener can be registered
//! on several engines and removed from each by identity.

use crate::{error::BoxError, handler::Handler, value::Value};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token of a [`Listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A named registration unit: event name, handler and identity.
#[derive(Clone)]
pub struct Listener {
    id: ListenerId,
    event: Arc<str>,
    handler: Arc<dyn Handler>,
}

impl Listener {
    /// Create a listener with a fresh identity.
    pub fn new(event: impl Into<String>, handler: impl Handler) -> Self {
        Self {
            id: ListenerId::next(),
            event: Arc::from(event.into()),
            handler: Arc::new(handler),
        }
    }

    /// The identity token.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The event name this listener reacts to.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Whether `other` is the same registration unit.
    pub fn same_identity_as(&self, other: &Listener) -> bool {
        self.id == other.id
    }

    /// Whether this listener reacts to `event`.
    pub fn has_event_name(&self, event: &str) -> bool {
        *self.event == *event
    }

    /// Run the handler. Errors are returned, not caught.
    pub fn invoke(&self, args: &[Value]) -> Result<(), BoxError> {
        self.handler.call(args)
    }

    /// Short debug string naming the event, e.g. `L(ping)`.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for Listener {}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L({})", self.event)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn noop() -> impl Handler {
        |_: &[Value]| {}
    }

    #[test]
    fn test_identity_is_unique_per_construction() {
        let a = Listener::new("ping", noop());
        let b = Listener::new("ping", noop());

        assert!(!a.same_identity_as(&b));
        assert!(a.has_event_name("ping"));
        assert!(b.has_event_name("ping"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = Listener::new("ping", noop());
        let b = a.clone();

        assert!(a.same_identity_as(&b));
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_event_name_does_not_imply_identity() {
        let a = Listener::new("ping", noop());
        assert!(!a.has_event_name("pong"));
        assert_eq!(a.event(), "ping");
    }

    #[test]
    fn test_invoke_passes_arguments() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let listener = Listener::new("sum", move |args: &[Value]| {
            let total: usize = args.iter().filter_map(|v| v.downcast_ref::<usize>()).sum();
            seen_clone.store(total, Ordering::SeqCst);
        });

        listener
            .invoke(&[Value::new(2_usize), Value::new(3_usize)])
            .unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_describe() {
        let listener = Listener::new("ping", noop());
        assert_eq!(listener.describe(), "L(ping)");
    }
}
