//! Timer seam used for the idle disconnect and delayed transitions.

use std::{sync::Arc, time::Duration};

/// A deferred callback.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle of a scheduled [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Build a handle from a scheduler-specific id.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The scheduler-specific id.
    pub fn into_raw(self) -> u64 {
        self.0
    }
}

/// Runs callbacks after a delay.
///
/// Implementations must accept any delay, including zero, and must treat
/// cancelling a handle that already fired (or never existed) as a no-op.
pub trait Scheduler: Send + Sync + 'static {
    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Drop a pending task.
    fn cancel(&self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}
