//! Tokio-backed timers.

use crate::lock;
use eventmaker_core::{Scheduler, Task, TimerHandle};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{runtime::Handle, task::AbortHandle};

/// A [`Scheduler`] that runs every task on its own tokio task.
///
/// Tasks are spawned on the runtime current at scheduling time. Scheduling
/// outside a runtime drops the task and returns a handle that cancels nothing.
#[derive(Default)]
pub struct TokioScheduler {
    next_id: AtomicU64,
    pending: Arc<Mutex<HashMap<u64, AbortHandle>>>,
}

impl TokioScheduler {
    /// Create a scheduler with no pending tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = TimerHandle::from_raw(id);

        let Ok(runtime) = Handle::try_current() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(?delay, "no tokio runtime, timer dropped");
            return handle;
        };

        // Hold the map while spawning so the entry exists before the task can remove it.
        let mut pending = lock(&self.pending);
        let registry = Arc::clone(&self.pending);
        let join = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&registry).remove(&id);
            task();
        });
        pending.insert(id, join.abort_handle());

        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(abort) = lock(&self.pending).remove(&handle.into_raw()) {
            abort.abort();
        }
    }
}
