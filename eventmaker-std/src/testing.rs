//! Testing utilities for EventMaker.
//!
//! This module provides utilities to make testing listeners, middlewares and
//! idle timers easier.
//!
//! # Features
//!
//! - [`ManualScheduler`]: A scheduler driven by a virtual clock
//! - [`RecordingHandler`]: A handler that records every argument list it receives
//! - [`FailingHandler`]: A handler that always fails

use crate::lock;
use eventmaker_core::{BoxError, Handler, HandlerError, Scheduler, Task, TimerHandle, Value};
use std::{
    any::Any,
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

// ============================================================================
// Manual Scheduler
// ============================================================================

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), Task>,
}

/// A [`Scheduler`] whose clock only moves when told to.
///
/// Tasks fire during [`advance`](ManualScheduler::advance), in due order, with
/// no lock held, so a task may schedule or cancel other tasks.
///
/// # Example
///
/// ```rust,ignore
/// let scheduler = Arc::new(ManualScheduler::new());
/// let engine = EventMaker::builder().scheduler(scheduler.clone()).build();
///
/// engine.set_idle_disconnect_after(Duration::from_millis(100));
/// scheduler.advance(Duration::from_millis(100));
/// assert!(engine.is_disconnected());
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        lock(&self.state).now
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        lock(&self.state).pending.len()
    }

    /// Move the clock forward by `by`, firing every task that comes due.
    pub fn advance(&self, by: Duration) {
        let target = lock(&self.state).now.saturating_add(by);

        loop {
            let task = {
                let mut state = lock(&self.state);
                let due = state
                    .pending
                    .first_key_value()
                    .map(|(key, _)| *key)
                    .filter(|(at, _)| *at <= target);
                match due {
                    Some(key) => {
                        state.now = key.0;
                        state.pending.remove(&key)
                    }
                    None => None,
                }
            };

            match task {
                Some(task) => task(),
                None => break,
            }
        }

        lock(&self.state).now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now.saturating_add(delay);
        state.pending.insert((due, id), task);
        TimerHandle::from_raw(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let raw = handle.into_raw();
        lock(&self.state).pending.retain(|(_, id), _| *id != raw);
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records every argument list it receives.
///
/// Clones share the same record, so keep one and register the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// engine.on("ping", recorder.clone());
///
/// engine.emit("ping", args![1_i32, 2_i32])?;
/// assert_eq!(recorder.calls_as::<i32>(), vec![vec![1, 2]]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl RecordingHandler {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded argument lists.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        lock(&self.calls).clone()
    }

    /// Recorded argument lists, keeping only arguments of type `T`.
    pub fn calls_as<T: Any + Clone>(&self) -> Vec<Vec<T>> {
        lock(&self.calls)
            .iter()
            .map(|args| {
                args.iter()
                    .filter_map(|v| v.downcast_ref::<T>().cloned())
                    .collect()
            })
            .collect()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

impl Handler for RecordingHandler {
    fn call(&self, args: &[Value]) -> Result<(), BoxError> {
        lock(&self.calls).push(args.to_vec());
        Ok(())
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with a fixed message.
#[derive(Clone)]
pub struct FailingHandler {
    message: String,
    calls: Arc<AtomicUsize>,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times the handler ran.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Handler for FailingHandler {
    fn call(&self, _args: &[Value]) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HandlerError::Message(self.message.clone()).into())
    }
}
