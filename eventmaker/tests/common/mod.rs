#![allow(dead_code)]

use eventmaker::{EventMaker, Value, testing::ManualScheduler};
use std::sync::{Arc, Mutex};

// ============================================================================
// Engines
// ============================================================================

/// An engine driven by a virtual clock.
pub fn manual_engine() -> (EventMaker, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let engine = EventMaker::builder()
        .name("test")
        .logs(true)
        .scheduler(scheduler.clone())
        .build();
    (engine, scheduler)
}

// ============================================================================
// Payload helpers
// ============================================================================

pub fn ints(args: &[Value]) -> Vec<i32> {
    args.iter()
        .filter_map(|v| v.downcast_ref::<i32>().copied())
        .collect()
}

/// A shared, ordered log of labels.
#[derive(Clone, Default)]
pub struct OrderLog(Arc<Mutex<Vec<String>>>);

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// A listener handler that appends `label` when called.
    pub fn handler(&self, label: &'static str) -> impl Fn(&[Value]) + Send + Sync + 'static {
        let log = self.clone();
        move |_: &[Value]| log.push(label)
    }
}
