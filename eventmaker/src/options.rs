//! Construction options and the engine builder.

use crate::engine::EventMaker;
use eventmaker_core::Scheduler;
use eventmaker_std::scheduler::TokioScheduler;
use std::{sync::Arc, time::Duration};

/// Plain construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Emit diagnostic log lines.
    pub logs: bool,
    /// Cosmetic name shown in log lines and `Display`.
    pub name: Option<String>,
}

impl Options {
    /// Logging off, no name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle diagnostic logging.
    pub fn logs(mut self, logs: bool) -> Self {
        self.logs = logs;
        self
    }

    /// Set the cosmetic name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Builder for constructing an [`EventMaker`].
///
/// # Example
///
/// ```rust,ignore
/// let engine = EventMaker::builder()
///     .name("bus")
///     .logs(true)
///     .idle_disconnect_after(Duration::from_secs(30))
///     .build();
/// ```
#[derive(Default)]
pub struct EventMakerBuilder {
    options: Options,
    scheduler: Option<Arc<dyn Scheduler>>,
    idle_after: Option<Duration>,
}

impl EventMakerBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all plain options at once.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Toggle diagnostic logging.
    pub fn logs(mut self, logs: bool) -> Self {
        self.options.logs = logs;
        self
    }

    /// Set the cosmetic name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    /// Use `scheduler` for the idle timer and delayed transitions.
    ///
    /// Defaults to a [`TokioScheduler`].
    pub fn scheduler(mut self, scheduler: impl Scheduler) -> Self {
        self.scheduler = Some(Arc::new(scheduler));
        self
    }

    /// Arm the idle timer right after construction.
    pub fn idle_disconnect_after(mut self, after: Duration) -> Self {
        self.idle_after = Some(after);
        self
    }

    /// Build the engine.
    pub fn build(self) -> EventMaker {
        let scheduler: Arc<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::new()),
        };
        // An empty name is treated as no name.
        let name = self.options.name.filter(|name| !name.is_empty());
        let engine = EventMaker::from_parts(name, self.options.logs, scheduler);

        if let Some(after) = self.idle_after {
            engine.set_idle_disconnect_after(after);
        }
        engine
    }
}
