//! Connection status of an engine.

use std::fmt;

/// The tri-state lifecycle of an [`EventMaker`](crate::EventMaker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Connected and not running listeners.
    #[default]
    Idle,
    /// Running the listeners of one emission.
    Processing,
    /// Disconnected; emissions are gated until `connect`.
    Disconnected,
}

impl Status {
    /// Lower-case label, e.g. `"idle"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Processing => "processing",
            Status::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
