//! Diagnostic output of the engine.

use std::fmt;

/// Display tone of a log line.
///
/// Tones map onto `tracing` levels: `Success` → `info`, `Alert` → `warn`,
/// `Muted` → `debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    /// Normal progress.
    #[default]
    Success,
    /// Something was refused or stopped.
    Alert,
    /// Lifecycle chatter.
    Muted,
}

pub(crate) fn write(label: &dyn fmt::Display, message: fmt::Arguments<'_>, tone: Tone) {
    #[cfg(feature = "tracing")]
    {
        match tone {
            Tone::Success => tracing::info!(target: "eventmaker", "{label} | {message}"),
            Tone::Alert => tracing::warn!(target: "eventmaker", "{label} | {message}"),
            Tone::Muted => tracing::debug!(target: "eventmaker", "{label} | {message}"),
        }
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = (label, message, tone);
    }
}
