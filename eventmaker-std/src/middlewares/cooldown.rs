//! Cooldown middleware for rate limiting.

use crate::cooldown::Cooldowns;
use eventmaker_core::{ActionRecord, BoxError, Flow, PipelineFn};
use std::time::Duration;

enum CooldownKey {
    Event,
    Fixed(String),
}

/// A middleware that lets an emission through at most once per cooldown.
///
/// Blocked emissions return [`Flow::Stop`], so no listener runs for them.
///
/// # Example
///
/// ```rust,ignore
/// // At most one "chat" (and one of every other event) every 3 seconds.
/// engine.middleware(CooldownMiddleware::per_event(Duration::from_secs(3)));
/// ```
pub struct CooldownMiddleware {
    key: CooldownKey,
    duration: Duration,
    registry: Cooldowns,
}

impl CooldownMiddleware {
    /// Cool down each event name independently.
    pub fn per_event(duration: Duration) -> Self {
        Self {
            key: CooldownKey::Event,
            duration,
            registry: Cooldowns::global().clone(),
        }
    }

    /// Cool down every event under one shared key.
    pub fn keyed(key: impl Into<String>, duration: Duration) -> Self {
        Self {
            key: CooldownKey::Fixed(key.into()),
            duration,
            registry: Cooldowns::global().clone(),
        }
    }

    /// Use `registry` instead of the process-wide one.
    pub fn with_registry(mut self, registry: Cooldowns) -> Self {
        self.registry = registry;
        self
    }
}

impl PipelineFn for CooldownMiddleware {
    fn run(&self, event: &str, _action: &mut ActionRecord) -> Result<Flow, BoxError> {
        let key = match &self.key {
            CooldownKey::Event => event,
            CooldownKey::Fixed(key) => key.as_str(),
        };

        if self.registry.try_begin(key, self.duration) {
            #[cfg(feature = "tracing")]
            tracing::debug!(key, "emission blocked by cooldown");
            return Ok(Flow::Stop);
        }
        Ok(Flow::Next)
    }
}
