//! Keyed cooldown registry for rate-limiting middlewares.
//!
//! A key is "cooling down" for exactly the duration given when it was
//! inserted. Expiry is evaluated against the monotonic clock whenever the
//! registry is consulted, so no timer is needed to forget a key. A duration
//! too long for the clock to represent never expires.

use crate::lock;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
    time::{Duration, Instant},
};

/// A set of keys that expire after a fixed duration.
///
/// Clones share the same set. [`Cooldowns::global`] is the process-wide
/// instance the `Middleware::cooldown` helper uses.
#[derive(Clone, Default)]
pub struct Cooldowns {
    keys: Arc<Mutex<HashMap<String, Option<Instant>>>>,
}

// `None` marks a cooldown past the end of the clock.
fn live(until: Option<Instant>, now: Instant) -> bool {
    until.is_none_or(|until| until > now)
}

impl Cooldowns {
    /// Create an empty, independent registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Cooldowns {
        static GLOBAL: OnceLock<Cooldowns> = OnceLock::new();
        GLOBAL.get_or_init(Cooldowns::new)
    }

    /// Start a cooldown for `key` unless one is running.
    ///
    /// Returns `true` if `key` is still cooling down (nothing changes), and
    /// `false` if the cooldown was started now.
    pub fn try_begin(&self, key: &str, duration: Duration) -> bool {
        let now = Instant::now();
        let mut keys = lock(&self.keys);
        keys.retain(|_, until| live(*until, now));

        if keys.contains_key(key) {
            return true;
        }
        keys.insert(key.to_owned(), now.checked_add(duration));
        false
    }

    /// Whether `key` is cooling down.
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        lock(&self.keys)
            .get(key)
            .is_some_and(|until| live(*until, now))
    }

    /// End the cooldown for `key` early. Returns whether it was running.
    pub fn remove(&self, key: &str) -> bool {
        let now = Instant::now();
        lock(&self.keys)
            .remove(key)
            .is_some_and(|until| live(until, now))
    }

    /// Forget every key.
    pub fn clear(&self) {
        lock(&self.keys).clear();
    }

    /// Number of keys cooling down.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        lock(&self.keys)
            .values()
            .filter(|until| live(**until, now))
            .count()
    }

    /// Whether no key is cooling down.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
