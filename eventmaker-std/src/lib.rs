//! # eventmaker-std
//!
//! Standard implementations for the EventMaker event dispatch engine.
//!
//! This crate provides:
//! - **Timers**: [`TokioScheduler`](scheduler::TokioScheduler) (feature `tokio`)
//! - **Rate limiting**: the [`Cooldowns`](cooldown::Cooldowns) registry
//! - **Standard middlewares**: Logging, Cooldown, Filter, Map
//! - **Testing utilities**: a manual scheduler and recording handlers

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core primitives
pub use eventmaker_core;

// Modules
pub mod cooldown;
pub mod middlewares;
#[cfg(feature = "tokio")]
pub mod scheduler;
pub mod testing;

use std::sync::{Mutex, MutexGuard, PoisonError};

// A panicking handler must not wedge shared state for everyone else.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
