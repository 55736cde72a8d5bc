//! # eventmaker-core
//!
//! Core primitives for the EventMaker event dispatch engine.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only implements handlers, pipeline functions or schedulers and does
//! not need the engine itself.
//!
//! # Building Blocks
//!
//! ## Arguments ([`Value`])
//!
//! An emission carries an ordered list of heterogeneous arguments. Each one is
//! a type-erased, cheaply cloneable [`Value`] that listeners downcast back to
//! the concrete type they expect.
//!
//! ## Listeners ([`Listener`], [`Handler`])
//!
//! A [`Listener`] is a named registration unit: an event name, a [`Handler`]
//! and an identity token that is unique per construction. Two listeners for the
//! same event are still distinct entities.
//!
//! ## Pipeline ([`PipelineFn`], [`Flow`], [`ActionRecord`])
//!
//! Pipeline functions run for every emission before any listener. They see the
//! event name and a mutable [`ActionRecord`], may rewrite its payload, and
//! return [`Flow::Stop`] to veto delivery.
//!
//! ## Timers ([`Scheduler`])
//!
//! The engine's only time-based behaviour (idle disconnect, delayed
//! connect/disconnect) goes through the [`Scheduler`] seam.
//!
//! # Error Types
//!
//! - [`EmitError`] - Failures surfaced by an emission
//! - [`HandlerError`] - Convenience error for handler authors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod error;
mod handler;
mod listener;
mod pipeline;
mod scheduler;
mod value;

// Re-exports
pub use action::ActionRecord;
pub use error::{BoxError, EmitError, HandlerError};
pub use handler::{Handler, IntoHandlerResult};
pub use listener::{Listener, ListenerId};
pub use pipeline::{Flow, IntoFlow, PipelineFn};
pub use scheduler::{Scheduler, Task, TimerHandle};
pub use value::Value;
