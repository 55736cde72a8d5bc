//! # eventmaker - In-Process Event Dispatch
//!
//! `eventmaker` is a single-object event bus: register named listeners
//! (persistent or one-shot), run middlewares that can inspect, rewrite or veto
//! an emission before listeners see it, and gate delivery behind a
//! connect/disconnect lifecycle with an optional idle-disconnect timer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eventmaker::{ActionRecord, EventMaker, Value, args};
//!
//! let engine = EventMaker::builder().name("bus").logs(true).build();
//!
//! // Middlewares run first and may rewrite the payload.
//! engine.middleware(|_event: &str, action: &mut ActionRecord| {
//!     action.filter_payload(|value, _| value.is::<i32>());
//! });
//!
//! let listener = engine.on("ping", |args: &[Value]| {
//!     println!("ping: {args:?}");
//! });
//! engine.once("ping", |_: &[Value]| println!("first ping only"));
//!
//! engine.emit("ping", args![1_i32, "dropped", 2_i32])?;
//! engine.remove_listener(&listener);
//! ```
//!
//! ## Crates
//!
//! - `eventmaker-core`: arguments, listeners, pipeline functions, errors
//! - `eventmaker-std`: tokio timers, cooldowns, standard middlewares, testing
//! - `eventmaker`: the [`EventMaker`] engine

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

mod engine;
mod logging;
mod middleware;
mod options;
mod status;

pub use engine::{CONNECT_EVENT, DISCONNECT_EVENT, Emission, EventMaker};
pub use logging::Tone;
pub use middleware::Middleware;
pub use options::{EventMakerBuilder, Options};
pub use status::Status;

pub use eventmaker_core::{
    // Payload
    ActionRecord,
    // Error types
    BoxError,
    EmitError,
    // Pipeline
    Flow,
    // Listener
    Handler,
    HandlerError,
    IntoFlow,
    IntoHandlerResult,
    Listener,
    ListenerId,
    PipelineFn,
    // Timers
    Scheduler,
    Task,
    TimerHandle,
    Value,
    args,
};

pub use eventmaker_std::{cooldown::Cooldowns, scheduler::TokioScheduler};

/// Standard middleware implementations.
pub mod middlewares {
    #![allow(clippy::wildcard_imports)]
    pub use eventmaker_std::middlewares::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use eventmaker_std::testing::*;
}

/// Prelude module - common imports for EventMaker.
///
/// # Usage
///
/// ```rust,ignore
/// use eventmaker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ActionRecord, Emission, EmitError, EventMaker, Flow, Handler, Listener, Middleware,
        PipelineFn, Status, Value, args,
    };
}
