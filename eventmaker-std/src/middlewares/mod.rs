//! Ready-made pipeline functions.
//!
//! Every type here implements [`PipelineFn`](eventmaker_core::PipelineFn) and
//! can be passed straight to `EventMaker::middleware`.

mod cooldown;
mod filter;
mod logging;
mod map;

pub use cooldown::CooldownMiddleware;
pub use filter::FilterPayload;
pub use logging::LoggingMiddleware;
pub use map::{MapPayload, PayloadError, TypedMapPayload};
