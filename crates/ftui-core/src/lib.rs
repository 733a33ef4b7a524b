#![forbid(unsafe_code)]

//! Core: terminal geometry, canonical events, and the byte-stream input
//! decoder shared by every other `ftui-*` crate.

pub mod event;
pub mod geometry;
pub mod input_decoder;

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, trace_span};
