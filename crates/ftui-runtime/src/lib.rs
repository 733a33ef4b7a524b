#![forbid(unsafe_code)]
//! The `Backend` contract, a `crossterm` implementation, and the
//! full-screen/inline event-render loops tying a backend to rendering.

pub mod backend;
pub mod crossterm_backend;
pub mod error;
pub mod inline;
pub mod terminal;

pub use backend::{Backend, EOF, TIMEOUT};
pub use crossterm_backend::CrosstermBackend;
pub use error::{Result, RuntimeError};
pub use inline::InlineDisplay;
pub use terminal::{ControlFlow, SessionOptions, Terminal};
