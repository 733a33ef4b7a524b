#![forbid(unsafe_code)]

//! Error taxonomy for the runtime (§7): everything fallible here is either
//! an I/O failure passed through from the backend or a caller misuse of the
//! terminal lifecycle. The decoder never produces an error (malformed
//! sequences recover into `Key(Unknown)`), so no decoder variant exists here.

use std::io;

/// Errors raised by the backend, terminal, and inline display.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A read, write, or terminal-mode system call failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// An operation was attempted in a lifecycle state that forbids it
    /// (e.g. presenting before `enter`, or `println` after `release`).
    #[error("invalid terminal state: {0}")]
    InvalidState(&'static str),

    /// The backend reported a terminal size of zero rows or columns.
    #[error("terminal geometry unusable: {width}x{height}")]
    Geometry { width: u16, height: u16 },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
