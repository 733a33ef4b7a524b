#![forbid(unsafe_code)]

//! Public facade crate.
//!
//! Re-exports the commonly used types from the core/render/layout/text/
//! widgets/runtime crates so application code depends on one crate instead
//! of wiring each of them individually.

// --- Core re-exports -------------------------------------------------------

pub use ftui_core::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use ftui_core::geometry::Rect;
pub use ftui_core::input_decoder::Decoder;

// --- Render re-exports -----------------------------------------------------

pub use ftui_render::{Buffer, Cell, CellUpdate, Frame, Presenter, diff_buffers};

// --- Style and text re-exports ---------------------------------------------

pub use ftui_style::{Color, Modifier, Style};
pub use ftui_text::{Alignment, Line, Overflow, Span, Text, align_x, visible_lines};

// --- Layout re-exports -------------------------------------------------------

pub use ftui_layout::{Constraint, Direction, Layout};

// --- Widget re-exports -------------------------------------------------------

pub use ftui_widgets::{Block, BorderSet, Borders, Paragraph, Row, StatefulWidget, Table, Widget};

// --- Runtime re-exports (feature-gated) ------------------------------------

#[cfg(feature = "runtime")]
pub use ftui_runtime::{
    Backend, ControlFlow, CrosstermBackend, InlineDisplay, RuntimeError, SessionOptions, Terminal,
};

pub mod prelude {
    pub use crate::{
        Block, Buffer, Color, Constraint, Direction, Event, Frame, KeyCode, KeyEvent, Layout,
        Modifier, Paragraph, Rect, Style, Table, Widget,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{ControlFlow, SessionOptions, Terminal};
}

pub use ftui_core as core;
pub use ftui_layout as layout;
pub use ftui_render as render;
#[cfg(feature = "runtime")]
pub use ftui_runtime as runtime;
pub use ftui_style as style;
pub use ftui_text as text;
pub use ftui_widgets as widgets;
