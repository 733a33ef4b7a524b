#![forbid(unsafe_code)]
//! Widget contracts: `Block`, `Paragraph`, and `Table`, built on the render
//! and text engines.

pub mod block;
pub mod paragraph;
pub mod table;

pub use block::{Block, BorderSet, Borders};
pub use paragraph::Paragraph;
pub use table::{Row, Table};

use ftui_core::geometry::Rect;
use ftui_render::Buffer;

/// A widget mutates cells within `area ∩ buf.area()`; writing outside that
/// intersection is a bug.
pub trait Widget {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// A widget whose rendering depends on caller-owned mutable state (e.g. a
/// table's selected row).
pub trait StatefulWidget {
    type State;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}

pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: ftui_style::Style) {
    buf.set_style(area, style);
}
