#![forbid(unsafe_code)]

//! A thin per-draw handle over the back buffer plus cursor state.

use crate::buffer::Buffer;
use ftui_core::geometry::Rect;
use ftui_style::Style;

/// Passed to the render callback once per draw. Widgets write into
/// [`Frame::buffer_mut`]; the cursor fields carry the caller's request for
/// where the hardware cursor should land once presentation is done.
pub struct Frame<'a> {
    buffer: &'a mut Buffer,
    cursor: Option<(u16, u16)>,
}

impl<'a> Frame<'a> {
    pub fn new(buffer: &'a mut Buffer) -> Self {
        Self {
            buffer,
            cursor: None,
        }
    }

    #[must_use]
    pub const fn area(&self) -> Rect {
        self.buffer.area()
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// Request the hardware cursor be placed at `(x, y)` after presentation.
    pub fn set_cursor_position(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }

    #[must_use]
    pub const fn cursor_position(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub fn set_string(&mut self, x: u16, y: u16, s: &str, style: Style) {
        self.buffer.set_string(x, y, s, style);
    }
}
