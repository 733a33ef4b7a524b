#![forbid(unsafe_code)]

//! The `Backend` contract (§4.5): a sink/source the event/render loop drives.
//! `Terminal`/`InlineDisplay` are generic over it so tests can swap in a
//! buffer-backed fake instead of a real tty.

use ftui_render::CellUpdate;

use crate::error::Result;

/// Sentinel `read_unit`/`peek_unit` return for "no unit within the timeout".
pub const TIMEOUT: i32 = -2;
/// Sentinel `read_unit`/`peek_unit` return for "input stream closed".
pub const EOF: i32 = -1;

/// A terminal sink/source. One unit is one byte of the input stream.
pub trait Backend {
    /// Current terminal size in columns and rows.
    fn size(&self) -> Result<(u16, u16)>;

    /// Block for up to `timeout_ms` for the next input unit. Returns
    /// [`TIMEOUT`] on timeout, [`EOF`] on end of input, otherwise the byte
    /// value widened to `i32`.
    fn read_unit(&mut self, timeout_ms: u64) -> Result<i32>;

    /// Like [`Backend::read_unit`] but does not consume the unit.
    fn peek_unit(&mut self, timeout_ms: u64) -> Result<i32>;

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;

    fn enter_alternate_screen(&mut self) -> Result<()>;
    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;
    fn disable_raw_mode(&mut self) -> Result<()>;

    fn enable_mouse_capture(&mut self) -> Result<()>;
    fn disable_mouse_capture(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;
    fn hide_cursor(&mut self) -> Result<()>;
    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()>;

    /// Erase the whole screen.
    fn clear(&mut self) -> Result<()>;

    /// Present a row-major diff against the terminal's current contents.
    fn apply(&mut self, updates: &[CellUpdate<'_>]) -> Result<()>;
}
