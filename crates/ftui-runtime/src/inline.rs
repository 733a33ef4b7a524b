#![forbid(unsafe_code)]

//! Inline-mode lifecycle (§4.5 "Inline mode lifecycle"): a fixed-height band
//! reserved in the user's scrollback, redrawn in place without disturbing
//! whatever scrolled above it.

use std::io::Write;

use ftui_core::geometry::Rect;
use ftui_render::{Buffer, Presenter, ansi, diff_buffers};

use crate::error::Result;

/// A reserved `width x height` band at the current cursor position,
/// redrawn in place on every [`InlineDisplay::render`].
pub struct InlineDisplay<W: Write> {
    presenter: Presenter<W>,
    buffer: Buffer,
    /// Diffed against on every render to force a full style-coalesced
    /// redraw of the band, since inline mode has no "previous frame".
    blank: Buffer,
    height: u16,
}

impl<W: Write> InlineDisplay<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        let area = Rect::from_size(width, height);
        Self {
            presenter: Presenter::new(out),
            buffer: Buffer::new(area),
            blank: Buffer::new(area),
            height,
        }
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        self.buffer.area()
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Reserve `height` rows by printing that many newlines, then move the
    /// cursor back up to the top of the band.
    pub fn enter(&mut self) -> Result<()> {
        let w = self.presenter.writer_mut();
        for _ in 0..self.height {
            writeln!(w)?;
        }
        ansi::cursor_up(w, self.height)?;
        w.flush()?;
        Ok(())
    }

    /// Re-emit every row of the band, bracketed by a cursor save/restore so
    /// the cursor ends back where this call started.
    pub fn render(&mut self) -> Result<()> {
        ansi::cursor_save(self.presenter.writer_mut())?;
        let updates = diff_buffers(&self.blank, &self.buffer);
        self.presenter.present(&updates)?;
        self.presenter.reset_style()?;
        ansi::cursor_restore(self.presenter.writer_mut())?;
        self.presenter.flush()?;
        Ok(())
    }

    /// Move above the band, insert one scrollback line, then redraw the
    /// band back into place.
    pub fn println(&mut self, line: &str) -> Result<()> {
        let w = self.presenter.writer_mut();
        ansi::cursor_up(w, self.height)?;
        writeln!(w, "{line}")?;
        w.flush()?;
        self.render()
    }

    /// Move the cursor past the band and reset styles. With
    /// `clear_on_close`, every row is erased (CSI EL) before the cursor
    /// leaves, so nothing of the band remains on screen.
    pub fn release(&mut self, clear_on_close: bool) -> Result<()> {
        if clear_on_close {
            let w = self.presenter.writer_mut();
            for row in 0..self.height {
                ansi::erase_line(w)?;
                if row + 1 < self.height {
                    writeln!(w)?;
                }
            }
        }
        let w = self.presenter.writer_mut();
        writeln!(w)?;
        ansi::sgr_reset(w)?;
        w.flush()?;
        Ok(())
    }
}
