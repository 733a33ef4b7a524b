#![forbid(unsafe_code)]

//! `Backend` implementation on top of `crossterm`.
//!
//! Input is read as raw bytes from stdin (not crossterm's structured event
//! enum) so the byte stream can be fed to [`ftui_core::input_decoder::Decoder`]
//! per §4.4; `crossterm::event::poll` is reused only as the readiness check
//! behind the timeout.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};

use ftui_render::{CellUpdate, Presenter};

use crate::backend::{Backend, EOF, TIMEOUT};
use crate::error::Result;

/// A [`Backend`] writing to `W` and reading raw bytes from stdin.
pub struct CrosstermBackend<W: Write> {
    presenter: Presenter<W>,
    pending: VecDeque<u8>,
}

impl<W: Write> CrosstermBackend<W> {
    pub fn new(out: W) -> Self {
        Self {
            presenter: Presenter::new(out),
            pending: VecDeque::new(),
        }
    }

    fn fill_pending(&mut self, timeout_ms: u64) -> Result<bool> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        if !crossterm::event::poll(Duration::from_millis(timeout_ms))? {
            return Ok(false);
        }
        let mut buf = [0u8; 256];
        let n = io::stdin().read(&mut buf)?;
        if n == 0 {
            return Ok(false);
        }
        self.pending.extend(&buf[..n]);
        Ok(true)
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn read_unit(&mut self, timeout_ms: u64) -> Result<i32> {
        if !self.fill_pending(timeout_ms)? {
            return Ok(if self.pending.is_empty() {
                TIMEOUT
            } else {
                EOF
            });
        }
        Ok(self.pending.pop_front().map_or(EOF, i32::from))
    }

    fn peek_unit(&mut self, timeout_ms: u64) -> Result<i32> {
        if !self.fill_pending(timeout_ms)? {
            return Ok(TIMEOUT);
        }
        Ok(self.pending.front().copied().map_or(EOF, i32::from))
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.presenter.writer_mut().write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.presenter.flush()?;
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        execute!(self.presenter.writer_mut(), EnterAlternateScreen)?;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        execute!(self.presenter.writer_mut(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn enable_mouse_capture(&mut self) -> Result<()> {
        execute!(self.presenter.writer_mut(), EnableMouseCapture)?;
        Ok(())
    }

    fn disable_mouse_capture(&mut self) -> Result<()> {
        execute!(self.presenter.writer_mut(), DisableMouseCapture)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        execute!(self.presenter.writer_mut(), Show)?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        execute!(self.presenter.writer_mut(), Hide)?;
        Ok(())
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()> {
        execute!(self.presenter.writer_mut(), MoveTo(x, y))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.presenter.writer_mut(), Clear(ClearType::All))?;
        self.presenter.reset_style()?;
        Ok(())
    }

    fn apply(&mut self, updates: &[CellUpdate<'_>]) -> Result<()> {
        self.presenter.present(updates)?;
        Ok(())
    }
}
