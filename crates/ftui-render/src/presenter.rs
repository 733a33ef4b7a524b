#![forbid(unsafe_code)]

//! Presenter: turns a buffer diff into a minimal, state-tracked ANSI byte
//! stream.
//!
//! Consecutive updates sharing a row with monotonically increasing columns
//! are coalesced into a single cursor move followed by a styled text run;
//! style changes inside a run are compressed to only the SGR attributes
//! that differ from the currently applied style. A gap along a row (or a
//! row change) forces an absolute CUP repositioning.

use std::io::{self, Write};

use ftui_style::Style;

use crate::ansi;
use crate::diff::CellUpdate;

/// Tracks the style last written to the terminal so runs only emit the SGR
/// deltas, not a full style dump per cell.
#[derive(Debug, Clone, Copy, Default)]
struct AppliedStyle {
    style: Option<Style>,
}

impl AppliedStyle {
    /// Emit the SGR deltas needed to move from the currently applied style
    /// to `target`, then remember `target` as applied.
    fn transition<W: Write>(&mut self, w: &mut W, target: Style) -> io::Result<()> {
        if self.style == Some(target) {
            return Ok(());
        }
        let current = self.style.unwrap_or_default();

        let turn_off = current.add_modifier - target.add_modifier;
        if !turn_off.is_empty() {
            ansi::sgr_modifier_off(w, turn_off)?;
        }
        let turn_on = target.add_modifier - current.add_modifier;
        if !turn_on.is_empty() {
            ansi::sgr_modifier_on(w, turn_on)?;
        }
        if current.fg != target.fg {
            match target.fg {
                Some(color) => ansi::sgr_color(w, color, true)?,
                None => ansi::sgr_fg_default(w)?,
            }
        }
        if current.bg != target.bg {
            match target.bg {
                Some(color) => ansi::sgr_color(w, color, false)?,
                None => ansi::sgr_bg_default(w)?,
            }
        }
        self.style = Some(target);
        Ok(())
    }

    fn reset<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        ansi::sgr_reset(w)?;
        self.style = None;
        Ok(())
    }
}

/// Presents a buffer diff as ANSI bytes to `out`.
pub struct Presenter<W: Write> {
    out: W,
    applied: AppliedStyle,
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            applied: AppliedStyle::default(),
            cursor: None,
        }
    }

    /// Write the coalesced update stream for `updates`, which must already
    /// be in ascending row-major order (as produced by [`crate::diff::diff`]).
    pub fn present(&mut self, updates: &[CellUpdate<'_>]) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("present", changes = updates.len()).entered();

        let mut i = 0;
        while i < updates.len() {
            let run_y = updates[i].y;
            let run_start_x = updates[i].x;
            let mut j = i;
            let mut expected_x = run_start_x;
            while j < updates.len() && updates[j].y == run_y && updates[j].x == expected_x {
                expected_x += u16::from(updates[j].cell.width().max(1));
                j += 1;
            }

            if self.cursor != Some((run_start_x, run_y)) {
                ansi::cup(&mut self.out, run_y, run_start_x)?;
            }

            for update in &updates[i..j] {
                self.applied.transition(&mut self.out, update.cell.style)?;
                if !update.cell.is_continuation() {
                    self.out.write_all(update.cell.symbol().as_bytes())?;
                }
            }
            self.cursor = Some((expected_x, run_y));
            i = j;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!("frame presented");
        Ok(())
    }

    /// Move the hardware cursor to `(x, y)` and set its visibility.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) -> io::Result<()> {
        match position {
            Some((x, y)) => {
                ansi::cup(&mut self.out, y, x)?;
                ansi::cursor_show(&mut self.out)?;
                self.cursor = Some((x, y));
            }
            None => ansi::cursor_hide(&mut self.out)?,
        }
        Ok(())
    }

    /// Emit a full SGR reset and forget the tracked applied style. Called
    /// at the end of a full-buffer present and at the end of an inline
    /// render.
    pub fn reset_style(&mut self) -> io::Result<()> {
        self.applied.reset(&mut self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Direct access to the underlying writer, for callers that need to
    /// emit bytes the presenter itself doesn't model (e.g. terminal-mode
    /// control sequences issued by the backend).
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::diff::diff;
    use ftui_core::geometry::Rect;
    use ftui_style::Color;

    fn present_to_string(updates: &[CellUpdate<'_>]) -> String {
        let mut p = Presenter::new(Vec::new());
        p.present(updates).unwrap();
        String::from_utf8(p.into_inner()).unwrap()
    }

    #[test]
    fn single_update_moves_cursor_and_writes_symbol() {
        let area = Rect::from_size(4, 2);
        let prev = Buffer::new(area);
        let mut next = Buffer::new(area);
        next.set_string(1, 1, "X", Style::default());
        let updates = diff(&prev, &next);
        let out = present_to_string(&updates);
        assert!(out.starts_with("\x1b[2;2H"));
        assert!(out.ends_with('X'));
    }

    #[test]
    fn consecutive_same_row_updates_are_one_run_no_gap_cup() {
        let area = Rect::from_size(4, 1);
        let prev = Buffer::new(area);
        let mut next = Buffer::new(area);
        next.set_string(0, 0, "ab", Style::default());
        let updates = diff(&prev, &next);
        let out = present_to_string(&updates);
        // Exactly one CUP (for the run start), then both glyphs.
        assert_eq!(out.matches('H').count(), 1);
        assert!(out.contains("ab"));
    }

    #[test]
    fn style_change_emits_sgr_delta_only_once() {
        let area = Rect::from_size(4, 1);
        let prev = Buffer::new(area);
        let mut next = Buffer::new(area);
        next.set_string(0, 0, "a", Style::new().fg(Color::Red).bold());
        next.set_string(1, 0, "b", Style::new().fg(Color::Red).bold());
        let updates = diff(&prev, &next);
        let out = present_to_string(&updates);
        assert_eq!(
            out.matches("\x1b[1m").count(),
            1,
            "bold turned on exactly once: {out:?}"
        );
        assert_eq!(
            out.matches("\x1b[31m").count(),
            1,
            "fg red set exactly once: {out:?}"
        );
    }

    #[test]
    fn identical_buffers_present_as_empty() {
        let area = Rect::from_size(4, 1);
        let buf = Buffer::new(area);
        let updates = diff(&buf, &buf);
        assert_eq!(present_to_string(&updates), "");
    }
}
