#![forbid(unsafe_code)]

//! Double-buffered cell grid storage.
//!
//! Cells are stored row-major: `index = y * width + x`. Every index in the
//! array corresponds to a cell inside `area`; `resize` replaces the array
//! wholesale and resets every cell to default.

use crate::cell::Cell;
use ftui_core::geometry::Rect;
use ftui_style::Style;
use ftui_text::{cluster_width, graphemes};

/// A rectangular grid of [`Cell`]s paired with its area.
#[derive(Debug, Clone)]
pub struct Buffer {
    area: Rect,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create an empty buffer covering `area`, every cell a blank default.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let size = area.area() as usize;
        Self {
            area,
            cells: vec![Cell::default(); size],
        }
    }

    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Replace the backing array for a new `area`, resetting every cell.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.cells = vec![Cell::default(); area.area() as usize];
    }

    /// Reset every cell in place to its default value without reallocating.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if self.area.contains(x, y) {
            let local_x = (x - self.area.x) as usize;
            let local_y = (y - self.area.y) as usize;
            Some(local_y * self.area.width as usize + local_x)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write a single cell at `(x, y)`. A no-op outside the area.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Raw row-major cell slice, for the diff algorithm and presenter.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write `s` starting at `(x, y)` with `style`, one grapheme cluster per
    /// head cell. Zero-width clusters merge onto the preceding cell's
    /// symbol. Writing stops at the right edge of the buffer's area; a wide
    /// cluster that would cross the edge is replaced with a padding space.
    pub fn set_string(&mut self, x: u16, y: u16, s: &str, style: Style) {
        if !self.area.contains(x, y) {
            return;
        }
        let right = self.area.right();
        let mut cursor = x;
        let mut last_head: Option<(u16, u16)> = None;

        for cluster in graphemes(s) {
            let w = cluster_width(cluster);
            if w == 0 {
                if let Some((hx, hy)) = last_head
                    && let Some(cell) = self.get_mut(hx, hy)
                {
                    let merged = format!("{}{}", cell.symbol(), cluster);
                    let width = cell.width();
                    *cell = Cell::new(&merged, width, cell.style);
                }
                continue;
            }
            if cursor >= right {
                break;
            }
            if w == 2 && cursor + 1 >= right {
                // Wide glyph would cross the edge: pad instead.
                self.set(cursor, y, Cell::new(" ", 1, style));
                break;
            }

            self.clear_stale_partner(cursor, y);
            self.set(cursor, y, Cell::new(cluster, w as u8, style));
            last_head = Some((cursor, y));
            if w == 2 {
                self.set(cursor + 1, y, Cell::continuation_of(style));
            }
            cursor += w as u16;
        }
    }

    /// If `(x, y)` would become a non-continuation cell but its left
    /// neighbor is a wide head whose continuation is exactly here, clear
    /// that head so the invariant never shows an orphaned continuation.
    fn clear_stale_partner(&mut self, x: u16, y: u16) {
        if let Some(is_cont) = self.get(x, y).map(Cell::is_continuation)
            && is_cont
            && x > self.area.x
            && let Some(head) = self.get_mut(x - 1, y)
            && head.width() == 2
        {
            *head = Cell::blank();
        }
    }

    /// Patch the style of every cell inside `rect ∩ area`; symbols untouched.
    pub fn set_style(&mut self, rect: Rect, style: Style) {
        let clipped = rect.intersection(&self.area);
        if clipped.is_empty() {
            return;
        }
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.patch_style(style);
                }
            }
        }
    }
}
