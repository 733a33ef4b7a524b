#![forbid(unsafe_code)]

//! `Block`: a bordered, titled container other widgets render into.

use bitflags::bitflags;

use ftui_core::geometry::Rect;
use ftui_render::{Buffer, Cell};
use ftui_style::Style;
use ftui_text::Alignment;

bitflags! {
    /// Which edges of a [`Block`] to draw.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Borders: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// The glyphs used to draw a block's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderSet {
    /// Single-line box-drawing glyphs (`┌─┐│└┘`).
    pub const PLAIN: Self = Self {
        horizontal: '─',
        vertical: '│',
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
    };

    /// Rounded-corner box-drawing glyphs.
    pub const ROUNDED: Self = Self {
        horizontal: '─',
        vertical: '│',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
    };

    /// Plain ASCII, for terminals without Unicode line-drawing support.
    pub const ASCII: Self = Self {
        horizontal: '-',
        vertical: '|',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
    };
}

impl Default for BorderSet {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// A bordered container with an optional title, rendered before its content
/// widget recurses into [`Block::inner`].
#[derive(Debug, Clone, Default)]
pub struct Block<'a> {
    borders: Borders,
    border_style: Style,
    border_set: BorderSet,
    title: Option<&'a str>,
    title_alignment: Alignment,
    style: Style,
}

impl Default for Borders {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> Block<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    #[must_use]
    pub const fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    #[must_use]
    pub const fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub const fn border_set(mut self, set: BorderSet) -> Self {
        self.border_set = set;
        self
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub const fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The sub-rectangle inside this block's borders.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }

    fn border_cell(&self, c: char) -> Cell {
        Cell::new(c.encode_utf8(&mut [0u8; 4]), 1, self.border_style)
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.title else { return };
        if !self.borders.contains(Borders::TOP) || area.width == 0 {
            return;
        }
        let width = ftui_text::str_width(title) as u16;
        let x = ftui_text::align_x(area.x, area.width, width, self.title_alignment);
        buf.set_string(x, area.y, title, self.border_style);
    }
}

impl crate::Widget for Block<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        crate::set_style_area(buf, area, self.style);

        if self.borders.contains(Borders::LEFT) {
            for y in area.y..area.bottom() {
                buf.set(area.x, y, self.border_cell(self.border_set.vertical));
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            let x = area.right() - 1;
            for y in area.y..area.bottom() {
                buf.set(x, y, self.border_cell(self.border_set.vertical));
            }
        }
        if self.borders.contains(Borders::TOP) {
            for x in area.x..area.right() {
                buf.set(x, area.y, self.border_cell(self.border_set.horizontal));
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            let y = area.bottom() - 1;
            for x in area.x..area.right() {
                buf.set(x, y, self.border_cell(self.border_set.horizontal));
            }
        }

        if self.borders.contains(Borders::LEFT | Borders::TOP) {
            buf.set(area.x, area.y, self.border_cell(self.border_set.top_left));
        }
        if self.borders.contains(Borders::RIGHT | Borders::TOP) {
            buf.set(
                area.right() - 1,
                area.y,
                self.border_cell(self.border_set.top_right),
            );
        }
        if self.borders.contains(Borders::LEFT | Borders::BOTTOM) {
            buf.set(
                area.x,
                area.bottom() - 1,
                self.border_cell(self.border_set.bottom_left),
            );
        }
        if self.borders.contains(Borders::RIGHT | Borders::BOTTOM) {
            buf.set(
                area.right() - 1,
                area.bottom() - 1,
                self.border_cell(self.border_set.bottom_right),
            );
        }

        self.render_title(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Widget;

    #[test]
    fn inner_shrinks_by_each_present_border() {
        let block = Block::bordered();
        let inner = block.inner(Rect::from_size(10, 5));
        assert_eq!(inner, Rect::new(1, 1, 8, 3));
    }

    #[test]
    fn inner_without_borders_is_identity() {
        let block = Block::new();
        let area = Rect::from_size(10, 5);
        assert_eq!(block.inner(area), area);
    }

    #[test]
    fn renders_corners_and_edges() {
        let block = Block::bordered();
        let mut buf = Buffer::new(Rect::from_size(4, 3));
        block.render(Rect::from_size(4, 3), &mut buf);
        assert_eq!(buf.get(0, 0).unwrap().symbol(), "┌");
        assert_eq!(buf.get(3, 0).unwrap().symbol(), "┐");
        assert_eq!(buf.get(0, 2).unwrap().symbol(), "└");
        assert_eq!(buf.get(3, 2).unwrap().symbol(), "┘");
        assert_eq!(buf.get(1, 0).unwrap().symbol(), "─");
        assert_eq!(buf.get(0, 1).unwrap().symbol(), "│");
    }

    #[test]
    fn empty_area_is_noop() {
        let block = Block::bordered();
        let mut buf = Buffer::new(Rect::from_size(4, 3));
        block.render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf.get(0, 0).unwrap().symbol(), " ");
    }
}
