#![forbid(unsafe_code)]

//! Cell: the smallest addressable unit of the grid.
//!
//! A cell is either a stand-alone glyph occupying one column, or the head of
//! a wide-glyph pair whose second column is carried by a continuation cell
//! with an empty symbol and the head's style.

use ftui_style::Style;
use smallvec::SmallVec;

/// Inline-storage UTF-8 symbol: a grapheme cluster is almost always a
/// handful of bytes, so this avoids a heap allocation per cell in the
/// common case while still handling longer clusters (flag emoji, ZWJ
/// sequences) by spilling to the heap.
pub type Symbol = SmallVec<[u8; 8]>;

/// One cell of the terminal grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    symbol: Symbol,
    pub style: Style,
    /// Display width of `symbol`: 0, 1, or 2.
    width: u8,
    /// Set on the second cell of a wide glyph pair.
    continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

impl Cell {
    /// A single space with empty style — the default cell.
    #[must_use]
    pub fn blank() -> Self {
        let mut symbol = Symbol::new();
        symbol.push(b' ');
        Self {
            symbol,
            style: Style::default(),
            width: 1,
            continuation: false,
        }
    }

    /// The continuation half of a wide glyph: empty symbol, same style.
    #[must_use]
    pub fn continuation_of(style: Style) -> Self {
        Self {
            symbol: Symbol::new(),
            style,
            width: 0,
            continuation: true,
        }
    }

    /// Construct a head cell holding `symbol` (a single grapheme cluster) of
    /// the given display `width` (1 or 2).
    #[must_use]
    pub fn new(symbol: &str, width: u8, style: Style) -> Self {
        let mut s = Symbol::new();
        s.extend_from_slice(symbol.as_bytes());
        Self {
            symbol: s,
            style,
            width,
            continuation: false,
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Self {
        let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) as u8;
        let mut buf = [0u8; 4];
        Self::new(c.encode_utf8(&mut buf), width, Style::default())
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        // SAFETY-free: constructed only from valid UTF-8 slices.
        std::str::from_utf8(&self.symbol).unwrap_or("")
    }

    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// Patch this cell's style in place, leaving the symbol untouched.
    pub fn patch_style(&mut self, style: Style) {
        self.style = self.style.patch(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_single_space() {
        let c = Cell::blank();
        assert_eq!(c.symbol(), " ");
        assert_eq!(c.width(), 1);
        assert!(!c.is_continuation());
    }

    #[test]
    fn continuation_has_empty_symbol_and_same_style() {
        let style = Style::new().bold();
        let c = Cell::continuation_of(style);
        assert_eq!(c.symbol(), "");
        assert_eq!(c.style, style);
        assert!(c.is_continuation());
    }

    #[test]
    fn from_char_wide_has_width_two() {
        let c = Cell::from_char('世');
        assert_eq!(c.width(), 2);
    }
}
