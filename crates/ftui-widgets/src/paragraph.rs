#![forbid(unsafe_code)]

//! `Paragraph`: renders a [`Text`] through the wrap/scroll/alignment
//! pipeline into a buffer, optionally wrapped in a [`Block`].

use ftui_core::geometry::Rect;
use ftui_render::Buffer;
use ftui_style::Style;
use ftui_text::{Alignment, Overflow, Text, align_x, cluster_width, graphemes, visible_lines};

use crate::block::Block;

/// A widget that renders multi-line styled text.
#[derive(Debug, Clone, Default)]
pub struct Paragraph<'a> {
    text: Text,
    block: Option<Block<'a>>,
    style: Style,
    overflow: Overflow,
    alignment: Alignment,
    scroll: usize,
}

impl<'a> Paragraph<'a> {
    #[must_use]
    pub fn new(text: impl Into<Text>) -> Self {
        Self {
            text: text.into(),
            block: None,
            style: Style::default(),
            overflow: Overflow::Clip,
            alignment: Alignment::Left,
            scroll: 0,
        }
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub const fn scroll(mut self, offset: usize) -> Self {
        self.scroll = offset;
        self
    }
}

impl crate::Widget for Paragraph<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        crate::set_style_area(buf, area, self.style);

        let text_area = match &self.block {
            Some(b) => {
                b.render(area, buf);
                b.inner(area)
            }
            None => area,
        };
        if text_area.is_empty() {
            return;
        }

        let lines = visible_lines(&self.text, text_area.width, self.overflow, self.scroll);
        for (row, line) in lines.iter().enumerate() {
            let y = text_area.y + row as u16;
            if y >= text_area.bottom() {
                break;
            }
            let x = align_x(
                text_area.x,
                text_area.width,
                line.width() as u16,
                self.alignment,
            );
            let mut cursor = x;
            for span in &line.spans {
                if cursor >= text_area.right() {
                    break;
                }
                let budget = (text_area.right() - cursor) as usize;
                let clipped = clip_to_width(&span.content, budget);
                buf.set_string(cursor, y, &clipped, self.style.patch(span.style));
                cursor += span.width() as u16;
            }
        }
    }
}

/// Grapheme-aware truncation to at most `budget` display-width cells,
/// never splitting a cluster. Needed because `Overflow::Clip` lines are a
/// pass-through (§ "clipping happens at write time, not here") — the
/// widget is the write site.
fn clip_to_width(s: &str, budget: usize) -> String {
    let mut w = 0usize;
    let mut out = String::new();
    for g in graphemes(s) {
        let gw = cluster_width(g);
        if w + gw > budget {
            break;
        }
        w += gw;
        out.push_str(g);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Widget as _;

    #[test]
    fn renders_plain_text_into_buffer() {
        let p = Paragraph::new("hi");
        let mut buf = Buffer::new(Rect::from_size(5, 1));
        p.render(Rect::from_size(5, 1), &mut buf);
        assert_eq!(buf.get(0, 0).unwrap().symbol(), "h");
        assert_eq!(buf.get(1, 0).unwrap().symbol(), "i");
    }

    #[test]
    fn zero_area_is_noop() {
        let p = Paragraph::new("hi");
        let mut buf = Buffer::new(Rect::from_size(5, 1));
        p.render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf.get(0, 0).unwrap().symbol(), " ");
    }

    #[test]
    fn word_wrap_produces_multiple_rows() {
        let p = Paragraph::new("hello world").overflow(Overflow::WrapWord);
        let mut buf = Buffer::new(Rect::from_size(5, 3));
        p.render(Rect::from_size(5, 3), &mut buf);
        assert_eq!(buf.get(0, 0).unwrap().symbol(), "h");
        assert_eq!(buf.get(0, 1).unwrap().symbol(), "w");
    }

    #[test]
    fn right_alignment_pushes_text_to_the_edge() {
        let p = Paragraph::new("hi").alignment(Alignment::Right);
        let mut buf = Buffer::new(Rect::from_size(5, 1));
        p.render(Rect::from_size(5, 1), &mut buf);
        assert_eq!(buf.get(3, 0).unwrap().symbol(), "h");
        assert_eq!(buf.get(4, 0).unwrap().symbol(), "i");
    }

    #[test]
    fn block_reserves_border_before_text() {
        let p = Paragraph::new("hi").block(Block::bordered());
        let mut buf = Buffer::new(Rect::from_size(5, 3));
        p.render(Rect::from_size(5, 3), &mut buf);
        assert_eq!(buf.get(1, 1).unwrap().symbol(), "h");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::Widget as _;
    use proptest::prelude::*;

    proptest! {
        // Property: rendering into a sub-area of a larger buffer never
        // touches a cell outside that sub-area, for arbitrary text and
        // arbitrary area placement/size — regardless of overflow policy.
        #[test]
        fn render_never_writes_outside_its_area(
            text in "[a-zA-Z0-9 ]{0,30}",
            buf_w in 1u16..20,
            buf_h in 1u16..10,
            ax in 0u16..20,
            ay in 0u16..10,
            aw in 0u16..20,
            ah in 0u16..10,
            overflow_idx in 0usize..6,
        ) {
            let overflow = [
                Overflow::Clip,
                Overflow::WrapChar,
                Overflow::WrapWord,
                Overflow::EllipsisEnd,
                Overflow::EllipsisStart,
                Overflow::EllipsisMiddle,
            ][overflow_idx];
            let buffer_area = Rect::from_size(buf_w, buf_h);
            let area = Rect::new(ax, ay, aw, ah);
            let mut buf = Buffer::new(buffer_area);
            Paragraph::new(text).overflow(overflow).render(area, &mut buf);

            for y in 0..buf_h {
                for x in 0..buf_w {
                    if !area.contains(x, y) {
                        prop_assert_eq!(
                            buf.get(x, y).unwrap().symbol(),
                            " ",
                            "cell ({}, {}) outside area {:?} was written",
                            x, y, area
                        );
                    }
                }
            }
        }
    }
}
