#![forbid(unsafe_code)]

//! `Table`: rows of styled text split into columns, with a selectable
//! highlighted row carried in [`TableState`].

use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Layout};
use ftui_render::Buffer;
use ftui_style::Style;
use ftui_text::{Overflow, Text, visible_lines};

use crate::Widget as _;
use crate::block::Block;

/// One row of a [`Table`]: a cell of [`Text`] per column.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<Text>,
    height: u16,
    style: Style,
    bottom_margin: u16,
}

impl Row {
    #[must_use]
    pub fn new(cells: impl IntoIterator<Item = impl Into<Text>>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            height: 1,
            style: Style::default(),
            bottom_margin: 0,
        }
    }

    #[must_use]
    pub const fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn bottom_margin(mut self, margin: u16) -> Self {
        self.bottom_margin = margin;
        self
    }
}

/// Mutable state for a [`Table`]: the selected row and the scroll offset of
/// the first visible row.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableState {
    pub selected: Option<usize>,
    pub offset: usize,
}

impl TableState {
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
        if index.is_none() {
            self.offset = 0;
        }
    }
}

/// A widget displaying rows of text split into columns by [`Constraint`]s.
#[derive(Debug, Clone, Default)]
pub struct Table<'a> {
    rows: Vec<Row>,
    widths: Vec<Constraint>,
    header: Option<Row>,
    block: Option<Block<'a>>,
    style: Style,
    highlight_style: Style,
    column_spacing: u16,
}

impl<'a> Table<'a> {
    #[must_use]
    pub fn new(
        rows: impl IntoIterator<Item = Row>,
        widths: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            widths: widths.into_iter().collect(),
            header: None,
            block: None,
            style: Style::default(),
            highlight_style: Style::default(),
            column_spacing: 1,
        }
    }

    #[must_use]
    pub fn header(mut self, header: Row) -> Self {
        self.header = Some(header);
        self
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
    pub const fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    #[must_use]
    pub const fn column_spacing(mut self, spacing: u16) -> Self {
        self.column_spacing = spacing;
        self
    }

    fn columns(&self, area: Rect) -> Vec<Rect> {
        Layout::horizontal(self.widths.clone())
            .spacing(self.column_spacing)
            .split(area)
    }

    fn render_row(&self, row: &Row, area: Rect, columns: &[Rect], buf: &mut Buffer, style: Style) {
        crate::set_style_area(buf, area, style);
        for (cell, &col) in row.cells.iter().zip(columns) {
            let col = Rect::new(
                col.x,
                area.y,
                col.width,
                area.height.min(col.height.max(row.height)),
            );
            let lines = visible_lines(cell, col.width, Overflow::Clip, 0);
            for (i, line) in lines.iter().enumerate() {
                let y = col.y + i as u16;
                if y >= col.bottom() {
                    break;
                }
                let mut x = col.x;
                for span in &line.spans {
                    buf.set_string(x, y, &span.content, style.patch(span.style));
                    x += span.width() as u16;
                }
            }
        }
    }
}

impl crate::Widget for Table<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut state = TableState::default();
        crate::StatefulWidget::render(self, area, buf, &mut state);
    }
}

impl<'a> crate::StatefulWidget for Table<'a> {
    type State = TableState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Table",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }

        let table_area = match &self.block {
            Some(b) => {
                b.render(area, buf);
                b.inner(area)
            }
            None => area,
        };
        if table_area.is_empty() {
            return;
        }
        crate::set_style_area(buf, table_area, self.style);

        let columns = self.columns(table_area);

        let header_height = self
            .header
            .as_ref()
            .map(|h| h.height.saturating_add(h.bottom_margin))
            .unwrap_or(0);
        if header_height > table_area.height {
            return;
        }

        if let Some(header) = &self.header {
            let header_area =
                Rect::new(table_area.x, table_area.y, table_area.width, header.height);
            self.render_row(header, header_area, &columns, buf, header.style);
        }

        if !self.rows.is_empty() {
            state.offset = state.offset.min(self.rows.len() - 1);
        } else {
            state.offset = 0;
        }

        let rows_top = table_area.y + header_height;
        let rows_bottom = table_area.bottom();
        let mut y = rows_top;
        for (i, row) in self.rows.iter().enumerate().skip(state.offset) {
            if y >= rows_bottom {
                break;
            }
            let row_area = Rect::new(
                table_area.x,
                y,
                table_area.width,
                row.height.min(rows_bottom - y),
            );
            let style = if state.selected == Some(i) {
                row.style.patch(self.highlight_style)
            } else {
                row.style
            };
            self.render_row(row, row_area, &columns, buf, style);
            y += row.height + row.bottom_margin;
        }
    }
}
