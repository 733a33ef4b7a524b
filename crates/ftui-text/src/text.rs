#![forbid(unsafe_code)]

//! `Text` = lines of styled spans — the input to the paragraph pipeline.

use crate::width::str_width;
use ftui_style::Style;

/// A single styled run of text within a [`Line`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub content: String,
    pub style: Style,
}

impl Span {
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        str_width(&self.content)
    }
}

/// A single logical line: an ordered sequence of spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(content)],
        }
    }

    #[must_use]
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    #[must_use]
    pub fn to_plain_string(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }

    /// Style inherited by a derived line (ellipsis, a wrap continuation with
    /// no spans of its own): the first span's style, or the default.
    #[must_use]
    pub fn first_style(&self) -> Style {
        self.spans.first().map(|s| s.style).unwrap_or_default()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line::raw(s)
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Line::raw(s)
    }
}

/// `Text` = an ordered list of [`Line`]s, the paragraph widget's input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub lines: Vec<Line>,
}

impl Text {
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            lines: content.lines().map(Line::raw).collect(),
        }
    }

    #[must_use]
    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::raw(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::raw(s)
    }
}
