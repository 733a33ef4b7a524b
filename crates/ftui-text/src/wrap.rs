#![forbid(unsafe_code)]

//! Overflow handling: clip, character/word wrap, and three-position ellipsis.

use crate::text::{Line, Span};
use crate::width::{cluster_width, graphemes};
use ftui_style::Style;

/// How a line wider than the target width should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Clip,
    WrapChar,
    WrapWord,
    EllipsisEnd,
    EllipsisStart,
    EllipsisMiddle,
}

/// One grapheme cluster tagged with the style of the span it came from.
struct Glyph<'a> {
    text: &'a str,
    width: usize,
    style: Style,
}

fn flatten(line: &Line) -> Vec<Glyph<'_>> {
    let mut out = Vec::new();
    for span in &line.spans {
        for g in graphemes(&span.content) {
            out.push(Glyph {
                text: g,
                width: cluster_width(g),
                style: span.style,
            });
        }
    }
    out
}

fn glyphs_to_line(glyphs: &[Glyph<'_>]) -> Line {
    let mut spans: Vec<Span> = Vec::new();
    for g in glyphs {
        if let Some(last) = spans.last_mut()
            && last.style == g.style
        {
            last.content.push_str(g.text);
            continue;
        }
        spans.push(Span::styled(g.text.to_string(), g.style));
    }
    Line::from_spans(spans)
}

/// Produce the display-line sequence for one source `line` at `width`
/// cells, per the overflow policy. `Clip` is a pass-through: clipping
/// happens at write time, not here.
#[must_use]
pub fn process_line(line: &Line, width: usize, overflow: Overflow) -> Vec<Line> {
    if width == 0 {
        return vec![line.clone()];
    }
    match overflow {
        Overflow::Clip => vec![line.clone()],
        Overflow::WrapChar => wrap_char(line, width),
        Overflow::WrapWord => wrap_word(line, width),
        Overflow::EllipsisEnd | Overflow::EllipsisStart | Overflow::EllipsisMiddle => {
            vec![ellipsis_line(line, width, overflow)]
        }
    }
}

fn wrap_char(line: &Line, width: usize) -> Vec<Line> {
    let glyphs = flatten(line);
    if glyphs.is_empty() {
        return vec![line.clone()];
    }
    let mut out = Vec::new();
    let mut start = 0usize;
    while start < glyphs.len() {
        let mut w = 0usize;
        let mut end = start;
        while end < glyphs.len() {
            let gw = glyphs[end].width;
            if w + gw > width && end > start {
                break;
            }
            w += gw;
            end += 1;
            if w >= width {
                break;
            }
        }
        out.push(glyphs_to_line(&glyphs[start..end]));
        start = end;
    }
    if out.is_empty() {
        out.push(Line::default());
    }
    out
}

fn is_unicode_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace) && !s.is_empty()
}

fn wrap_word(line: &Line, width: usize) -> Vec<Line> {
    let glyphs = flatten(line);
    if glyphs.is_empty() {
        return vec![line.clone()];
    }

    // Group glyphs into tokens split on whitespace-transition boundaries;
    // each token retains its glyphs so we can char-wrap oversized ones.
    let mut tokens: Vec<Vec<usize>> = Vec::new();
    let mut cur: Vec<usize> = Vec::new();
    let mut cur_is_space: Option<bool> = None;
    for (i, g) in glyphs.iter().enumerate() {
        let is_space = is_unicode_whitespace(g.text);
        if cur_is_space == Some(is_space) || cur_is_space.is_none() {
            cur.push(i);
            cur_is_space = Some(is_space);
        } else {
            tokens.push(std::mem::take(&mut cur));
            cur.push(i);
            cur_is_space = Some(is_space);
        }
    }
    if !cur.is_empty() {
        tokens.push(cur);
    }

    let mut out_lines: Vec<Vec<usize>> = vec![Vec::new()];
    let mut cur_width = 0usize;

    for token in tokens {
        let token_is_space = is_unicode_whitespace(glyphs[token[0]].text);
        let token_width: usize = token.iter().map(|&i| glyphs[i].width).sum();

        if token_width > width {
            // Token itself exceeds the width: flush current line, then
            // character-wrap this token across as many lines as needed.
            if !out_lines.last().unwrap().is_empty() {
                out_lines.push(Vec::new());
            }
            let mut chunk = Vec::new();
            let mut w = 0usize;
            for &i in &token {
                let gw = glyphs[i].width;
                if w + gw > width && !chunk.is_empty() {
                    out_lines.push(std::mem::take(&mut chunk));
                    w = 0;
                }
                chunk.push(i);
                w += gw;
            }
            if !chunk.is_empty() {
                out_lines.push(chunk);
            }
            out_lines.push(Vec::new());
            cur_width = 0;
            continue;
        }

        if cur_width + token_width > width {
            out_lines.push(Vec::new());
            cur_width = 0;
            if token_is_space {
                // Leading whitespace on a continuation line is dropped.
                continue;
            }
        }

        out_lines.last_mut().unwrap().extend(token.iter().copied());
        cur_width += token_width;
    }

    // Strip trailing whitespace glyphs from each completed line, and drop
    // empty trailing lines produced by the flushing logic above.
    let mut result: Vec<Line> = Vec::new();
    for indices in out_lines {
        let mut indices = indices;
        while let Some(&last) = indices.last() {
            if is_unicode_whitespace(glyphs[last].text) {
                indices.pop();
            } else {
                break;
            }
        }
        if indices.is_empty() && result.len() == 1 {
            // keep a single empty line for genuinely empty input
        }
        let selected: Vec<&Glyph> = indices.iter().map(|&i| &glyphs[i]).collect();
        let owned: Vec<Glyph> = selected
            .into_iter()
            .map(|g| Glyph {
                text: g.text,
                width: g.width,
                style: g.style,
            })
            .collect();
        result.push(glyphs_to_line(&owned));
    }
    // Drop lines that are fully empty except keep at least one.
    result.retain(|l| !l.spans.is_empty());
    if result.is_empty() {
        result.push(Line::default());
    }
    result
}

fn ellipsis_line(line: &Line, width: usize, overflow: Overflow) -> Line {
    let plain = line.to_plain_string();
    let style = line.first_style();
    let total_width = crate::width::str_width(&plain);
    if total_width <= width {
        return line.clone();
    }

    const DOTS: &str = "...";
    let available = width.saturating_sub(3);
    if available == 0 {
        return clip_to_width(&plain, width, style);
    }

    let clusters = graphemes(&plain);
    let result = match overflow {
        Overflow::EllipsisEnd => {
            let prefix = take_width(&clusters, available, false);
            format!("{prefix}{DOTS}")
        }
        Overflow::EllipsisStart => {
            let suffix = take_width(&clusters, available, true);
            format!("{DOTS}{suffix}")
        }
        Overflow::EllipsisMiddle => {
            let head = available.div_ceil(2);
            let tail = available / 2;
            let prefix = take_width(&clusters, head, false);
            let suffix = take_width(&clusters, tail, true);
            format!("{prefix}{DOTS}{suffix}")
        }
        _ => unreachable!("ellipsis_line only called for ellipsis overflow modes"),
    };

    Line::from_spans(vec![Span::styled(result, style)])
}

/// Take graphemes from the front (`from_end = false`) or back (`true`) of
/// `clusters` up to `budget` display-width cells, without splitting a
/// cluster.
fn take_width(clusters: &[&str], budget: usize, from_end: bool) -> String {
    let mut w = 0usize;
    let mut picked: Vec<&str> = Vec::new();
    let iter: Box<dyn Iterator<Item = &&str>> = if from_end {
        Box::new(clusters.iter().rev())
    } else {
        Box::new(clusters.iter())
    };
    for g in iter {
        let gw = cluster_width(g);
        if w + gw > budget {
            break;
        }
        w += gw;
        picked.push(g);
    }
    if from_end {
        picked.reverse();
    }
    picked.into_iter().collect()
}

fn clip_to_width(plain: &str, width: usize, style: Style) -> Line {
    let clusters = graphemes(plain);
    let clipped = take_width(&clusters, width, false);
    Line::from_spans(vec![Span::styled(clipped, style)])
}
