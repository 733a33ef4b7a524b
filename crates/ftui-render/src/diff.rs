#![forbid(unsafe_code)]

//! Minimal row-major diff between two buffers of identical area.

use crate::buffer::Buffer;
use crate::cell::Cell;

/// One cell that changed: its position and its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate<'a> {
    pub x: u16,
    pub y: u16,
    pub cell: &'a Cell,
}

/// Compute the minimal set of cell updates needed to turn `prev` into
/// `next`, in ascending row-major order. Unchanged cells are skipped, and a
/// continuation cell is never emitted on its own: it always travels with
/// its head, since a presenter can't usefully draw half a wide glyph.
///
/// Panics if the two buffers have different areas — callers resize both
/// buffers together before diffing.
#[must_use]
pub fn diff<'a>(prev: &Buffer, next: &'a Buffer) -> Vec<CellUpdate<'a>> {
    assert_eq!(
        prev.area(),
        next.area(),
        "diff requires both buffers to share an area"
    );
    let area = next.area();
    let width = area.width as usize;
    let prev_cells = prev.cells();
    let next_cells = next.cells();

    let mut updates = Vec::new();
    let mut x = 0usize;
    while x < prev_cells.len() {
        let row = x / width.max(1);
        let col = x % width.max(1);
        let changed = prev_cells[x] != next_cells[x];
        if changed && !next_cells[x].is_continuation() {
            updates.push(CellUpdate {
                x: area.x + col as u16,
                y: area.y + row as u16,
                cell: &next_cells[x],
            });
        } else if changed && next_cells[x].is_continuation() && col > 0 {
            // The head at col - 1 already changed too (a wide glyph always
            // writes head+continuation together), so it was already queued.
        }
        x += 1;
    }
    updates
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::cell::Cell;
    use ftui_core::geometry::Rect;
    use proptest::prelude::*;

    // Property: two buffers built the same way never diff against each other.
    #[test]
    fn identical_buffers_always_diff_empty() {
        proptest::proptest!(|(width in 1u16..40, height in 1u16..20, seed in 0u32..500)| {
            let area = Rect::from_size(width, height);
            let mut buf = Buffer::new(area);
            for i in 0..seed.min(u32::from(width) * u32::from(height)) {
                let x = (i % u32::from(width)) as u16;
                let y = (i / u32::from(width)) as u16;
                let ch = char::from_u32(u32::from(b'a') + i % 26).unwrap();
                buf.set(area.x + x, area.y + y, Cell::from_char(ch));
            }
            prop_assert!(diff(&buf, &buf.clone()).is_empty());
        });
    }

    // Property: flipping exactly one ASCII cell reports exactly one update,
    // at that cell's coordinates, carrying the new symbol.
    #[test]
    fn single_ascii_cell_change_reports_exactly_one_update(
    ) {
        proptest::proptest!(|(
            width in 1u16..40,
            height in 1u16..20,
            tx in 0u16..40,
            ty in 0u16..20,
            ch in "[a-zA-Z0-9]",
        )| {
            let area = Rect::from_size(width, height);
            prop_assume!(tx < width && ty < height);
            let prev = Buffer::new(area);
            let mut next = prev.clone();
            let c = ch.chars().next().unwrap();
            next.set(area.x + tx, area.y + ty, Cell::from_char(c));

            let updates = diff(&prev, &next);
            prop_assert_eq!(updates.len(), 1);
            prop_assert_eq!(updates[0].x, area.x + tx);
            prop_assert_eq!(updates[0].y, area.y + ty);
            prop_assert_eq!(updates[0].cell.symbol(), c.to_string());
        });
    }

    // Property: every reported update is a position where prev and next
    // genuinely differ (no spurious reports).
    #[test]
    fn every_reported_update_is_a_real_difference() {
        proptest::proptest!(|(
            width in 2u16..30,
            height in 2u16..15,
            changes in prop::collection::vec((0u16..30, 0u16..15, "[a-z]"), 0..20),
        )| {
            let area = Rect::from_size(width, height);
            let prev = Buffer::new(area);
            let mut next = prev.clone();
            for (x, y, s) in &changes {
                if *x < width && *y < height {
                    let c = s.chars().next().unwrap_or(' ');
                    next.set(area.x + x, area.y + y, Cell::from_char(c));
                }
            }
            let updates = diff(&prev, &next);
            for u in &updates {
                prop_assert_ne!(prev.get(u.x, u.y), next.get(u.x, u.y));
            }
        });
    }
}
