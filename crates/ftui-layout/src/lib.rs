#![forbid(unsafe_code)]
//! A 1-D constraint solver: split a `Rect` along one axis into non-overlapping
//! sub-rectangles.

mod solve;

pub use ftui_core::geometry::Rect;
use solve::solve_axis;

/// A constraint on one segment's length along the split axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// An exact length in cells.
    Length(u16),
    /// A percentage of the available length, 0..=100.
    Percentage(u16),
    /// A ratio of the available length, `numerator / denominator`.
    Ratio(u32, u32),
    /// A minimum length; grows to absorb leftover space.
    Min(u16),
    /// A maximum length, clamped by the available length.
    Max(u16),
    /// Fills leftover space proportionally to its weight.
    Fill(u16),
}

/// Which axis a [`Layout`] splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

/// A reusable split configuration: a direction, a constraint list, and the
/// spacing inserted between adjacent segments.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    direction: Direction,
    constraints: Vec<Constraint>,
    spacing: u16,
}

impl Layout {
    #[must_use]
    pub fn horizontal(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self {
            direction: Direction::Horizontal,
            constraints: constraints.into_iter().collect(),
            spacing: 0,
        }
    }

    #[must_use]
    pub fn vertical(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self {
            direction: Direction::Vertical,
            constraints: constraints.into_iter().collect(),
            spacing: 0,
        }
    }

    #[must_use]
    pub const fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Split `area` into one sub-rectangle per constraint, in order, along
    /// this layout's axis. The other axis is left at `area`'s full extent.
    #[must_use]
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        if self.constraints.is_empty() {
            return Vec::new();
        }
        let total = match self.direction {
            Direction::Horizontal => area.width,
            Direction::Vertical => area.height,
        };
        let sizes = solve_axis(&self.constraints, total, self.spacing);

        let mut rects = Vec::with_capacity(sizes.len());
        let mut cursor = match self.direction {
            Direction::Horizontal => area.x,
            Direction::Vertical => area.y,
        };
        for (i, &size) in sizes.iter().enumerate() {
            let rect = match self.direction {
                Direction::Horizontal => Rect::new(cursor, area.y, size, area.height),
                Direction::Vertical => Rect::new(area.x, cursor, area.width, size),
            };
            rects.push(rect);
            cursor = cursor.saturating_add(size);
            if i + 1 < sizes.len() {
                cursor = cursor.saturating_add(self.spacing);
            }
        }
        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_mixed_constraints_scenario() {
        // width 20: [Length(3), Percentage(50), Fill(1), Length(5)], spacing 0
        let layout = Layout::horizontal([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Fill(1),
            Constraint::Length(5),
        ]);
        let rects = layout.split(Rect::from_size(20, 1));
        let widths: Vec<u16> = rects.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![3, 10, 2, 5]);
    }

    #[test]
    fn empty_constraints_yields_empty_vec() {
        let layout = Layout::horizontal([]);
        assert!(layout.split(Rect::from_size(10, 1)).is_empty());
    }

    #[test]
    fn segments_are_contiguous_with_spacing() {
        let layout = Layout::horizontal([Constraint::Length(5), Constraint::Length(5)]).spacing(2);
        let rects = layout.split(Rect::from_size(20, 1));
        assert_eq!(rects[0], Rect::new(0, 0, 5, 1));
        assert_eq!(rects[1], Rect::new(7, 0, 5, 1));
    }

    #[test]
    fn vertical_split_uses_height() {
        let layout = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]);
        let rects = layout.split(Rect::from_size(10, 10));
        assert_eq!(rects[0], Rect::new(0, 0, 10, 3));
        assert_eq!(rects[1], Rect::new(0, 3, 10, 7));
    }

    #[test]
    fn oversubscribed_min_never_shrinks_below_length() {
        // Min is highest priority; Length shrinks before it.
        let layout = Layout::horizontal([Constraint::Min(20), Constraint::Length(20)]);
        let rects = layout.split(Rect::from_size(30, 1));
        assert_eq!(rects[0].width, 20);
        assert_eq!(rects[1].width, 10);
    }

    #[test]
    fn fill_shrinks_first_under_oversubscription() {
        let layout = Layout::horizontal([Constraint::Length(10), Constraint::Fill(1)]);
        let rects = layout.split(Rect::from_size(5, 1));
        assert_eq!(rects[0].width, 5);
        assert_eq!(rects[1].width, 0);
    }

    #[test]
    fn total_width_never_exceeds_available() {
        let layout = Layout::horizontal([
            Constraint::Length(30),
            Constraint::Percentage(50),
            Constraint::Min(20),
        ]);
        for total in [10u16, 50, 100, 255] {
            let rects = layout.split(Rect::from_size(total, 1));
            let sum: u32 = rects.iter().map(|r| r.width as u32).sum();
            assert!(sum <= total as u32);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn constraint_strategy() -> impl Strategy<Value = Constraint> {
        prop_oneof![
            (0u16..60).prop_map(Constraint::Length),
            (0u16..100).prop_map(Constraint::Percentage),
            (1u32..10, 1u32..10).prop_map(|(a, b)| Constraint::Ratio(a, b)),
            (0u16..60).prop_map(Constraint::Min),
            (0u16..60).prop_map(Constraint::Max),
            (1u16..5).prop_map(Constraint::Fill),
        ]
    }

    proptest! {
        // Property: split never hands out more cells than the area has,
        // for any mix of constraints and any total.
        #[test]
        fn split_never_exceeds_total_width(
            constraints in prop::collection::vec(constraint_strategy(), 0..6),
            total in 0u16..200,
            spacing in 0u16..5,
        ) {
            let layout = Layout::horizontal(constraints).spacing(spacing);
            let rects = layout.split(Rect::from_size(total, 1));
            let sum: u32 = rects.iter().map(|r| u32::from(r.width)).sum();
            prop_assert!(sum <= u32::from(total));
        }

        // Property: segments never overlap and appear left-to-right in order.
        #[test]
        fn split_segments_are_ordered_and_non_overlapping(
            constraints in prop::collection::vec(constraint_strategy(), 1..6),
            total in 1u16..200,
            spacing in 0u16..5,
        ) {
            let layout = Layout::horizontal(constraints).spacing(spacing);
            let rects = layout.split(Rect::from_size(total, 1));
            for pair in rects.windows(2) {
                prop_assert!(pair[0].x + pair[0].width <= pair[1].x);
            }
        }

        // Property: at least one Fill constraint absorbs all leftover space,
        // so the segments sum to exactly the available length (minus spacing).
        #[test]
        fn fill_constraint_consumes_all_leftover_space(
            total in 1u16..200,
            spacing in 0u16..5,
            fill_weight in 1u16..5,
        ) {
            let layout = Layout::horizontal([Constraint::Fill(fill_weight)]).spacing(spacing);
            let rects = layout.split(Rect::from_size(total, 1));
            prop_assert_eq!(rects[0].width, total);
        }
    }
}
