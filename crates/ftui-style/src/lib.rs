#![forbid(unsafe_code)]

//! Color and style: fg/bg colors plus a modifier bitfield with the
//! add/remove-mask patch semantics described in the data model.

pub mod color;

pub use color::Color;

use bitflags::bitflags;

bitflags! {
    /// Text attribute modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifier: u16 {
        const BOLD          = 0b0000_0000_0001;
        const DIM           = 0b0000_0000_0010;
        const ITALIC        = 0b0000_0000_0100;
        const UNDERLINED    = 0b0000_0000_1000;
        const SLOW_BLINK    = 0b0000_0001_0000;
        const RAPID_BLINK   = 0b0000_0010_0000;
        const REVERSED      = 0b0000_0100_0000;
        const CROSSED_OUT   = 0b0000_1000_0000;
        const HIDDEN        = 0b0001_0000_0000;
    }
}

/// A style patch: foreground/background colors plus add/remove modifier
/// masks. `Style` values are immutable and compare structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub add_modifier: Modifier,
    pub remove_modifier: Modifier,
}

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            add_modifier: Modifier::empty(),
            remove_modifier: Modifier::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.add_modifier |= modifier;
        self.remove_modifier -= modifier;
        self
    }

    #[must_use]
    pub fn remove_modifier(mut self, modifier: Modifier) -> Self {
        self.remove_modifier |= modifier;
        self.add_modifier -= modifier;
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn underlined(self) -> Self {
        self.add_modifier(Modifier::UNDERLINED)
    }

    /// Combine `self` with `other`: `other`'s colors win where set; modifier
    /// masks compose so that applying `other` on top of `self` yields the
    /// same effective modifiers as applying them in sequence to a blank
    /// style.
    #[must_use]
    pub fn patch(mut self, other: Style) -> Self {
        if other.fg.is_some() {
            self.fg = other.fg;
        }
        if other.bg.is_some() {
            self.bg = other.bg;
        }
        self.add_modifier = (self.add_modifier - other.remove_modifier) | other.add_modifier;
        self.remove_modifier = (self.remove_modifier - other.add_modifier) | other.remove_modifier;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_with_empty_is_identity_on_both_sides() {
        let s = Style::new().fg(Color::Red).bold();
        assert_eq!(s.patch(Style::default()), s);
        assert_eq!(Style::default().patch(s), s);
    }

    #[test]
    fn patch_is_idempotent() {
        let s = Style::new().fg(Color::Blue).bold().underlined();
        assert_eq!(s.patch(s), s);
    }

    #[test]
    fn later_fg_wins_when_set() {
        let a = Style::new().fg(Color::Red);
        let b = Style::new().fg(Color::Blue);
        assert_eq!(a.patch(b).fg, Some(Color::Blue));
    }

    #[test]
    fn unset_fg_in_patch_keeps_original() {
        let a = Style::new().fg(Color::Red);
        let b = Style::new();
        assert_eq!(a.patch(b).fg, Some(Color::Red));
    }

    #[test]
    fn remove_modifier_in_patch_clears_add() {
        let a = Style::new().bold();
        let b = Style::new().remove_modifier(Modifier::BOLD);
        let patched = a.patch(b);
        assert!(!patched.add_modifier.contains(Modifier::BOLD));
        assert!(patched.remove_modifier.contains(Modifier::BOLD));
    }
}
