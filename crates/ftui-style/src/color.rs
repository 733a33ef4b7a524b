#![forbid(unsafe_code)]

//! Color representation: none, 16 named, 8-bit palette, or 24-bit RGB.

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// 8-bit indexed palette color (0-255).
    Indexed(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Render the SGR parameter sequence for this color as a foreground
    /// (`fg = true`) or background color, appended to `out` without a
    /// leading/trailing `;`.
    pub fn write_sgr(self, out: &mut String, fg: bool) {
        use std::fmt::Write as _;
        let base16 = if fg { 30 } else { 40 };
        let bright16 = if fg { 90 } else { 100 };
        match self {
            Color::Black => write!(out, "{base16}").unwrap(),
            Color::Red => write!(out, "{}", base16 + 1).unwrap(),
            Color::Green => write!(out, "{}", base16 + 2).unwrap(),
            Color::Yellow => write!(out, "{}", base16 + 3).unwrap(),
            Color::Blue => write!(out, "{}", base16 + 4).unwrap(),
            Color::Magenta => write!(out, "{}", base16 + 5).unwrap(),
            Color::Cyan => write!(out, "{}", base16 + 6).unwrap(),
            Color::White => write!(out, "{}", base16 + 7).unwrap(),
            Color::BrightBlack => write!(out, "{bright16}").unwrap(),
            Color::BrightRed => write!(out, "{}", bright16 + 1).unwrap(),
            Color::BrightGreen => write!(out, "{}", bright16 + 2).unwrap(),
            Color::BrightYellow => write!(out, "{}", bright16 + 3).unwrap(),
            Color::BrightBlue => write!(out, "{}", bright16 + 4).unwrap(),
            Color::BrightMagenta => write!(out, "{}", bright16 + 5).unwrap(),
            Color::BrightCyan => write!(out, "{}", bright16 + 6).unwrap(),
            Color::BrightWhite => write!(out, "{}", bright16 + 7).unwrap(),
            Color::Indexed(n) => {
                let group = if fg { 38 } else { 48 };
                write!(out, "{group};5;{n}").unwrap();
            }
            Color::Rgb(r, g, b) => {
                let group = if fg { 38 } else { 48 };
                write!(out, "{group};2;{r};{g};{b}").unwrap();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_fg_uses_30_range() {
        let mut s = String::new();
        Color::Red.write_sgr(&mut s, true);
        assert_eq!(s, "31");
    }

    #[test]
    fn named_bg_uses_40_range() {
        let mut s = String::new();
        Color::Red.write_sgr(&mut s, false);
        assert_eq!(s, "41");
    }

    #[test]
    fn bright_fg_uses_90_range() {
        let mut s = String::new();
        Color::BrightCyan.write_sgr(&mut s, true);
        assert_eq!(s, "96");
    }

    #[test]
    fn indexed_fg() {
        let mut s = String::new();
        Color::Indexed(200).write_sgr(&mut s, true);
        assert_eq!(s, "38;5;200");
    }

    #[test]
    fn rgb_bg() {
        let mut s = String::new();
        Color::Rgb(1, 2, 3).write_sgr(&mut s, false);
        assert_eq!(s, "48;2;1;2;3");
    }
}
