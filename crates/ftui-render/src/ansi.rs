#![forbid(unsafe_code)]

//! ANSI/ECMA-48 escape sequence generation.
//!
//! Pure byte-generation helpers; no state tracking. The presenter owns state
//! tracking and decides when each sequence is actually needed.

use std::io::{self, Write};

use ftui_style::{Color, Modifier};

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

struct SgrCodes {
    on: u8,
    off: u8,
}

const fn codes_for(modifier: Modifier) -> Option<SgrCodes> {
    match modifier.bits() {
        0b0000_0001 => Some(SgrCodes { on: 1, off: 22 }), // BOLD
        0b0000_0010 => Some(SgrCodes { on: 2, off: 22 }), // DIM
        0b0000_0100 => Some(SgrCodes { on: 3, off: 23 }), // ITALIC
        0b0000_1000 => Some(SgrCodes { on: 4, off: 24 }), // UNDERLINED
        0b0001_0000 => Some(SgrCodes { on: 5, off: 25 }), // SLOW_BLINK
        0b0010_0000 => Some(SgrCodes { on: 6, off: 25 }), // RAPID_BLINK
        0b0100_0000 => Some(SgrCodes { on: 7, off: 27 }), // REVERSED
        0b1000_0000 => Some(SgrCodes { on: 9, off: 29 }), // CROSSED_OUT
        0b1_0000_0000 => Some(SgrCodes { on: 8, off: 28 }), // HIDDEN
        _ => None,
    }
}

/// Write an SGR sequence enabling every flag set in `modifier`.
pub fn sgr_modifier_on<W: Write>(w: &mut W, modifier: Modifier) -> io::Result<()> {
    write_codes(w, modifier, |c| c.on)
}

/// Write an SGR sequence disabling every flag set in `modifier`.
pub fn sgr_modifier_off<W: Write>(w: &mut W, modifier: Modifier) -> io::Result<()> {
    write_codes(w, modifier, |c| c.off)
}

fn write_codes<W: Write>(
    w: &mut W,
    modifier: Modifier,
    pick: impl Fn(&SgrCodes) -> u8,
) -> io::Result<()> {
    if modifier.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut first = true;
    for flag in modifier.iter() {
        if let Some(codes) = codes_for(flag) {
            if !first {
                w.write_all(b";")?;
            }
            write!(w, "{}", pick(&codes))?;
            first = false;
        }
    }
    w.write_all(b"m")
}

/// Write the SGR sequence selecting `color` as foreground or background.
pub fn sgr_color<W: Write>(w: &mut W, color: Color, fg: bool) -> io::Result<()> {
    let mut s = String::from("\x1b[");
    color.write_sgr(&mut s, fg);
    s.push('m');
    w.write_all(s.as_bytes())
}

/// Default foreground: `CSI 39 m`
pub fn sgr_fg_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[39m")
}

/// Default background: `CSI 49 m`
pub fn sgr_bg_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[49m")
}

/// CUP (Cursor Position): `CSI row ; col H`, 0-indexed input.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", row + 1, col + 1)
}

pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_HIDE)
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SHOW)
}

/// ED (Erase Display), entire screen: `CSI 2 J`
pub const ERASE_DISPLAY_ALL: &[u8] = b"\x1b[2J";

#[inline]
pub fn erase_display_all<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ERASE_DISPLAY_ALL)
}

pub const CURSOR_SAVE: &[u8] = b"\x1b[s";
pub const CURSOR_RESTORE: &[u8] = b"\x1b[u";

#[inline]
pub fn cursor_save<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SAVE)
}

#[inline]
pub fn cursor_restore<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_RESTORE)
}

/// EL (Erase Line), from cursor to end: `CSI K`
pub const ERASE_LINE: &[u8] = b"\x1b[K";

#[inline]
pub fn erase_line<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ERASE_LINE)
}

/// CUU (Cursor Up) by `n` rows.
pub fn cursor_up<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n > 0 {
        write!(w, "\x1b[{n}A")?;
    }
    Ok(())
}

pub const ALT_SCREEN_ENTER: &[u8] = b"\x1b[?1049h";
pub const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";

#[inline]
pub fn alt_screen_enter<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_ENTER)
}

#[inline]
pub fn alt_screen_leave<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_LEAVE)
}

pub const MOUSE_ENABLE: &[u8] = b"\x1b[?1000h\x1b[?1006h";
pub const MOUSE_DISABLE: &[u8] = b"\x1b[?1006l\x1b[?1000l";

#[inline]
pub fn mouse_enable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(MOUSE_ENABLE)
}

#[inline]
pub fn mouse_disable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(MOUSE_DISABLE)
}
