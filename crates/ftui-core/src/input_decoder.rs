#![forbid(unsafe_code)]

//! Input decoder: byte stream to typed [`Event`]s.
//!
//! The decoder is a small state machine fed one byte at a time. It never
//! fails: a malformed sequence becomes `Key(KeyCode::Unknown)` rather than an
//! error (§7, `DecoderRecoverable`). Pulling bytes from a backend with
//! timeouts (the `read_event` surface) is the event loop's job, not the
//! decoder's — this module only turns bytes already in hand into events.

use crate::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// DoS guard: a CSI/SS3 sequence longer than this resets to ground as unknown.
const MAX_SEQ_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    /// Saw ESC; waiting to see `[`, `O`, or a plain Alt+char.
    Escape,
    /// Saw `ESC [`; accumulating CSI parameter/intermediate bytes.
    Csi,
    /// Saw `ESC O`; a single terminator byte follows.
    Ss3,
    /// Mid multi-byte UTF-8 sequence: (bytes collected, bytes expected).
    Utf8 {
        collected: u8,
        expected: u8,
    },
}

/// Stateful byte-stream decoder.
#[derive(Debug)]
pub struct Decoder {
    state: State,
    buf: Vec<u8>,
    utf8_buf: [u8; 4],
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            buf: Vec::with_capacity(32),
            utf8_buf: [0; 4],
        }
    }

    /// Decode every event completed by appending `bytes` to the stream.
    ///
    /// Running `dispatch` on the concatenation of two valid sequences yields
    /// the same events, in order, as dispatching each separately.
    pub fn dispatch(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut out = Vec::new();
        for &b in bytes {
            if let Some(ev) = self.feed_byte(b) {
                out.push(ev);
            }
        }
        out
    }

    /// Feed a single byte, returning a completed event if one falls out.
    pub fn feed_byte(&mut self, byte: u8) -> Option<Event> {
        #[cfg(feature = "tracing")]
        let from = self.state;

        let event = match self.state {
            State::Ground => self.ground(byte),
            State::Escape => self.escape(byte),
            State::Csi => self.csi(byte),
            State::Ss3 => self.ss3(byte),
            State::Utf8 {
                collected,
                expected,
            } => self.utf8(byte, collected, expected),
        };

        #[cfg(feature = "tracing")]
        if from != self.state {
            tracing::trace!(byte, ?from, to = ?self.state, "decoder state transition");
        }

        event
    }

    /// Whether the decoder just consumed a lone `ESC` and is waiting to see
    /// whether a CSI/SS3/Alt-char sequence follows. The event loop checks
    /// this right after a byte is fed so it knows to peek ahead with a
    /// short, dedicated timeout per §4.4, rather than waiting out its main
    /// poll timeout before resolving the escape.
    #[must_use]
    pub fn is_awaiting_escape_continuation(&self) -> bool {
        self.state == State::Escape
    }

    /// If the decoder just consumed a lone `ESC` with nothing following
    /// within the peek timeout, the event loop calls this to finalize it as
    /// `Key(Escape)` per §4.4's "peek next unit with short timeout" rule.
    pub fn finalize_escape(&mut self) -> Option<Event> {
        if self.state == State::Escape {
            self.state = State::Ground;
            Some(Event::Key(KeyEvent::new(KeyCode::Escape)))
        } else {
            None
        }
    }

    fn ground(&mut self, byte: u8) -> Option<Event> {
        match byte {
            0x1B => {
                self.state = State::Escape;
                None
            }
            0x09 => Some(Event::Key(KeyEvent::new(KeyCode::Tab))),
            0x0A | 0x0D => Some(Event::Key(KeyEvent::new(KeyCode::Enter))),
            0x01..=0x1A => {
                let c = (byte - 1 + b'a') as char;
                Some(Event::Key(
                    KeyEvent::char(c).with_modifiers(KeyModifiers::CTRL),
                ))
            }
            0x7F => Some(Event::Key(KeyEvent::new(KeyCode::Backspace))),
            0x20..=0x7E => Some(Event::Key(KeyEvent::char(byte as char))),
            0xC0..=0xDF => self.start_utf8(byte, 2),
            0xE0..=0xEF => self.start_utf8(byte, 3),
            0xF0..=0xF7 => self.start_utf8(byte, 4),
            _ => Some(Event::Key(KeyEvent::new(KeyCode::Unknown))),
        }
    }

    fn start_utf8(&mut self, byte: u8, expected: u8) -> Option<Event> {
        self.utf8_buf[0] = byte;
        self.state = State::Utf8 {
            collected: 1,
            expected,
        };
        None
    }

    fn utf8(&mut self, byte: u8, collected: u8, expected: u8) -> Option<Event> {
        if !(0x80..=0xBF).contains(&byte) {
            // Malformed continuation byte: bail to ground and reprocess.
            self.state = State::Ground;
            return self.ground(byte);
        }
        self.utf8_buf[collected as usize] = byte;
        let collected = collected + 1;
        if collected < expected {
            self.state = State::Utf8 {
                collected,
                expected,
            };
            return None;
        }
        self.state = State::Ground;
        let slice = &self.utf8_buf[..expected as usize];
        match std::str::from_utf8(slice)
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(c) => Some(Event::Key(KeyEvent::char(c))),
            None => Some(Event::Key(KeyEvent::new(KeyCode::Unknown))),
        }
    }

    fn escape(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'[' => {
                self.state = State::Csi;
                self.buf.clear();
                None
            }
            b'O' => {
                self.state = State::Ss3;
                None
            }
            0x1B => Some(Event::Key(
                KeyEvent::new(KeyCode::Escape).with_modifiers(KeyModifiers::ALT),
            )),
            0x20..=0x7E => {
                self.state = State::Ground;
                let c = byte as char;
                let mut mods = KeyModifiers::ALT;
                if c.is_ascii_uppercase() {
                    mods |= KeyModifiers::SHIFT;
                }
                Some(Event::Key(KeyEvent::char(c).with_modifiers(mods)))
            }
            _ => {
                self.state = State::Ground;
                Some(Event::Key(KeyEvent::new(KeyCode::Unknown)))
            }
        }
    }

    fn ss3(&mut self, byte: u8) -> Option<Event> {
        self.state = State::Ground;
        let code = match byte {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            _ => KeyCode::Unknown,
        };
        Some(Event::Key(KeyEvent::new(code)))
    }

    fn csi(&mut self, byte: u8) -> Option<Event> {
        if self.buf.len() >= MAX_SEQ_LEN {
            self.state = State::Ground;
            self.buf.clear();
            return Some(Event::Key(KeyEvent::new(KeyCode::Unknown)));
        }

        match byte {
            // Parameter/intermediate bytes: keep collecting.
            0x20..=0x3F => {
                self.buf.push(byte);
                None
            }
            // Final byte: dispatch.
            0x40..=0x7E => {
                self.state = State::Ground;
                let seq = std::mem::take(&mut self.buf);
                Some(Self::parse_csi(&seq, byte))
            }
            _ => {
                self.state = State::Ground;
                self.buf.clear();
                Some(Event::Key(KeyEvent::new(KeyCode::Unknown)))
            }
        }
    }

    fn parse_csi(params: &[u8], terminator: u8) -> Event {
        if (terminator == b'M' || terminator == b'm')
            && let Some(rest) = params.strip_prefix(b"<")
        {
            if let Some(ev) = Self::parse_sgr_mouse(rest, terminator) {
                return ev;
            }
            return Event::Key(KeyEvent::new(KeyCode::Unknown));
        }

        match terminator {
            b'A' => Self::csi_key(KeyCode::Up, params),
            b'B' => Self::csi_key(KeyCode::Down, params),
            b'C' => Self::csi_key(KeyCode::Right, params),
            b'D' => Self::csi_key(KeyCode::Left, params),
            b'H' => Self::csi_key(KeyCode::Home, params),
            b'F' => Self::csi_key(KeyCode::End, params),
            b'~' => Self::csi_tilde(params),
            b'u' => Self::csi_u(params),
            _ => Event::Key(KeyEvent::new(KeyCode::Unknown)),
        }
    }

    /// Kitty keyboard protocol: `CSI unicode-key-code[:alternate...][;modifiers[:event-type]] u`.
    /// Only the unicode codepoint and the modifier value are consumed; any
    /// `:`-separated alternate-codepoint or event-type suffix is ignored.
    fn csi_u(params: &[u8]) -> Event {
        let mut fields = params.split(|&b| b == b';');
        let Some(code_field) = fields.next() else {
            return Event::Key(KeyEvent::new(KeyCode::Unknown));
        };
        let primary = code_field.split(|&b| b == b':').next().unwrap_or(code_field);
        let Some(codepoint) = std::str::from_utf8(primary)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        else {
            return Event::Key(KeyEvent::new(KeyCode::Unknown));
        };

        let mods = fields
            .next()
            .map(|raw| {
                let main = raw.split(|&b| b == b':').next().unwrap_or(raw);
                let value: u32 = std::str::from_utf8(main)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1);
                Self::modifiers_from_xterm_value(value)
            })
            .unwrap_or_else(KeyModifiers::empty);

        let code = match codepoint {
            13 => KeyCode::Enter,
            9 => KeyCode::Tab,
            27 => KeyCode::Escape,
            127 => KeyCode::Backspace,
            _ => match char::from_u32(codepoint) {
                Some(c) => return Event::Key(KeyEvent::char(c).with_modifiers(mods)),
                None => KeyCode::Unknown,
            },
        };
        Event::Key(KeyEvent::new(code).with_modifiers(mods))
    }

    fn csi_key(code: KeyCode, params: &[u8]) -> Event {
        let mods = Self::xterm_modifier(params, 1);
        Event::Key(KeyEvent::new(code).with_modifiers(mods))
    }

    fn csi_tilde(params: &[u8]) -> Event {
        let Some(num) = Self::nth_param(params, 0) else {
            return Event::Key(KeyEvent::new(KeyCode::Unknown));
        };
        let mods = Self::xterm_modifier(params, 1);
        let code = match num {
            1 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            11..=15 => KeyCode::F((num - 10) as u8),
            17..=21 => KeyCode::F((num - 11) as u8),
            23 | 24 => KeyCode::F((num - 12) as u8),
            _ => return Event::Key(KeyEvent::new(KeyCode::Unknown)),
        };
        Event::Key(KeyEvent::new(code).with_modifiers(mods))
    }

    fn nth_param(params: &[u8], n: usize) -> Option<u32> {
        let s = std::str::from_utf8(params).ok()?;
        s.split(';').nth(n)?.parse().ok()
    }

    /// xterm modifier encoding: `value = 1 + shift + 2*alt + 4*ctrl`.
    fn xterm_modifier(params: &[u8], param_index: usize) -> KeyModifiers {
        let Some(value) = Self::nth_param(params, param_index) else {
            return KeyModifiers::empty();
        };
        Self::modifiers_from_xterm_value(value)
    }

    /// Shared xterm/Kitty modifier decoding: `value = 1 + shift + 2*alt + 4*ctrl`.
    fn modifiers_from_xterm_value(value: u32) -> KeyModifiers {
        let bits = value.saturating_sub(1);
        let mut mods = KeyModifiers::empty();
        if bits & 1 != 0 {
            mods |= KeyModifiers::SHIFT;
        }
        if bits & 2 != 0 {
            mods |= KeyModifiers::ALT;
        }
        if bits & 4 != 0 {
            mods |= KeyModifiers::CTRL;
        }
        mods
    }

    /// Parse `b;x;y` SGR mouse parameters (the `<` prefix already stripped).
    fn parse_sgr_mouse(params: &[u8], terminator: u8) -> Option<Event> {
        let s = std::str::from_utf8(params).ok()?;
        let mut parts = s.split(';');
        let b: u16 = parts.next()?.parse().ok()?;
        let x: u16 = parts.next()?.parse().ok()?;
        let y: u16 = parts.next()?.parse().ok()?;

        let button = match b & 0b11 {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::None,
        };
        let mut mods = KeyModifiers::empty();
        if b & 0x04 != 0 {
            mods |= KeyModifiers::SHIFT;
        }
        if b & 0x08 != 0 {
            mods |= KeyModifiers::ALT;
        }
        if b & 0x10 != 0 {
            mods |= KeyModifiers::CTRL;
        }
        let motion = b & 0x20 != 0;
        let wheel = b & 0x40 != 0;

        let (kind, button) = if wheel {
            let kind = if b & 1 == 0 {
                MouseEventKind::ScrollUp
            } else {
                MouseEventKind::ScrollDown
            };
            (kind, MouseButton::None)
        } else if motion {
            if b & 0b11 == 3 {
                (MouseEventKind::Move, MouseButton::None)
            } else {
                (MouseEventKind::Drag, button)
            }
        } else if terminator == b'M' {
            (MouseEventKind::Press, button)
        } else {
            (MouseEventKind::Release, button)
        };

        Some(Event::Mouse(MouseEvent {
            kind,
            button,
            x: x.saturating_sub(1),
            y: y.saturating_sub(1),
            modifiers: mods,
        }))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Property: the decoder never fails on arbitrary bytes (§7,
        // DecoderRecoverable) — it always returns, never panics, regardless
        // of how malformed the input is.
        #[test]
        fn dispatch_never_panics_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            let _ = Decoder::new().dispatch(&bytes);
        }

        // Property: dispatching two chunks one after another produces the
        // same events, in the same order, as dispatching their
        // concatenation in one call (per `dispatch`'s own doc comment).
        #[test]
        fn split_dispatch_matches_concatenated_dispatch(
            a in prop::collection::vec(any::<u8>(), 0..64),
            b in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut split = Decoder::new();
            let mut events = split.dispatch(&a);
            events.extend(split.dispatch(&b));

            let concatenated: Vec<u8> = a.iter().chain(b.iter()).copied().collect();
            let combined = Decoder::new().dispatch(&concatenated);

            prop_assert_eq!(events, combined);
        }
    }
}
