#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! These are the typed events the input decoder produces and the event loop
//! delivers to the application's handler. All derive `Clone`/`PartialEq`/`Eq`
//! so tests can assert on them directly.

use bitflags::bitflags;
use std::time::Duration;

/// Canonical event delivered to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },
    /// A periodic animation tick.
    Tick {
        /// Monotonically increasing frame counter.
        frame: u64,
        /// Wall-clock time elapsed since the loop started.
        elapsed: Duration,
    },
}

bitflags! {
    /// Modifier keys held during a key or mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct KeyModifiers: u8 {
        /// Control key.
        const CTRL  = 0b0000_0001;
        /// Alt/Option key.
        const ALT   = 0b0000_0010;
        /// Shift key.
        const SHIFT = 0b0000_0100;
    }
}

/// A key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Function keys F1-F12.
    F(u8),
    /// A regular character key; see [`KeyEvent::character`].
    Char,
    /// A sequence the decoder could not make sense of.
    Unknown,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during the event.
    pub modifiers: KeyModifiers,
    /// The literal character, meaningful when `code == KeyCode::Char`.
    pub character: Option<char>,
}

impl KeyEvent {
    /// Construct a key event with no modifiers and no character.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
            character: None,
        }
    }

    /// Construct a character key event.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self {
            code: KeyCode::Char,
            modifiers: KeyModifiers::empty(),
            character: Some(c),
        }
    }

    /// Builder: set modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True if `code == KeyCode::Char(c)`.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char && self.character == Some(c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// No button involved (e.g. a bare move or a scroll event).
    None,
}

/// The kind of mouse activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Press,
    Release,
    Drag,
    Move,
    ScrollUp,
    ScrollDown,
}

/// A mouse event with zero-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub button: MouseButton,
    pub x: u16,
    pub y: u16,
    pub modifiers: KeyModifiers,
}
