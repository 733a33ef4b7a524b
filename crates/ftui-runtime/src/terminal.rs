#![forbid(unsafe_code)]

//! The full-screen event/render loop (§4.5 "Full-screen mode lifecycle").

use std::time::{Duration, Instant};

use ftui_core::event::Event;
use ftui_core::geometry::Rect;
use ftui_core::input_decoder::Decoder;
use ftui_render::{Buffer, Frame, diff_buffers};

use crate::backend::{Backend, EOF, TIMEOUT};
use crate::error::{Result, RuntimeError};

/// Dedicated short timeout for disambiguating a lone `ESC` from the start of
/// a CSI/SS3/Alt-char sequence (§4.4 "peek next unit with short timeout"),
/// distinct from (and much shorter than) the main event-loop poll timeout.
const ESC_PEEK_TIMEOUT_MS: u64 = 25;

/// Setup toggles applied on [`Terminal::new`] and reversed on teardown.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub mouse_capture: bool,
    /// Animation tick cadence; `None` generates no `Tick` events.
    pub tick_rate: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: false,
            tick_rate: None,
        }
    }
}

/// What the event handler wants after observing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep running; redraw only if this event itself demands it (resize/tick).
    Continue,
    /// Keep running and redraw regardless.
    Redraw,
    /// Tear down and stop the loop.
    Quit,
}

/// Drives a `Backend` through the full-screen lifecycle: setup, a
/// render/diff/present cycle per frame, a cooperative single-threaded event
/// pump, and ordered teardown on every exit path.
pub struct Terminal<B: Backend> {
    backend: B,
    current: Buffer,
    previous: Buffer,
    options: SessionOptions,
    decoder: Decoder,
    started: Instant,
    last_tick: Instant,
    tick_frame: u64,
    last_size: (u16, u16),
    torn_down: bool,
}

impl<B: Backend> Terminal<B> {
    /// Step 1: raw mode on, alternate screen on (if requested), mouse
    /// capture on (if requested), cursor hidden, buffers allocated to the
    /// current size.
    pub fn new(mut backend: B, options: SessionOptions) -> Result<Self> {
        let (w, h) = backend.size()?;
        if w == 0 || h == 0 {
            return Err(RuntimeError::Geometry {
                width: w,
                height: h,
            });
        }
        backend.enable_raw_mode()?;
        if options.alternate_screen {
            backend.enter_alternate_screen()?;
        }
        if options.mouse_capture {
            backend.enable_mouse_capture()?;
        }
        backend.hide_cursor()?;
        backend.flush()?;

        let area = Rect::from_size(w, h);
        let now = Instant::now();
        Ok(Self {
            backend,
            current: Buffer::new(area),
            previous: Buffer::new(area),
            options,
            decoder: Decoder::new(),
            started: now,
            last_tick: now,
            tick_frame: 0,
            last_size: (w, h),
            torn_down: false,
        })
    }

    /// Step 2: one render/diff/present cycle.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("draw").entered();

        let (w, h) = self.backend.size()?;
        let area = Rect::from_size(w, h);
        if area != self.current.area() {
            #[cfg(feature = "tracing")]
            tracing::debug!(width = w, height = h, "buffers resized");
            self.current.resize(area);
            self.previous.resize(area);
            self.backend.clear()?;
        }
        self.current.clear();

        let mut frame = Frame::new(&mut self.current);
        render(&mut frame);
        let cursor = frame.cursor_position();

        let updates = diff_buffers(&self.previous, &self.current);
        #[cfg(feature = "tracing")]
        tracing::trace!(changes = updates.len(), "diff computed");
        self.backend.apply(&updates)?;
        match cursor {
            Some((x, y)) => {
                self.backend.set_cursor_position(x, y)?;
                self.backend.show_cursor()?;
            }
            None => self.backend.hide_cursor()?,
        }
        self.backend.flush()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }

    /// Step 3: drain at most one event, bounded by `poll_timeout_ms`.
    /// `ESC` with nothing following within the timeout finalizes as
    /// `Key(Escape)` per §4.4. A tick fires when `tick_rate` has elapsed
    /// and no input was pending. A change in backend size takes priority
    /// over everything else and is reported as `Event::Resize`, coalesced
    /// to the latest size the way a background resize watcher would.
    pub fn next_event(&mut self, poll_timeout_ms: u64) -> Result<Option<Event>> {
        let size = self.backend.size()?;
        if size != self.last_size {
            self.last_size = size;
            #[cfg(feature = "tracing")]
            tracing::debug!(width = size.0, height = size.1, "backend resized");
            return Ok(Some(Event::Resize {
                width: size.0,
                height: size.1,
            }));
        }
        match self.backend.read_unit(poll_timeout_ms)? {
            TIMEOUT => {
                if let Some(ev) = self.decoder.finalize_escape() {
                    return Ok(Some(ev));
                }
                if let Some(rate) = self.options.tick_rate
                    && self.last_tick.elapsed() >= rate
                {
                    self.last_tick = Instant::now();
                    self.tick_frame += 1;
                    return Ok(Some(Event::Tick {
                        frame: self.tick_frame,
                        elapsed: self.started.elapsed(),
                    }));
                }
                Ok(None)
            }
            EOF => Ok(None),
            unit => {
                let byte = unit as u8;
                if let Some(ev) = self.decoder.feed_byte(byte) {
                    return Ok(Some(ev));
                }
                if self.decoder.is_awaiting_escape_continuation()
                    && self.backend.peek_unit(ESC_PEEK_TIMEOUT_MS)? == TIMEOUT
                {
                    return Ok(self.decoder.finalize_escape());
                }
                Ok(None)
            }
        }
    }

    /// The full cooperative loop: draw once, then repeatedly pump one event
    /// and redraw when the handler asks for it or the event was a resize/tick.
    pub fn run<H>(
        &mut self,
        poll_timeout_ms: u64,
        mut view: impl FnMut(&mut Frame),
        mut handler: H,
    ) -> Result<()>
    where
        H: FnMut(&Event) -> ControlFlow,
    {
        self.draw(&mut view)?;
        loop {
            let Some(event) = self.next_event(poll_timeout_ms)? else {
                continue;
            };
            let auto_redraw = matches!(event, Event::Resize { .. } | Event::Tick { .. });
            match handler(&event) {
                ControlFlow::Quit => break,
                ControlFlow::Redraw => self.draw(&mut view)?,
                ControlFlow::Continue if auto_redraw => self.draw(&mut view)?,
                ControlFlow::Continue => {}
            }
        }
        self.teardown()
    }

    /// Step 4, reverse order of setup. Safe to call more than once.
    pub fn teardown(&mut self) -> Result<()> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;
        self.backend.show_cursor()?;
        if self.options.mouse_capture {
            self.backend.disable_mouse_capture()?;
        }
        if self.options.alternate_screen {
            self.backend.leave_alternate_screen()?;
        }
        self.backend.disable_raw_mode()?;
        self.backend.flush()
    }
}

impl<B: Backend> Drop for Terminal<B> {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui_render::CellUpdate;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakeBackend {
        size: (u16, u16),
        input: VecDeque<u8>,
        applied_calls: usize,
        raw_mode: bool,
        alt_screen: bool,
        mouse: bool,
        cursor_visible: bool,
    }

    impl Backend for FakeBackend {
        fn size(&self) -> Result<(u16, u16)> {
            Ok(self.size)
        }
        fn read_unit(&mut self, _timeout_ms: u64) -> Result<i32> {
            Ok(self.input.pop_front().map_or(TIMEOUT, i32::from))
        }
        fn peek_unit(&mut self, _timeout_ms: u64) -> Result<i32> {
            Ok(self.input.front().copied().map_or(TIMEOUT, i32::from))
        }
        fn write_raw(&mut self, _bytes: &[u8]) -> Result<()> {
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn enter_alternate_screen(&mut self) -> Result<()> {
            self.alt_screen = true;
            Ok(())
        }
        fn leave_alternate_screen(&mut self) -> Result<()> {
            self.alt_screen = false;
            Ok(())
        }
        fn enable_raw_mode(&mut self) -> Result<()> {
            self.raw_mode = true;
            Ok(())
        }
        fn disable_raw_mode(&mut self) -> Result<()> {
            self.raw_mode = false;
            Ok(())
        }
        fn enable_mouse_capture(&mut self) -> Result<()> {
            self.mouse = true;
            Ok(())
        }
        fn disable_mouse_capture(&mut self) -> Result<()> {
            self.mouse = false;
            Ok(())
        }
        fn show_cursor(&mut self) -> Result<()> {
            self.cursor_visible = true;
            Ok(())
        }
        fn hide_cursor(&mut self) -> Result<()> {
            self.cursor_visible = false;
            Ok(())
        }
        fn set_cursor_position(&mut self, _x: u16, _y: u16) -> Result<()> {
            Ok(())
        }
        fn clear(&mut self) -> Result<()> {
            Ok(())
        }
        fn apply(&mut self, _updates: &[CellUpdate<'_>]) -> Result<()> {
            self.applied_calls += 1;
            Ok(())
        }
    }

    fn fake(w: u16, h: u16) -> FakeBackend {
        FakeBackend {
            size: (w, h),
            ..Default::default()
        }
    }

    #[test]
    fn new_enters_raw_mode_and_alt_screen_and_hides_cursor() {
        let term = Terminal::new(fake(10, 4), SessionOptions::default()).unwrap();
        assert!(term.backend.raw_mode);
        assert!(term.backend.alt_screen);
        assert!(!term.backend.cursor_visible);
    }

    #[test]
    fn zero_size_is_a_geometry_error() {
        let err = Terminal::new(fake(0, 4), SessionOptions::default());
        assert!(matches!(err, Err(RuntimeError::Geometry { .. })));
    }

    #[test]
    fn draw_resizes_buffers_to_backend_size() {
        let mut term = Terminal::new(fake(10, 4), SessionOptions::default()).unwrap();
        term.draw(|_| {}).unwrap();
        assert_eq!(term.current.area(), Rect::from_size(10, 4));
    }

    #[test]
    fn teardown_restores_every_toggle_and_is_idempotent() {
        let mut term = Terminal::new(
            fake(10, 4),
            SessionOptions {
                alternate_screen: true,
                mouse_capture: true,
                tick_rate: None,
            },
        )
        .unwrap();
        term.teardown().unwrap();
        assert!(!term.backend.raw_mode);
        assert!(!term.backend.alt_screen);
        assert!(!term.backend.mouse);
        assert!(term.backend.cursor_visible);
        term.teardown().unwrap();
    }

    #[test]
    fn next_event_decodes_one_key_from_backend_bytes() {
        let mut term = Terminal::new(fake(10, 4), SessionOptions::default()).unwrap();
        term.backend.input.push_back(b'a');
        let event = term.next_event(10).unwrap();
        assert_eq!(
            event,
            Some(Event::Key(ftui_core::event::KeyEvent::char('a')))
        );
    }

    #[test]
    fn lone_escape_resolves_within_the_same_call_via_a_short_peek() {
        let mut term = Terminal::new(fake(10, 4), SessionOptions::default()).unwrap();
        term.backend.input.push_back(0x1B);
        let event = term.next_event(10_000).unwrap();
        assert_eq!(
            event,
            Some(Event::Key(ftui_core::event::KeyEvent::new(
                ftui_core::event::KeyCode::Escape
            )))
        );
    }

    #[test]
    fn escape_followed_by_bracket_does_not_resolve_as_a_lone_escape() {
        let mut term = Terminal::new(fake(10, 4), SessionOptions::default()).unwrap();
        term.backend.input.push_back(0x1B);
        term.backend.input.push_back(b'[');
        term.backend.input.push_back(b'A');
        // ESC: peek sees '[' still pending, so it is not finalized alone.
        assert_eq!(term.next_event(10).unwrap(), None);
        // '[': enters Csi state, still incomplete.
        assert_eq!(term.next_event(10).unwrap(), None);
        // 'A': completes the CSI sequence.
        let event = term.next_event(10).unwrap();
        assert_eq!(
            event,
            Some(Event::Key(ftui_core::event::KeyEvent::new(
                ftui_core::event::KeyCode::Up
            )))
        );
    }

    #[test]
    fn timeout_with_no_pending_escape_and_no_tick_rate_yields_none() {
        let mut term = Terminal::new(fake(10, 4), SessionOptions::default()).unwrap();
        assert_eq!(term.next_event(5).unwrap(), None);
    }

    #[test]
    fn size_change_is_reported_as_a_resize_event_before_anything_else() {
        let mut term = Terminal::new(fake(10, 4), SessionOptions::default()).unwrap();
        term.backend.input.push_back(b'a');
        term.backend.size = (20, 8);
        let event = term.next_event(5).unwrap();
        assert_eq!(
            event,
            Some(Event::Resize {
                width: 20,
                height: 8
            })
        );
        // the pending key byte is still there, untouched, for the next poll
        let event = term.next_event(5).unwrap();
        assert_eq!(
            event,
            Some(Event::Key(ftui_core::event::KeyEvent::char('a')))
        );
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: feeding next_event an arbitrary byte stream, one call
            // per byte, never panics and never desynchronizes the decoder
            // (every call returns cleanly, pending or not).
            #[test]
            fn next_event_never_panics_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
                let mut term = Terminal::new(fake(20, 10), SessionOptions::default()).unwrap();
                term.backend.input.extend(bytes);
                loop {
                    match term.next_event(1) {
                        Ok(Some(_)) => continue,
                        Ok(None) => break,
                        Err(e) => prop_assert!(false, "unexpected error: {e}"),
                    }
                }
            }
        }
    }
}
