//! Terminal back end. All terminal I/O lives here.
//!
//! `TerminalSurface` turns the game's drawing calls into crossterm commands;
//! `KeyTracker` turns crossterm events into the game's input events.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    style::{self, Print},
    terminal, QueueableCommand,
};

use alien_invasion::entities::Rect;
use alien_invasion::input::{InputEvent, Key};
use alien_invasion::settings::Color;
use alien_invasion::surface::{Image, Surface};

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    width: u16,
    height: u16,
    /// Colour of the last `fill`, used behind sprite glyphs.
    background: Color,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        TerminalSurface {
            out,
            width,
            height,
            background: Color(0, 0, 0),
        }
    }

    fn on_screen(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    /// Horizontal span of `rect` that is visible, as `(first_col, len)`.
    fn visible_span(&self, x: i32, w: i32) -> Option<(u16, usize)> {
        let start = x.max(0);
        let end = (x + w).min(i32::from(self.width));
        if end <= start {
            return None;
        }
        Some((start as u16, (end - start) as usize))
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn dimensions(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn fill(&mut self, color: Color) -> std::io::Result<()> {
        self.background = color;
        self.out.queue(style::SetBackgroundColor(term_color(color)))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_rect(&mut self, color: Color, rect: Rect) -> std::io::Result<()> {
        let Some((col, len)) = self.visible_span(rect.x, rect.w) else {
            return Ok(());
        };
        self.out.queue(style::SetBackgroundColor(term_color(color)))?;
        let blank = " ".repeat(len);
        for row in rect.top().max(0)..rect.bottom().min(i32::from(self.height)) {
            self.out.queue(cursor::MoveTo(col, row as u16))?;
            self.out.queue(Print(&blank))?;
        }
        Ok(())
    }

    fn draw_image(&mut self, image: Image<'_>, at: Rect) -> std::io::Result<()> {
        match image {
            Image::Sprite { bitmap, color } => {
                self.out.queue(style::SetForegroundColor(term_color(color)))?;
                self.out
                    .queue(style::SetBackgroundColor(term_color(self.background)))?;
                for (px, py, glyph) in bitmap.pixels() {
                    let (x, y) = (at.x + px as i32, at.y + py as i32);
                    if self.on_screen(x, y) {
                        self.out.queue(cursor::MoveTo(x as u16, y as u16))?;
                        self.out.queue(Print(glyph))?;
                    }
                }
            }
            Image::Text(text) => {
                if at.y < 0 || at.y >= i32::from(self.height) {
                    return Ok(());
                }
                let Some((col, len)) = self.visible_span(at.x, text.width() as i32) else {
                    return Ok(());
                };
                let skip = (col as i32 - at.x) as usize;
                let visible: String = text.text.chars().skip(skip).take(len).collect();
                self.out.queue(style::SetForegroundColor(term_color(text.color)))?;
                self.out
                    .queue(style::SetBackgroundColor(term_color(text.background)))?;
                self.out.queue(cursor::MoveTo(col, at.y as u16))?;
                self.out.queue(Print(visible))?;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Translates crossterm events and synthesizes releases.
///
/// Keyboard-enhancement capable terminals (kitty protocol) report real
/// `Release` events.  Classic terminals only repeat `Press` while a key is
/// down, so a key that has not been seen for `HOLD_WINDOW` frames is released
/// by [`KeyTracker::expire`].
#[derive(Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    held: HashMap<Key, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn translate(&mut self, event: Event, out: &mut Vec<InputEvent>) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    out.push(InputEvent::Quit);
                    return;
                }
                let Some(key) = map_key(code) else {
                    return;
                };
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if self.held.insert(key, self.frame).is_none() {
                            out.push(InputEvent::KeyDown(key));
                        }
                    }
                    KeyEventKind::Release => {
                        if self.held.remove(&key).is_some() {
                            out.push(InputEvent::KeyUp(key));
                        }
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => out.push(InputEvent::PointerDown {
                x: i32::from(column),
                y: i32::from(row),
            }),
            _ => {}
        }
    }

    /// Release every key that has gone quiet for longer than the hold window.
    pub fn expire(&mut self, out: &mut Vec<InputEvent>) {
        let frame = self.frame;
        let mut stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, last)| frame.saturating_sub(**last) > HOLD_WINDOW)
            .map(|(key, _)| *key)
            .collect();
        // HashMap order is arbitrary; keep the event stream stable
        stale.sort();
        for key in stale {
            self.held.remove(&key);
            out.push(InputEvent::KeyUp(key));
        }
    }
}
