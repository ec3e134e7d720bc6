//! Input model.
//!
//! Raw events are drained once per tick into an immutable [`Intent`].  The
//! held-key state (movement and fire) lives in [`Controls`] between ticks;
//! one-shot commands (new game, quit, clicks) only last for the tick they
//! arrived in.

use crate::entities::MoveIntent;

/// Key codes the game distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    /// Printable key, lower-cased.
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { x: i32, y: i32 },
}

/// Everything the update phase needs to know about this tick's input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub movement: MoveIntent,
    pub fire: bool,
    pub new_game: bool,
    pub quit: bool,
    /// Last pointer press this tick.
    pub click: Option<(i32, i32)>,
}

#[derive(Clone, Debug, Default)]
pub struct Controls {
    movement: MoveIntent,
    fire: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch of events in order and snapshot the result.
    pub fn drain<I>(&mut self, events: I) -> Intent
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut intent = Intent::default();

        for event in events {
            match event {
                InputEvent::Quit => intent.quit = true,
                InputEvent::KeyDown(key) => match key {
                    Key::Right => self.movement.right = true,
                    Key::Left => self.movement.left = true,
                    Key::Up => self.movement.up = true,
                    Key::Down => self.movement.down = true,
                    Key::Space => self.fire = true,
                    Key::Char('q') | Key::Escape => intent.quit = true,
                    Key::Char('p') => intent.new_game = true,
                    Key::Char(_) => {}
                },
                InputEvent::KeyUp(key) => match key {
                    Key::Right => self.movement.right = false,
                    Key::Left => self.movement.left = false,
                    Key::Up => self.movement.up = false,
                    Key::Down => self.movement.down = false,
                    Key::Space => self.fire = false,
                    _ => {}
                },
                InputEvent::PointerDown { x, y } => intent.click = Some((x, y)),
            }
        }

        intent.movement = self.movement;
        intent.fire = self.fire;
        intent
    }
}
