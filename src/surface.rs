//! Drawing interface and the per-frame draw order.

use std::io;

use crate::assets::Bitmap;
use crate::compute::Game;
use crate::entities::Rect;
use crate::hud::{PlayButton, Scoreboard, TextImage};
use crate::settings::Color;

#[derive(Clone, Copy, Debug)]
pub enum Image<'a> {
    Sprite { bitmap: &'a Bitmap, color: Color },
    Text(&'a TextImage),
}

/// A 2D canvas of known size, measured in cells.
pub trait Surface {
    fn dimensions(&self) -> (u32, u32);
    fn fill(&mut self, color: Color) -> io::Result<()>;
    fn draw_rect(&mut self, color: Color, rect: Rect) -> io::Result<()>;
    fn draw_image(&mut self, image: Image<'_>, at: Rect) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}

/// Draw one complete frame.  Runs whether or not a game is in progress.
pub fn draw_frame<S: Surface>(
    surface: &mut S,
    game: &Game,
    ship: &Bitmap,
    scoreboard: &Scoreboard,
    button: &PlayButton,
) -> io::Result<()> {
    let settings = &game.settings;
    let scene = game.scene();

    surface.fill(settings.bg_color)?;
    surface.draw_image(
        Image::Sprite {
            bitmap: ship,
            color: settings.ship_color,
        },
        scene.craft,
    )?;
    for rect in &scene.projectiles {
        surface.draw_rect(settings.bullet_color, *rect)?;
    }
    for rect in &scene.enemies {
        surface.draw_rect(settings.alien_color, *rect)?;
    }

    scoreboard.draw(surface, ship, settings.ship_color)?;

    if !scene.active {
        button.draw(surface)?;
    }

    surface.present()
}
