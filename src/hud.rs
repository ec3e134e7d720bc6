//! Heads-up display: score, high score, level, remaining ships and the Play
//! button.
//!
//! Text is rasterized once and cached; [`Scoreboard::refresh`] only renders
//! again when the number behind an image has changed.

use std::io;

use crate::assets::Bitmap;
use crate::entities::{Rect, Viewport};
use crate::session::Session;
use crate::settings::{Color, Settings};
use crate::surface::{Image, Surface};

// ── Text ─────────────────────────────────────────────────────────────────────

/// A rendered line of text.  On a cell grid every character is one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextImage {
    pub text: String,
    pub color: Color,
    pub background: Color,
}

impl TextImage {
    pub fn width(&self) -> u32 {
        self.text.chars().count() as u32
    }

    pub fn height(&self) -> u32 {
        1
    }
}

pub trait TextRasterizer {
    fn render_text(&self, text: &str, color: Color, background: Color) -> TextImage;
}

/// One cell per character, no font metrics.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellRasterizer;

impl TextRasterizer for CellRasterizer {
    fn render_text(&self, text: &str, color: Color, background: Color) -> TextImage {
        TextImage {
            text: text.to_string(),
            color,
            background,
        }
    }
}

/// Round to the nearest ten (ties to even) and group thousands with commas.
pub fn format_score(score: u32) -> String {
    let remainder = score % 10;
    let base = u64::from(score - remainder);
    let rounded = if remainder > 5 || (remainder == 5 && (base / 10) % 2 == 1) {
        base + 10
    } else {
        base
    };

    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Scoreboard ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Label {
    value: u32,
    image: TextImage,
    rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Scoreboard {
    viewport: Viewport,
    text_color: Color,
    background: Color,
    ship_size: (u32, u32),
    score: Label,
    high_score: Label,
    level: Label,
    lives_left: u32,
    lives: Vec<Rect>,
}

impl Scoreboard {
    pub fn new<R: TextRasterizer>(
        session: &Session,
        settings: &Settings,
        ship: &Bitmap,
        rasterizer: &R,
    ) -> Self {
        let blank = Label {
            value: 0,
            image: rasterizer.render_text("", settings.text_color, settings.bg_color),
            rect: Rect::new(0, 0, 0, 0),
        };
        let mut board = Scoreboard {
            viewport: settings.viewport(),
            text_color: settings.text_color,
            background: settings.bg_color,
            ship_size: (ship.width(), ship.height()),
            score: blank.clone(),
            high_score: blank.clone(),
            level: blank,
            lives_left: session.lives_left,
            lives: Vec::new(),
        };
        board.prep_score(session.score, rasterizer);
        board.prep_high_score(session.high_score, rasterizer);
        board.prep_level(session.level, rasterizer);
        board.prep_ships(session.lives_left);
        board
    }

    /// Re-render whatever changed since the last call.
    ///
    /// Returns how many text images were rasterized.
    pub fn refresh<R: TextRasterizer>(&mut self, session: &Session, rasterizer: &R) -> usize {
        let mut rendered = 0;
        if session.score != self.score.value {
            self.prep_score(session.score, rasterizer);
            rendered += 1;
        }
        if session.high_score != self.high_score.value {
            self.prep_high_score(session.high_score, rasterizer);
            rendered += 1;
        }
        if session.level != self.level.value {
            self.prep_level(session.level, rasterizer);
            rendered += 1;
        }
        if session.lives_left != self.lives_left {
            self.prep_ships(session.lives_left);
        }
        rendered
    }

    pub fn score_image(&self) -> &TextImage {
        &self.score.image
    }

    pub fn high_score_image(&self) -> &TextImage {
        &self.high_score.image
    }

    pub fn level_image(&self) -> &TextImage {
        &self.level.image
    }

    /// Where the spare-ship icons go, one per remaining life.
    pub fn lives(&self) -> &[Rect] {
        &self.lives
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, ship: &Bitmap, ship_color: Color) -> io::Result<()> {
        for label in [&self.score, &self.high_score, &self.level] {
            surface.draw_image(Image::Text(&label.image), label.rect)?;
        }
        for rect in &self.lives {
            surface.draw_image(
                Image::Sprite {
                    bitmap: ship,
                    color: ship_color,
                },
                *rect,
            )?;
        }
        Ok(())
    }

    /// Top-right corner, growing to the left.
    fn prep_score<R: TextRasterizer>(&mut self, score: u32, rasterizer: &R) {
        let image = rasterizer.render_text(&format_score(score), self.text_color, self.background);
        let (w, h) = (image.width() as i32, image.height() as i32);
        let right = self.viewport.width as i32 - 2;
        self.score = Label {
            value: score,
            rect: Rect::new(right - w, 0, w, h),
            image,
        };
    }

    /// Top centre, level with the score.
    fn prep_high_score<R: TextRasterizer>(&mut self, high_score: u32, rasterizer: &R) {
        let image =
            rasterizer.render_text(&format_score(high_score), self.text_color, self.background);
        let (w, h) = (image.width() as i32, image.height() as i32);
        self.high_score = Label {
            value: high_score,
            rect: Rect::new(self.viewport.width as i32 / 2 - w / 2, self.score.rect.top(), w, h),
            image,
        };
    }

    /// Right-aligned just below the score.
    fn prep_level<R: TextRasterizer>(&mut self, level: u32, rasterizer: &R) {
        let image = rasterizer.render_text(&level.to_string(), self.text_color, self.background);
        let (w, h) = (image.width() as i32, image.height() as i32);
        self.level = Label {
            value: level,
            rect: Rect::new(self.score.rect.right() - w, self.score.rect.bottom(), w, h),
            image,
        };
    }

    fn prep_ships(&mut self, lives_left: u32) {
        let (w, h) = (self.ship_size.0 as i32, self.ship_size.1 as i32);
        self.lives_left = lives_left;
        self.lives = (0..lives_left as i32)
            .map(|n| Rect::new(1 + n * w, 0, w, h))
            .collect();
    }
}

// ── Play button ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PlayButton {
    rect: Rect,
    color: Color,
    label: TextImage,
    label_rect: Rect,
}

impl PlayButton {
    pub fn new<R: TextRasterizer>(rect: Rect, settings: &Settings, rasterizer: &R) -> Self {
        let label = rasterizer.render_text(
            &settings.button_label,
            settings.button_text_color,
            settings.button_color,
        );
        let (w, h) = (label.width() as i32, label.height() as i32);
        PlayButton {
            rect,
            color: settings.button_color,
            label_rect: Rect::new(rect.centerx() - w / 2, rect.centery() - h / 2, w, h),
            label,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> io::Result<()> {
        surface.draw_rect(self.color, self.rect)?;
        surface.draw_image(Image::Text(&self.label), self.label_rect)
    }
}
