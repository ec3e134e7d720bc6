//! Game entities and the geometry they share.
//!
//! Positions are kept as `f32` so slow speeds accumulate smoothly; the integer
//! bounding box used for drawing and hit-testing is derived from them on demand.

use crate::settings::{DynamicSettings, FleetDirection};

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned box in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// A `w`×`h` box centred in the viewport.
    pub fn centered_in(viewport: Viewport, w: u32, h: u32) -> Self {
        Rect {
            x: viewport.width as i32 / 2 - w as i32 / 2,
            y: viewport.height as i32 / 2 - h as i32 / 2,
            w: w as i32,
            h: h as i32,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

// ── Shared behaviour ─────────────────────────────────────────────────────────

/// Everything an entity needs to move for one tick.
#[derive(Clone, Copy, Debug)]
pub struct Motion {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub direction: FleetDirection,
    pub viewport: Viewport,
}

impl Motion {
    pub fn new(dynamic: &DynamicSettings, viewport: Viewport) -> Self {
        Motion {
            ship_speed: dynamic.ship_speed,
            bullet_speed: dynamic.bullet_speed,
            alien_speed: dynamic.alien_speed,
            direction: dynamic.fleet_direction,
            viewport,
        }
    }
}

pub trait Body {
    fn position(&self) -> (f32, f32);
    fn bounding_box(&self) -> Rect;
    fn advance(&mut self, motion: &Motion);
}

// ── Player craft ─────────────────────────────────────────────────────────────

/// Which directions the player is currently holding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Craft {
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
    pub intent: MoveIntent,
}

impl Craft {
    /// A craft of the given size, centred at the bottom of the viewport.
    pub fn centered(viewport: Viewport, width: u32, height: u32) -> Self {
        let mut craft = Craft {
            x: 0.0,
            y: 0.0,
            width,
            height,
            intent: MoveIntent::default(),
        };
        craft.center(viewport);
        craft
    }

    pub fn center(&mut self, viewport: Viewport) {
        self.x = (viewport.width as i32 / 2 - self.width as i32 / 2) as f32;
        self.y = viewport.height as f32 - self.height as f32;
    }
}

impl Body for Craft {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(
            self.x as i32,
            self.y as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    fn advance(&mut self, motion: &Motion) {
        let rect = self.bounding_box();
        let (vw, vh) = (motion.viewport.width as i32, motion.viewport.height as i32);

        if self.intent.right && rect.right() < vw {
            self.x += motion.ship_speed;
        }
        if self.intent.left && rect.left() > 0 {
            self.x -= motion.ship_speed;
        }
        if self.intent.up && rect.top() > 0 {
            self.y -= motion.ship_speed;
        }
        if self.intent.down && rect.bottom() < vh {
            self.y += motion.ship_speed;
        }

        let max_x = (vw - self.width as i32).max(0) as f32;
        let max_y = (vh - self.height as i32).max(0) as f32;
        self.x = self.x.clamp(0.0, max_x);
        self.y = self.y.clamp(0.0, max_y);
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
}

impl Projectile {
    /// A projectile whose mid-top sits on the craft's mid-top.
    pub fn fired_from(craft: &Craft, width: u32, height: u32) -> Self {
        let ship = craft.bounding_box();
        Projectile {
            x: ship.centerx() - width as i32 / 2,
            y: ship.top() as f32,
            width,
            height,
        }
    }

    /// True once the bottom edge has passed the top of the viewport.
    pub fn is_off_screen(&self) -> bool {
        self.bounding_box().bottom() <= 0
    }
}

impl Body for Projectile {
    fn position(&self) -> (f32, f32) {
        (self.x as f32, self.y)
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y as i32, self.width as i32, self.height as i32)
    }

    fn advance(&mut self, motion: &Motion) {
        self.y -= motion.bullet_speed;
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, width: u32, height: u32) -> Self {
        Enemy { x, y, width, height }
    }

    /// Touching or beyond the left or right side of the viewport.
    pub fn at_edge(&self, viewport: Viewport) -> bool {
        let rect = self.bounding_box();
        rect.right() >= viewport.width as i32 || rect.left() <= 0
    }
}

impl Body for Enemy {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(
            self.x as i32,
            self.y as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    fn advance(&mut self, motion: &Motion) {
        self.x += motion.alien_speed * motion.direction.sign();
    }
}
