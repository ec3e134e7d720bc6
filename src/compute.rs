//! Frame orchestrator.
//!
//! `Game` owns every piece of mutable state and hands explicit references of
//! it to the formation, collision and session code.  One call to
//! [`Game::tick`] runs one frame of the fixed update order; [`Game::scene`]
//! reports what should be drawn, whatever the session state.

use crate::collision::{
    check_craft_enemy, check_enemies_reached_bottom, level_up_if_cleared,
    resolve_projectile_enemy,
};
use crate::entities::{Body, Craft, Enemy, Motion, Projectile, Rect};
use crate::error::ConfigError;
use crate::formation::{build_formation, update_fleet};
use crate::input::Intent;
use crate::session::{LifeLost, Session, SessionState};
use crate::settings::{DynamicSettings, Settings};

/// Whether the frame loop should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Bounding boxes of everything on the board, in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub craft: Rect,
    pub projectiles: Vec<Rect>,
    pub enemies: Vec<Rect>,
    /// When false the start prompt is shown over a static board.
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    pub settings: Settings,
    pub dynamic: DynamicSettings,
    pub session: Session,
    pub craft: Craft,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    play_button: Rect,
}

impl Game {
    /// Set up an inactive session with the first formation already on screen.
    ///
    /// Fails when the viewport cannot hold a single enemy.
    pub fn new(settings: Settings, craft_width: u32, craft_height: u32) -> Result<Self, ConfigError> {
        settings.validate()?;
        let viewport = settings.viewport();

        let enemies = build_formation(
            viewport,
            craft_height,
            settings.alien_width,
            settings.alien_height,
        );
        if enemies.is_empty() {
            tracing::warn!(
                width = viewport.width,
                height = viewport.height,
                "viewport too small for the enemy formation"
            );
            return Err(ConfigError::ViewportTooSmall {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(Game {
            dynamic: settings.initialize_dynamic_settings(),
            session: Session::new(settings.ship_limit),
            craft: Craft::centered(viewport, craft_width, craft_height),
            projectiles: Vec::new(),
            enemies,
            play_button: Rect::centered_in(viewport, settings.button_width, settings.button_height),
            settings,
        })
    }

    pub fn play_button(&self) -> Rect {
        self.play_button
    }

    // ── Session transitions ──────────────────────────────────────────────────

    pub fn start_game(&mut self) {
        self.session.reset_stats(self.settings.ship_limit);
        self.session.state = SessionState::Active;
        self.dynamic = self.settings.initialize_dynamic_settings();
        self.reset_board();

        tracing::info!(
            lives_left = self.session.lives_left,
            high_score = self.session.high_score,
            "new game started"
        );
    }

    /// The craft was rammed or an enemy reached the bottom.
    pub fn on_craft_hit(&mut self) -> LifeLost {
        let outcome = self.session.lose_life(self.settings.hit_pause_ticks);
        match outcome {
            LifeLost::Respawn => {
                self.reset_board();
                tracing::info!(lives_left = self.session.lives_left, "craft hit");
            }
            LifeLost::GameOver => {
                tracing::info!(
                    score = self.session.score,
                    level = self.session.level,
                    high_score = self.session.high_score,
                    "game over"
                );
            }
        }
        outcome
    }

    /// Fresh formation, no projectiles, craft back at the bottom centre.
    fn reset_board(&mut self) {
        let viewport = self.settings.viewport();
        self.projectiles.clear();
        self.enemies = build_formation(
            viewport,
            self.craft.height,
            self.settings.alien_width,
            self.settings.alien_height,
        );
        self.craft.center(viewport);
    }

    // ── Per-tick driver ──────────────────────────────────────────────────────

    /// Fire one projectile if under the current allowance.
    pub fn fire(&mut self) -> bool {
        if self.projectiles.len() >= self.dynamic.bullets_allowed {
            return false;
        }
        self.projectiles.push(Projectile::fired_from(
            &self.craft,
            self.settings.bullet_width,
            self.settings.bullet_height,
        ));
        true
    }

    /// Run one frame against an already-drained input snapshot.
    pub fn tick(&mut self, intent: &Intent) -> Flow {
        if intent.quit {
            return Flow::Quit;
        }

        self.craft.intent = intent.movement;

        if intent.new_game {
            self.start_game();
        } else if let Some((x, y)) = intent.click {
            if !self.session.is_active() && self.play_button.contains(x, y) {
                self.start_game();
            }
        }

        if self.session.is_active() {
            if self.session.is_paused() {
                // Dead time after a hit: nothing moves and nothing collides
                self.session.pause_ticks -= 1;
            } else {
                self.update(intent.fire);
            }
        }

        Flow::Continue
    }

    fn update(&mut self, fire: bool) {
        let viewport = self.settings.viewport();

        self.craft.advance(&Motion::new(&self.dynamic, viewport));

        if fire {
            self.fire();
        }

        update_fleet(
            &mut self.enemies,
            &mut self.dynamic,
            self.settings.fleet_drop_speed,
            viewport,
        );

        let motion = Motion::new(&self.dynamic, viewport);
        for projectile in self.projectiles.iter_mut() {
            projectile.advance(&motion);
        }
        self.projectiles.retain(|p| !p.is_off_screen());

        resolve_projectile_enemy(
            &mut self.projectiles,
            &mut self.enemies,
            &mut self.session,
            self.settings.alien_points,
        );
        level_up_if_cleared(
            &mut self.projectiles,
            &mut self.enemies,
            &mut self.session,
            &self.settings,
            &mut self.dynamic,
            self.craft.height,
        );

        // A ram rebuilds the formation, so the bottom check would only see
        // the fresh one: at most one life per tick.
        if check_craft_enemy(&self.craft, &self.enemies)
            || check_enemies_reached_bottom(&self.enemies, viewport)
        {
            self.on_craft_hit();
        }
    }

    pub fn scene(&self) -> Scene {
        Scene {
            craft: self.craft.bounding_box(),
            projectiles: self.projectiles.iter().map(Body::bounding_box).collect(),
            enemies: self.enemies.iter().map(Body::bounding_box).collect(),
            active: self.session.is_active(),
        }
    }
}
