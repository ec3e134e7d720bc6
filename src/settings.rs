//! Game settings.
//!
//! The static part is read once (defaults, optionally overridden by a TOML
//! file).  The dynamic part is re-derived from it at every new game and
//! grows with each cleared level.

use std::path::Path;

use serde::Deserialize;

use crate::entities::Viewport;
use crate::error::ConfigError;

/// 24-bit colour, written as `[r, g, b]` in the settings file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetDirection {
    Left,
    Right,
}

impl FleetDirection {
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Left => -1.0,
            FleetDirection::Right => 1.0,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            FleetDirection::Left => FleetDirection::Right,
            FleetDirection::Right => FleetDirection::Left,
        }
    }
}

// ── Static settings ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Replace `screen_width`/`screen_height` with the terminal size at startup.
    pub fullscreen: bool,
    pub screen_width: u32,
    pub screen_height: u32,
    pub bg_color: Color,

    pub ship_speed: f32,
    pub ship_limit: u32,
    pub ship_color: Color,

    pub bullet_speed: f32,
    pub bullet_width: u32,
    pub bullet_height: u32,
    pub bullet_color: Color,
    pub bullets_allowed: usize,

    pub alien_speed: f32,
    pub alien_width: u32,
    pub alien_height: u32,
    pub alien_color: Color,
    pub alien_points: u32,
    pub fleet_drop_speed: f32,

    /// Multiplier applied to every speed when a level is cleared.
    pub speedup_scale: f32,
    /// Dead time after losing a life, in ticks.
    pub hit_pause_ticks: u32,
    pub frame_millis: u64,

    pub text_color: Color,
    pub button_width: u32,
    pub button_height: u32,
    pub button_color: Color,
    pub button_text_color: Color,
    pub button_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fullscreen: true,
            screen_width: 80,
            screen_height: 24,
            bg_color: Color(230, 230, 230),

            ship_speed: 0.5,
            ship_limit: 3,
            ship_color: Color(20, 20, 120),

            bullet_speed: 0.6,
            bullet_width: 1,
            bullet_height: 1,
            bullet_color: Color(60, 60, 60),
            bullets_allowed: 3,

            alien_speed: 0.1,
            alien_width: 3,
            alien_height: 2,
            alien_color: Color(40, 140, 40),
            alien_points: 50,
            fleet_drop_speed: 1.0,

            speedup_scale: 1.1,
            hit_pause_ticks: 15, // ≈0.5 s at 30 FPS
            frame_millis: 33,

            text_color: Color(30, 30, 30),
            button_width: 12,
            button_height: 3,
            button_color: Color(0, 255, 0),
            button_text_color: Color(255, 255, 255),
            button_label: "Play".to_string(),
        }
    }
}

impl Settings {
    /// Read and validate a TOML settings file.  Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        let sizes = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("button_width", self.button_width),
            ("button_height", self.button_height),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(invalid(field, "must be at least 1"));
            }
        }

        let speeds = [
            ("ship_speed", self.ship_speed),
            ("bullet_speed", self.bullet_speed),
            ("alien_speed", self.alien_speed),
            ("fleet_drop_speed", self.fleet_drop_speed),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a positive number"));
            }
        }

        if !self.speedup_scale.is_finite() || self.speedup_scale < 1.0 {
            return Err(invalid("speedup_scale", "must be at least 1.0"));
        }
        if self.ship_limit == 0 {
            return Err(invalid("ship_limit", "must be at least 1"));
        }
        if self.bullets_allowed == 0 {
            return Err(invalid("bullets_allowed", "must be at least 1"));
        }
        if self.frame_millis == 0 {
            return Err(invalid("frame_millis", "must be at least 1"));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.screen_width,
            height: self.screen_height,
        }
    }

    /// Dynamic settings at their base values, as at the start of a new game.
    pub fn initialize_dynamic_settings(&self) -> DynamicSettings {
        DynamicSettings {
            ship_speed: self.ship_speed,
            bullet_speed: self.bullet_speed,
            alien_speed: self.alien_speed,
            fleet_direction: FleetDirection::Right,
            bullets_allowed: self.bullets_allowed,
        }
    }
}

// ── Dynamic settings ─────────────────────────────────────────────────────────

/// The part of the settings that changes while a game is running.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicSettings {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_direction: FleetDirection,
    pub bullets_allowed: usize,
}

impl DynamicSettings {
    /// Compounds within a game; only `initialize_dynamic_settings` undoes it.
    pub fn increase_speed(&mut self, scale: f32) {
        self.ship_speed *= scale;
        self.bullet_speed *= scale;
        self.alien_speed *= scale;
    }
}
