//! Gameplay core for a fixed-camera arcade shooter.
//!
//! The library owns every rule of the game (craft, projectiles, the enemy
//! formation, scoring, lives and levels).  Drawing, input polling and asset
//! files are reached through small interfaces so the binary can plug in a
//! terminal while tests plug in recorders.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod entities;
pub mod error;
pub mod formation;
pub mod hud;
pub mod input;
pub mod session;
pub mod settings;
pub mod surface;
