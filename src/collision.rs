//! Collision and scoring.
//!
//! Removal follows mark-and-compact: hits are recorded during the scan and the
//! live sets are rebuilt afterwards, so nothing is removed while iterating.

use crate::entities::{Body, Craft, Enemy, Projectile, Viewport};
use crate::formation::build_formation;
use crate::session::Session;
use crate::settings::{DynamicSettings, Settings};

/// One projectile/enemy pair destroyed this tick.
///
/// Indices refer to the slices as they were before the hits were removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub projectile: usize,
    pub enemy: usize,
}

/// Destroy every projectile that overlaps an enemy, together with that enemy,
/// and award `points` per enemy.
///
/// A projectile takes out at most one enemy (the first overlapping one still
/// alive); a projectile whose targets were all claimed earlier survives.
pub fn resolve_projectile_enemy(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    session: &mut Session,
    points: u32,
) -> Vec<Hit> {
    let mut killed = vec![false; enemies.len()];
    let mut hits: Vec<Hit> = Vec::new();

    for (pi, projectile) in projectiles.iter().enumerate() {
        let shot = projectile.bounding_box();
        let target = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !killed[*ei] && shot.intersects(&enemy.bounding_box()));
        if let Some((ei, _)) = target {
            killed[ei] = true;
            hits.push(Hit {
                projectile: pi,
                enemy: ei,
            });
        }
    }

    if hits.is_empty() {
        return hits;
    }

    let mut spent = vec![false; projectiles.len()];
    for hit in &hits {
        spent[hit.projectile] = true;
    }
    let mut index = 0;
    projectiles.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
    let mut index = 0;
    enemies.retain(|_| {
        let keep = !killed[index];
        index += 1;
        keep
    });

    session.add_points(points.saturating_mul(hits.len() as u32));
    hits
}

pub fn check_craft_enemy(craft: &Craft, enemies: &[Enemy]) -> bool {
    let ship = craft.bounding_box();
    enemies.iter().any(|e| e.bounding_box().intersects(&ship))
}

pub fn check_enemies_reached_bottom(enemies: &[Enemy], viewport: Viewport) -> bool {
    enemies
        .iter()
        .any(|e| e.bounding_box().bottom() >= viewport.height as i32)
}

/// Start the next level if the formation has been wiped out.
///
/// Clears the remaining projectiles, builds a fresh formation, bumps the level
/// and the projectile allowance, and speeds everything up.
pub fn level_up_if_cleared(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    session: &mut Session,
    settings: &Settings,
    dynamic: &mut DynamicSettings,
    craft_height: u32,
) -> bool {
    if !enemies.is_empty() {
        return false;
    }

    projectiles.clear();
    *enemies = build_formation(
        settings.viewport(),
        craft_height,
        settings.alien_width,
        settings.alien_height,
    );
    dynamic.increase_speed(settings.speedup_scale);
    session.level += 1;
    dynamic.bullets_allowed += 1;

    tracing::info!(
        level = session.level,
        score = session.score,
        bullets_allowed = dynamic.bullets_allowed,
        "level cleared"
    );
    true
}
