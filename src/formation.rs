//! Formation manager: builds the enemy grid and moves it as one body.

use crate::entities::{Body, Enemy, Motion, Viewport};
use crate::settings::{DynamicSettings, FleetDirection};

/// Tile the viewport with a fresh grid of enemies.
///
/// Enemies start one enemy-width from the sides and one enemy-height from the
/// top; each one occupies half of a `2w × 2h` cell.  The bottom strip (craft
/// height plus two enemy heights) stays free.  A viewport too small for a
/// single row or column yields an empty formation.
pub fn build_formation(viewport: Viewport, craft_height: u32, enemy_w: u32, enemy_h: u32) -> Vec<Enemy> {
    if enemy_w == 0 || enemy_h == 0 {
        return Vec::new();
    }
    let (w, h) = (i64::from(enemy_w), i64::from(enemy_h));

    let available_x = i64::from(viewport.width) - 2 * w;
    let available_y = i64::from(viewport.height) - 3 * h - i64::from(craft_height);
    let columns = (available_x / (2 * w)).max(0);
    let rows = (available_y / (2 * h)).max(0);

    let enemies: Vec<Enemy> = (0..rows)
        .flat_map(|row| {
            (0..columns).map(move |column| {
                Enemy::new(
                    (w + 2 * w * column) as f32,
                    (h + 2 * h * row) as f32,
                    enemy_w,
                    enemy_h,
                )
            })
        })
        .collect();

    tracing::debug!(rows, columns, "built formation");
    enemies
}

/// Move every enemy sideways by one step in the fleet direction.
pub fn step(enemies: &mut [Enemy], motion: &Motion) {
    for enemy in enemies.iter_mut() {
        enemy.advance(motion);
    }
}

/// True if any enemy touches or crosses a side of the viewport.
pub fn check_edges(enemies: &[Enemy], viewport: Viewport) -> bool {
    enemies.iter().any(|e| e.at_edge(viewport))
}

/// Drop the whole formation and reverse its direction.
pub fn reverse_and_drop(enemies: &mut [Enemy], drop: f32, direction: &mut FleetDirection) {
    for enemy in enemies.iter_mut() {
        enemy.y += drop;
    }
    *direction = direction.flip();
}

/// One tick of fleet movement: step, then reverse and drop at most once.
///
/// Returns `true` when the fleet changed direction.
pub fn update_fleet(
    enemies: &mut [Enemy],
    dynamic: &mut DynamicSettings,
    drop: f32,
    viewport: Viewport,
) -> bool {
    step(enemies, &Motion::new(dynamic, viewport));
    if !check_edges(enemies, viewport) {
        return false;
    }
    reverse_and_drop(enemies, drop, &mut dynamic.fleet_direction);
    tracing::debug!(direction = ?dynamic.fleet_direction, "fleet reversed");
    true
}
