//! Timer-driven entity spawning
//!
//! Enemies materialize just outside a random screen edge, aimed at the canvas
//! center; power-ups drift in from the left. Both run off the tick counter
//! rather than wall-clock intervals so runs stay deterministic under a seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, EnemyKind, Hsl, PowerUp};
use crate::aim_unit;
use crate::consts::*;

/// Roll a new enemy at a random edge position, aimed at the canvas center.
///
/// Edge selection is 50% left/right, 50% top/bottom, placed one radius
/// outside the visible area. The initial velocity is a unit vector so every
/// kind starts with the same approach speed.
pub fn spawn_enemy(rng: &mut Pcg32, bounds: Vec2) -> Enemy {
    let radius = rng.random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);

    let pos = if rng.random_bool(0.5) {
        // Left or right edge
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            bounds.x + radius
        };
        Vec2::new(x, rng.random_range(0.0..bounds.y))
    } else {
        // Top or bottom edge
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            bounds.y + radius
        };
        Vec2::new(rng.random_range(0.0..bounds.x), y)
    };

    let color = Hsl::from_hue(rng.random_range(0.0..360.0));
    let vel = aim_unit(pos, bounds / 2.0);
    let kind = EnemyKind::sample(rng);

    Enemy::new(pos, vel, radius, color, kind)
}

/// Roll a new power-up just off the left edge, drifting right at 1-2 px/tick
pub fn spawn_power_up(rng: &mut Pcg32, bounds: Vec2) -> PowerUp {
    PowerUp {
        pos: Vec2::new(-POWERUP_RADIUS * 2.0, rng.random_range(0.0..bounds.y)),
        vel: Vec2::new(rng.random_range(1.0..2.0), 0.0),
        radius: POWERUP_RADIUS,
        radians: 0.0,
    }
}
