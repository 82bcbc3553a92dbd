//! Circle-circle collision detection
//!
//! Everything in the game is a circle, so the whole collision story is one
//! distance check with a one-pixel slop.

use glam::Vec2;

use crate::consts::COLLISION_SLOP;

/// Two circles collide when the gap between their edges is below the slop.
///
/// `distance(centers) - r1 - r2 < 1.0` - slightly generous so grazing
/// contacts register.
#[inline]
pub fn circles_collide(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) - a_radius - b_radius < COLLISION_SLOP
}
