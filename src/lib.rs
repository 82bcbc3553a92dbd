//! Dot Blitz - a browser arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: Canvas 2D rendering (wasm only)
//! - `audio`: Procedural Web Audio sound effects (wasm only)
//! - `settings`: Player preferences persisted to LocalStorage
//! - `highscores`: Leaderboard persisted to LocalStorage

pub mod highscores;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate, locked to the nominal display refresh.
    /// Velocities throughout the sim are expressed in pixels per tick.
    pub const TICK_HZ: u32 = 60;
    /// Fixed timestep used by the frame accumulator
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_FRICTION: f32 = 0.97;
    /// Extra margin on the right/bottom bound checks
    pub const PLAYER_WALL_PAD: f32 = 15.0;
    /// Velocity nudge per movement key press
    pub const MOVE_IMPULSE: f32 = 1.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Enemy defaults
    pub const ENEMY_MIN_RADIUS: f32 = 5.0;
    pub const ENEMY_MAX_RADIUS: f32 = 35.0;
    /// Radius lost per projectile hit
    pub const ENEMY_SHRINK: f32 = 10.0;
    /// Shrinking below this destroys the enemy instead
    pub const ENEMY_CORE_RADIUS: f32 = 7.0;
    /// Orbit radius for spinning kinds
    pub const SPIN_ORBIT_RADIUS: f32 = 20.0;
    /// Orbit phase advance per tick
    pub const SPIN_STEP: f32 = 0.1;
    /// Ticks between enemy spawns (1 second)
    pub const ENEMY_SPAWN_INTERVAL: u64 = 60;

    /// Score awards
    pub const SCORE_HIT: u32 = 100;
    pub const SCORE_KILL: u32 = 150;

    /// Particle defaults
    pub const PARTICLE_FRICTION: f32 = 0.99;
    pub const PARTICLE_ALPHA_DECAY: f32 = 0.01;
    pub const MAX_PARTICLES: usize = 512;

    /// Power-up defaults
    pub const POWERUP_RADIUS: f32 = 14.0;
    /// Ticks between power-up spawns (9 seconds)
    pub const POWERUP_SPAWN_INTERVAL: u64 = 540;
    /// Machine gun duration (5 seconds)
    pub const POWERUP_DURATION_TICKS: u32 = 300;
    /// Machine gun fires every other tick
    pub const MACHINE_GUN_INTERVAL: u64 = 2;

    /// Two circles collide when center distance minus radii is below this
    pub const COLLISION_SLOP: f32 = 1.0;

    /// Ambient background grid
    pub const BACKGROUND_GRID_SPACING: f32 = 30.0;
    pub const BACKGROUND_PARTICLE_RADIUS: f32 = 3.0;
}

/// Unit vector pointing from `from` toward `to`.
///
/// Computed via `atan2` then `(cos, sin)`; every aimed entity (enemies,
/// projectiles) uses this. Returns zero when the points coincide.
#[inline]
pub fn aim_unit(from: Vec2, to: Vec2) -> Vec2 {
    if from == to {
        return Vec2::ZERO;
    }
    let angle = (to.y - from.y).atan2(to.x - from.x);
    Vec2::new(angle.cos(), angle.sin())
}
