//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed 60 Hz ticks, velocities in pixels per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::circles_collide;
pub use spawn::{spawn_enemy, spawn_power_up};
pub use state::{
    ActivePowerUp, BackgroundParticle, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Hsl,
    Particle, Player, PowerUp, PowerUpKind, Projectile,
};
pub use tick::{TickInput, tick};
