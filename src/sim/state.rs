//! Game state and core simulation types
//!
//! Entity collections are owned by [`GameState`] and passed by reference to
//! the tick - no module-level globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::aim_unit;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start modal is showing, nothing simulated yet
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended - an enemy reached the player
    GameOver,
}

/// A flat HSL color record, rendered as a CSS `hsl()` string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const WHITE: Hsl = Hsl {
        h: 0.0,
        s: 0.0,
        l: 100.0,
    };
    /// Machine-gun rounds
    pub const GOLD: Hsl = Hsl {
        h: 50.0,
        s: 100.0,
        l: 50.0,
    };

    /// Enemy palette: random hue at half saturation/lightness
    pub fn from_hue(h: f32) -> Self {
        Self { h, s: 50.0, l: 50.0 }
    }
}

/// Enemy movement archetype, fixed at spawn time by a single weighted draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Fixed velocity toward the center (50%)
    Linear,
    /// Re-aims at the player every tick (25%)
    Homing,
    /// Orbits an invisible center that moves linearly (12.5%)
    Spinning,
    /// Orbits a center that homes toward the player (12.5%)
    HomingSpinning,
}

impl EnemyKind {
    /// Weighted random draw: 50% / 25% / 12.5% / 12.5%
    pub fn sample(rng: &mut Pcg32) -> Self {
        let roll: f32 = rng.random();
        if roll < 0.5 {
            EnemyKind::Linear
        } else if roll < 0.75 {
            EnemyKind::Homing
        } else if roll < 0.875 {
            EnemyKind::Spinning
        } else {
            EnemyKind::HomingSpinning
        }
    }
}

/// Timed power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Auto-fire toward the mouse position
    MachineGun,
}

/// A power-up the player is currently carrying
#[derive(Debug, Clone, Copy)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub ticks_left: u32,
}

/// The player's dot
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub power_up: Option<ActivePowerUp>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            power_up: None,
        }
    }

    /// Apply friction, then move each axis only if it stays inside `bounds`.
    ///
    /// A blocked axis has its velocity zeroed. The max-side checks carry an
    /// extra `radius + 15` margin.
    pub fn update(&mut self, bounds: Vec2) {
        self.vel *= PLAYER_FRICTION;

        let pad = self.radius + PLAYER_WALL_PAD;
        if self.pos.x + self.vel.x + pad <= bounds.x && self.pos.x - self.radius + self.vel.x >= 0.0
        {
            self.pos.x += self.vel.x;
        } else {
            self.vel.x = 0.0;
        }

        if self.pos.y + self.vel.y + pad <= bounds.y && self.pos.y - self.radius + self.vel.y >= 0.0
        {
            self.pos.y += self.vel.y;
        } else {
            self.vel.y = 0.0;
        }
    }
}

/// A fired projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Hsl,
}

impl Projectile {
    /// Fire from `origin` toward `target` at the standard speed
    pub fn fired_at(origin: Vec2, target: Vec2, color: Hsl) -> Self {
        Self {
            pos: origin,
            vel: aim_unit(origin, target) * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            color,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Fully outside the canvas bounds
    pub fn off_screen(&self, bounds: Vec2) -> bool {
        self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > bounds.x
            || self.pos.y + self.radius < 0.0
            || self.pos.y - self.radius > bounds.y
    }
}

/// An enemy dot converging on the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Hsl,
    pub kind: EnemyKind,
    /// Orbit center for spinning kinds (tracks `pos` otherwise)
    pub center: Vec2,
    /// Orbit phase, advances monotonically
    pub radians: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Hsl, kind: EnemyKind) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            kind,
            center: pos,
            radians: 0.0,
        }
    }

    /// Advance one tick. Homing kinds re-aim at `player_pos`; spinning kinds
    /// orbit their center at a fixed radius.
    pub fn update(&mut self, player_pos: Vec2) {
        self.radians += SPIN_STEP;

        match self.kind {
            EnemyKind::Linear => {
                self.pos += self.vel;
            }
            EnemyKind::Homing => {
                self.vel = aim_unit(self.pos, player_pos);
                self.pos += self.vel;
            }
            EnemyKind::Spinning => {
                self.center += self.vel;
                self.pos = self.center
                    + Vec2::new(self.radians.cos(), self.radians.sin()) * SPIN_ORBIT_RADIUS;
            }
            EnemyKind::HomingSpinning => {
                self.vel = aim_unit(self.center, player_pos);
                self.center += self.vel;
                self.pos = self.center
                    + Vec2::new(self.radians.cos(), self.radians.sin()) * SPIN_ORBIT_RADIUS;
            }
        }
    }
}

/// Explosion debris from a projectile hit
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Hsl,
    pub alpha: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.vel *= PARTICLE_FRICTION;
        self.pos += self.vel;
        self.alpha -= PARTICLE_ALPHA_DECAY;
    }
}

/// A collectible machine-gun pickup drifting across the screen
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Render rotation only
    pub radians: f32,
}

impl PowerUp {
    pub fn update(&mut self) {
        self.radians += 0.01;
        self.pos.x += self.vel.x;
    }

    pub fn off_screen(&self, bounds: Vec2) -> bool {
        self.pos.x - self.radius > bounds.x
    }
}

/// Ambient grid dot that reacts to player proximity
#[derive(Debug, Clone)]
pub struct BackgroundParticle {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl BackgroundParticle {
    /// Ease alpha toward a target based on distance to the player:
    /// invisible up close, half-lit nearby, dim otherwise.
    pub fn update(&mut self, player_pos: Vec2) {
        let dist = self.pos.distance(player_pos);
        let target = if dist < 100.0 {
            0.0
        } else if dist < 200.0 {
            0.5
        } else {
            0.1
        };
        self.alpha += (target - self.alpha) * 0.1;
    }
}

/// Things that happened during a tick, drained by the frontend for
/// audio cues and DOM score labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ProjectileFired,
    /// An enemy was shrunk; carries the hit position and score delta
    EnemyHit { pos: Vec2, score: u32 },
    /// An enemy was destroyed; carries the hit position and score delta
    EnemyDestroyed { pos: Vec2, score: u32 },
    PowerUpCollected,
    PlayerKilled,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Canvas dimensions in CSS pixels
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    /// Tick counter; drives spawn timers and machine-gun cadence
    pub frame: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub background: Vec<BackgroundParticle>,
    /// Event queue, drained by the frontend each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state sitting in the start menu
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: GamePhase::Menu,
            score: 0,
            frame: 0,
            player: Player::new(bounds / 2.0),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            background: Vec::new(),
            events: Vec::new(),
        };
        state.seed_background();
        state
    }

    /// Reset everything for a new run and start playing.
    ///
    /// The RNG is reseeded from `seed`, so a run replays exactly under the
    /// same seed; callers wanting a fresh spawn sequence assign a new seed
    /// before starting.
    pub fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.score = 0;
        self.frame = 0;
        self.player = Player::new(self.bounds / 2.0);
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.events.clear();
        self.seed_background();
        self.phase = GamePhase::Playing;
    }

    /// Resize the play field (canvas resize); re-lays the background grid
    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.seed_background();
    }

    /// Drain queued events for the frontend
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lay the ambient dot grid across the canvas
    fn seed_background(&mut self) {
        self.background.clear();
        let mut x = 0.0;
        while x < self.bounds.x {
            let mut y = 0.0;
            while y < self.bounds.y {
                self.background.push(BackgroundParticle {
                    pos: Vec2::new(x, y),
                    radius: BACKGROUND_PARTICLE_RADIUS,
                    alpha: 0.1,
                });
                y += BACKGROUND_GRID_SPACING;
            }
            x += BACKGROUND_GRID_SPACING;
        }
    }

    /// Spawn a burst of explosion particles at `pos`, oldest evicted first
    /// when the budget is exhausted.
    pub fn spawn_burst(&mut self, pos: Vec2, color: Hsl, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let radius: f32 = self.rng.random_range(0.0..2.0);
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * (self.rng.random::<f32>() * 5.0),
                (self.rng.random::<f32>() - 0.5) * (self.rng.random::<f32>() * 5.0),
            );
            self.particles.push(Particle {
                pos,
                vel,
                radius,
                color,
                alpha: 1.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_homing_enemy_velocity_is_unit_toward_player() {
        let player_pos = Vec2::new(400.0, 300.0);
        let mut enemy = Enemy::new(
            Vec2::new(0.0, 0.0),
            Vec2::ZERO,
            20.0,
            Hsl::from_hue(120.0),
            EnemyKind::Homing,
        );
        enemy.update(player_pos);
        assert!((enemy.vel.length() - 1.0).abs() < 1e-5);
        // Pointing into the lower-right quadrant, toward the player
        assert!(enemy.vel.x > 0.0 && enemy.vel.y > 0.0);
    }

    #[test]
    fn test_spinning_enemy_orbits_center_at_fixed_radius() {
        let mut enemy = Enemy::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            20.0,
            Hsl::from_hue(0.0),
            EnemyKind::Spinning,
        );
        for _ in 0..50 {
            enemy.update(Vec2::new(400.0, 300.0));
            let orbit = enemy.pos.distance(enemy.center);
            assert!((orbit - SPIN_ORBIT_RADIUS).abs() < 1e-3);
        }
        // Center itself advanced linearly
        assert!((enemy.center.x - 150.0).abs() < 1e-3);
        assert!((enemy.center.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_player_blocked_at_bounds() {
        let mut player = Player::new(Vec2::new(15.0, 300.0));
        player.vel = Vec2::new(-50.0, 0.0);
        player.update(bounds());
        // Move would cross the left edge: position held, velocity zeroed
        assert_eq!(player.pos.x, 15.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_player_friction_decays_velocity() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        player.vel = Vec2::new(4.0, 0.0);
        player.update(bounds());
        assert!((player.vel.x - 4.0 * PLAYER_FRICTION).abs() < 1e-6);
        assert!(player.pos.x > 400.0);
    }

    #[test]
    fn test_enemy_kind_distribution() {
        use rand::SeedableRng;
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 4];
        let n = 20_000;
        for _ in 0..n {
            match EnemyKind::sample(&mut rng) {
                EnemyKind::Linear => counts[0] += 1,
                EnemyKind::Homing => counts[1] += 1,
                EnemyKind::Spinning => counts[2] += 1,
                EnemyKind::HomingSpinning => counts[3] += 1,
            }
        }
        let frac = |c: u32| c as f32 / n as f32;
        assert!((frac(counts[0]) - 0.5).abs() < 0.02);
        assert!((frac(counts[1]) - 0.25).abs() < 0.02);
        assert!((frac(counts[2]) - 0.125).abs() < 0.02);
        assert!((frac(counts[3]) - 0.125).abs() < 0.02);
    }

    #[test]
    fn test_particle_alpha_monotonic() {
        let mut particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, -1.0),
            radius: 1.5,
            color: Hsl::WHITE,
            alpha: 1.0,
        };
        let mut prev = particle.alpha;
        for _ in 0..150 {
            particle.update();
            assert!(particle.alpha <= prev);
            prev = particle.alpha;
        }
        assert!(particle.alpha <= 0.0);
    }

    #[test]
    fn test_burst_respects_particle_budget() {
        let mut state = GameState::new(1, bounds());
        state.spawn_burst(Vec2::new(100.0, 100.0), Hsl::from_hue(200.0), MAX_PARTICLES + 50);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_restart_with_new_seed_rolls_new_spawns() {
        use crate::sim::spawn::spawn_enemy;

        let mut state = GameState::new(1, bounds());
        state.start();
        let first = spawn_enemy(&mut state.rng, bounds());

        // New seed before restart: a different spawn sequence
        state.seed = 2;
        state.start();
        let second = spawn_enemy(&mut state.rng, bounds());
        assert_ne!(first.pos, second.pos);

        // Same seed replays the run exactly
        state.seed = 1;
        state.start();
        let replay = spawn_enemy(&mut state.rng, bounds());
        assert_eq!(first.pos, replay.pos);
        assert_eq!(first.kind, replay.kind);
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = GameState::new(42, bounds());
        state.start();
        state.score = 500;
        state.frame = 123;
        state.enemies.push(Enemy::new(
            Vec2::ZERO,
            Vec2::ZERO,
            10.0,
            Hsl::from_hue(10.0),
            EnemyKind::Linear,
        ));
        state.start();
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, bounds() / 2.0);
    }
}
