//! Per-frame simulation step
//!
//! Advances every entity one tick, runs the pairwise collision scans, and
//! resolves damage/score. All removal scans walk their collections from the
//! end toward the start so in-place removal never skips or misindexes an
//! element.

use glam::Vec2;

use super::collision::circles_collide;
use super::spawn;
use super::state::{ActivePowerUp, GameEvent, GamePhase, GameState, Hsl, PowerUpKind, Projectile};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer position (machine-gun target)
    pub aim: Option<Vec2>,
    /// Click point to fire toward (one-shot, cleared by the caller)
    pub fire: Option<Vec2>,
    /// Accumulated movement-key impulses since the last tick. Keydown only -
    /// there is no keyup decrement, so mashing a key stacks velocity and only
    /// friction bleeds it off.
    pub thrust: Vec2,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;
    let bounds = state.bounds;

    // Player movement: impulse, friction, bounded integration
    state.player.vel += input.thrust;
    state.player.update(bounds);

    // Click fire
    if let Some(target) = input.fire {
        state
            .projectiles
            .push(Projectile::fired_at(state.player.pos, target, Hsl::WHITE));
        state.events.push(GameEvent::ProjectileFired);
    }

    // Machine gun: auto-fire toward the pointer while the timer runs
    if let Some(mut active) = state.player.power_up {
        active.ticks_left -= 1;
        state.player.power_up = (active.ticks_left > 0).then_some(active);
        if active.ticks_left > 0
            && state.frame.is_multiple_of(MACHINE_GUN_INTERVAL)
            && let Some(aim) = input.aim
        {
            state
                .projectiles
                .push(Projectile::fired_at(state.player.pos, aim, Hsl::GOLD));
            state.events.push(GameEvent::ProjectileFired);
        }
    }

    // Spawn timers run off the tick counter
    if state.frame.is_multiple_of(ENEMY_SPAWN_INTERVAL) {
        let enemy = spawn::spawn_enemy(&mut state.rng, bounds);
        state.enemies.push(enemy);
    }
    if state.frame.is_multiple_of(POWERUP_SPAWN_INTERVAL) {
        let power_up = spawn::spawn_power_up(&mut state.rng, bounds);
        state.power_ups.push(power_up);
    }

    // Ambient grid reacts to the player
    let player_pos = state.player.pos;
    for dot in &mut state.background {
        dot.update(player_pos);
    }

    // Particles: advance, drop once faded out
    for i in (0..state.particles.len()).rev() {
        state.particles[i].update();
        if state.particles[i].alpha <= 0.0 {
            state.particles.remove(i);
        }
    }

    // Projectiles: advance, drop once off screen
    for i in (0..state.projectiles.len()).rev() {
        state.projectiles[i].update();
        if state.projectiles[i].off_screen(bounds) {
            state.projectiles.remove(i);
        }
    }

    // Power-ups: drift, despawn off screen, collect on player contact
    for i in (0..state.power_ups.len()).rev() {
        state.power_ups[i].update();
        let power_up = &state.power_ups[i];
        if power_up.off_screen(bounds) {
            state.power_ups.remove(i);
            continue;
        }
        if circles_collide(
            state.player.pos,
            state.player.radius,
            power_up.pos,
            power_up.radius,
        ) {
            state.power_ups.remove(i);
            state.player.power_up = Some(ActivePowerUp {
                kind: PowerUpKind::MachineGun,
                ticks_left: POWERUP_DURATION_TICKS,
            });
            state.events.push(GameEvent::PowerUpCollected);
        }
    }

    // Enemies: advance, then player contact (run ends) and projectile hits
    'enemies: for ei in (0..state.enemies.len()).rev() {
        state.enemies[ei].update(state.player.pos);

        let (enemy_pos, enemy_radius) = {
            let enemy = &state.enemies[ei];
            (enemy.pos, enemy.radius)
        };

        if circles_collide(state.player.pos, state.player.radius, enemy_pos, enemy_radius) {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::PlayerKilled);
            break 'enemies;
        }

        for pi in (0..state.projectiles.len()).rev() {
            let enemy = &state.enemies[ei];
            let projectile = &state.projectiles[pi];
            if !circles_collide(projectile.pos, projectile.radius, enemy.pos, enemy.radius) {
                continue;
            }

            let hit_pos = projectile.pos;
            let enemy_color = enemy.color;
            let enemy_radius = enemy.radius;

            // Debris proportional to the enemy's size
            state.spawn_burst(hit_pos, enemy_color, (enemy_radius * 2.0) as usize);

            if enemy_radius - ENEMY_SHRINK > ENEMY_CORE_RADIUS {
                state.enemies[ei].radius -= ENEMY_SHRINK;
                state.score += SCORE_HIT as u64;
                state.events.push(GameEvent::EnemyHit {
                    pos: hit_pos,
                    score: SCORE_HIT,
                });
                state.projectiles.remove(pi);
            } else {
                state.score += SCORE_KILL as u64;
                state.events.push(GameEvent::EnemyDestroyed {
                    pos: hit_pos,
                    score: SCORE_KILL,
                });
                state.enemies.remove(ei);
                state.projectiles.remove(pi);
                // Enemy is gone; stop scanning projectiles against it
                continue 'enemies;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind, PowerUp};

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, Vec2::new(800.0, 600.0));
        state.start();
        state
    }

    fn parked_enemy(pos: Vec2, radius: f32) -> Enemy {
        Enemy::new(pos, Vec2::ZERO, radius, Hsl::from_hue(180.0), EnemyKind::Linear)
    }

    fn parked_projectile(pos: Vec2) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::ZERO,
            radius: PROJECTILE_RADIUS,
            color: Hsl::WHITE,
        }
    }

    #[test]
    fn test_click_fires_projectile_toward_point() {
        let mut state = playing_state();
        let input = TickInput {
            fire: Some(Vec2::new(800.0, 300.0)),
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.projectiles.len(), 1);
        let p = &state.projectiles[0];
        // Due right of the player: pure +x at the standard speed
        assert!((p.vel.x - PROJECTILE_SPEED).abs() < 1e-4);
        assert!(p.vel.y.abs() < 1e-4);
        assert!(state.take_events().contains(&GameEvent::ProjectileFired));
    }

    #[test]
    fn test_projectile_removed_off_screen() {
        let mut state = playing_state();
        state.projectiles.push(Projectile {
            pos: Vec2::new(795.0, 300.0),
            vel: Vec2::new(PROJECTILE_SPEED, 0.0),
            radius: PROJECTILE_RADIUS,
            color: Hsl::WHITE,
        });
        // Needs to travel past x=805 before x - radius > 800
        for _ in 0..4 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_shrink_then_destroy_scoring() {
        let mut state = playing_state();
        let enemy_pos = Vec2::new(100.0, 100.0);
        state.enemies.push(parked_enemy(enemy_pos, 20.0));
        state.projectiles.push(parked_projectile(enemy_pos));

        tick(&mut state, &TickInput::default());

        // First hit: 20 - 10 > 7, so the enemy shrinks and scores 100
        assert_eq!(state.enemies.len(), 1);
        assert!((state.enemies[0].radius - 10.0).abs() < 1e-5);
        assert_eq!(state.score, 100);
        assert!(state.projectiles.is_empty());
        // Debris burst proportional to the radius at impact
        assert_eq!(state.particles.len(), 40);
        let events = state.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyHit { score: 100, .. })));

        // Second hit: 10 - 10 = 0 <= 7, so the enemy dies and scores 150
        state.projectiles.push(parked_projectile(enemy_pos));
        tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 250);
        let events = state.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDestroyed { score: 150, .. })));
    }

    #[test]
    fn test_enemy_reaching_player_ends_run() {
        let mut state = playing_state();
        let player_pos = state.player.pos;
        state.enemies.push(parked_enemy(player_pos, 20.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.take_events().contains(&GameEvent::PlayerKilled));

        // Dead state no longer advances
        let frame = state.frame;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_enemy_spawn_cadence() {
        let mut state = playing_state();
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies.len(), 1);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_power_up_spawn_cadence() {
        let mut state = playing_state();
        // Cull enemies every tick so the run survives the full interval
        for _ in 0..POWERUP_SPAWN_INTERVAL {
            tick(&mut state, &TickInput::default());
            state.enemies.clear();
        }
        assert_eq!(state.power_ups.len(), 1);

        state.power_ups.clear();
        for _ in 0..POWERUP_SPAWN_INTERVAL {
            tick(&mut state, &TickInput::default());
            state.enemies.clear();
        }
        assert_eq!(state.power_ups.len(), 1);
    }

    #[test]
    fn test_power_up_collect_and_machine_gun() {
        let mut state = playing_state();
        state.power_ups.push(PowerUp {
            pos: state.player.pos,
            vel: Vec2::new(1.0, 0.0),
            radius: POWERUP_RADIUS,
            radians: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        let active = state.player.power_up.expect("machine gun granted");
        assert_eq!(active.kind, PowerUpKind::MachineGun);
        assert!(state.take_events().contains(&GameEvent::PowerUpCollected));

        // With the pointer tracked, the gun fires every other tick
        let input = TickInput {
            aim: Some(Vec2::new(0.0, 0.0)),
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert_eq!(state.projectiles.len(), 5);
        for p in &state.projectiles {
            assert_eq!(p.color, Hsl::GOLD);
        }
    }

    #[test]
    fn test_machine_gun_expires() {
        let mut state = playing_state();
        state.player.power_up = Some(ActivePowerUp {
            kind: PowerUpKind::MachineGun,
            ticks_left: 3,
        });
        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.power_up.is_none());
    }

    #[test]
    fn test_thrust_impulse_with_friction() {
        let mut state = playing_state();
        let input = TickInput {
            thrust: Vec2::new(MOVE_IMPULSE, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        // Impulse lands before friction, so one tick leaves 1.0 * 0.97
        assert!((state.player.vel.x - MOVE_IMPULSE * PLAYER_FRICTION).abs() < 1e-5);

        // No keyup: a second press stacks on top of the decayed velocity
        tick(&mut state, &input);
        assert!(state.player.vel.x > MOVE_IMPULSE * PLAYER_FRICTION);
    }

    #[test]
    fn test_invariants_hold_over_long_run() {
        let mut state = playing_state();
        let mut prev_score = 0;
        for i in 0..1000 {
            let input = TickInput {
                // Fire at the canvas center every 15 ticks to exercise combat
                fire: (i % 15 == 0).then_some(Vec2::new(400.0, 0.0)),
                aim: Some(Vec2::new(400.0, 0.0)),
                ..Default::default()
            };
            tick(&mut state, &input);
            state.events.clear();

            assert!(state.player.pos.is_finite());
            for e in &state.enemies {
                assert!(e.pos.is_finite(), "enemy position not finite");
                assert!(e.radius > 0.0, "enemy radius not positive");
            }
            for p in &state.projectiles {
                assert!(p.pos.is_finite());
            }
            for p in &state.particles {
                assert!(p.pos.is_finite());
                assert!(p.alpha > 0.0, "faded particle not removed");
            }
            assert!(state.score >= prev_score, "score decreased");
            prev_score = state.score;

            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}
