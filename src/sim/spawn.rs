//! Entity spawning
//!
//! Enemies and asteroids appear by per-frame dice rolls; bullets appear on
//! fire input subject to a cooldown; particles appear in bursts where
//! something was destroyed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::state::{Asteroid, Bullet, Enemy, Particle, SimulationState};
use crate::config::GameConfig;

/// Uniform randomness for the spawner
pub trait RandomSource {
    /// Sample in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Sample in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

impl RandomSource for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Production RNG for a session
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Always returns the same value. `FixedRandom(0.0)` makes every roll
/// succeed, `FixedRandom(0.999)` makes every roll fail.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f32);

impl RandomSource for FixedRandom {
    fn next_f32(&mut self) -> f32 {
        self.0
    }
}

/// Replays a list of values, cycling at the end. An empty list yields 0.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        let Some(&value) = self.values.get(self.cursor) else {
            return 0.0;
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Roll for a new enemy just above the top edge
pub fn try_spawn_enemy(
    state: &mut SimulationState,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) -> bool {
    if !rng.chance(config.enemy_spawn_chance) {
        return false;
    }
    let x = rng.range(0.0, config.width - config.enemy_size);
    state.enemies.push(Enemy {
        pos: Vec2::new(x, -config.enemy_size),
        size: Vec2::splat(config.enemy_size),
        health: config.enemy_health,
    });
    log::debug!("Enemy spawned at x={x:.1}");
    true
}

/// Roll for a new asteroid of random size and drift just above the top edge
pub fn try_spawn_asteroid(
    state: &mut SimulationState,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) -> bool {
    if !rng.chance(config.asteroid_spawn_chance) {
        return false;
    }
    let size = rng.range(config.asteroid_min_size, config.asteroid_max_size);
    let x = rng.range(0.0, config.width - size);
    let drift = rng.range(-config.asteroid_max_drift, config.asteroid_max_drift);
    state.asteroids.push(Asteroid {
        pos: Vec2::new(x, -size),
        vel: Vec2::new(drift, config.asteroid_speed),
        size,
    });
    log::debug!("Asteroid spawned at x={x:.1}, size={size:.1}");
    true
}

/// Fire from the ship's nose if the cooldown allows it
pub fn try_fire(state: &mut SimulationState, config: &GameConfig, now_ms: f64) -> bool {
    let ready = state
        .last_fire_ms
        .is_none_or(|last| now_ms - last >= config.fire_cooldown_ms);
    if !ready {
        return false;
    }
    let player = &state.player;
    let pos = Vec2::new(
        player.pos.x + player.size.x / 2.0 - config.bullet_width / 2.0,
        player.pos.y,
    );
    state.bullets.push(Bullet {
        pos,
        size: Vec2::new(config.bullet_width, config.bullet_height),
    });
    state.last_fire_ms = Some(now_ms);
    true
}

/// Scatter `particle_count` particles over `area`
pub fn emit_burst(
    particles: &mut Vec<Particle>,
    area: Aabb,
    color: [f32; 4],
    config: &GameConfig,
    rng: &mut impl RandomSource,
) {
    let spread = config.particle_speed;
    particles.reserve(config.particle_count);
    for _ in 0..config.particle_count {
        let pos = Vec2::new(
            area.x + rng.next_f32() * area.width,
            area.y + rng.next_f32() * area.height,
        );
        let size = rng.next_f32() * config.particle_size + 1.0;
        let vel = Vec2::new(rng.range(-spread, spread), rng.range(-spread, spread));
        particles.push(Particle {
            pos,
            vel,
            size,
            color,
            alpha: 1.0,
        });
    }
}
