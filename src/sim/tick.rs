//! Per-frame simulation step
//!
//! Advances every pool by one display frame. The order of the stages is
//! fixed: player, bullets, enemies, asteroids, particles. Hazards are checked
//! against the player before bullets, so a simultaneous hit costs a life
//! instead of scoring.

use glam::Vec2;

use super::collision::{Bounded, collides};
use super::spawn::{RandomSource, emit_burst, try_fire, try_spawn_asteroid, try_spawn_enemy};
use super::state::SimulationState;
use crate::config::GameConfig;
use crate::input::InputFlags;
use crate::palette;

/// Inputs sampled once at the start of a frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub flags: InputFlags,
    /// Frame timestamp (ms), used for the fire cooldown
    pub now_ms: f64,
}

/// Advance the simulation by one frame. Does nothing unless running.
pub fn tick(
    state: &mut SimulationState,
    input: &TickInput,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) {
    if !state.is_running() {
        return;
    }
    state.frame += 1;

    move_player(state, &input.flags, config);

    if input.flags.fire {
        try_fire(state, config, input.now_ms);
    }
    update_bullets(state, config);

    try_spawn_enemy(state, config, rng);
    update_enemies(state, config, rng);
    if state.lives == 0 {
        state.end();
        return;
    }

    try_spawn_asteroid(state, config, rng);
    update_asteroids(state, config, rng);
    if state.lives == 0 {
        state.end();
        return;
    }

    update_particles(state, config);
}

/// Unnormalized: holding two axes moves at full speed on both
fn move_player(state: &mut SimulationState, flags: &InputFlags, config: &GameConfig) {
    let mut delta = Vec2::ZERO;
    if flags.left {
        delta.x -= config.player_speed;
    }
    if flags.right {
        delta.x += config.player_speed;
    }
    if flags.up {
        delta.y -= config.player_speed;
    }
    if flags.down {
        delta.y += config.player_speed;
    }
    state.player.pos += delta;
    state.player.clamp_to_arena(config.width, config.height);
}

fn update_bullets(state: &mut SimulationState, config: &GameConfig) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= config.bullet_speed;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);
}

fn update_enemies(state: &mut SimulationState, config: &GameConfig, rng: &mut impl RandomSource) {
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut bullet_dead = vec![false; state.bullets.len()];
    let player_box = state.player.aabb();

    for i in 0..state.enemies.len() {
        if state.lives == 0 {
            break;
        }
        state.enemies[i].pos.y += config.enemy_speed;
        let enemy_box = state.enemies[i].aabb();

        if collides(&player_box, &enemy_box) {
            enemy_dead[i] = true;
            state.lose_life();
            log::debug!("Enemy rammed the player, lives={}", state.lives);
            continue;
        }

        let mut destroyed = false;
        for (j, bullet) in state.bullets.iter().enumerate() {
            if bullet_dead[j] || !collides(bullet, &enemy_box) {
                continue;
            }
            bullet_dead[j] = true;
            state.enemies[i].health -= 1;
            if state.enemies[i].health <= 0 {
                destroyed = true;
                break;
            }
        }

        if destroyed {
            enemy_dead[i] = true;
            state.award(config.enemy_score);
            emit_burst(&mut state.particles, enemy_box, palette::ENEMY, config, rng);
            log::debug!("Enemy destroyed, score={}", state.score);
        } else if state.enemies[i].pos.y > config.height {
            enemy_dead[i] = true;
        }
    }

    retain_unmarked(&mut state.enemies, &enemy_dead);
    retain_unmarked(&mut state.bullets, &bullet_dead);
}

fn update_asteroids(
    state: &mut SimulationState,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) {
    let mut rock_dead = vec![false; state.asteroids.len()];
    let mut bullet_dead = vec![false; state.bullets.len()];
    let player_box = state.player.aabb();

    for i in 0..state.asteroids.len() {
        if state.lives == 0 {
            break;
        }
        let rock = &mut state.asteroids[i];
        rock.pos += rock.vel;
        let rock_box = rock.aabb();

        if collides(&player_box, &rock_box) {
            rock_dead[i] = true;
            state.lose_life();
            emit_burst(&mut state.particles, rock_box, palette::ASTEROID, config, rng);
            log::debug!("Asteroid hit the player, lives={}", state.lives);
            continue;
        }

        let hit = state
            .bullets
            .iter()
            .enumerate()
            .find(|(j, bullet)| !bullet_dead[*j] && collides(*bullet, &rock_box))
            .map(|(j, _)| j);
        if let Some(j) = hit {
            bullet_dead[j] = true;
            rock_dead[i] = true;
            state.award(config.asteroid_score);
            emit_burst(&mut state.particles, rock_box, palette::ASTEROID, config, rng);
            log::debug!("Asteroid destroyed, score={}", state.score);
        } else if state.asteroids[i].is_outside(config.width, config.height) {
            rock_dead[i] = true;
        }
    }

    retain_unmarked(&mut state.asteroids, &rock_dead);
    retain_unmarked(&mut state.bullets, &bullet_dead);
}

fn update_particles(state: &mut SimulationState, config: &GameConfig) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.alpha -= config.particle_alpha_decay;
    }
    state.particles.retain(|p| p.alpha > 0.0);
}

/// Drop every element whose mask entry is set. `mask` covers the pool as it
/// was when the pass began; nothing is appended to a pool during its pass.
fn retain_unmarked<T>(pool: &mut Vec<T>, mask: &[bool]) {
    let mut index = 0;
    pool.retain(|_| {
        let keep = !mask.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}
