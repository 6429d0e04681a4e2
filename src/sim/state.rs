//! Simulation state and entity types
//!
//! Everything the frame step reads or writes lives in [`SimulationState`].
//! Each pool owns its entities; order within a pool is spawn order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounded};
use crate::config::GameConfig;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    NotStarted,
    /// Frames are being simulated
    Running,
    /// Lives ran out; only a restart leaves this phase
    GameOver,
}

/// Observable changes produced by a frame step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u32),
    GameOver { final_score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let (x, y) = config.player_start();
        let mut player = Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(config.player_size),
        };
        player.clamp_to_arena(config.width, config.height);
        player
    }

    /// Keep the ship fully inside the arena
    pub fn clamp_to_arena(&mut self, width: f32, height: f32) {
        self.pos.x = self.pos.x.clamp(0.0, (width - self.size.x).max(0.0));
        self.pos.y = self.pos.y.clamp(0.0, (height - self.size.y).max(0.0));
    }
}

impl Bounded for Player {
    fn aabb(&self) -> Aabb {
        Aabb::at(self.pos, self.size)
    }
}

/// A projectile travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounded for Bullet {
    fn aabb(&self) -> Aabb {
        Aabb::at(self.pos, self.size)
    }
}

/// A descending enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
}

impl Bounded for Enemy {
    fn aabb(&self) -> Aabb {
        Aabb::at(self.pos, self.size)
    }
}

/// A drifting rock; dies to a single hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Edge length of the bounding square
    pub size: f32,
}

impl Asteroid {
    /// Fully past the bottom edge or either side
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.pos.y > height || self.pos.x < -self.size || self.pos.x > width
    }
}

impl Bounded for Asteroid {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A fading debris square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: [f32; 4],
    /// Opacity, 1 at birth, removed at or below 0
    pub alpha: f32,
}

/// Complete per-session simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub asteroids: Vec<Asteroid>,
    pub particles: Vec<Particle>,
    /// Timestamp (ms) of the last bullet fired this session
    pub last_fire_ms: Option<f64>,
    /// Frames simulated since the last reset
    pub frame: u64,
    /// Events not yet handed to observers
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SimulationState {
    /// Fresh state in the `NotStarted` phase
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            lives: config.starting_lives,
            player: Player::new(config),
            bullets: Vec::new(),
            enemies: Vec::new(),
            asteroids: Vec::new(),
            particles: Vec::new(),
            last_fire_ms: None,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Full reset into `Running`: score, lives, pools, player and fire timer
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::LivesChanged(self.lives));
    }

    /// Add points and record the change
    pub fn award(&mut self, points: u64) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Take one life and record the change
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LivesChanged(self.lives));
    }

    /// Enter `GameOver` (once)
    pub fn end(&mut self) {
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Number of live entities across all pools (excluding the player)
    pub fn entity_count(&self) -> usize {
        self.bullets.len() + self.enemies.len() + self.asteroids.len() + self.particles.len()
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_not_started() {
        let config = GameConfig::default();
        let state = SimulationState::new(&config);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.entity_count(), 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let config = GameConfig::default();
        let mut state = SimulationState::new(&config);
        state.score = 1234;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.last_fire_ms = Some(99.0);
        state.player.pos = Vec2::ZERO;
        state.bullets.push(Bullet {
            pos: Vec2::ZERO,
            size: Vec2::new(5.0, 15.0),
        });

        state.reset(&config);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.entity_count(), 0);
        assert_eq!(state.last_fire_ms, None);
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
        assert_eq!(
            state.drain_events().collect::<Vec<_>>(),
            vec![GameEvent::ScoreChanged(0), GameEvent::LivesChanged(3)]
        );
    }

    #[test]
    fn test_spawn_point_clamped_in_small_arena() {
        let config = GameConfig::from_json(r#"{ "width": 60, "height": 60 }"#).unwrap();
        let mut state = SimulationState::new(&config);
        state.reset(&config);
        assert_eq!(state.player.pos, Vec2::new(10.0, 0.0));

        let max = Vec2::new(config.width, config.height) - state.player.size;
        assert!(state.player.pos.cmpge(Vec2::ZERO).all());
        assert!(state.player.pos.cmple(max).all());
    }

    #[test]
    fn test_lives_never_wrap() {
        let config = GameConfig::default();
        let mut state = SimulationState::new(&config);
        state.lives = 0;
        state.lose_life();
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_end_emits_once() {
        let config = GameConfig::default();
        let mut state = SimulationState::new(&config);
        state.score = 50;
        state.end();
        state.end();
        assert_eq!(
            state.drain_events().collect::<Vec<_>>(),
            vec![GameEvent::GameOver { final_score: 50 }]
        );
    }

    #[test]
    fn test_asteroid_exit_bounds() {
        let rock = |x: f32, y: f32| Asteroid {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 30.0,
        };
        assert!(!rock(100.0, -30.0).is_outside(800.0, 600.0));
        assert!(rock(100.0, 601.0).is_outside(800.0, 600.0));
        assert!(rock(-31.0, 100.0).is_outside(800.0, 600.0));
        assert!(!rock(-29.0, 100.0).is_outside(800.0, 600.0));
        assert!(rock(801.0, 100.0).is_outside(800.0, 600.0));
    }
}
