//! Arena Blaster - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Frame simulation (entities, spawning, collisions, scoring)
//! - `session`: Game state machine and UI observer contract
//! - `driver`: Frame scheduling (display refresh or fixed timestep)
//! - `renderer`: Draw-call translation and WebGPU backend
//! - `input`: Keyboard flag boundary
//! - `config`: Injectable game constants

pub mod config;
pub mod driver;
pub mod input;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use driver::{FixedStepScheduler, FrameDriver, FrameScheduler};
pub use input::{InputFlags, SharedInput};
pub use session::{GameSession, SessionError, SessionObserver};

/// Game configuration defaults
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Spawn offset from the arena bottom
    pub const PLAYER_START_OFFSET_Y: f32 = 100.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 7.0;
    /// Minimum time between shots (ms)
    pub const FIRE_COOLDOWN_MS: f64 = 300.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_HEALTH: i32 = 2;
    pub const ENEMY_SPAWN_CHANCE: f32 = 0.01;
    pub const ENEMY_SCORE: u64 = 100;

    /// Asteroids
    pub const ASTEROID_MIN_SIZE: f32 = 20.0;
    pub const ASTEROID_MAX_SIZE: f32 = 50.0;
    pub const ASTEROID_SPEED: f32 = 1.5;
    /// Horizontal drift is uniform in [-ASTEROID_MAX_DRIFT, ASTEROID_MAX_DRIFT]
    pub const ASTEROID_MAX_DRIFT: f32 = 1.0;
    pub const ASTEROID_SPAWN_CHANCE: f32 = 0.005;
    pub const ASTEROID_SCORE: u64 = 50;

    /// Particle bursts
    pub const PARTICLE_COUNT: usize = 20;
    pub const PARTICLE_SPEED: f32 = 2.0;
    pub const PARTICLE_SIZE: f32 = 3.0;
    /// Alpha lost per frame
    pub const PARTICLE_ALPHA_DECAY: f32 = 0.01;

    /// Nominal display refresh (used by fixed-step drivers)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Flat fill colors (RGBA, 0-1)
pub mod palette {
    pub const BACKGROUND: [f32; 4] = [15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0, 1.0];
    pub const PLAYER: [f32; 4] = [0x8b as f32 / 255.0, 0x5c as f32 / 255.0, 0xf6 as f32 / 255.0, 1.0];
    pub const BULLET: [f32; 4] = [0xf5 as f32 / 255.0, 0x9e as f32 / 255.0, 0x0b as f32 / 255.0, 1.0];
    pub const ENEMY: [f32; 4] = [0xef as f32 / 255.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0, 1.0];
    pub const ASTEROID: [f32; 4] = [0x64 as f32 / 255.0, 0x74 as f32 / 255.0, 0x8b as f32 / 255.0, 1.0];
}
