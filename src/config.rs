//! Game configuration
//!
//! Every tunable constant of the simulation, injectable as a whole. Defaults
//! come from [`crate::consts`]; a JSON document may override any subset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration document is rejected
#[derive(Debug)]
pub enum ConfigError {
    /// Document is not valid JSON for [`GameConfig`]
    Parse(serde_json::Error),
    /// A value is outside its allowed range
    OutOfRange { field: &'static str, value: f64 },
    /// An entity does not fit inside the arena
    DoesNotFit { field: &'static str, size: f32, arena: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::OutOfRange { field, value } => {
                write!(f, "config value out of range: {field} = {value}")
            }
            Self::DoesNotFit { field, size, arena } => write!(
                f,
                "{field} ({size}) does not fit in an arena dimension of {arena}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Player ===
    pub player_size: f32,
    /// Pixels per frame per held direction
    pub player_speed: f32,
    pub starting_lives: u32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub fire_cooldown_ms: f64,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub enemy_health: i32,
    /// Per-frame spawn probability
    pub enemy_spawn_chance: f32,
    pub enemy_score: u64,

    // === Asteroids ===
    pub asteroid_min_size: f32,
    pub asteroid_max_size: f32,
    pub asteroid_speed: f32,
    pub asteroid_max_drift: f32,
    /// Per-frame spawn probability
    pub asteroid_spawn_chance: f32,
    pub asteroid_score: u64,

    // === Particles ===
    pub particle_count: usize,
    pub particle_speed: f32,
    pub particle_size: f32,
    pub particle_alpha_decay: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,

            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
            enemy_health: ENEMY_HEALTH,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,
            enemy_score: ENEMY_SCORE,

            asteroid_min_size: ASTEROID_MIN_SIZE,
            asteroid_max_size: ASTEROID_MAX_SIZE,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_max_drift: ASTEROID_MAX_DRIFT,
            asteroid_spawn_chance: ASTEROID_SPAWN_CHANCE,
            asteroid_score: ASTEROID_SCORE,

            particle_count: PARTICLE_COUNT,
            particle_speed: PARTICLE_SPEED,
            particle_size: PARTICLE_SIZE,
            particle_alpha_decay: PARTICLE_ALPHA_DECAY,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON (for dumping the effective config)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("player_size", self.player_size),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("enemy_size", self.enemy_size),
            ("asteroid_min_size", self.asteroid_min_size),
            ("particle_alpha_decay", self.particle_alpha_decay),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("asteroid_speed", self.asteroid_speed),
            ("asteroid_max_drift", self.asteroid_max_drift),
            ("particle_speed", self.particle_speed),
            ("particle_size", self.particle_size),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        for (field, chance) in [
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("asteroid_spawn_chance", self.asteroid_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: chance as f64,
                });
            }
        }

        if self.asteroid_max_size < self.asteroid_min_size {
            return Err(ConfigError::OutOfRange {
                field: "asteroid_max_size",
                value: self.asteroid_max_size as f64,
            });
        }
        if !(self.fire_cooldown_ms >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "fire_cooldown_ms",
                value: self.fire_cooldown_ms,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::OutOfRange {
                field: "starting_lives",
                value: 0.0,
            });
        }
        if self.enemy_health <= 0 {
            return Err(ConfigError::OutOfRange {
                field: "enemy_health",
                value: self.enemy_health as f64,
            });
        }

        let smallest_side = self.width.min(self.height);
        for (field, size) in [
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("asteroid_max_size", self.asteroid_max_size),
        ] {
            if size > smallest_side {
                return Err(ConfigError::DoesNotFit {
                    field,
                    size,
                    arena: smallest_side,
                });
            }
        }

        Ok(())
    }

    /// Player spawn point (horizontal centre line, near the bottom)
    pub fn player_start(&self) -> (f32, f32) {
        (self.width / 2.0, self.height - PLAYER_START_OFFSET_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.fire_cooldown_ms, 300.0);
        assert_eq!(config.player_start(), (400.0, 500.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "enemy_spawn_chance": 0.5, "width": 640 }"#)
            .expect("valid document");
        assert_eq!(config.enemy_spawn_chance, 0.5);
        assert_eq!(config.width, 640.0);
        assert_eq!(config.height, ARENA_HEIGHT);
        assert_eq!(config.particle_count, PARTICLE_COUNT);
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = GameConfig::default().to_json().expect("serializes");
        assert_eq!(GameConfig::from_json(&json).expect("parses"), GameConfig::default());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = GameConfig::from_json(r#"{ "asteroid_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "asteroid_spawn_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_oversized_player() {
        let err = GameConfig::from_json(r#"{ "height": 40 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::DoesNotFit { field: "player_size", .. }));
        assert!(err.to_string().contains("player_size"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
