//! Frame simulation module
//!
//! All gameplay logic lives here:
//! - One step per display frame, fixed stage order
//! - Randomness only through an injected [`RandomSource`]
//! - Stable iteration order (spawn order), removals applied after each pass
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounded, collides, overlaps};
pub use spawn::{FixedRandom, RandomSource, SequenceRandom, seeded_rng};
pub use state::{
    Asteroid, Bullet, Enemy, GameEvent, GamePhase, Particle, Player, SimulationState,
};
pub use tick::{TickInput, tick};
