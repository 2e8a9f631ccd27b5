//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Wall-clock timestamps come in as arguments, never read here
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use spawn::{
    AsteroidSpawn, EntrySide, angled_entry_unlocked, asteroid_speed, maybe_spawn, roll_asteroid,
    spawn_interval_ms,
};
pub use state::{Asteroid, GameEvent, GamePhase, GameState, Ship};
pub use tick::{advance_tick, tick};
