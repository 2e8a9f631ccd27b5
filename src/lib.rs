//! Cosmic Impact - An asteroid-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `input`: Direction tokens and the held-key set sampled each tick
//! - `session`: Tick driver that owns state and persistence
//! - `persistence`: High score storage (sessionStorage on web)
//! - `tuning`: Data-driven game balance
//! - `view`: Logical-to-screen mapping for renderers
//! - `platform`: Browser/native platform abstraction

pub mod input;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod view;

pub use input::{Binding, Direction, HeldKeys, InputSnapshot};
pub use persistence::{HighScoreStore, MemoryHighScore};
pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions (all simulation math happens here)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship bounding box side
    pub const SHIP_SIZE: f32 = 50.0;
    /// Ship displacement per tick per held direction
    pub const SHIP_SPEED: f32 = 20.0;

    /// Asteroid size range [min, max)
    pub const ASTEROID_MIN_SIZE: f32 = 20.0;
    pub const ASTEROID_MAX_SIZE: f32 = 60.0;
    /// Maximum rotation speed magnitude (degrees per tick)
    pub const ASTEROID_MAX_ROTATION_SPEED: f32 = 2.0;

    /// Asteroid speed (logical pixels per tick)
    pub const INITIAL_ASTEROID_SPEED: f32 = 1.0;
    pub const MAX_ASTEROID_SPEED: f32 = 7.0;
    /// Speed gained per tier of elapsed time
    pub const ASTEROID_SPEED_STEP: f32 = 0.20;
    pub const ASTEROID_SPEED_STEP_SECS: f64 = 10.0;

    /// Spawn interval (ms), shrinks with score
    pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 1000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 500.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 50.0;
    pub const SPAWN_INTERVAL_SCORE_STEP: u64 = 100;

    /// Side/angled entries unlock after this much session time
    pub const ANGLED_ENTRY_AFTER_SECS: f64 = 180.0;
    /// Angled asteroids aim somewhere inside this band (fraction of field)
    pub const TARGET_BAND_MIN: f32 = 0.3;
    pub const TARGET_BAND_MAX: f32 = 0.7;

    /// Lives at the start of a run
    pub const INITIAL_LIVES: u8 = 5;

    /// Passive scoring
    pub const SCORE_INTERVAL_MS: f64 = 1000.0;
    pub const SCORE_INCREMENT: u64 = 10;
}
