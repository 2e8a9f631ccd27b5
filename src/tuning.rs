//! Game balance tuning
//!
//! Every value defaults to the matching constant in [`crate::consts`]. A JSON
//! document can override any subset; missing keys keep their defaults.
//! Persisted in LocalStorage on web so balance can be tweaked without a rebuild.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error loading or validating tuning values
#[derive(Debug)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A value is out of its legal range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid tuning json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Runtime-tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ship ===
    pub ship_size: f32,
    pub ship_speed: f32,
    pub initial_lives: u8,

    // === Asteroids ===
    pub asteroid_min_size: f32,
    pub asteroid_max_size: f32,
    pub max_rotation_speed: f32,
    pub initial_asteroid_speed: f32,
    pub max_asteroid_speed: f32,
    pub speed_step: f32,
    pub speed_step_secs: f64,

    // === Spawning ===
    pub initial_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub spawn_interval_step_ms: f64,
    pub spawn_interval_score_step: u64,
    /// Seconds into a run before side entries unlock (`None` = top only)
    pub angled_entry_after_secs: Option<f64>,

    // === Scoring ===
    pub score_interval_ms: f64,
    pub score_increment: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_size: SHIP_SIZE,
            ship_speed: SHIP_SPEED,
            initial_lives: INITIAL_LIVES,

            asteroid_min_size: ASTEROID_MIN_SIZE,
            asteroid_max_size: ASTEROID_MAX_SIZE,
            max_rotation_speed: ASTEROID_MAX_ROTATION_SPEED,
            initial_asteroid_speed: INITIAL_ASTEROID_SPEED,
            max_asteroid_speed: MAX_ASTEROID_SPEED,
            speed_step: ASTEROID_SPEED_STEP,
            speed_step_secs: ASTEROID_SPEED_STEP_SECS,

            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            spawn_interval_score_step: SPAWN_INTERVAL_SCORE_STEP,
            angled_entry_after_secs: Some(ANGLED_ENTRY_AFTER_SECS),

            score_interval_ms: SCORE_INTERVAL_MS,
            score_increment: SCORE_INCREMENT,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "cosmicImpactTuning";

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot honor
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        // JSON numbers past f32 range deserialize to infinity
        let floats = [
            ("field_width", self.field_width as f64),
            ("field_height", self.field_height as f64),
            ("ship_size", self.ship_size as f64),
            ("ship_speed", self.ship_speed as f64),
            ("asteroid_min_size", self.asteroid_min_size as f64),
            ("asteroid_max_size", self.asteroid_max_size as f64),
            ("max_rotation_speed", self.max_rotation_speed as f64),
            ("initial_asteroid_speed", self.initial_asteroid_speed as f64),
            ("max_asteroid_speed", self.max_asteroid_speed as f64),
            ("speed_step", self.speed_step as f64),
            ("speed_step_secs", self.speed_step_secs),
            ("initial_spawn_interval_ms", self.initial_spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("spawn_interval_step_ms", self.spawn_interval_step_ms),
            ("angled_entry_after_secs", self.angled_entry_after_secs.unwrap_or(0.0)),
            ("score_interval_ms", self.score_interval_ms),
        ];
        if let Some((field, _)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return invalid(*field, "must be finite");
        }

        if !(self.field_width > 0.0) {
            return invalid("field_width", "must be positive");
        }
        if !(self.field_height > 0.0) {
            return invalid("field_height", "must be positive");
        }
        if !(self.ship_size > 0.0) {
            return invalid("ship_size", "must be positive");
        }
        if self.ship_size > self.field_width || self.ship_size > self.field_height {
            return invalid("ship_size", "ship must fit inside the field");
        }
        if self.ship_speed < 0.0 {
            return invalid("ship_speed", "must not be negative");
        }
        if self.initial_lives == 0 {
            return invalid("initial_lives", "must be at least 1");
        }
        if !(self.asteroid_min_size > 0.0) {
            return invalid("asteroid_min_size", "must be positive");
        }
        if self.asteroid_min_size >= self.asteroid_max_size {
            return invalid("asteroid_max_size", "must exceed asteroid_min_size");
        }
        if self.asteroid_max_size >= self.field_width || self.asteroid_max_size >= self.field_height {
            return invalid("asteroid_max_size", "asteroids must fit inside the field");
        }
        if !(self.initial_asteroid_speed > 0.0) {
            return invalid("initial_asteroid_speed", "must be positive");
        }
        if self.max_asteroid_speed < self.initial_asteroid_speed {
            return invalid("max_asteroid_speed", "must be at least initial_asteroid_speed");
        }
        if self.speed_step < 0.0 {
            return invalid("speed_step", "must not be negative");
        }
        if !(self.speed_step_secs > 0.0) {
            return invalid("speed_step_secs", "must be positive");
        }
        if self.min_spawn_interval_ms < 0.0 {
            return invalid("min_spawn_interval_ms", "must not be negative");
        }
        if self.spawn_interval_step_ms < 0.0 {
            return invalid("spawn_interval_step_ms", "must not be negative");
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return invalid("min_spawn_interval_ms", "must not exceed initial_spawn_interval_ms");
        }
        if self.spawn_interval_score_step == 0 {
            return invalid("spawn_interval_score_step", "must be non-zero");
        }
        if self.max_rotation_speed < 0.0 {
            return invalid("max_rotation_speed", "must not be negative");
        }
        if self.angled_entry_after_secs.is_some_and(|secs| secs < 0.0) {
            return invalid("angled_entry_after_secs", "must not be negative");
        }
        if !(self.score_interval_ms > 0.0) {
            return invalid("score_interval_ms", "must be positive");
        }
        Ok(())
    }

    /// Starting ship position for a fresh run
    pub fn start_point(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.field_width / 2.0 - self.ship_size / 2.0,
            self.field_height - self.ship_size * 2.0,
        )
    }

    /// Ship position before the first run (title screen)
    pub fn idle_point(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.field_width / 2.0 - self.ship_size / 2.0,
            self.field_height - self.ship_size - 10.0,
        )
    }

    /// Where the ship reappears after losing a life
    pub fn respawn_point(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.field_width / 2.0 - self.ship_size / 2.0,
            self.field_height - self.ship_size * 2.0 - 20.0,
        )
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(err) => log::warn!("Ignoring stored tuning: {err}"),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
