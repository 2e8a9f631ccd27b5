//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives here, including the timers and
//! the seeded RNG, so a cloned state replays identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Aabb;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended (lives exhausted)
    GameOver,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Ship hit an asteroid
    LifeLost { remaining: u8 },
    /// Last life lost
    GameOver { score: u64 },
    /// Final score beat the session high score; should be persisted
    NewHighScore { score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize)]
pub struct Ship {
    /// Top-left corner in logical field coordinates
    pub pos: Vec2,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn bounds(&self, size: f32) -> Aabb {
        Aabb::new(self.pos, size)
    }

    /// Clamp into the legal region so the whole box stays on the field
    pub fn clamp_to_field(&mut self, tuning: &Tuning) {
        self.pos.x = self.pos.x.clamp(0.0, tuning.field_width - tuning.ship_size);
        self.pos.y = self.pos.y.clamp(0.0, tuning.field_height - tuning.ship_size);
    }
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize)]
pub struct Asteroid {
    pub id: u32,
    /// Top-left corner in logical field coordinates
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Side of the square bounding box
    pub size: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
}

impl Asteroid {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move one tick along the trajectory and spin
    pub fn advance(&mut self) {
        self.pos += self.vel;
        // `%` keeps the sign, so counter-clockwise spinners stay negative
        self.rotation = (self.rotation + self.rotation_speed) % 360.0;
    }
}

/// Complete game state (deterministic, cloneable)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Player ship
    pub ship: Ship,
    /// Live asteroids (order is not significant)
    pub asteroids: Vec<Asteroid>,
    /// Score for the current run
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Best final score seen this session
    pub high_score: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Wall-clock ms when the current run started
    pub(crate) started_at_ms: f64,
    /// Wall-clock ms of the last passive score award
    pub(crate) last_score_ms: f64,
    /// Wall-clock ms of the last spawn
    pub(crate) last_spawn_ms: f64,
    /// Spawner RNG
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a title-screen state with the given seed and stored high score
    pub fn new(seed: u64, high_score: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            ship: Ship::new(tuning.idle_point()),
            asteroids: Vec::new(),
            score: 0,
            lives: tuning.initial_lives,
            high_score,
            events: Vec::new(),
            started_at_ms: 0.0,
            last_score_ms: 0.0,
            last_spawn_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Begin a fresh run at `now_ms`, keeping the high score and RNG stream
    pub fn start(&mut self, now_ms: f64, tuning: &Tuning) {
        self.phase = GamePhase::Running;
        self.ship = Ship::new(tuning.start_point());
        self.asteroids.clear();
        self.score = 0;
        self.lives = tuning.initial_lives;
        self.events.clear();
        self.started_at_ms = now_ms;
        self.last_score_ms = now_ms;
        self.last_spawn_ms = now_ms;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Milliseconds since the current run started
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_at_ms).max(0.0)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
