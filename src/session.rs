//! Tick driver
//!
//! Owns the authoritative [`GameState`], the balance tuning and the high
//! score store. Each frame computes the next state from the previous one,
//! publishes it whole, then carries out the side effects the tick asked for.

use crate::input::InputSnapshot;
use crate::persistence::HighScoreStore;
use crate::sim::{GameEvent, GamePhase, GameState, advance_tick};
use crate::tuning::Tuning;

/// One player's game session
pub struct Session<S: HighScoreStore> {
    state: GameState,
    tuning: Tuning,
    store: S,
}

impl<S: HighScoreStore> Session<S> {
    /// Create a title-screen session, seeding the high score from `store`
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let high_score = store.get().unwrap_or(0);
        log::info!("Session created (seed {}, high score {})", seed, high_score);
        Self {
            state: GameState::new(seed, high_score, &tuning),
            tuning,
            store,
        }
    }

    /// (Re)start a run at `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.state.start(now_ms, &self.tuning);
        log::info!("Run started");
    }

    /// Advance one frame with the input held right now
    pub fn advance(&mut self, input: &InputSnapshot, now_ms: f64) -> &GameState {
        let was_running = self.state.is_running();
        let next = advance_tick(&self.state, input, now_ms, &self.tuning);
        self.state = next;

        // Persist only on the Running -> GameOver transition
        if !was_running || self.state.phase != GamePhase::GameOver {
            return &self.state;
        }
        for event in &self.state.events {
            if let GameEvent::NewHighScore { score } = event {
                self.store.set(*score);
            }
        }

        &self.state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}
