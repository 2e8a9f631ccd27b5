//! Per-frame simulation tick
//!
//! Advances the game by one frame. All timers run off the wall-clock `now_ms`
//! the driver passes in, so irregular frame pacing changes how far things
//! move per second but never how often points or asteroids arrive.

use super::spawn::maybe_spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::input::InputSnapshot;
use crate::tuning::Tuning;

/// Advance the game state by one tick, in place
pub fn tick(state: &mut GameState, input: &InputSnapshot, now_ms: f64, tuning: &Tuning) {
    // Events only describe this tick, frozen or not
    state.events.clear();

    // Title screen and game over are frozen
    if state.phase != GamePhase::Running {
        return;
    }

    // Ship movement (diagonals intentionally not normalized)
    state.ship.pos += input.displacement(tuning.ship_speed);
    state.ship.clamp_to_field(tuning);

    for asteroid in &mut state.asteroids {
        asteroid.advance();
    }

    // Collisions: every asteroid is tested once against the post-move ship box
    let ship_box = state.ship.bounds(tuning.ship_size);
    let mut lives = state.lives;
    let mut hits = Vec::new();
    state.asteroids.retain(|asteroid| {
        if lives == 0 || !ship_box.overlaps(&asteroid.bounds()) {
            return true;
        }
        lives -= 1;
        hits.push((asteroid.id, lives));
        false
    });

    if !hits.is_empty() {
        for (id, remaining) in hits {
            log::debug!("Asteroid {} hit the ship, {} lives left", id, remaining);
            state.events.push(GameEvent::LifeLost { remaining });
        }
        state.lives = lives;
        state.ship.pos = tuning.respawn_point();
    }
    let game_over = state.lives == 0;

    // Cull anything that has left the field on any side
    let (width, height) = (tuning.field_width, tuning.field_height);
    state
        .asteroids
        .retain(|asteroid| !asteroid.bounds().outside_field(width, height));

    if game_over {
        finish_run(state);
        return;
    }

    // Passive scoring
    if now_ms - state.last_score_ms >= tuning.score_interval_ms {
        state.score += tuning.score_increment;
        state.last_score_ms = now_ms;
    }

    // Spawning
    let elapsed_ms = state.elapsed_ms(now_ms);
    let spawned = maybe_spawn(
        &mut state.rng,
        tuning,
        now_ms,
        elapsed_ms,
        state.score,
        state.last_spawn_ms,
    );
    if let Some(spawn) = spawned {
        let id = state.next_entity_id();
        log::debug!(
            "Spawned asteroid {} from {:?} (size {:.1}, vel {:?})",
            id,
            spawn.side,
            spawn.size,
            spawn.vel
        );
        state.asteroids.push(spawn.into_asteroid(id));
        state.last_spawn_ms = now_ms;
    }
}

/// Full-state replacement form of [`tick`]: returns the next state
pub fn advance_tick(
    state: &GameState,
    input: &InputSnapshot,
    now_ms: f64,
    tuning: &Tuning,
) -> GameState {
    let mut next = state.clone();
    tick(&mut next, input, now_ms, tuning);
    next
}

/// Running -> GameOver transition, capturing a new high score
fn finish_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!("Game over with score {}", state.score);

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore { score: state.score });
        log::info!("New high score: {}", state.score);
    }
}
