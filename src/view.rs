//! Render-facing view of the simulation
//!
//! Renderers draw in screen pixels; the simulation lives in the fixed logical
//! field. One uniform scale factor (screen width / logical width) maps
//! between them on both axes.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Screen pixels per logical pixel for a playfield `actual_width` px wide
pub fn scale_factor(actual_width: f32, tuning: &Tuning) -> f32 {
    actual_width / tuning.field_width
}

/// Screen-space square
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenRect {
    pub pos: Vec2,
    pub size: f32,
}

impl ScreenRect {
    fn scaled(pos: Vec2, size: f32, scale: f32) -> Self {
        Self {
            pos: pos * scale,
            size: size * scale,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// An asteroid ready to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AsteroidView {
    pub id: u32,
    pub rect: ScreenRect,
    /// Degrees
    pub rotation: f32,
}

/// Everything a renderer needs for one frame, already in screen space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub ship: ScreenRect,
    pub asteroids: Vec<AsteroidView>,
    pub score: u64,
    pub lives: u8,
    pub high_score: u64,
}

impl FrameView {
    pub fn from_state(state: &GameState, tuning: &Tuning, scale: f32) -> Self {
        Self {
            phase: state.phase,
            ship: ScreenRect::scaled(state.ship.pos, tuning.ship_size, scale),
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    id: a.id,
                    rect: ScreenRect::scaled(a.pos, a.size, scale),
                    rotation: a.rotation,
                })
                .collect(),
            score: state.score,
            lives: state.lives,
            high_score: state.high_score,
        }
    }
}
