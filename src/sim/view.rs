//! Per-frame drawable snapshot handed to the renderer

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState};

/// One fruit to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FruitSprite {
    pub slot: usize,
    pub pos: Vec2,
    /// Degrees
    pub angle: f32,
    pub appearance: u8,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Live fruit in slot order; sliced fruit are not drawn
    pub fruits: Vec<FruitSprite>,
    /// Trail points, oldest first
    pub trail: Vec<Vec2>,
    /// Fingertip marker, only while the hand is tracked
    pub cursor: Option<Vec2>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            score: state.score,
            fruits: state
                .fruits
                .iter()
                .enumerate()
                .filter(|(_, f)| f.is_alive())
                .map(|(slot, f)| FruitSprite {
                    slot,
                    pos: f.pos,
                    angle: f.angle,
                    appearance: f.appearance,
                })
                .collect(),
            trail: state.trail.points().collect(),
            cursor: state.cursor,
        }
    }
}
