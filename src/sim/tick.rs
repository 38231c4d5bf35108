//! Per-frame simulation tick
//!
//! One call = one camera frame: track the fingertip, slice, respawn, move,
//! then check for a fruit hitting the floor.

use glam::Vec2;

use super::collision::detect_hits;
use super::state::{GameEvent, GamePhase, GameState};
use crate::sanitize_dt;

/// Commands from the player or the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new run (only honoured after game over)
    Restart,
    /// Leave the frame loop
    Quit,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw fingertip position in frame pixels, if a hand was detected
    pub fingertip: Option<Vec2>,
    pub command: Option<Command>,
}

impl TickInput {
    pub fn with_fingertip(fingertip: Option<Vec2>) -> Self {
        Self {
            fingertip,
            command: None,
        }
    }
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Advance the game by one frame of length `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> LoopControl {
    match input.command {
        Some(Command::Quit) => {
            log::info!("Quit requested (score {})", state.score);
            return LoopControl::Quit;
        }
        Some(Command::Restart) if state.is_game_over() => state.restart(),
        Some(Command::Restart) => log::warn!("Restart ignored while playing"),
        None => {}
    }

    let dt = sanitize_dt(dt);

    // Tracking runs in every phase so the trail stays live on the game over screen
    state.cursor = state.smoother.update(input.fingertip);
    if let Some(point) = state.cursor {
        state.trail.push(point);
    }

    if state.phase == GamePhase::GameOver {
        return LoopControl::Continue;
    }

    state.time_ticks += 1;

    apply_slices(state);
    advance_fruits(state, dt);

    LoopControl::Continue
}

/// Score every fruit touched by the trail and fire any score rules reached
fn apply_slices(state: &mut GameState) {
    if state.trail.is_empty() {
        return;
    }
    let trail: Vec<Vec2> = state.trail.points().collect();
    let hits = detect_hits(&state.fruits, &trail, state.settings.hit_radius);

    for slot in hits {
        state.score += 1;
        let fruit = &mut state.fruits[slot];
        let pos = fruit.pos;
        state.spawner.on_hit(fruit);
        state.events.push(GameEvent::Slice {
            slot,
            pos,
            score: state.score,
        });
        log::debug!(
            "Sliced slot {} at ({:.0}, {:.0}), score {}",
            slot,
            pos.x,
            pos.y,
            state.score
        );

        let fired = state
            .spawner
            .on_score(state.score, &mut state.fruits, &mut state.rng, &state.settings);
        for rule in fired {
            log::info!(
                "Score {}: +{} fruit (slots from {}), respawn delay {:.2}s",
                state.score,
                rule.added,
                rule.first_slot,
                state.spawner.respawn_delay()
            );
            state.events.push(GameEvent::Escalation {
                score: state.score,
                fruits: state.fruits.len(),
                respawn_delay: state.spawner.respawn_delay(),
            });
        }
    }
}

/// Count down sliced fruit, move the live ones and check the floor
fn advance_fruits(state: &mut GameState, dt: f32) {
    let relaunched = state
        .spawner
        .on_tick(dt, &mut state.fruits, &mut state.rng, &state.settings);
    for slot in &relaunched {
        log::debug!("Slot {} relaunched", slot);
    }

    for (slot, fruit) in state.fruits.iter_mut().enumerate() {
        // A fruit relaunched this frame starts moving next frame
        if relaunched.contains(&slot) {
            continue;
        }
        fruit.step(dt, &state.settings);

        if state.phase == GamePhase::Playing && fruit.fell_out(&state.settings) {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver {
                slot,
                score: state.score,
            });
            log::info!(
                "Game over: slot {} dropped at x={:.0}, final score {}",
                slot,
                fruit.pos.x,
                state.score
            );
        }
    }
}
