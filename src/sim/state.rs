//! Game state and session lifecycle
//!
//! Everything a run needs lives in [`GameState`]. It is owned by the frame loop
//! and mutated in place once per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fruit::Fruit;
use super::spawn::SpawnManager;
use super::tracking::{PositionSmoother, TrailBuffer};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A fruit hit the floor; everything is frozen until restart
    GameOver,
}

/// Notifications for the presentation layer (sound, haptics, logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fruit was sliced
    Slice { slot: usize, pos: Vec2, score: u64 },
    /// A score rule fired and added fruit
    Escalation { score: u64, fruits: usize, respawn_delay: f32 },
    /// A fruit fell out of the frame
    GameOver { slot: usize, score: u64 },
    /// A new run started
    Restart,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning this session runs with
    pub settings: Settings,
    pub rng: Pcg32,
    /// Score
    pub score: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Fruit slots, indexed by slot id; only grows within a run
    pub fruits: Vec<Fruit>,
    pub spawner: SpawnManager,
    pub smoother: PositionSmoother,
    pub trail: TrailBuffer,
    /// Tracked fingertip this frame (`None` while the hand is lost)
    pub cursor: Option<Vec2>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Simulation tick counter for this run
    pub time_ticks: u64,
    /// Runs started since launch (restarts included)
    pub runs: u32,
}

impl GameState {
    /// Create a new game with the given settings and seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Playing,
            fruits: Vec::with_capacity(settings.max_fruits()),
            spawner: SpawnManager::new(&settings),
            smoother: PositionSmoother::new(settings.smoothing),
            trail: TrailBuffer::new(settings.trail_length),
            cursor: None,
            events: Vec::new(),
            time_ticks: 0,
            runs: 1,
            settings,
        };

        state.spawn_starter();
        state
    }

    /// Replace the fruit slots with a single fresh fruit
    fn spawn_starter(&mut self) {
        self.fruits.clear();
        let fruit = Fruit::spawn(&mut self.rng, &self.settings);
        self.fruits.push(fruit);
    }

    /// Start a new run. The RNG keeps its stream so each run differs, and the
    /// smoothed fingertip carries over so the next trail starts where the hand is.
    pub fn restart(&mut self) {
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.trail.clear();
        self.cursor = None;
        self.spawner.reset();
        self.time_ticks = 0;
        self.runs += 1;
        self.spawn_starter();
        self.events.push(GameEvent::Restart);
        log::info!("Run {} started", self.runs);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events raised so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
