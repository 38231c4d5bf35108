//! Game settings and tuning
//!
//! Loaded once at startup from an optional JSON file. Every field falls back to
//! the values in [`crate::consts`], so a settings file only needs the keys it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How per-frame physics constants relate to the real timestep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PhysicsMode {
    /// One fixed increment per frame; game speed follows the achieved frame rate
    #[default]
    FrameCoupled,
    /// Increments scaled by `dt / nominal_dt`; game speed is frame-rate independent
    Scaled { nominal_dt: f32 },
}

impl PhysicsMode {
    /// Multiplier applied to per-frame increments for a tick of length `dt`
    pub fn step_scale(&self, dt: f32) -> f32 {
        match *self {
            PhysicsMode::FrameCoupled => 1.0,
            PhysicsMode::Scaled { nominal_dt } => dt / nominal_dt,
        }
    }
}

/// A score threshold and what happens when the session first reaches it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Score at which the rule fires
    pub score: u64,
    /// Fruits added to the field
    #[serde(default = "default_extra_fruits")]
    pub extra_fruits: u32,
    /// New respawn delay (seconds), if the rule changes it
    #[serde(default)]
    pub respawn_delay: Option<f32>,
}

fn default_extra_fruits() -> u32 {
    1
}

impl SpawnRule {
    pub fn new(score: u64, extra_fruits: u32, respawn_delay: Option<f32>) -> Self {
        Self {
            score,
            extra_fruits,
            respawn_delay,
        }
    }
}

/// The staged escalation: one more fruit at 10, 25 and 40 points
pub fn default_rules() -> Vec<SpawnRule> {
    vec![
        SpawnRule::new(10, 1, Some(0.9)),
        SpawnRule::new(25, 1, Some(0.85)),
        SpawnRule::new(40, 1, Some(0.65)),
    ]
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Frame ===
    pub frame_width: f32,
    pub frame_height: f32,
    /// Mirror fingertip x (camera image shown flipped)
    pub mirror: bool,

    // === Tracking ===
    pub smoothing: f32,
    pub trail_length: usize,
    pub hit_radius: f32,

    // === Physics ===
    pub gravity: f32,
    pub launch_speed: f32,
    pub launch_drift: f32,
    pub spin_range: f32,
    /// Left lateral bound
    pub x_min: f32,
    /// Right lateral bound
    pub x_max: f32,
    pub spawn_margin: f32,
    pub spawn_inset: f32,
    pub physics: PhysicsMode,

    // === Spawning ===
    pub respawn_delay: f32,
    pub rules: Vec<SpawnRule>,
    pub appearance_count: u8,

    /// RNG seed; `None` picks one from the clock at startup
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
            mirror: true,

            smoothing: SMOOTHING,
            trail_length: TRAIL_LENGTH,
            hit_radius: HIT_RADIUS,

            gravity: GRAVITY,
            launch_speed: LAUNCH_SPEED,
            launch_drift: LAUNCH_DRIFT,
            spin_range: SPIN_RANGE,
            x_min: X_MIN,
            x_max: X_MAX,
            spawn_margin: SPAWN_MARGIN,
            spawn_inset: SPAWN_INSET,
            physics: PhysicsMode::FrameCoupled,

            respawn_delay: RESPAWN_DELAY,
            rules: default_rules(),
            appearance_count: APPEARANCE_COUNT,

            seed: None,
        }
    }
}

impl Settings {
    /// Horizontal center of the frame (spawn side split)
    pub fn center_x(&self) -> f32 {
        self.frame_width / 2.0
    }

    /// Fruit below this y ends the run
    pub fn bottom(&self) -> f32 {
        self.frame_height
    }

    /// Upper bound on simultaneous fruits (one starter plus every rule's extras)
    pub fn max_fruits(&self) -> usize {
        1 + self
            .rules
            .iter()
            .map(|r| r.extra_fruits as usize)
            .sum::<usize>()
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.rules.sort_by_key(|r| r.score);
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.frame_width > 0.0 && self.frame_height > 0.0) {
            return Err(invalid("frame_width", "frame dimensions must be positive"));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(invalid("smoothing", format!("{} is outside [0, 1)", self.smoothing)));
        }
        if self.trail_length == 0 {
            return Err(invalid("trail_length", "must hold at least one point"));
        }
        if !(self.hit_radius > 0.0) {
            return Err(invalid("hit_radius", "must be positive"));
        }
        if !(self.x_min < self.x_max) {
            return Err(invalid("x_max", "lateral bounds overlap"));
        }
        if self.spawn_margin * 2.0 > self.frame_width {
            return Err(invalid("spawn_margin", "spawn range is empty"));
        }
        if self.appearance_count == 0 {
            return Err(invalid("appearance_count", "need at least one fruit image"));
        }
        let negative_rule = self.rules.iter().any(|r| r.respawn_delay.is_some_and(|d| d < 0.0));
        if self.respawn_delay < 0.0 || negative_rule {
            return Err(invalid("respawn_delay", "delays cannot be negative"));
        }
        if let PhysicsMode::Scaled { nominal_dt } = self.physics {
            if !(nominal_dt > 0.0) {
                return Err(invalid("physics", "nominal_dt must be positive"));
            }
        }
        Ok(())
    }
}
