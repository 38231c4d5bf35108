//! Fruit Slice - fingertip-driven fruit slicing game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tracking, physics, slicing, game state)
//! - `landmarks`: Bridge from hand landmark detections to a fingertip point
//! - `feedback`: Sound cue sinks fed from simulation events
//! - `settings`: Data-driven game tuning loaded from JSON

pub mod feedback;
pub mod landmarks;
pub mod settings;
pub mod sim;

pub use settings::{PhysicsMode, Settings, SettingsError, SpawnRule};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Camera frame dimensions (pixels)
    pub const FRAME_WIDTH: f32 = 640.0;
    pub const FRAME_HEIGHT: f32 = 480.0;

    /// Fingertip smoothing factor (higher = more lag, less jitter)
    pub const SMOOTHING: f32 = 0.7;
    /// Number of recent fingertip samples kept for drawing and hit tests
    pub const TRAIL_LENGTH: usize = 8;
    /// Slice radius around a fruit center (pixels)
    pub const HIT_RADIUS: f32 = 25.0;

    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.9;
    /// Upward launch impulse (pixels/frame)
    pub const LAUNCH_SPEED: f32 = 22.0;
    /// Horizontal drift toward the frame center (pixels/frame)
    pub const LAUNCH_DRIFT: f32 = 4.0;
    /// Angular velocity range, symmetric around zero (degrees/frame)
    pub const SPIN_RANGE: f32 = 4.0;

    /// Fruit reverses horizontal direction outside [X_MIN, X_MAX]
    pub const X_MIN: f32 = 20.0;
    pub const X_MAX: f32 = 630.0;
    /// Spawn x is drawn from [SPAWN_MARGIN, width - SPAWN_MARGIN]
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Fruit launches this far above the bottom edge
    pub const SPAWN_INSET: f32 = 5.0;

    /// Delay before a sliced fruit comes back (seconds)
    pub const RESPAWN_DELAY: f32 = 0.85;

    /// Number of fruit images the renderer provides
    pub const APPEARANCE_COUNT: u8 = 4;

    /// Nominal frame time the per-frame constants were tuned for (30 fps camera)
    pub const NOMINAL_DT: f32 = 1.0 / 30.0;
    /// Largest timestep accepted per tick (seconds)
    pub const MAX_DT: f32 = 0.25;
}

/// Squared distance between two points
#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Sanitize a frame timestep: negative or NaN becomes zero, huge gaps are capped
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(consts::MAX_DT)
    }
}
