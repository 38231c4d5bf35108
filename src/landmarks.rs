//! Hand landmark bridge
//!
//! The pose estimator reports 21 landmarks per detected hand, normalized to
//! [0, 1] across the camera frame. Gameplay only follows the index fingertip of
//! the first hand.

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const WRIST: usize = 0;
pub const INDEX_TIP: usize = 8;

/// Landmarks per hand
pub const LANDMARK_COUNT: usize = 21;

/// A single normalized landmark
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth; unused by gameplay
    #[serde(default)]
    pub z: f32,
}

/// Landmarks of one detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub points: Vec<Landmark>,
}

impl HandLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Index fingertip, if this detection includes it
    pub fn index_tip(&self) -> Option<Landmark> {
        self.points.get(INDEX_TIP).copied()
    }
}

/// Pixel position of the first hand's index fingertip
///
/// With `mirror` set the x axis is flipped, matching a selfie-view camera
/// image that is shown mirrored to the player.
pub fn fingertip(hands: &[HandLandmarks], width: f32, height: f32, mirror: bool) -> Option<Vec2> {
    let tip = hands.first()?.index_tip()?;
    if !(tip.x.is_finite() && tip.y.is_finite()) {
        return None;
    }
    let x = if mirror { 1.0 - tip.x } else { tip.x };
    Some(Vec2::new(x * width, tip.y * height))
}
