//! Slice detection
//!
//! A fruit is sliced when any point of the fingertip trail lies inside its hit
//! circle. Testing the whole trail rather than just the newest point means a
//! fast swipe that jumps over a fruit between frames still connects.

use glam::Vec2;

use super::fruit::Fruit;
use crate::distance_sq;

/// Check whether any trail point lies within `radius` of `center`
pub fn trail_hits(center: Vec2, radius: f32, trail: impl IntoIterator<Item = Vec2>) -> bool {
    let radius_sq = radius * radius;
    trail
        .into_iter()
        .any(|p| distance_sq(p, center) <= radius_sq)
}

/// Slots of every live fruit touched by the trail, in descending slot order
///
/// Each slot appears at most once no matter how many trail points hit it.
pub fn detect_hits(fruits: &[Fruit], trail: &[Vec2], radius: f32) -> Vec<usize> {
    if trail.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<usize> = fruits
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_alive() && trail_hits(f.pos, radius, trail.iter().copied()))
        .map(|(slot, _)| slot)
        .collect();
    hits.reverse();
    hits
}
