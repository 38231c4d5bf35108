//! Fingertip tracking: exponential smoothing and the slice trail

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Exponential smoother for the raw fingertip position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSmoother {
    /// Weight kept from the previous value (0 = no smoothing)
    alpha: f32,
    /// Last smoothed value, kept across frames with no detection
    smoothed: Option<Vec2>,
}

impl PositionSmoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            smoothed: None,
        }
    }

    /// Feed this frame's raw point; returns the tracked point, or `None` when
    /// nothing was detected this frame
    pub fn update(&mut self, raw: Option<Vec2>) -> Option<Vec2> {
        let raw = raw?;
        let next = match self.smoothed {
            None => raw,
            Some(prev) => prev * self.alpha + raw * (1.0 - self.alpha),
        };
        self.smoothed = Some(next);
        Some(next)
    }

    /// Last smoothed value (retained while the hand is lost)
    pub fn last(&self) -> Option<Vec2> {
        self.smoothed
    }
}

/// Fixed-capacity history of tracked points, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailBuffer {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the oldest one when full
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Points in insertion order
    pub fn points(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// Most recent point
    pub fn head(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
