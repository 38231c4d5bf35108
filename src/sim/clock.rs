//! Elapsed time to per-tick dt

use crate::sanitize_dt;

/// Turns a monotonically increasing timestamp into frame timesteps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first call yields 0, and a clock
    /// that steps backwards yields 0 rather than a negative step. Non-finite
    /// readings are skipped and never become the reference time.
    pub fn advance(&mut self, now: f64) -> f32 {
        if !now.is_finite() {
            return 0.0;
        }
        let dt = match self.last {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        if self.last.is_none_or(|last| now >= last) {
            self.last = Some(now);
        }
        sanitize_dt(dt)
    }
}
