//! Fruit entities: spawning and ballistic motion
//!
//! Positions are in camera frame pixels with y pointing down. Velocities and
//! spin are per-frame increments; [`PhysicsMode`] decides how they relate to dt.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::{PhysicsMode, Settings};

/// Fruit lifecycle - flying or waiting to come back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FruitState {
    /// On screen, moving and sliceable
    Alive,
    /// Sliced; relaunches once `timer` (seconds) runs out
    Respawning { timer: f32 },
}

/// A fruit slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in degrees (cosmetic)
    pub angle: f32,
    /// Degrees per frame
    pub spin: f32,
    pub state: FruitState,
    /// Index into the renderer's fruit images
    pub appearance: u8,
}

impl Fruit {
    /// Launch a fresh fruit from the bottom edge
    ///
    /// Fruit spawned left of center drifts right and vice versa, so every arc
    /// bends back toward the middle of the frame.
    pub fn spawn<R: Rng>(rng: &mut R, settings: &Settings) -> Self {
        let lo = settings.spawn_margin.round() as i32;
        let hi = (settings.frame_width - settings.spawn_margin).round() as i32;
        let x = rng.random_range(lo..=hi) as f32;
        let vx = if x < settings.center_x() {
            settings.launch_drift
        } else {
            -settings.launch_drift
        };
        let spin = if settings.spin_range > 0.0 {
            rng.random_range(-settings.spin_range..=settings.spin_range)
        } else {
            0.0
        };

        Self {
            pos: Vec2::new(x, settings.bottom() - settings.spawn_inset),
            vel: Vec2::new(vx, -settings.launch_speed),
            angle: rng.random_range(0.0..360.0),
            spin,
            state: FruitState::Alive,
            appearance: rng.random_range(0..settings.appearance_count),
        }
    }

    /// Relaunch this slot in place with freshly drawn properties
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, settings: &Settings) {
        *self = Self::spawn(rng, settings);
    }

    pub fn is_alive(&self) -> bool {
        self.state == FruitState::Alive
    }

    /// Remaining respawn time, if sliced
    pub fn respawn_timer(&self) -> Option<f32> {
        match self.state {
            FruitState::Alive => None,
            FruitState::Respawning { timer } => Some(timer),
        }
    }

    /// Mark as sliced; it stays out of play for `delay` seconds
    pub fn slice(&mut self, delay: f32) {
        self.state = FruitState::Respawning {
            timer: delay.max(0.0),
        };
    }

    /// Count down a sliced fruit. Returns true when the timer has run out and
    /// the slot should be relaunched.
    pub fn tick_respawn(&mut self, dt: f32) -> bool {
        match &mut self.state {
            FruitState::Alive => false,
            FruitState::Respawning { timer } => {
                *timer -= dt;
                if *timer <= 0.0 {
                    *timer = 0.0;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Advance a live fruit by one tick. Dead fruit are left untouched.
    ///
    /// The vertical position moves before gravity is applied, and leaving the
    /// lateral bounds only flips `vel.x`; the fruit may sit past the bound for
    /// a frame before it swings back.
    pub fn step(&mut self, dt: f32, settings: &Settings) {
        if !self.is_alive() {
            return;
        }
        let k = physics_scale(&settings.physics, dt);
        if k <= 0.0 {
            return;
        }

        self.pos.y += self.vel.y * k;
        self.vel.y += settings.gravity * k;
        self.pos.x += self.vel.x * k;
        self.angle = (self.angle + self.spin * k).rem_euclid(360.0);

        if self.pos.x < settings.x_min || self.pos.x > settings.x_max {
            self.vel.x = -self.vel.x;
        }
    }

    /// Whether this fruit has dropped out of the bottom of the frame
    pub fn fell_out(&self, settings: &Settings) -> bool {
        self.is_alive() && self.pos.y > settings.bottom()
    }
}

/// Scale factor for a tick of length `dt`; zero means "do not move"
pub fn physics_scale(mode: &PhysicsMode, dt: f32) -> f32 {
    if dt <= 0.0 { 0.0 } else { mode.step_scale(dt) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fruit_at(x: f32, y: f32, vx: f32, vy: f32) -> Fruit {
        Fruit {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            angle: 0.0,
            spin: 2.0,
            state: FruitState::Alive,
            appearance: 0,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let f = Fruit::spawn(&mut rng, &settings);
            assert!(f.pos.x >= 30.0 && f.pos.x <= 610.0);
            assert_eq!(f.pos.x.fract(), 0.0);
            assert_eq!(f.pos.y, 475.0);
            assert_eq!(f.vel.y, -22.0);
            assert!(f.angle >= 0.0 && f.angle < 360.0);
            assert!(f.spin >= -4.0 && f.spin <= 4.0);
            assert!(f.appearance < 4);
            assert!(f.is_alive());
        }
    }

    #[test]
    fn test_step_integration_order() {
        let settings = Settings::default();
        let mut f = fruit_at(100.0, 300.0, 4.0, -22.0);
        f.step(1.0 / 30.0, &settings);
        // y moves by the old velocity, then gravity applies
        assert_eq!(f.pos.y, 278.0);
        assert!((f.vel.y - (-21.1)).abs() < 1e-4);
        assert_eq!(f.pos.x, 104.0);
        assert_eq!(f.angle, 2.0);
    }

    #[test]
    fn test_lateral_reflection_without_clamp() {
        let settings = Settings::default();
        let mut f = fruit_at(628.0, 200.0, 4.0, 0.0);
        f.step(1.0 / 30.0, &settings);
        // Overshoots the bound by a frame, velocity flips
        assert_eq!(f.pos.x, 632.0);
        assert_eq!(f.vel.x, -4.0);
        f.step(1.0 / 30.0, &settings);
        assert_eq!(f.pos.x, 628.0);
        assert_eq!(f.vel.x, -4.0);

        let mut f = fruit_at(22.0, 200.0, -4.0, 0.0);
        f.step(1.0 / 30.0, &settings);
        assert_eq!(f.pos.x, 18.0);
        assert_eq!(f.vel.x, 4.0);
    }

    #[test]
    fn test_right_bound_is_630() {
        let settings = Settings::default();
        let mut f = fruit_at(622.0, 200.0, 4.0, 0.0);
        f.step(1.0 / 30.0, &settings);
        // Still inside [20, 630], so no bounce yet
        assert_eq!(f.pos.x, 626.0);
        assert_eq!(f.vel.x, 4.0);
        f.step(1.0 / 30.0, &settings);
        assert_eq!(f.pos.x, 630.0);
        assert_eq!(f.vel.x, 4.0);
        f.step(1.0 / 30.0, &settings);
        assert_eq!(f.vel.x, -4.0);
    }

    #[test]
    fn test_dead_fruit_does_not_move() {
        let settings = Settings::default();
        let mut f = fruit_at(100.0, 100.0, 4.0, -10.0);
        f.slice(0.85);
        f.step(1.0 / 30.0, &settings);
        assert_eq!(f.pos, Vec2::new(100.0, 100.0));
        assert!(!f.fell_out(&settings));
    }

    #[test]
    fn test_respawn_timer() {
        let mut f = fruit_at(0.0, 0.0, 0.0, 0.0);
        f.slice(0.1);
        assert_eq!(f.respawn_timer(), Some(0.1));
        assert!(!f.tick_respawn(0.05));
        assert!(f.tick_respawn(0.06));
        assert_eq!(f.respawn_timer(), Some(0.0));
    }

    #[test]
    fn test_scaled_physics() {
        let settings = Settings {
            physics: PhysicsMode::Scaled { nominal_dt: 0.02 },
            ..Settings::default()
        };
        let mut f = fruit_at(100.0, 300.0, 4.0, -20.0);
        f.step(0.04, &settings);
        assert_eq!(f.pos.y, 260.0);
        assert!((f.vel.y - (-18.2)).abs() < 1e-4);
        assert_eq!(f.pos.x, 108.0);

        // Zero dt is a no-op tick
        let before = f.pos;
        f.step(0.0, &settings);
        assert_eq!(f.pos, before);
    }

    #[test]
    fn test_physics_scale() {
        assert_eq!(physics_scale(&PhysicsMode::FrameCoupled, 0.0), 0.0);
        assert_eq!(physics_scale(&PhysicsMode::FrameCoupled, 0.5), 1.0);
        assert_eq!(physics_scale(&PhysicsMode::Scaled { nominal_dt: 0.1 }, 0.05), 0.5);
    }

    proptest! {
        #[test]
        fn prop_spawn_drifts_toward_center(seed in any::<u64>()) {
            let settings = Settings::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let f = Fruit::spawn(&mut rng, &settings);
            if f.pos.x < settings.center_x() {
                prop_assert!(f.vel.x > 0.0);
            } else {
                prop_assert!(f.vel.x < 0.0);
            }
        }
    }
}
