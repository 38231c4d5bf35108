//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Timestep passed in explicitly, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (by fruit slot)
//! - No rendering, capture or audio dependencies; side effects leave as events

pub mod clock;
pub mod collision;
pub mod fruit;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tracking;
pub mod view;

pub use clock::FrameClock;
pub use collision::{detect_hits, trail_hits};
pub use fruit::{Fruit, FruitState};
pub use spawn::{RuleFired, SpawnManager};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Command, LoopControl, TickInput, tick};
pub use tracking::{PositionSmoother, TrailBuffer};
pub use view::{FrameView, FruitSprite};
