//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod field;
pub mod state;
pub mod tick;

pub use field::{ObstacleField, StepResult};
pub use state::{GameEvent, GamePhase, GameState, LaneMove, Obstacle, ObstacleId};
pub use tick::{TickInput, autopilot_move, tick};
