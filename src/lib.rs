//! Lane Dodge - A three-lane obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player state, obstacle field, tick)
//! - `session`: Presentation-facing game session (input, timer, snapshots)
//! - `platform`: Fixed-period tick timing
//! - `feedback`: Game events mapped to platform feedback cues
//! - `layout`: Grid cells mapped to screen-space rectangles
//! - `config`: Data-driven game configuration

pub mod config;
pub mod error;
pub mod feedback;
pub mod layout;
pub mod platform;
pub mod session;
pub mod sim;

pub use config::{GameConfig, LivesMode};
pub use error::ConfigError;
pub use session::{GamePhase, GameSession, RunSummary, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Number of lanes the player and obstacles move between
    pub const LANE_COUNT: usize = 3;
    /// Visible rows; an obstacle leaves the grid once its row reaches this
    pub const GRID_HEIGHT: u32 = 14;
    /// Row the player icon sits on
    pub const PLAYER_ROW: u32 = GRID_HEIGHT - 2;
    /// Lives at the start of a run
    pub const LIFE_COUNT: u32 = 3;
    /// Fixed tick period (ms)
    pub const TICK_PERIOD_MS: u64 = 600;
    /// Points per dodged obstacle
    pub const SCORE_INCREMENT: u64 = 10;
    /// Spawn interval bounds (ticks, inclusive)
    pub const SPAWN_MIN_TICKS: u32 = 4;
    pub const SPAWN_MAX_TICKS: u32 = 6;
    /// Crash vibration length (ms)
    pub const CRASH_VIBRATION_MS: u64 = 500;
}

/// Center lane index for a given lane count
#[inline]
pub fn center_lane(lane_count: usize) -> usize {
    lane_count / 2
}

/// Clamp a signed lane index into `[0, lane_count)`
#[inline]
pub fn clamp_lane(lane: i64, lane_count: usize) -> usize {
    lane.clamp(0, lane_count.saturating_sub(1) as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_lane() {
        assert_eq!(center_lane(3), 1);
        assert_eq!(center_lane(5), 2);
        assert_eq!(center_lane(1), 0);
    }

    #[test]
    fn test_clamp_lane() {
        assert_eq!(clamp_lane(-1, 3), 0);
        assert_eq!(clamp_lane(1, 3), 1);
        assert_eq!(clamp_lane(7, 3), 2);
    }
}
