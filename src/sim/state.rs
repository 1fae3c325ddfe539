//! Player state and core simulation types

use serde::{Deserialize, Serialize};

use crate::config::LivesMode;
use crate::consts::*;
use crate::{center_lane, clamp_lane};

/// Obstacle identifier (spawn order)
pub type ObstacleId = u32;

/// A falling obstacle on the lane grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Vertical grid position, grows toward the bottom
    pub row: u32,
    /// Lane the obstacle falls in
    pub column: usize,
    /// Already scored or collided; pending removal
    #[serde(default)]
    pub resolved: bool,
}

impl Obstacle {
    pub fn new(id: ObstacleId, column: usize) -> Self {
        Self {
            id,
            row: 0,
            column,
            resolved: false,
        }
    }

    /// Does this obstacle occupy the given cell and still count?
    pub fn occupies(&self, row: u32, column: usize) -> bool {
        !self.resolved && self.row == row && self.column == column
    }
}

/// Something that happened during a tick or an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New obstacle entered at the top
    Spawned { id: ObstacleId, lane: usize },
    /// Obstacle left the grid without hitting the player
    Dodged { id: ObstacleId, lane: usize, points: u64 },
    /// Obstacle hit the player
    Collision {
        id: ObstacleId,
        lane: usize,
        lives_left: u32,
        fatal: bool,
    },
    /// Run ended (finite lives only)
    GameOver { final_score: u64 },
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Timer running, obstacles falling
    Playing,
    /// Timer stopped, input ignored
    Paused,
    /// Run ended (finite lives only)
    GameOver,
}

/// Which way the player moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneMove {
    Left,
    Right,
}

/// Score, lives and player position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    score: u64,
    lives: u32,
    player_lane: usize,
    running: bool,
    lane_count: usize,
    lives_mode: LivesMode,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(LANE_COUNT, LIFE_COUNT, LivesMode::Finite)
    }
}

impl GameState {
    /// Create a running state with the player centered
    pub fn new(lane_count: usize, life_count: u32, lives_mode: LivesMode) -> Self {
        let lane_count = lane_count.max(1);
        Self {
            score: 0,
            lives: life_count,
            player_lane: center_lane(lane_count),
            running: true,
            lane_count,
            lives_mode,
        }
    }

    /// Reinitialize for a fresh run
    pub fn reset(&mut self, life_count: u32) {
        self.score = 0;
        self.lives = life_count;
        self.player_lane = center_lane(self.lane_count);
        self.running = true;
    }

    pub fn move_left(&mut self) {
        self.player_lane = self.player_lane.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.player_lane = clamp_lane(self.player_lane as i64 + 1, self.lane_count);
    }

    pub fn apply_move(&mut self, mv: LaneMove) {
        match mv {
            LaneMove::Left => self.move_left(),
            LaneMove::Right => self.move_right(),
        }
    }

    /// Add points; ignored once the run is over
    pub fn add_score(&mut self, points: u64) {
        if !self.running {
            return;
        }
        self.score = self.score.saturating_add(points);
    }

    /// Take one life. Returns true if this collision ended the run.
    pub fn apply_collision(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        match self.lives_mode {
            LivesMode::Finite if self.lives == 0 => {
                self.running = false;
                true
            }
            _ => false,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn player_lane(&self) -> usize {
        self.player_lane
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        !self.running
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn lives_mode(&self) -> LivesMode {
        self.lives_mode
    }
}
