//! Game configuration
//!
//! Loaded from JSON; every field is optional and falls back to the defaults
//! in [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// What happens when lives run out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LivesMode {
    /// Run ends when lives reach zero
    #[default]
    Finite,
    /// Lives clamp at zero and the run never ends on its own
    Endless,
}

impl LivesMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LivesMode::Finite => "finite",
            LivesMode::Endless => "endless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "finite" => Some(LivesMode::Finite),
            "endless" | "infinite" => Some(LivesMode::Endless),
            _ => None,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Grid ===
    /// Number of lanes
    pub lane_count: usize,
    /// Visible rows
    pub grid_height: u32,
    /// Row the player sits on (must be < grid_height)
    pub player_row: u32,

    // === Rules ===
    /// Lives at the start of a run
    pub life_count: u32,
    pub lives_mode: LivesMode,
    /// Points per dodged obstacle
    pub score_increment: u64,

    // === Timing ===
    /// Tick period in milliseconds
    pub tick_period_ms: u64,
    /// Spawn interval lower bound (ticks, inclusive)
    pub spawn_min_ticks: u32,
    /// Spawn interval upper bound (ticks, inclusive)
    pub spawn_max_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            grid_height: GRID_HEIGHT,
            player_row: PLAYER_ROW,

            life_count: LIFE_COUNT,
            lives_mode: LivesMode::Finite,
            score_increment: SCORE_INCREMENT,

            tick_period_ms: TICK_PERIOD_MS,
            spawn_min_ticks: SPAWN_MIN_TICKS,
            spawn_max_ticks: SPAWN_MAX_TICKS,
        }
    }
}

impl GameConfig {
    /// Default config with the endless lives policy
    pub fn endless() -> Self {
        Self {
            lives_mode: LivesMode::Endless,
            ..Self::default()
        }
    }

    /// Tick period as a [`Duration`]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.lane_count == 0 {
            return Err(ConfigError::Invalid("lane_count must be at least 1".into()));
        }
        if self.grid_height == 0 {
            return Err(ConfigError::Invalid("grid_height must be at least 1".into()));
        }
        if self.player_row >= self.grid_height {
            return Err(ConfigError::Invalid(format!(
                "player_row {} must be below grid_height {}",
                self.player_row, self.grid_height
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be positive".into()));
        }
        if self.spawn_min_ticks == 0 || self.spawn_min_ticks > self.spawn_max_ticks {
            return Err(ConfigError::Invalid(format!(
                "spawn interval {}..={} is empty or starts at zero",
                self.spawn_min_ticks, self.spawn_max_ticks
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
