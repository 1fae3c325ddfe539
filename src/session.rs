//! Game session: the API a presentation layer drives
//!
//! Owns the config, player state, obstacle field and tick timer. Player
//! input is applied immediately; obstacles only move on timer ticks.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::Result;
use crate::platform::TickTimer;
use crate::sim::{self, GameState, LaneMove, ObstacleField, ObstacleId, StepResult, TickInput};

pub use crate::sim::GamePhase;

/// One obstacle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: ObstacleId,
    pub row: u32,
    pub column: usize,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: u32,
    pub player_lane: usize,
    pub running: bool,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub obstacles: Vec<ObstacleView>,
}

/// End-of-run numbers for the game-over screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_score: u64,
    pub time_ticks: u64,
    pub dodges: u64,
    pub collisions: u64,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    /// Run seed for reproducibility
    seed: u64,
    state: GameState,
    field: ObstacleField,
    phase: GamePhase,
    timer: TickTimer,
    dodges: u64,
    collisions: u64,
}

impl GameSession {
    /// Create a session; the timer stays stopped until [`Self::start`].
    /// An invalid config is logged and used as given; see [`Self::try_new`].
    pub fn new(config: GameConfig, seed: u64) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Starting session with unvalidated config: {}", e);
        }
        let state = GameState::new(config.lane_count, config.life_count, config.lives_mode);
        let field = ObstacleField::new(&config, seed);
        let timer = TickTimer::new(config.tick_period());
        Self {
            config,
            seed,
            state,
            field,
            phase: GamePhase::Playing,
            timer,
            dodges: 0,
            collisions: 0,
        }
    }

    /// Create a session, rejecting an invalid config
    pub fn try_new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, seed))
    }

    /// Default config with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default(), seed)
    }

    /// Start the tick timer
    pub fn start(&mut self, now: Instant) {
        if self.phase == GamePhase::Playing {
            self.timer.start(now);
        }
    }

    pub fn move_left(&mut self) -> StepResult {
        self.apply_move(LaneMove::Left)
    }

    pub fn move_right(&mut self) -> StepResult {
        self.apply_move(LaneMove::Right)
    }

    /// Move the player and resolve anything they moved sideways into
    pub fn apply_move(&mut self, mv: LaneMove) -> StepResult {
        if self.phase != GamePhase::Playing {
            log::warn!("Ignoring {:?} while {:?}", mv, self.phase);
            return StepResult::default();
        }
        self.state.apply_move(mv);
        let result = self.field.check_lateral_collision(&mut self.state);
        self.record(&result);
        result
    }

    /// Poll the timer and tick at most once
    pub fn update(&mut self, now: Instant) -> Option<StepResult> {
        self.update_with(now, &TickInput::default())
    }

    /// Like [`Self::update`], with one-shot input for the tick if it fires
    pub fn update_with(&mut self, now: Instant, input: &TickInput) -> Option<StepResult> {
        if !self.timer.poll(now) {
            return None;
        }
        Some(self.tick(input))
    }

    /// Run one tick immediately, independent of the timer.
    /// A pause toggle can pause the session; unpausing goes through
    /// [`Self::resume`] so the timer is rescheduled.
    pub fn tick(&mut self, input: &TickInput) -> StepResult {
        let mut input = input.clone();
        if input.pause && self.phase == GamePhase::Paused {
            log::warn!("Ignoring pause toggle while paused; use resume");
            input.pause = false;
        }
        let result = sim::tick(&mut self.state, &mut self.field, &mut self.phase, &input);
        if self.phase == GamePhase::Paused {
            self.timer.pause();
        }
        self.record(&result);
        result
    }

    fn record(&mut self, result: &StepResult) {
        self.dodges += result.dodges() as u64;
        self.collisions += result.collisions() as u64;
        if self.state.is_game_over() {
            self.phase = GamePhase::GameOver;
            self.timer.pause();
        }
    }

    /// Stop ticking (host went to background)
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.timer.pause();
            log::info!("Paused at tick {}", self.time_ticks());
        }
    }

    /// Resume ticking one period from `now`; missed ticks are not replayed
    pub fn resume(&mut self, now: Instant) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.timer.resume(now);
            log::info!("Resumed at tick {}", self.time_ticks());
        }
    }

    /// Start a fresh run ("play again")
    pub fn restart(&mut self, seed: u64, now: Instant) {
        self.seed = seed;
        self.state.reset(self.config.life_count);
        self.field = ObstacleField::new(&self.config, seed);
        self.phase = GamePhase::Playing;
        self.dodges = 0;
        self.collisions = 0;
        self.timer.start(now);
        log::info!("Game restarted with seed: {}", seed);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.state.score(),
            lives: self.state.lives(),
            player_lane: self.state.player_lane(),
            running: self.state.is_running(),
            phase: self.phase,
            time_ticks: self.time_ticks(),
            obstacles: self
                .field
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    row: o.row,
                    column: o.column,
                })
                .collect(),
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            final_score: self.state.score(),
            time_ticks: self.time_ticks(),
            dodges: self.dodges,
            collisions: self.collisions,
            seed: self.seed,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Scripted setups (tutorials, tests)
    pub fn field_mut(&mut self) -> &mut ObstacleField {
        &mut self.field
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulation tick counter
    pub fn time_ticks(&self) -> u64 {
        self.field.ticks()
    }
}
