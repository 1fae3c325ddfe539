//! Obstacle field: spawning, falling, dodges and collisions
//!
//! Obstacles are kept in spawn order. Every tick each one falls a row; an
//! obstacle leaving the grid scores a dodge, one landing on the player's
//! cell costs a life. Resolved obstacles are removed in the same tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Obstacle, ObstacleId};
use crate::config::GameConfig;

/// What one step (or lateral check) changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub events: Vec<GameEvent>,
    /// Points gained this step
    pub score_delta: u64,
    /// The run ended during this step
    pub game_over: bool,
}

impl StepResult {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn collisions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Collision { .. }))
            .count()
    }

    pub fn dodges(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Dodged { .. }))
            .count()
    }

    pub fn spawns(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count()
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: StepResult) {
        self.events.extend(other.events);
        self.score_delta += other.score_delta;
        self.game_over |= other.game_over;
    }
}

/// The falling obstacles plus the spawn schedule
#[derive(Debug, Clone)]
pub struct ObstacleField {
    config: GameConfig,
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    /// Ticks since the last spawn
    spawn_counter: u32,
    /// Ticks until the next spawn fires
    spawn_threshold: u32,
    next_id: ObstacleId,
    /// Steps taken so far
    ticks: u64,
}

impl ObstacleField {
    /// Create an empty field with a seeded RNG
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut field = Self {
            config: config.clone(),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            spawn_counter: 0,
            spawn_threshold: 0,
            next_id: 1,
            ticks: 0,
        };
        field.spawn_threshold = field.roll_spawn_threshold();
        field
    }

    fn roll_spawn_threshold(&mut self) -> u32 {
        let min = self.config.spawn_min_ticks.max(1);
        let max = self.config.spawn_max_ticks.max(min);
        self.rng.random_range(min..=max)
    }

    fn next_obstacle_id(&mut self) -> ObstacleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an obstacle at the top of a random lane
    pub fn spawn_obstacle(&mut self) -> ObstacleId {
        let column = self.rng.random_range(0..self.config.lane_count.max(1));
        self.push_obstacle(0, column)
    }

    /// Place an obstacle at a given cell (scripted waves, tests).
    /// Row and column are clamped onto the grid.
    pub fn push_obstacle(&mut self, row: u32, column: usize) -> ObstacleId {
        let id = self.next_obstacle_id();
        let row = row.min(self.config.grid_height.saturating_sub(1));
        let column = column.min(self.config.lane_count.saturating_sub(1));
        self.obstacles.push(Obstacle {
            row,
            ..Obstacle::new(id, column)
        });
        log::debug!("Spawned obstacle {} in lane {} at row {}", id, column, row);
        id
    }

    /// Advance every obstacle one row, resolve dodges and hits, then run
    /// the spawn schedule. A finished run does not step.
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        let mut result = StepResult::default();
        if !state.is_running() {
            return result;
        }
        self.ticks += 1;

        let grid_height = self.config.grid_height;
        let player_row = self.config.player_row;
        let points = self.config.score_increment;

        for obstacle in self.obstacles.iter_mut() {
            obstacle.row = obstacle.row.saturating_add(1);

            if obstacle.row >= grid_height {
                if !obstacle.resolved {
                    state.add_score(points);
                    result.score_delta += points;
                    result.events.push(GameEvent::Dodged {
                        id: obstacle.id,
                        lane: obstacle.column,
                        points,
                    });
                    log::debug!("Obstacle {} dodged (+{})", obstacle.id, points);
                }
                obstacle.resolved = true;
            } else if obstacle.occupies(player_row, state.player_lane()) {
                obstacle.resolved = true;
                resolve_collision(obstacle, state, &mut result);
                if result.game_over {
                    break;
                }
            }
        }

        self.obstacles.retain(|o| !o.resolved);

        if result.game_over {
            return result;
        }

        self.spawn_counter += 1;
        if self.spawn_counter >= self.spawn_threshold {
            let id = self.spawn_obstacle();
            if let Some(obstacle) = self.obstacles.last() {
                result.events.push(GameEvent::Spawned {
                    id,
                    lane: obstacle.column,
                });
            }
            self.spawn_counter = 0;
            self.spawn_threshold = self.roll_spawn_threshold();
        }

        result
    }

    /// Resolve an obstacle the player just moved sideways into
    pub fn check_lateral_collision(&mut self, state: &mut GameState) -> StepResult {
        let mut result = StepResult::default();
        if !state.is_running() {
            return result;
        }

        let player_row = self.config.player_row;
        let lane = state.player_lane();
        if let Some(obstacle) = self
            .obstacles
            .iter_mut()
            .find(|o| o.occupies(player_row, lane))
        {
            obstacle.resolved = true;
            resolve_collision(obstacle, state, &mut result);
        }

        self.obstacles.retain(|o| !o.resolved);
        result
    }

    /// Live obstacles in spawn order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Drop all obstacles and restart the spawn schedule
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_counter = 0;
        self.spawn_threshold = self.roll_spawn_threshold();
    }

    /// Ticks left before the next spawn
    pub fn ticks_until_spawn(&self) -> u32 {
        self.spawn_threshold.saturating_sub(self.spawn_counter)
    }

    /// Number of steps taken on a running game
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn resolve_collision(obstacle: &Obstacle, state: &mut GameState, result: &mut StepResult) {
    let fatal = state.apply_collision();
    result.events.push(GameEvent::Collision {
        id: obstacle.id,
        lane: obstacle.column,
        lives_left: state.lives(),
        fatal,
    });
    log::info!(
        "Collision with obstacle {} in lane {} ({} lives left)",
        obstacle.id,
        obstacle.column,
        state.lives()
    );
    if fatal {
        result.game_over = true;
        result.events.push(GameEvent::GameOver {
            final_score: state.score(),
        });
        log::info!("Game over, final score {}", state.score());
    }
}
