//! Fixed timestep simulation tick
//!
//! Applies one-shot input, then advances the obstacle field by one row.

use super::field::{ObstacleField, StepResult};
use super::state::{GamePhase, GameState, LaneMove};

/// How many rows above the player the autopilot watches
const AUTOPILOT_LOOKAHEAD: u32 = 3;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot steers the player
    pub autopilot: bool,
}

/// Advance the game by one tick
pub fn tick(
    state: &mut GameState,
    field: &mut ObstacleField,
    phase: &mut GamePhase,
    input: &TickInput,
) -> StepResult {
    // Handle pause toggle
    if input.pause {
        match *phase {
            GamePhase::Playing => {
                *phase = GamePhase::Paused;
                return StepResult::default();
            }
            GamePhase::Paused => *phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match *phase {
        GamePhase::Paused | GamePhase::GameOver => return StepResult::default(),
        GamePhase::Playing => {}
    }

    let mut result = StepResult::default();

    if input.autopilot {
        if let Some(mv) = autopilot_move(state, field) {
            state.apply_move(mv);
            result.merge(field.check_lateral_collision(state));
        }
    }

    if state.is_running() {
        result.merge(field.step(state));
    }

    if state.is_game_over() {
        *phase = GamePhase::GameOver;
    }

    result
}

/// Rows until the nearest live obstacle in `lane` lands on the player row.
/// `None` if nothing in that lane is at or above the player.
fn rows_until_hit(field: &ObstacleField, lane: usize) -> Option<u32> {
    let player_row = field.config().player_row;
    field
        .obstacles()
        .iter()
        .filter(|o| !o.resolved && o.column == lane && o.row <= player_row)
        .map(|o| player_row - o.row)
        .min()
}

/// Pick a lane change that gets the player out of the way of the nearest
/// threat, preferring the adjacent lane with the most room.
pub fn autopilot_move(state: &GameState, field: &ObstacleField) -> Option<LaneMove> {
    let lane = state.player_lane();
    let threat = rows_until_hit(field, lane)?;
    if threat > AUTOPILOT_LOOKAHEAD {
        return None;
    }

    // Moving into a lane is safe if nothing sits on the player row there
    // and nothing lands on it next tick.
    let room = |target: usize| -> Option<u32> {
        match rows_until_hit(field, target) {
            Some(rows) if rows <= 1 => None,
            Some(rows) => Some(rows),
            None => Some(u32::MAX),
        }
    };

    let left = lane.checked_sub(1).and_then(|l| room(l).map(|r| (r, LaneMove::Left)));
    let right = (lane + 1 < state.lane_count())
        .then(|| room(lane + 1).map(|r| (r, LaneMove::Right)))
        .flatten();

    match (left, right) {
        (Some((l, left_mv)), Some((r, right_mv))) => Some(if r > l { right_mv } else { left_mv }),
        (Some((_, mv)), None) | (None, Some((_, mv))) => Some(mv),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_min_ticks: 10_000,
            spawn_max_ticks: 10_000,
            ..GameConfig::default()
        }
    }

    fn setup(config: &GameConfig) -> (GameState, ObstacleField, GamePhase) {
        (
            GameState::new(config.lane_count, config.life_count, config.lives_mode),
            ObstacleField::new(config, 12345),
            GamePhase::Playing,
        )
    }

    #[test]
    fn test_tick_pause() {
        let config = quiet_config();
        let (mut state, mut field, mut phase) = setup(&config);
        field.push_obstacle(0, 0);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &mut field, &mut phase, &pause);
        assert_eq!(phase, GamePhase::Paused);
        assert_eq!(field.obstacles()[0].row, 0);

        // Paused ticks do nothing
        tick(&mut state, &mut field, &mut phase, &TickInput::default());
        assert_eq!(field.obstacles()[0].row, 0);

        // Unpause resumes on the same tick
        tick(&mut state, &mut field, &mut phase, &pause);
        assert_eq!(phase, GamePhase::Playing);
        assert_eq!(field.obstacles()[0].row, 1);
    }

    #[test]
    fn test_tick_enters_game_over() {
        let config = GameConfig {
            life_count: 1,
            ..quiet_config()
        };
        let (mut state, mut field, mut phase) = setup(&config);
        field.push_obstacle(config.player_row - 1, 1);

        let result = tick(&mut state, &mut field, &mut phase, &TickInput::default());
        assert!(result.game_over);
        assert_eq!(phase, GamePhase::GameOver);

        // Pause toggles are ignored once over
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &mut field, &mut phase, &pause).is_empty());
        assert_eq!(phase, GamePhase::GameOver);
    }

    #[test]
    fn test_autopilot_dodges_threat() {
        let config = quiet_config();
        let (mut state, mut field, mut phase) = setup(&config);
        field.push_obstacle(config.player_row - 2, 1);
        field.push_obstacle(config.player_row - 1, 0);

        assert_eq!(autopilot_move(&state, &field), Some(LaneMove::Right));

        let autopilot = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..config.grid_height {
            let result = tick(&mut state, &mut field, &mut phase, &autopilot);
            assert_eq!(result.collisions(), 0);
        }
        assert_eq!(state.lives(), config.life_count);
        assert_eq!(state.score(), 20);
    }

    #[test]
    fn test_autopilot_idle_when_clear() {
        let config = quiet_config();
        let (state, mut field, _) = setup(&config);
        assert_eq!(autopilot_move(&state, &field), None);
        // Far away threats are ignored
        field.push_obstacle(0, 1);
        assert_eq!(autopilot_move(&state, &field), None);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs should match exactly
        let config = GameConfig::default();
        let (mut s1, mut f1, mut p1) = setup(&config);
        let (mut s2, mut f2, mut p2) = setup(&config);

        let inputs = [
            TickInput::default(),
            TickInput {
                autopilot: true,
                ..Default::default()
            },
            TickInput {
                pause: true,
                ..Default::default()
            },
            TickInput {
                pause: true,
                autopilot: true,
            },
        ];

        for input in inputs.iter().cycle().take(80) {
            let r1 = tick(&mut s1, &mut f1, &mut p1, input);
            let r2 = tick(&mut s2, &mut f2, &mut p2, input);
            assert_eq!(r1, r2);
        }

        assert_eq!(s1, s2);
        assert_eq!(p1, p2);
        assert_eq!(f1.obstacles(), f2.obstacles());
    }
}
