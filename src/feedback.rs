//! Player feedback cues
//!
//! The simulation only emits [`GameEvent`]s. This module turns them into
//! platform-neutral cues (toast, vibration, HUD refresh, game-over screen)
//! that a host delivers through a [`FeedbackSink`].

use serde::{Deserialize, Serialize};

use crate::consts::CRASH_VIBRATION_MS;
use crate::sim::{GameEvent, GameState, StepResult};

/// Feedback cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Short "Crash!" message
    CrashToast,
    /// One-shot vibration
    Vibrate { millis: u64 },
    /// Score label needs a refresh
    ScoreChanged(u64),
    /// Hearts need a refresh
    LivesChanged(u32),
    /// Switch to the game-over screen
    ShowGameOver { final_score: u64 },
}

/// Something that can deliver feedback cues to the player
pub trait FeedbackSink {
    fn emit(&mut self, cue: Feedback);

    /// Deliver every cue for a step, in event order
    fn emit_step(&mut self, result: &StepResult, state: &GameState) {
        for event in &result.events {
            for cue in feedback_for(event, state) {
                self.emit(cue);
            }
        }
    }
}

/// Cues for a single event
pub fn feedback_for(event: &GameEvent, state: &GameState) -> Vec<Feedback> {
    match *event {
        GameEvent::Spawned { .. } => Vec::new(),
        GameEvent::Dodged { .. } => vec![Feedback::ScoreChanged(state.score())],
        GameEvent::Collision { lives_left, .. } => vec![
            Feedback::CrashToast,
            Feedback::Vibrate {
                millis: CRASH_VIBRATION_MS,
            },
            Feedback::LivesChanged(lives_left),
        ],
        GameEvent::GameOver { final_score } => vec![Feedback::ShowGameOver { final_score }],
    }
}

/// Writes cues to the log (headless hosts)
#[derive(Debug, Default)]
pub struct LogFeedback {
    muted: bool,
}

impl LogFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl FeedbackSink for LogFeedback {
    fn emit(&mut self, cue: Feedback) {
        if self.muted {
            return;
        }
        match cue {
            Feedback::CrashToast => log::info!("Crash!"),
            Feedback::Vibrate { millis } => log::debug!("Vibrate {}ms", millis),
            Feedback::ScoreChanged(score) => log::debug!("Score: {}", score),
            Feedback::LivesChanged(lives) => log::info!("Lives: {}", lives),
            Feedback::ShowGameOver { final_score } => {
                log::info!("Game over! Final score: {}", final_score)
            }
        }
    }
}

/// Collects cues in memory
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub cues: Vec<Feedback>,
}

impl FeedbackSink for RecordingFeedback {
    fn emit(&mut self, cue: Feedback) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_cues() {
        let state = GameState::default();
        let cues = feedback_for(
            &GameEvent::Collision {
                id: 3,
                lane: 1,
                lives_left: 2,
                fatal: false,
            },
            &state,
        );
        assert_eq!(
            cues,
            vec![
                Feedback::CrashToast,
                Feedback::Vibrate { millis: 500 },
                Feedback::LivesChanged(2),
            ]
        );
    }

    #[test]
    fn test_spawn_is_silent() {
        let state = GameState::default();
        assert!(feedback_for(&GameEvent::Spawned { id: 1, lane: 0 }, &state).is_empty());
    }

    #[test]
    fn test_emit_step_keeps_event_order() {
        let mut state = GameState::default();
        state.add_score(10);
        let result = StepResult {
            events: vec![
                GameEvent::Dodged {
                    id: 1,
                    lane: 0,
                    points: 10,
                },
                GameEvent::Collision {
                    id: 2,
                    lane: 1,
                    lives_left: 0,
                    fatal: true,
                },
                GameEvent::GameOver { final_score: 10 },
            ],
            score_delta: 10,
            game_over: true,
        };

        let mut sink = RecordingFeedback::default();
        sink.emit_step(&result, &state);
        assert_eq!(sink.cues.first(), Some(&Feedback::ScoreChanged(10)));
        assert_eq!(
            sink.cues.last(),
            Some(&Feedback::ShowGameOver { final_score: 10 })
        );
        assert_eq!(sink.cues.len(), 5);
    }
}
