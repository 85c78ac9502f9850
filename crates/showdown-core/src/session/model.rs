//! Session state: scores, round history, move counts, and mode.
//!
//! State lives only for the duration of one session; nothing here is
//! persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShowdownError;
use crate::game::{Move, MoveCounts, Outcome};

/// How the AI opponent picks its moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Ask the remote inference service, fall back to the heuristic.
    #[default]
    SmartAi,
    /// Heuristic only, no network calls.
    Easy,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameMode::SmartAi => "smart",
            GameMode::Easy => "easy",
        };
        f.write_str(s)
    }
}

impl FromStr for GameMode {
    type Err = ShowdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smart" | "smart_ai" | "smartai" => Ok(GameMode::SmartAi),
            "easy" => Ok(GameMode::Easy),
            other => Err(ShowdownError::config(format!(
                "Unknown game mode '{other}' (expected 'smart' or 'easy')"
            ))),
        }
    }
}

/// Where the session is within the per-round state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Ready for the next player move.
    #[default]
    Idle,
    /// The move oracle is pending; new submissions are rejected.
    AwaitingAiMove,
}

/// One completed round. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub player_move: Move,
    pub ai_move: Move,
    pub outcome: Outcome,
    /// The oracle's confidence in its move, `[0, 100]`.
    pub confidence: u8,
    pub played_at: DateTime<Utc>,
}

/// One cumulative-score data point for the score-history chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub round: usize,
    pub player: u32,
    pub ai: u32,
}

/// All mutable state of one play session.
///
/// Owned exclusively by the round controller; no other component mutates
/// it directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub player_score: u32,
    pub ai_score: u32,
    pub rounds: Vec<Round>,
    pub move_counts: MoveCounts,
    pub mode: GameMode,
    pub phase: RoundPhase,
    /// Bumped on every reset; an in-flight round captured under an older
    /// epoch is discarded when it completes.
    pub epoch: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed round: appends it to the history, counts the
    /// player's move, and bumps exactly one score (a draw bumps neither).
    pub fn record_round(&mut self, round: Round) {
        self.rounds.push(round);
        self.move_counts.record(round.player_move);
        match round.outcome {
            Outcome::Player => self.player_score += 1,
            Outcome::Ai => self.ai_score += 1,
            Outcome::Draw => {}
        }
        debug_assert_eq!(self.move_counts.total() as usize, self.rounds.len());
    }

    /// Clears scores, history, and counts, and returns the phase to Idle.
    /// The epoch bump invalidates any round still in flight. The mode is
    /// kept: resetting the board does not change the opponent.
    pub fn reset(&mut self) {
        self.player_score = 0;
        self.ai_score = 0;
        self.rounds.clear();
        self.move_counts.reset();
        self.phase = RoundPhase::Idle;
        self.epoch += 1;
    }

    /// Number of drawn rounds.
    pub fn draw_count(&self) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.outcome == Outcome::Draw)
            .count()
    }

    /// Cumulative score after each round, for charting.
    pub fn score_series(&self) -> Vec<ScorePoint> {
        let mut player = 0;
        let mut ai = 0;
        self.rounds
            .iter()
            .enumerate()
            .map(|(i, round)| {
                match round.outcome {
                    Outcome::Player => player += 1,
                    Outcome::Ai => ai += 1,
                    Outcome::Draw => {}
                }
                ScorePoint {
                    round: i + 1,
                    player,
                    ai,
                }
            })
            .collect()
    }
}
