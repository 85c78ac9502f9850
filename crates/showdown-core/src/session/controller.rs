//! Round controller: orchestrates one round of play.
//!
//! Owns the session state exclusively. One round at a time: a submission
//! while the oracle is pending is rejected, and a reset racing an in-flight
//! round invalidates that round's eventual result.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{Result, ShowdownError};
use crate::game::{Move, resolve};
use crate::oracle::MoveOracle;
use crate::session::event::{EventSink, GameEvent};
use crate::session::model::{GameMode, Round, RoundPhase, SessionState};

/// Drives the per-round state machine: Idle -> AwaitingAiMove -> Idle.
pub struct RoundController {
    state: Arc<RwLock<SessionState>>,
    oracle: MoveOracle,
    sink: Arc<dyn EventSink>,
}

impl RoundController {
    pub fn new(oracle: MoveOracle, sink: Arc<dyn EventSink>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::new())),
            oracle,
            sink,
        }
    }

    /// Plays one round with the submitted move.
    ///
    /// Returns [`ShowdownError::RoundInProgress`] if another round is
    /// already awaiting the oracle, and [`ShowdownError::SessionReset`] if
    /// a reset arrived while this round's oracle call was in flight (the
    /// stale result is discarded without touching state). Oracle failures
    /// never surface here; they are absorbed into a fallback suggestion
    /// before this method observes them.
    pub async fn play_round(&self, player_move: Move) -> Result<Round> {
        // Enter the round under the lock, then release it across the only
        // suspension point.
        let (epoch, mode, counts) = {
            let mut state = self.state.write().await;
            if state.phase != RoundPhase::Idle {
                return Err(ShowdownError::RoundInProgress);
            }
            state.phase = RoundPhase::AwaitingAiMove;
            (state.epoch, state.mode, state.move_counts)
        };

        let suggestion = self
            .oracle
            .choose_ai_move(player_move, mode, &counts)
            .await;

        let round = {
            let mut state = self.state.write().await;
            if state.epoch != epoch {
                // A reset won the race; it already returned the phase to
                // Idle. Drop the stale result.
                return Err(ShowdownError::SessionReset);
            }
            let round = Round {
                player_move,
                ai_move: suggestion.mv,
                outcome: resolve(player_move, suggestion.mv),
                confidence: suggestion.confidence,
                played_at: Utc::now(),
            };
            state.record_round(round);
            state.phase = RoundPhase::Idle;
            round
        };

        self.sink.publish(GameEvent::RoundResolved {
            player_move: round.player_move,
            ai_move: round.ai_move,
            outcome: round.outcome,
            confidence: round.confidence,
        });
        Ok(round)
    }

    /// Resets the session. Safe in any phase: an in-flight round's eventual
    /// completion is discarded via the epoch bump.
    pub async fn reset(&self) {
        self.state.write().await.reset();
        self.sink.publish(GameEvent::SessionReset);
    }

    /// Switches the opponent mode, effective from the next round.
    pub async fn set_mode(&self, mode: GameMode) {
        self.state.write().await.mode = mode;
    }

    /// A point-in-time copy of the session state for presentation reads.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }
}
