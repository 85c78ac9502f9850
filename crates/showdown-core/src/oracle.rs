//! Move oracle: decides the AI's move.
//!
//! Combines a remote inference capability with the local fallback
//! strategist. Easy mode skips the network entirely; in SmartAi mode a
//! single bounded attempt is made and any failure - transport, timeout,
//! malformed payload, out-of-domain move - silently degrades to the
//! heuristic. No retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::game::{Move, MoveCounts, MoveSuggestion, choose_fallback};
use crate::session::GameMode;

/// Default bound on the remote call. Expiry counts as a failure.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(8);

/// Capability interface for remote move suggestion.
///
/// Implementations fail with
/// [`ShowdownError::RemoteUnavailable`](crate::error::ShowdownError::RemoteUnavailable)
/// for every deviation: network errors,
/// non-success statuses, unparseable bodies, and move names outside the
/// game's domain. The oracle depends only on this trait, so tests can swap
/// in deterministic doubles.
#[async_trait]
pub trait MoveSuggester: Send + Sync {
    async fn suggest_move(&self, last_player_move: Move) -> Result<MoveSuggestion>;
}

/// Clamps a raw confidence value to `[0, 100]`; a missing value defaults
/// to 50.
pub fn clamp_confidence(raw: Option<i64>) -> u8 {
    raw.unwrap_or(50).clamp(0, 100) as u8
}

/// Decides the AI's move for one round.
#[derive(Clone)]
pub struct MoveOracle {
    suggester: Arc<dyn MoveSuggester>,
    timeout: Duration,
}

impl MoveOracle {
    pub fn new(suggester: Arc<dyn MoveSuggester>) -> Self {
        Self {
            suggester,
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Overrides the remote-call bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Chooses the AI's move. Never fails: every remote deviation is
    /// absorbed here and replaced by the fallback strategist's suggestion.
    pub async fn choose_ai_move(
        &self,
        last_player_move: Move,
        mode: GameMode,
        counts: &MoveCounts,
    ) -> MoveSuggestion {
        if mode == GameMode::Easy {
            return choose_fallback(counts);
        }

        let attempt = tokio::time::timeout(
            self.timeout,
            self.suggester.suggest_move(last_player_move),
        )
        .await;

        match attempt {
            // The wire parser already clamps, but the trait is open to any
            // implementation; the oracle's contract caps it regardless.
            Ok(Ok(suggestion)) => MoveSuggestion {
                mv: suggestion.mv,
                confidence: suggestion.confidence.min(100),
            },
            Ok(Err(err)) => {
                log::warn!("Remote inference failed, using fallback: {err}");
                choose_fallback(counts)
            }
            Err(_) => {
                log::warn!(
                    "Remote inference timed out after {:?}, using fallback",
                    self.timeout
                );
                choose_fallback(counts)
            }
        }
    }
}
