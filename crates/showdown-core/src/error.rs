//! Error types for the Showdown application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Showdown application.
///
/// This provides typed, structured error variants for the few failure
/// modes the game has: remote-inference deviations (absorbed at the move
/// oracle boundary), the round controller's flow-control results, and
/// configuration loading.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShowdownError {
    /// The remote inference service could not produce a usable suggestion
    /// (transport failure, non-success status, unparseable payload, or a
    /// move name outside the game's domain). Always absorbed at the move
    /// oracle boundary and replaced by the fallback strategist.
    #[error("Remote inference unavailable: {0}")]
    RemoteUnavailable(String),

    /// A move name outside {Stone, Paper, Scissor}
    #[error("Invalid move: '{0}'")]
    InvalidMove(String),

    /// A round is already awaiting the AI's move; the submission is rejected
    #[error("A round is already in progress")]
    RoundInProgress,

    /// The session was reset while a round was in flight; the stale result
    /// was discarded without touching state
    #[error("Session was reset while the round was in flight")]
    SessionReset,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShowdownError {
    /// Creates a RemoteUnavailable error
    pub fn remote_unavailable(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable(message.into())
    }

    /// Creates an InvalidMove error
    pub fn invalid_move(name: impl Into<String>) -> Self {
        Self::InvalidMove(name.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a RemoteUnavailable error
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// A type alias for `Result<T, ShowdownError>`.
pub type Result<T> = std::result::Result<T, ShowdownError>;
