//! Presentation events published by the round controller.
//!
//! These drive external collaborators (sound, particles, speech, charts in
//! the original UI; colored text in the REPL) and carry no contract back
//! into the core.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::game::{Move, Outcome};

/// High-level events a presentation layer can react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// One round finished and was recorded.
    RoundResolved {
        player_move: Move,
        ai_move: Move,
        outcome: Outcome,
        confidence: u8,
    },
    /// The session was reset to its initial state.
    SessionReset,
}

/// Receives presentation events. Publishing must never block or fail the
/// game loop; sinks drop events they cannot deliver.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: GameEvent);
}

/// Sink that forwards events over an unbounded tokio channel, for
/// frontends that print from a separate task.
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn publish(&self, event: GameEvent) {
        // A closed receiver just means nobody is watching anymore.
        let _ = self.tx.send(event);
    }
}

/// Sink that ignores every event.
#[derive(Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: GameEvent) {}
}
