//! Session domain module.
//!
//! Contains the session state model, the round controller that owns it,
//! and the presentation events it publishes.
//!
//! - `model`: session state (`SessionState`, `Round`, `GameMode`,
//!   `RoundPhase`, `ScorePoint`)
//! - `controller`: the per-round state machine (`RoundController`)
//! - `event`: presentation events (`GameEvent`, `EventSink`)

mod controller;
mod event;
mod model;

#[cfg(test)]
mod controller_test;

// Re-export public API
pub use controller::RoundController;
pub use event::{ChannelEventSink, EventSink, GameEvent, NullEventSink};
pub use model::{GameMode, Round, RoundPhase, ScorePoint, SessionState};
