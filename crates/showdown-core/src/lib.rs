//! showdown-core
//!
//! Game rules and orchestration for Showdown, a rock-paper-scissors game
//! against a language-model opponent.
//!
//! - **game**: moves, the beats relation, outcome resolution, and the
//!   local fallback strategist
//! - **oracle**: the move oracle combining a remote suggestion capability
//!   with the fallback
//! - **session**: session state, the round controller, and presentation
//!   events
//! - **mood**: pure mood/taunt flavor helpers
//!
//! Rendering, audio, and speech are external collaborators; they consume
//! [`session::GameEvent`]s and nothing else.

pub mod error;
pub mod game;
pub mod mood;
pub mod oracle;
pub mod session;

// Re-export common error type
pub use error::ShowdownError;
