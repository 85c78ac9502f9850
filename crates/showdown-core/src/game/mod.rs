//! Game rules: moves, outcome resolution, and the fallback strategist.

pub mod model;
pub mod strategist;

pub use model::{Move, Outcome, resolve};
pub use strategist::{FALLBACK_CONFIDENCE, MoveCounts, MoveSuggestion, choose_fallback};
