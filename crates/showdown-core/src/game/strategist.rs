//! Fallback strategist: a local heuristic opponent.
//!
//! Used whenever the remote inference service is unavailable or the session
//! runs in Easy mode. Reads the player's move-frequency history and plays
//! the counter of their favorite move.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::model::Move;

/// Confidence reported by the heuristic, signaling "not model-derived".
pub const FALLBACK_CONFIDENCE: u8 = 55;

/// Per-move counters of how often the player has played each move this
/// session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCounts {
    stone: u32,
    paper: u32,
    scissor: u32,
}

impl MoveCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter for one played move.
    pub fn record(&mut self, mv: Move) {
        match mv {
            Move::Stone => self.stone += 1,
            Move::Paper => self.paper += 1,
            Move::Scissor => self.scissor += 1,
        }
    }

    pub fn count(&self, mv: Move) -> u32 {
        match mv {
            Move::Stone => self.stone,
            Move::Paper => self.paper,
            Move::Scissor => self.scissor,
        }
    }

    /// Total number of recorded moves. Equals the number of completed
    /// rounds in the session.
    pub fn total(&self) -> u32 {
        self.stone + self.paper + self.scissor
    }

    /// The player's most-played move, or `None` when no rounds have been
    /// recorded. Ties break deterministically to the first maximum in
    /// [`Move::ALL`] order (Stone, Paper, Scissor).
    pub fn most_played(&self) -> Option<Move> {
        if self.total() == 0 {
            return None;
        }
        let mut best = Move::ALL[0];
        for m in Move::ALL {
            if self.count(m) > self.count(best) {
                best = m;
            }
        }
        Some(best)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A suggested AI move with a confidence in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSuggestion {
    pub mv: Move,
    pub confidence: u8,
}

/// Picks the move that beats the player's most-played move so far, at the
/// fixed heuristic confidence. With an empty history the move is uniformly
/// random. Pure over the counts; never fails.
pub fn choose_fallback(counts: &MoveCounts) -> MoveSuggestion {
    let mv = match counts.most_played() {
        Some(favorite) => favorite.counter(),
        None => *Move::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Move::Stone),
    };
    MoveSuggestion {
        mv,
        confidence: FALLBACK_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_start_at_zero() {
        let counts = MoveCounts::new();
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.most_played(), None);
    }

    #[test]
    fn counter_of_most_played() {
        let mut counts = MoveCounts::new();
        counts.record(Move::Stone);
        counts.record(Move::Stone);
        counts.record(Move::Paper);
        assert_eq!(counts.count(Move::Stone), 2);
        assert_eq!(counts.count(Move::Paper), 1);
        assert_eq!(counts.count(Move::Scissor), 0);
        assert_eq!(counts.most_played(), Some(Move::Stone));

        let suggestion = choose_fallback(&counts);
        assert_eq!(suggestion.mv, Move::Paper); // Paper beats Stone
        assert_eq!(suggestion.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn tie_breaks_in_enumeration_order() {
        let mut counts = MoveCounts::new();
        counts.record(Move::Paper);
        counts.record(Move::Scissor);
        // Stone=0, Paper=1, Scissor=1: Paper comes first in Move::ALL.
        assert_eq!(counts.most_played(), Some(Move::Paper));
        assert_eq!(choose_fallback(&counts).mv, Move::Scissor);
    }

    #[test]
    fn empty_history_is_random_but_valid() {
        let counts = MoveCounts::new();
        for _ in 0..32 {
            let suggestion = choose_fallback(&counts);
            assert!(Move::ALL.contains(&suggestion.mv));
            assert_eq!(suggestion.confidence, 55);
        }
    }

    #[test]
    fn reset_zeroes_all_counts() {
        let mut counts = MoveCounts::new();
        counts.record(Move::Scissor);
        counts.record(Move::Scissor);
        counts.reset();
        assert_eq!(counts, MoveCounts::new());
    }
}
