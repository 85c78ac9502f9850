//! Core game model: moves, the beats relation, and outcome resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShowdownError;

/// A move in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Stone,
    Paper,
    Scissor,
}

impl Move {
    /// Fixed enumeration order. Also the tie-break order used by
    /// [`MoveCounts::most_played`](crate::game::MoveCounts::most_played).
    pub const ALL: [Move; 3] = [Move::Stone, Move::Paper, Move::Scissor];

    /// The move this one beats: Stone > Scissor, Paper > Stone,
    /// Scissor > Paper.
    pub fn beats(self) -> Move {
        match self {
            Move::Stone => Move::Scissor,
            Move::Paper => Move::Stone,
            Move::Scissor => Move::Paper,
        }
    }

    /// The move that beats this one (inverse of [`Move::beats`]).
    pub fn counter(self) -> Move {
        match self {
            Move::Scissor => Move::Stone,
            Move::Stone => Move::Paper,
            Move::Paper => Move::Scissor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Stone => "Stone",
            Move::Paper => "Paper",
            Move::Scissor => "Scissor",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = ShowdownError;

    /// Case-insensitive parse of exactly the three move names. Anything
    /// else - including other games' names like "rock" - is rejected so a
    /// creative remote reply is routed to the fallback strategist.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stone" => Ok(Move::Stone),
            "paper" => Ok(Move::Paper),
            "scissor" => Ok(Move::Scissor),
            other => Err(ShowdownError::invalid_move(other)),
        }
    }
}

/// The result of a round, from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Player,
    Ai,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Player => "player",
            Outcome::Ai => "ai",
            Outcome::Draw => "draw",
        };
        f.write_str(s)
    }
}

/// Resolves one round. Pure and total: equal moves draw, otherwise the
/// cyclic beats relation decides.
pub fn resolve(player: Move, ai: Move) -> Outcome {
    if player == ai {
        Outcome::Draw
    } else if player.beats() == ai {
        Outcome::Player
    } else {
        Outcome::Ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_moves_draw() {
        for m in Move::ALL {
            assert_eq!(resolve(m, m), Outcome::Draw);
        }
    }

    #[test]
    fn beats_relation_is_cyclic_and_total() {
        // Every move beats exactly one other and loses to exactly one other.
        for m in Move::ALL {
            assert_ne!(m.beats(), m);
            assert_ne!(m.counter(), m);
            assert_eq!(m.beats().counter(), m);
            assert_eq!(m.counter().beats(), m);
        }
        assert_eq!(Move::Stone.beats(), Move::Scissor);
        assert_eq!(Move::Paper.beats(), Move::Stone);
        assert_eq!(Move::Scissor.beats(), Move::Paper);
    }

    #[test]
    fn exactly_one_outcome_per_pair() {
        for a in Move::ALL {
            for b in Move::ALL {
                let expected = if a == b {
                    Outcome::Draw
                } else if a.beats() == b {
                    Outcome::Player
                } else {
                    Outcome::Ai
                };
                assert_eq!(resolve(a, b), expected);
            }
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("stone".parse::<Move>().unwrap(), Move::Stone);
        assert_eq!("PAPER".parse::<Move>().unwrap(), Move::Paper);
        assert_eq!(" Scissor ".parse::<Move>().unwrap(), Move::Scissor);
        assert!("rock".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }
}
