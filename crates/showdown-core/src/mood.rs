//! AI mood and taunt lines, derived purely from the score difference.
//!
//! Presentation flavor; not part of the game contract.

use std::fmt;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// The opponent's attitude, from its own perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Cocky,
    Salty,
    Focused,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Cocky => "cocky",
            Mood::Salty => "salty",
            Mood::Focused => "focused",
        };
        f.write_str(s)
    }
}

/// Two points ahead and the AI gets cocky; two behind and it gets salty.
pub fn mood_for(ai_score: u32, player_score: u32) -> Mood {
    let diff = ai_score as i64 - player_score as i64;
    if diff >= 2 {
        Mood::Cocky
    } else if diff <= -2 {
        Mood::Salty
    } else {
        Mood::Focused
    }
}

const COCKY_TAUNTS: [&str; 2] = ["I'm unstoppable!", "Try harder!"];
const SALTY_TAUNTS: [&str; 2] = ["You got lucky!", "Don't think you can win!"];
const FOCUSED_TAUNTS: [&str; 2] = ["I'm watching you!", "Nice try!"];

/// Picks one of the mood's two taunt lines at random.
pub fn taunt_for(mood: Mood) -> &'static str {
    let table = match mood {
        Mood::Cocky => &COCKY_TAUNTS,
        Mood::Salty => &SALTY_TAUNTS,
        Mood::Focused => &FOCUSED_TAUNTS,
    };
    table
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(table[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_thresholds() {
        assert_eq!(mood_for(0, 0), Mood::Focused);
        assert_eq!(mood_for(1, 0), Mood::Focused);
        assert_eq!(mood_for(2, 0), Mood::Cocky);
        assert_eq!(mood_for(5, 1), Mood::Cocky);
        assert_eq!(mood_for(0, 2), Mood::Salty);
        assert_eq!(mood_for(3, 4), Mood::Focused);
    }

    #[test]
    fn taunts_come_from_the_mood_table() {
        for _ in 0..16 {
            assert!(COCKY_TAUNTS.contains(&taunt_for(Mood::Cocky)));
            assert!(SALTY_TAUNTS.contains(&taunt_for(Mood::Salty)));
            assert!(FOCUSED_TAUNTS.contains(&taunt_for(Mood::Focused)));
        }
    }
}
