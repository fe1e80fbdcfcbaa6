//! Data-driven game balance
//!
//! Difficulty is a pure function of the score at wave start. Tiers are
//! listed in ascending threshold order; the highest tier whose threshold the
//! score reaches wins.

use serde::{Deserialize, Serialize};

/// Parameters applied to a single wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Sum the key and solution must add up to
    pub target_sum: u32,
    /// Pixels per tick each alien descends
    pub speed: f32,
}

/// A difficulty tier unlocked at `min_score`
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub min_score: u32,
    pub difficulty: Difficulty,
}

/// Score at which bonds move from 10 to 20
pub const HARD_TIER_SCORE: u32 = 50;

pub const TIERS: [Tier; 2] = [
    Tier {
        min_score: 0,
        difficulty: Difficulty {
            target_sum: 10,
            speed: 1.0,
        },
    },
    Tier {
        min_score: HARD_TIER_SCORE,
        difficulty: Difficulty {
            target_sum: 20,
            speed: 1.5,
        },
    },
];

/// Difficulty for a wave starting at `score`
pub fn difficulty_for_score(score: u32) -> Difficulty {
    TIERS
        .iter()
        .rev()
        .find(|tier| score >= tier.min_score)
        .map(|tier| tier.difficulty)
        .unwrap_or(TIERS[0].difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_tier_below_threshold() {
        for score in [0, 1, 10, 48, 49] {
            let d = difficulty_for_score(score);
            assert_eq!(d.target_sum, 10);
            assert_eq!(d.speed, 1.0);
        }
    }

    #[test]
    fn test_hard_tier_at_and_above_threshold() {
        for score in [50, 51, 120, u32::MAX] {
            let d = difficulty_for_score(score);
            assert_eq!(d.target_sum, 20);
            assert_eq!(d.speed, 1.5);
        }
    }

    #[test]
    fn test_tiers_ascending() {
        assert!(TIERS.windows(2).all(|w| w[0].min_score < w[1].min_score));
        assert_eq!(TIERS[0].min_score, 0);
    }
}
