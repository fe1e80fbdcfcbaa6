//! Best score record
//!
//! Loaded once at startup and updated at session end. Storage failures are
//! logged and otherwise ignored; a missing or corrupt value reads as 0.

use serde::{Deserialize, Serialize};

use crate::persistence::HighScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Whether `score` would set a new record
    pub fn beats(&self, score: u32) -> bool {
        score > self.best
    }

    /// Load from the store, falling back to 0
    pub fn load<S: HighScoreStore + ?Sized>(store: &S) -> Self {
        match store.load_high_score() {
            Ok(Some(best)) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored high score: {}", e);
                Self::default()
            }
        }
    }

    /// Record a finished session's score.
    ///
    /// Returns true when it beat the previous best; the new best is then
    /// persisted (fire-and-forget).
    pub fn submit<S: HighScoreStore + ?Sized>(&mut self, score: u32, store: &mut S) -> bool {
        if !self.beats(score) {
            return false;
        }
        self.best = score;
        match store.save_high_score(score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
        true
    }
}
