//! Alien Bonds - A lane-based number bonds arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (aliens, waves, hit resolution, game state)
//! - `game`: Session lifecycle wiring the sim to its collaborators
//! - `renderer`: Canvas 2D and headless presenters
//! - `platform`: Countdown/frame scheduling abstraction
//! - `persistence`: High score storage
//! - `tuning`: Data-driven difficulty tiers

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions (the web build uses the real canvas size)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Number of fixed lanes aliens descend through
    pub const LANE_COUNT: usize = 8;
    /// Aliens per wave (one solution + distractors)
    pub const WAVE_SIZE: usize = 4;
    pub const DISTRACTOR_COUNT: usize = WAVE_SIZE - 1;

    /// Alien body radius, used for drawing and hit testing
    pub const ALIEN_RADIUS: f32 = 30.0;
    /// Spawn height, above the visible area
    pub const SPAWN_Y: f32 = -60.0;

    /// Session length in seconds
    pub const ROUND_SECONDS: u32 = 60;
    /// Countdown period in milliseconds
    pub const COUNTDOWN_PERIOD_MS: u32 = 1000;

    /// Scoring
    pub const CORRECT_HIT_POINTS: u32 = 10;
    pub const WRONG_HIT_PENALTY: u32 = 2;
    pub const MISSED_SOLUTION_PENALTY: u32 = 5;

    /// Correct hits after which the solution is no longer highlighted
    pub const HINT_HIT_LIMIT: u32 = 5;

    /// Upper bound on distractor redraws before falling back
    pub const MAX_DISTRACTOR_REDRAWS: u32 = 64;
}

/// Horizontal center of a lane for a canvas of the given width
#[inline]
pub fn lane_center_x(lane: usize, canvas_width: f32) -> f32 {
    let lane_width = canvas_width / consts::LANE_COUNT as f32;
    lane as f32 * lane_width + lane_width / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_centers_are_evenly_spaced() {
        assert_eq!(lane_center_x(0, 800.0), 50.0);
        assert_eq!(lane_center_x(7, 800.0), 750.0);
        let step = lane_center_x(1, 800.0) - lane_center_x(0, 800.0);
        assert_eq!(step, 100.0);
    }
}
