//! Presentation interface
//!
//! The session pushes frames, HUD values and overlay content through a
//! [`Presenter`]. Nothing flows back: presenters never touch game state.

use serde::{Deserialize, Serialize};

use crate::sim::Alien;

/// Colors shared by presenters
pub mod palette {
    pub const ALIEN_BODY: &str = "#161b22";
    pub const ALIEN_STROKE: &str = "#8b949e";
    /// Stroke and glow for the highlighted solution
    pub const HINT: &str = "#3fb950";
    pub const ALIEN_TEXT: &str = "white";
    pub const TITLE: &str = "white";
    pub const RECORD_TITLE: &str = "#e3b341";
}

/// HUD values, refreshed after anything that changes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hud {
    pub target_sum: u32,
    pub key: u32,
    pub score: u32,
    pub time_left: u32,
    pub high_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayTone {
    Normal,
    /// A new record was set
    Record,
}

impl OverlayTone {
    pub fn title_color(&self) -> &'static str {
        match self {
            OverlayTone::Normal => palette::TITLE,
            OverlayTone::Record => palette::RECORD_TITLE,
        }
    }
}

/// Modal shown while no session is running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub title: String,
    pub message: String,
    pub button: String,
    pub tone: OverlayTone,
}

impl Overlay {
    /// Shown before the first session
    pub fn title_screen(high_score: u32) -> Self {
        Self {
            title: "ALIEN BONDS".to_string(),
            message: format!(
                "Click the alien that completes the sum | High Score: {}",
                high_score
            ),
            button: "START".to_string(),
            tone: OverlayTone::Normal,
        }
    }

    /// Shown when a session times out
    pub fn game_over(score: u32, high_score: u32, new_record: bool) -> Self {
        let (title, tone) = if new_record {
            ("NEW HIGH SCORE!", OverlayTone::Record)
        } else {
            ("GAME OVER", OverlayTone::Normal)
        };
        Self {
            title: title.to_string(),
            message: format!("Final Score: {} | High Score: {}", score, high_score),
            button: "PLAY AGAIN".to_string(),
            tone,
        }
    }
}

/// Output side of the game
pub trait Presenter {
    fn clear_frame(&mut self);
    /// Draw one alien; `highlighted` marks the hinted solution
    fn draw_alien(&mut self, alien: &Alien, highlighted: bool);
    fn show_overlay(&mut self, overlay: &Overlay);
    fn hide_overlay(&mut self);
    fn refresh_hud(&mut self, hud: &Hud);
}
