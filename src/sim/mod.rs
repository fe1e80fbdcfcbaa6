//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - One tick per animation frame, no wall clock
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use autoplay::AutoPlayer;
pub use collision::{point_in_circle, pointer_hits};
pub use input::{Hit, resolve_click};
pub use state::{Alien, Arena, GameEvent, GamePhase, GameState, Puzzle};
pub use tick::{generate_wave, tick};
