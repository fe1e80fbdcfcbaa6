//! Pointer input resolution
//!
//! Maps a pointer-down in canvas space onto the live aliens and applies the
//! scoring outcome for each alien hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::pointer_hits;
use super::state::{GameEvent, GameState};
use super::tick::generate_wave;
use crate::consts::*;

/// Outcome for a single alien under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    Correct { value: u32 },
    Wrong { value: u32 },
}

/// Resolve a pointer-down at `point`.
///
/// Every alien is tested against the wave as it stood when the pointer went
/// down. A correct hit scores and replaces the wave immediately; a wrong hit
/// costs points and removes only that alien. Returns nothing while idle.
pub fn resolve_click(state: &mut GameState, point: Vec2) -> Vec<Hit> {
    if !state.is_active() {
        return Vec::new();
    }

    let under_pointer: Vec<(u32, u32, bool)> = state
        .aliens
        .iter()
        .filter(|alien| pointer_hits(point, alien))
        .map(|alien| (alien.id, alien.value, alien.is_correct))
        .collect();

    let mut hits = Vec::with_capacity(under_pointer.len());
    for (id, value, is_correct) in under_pointer {
        if is_correct {
            state.add_score(CORRECT_HIT_POINTS);
            state.successful_hits += 1;
            state.events.push(GameEvent::CorrectHit { value });
            generate_wave(state);
            hits.push(Hit::Correct { value });
        } else {
            state.deduct_score(WRONG_HIT_PENALTY);
            // Already gone if an earlier hit this event replaced the wave
            state.aliens.retain(|a| a.id != id);
            state.events.push(GameEvent::WrongHit { value });
            hits.push(Hit::Wrong { value });
        }
        log::debug!("Hit {:?} (score {})", hits.last(), state.score);
    }
    hits
}
