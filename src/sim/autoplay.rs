//! Idle/demo player
//!
//! Picks a pointer position for the host to click each frame, the way a
//! player would: wait for the solution to come on screen, react after a
//! delay, and occasionally fumble onto a distractor.

use glam::Vec2;

use super::state::GameState;

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Frames to wait after the solution becomes visible
    pub reaction_frames: u32,
    /// Every Nth decision clicks a distractor instead (0 = never)
    pub fumble_every: u32,
    /// Solution alien currently being tracked
    target_id: Option<u32>,
    waited: u32,
    decisions: u32,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(45, 0)
    }
}

impl AutoPlayer {
    pub fn new(reaction_frames: u32, fumble_every: u32) -> Self {
        Self {
            reaction_frames,
            fumble_every,
            target_id: None,
            waited: 0,
            decisions: 0,
        }
    }

    /// Where to click this frame, if anywhere
    pub fn next_click(&mut self, state: &GameState) -> Option<Vec2> {
        if !state.is_active() {
            return None;
        }
        // Alien ids are never reused, so a new wave or a new session both
        // show up as a different target
        let target = state.correct_alien()?;
        if self.target_id != Some(target.id) {
            self.target_id = Some(target.id);
            self.waited = 0;
        }
        if target.pos.y < target.radius {
            return None;
        }
        self.waited += 1;
        if self.waited < self.reaction_frames {
            return None;
        }

        self.waited = 0;
        self.decisions += 1;
        if self.fumble_every > 0 && self.decisions % self.fumble_every == 0 {
            if let Some(decoy) = state.aliens.iter().find(|a| !a.is_correct) {
                return Some(decoy.pos);
            }
        }
        Some(target.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Arena, resolve_click, tick};

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Arena::default());
        state.begin_session(ROUND_SECONDS);
        crate::sim::generate_wave(&mut state);
        state
    }

    #[test]
    fn test_waits_for_visibility_and_reaction() {
        let mut state = running(1);
        let mut player = AutoPlayer::new(10, 0);
        let mut frames = 0;
        let click = loop {
            tick(&mut state);
            frames += 1;
            if let Some(p) = player.next_click(&state) {
                break p;
            }
            assert!(frames < 1000, "player never clicked");
        };
        // -60 -> 30 takes 90 frames, then 10 frames of reaction
        assert_eq!(frames, 99);
        assert_eq!(Some(click), state.correct_alien().map(|a| a.pos));
    }

    #[test]
    fn test_reused_across_sessions_starts_fresh() {
        let mut state = running(3);
        let mut player = AutoPlayer::new(10, 0);
        // Build up reaction time on wave 1 without clicking
        while state.correct_alien().unwrap().pos.y < ALIEN_RADIUS + 5.0 {
            tick(&mut state);
            assert!(player.next_click(&state).is_none());
        }

        // New session: wave 1 again, back at the spawn row
        state.begin_session(ROUND_SECONDS);
        crate::sim::generate_wave(&mut state);
        assert_eq!(state.wave_index, 1);
        let mut frames = 0;
        while player.next_click(&state).is_none() {
            tick(&mut state);
            frames += 1;
            assert!(frames < 1000, "player never clicked");
        }
        // Full wait again: 90 frames to come on screen, then the reaction delay
        assert_eq!(frames, 90 + 9);
    }

    #[test]
    fn test_fumbles_on_schedule() {
        let mut state = running(2);
        let mut player = AutoPlayer::new(1, 2);
        let mut outcomes = Vec::new();
        while outcomes.len() < 4 {
            tick(&mut state);
            if let Some(p) = player.next_click(&state) {
                outcomes.push(resolve_click(&mut state, p));
            }
        }
        assert!(matches!(outcomes[0][0], crate::sim::Hit::Correct { .. }));
        assert!(matches!(outcomes[1][0], crate::sim::Hit::Wrong { .. }));
        assert!(matches!(outcomes[2][0], crate::sim::Hit::Correct { .. }));
        assert!(matches!(outcomes[3][0], crate::sim::Hit::Wrong { .. }));
    }
}
