//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; the host owns
//! it and passes it into `tick` and `resolve_click`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start (initial, and after a session times out)
    Idle,
    /// Simulation and input are live
    Active,
}

/// Something that happened during a tick or click, drained by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveSpawned { wave: u32, target_sum: u32, key: u32 },
    CorrectHit { value: u32 },
    WrongHit { value: u32 },
    /// The solution alien fell off the bottom unclicked
    SolutionMissed { value: u32 },
    SessionEnded {
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
}

/// Playfield dimensions in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// The puzzle for the current wave: click the alien showing `solution()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Puzzle {
    pub target_sum: u32,
    pub key: u32,
}

impl Puzzle {
    pub fn new(target_sum: u32, key: u32) -> Self {
        debug_assert!(key <= target_sum);
        Self { target_sum, key }
    }

    /// The addend that completes the bond
    pub fn solution(&self) -> u32 {
        self.target_sum - self.key
    }
}

/// A falling numeric target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    pub value: u32,
    /// True for the single alien in a wave showing the solution
    pub is_correct: bool,
    /// Center; x is the lane center and never changes
    pub pos: Vec2,
    pub radius: f32,
    /// Fell past the bottom edge, pending removal
    pub expired: bool,
}

impl Alien {
    pub fn new(id: u32, value: u32, is_correct: bool, x: f32) -> Self {
        Self {
            id,
            value,
            is_correct,
            pos: Vec2::new(x, SPAWN_Y),
            radius: ALIEN_RADIUS,
            expired: false,
        }
    }

    /// Descend by `speed`, expiring once fully below `floor`.
    /// Returns true only on the tick the alien expires.
    pub fn fall(&mut self, speed: f32, floor: f32) -> bool {
        if self.expired {
            return false;
        }
        self.pos.y += speed;
        if self.pos.y > floor + self.radius {
            self.expired = true;
            return true;
        }
        false
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub phase: GamePhase,
    /// Never negative; decrements saturate at zero
    pub score: u32,
    /// Seconds remaining in the session
    pub time_left: u32,
    pub puzzle: Puzzle,
    /// Descent speed for the in-flight wave
    pub speed: f32,
    /// Correct clicks this session
    pub successful_hits: u32,
    /// Correct hits before the solution highlight switches off (0 = never shown)
    pub hint_limit: u32,
    /// Waves spawned this session
    pub wave_index: u32,
    /// Live aliens for the current wave
    pub aliens: Vec<Alien>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            phase: GamePhase::Idle,
            score: 0,
            time_left: ROUND_SECONDS,
            puzzle: Puzzle::default(),
            speed: 0.0,
            successful_hits: 0,
            hint_limit: HINT_HIT_LIMIT,
            wave_index: 0,
            aliens: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset per-session counters and go live. Does not spawn a wave.
    pub fn begin_session(&mut self, round_seconds: u32) {
        self.score = 0;
        self.time_left = round_seconds;
        self.successful_hits = 0;
        self.wave_index = 0;
        self.aliens.clear();
        self.phase = GamePhase::Active;
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn deduct_score(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Whether the presentation layer should highlight this alien.
    /// Latches off once the session reaches the hint limit.
    pub fn hint_visible(&self, alien: &Alien) -> bool {
        alien.is_correct && self.successful_hits < self.hint_limit
    }

    /// The live alien carrying the solution, if still on screen
    pub fn correct_alien(&self) -> Option<&Alien> {
        self.aliens.iter().find(|a| a.is_correct)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alien_expires_once_below_floor() {
        let mut alien = Alien::new(1, 3, true, 50.0);
        alien.pos.y = 629.5;
        assert!(!alien.fall(0.5, 600.0));
        assert_eq!(alien.pos.y, 630.0);
        assert!(!alien.expired);
        assert!(alien.fall(0.5, 600.0));
        assert!(alien.expired);
        // Already expired: no second report, no movement
        assert!(!alien.fall(0.5, 600.0));
        assert_eq!(alien.pos.y, 630.5);
    }

    #[test]
    fn test_score_never_negative() {
        let mut state = GameState::new(1, Arena::default());
        state.add_score(3);
        state.deduct_score(5);
        assert_eq!(state.score, 0);
        state.deduct_score(2);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_begin_session_resets_counters() {
        let mut state = GameState::new(7, Arena::default());
        state.score = 90;
        state.successful_hits = 9;
        state.time_left = 0;
        state.aliens.push(Alien::new(1, 4, false, 50.0));
        state.begin_session(60);
        assert_eq!(state.score, 0);
        assert_eq!(state.successful_hits, 0);
        assert_eq!(state.time_left, 60);
        assert!(state.aliens.is_empty());
        assert!(state.is_active());
    }

    #[test]
    fn test_hint_latch() {
        let mut state = GameState::new(7, Arena::default());
        let correct = Alien::new(1, 4, true, 50.0);
        let wrong = Alien::new(2, 5, false, 150.0);
        assert!(state.hint_visible(&correct));
        assert!(!state.hint_visible(&wrong));
        state.successful_hits = HINT_HIT_LIMIT - 1;
        assert!(state.hint_visible(&correct));
        state.successful_hits = HINT_HIT_LIMIT;
        assert!(!state.hint_visible(&correct));
        state.successful_hits = HINT_HIT_LIMIT + 3;
        assert!(!state.hint_visible(&correct));
    }

    #[test]
    fn test_puzzle_solution() {
        let puzzle = Puzzle::new(10, 3);
        assert_eq!(puzzle.solution(), 7);
        assert_eq!(puzzle.key + puzzle.solution(), puzzle.target_sum);
    }
}
