//! Per-frame simulation tick and wave generation
//!
//! The frame callback calls [`tick`] once per animation frame. Waves are
//! regenerated here when the live set empties, and by the input resolver on
//! a correct hit.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Alien, GameEvent, GameState, Puzzle};
use crate::consts::*;
use crate::lane_center_x;
use crate::tuning::difficulty_for_score;

/// Advance every live alien by one frame.
///
/// No-op while the session is idle.
pub fn tick(state: &mut GameState) {
    if !state.is_active() {
        return;
    }

    let speed = state.speed;
    let floor = state.arena.height;
    for alien in state.aliens.iter_mut() {
        if alien.fall(speed, floor) && alien.is_correct {
            state.score = state.score.saturating_sub(MISSED_SOLUTION_PENALTY);
            state.events.push(GameEvent::SolutionMissed { value: alien.value });
        }
    }
    state.aliens.retain(|a| !a.expired);

    // Whole wave fell through (or was clicked away): start the next one
    if state.aliens.is_empty() {
        generate_wave(state);
    }
}

/// Replace the live set with a fresh wave.
///
/// Difficulty is sampled from the current score here and held for the
/// lifetime of the wave.
pub fn generate_wave(state: &mut GameState) {
    if !state.is_active() {
        return;
    }

    let difficulty = difficulty_for_score(state.score);
    let target_sum = difficulty.target_sum;
    state.speed = difficulty.speed;

    let key = state.rng.random_range(0..=target_sum);
    state.puzzle = Puzzle::new(target_sum, key);
    let solution = state.puzzle.solution();

    let mut lanes: Vec<usize> = (0..LANE_COUNT).collect();
    let mut aliens = Vec::with_capacity(WAVE_SIZE);

    let lane = take_lane(&mut state.rng, &mut lanes);
    let x = lane_center_x(lane, state.arena.width);
    aliens.push(Alien::new(state.next_entity_id(), solution, true, x));

    for _ in 0..DISTRACTOR_COUNT {
        if lanes.is_empty() {
            break;
        }
        let value = draw_distractor(&mut state.rng, target_sum, solution);
        let lane = take_lane(&mut state.rng, &mut lanes);
        let x = lane_center_x(lane, state.arena.width);
        aliens.push(Alien::new(state.next_entity_id(), value, false, x));
    }

    state.aliens = aliens;
    state.wave_index += 1;
    state.events.push(GameEvent::WaveSpawned {
        wave: state.wave_index,
        target_sum,
        key,
    });
    log::debug!(
        "Wave {}: {} + ? = {} (speed {})",
        state.wave_index,
        key,
        target_sum,
        state.speed
    );
}

/// Remove and return a uniformly chosen lane from the pool
fn take_lane(rng: &mut Pcg32, lanes: &mut Vec<usize>) -> usize {
    let idx = rng.random_range(0..lanes.len());
    lanes.remove(idx)
}

/// Draw a value in `[0, target_sum]` that differs from `solution`.
///
/// Redraws are bounded. Past the bound an adjacent value is used, and only
/// a single-value range (`target_sum == 0`) yields the solution itself.
fn draw_distractor(rng: &mut Pcg32, target_sum: u32, solution: u32) -> u32 {
    for _ in 0..MAX_DISTRACTOR_REDRAWS {
        let value = rng.random_range(0..=target_sum);
        if value != solution {
            return value;
        }
    }

    if target_sum == 0 {
        log::warn!("Distractor range is a single value; duplicating the solution");
        return solution;
    }
    log::warn!("Distractor redraws exhausted; stepping off solution {}", solution);
    (solution + 1) % (target_sum + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, GamePhase};
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn active_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Arena::default());
        state.begin_session(ROUND_SECONDS);
        state
    }

    fn lane_of(alien: &Alien) -> usize {
        let lane_width = CANVAS_WIDTH / LANE_COUNT as f32;
        (alien.pos.x / lane_width) as usize
    }

    #[test]
    fn test_wave_shape() {
        let mut state = active_state(12345);
        generate_wave(&mut state);

        assert_eq!(state.aliens.len(), WAVE_SIZE);
        assert_eq!(state.aliens.iter().filter(|a| a.is_correct).count(), 1);
        let correct = state.correct_alien().unwrap();
        assert_eq!(correct.value, state.puzzle.solution());
        assert!(state.aliens.iter().all(|a| a.pos.y == SPAWN_Y));
        assert_eq!(state.wave_index, 1);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::WaveSpawned { wave: 1, target_sum: 10, .. })
        ));
    }

    #[test]
    fn test_generate_wave_idle_noop() {
        let mut state = GameState::new(1, Arena::default());
        generate_wave(&mut state);
        assert!(state.aliens.is_empty());
        assert_eq!(state.wave_index, 0);
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut state = active_state(42);
        generate_wave(&mut state);
        state.phase = GamePhase::Idle;
        let before = state.aliens.clone();
        let score = state.score;

        for _ in 0..1000 {
            tick(&mut state);
        }

        assert_eq!(state.aliens, before);
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_tick_advances_by_speed() {
        let mut state = active_state(42);
        generate_wave(&mut state);
        tick(&mut state);
        assert!(state.aliens.iter().all(|a| a.pos.y == SPAWN_Y + 1.0));
    }

    #[test]
    fn test_missed_solution_penalty_and_regeneration() {
        let mut state = active_state(42);
        generate_wave(&mut state);
        state.score = 12;
        state.drain_events();

        // Frames until the whole wave has dropped past floor + radius
        let frames = ((CANVAS_HEIGHT + ALIEN_RADIUS - SPAWN_Y) / 1.0) as usize + 1;
        for _ in 0..frames {
            tick(&mut state);
        }

        assert_eq!(state.score, 7);
        let events = state.drain_events();
        let missed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SolutionMissed { .. }))
            .count();
        assert_eq!(missed, 1);
        assert!(events.iter().any(|e| matches!(e, GameEvent::WaveSpawned { wave: 2, .. })));
        assert_eq!(state.aliens.len(), WAVE_SIZE);
    }

    #[test]
    fn test_missed_solution_penalty_floors_at_zero() {
        let mut state = active_state(3);
        generate_wave(&mut state);
        state.score = 3;
        for alien in state.aliens.iter_mut() {
            alien.pos.y = CANVAS_HEIGHT + ALIEN_RADIUS;
        }
        tick(&mut state);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_expired_distractor_no_penalty() {
        let mut state = active_state(5);
        generate_wave(&mut state);
        state.score = 20;
        for alien in state.aliens.iter_mut().filter(|a| !a.is_correct) {
            alien.pos.y = CANVAS_HEIGHT + ALIEN_RADIUS;
        }
        tick(&mut state);
        assert_eq!(state.score, 20);
        assert_eq!(state.aliens.len(), 1);
        assert!(state.aliens[0].is_correct);
    }

    #[test]
    fn test_hard_tier_applies_at_next_wave() {
        let mut state = active_state(8);
        generate_wave(&mut state);
        assert_eq!(state.puzzle.target_sum, 10);
        assert_eq!(state.speed, 1.0);

        // A score change mid-wave leaves the in-flight wave alone
        state.score = 50;
        tick(&mut state);
        assert_eq!(state.speed, 1.0);

        generate_wave(&mut state);
        assert_eq!(state.puzzle.target_sum, 20);
        assert_eq!(state.speed, 1.5);
        assert!(state.aliens.iter().all(|a| a.value <= 20));
    }

    #[test]
    fn test_same_seed_same_waves() {
        let mut a = active_state(99999);
        let mut b = active_state(99999);
        for _ in 0..20 {
            generate_wave(&mut a);
            generate_wave(&mut b);
            assert_eq!(a.puzzle, b.puzzle);
            assert_eq!(a.aliens, b.aliens);
        }
    }

    #[test]
    fn test_draw_distractor_degenerate_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(draw_distractor(&mut rng, 0, 0), 0);
        for _ in 0..50 {
            assert_eq!(draw_distractor(&mut rng, 1, 1), 0);
            assert_eq!(draw_distractor(&mut rng, 1, 0), 1);
        }
    }

    proptest! {
        #[test]
        fn prop_wave_invariants(seed in any::<u64>(), score in 0u32..200) {
            let mut state = active_state(seed);
            state.score = score;
            generate_wave(&mut state);

            let solution = state.puzzle.solution();
            prop_assert!(state.puzzle.key <= state.puzzle.target_sum);
            prop_assert_eq!(state.puzzle.key + solution, state.puzzle.target_sum);
            prop_assert_eq!(state.aliens.len(), WAVE_SIZE);

            let correct: Vec<_> = state.aliens.iter().filter(|a| a.is_correct).collect();
            prop_assert_eq!(correct.len(), 1);
            prop_assert_eq!(correct[0].value, solution);
            for alien in state.aliens.iter().filter(|a| !a.is_correct) {
                prop_assert_ne!(alien.value, solution);
                prop_assert!(alien.value <= state.puzzle.target_sum);
            }

            let mut lanes: Vec<usize> = state.aliens.iter().map(lane_of).collect();
            lanes.sort_unstable();
            lanes.dedup();
            prop_assert_eq!(lanes.len(), WAVE_SIZE);
            prop_assert!(lanes.iter().all(|&l| l < LANE_COUNT));
        }

        #[test]
        fn prop_ticks_keep_score_non_negative(seed in any::<u64>(), start in 0u32..30, frames in 0usize..3000) {
            let mut state = active_state(seed);
            state.score = start;
            generate_wave(&mut state);
            let mut last = state.score;
            for _ in 0..frames {
                tick(&mut state);
                // Ticks only ever take points away
                prop_assert!(state.score <= last);
                last = state.score;
                prop_assert_eq!(state.aliens.iter().filter(|a| a.is_correct).count(), 1);
            }
        }
    }
}
