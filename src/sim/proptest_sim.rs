//! Property-based tests for the simulation using proptest.

use glam::Vec2;
use proptest::prelude::*;

use super::camera::camera_origin;
use super::dialogue;
use super::session::quiz_points;
use super::state::{Asteroid, GameState};
use super::tick::{TickInput, tick};
use crate::consts::*;

fn arb_target() -> impl Strategy<Value = Option<Vec2>> {
    prop::option::of((0.0f32..WORLD_WIDTH, 0.0f32..WORLD_HEIGHT).prop_map(|(x, y)| Vec2::new(x, y)))
}

fn open_quiz(state: &mut GameState, body_idx: usize) {
    let pos = state.bodies[body_idx].pos;
    assert!(dialogue::click(state, pos));
    dialogue::advance(state);
    dialogue::advance(state);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Asteroids never leave `[r, dim - r]`, whatever the ship does.
    #[test]
    fn prop_asteroids_stay_in_bounds(
        seed in any::<u64>(),
        targets in prop::collection::vec(arb_target(), 1..40),
    ) {
        let mut state = GameState::new(seed);
        for _ in 0..10 {
            for target in &targets {
                tick(&mut state, &TickInput { target: *target });
                for a in &state.asteroids {
                    prop_assert!(a.pos.x >= a.radius && a.pos.x <= WORLD_WIDTH - a.radius);
                    prop_assert!(a.pos.y >= a.radius && a.pos.y <= WORLD_HEIGHT - a.radius);
                }
            }
        }
    }

    /// Risk buffer only goes down while active, by at most one hit per tick,
    /// and zero always means game over.
    #[test]
    fn prop_risk_buffer_monotonic(
        seed in any::<u64>(),
        targets in prop::collection::vec(arb_target(), 1..30),
    ) {
        let mut state = GameState::new(seed);
        // Dense field with short invincibility so hits actually happen
        state.config.invincibility_ticks = 2;
        for i in 0..40u32 {
            let id = state.next_entity_id();
            let pos = Vec2::new(100.0 + (i % 8) as f32 * 350.0, 100.0 + (i / 8) as f32 * 400.0);
            state.asteroids.push(Asteroid { id, pos, vel: Vec2::new(1.5, -1.5), radius: 25.0 });
        }

        let mut prev = state.session.risk_buffer;
        for _ in 0..20 {
            for target in &targets {
                let was_over = state.session.is_game_over();
                tick(&mut state, &TickInput { target: *target });
                let now = state.session.risk_buffer;
                prop_assert!(now <= prev);
                prop_assert!(prev - now <= HIT_COST);
                if was_over {
                    prop_assert_eq!(now, prev);
                }
                prop_assert_eq!(now == 0, state.session.is_game_over());
                prev = now;
            }
        }
    }

    /// The camera's viewport stays inside the world for any ship position.
    #[test]
    fn prop_camera_inside_world(x in -5000.0f32..8000.0, y in -5000.0f32..8000.0) {
        let viewport = Vec2::new(GAME_WIDTH, GAME_HEIGHT);
        let world = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
        let cam = camera_origin(Vec2::new(x, y), viewport, world);
        prop_assert!(cam.x >= 0.0 && cam.x + viewport.x <= world.x);
        prop_assert!(cam.y >= 0.0 && cam.y + viewport.y <= world.y);
    }

    /// Only the first option pick scores; the rest are ignored.
    #[test]
    fn prop_quiz_answer_one_shot(
        seed in any::<u64>(),
        body_idx in 0usize..7,
        picks in prop::collection::vec(0usize..4, 1..10),
        start_score in 0u64..500,
    ) {
        let mut state = GameState::new(seed);
        state.session.score = start_score;
        open_quiz(&mut state, body_idx);

        dialogue::select_option(&mut state, picks[0]);
        let result = state.dialogue.as_ref().unwrap().result();
        let score = state.session.score;
        let correct = Some(picks[0]) == state.bodies[body_idx].correct_option();
        prop_assert_eq!(result, Some(correct));

        if correct {
            let m = state.bodies[body_idx].score_multiplier;
            prop_assert_eq!(score, start_score + quiz_points(BASE_SCORE, CORRECT_BONUS, m));
        } else {
            prop_assert_eq!(score, start_score.saturating_sub(WRONG_PENALTY));
        }

        for &pick in &picks[1..] {
            dialogue::select_option(&mut state, pick);
            prop_assert_eq!(state.session.score, score);
            prop_assert_eq!(state.dialogue.as_ref().unwrap().result(), result);
        }
    }

    /// Correct-answer delta is exactly floor(BASE * m) + BONUS.
    #[test]
    fn prop_correct_answer_delta(seed in any::<u64>(), m in 1.5f64..3.0) {
        let mut state = GameState::new(seed);
        state.bodies[0].score_multiplier = m;
        open_quiz(&mut state, 0);
        let correct = state.bodies[0].correct_option().unwrap();
        dialogue::select_option(&mut state, correct);
        prop_assert_eq!(state.session.score, (100.0 * m).floor() as u64 + 200);
    }

    /// Restart always lands on a fresh session.
    #[test]
    fn prop_restart_reinitializes(seed in any::<u64>(), score in any::<u32>(), hits in 0u32..5) {
        let mut state = GameState::new(seed);
        open_quiz(&mut state, 3);
        state.session.award(score as u64);
        state.session.apply_hit(hits + 1);
        state.bodies.iter_mut().for_each(|b| b.visited = true);
        state.ship.pos = Vec2::new(-40.0, 9000.0);

        state.restart();

        prop_assert_eq!(state.session.score, 0);
        prop_assert_eq!(state.session.risk_buffer, MAX_RISK_BUFFER);
        prop_assert!(!state.session.is_game_over());
        prop_assert!(state.bodies.iter().all(|b| !b.visited));
        prop_assert!(state.dialogue.is_none());
        prop_assert_eq!(state.ship.pos, Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0));
    }
}
