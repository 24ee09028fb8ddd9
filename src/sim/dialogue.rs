//! Celestial interaction and the narrative/quiz state machine
//!
//! Flow per body: `Narrative -> Insight -> Quiz(unanswered) -> Quiz(answered) -> closed`.
//! Commands that do not apply to the current step are ignored.

use glam::Vec2;
use serde::Serialize;

use super::session::quiz_points;
use super::state::{CelestialBody, GameEvent, GameState};
use crate::circle_contains;

/// Where the player is in a body's dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogueStep {
    /// Step 0: astronomy fact
    Narrative,
    /// Step 1: financial insight
    Insight,
    /// Step 2: quiz, `None` until answered
    Quiz { result: Option<bool> },
}

impl DialogueStep {
    /// 0, 1 or 2
    pub fn index(&self) -> u8 {
        match self {
            DialogueStep::Narrative => 0,
            DialogueStep::Insight => 1,
            DialogueStep::Quiz { .. } => 2,
        }
    }
}

/// What an answered quiz did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizOutcome {
    /// First correct answer for this body
    Mastered { points: u64 },
    /// Correct, but the body was already mastered this session
    Review,
    /// Wrong answer; `penalty` is what was actually deducted
    Missed { penalty: u64 },
}

/// Transient progress through one body's dialogue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueSession {
    pub body_id: u32,
    pub step: DialogueStep,
    /// Option the player picked
    pub selected: Option<usize>,
    pub outcome: Option<QuizOutcome>,
}

/// Result of an "advance" command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Stepped,
    Closed,
    Ignored,
}

impl DialogueSession {
    pub fn open(body_id: u32) -> Self {
        Self {
            body_id,
            step: DialogueStep::Narrative,
            selected: None,
            outcome: None,
        }
    }

    /// Quiz result, `None` before the quiz or while unanswered
    pub fn result(&self) -> Option<bool> {
        match self.step {
            DialogueStep::Quiz { result } => result,
            _ => None,
        }
    }

    /// Move to the next step. Unanswered quizzes cannot be skipped.
    pub fn advance(&mut self) -> Advance {
        match self.step {
            DialogueStep::Narrative => {
                self.step = DialogueStep::Insight;
                Advance::Stepped
            }
            DialogueStep::Insight => {
                self.step = DialogueStep::Quiz { result: None };
                Advance::Stepped
            }
            DialogueStep::Quiz { result: None } => Advance::Ignored,
            DialogueStep::Quiz { result: Some(_) } => Advance::Closed,
        }
    }

    /// Record an answer. One-shot: returns false if not at an unanswered quiz.
    pub fn answer(&mut self, index: usize, correct: bool) -> bool {
        if self.step != (DialogueStep::Quiz { result: None }) {
            return false;
        }
        self.step = DialogueStep::Quiz {
            result: Some(correct),
        };
        self.selected = Some(index);
        true
    }
}

/// First body (catalog order) whose circle contains `point`.
/// Overlapping bodies resolve by that order, which is not a stable contract.
pub fn pick_body(bodies: &[CelestialBody], point: Vec2) -> Option<u32> {
    bodies
        .iter()
        .find(|b| circle_contains(b.pos, b.radius, point))
        .map(|b| b.id)
}

/// Handle a world-space click. Opens a dialogue on a hit body.
/// No-op while a dialogue is open or the session is over.
pub fn click(state: &mut GameState, point: Vec2) -> bool {
    if state.dialogue.is_some() || state.session.is_game_over() {
        return false;
    }
    let Some(body_id) = pick_body(&state.bodies, point) else {
        return false;
    };
    state.dialogue = Some(DialogueSession::open(body_id));
    state.events.push(GameEvent::DialogueOpened { body_id });
    log::debug!("Dialogue opened for body {}", body_id);
    true
}

/// "Next" button
pub fn advance(state: &mut GameState) {
    let Some(dialogue) = state.dialogue.as_mut() else {
        return;
    };
    match dialogue.advance() {
        Advance::Stepped => log::debug!("Dialogue step {}", dialogue.step.index()),
        Advance::Closed => close(state),
        Advance::Ignored => {}
    }
}

/// Pick quiz option `index`. Scores the answer once; later picks are ignored.
pub fn select_option(state: &mut GameState, index: usize) {
    let Some(dialogue) = state.dialogue.as_mut() else {
        return;
    };
    let body_id = dialogue.body_id;
    let Some(body) = state.bodies.iter_mut().find(|b| b.id == body_id) else {
        return;
    };
    let Some(option) = body.lore.options.get(index) else {
        return;
    };
    if !dialogue.answer(index, option.correct) {
        return;
    }

    let outcome = if option.correct {
        if body.visited {
            QuizOutcome::Review
        } else {
            let points = quiz_points(
                state.config.base_score,
                state.config.correct_bonus,
                body.score_multiplier,
            );
            body.visited = true;
            state.session.award(points);
            state.events.push(GameEvent::BodyMastered { body_id, points });
            log::info!("{} mastered: +{} (score {})", body.name, points, state.session.score);
            QuizOutcome::Mastered { points }
        }
    } else {
        let penalty = state.session.penalize(state.config.wrong_penalty);
        state.events.push(GameEvent::QuizMissed { body_id, penalty });
        log::debug!("Wrong answer on {}: -{}", body.name, penalty);
        QuizOutcome::Missed { penalty }
    };
    dialogue.outcome = Some(outcome);
}

/// Drop the dialogue. Effects already applied by an answer stay; nothing else
/// is scored.
pub fn close(state: &mut GameState) {
    if let Some(dialogue) = state.dialogue.take() {
        state.events.push(GameEvent::DialogueClosed {
            body_id: dialogue.body_id,
        });
        log::debug!("Dialogue closed for body {}", dialogue.body_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_first_body(state: &mut GameState) -> u32 {
        let pos = state.bodies[0].pos;
        assert!(click(state, pos));
        state.bodies[0].id
    }

    fn wrong_option(state: &GameState, body_idx: usize) -> usize {
        let correct = state.bodies[body_idx].correct_option().unwrap();
        (correct + 1) % state.bodies[body_idx].lore.options.len()
    }

    #[test]
    fn test_click_opens_at_narrative() {
        let mut state = GameState::new(1);
        let id = open_first_body(&mut state);
        let dialogue = state.dialogue.as_ref().unwrap();
        assert_eq!(dialogue.body_id, id);
        assert_eq!(dialogue.step, DialogueStep::Narrative);
        assert_eq!(dialogue.result(), None);
        assert_eq!(state.drain_events(), vec![GameEvent::DialogueOpened { body_id: id }]);
    }

    #[test]
    fn test_click_miss_is_noop() {
        let mut state = GameState::new(1);
        assert!(!click(&mut state, Vec2::new(5.0, 5.0)));
        assert!(state.dialogue.is_none());
    }

    #[test]
    fn test_click_edge_is_strict() {
        let mut state = GameState::new(1);
        let body = &state.bodies[0];
        let edge = body.pos + Vec2::new(body.radius, 0.0);
        assert!(!click(&mut state, edge));
    }

    #[test]
    fn test_click_ignored_while_open() {
        let mut state = GameState::new(1);
        open_first_body(&mut state);
        let other = state.bodies[3].pos;
        assert!(!click(&mut state, other));
        assert_eq!(state.dialogue.as_ref().unwrap().body_id, state.bodies[0].id);
    }

    #[test]
    fn test_click_ignored_after_game_over() {
        let mut state = GameState::new(1);
        state.session.apply_hit(100);
        let pos = state.bodies[0].pos;
        assert!(!click(&mut state, pos));
    }

    #[test]
    fn test_full_flow_correct_answer() {
        let mut state = GameState::new(11);
        state.bodies[0].score_multiplier = 1.8;
        open_first_body(&mut state);

        advance(&mut state);
        assert_eq!(state.dialogue.as_ref().unwrap().step, DialogueStep::Insight);
        advance(&mut state);
        assert_eq!(
            state.dialogue.as_ref().unwrap().step,
            DialogueStep::Quiz { result: None }
        );

        // Cannot skip an unanswered quiz
        advance(&mut state);
        assert!(state.dialogue.is_some());

        let correct = state.bodies[0].correct_option().unwrap();
        select_option(&mut state, correct);
        assert_eq!(state.session.score, 380);
        assert!(state.bodies[0].visited);
        assert_eq!(state.dialogue.as_ref().unwrap().result(), Some(true));
        assert_eq!(
            state.dialogue.as_ref().unwrap().outcome,
            Some(QuizOutcome::Mastered { points: 380 })
        );

        advance(&mut state);
        assert!(state.dialogue.is_none());
    }

    #[test]
    fn test_answer_is_one_shot() {
        let mut state = GameState::new(5);
        open_first_body(&mut state);
        advance(&mut state);
        advance(&mut state);

        let correct = state.bodies[0].correct_option().unwrap();
        select_option(&mut state, correct);
        let score = state.session.score;
        let wrong = wrong_option(&state, 0);

        select_option(&mut state, wrong);
        select_option(&mut state, correct);
        assert_eq!(state.session.score, score);
        assert_eq!(state.dialogue.as_ref().unwrap().result(), Some(true));
        assert_eq!(state.dialogue.as_ref().unwrap().selected, Some(correct));
    }

    #[test]
    fn test_wrong_answer_penalty_floors() {
        let mut state = GameState::new(5);
        state.session.score = 20;
        open_first_body(&mut state);
        advance(&mut state);
        advance(&mut state);

        let wrong = wrong_option(&state, 0);
        select_option(&mut state, wrong);
        assert_eq!(state.session.score, 0);
        assert!(!state.bodies[0].visited);
        assert_eq!(
            state.dialogue.as_ref().unwrap().outcome,
            Some(QuizOutcome::Missed { penalty: 20 })
        );
    }

    #[test]
    fn test_select_before_quiz_is_ignored() {
        let mut state = GameState::new(5);
        open_first_body(&mut state);
        let correct = state.bodies[0].correct_option().unwrap();
        select_option(&mut state, correct);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.dialogue.as_ref().unwrap().step, DialogueStep::Narrative);
    }

    #[test]
    fn test_out_of_range_option_is_ignored() {
        let mut state = GameState::new(5);
        open_first_body(&mut state);
        advance(&mut state);
        advance(&mut state);
        select_option(&mut state, 99);
        assert_eq!(state.dialogue.as_ref().unwrap().result(), None);
    }

    #[test]
    fn test_early_close_discards() {
        let mut state = GameState::new(5);
        let id = open_first_body(&mut state);
        advance(&mut state);
        close(&mut state);
        assert!(state.dialogue.is_none());
        assert_eq!(state.session.score, 0);
        assert!(!state.bodies[0].visited);
        assert!(state
            .drain_events()
            .contains(&GameEvent::DialogueClosed { body_id: id }));
    }

    #[test]
    fn test_requiz_mastered_body_awards_nothing() {
        let mut state = GameState::new(9);
        for _ in 0..2 {
            open_first_body(&mut state);
            advance(&mut state);
            advance(&mut state);
            let correct = state.bodies[0].correct_option().unwrap();
            select_option(&mut state, correct);
            advance(&mut state);
        }
        let expected = quiz_points(100, 200, state.bodies[0].score_multiplier);
        assert_eq!(state.session.score, expected);
        assert!(state.bodies[0].visited);
    }

    #[test]
    fn test_commands_without_dialogue_are_noops() {
        let mut state = GameState::new(2);
        advance(&mut state);
        select_option(&mut state, 0);
        close(&mut state);
        assert!(state.dialogue.is_none());
        assert!(state.events.is_empty());
    }
}
