//! Command surface and fixed-step driver
//!
//! The host (browser glue or a headless runner) owns one [`Game`] and feeds it
//! pointer events, overlay button presses and frame times. Every command is
//! fire-and-forget: it mutates state or is silently ignored.

use glam::Vec2;

use crate::ViewportRect;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{
    DialogueView, GameEvent, GameState, SessionSummary, TickInput, WorldSnapshot, dialogue,
    screen_to_world, tick,
};
use crate::tuning::{ConfigError, SimConfig};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    input: TickInput,
    accumulator: f32,
    /// Cleared by [`Game::stop`]; everything is a no-op afterwards
    running: bool,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    /// Start a game with custom balance. Fails if the config does not validate.
    pub fn with_config(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::with_config(config, seed)?))
    }

    fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            running: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Map a client-space pointer position to world space using the current
    /// camera. `None` for a zero-size canvas.
    fn pointer_to_world(&self, client: Vec2, rect: ViewportRect) -> Option<Vec2> {
        let mapped = screen_to_world(
            client,
            rect,
            self.state.config.viewport_size(),
            self.state.camera(),
        );
        if mapped.is_none() {
            log::warn!("Ignoring pointer event on zero-size viewport {:?}", rect);
        }
        mapped
    }

    /// Pointer moved: becomes the ship's steer target on the next tick
    pub fn pointer_move(&mut self, client: Vec2, rect: ViewportRect) {
        if !self.running {
            return;
        }
        if let Some(target) = self.pointer_to_world(client, rect) {
            self.input.target = Some(target);
        }
    }

    /// Pointer clicked: may open a body's dialogue
    pub fn pointer_click(&mut self, client: Vec2, rect: ViewportRect) {
        if !self.running {
            return;
        }
        if let Some(point) = self.pointer_to_world(client, rect) {
            dialogue::click(&mut self.state, point);
        }
    }

    /// "Next" / "Close" on the dialogue overlay
    pub fn advance_dialogue(&mut self) {
        if self.running {
            dialogue::advance(&mut self.state);
        }
    }

    /// Quiz option button
    pub fn select_option(&mut self, index: usize) {
        if self.running {
            dialogue::select_option(&mut self.state, index);
        }
    }

    /// Dismiss the overlay without finishing it
    pub fn close_dialogue(&mut self) {
        if self.running {
            dialogue::close(&mut self.state);
        }
    }

    /// "Start New Expedition"
    pub fn restart(&mut self) {
        if !self.running {
            return;
        }
        self.state.restart();
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }

    /// Run one simulation tick with the pending input
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input);
    }

    /// Run as many fixed ticks as `dt` seconds cover. Returns ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        // A bad frame time (NaN, infinite) must not poison the accumulator
        let dt = if dt.is_finite() {
            dt.clamp(0.0, 0.1)
        } else {
            log::warn!("Ignoring non-finite frame time {}", dt);
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Teardown: cancel the pending invincibility window and stop accepting
    /// ticks and commands.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.state.invincible_ticks = 0;
        self.input = TickInput::default();
        self.accumulator = 0.0;
        log::info!("Simulation stopped at tick {}", self.state.time_ticks);
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.state)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::capture(&self.state)
    }

    pub fn dialogue_view(&self) -> Option<DialogueView> {
        DialogueView::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::world_to_screen;

    fn full_rect() -> ViewportRect {
        ViewportRect::new(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT)
    }

    /// Client coordinate that lands on `world_pos` with the current camera
    fn client_for(game: &Game, world_pos: Vec2, rect: ViewportRect) -> Vec2 {
        world_to_screen(
            world_pos,
            rect,
            game.state().config.viewport_size(),
            game.state().camera(),
        )
        .unwrap()
    }

    #[test]
    fn test_pointer_move_steers_ship() {
        let mut game = Game::new(1);
        let start = game.state().ship.pos;
        // Canvas shown at double size
        let rect = ViewportRect::new(0.0, 0.0, GAME_WIDTH * 2.0, GAME_HEIGHT * 2.0);
        let target = start + Vec2::new(200.0, 0.0);
        let client = client_for(&game, target, rect);

        game.pointer_move(client, rect);
        game.step();

        assert!((game.state().pointer_target - target).length() < 1e-2);
        assert!((game.state().ship.pos.x - (start.x + 20.0)).abs() < 1e-2);
    }

    #[test]
    fn test_zero_rect_pointer_is_ignored() {
        let mut game = Game::new(1);
        game.pointer_move(Vec2::new(10.0, 10.0), ViewportRect::default());
        game.step();
        assert_eq!(game.state().pointer_target, game.state().config.world_center());
    }

    #[test]
    fn test_click_quiz_flow() {
        let mut game = Game::new(4);
        let rect = full_rect();
        // Delta is on screen at the start; the click maps through the camera
        let body = game.state().bodies[3].clone();
        let client = client_for(&game, body.pos, rect);
        game.pointer_click(client, rect);
        assert_eq!(game.dialogue_view().unwrap().body_id, body.id);

        game.advance_dialogue();
        game.advance_dialogue();
        let correct = game.state().bodies[3].correct_option().unwrap();
        game.select_option(correct);
        game.advance_dialogue();

        assert!(game.dialogue_view().is_none());
        let summary = game.summary();
        assert_eq!(summary.visited, 1);
        assert_eq!(
            summary.score,
            crate::sim::quiz_points(BASE_SCORE, CORRECT_BONUS, body.score_multiplier)
        );
    }

    #[test]
    fn test_update_runs_fixed_steps() {
        let mut game = Game::new(2);
        assert_eq!(game.update(SIM_DT * 3.5), 3);
        assert_eq!(game.state().time_ticks, 3);
        assert_eq!(game.update(SIM_DT * 0.6), 1);
        // Frame gaps are clamped to 100 ms
        assert_eq!(game.update(5.0), 6);
        assert!(game.update(5.0) <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_non_finite_frame_time_is_skipped() {
        let mut game = Game::new(2);
        assert_eq!(game.update(f32::NAN), 0);
        assert_eq!(game.update(f32::INFINITY), 0);
        assert_eq!(game.update(f32::NEG_INFINITY), 0);

        let ran: u32 = (0..60).map(|_| game.update(SIM_DT)).sum();
        assert!(ran >= 59);
        assert_eq!(game.state().time_ticks, ran as u64);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            min_score_multiplier: 2.0,
            max_score_multiplier: 2.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Game::with_config(config, 1),
            Err(ConfigError::Invalid { .. })
        ));

        let config = SimConfig {
            asteroid_count: 0,
            ..SimConfig::default()
        };
        let game = Game::with_config(config, 1).unwrap();
        assert!(game.state().asteroids.is_empty());
        assert!(game.is_running());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut game = Game::new(5);
        game.state.session.apply_hit(MAX_RISK_BUFFER);
        assert!(game.summary().game_over);
        game.step();
        assert_eq!(game.state().time_ticks, 0);

        game.restart();
        let summary = game.summary();
        assert!(!summary.game_over);
        assert_eq!(summary.risk_buffer, MAX_RISK_BUFFER);
        assert_eq!(summary.score, 0);
        game.step();
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut game = Game::new(6);
        game.state.invincible_ticks = 50;
        game.stop();
        assert!(!game.is_running());
        assert!(!game.state().is_invincible());

        let ticks = game.state().time_ticks;
        assert_eq!(game.update(1.0), 0);
        game.step();
        let pos = game.state().bodies[0].pos;
        let client = client_for(&game, pos, full_rect());
        game.pointer_click(client, full_rect());
        game.restart();

        assert_eq!(game.state().time_ticks, ticks);
        assert!(game.dialogue_view().is_none());
        assert_eq!(game.state().generation, 0);
    }
}
