//! Read-only projections of the game for the renderer, HUD and dialogue overlay
//!
//! Nothing here mutates state. All views serialize to JSON for the page.

use glam::Vec2;
use serde::Serialize;

use super::camera::is_visible;
use super::catalog::constellation_links;
use super::dialogue::{DialogueStep, QuizOutcome};
use super::state::GameState;

#[derive(Debug, Clone, Serialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyView {
    pub id: u32,
    pub name: &'static str,
    pub pos: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub score_multiplier: f64,
    pub visited: bool,
    /// Inside the current viewport (off-screen bodies get a minimap marker only)
    pub on_screen: bool,
}

/// World → minimap projection (minimap sits in the viewport's top-right corner)
#[derive(Debug, Clone, Serialize)]
pub struct MinimapView {
    /// Top-left of the minimap in viewport space
    pub origin: Vec2,
    pub size: f32,
    /// World units → minimap units, per axis
    pub scale: Vec2,
    pub ship: Vec2,
    /// Visible camera rectangle in minimap space (top-left, size)
    pub camera_origin: Vec2,
    pub camera_size: Vec2,
}

impl MinimapView {
    pub fn project(&self, world_pos: Vec2) -> Vec2 {
        self.origin + world_pos * self.scale
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub world: Vec2,
    pub viewport: Vec2,
    /// Top-left of the viewport in world space
    pub camera: Vec2,
    pub ship: ShipView,
    pub pointer_target: Vec2,
    pub invincible: bool,
    pub asteroids: Vec<AsteroidView>,
    pub bodies: Vec<BodyView>,
    /// Constellation segments as body ID pairs
    pub constellation: Vec<[u32; 2]>,
    pub minimap: MinimapView,
}

impl WorldSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let config = &state.config;
        let world = config.world_size();
        let viewport = config.viewport_size();
        let camera = state.camera();

        let scale = Vec2::splat(config.minimap_size) / world;
        let minimap_origin = Vec2::new(
            viewport.x - config.minimap_size - config.minimap_margin,
            config.minimap_margin,
        );
        let minimap = MinimapView {
            origin: minimap_origin,
            size: config.minimap_size,
            scale,
            ship: minimap_origin + state.ship.pos * scale,
            camera_origin: minimap_origin + camera * scale,
            camera_size: viewport * scale,
        };

        Self {
            tick: state.time_ticks,
            world,
            viewport,
            camera,
            ship: ShipView {
                pos: state.ship.pos,
                heading: state.ship.heading,
                radius: state.ship.radius,
            },
            pointer_target: state.pointer_target,
            invincible: state.is_invincible(),
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    id: a.id,
                    pos: a.pos,
                    radius: a.radius,
                })
                .collect(),
            bodies: state
                .bodies
                .iter()
                .map(|b| BodyView {
                    id: b.id,
                    name: b.name,
                    pos: b.pos,
                    radius: b.radius,
                    color: b.color,
                    score_multiplier: b.score_multiplier,
                    visited: b.visited,
                    on_screen: is_visible(camera, viewport, b.pos, b.radius),
                })
                .collect(),
            constellation: constellation_links(&state.bodies),
            minimap,
        }
    }
}

/// HUD numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub score: u64,
    pub risk_buffer: u32,
    pub max_risk_buffer: u32,
    pub game_over: bool,
    pub visited: usize,
    pub total: usize,
    /// Every body mastered this session
    pub portfolio_complete: bool,
}

impl SessionSummary {
    pub fn capture(state: &GameState) -> Self {
        let visited = state.visited_count();
        let total = state.bodies.len();
        Self {
            score: state.session.score,
            risk_buffer: state.session.risk_buffer,
            max_risk_buffer: state.session.max_risk_buffer,
            game_over: state.session.is_game_over(),
            visited,
            total,
            portfolio_complete: total > 0 && visited == total,
        }
    }
}

/// What the dialogue overlay shows right now
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueView {
    pub body_id: u32,
    pub body_name: &'static str,
    /// 0, 1 or 2
    pub step: u8,
    /// Narrator for steps 0 and 1
    pub speaker: Option<&'static str>,
    /// Fact/insight text, or the quiz question
    pub text: &'static str,
    /// Quiz options (step 2 only)
    pub options: Vec<&'static str>,
    pub result: Option<bool>,
    pub selected: Option<usize>,
    /// Revealed once the quiz is answered
    pub correct_option: Option<usize>,
    pub message: Option<String>,
    pub advance_label: &'static str,
    pub can_advance: bool,
}

impl DialogueView {
    pub fn capture(state: &GameState) -> Option<Self> {
        let dialogue = state.dialogue.as_ref()?;
        let body = state.body(dialogue.body_id)?;
        let lore = body.lore;

        let (speaker, text, options) = match dialogue.step {
            DialogueStep::Narrative => (Some("Space Guide"), lore.fact, Vec::new()),
            DialogueStep::Insight => (Some("Finance Broker"), lore.insight, Vec::new()),
            DialogueStep::Quiz { .. } => (
                None,
                lore.question,
                lore.options.iter().map(|o| o.text).collect(),
            ),
        };
        let advance_label = match dialogue.step {
            DialogueStep::Narrative => "Next: Financial Insight (1/3)",
            DialogueStep::Insight => "Next: Start Quiz (2/3)",
            DialogueStep::Quiz { .. } => "Close (3/3)",
        };
        let result = dialogue.result();
        let message = dialogue.outcome.map(|outcome| match outcome {
            QuizOutcome::Mastered { points } => format!("Correct! +{} Pts Awarded!", points),
            QuizOutcome::Review => "Correct! This star is already mastered.".to_string(),
            QuizOutcome::Missed { .. } => {
                "Incorrect. Study the facts and try another star!".to_string()
            }
        });

        Some(Self {
            body_id: body.id,
            body_name: body.name,
            step: dialogue.step.index(),
            speaker,
            text,
            options,
            result,
            selected: dialogue.selected,
            correct_option: result.and_then(|_| body.correct_option()),
            message,
            advance_label,
            can_advance: dialogue.step != (DialogueStep::Quiz { result: None }),
        })
    }
}
