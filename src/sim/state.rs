//! Game state and core simulation types
//!
//! The world model (ship, asteroids, celestial bodies), the session it belongs
//! to and the transient dialogue all hang off one owned [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::camera;
use super::catalog::{self, BodyLore};
use super::dialogue::DialogueSession;
use super::session::Session;
use super::tick::generate_asteroids;
use crate::heading_between;
use crate::tuning::{ConfigError, SimConfig};

/// The player's ship
#[derive(Debug, Clone, Serialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Angle toward the current steer target (radians)
    pub heading: f32,
    pub radius: f32,
}

impl Ship {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            heading: 0.0,
            radius,
        }
    }

    /// Exponential-decay seek: cover `damping` of the remaining distance.
    /// No momentum, so the ship settles smoothly on the target.
    pub fn steer_toward(&mut self, target: Vec2, damping: f32) {
        if target != self.pos {
            self.heading = heading_between(self.pos, target);
        }
        self.pos += (target - self.pos) * damping;
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// World units per tick
    pub vel: Vec2,
    pub radius: f32,
}

/// One answer in a body's quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub text: &'static str,
    pub correct: bool,
}

/// A clickable star/planet gating a narrative and quiz
#[derive(Debug, Clone, Serialize)]
pub struct CelestialBody {
    pub id: u32,
    /// Stable catalog key (survives restarts, unlike `id`)
    pub key: &'static str,
    pub name: &'static str,
    pub pos: Vec2,
    pub radius: f32,
    /// Display color hint for the renderer
    pub color: &'static str,
    /// Randomized per session in `[min, max)`
    pub score_multiplier: f64,
    pub visited: bool,
    #[serde(skip)]
    pub lore: &'static BodyLore,
}

impl CelestialBody {
    /// Index of the correct quiz option
    pub fn correct_option(&self) -> Option<usize> {
        self.lore.options.iter().position(|o| o.correct)
    }
}

/// Things that happened during a tick or command, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    AsteroidHit { asteroid_id: u32, risk_buffer: u32 },
    InvincibilityEnded,
    GameOver { score: u64 },
    DialogueOpened { body_id: u32 },
    DialogueClosed { body_id: u32 },
    BodyMastered { body_id: u32, points: u64 },
    QuizMissed { body_id: u32, penalty: u64 },
    SessionRestarted { generation: u32 },
}

/// Complete game state (seeded, single owner)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for asteroid layout and score multipliers
    pub(crate) rng: Pcg32,
    /// Balance and geometry
    pub config: SimConfig,
    /// Number of restarts since creation
    pub generation: u32,
    /// Simulation tick counter (physics ticks actually run)
    pub time_ticks: u64,
    /// Player ship
    pub ship: Ship,
    /// Last world-space pointer target
    pub pointer_target: Vec2,
    /// Active asteroids (sorted by id)
    pub asteroids: Vec<Asteroid>,
    /// Celestial bodies in catalog order
    pub bodies: Vec<CelestialBody>,
    /// Ticks of invincibility remaining (0 = vulnerable)
    pub invincible_ticks: u32,
    /// Score, risk buffer and phase
    pub session: Session,
    /// Open narrative/quiz, if any
    pub dialogue: Option<DialogueSession>,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default balance
    pub fn new(seed: u64) -> Self {
        Self::build(SimConfig::default(), seed)
    }

    /// Create a new game with the given balance and seed.
    ///
    /// Rejects configs that fail [`SimConfig::validate`].
    pub fn with_config(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// `config` must already be valid
    fn build(config: SimConfig, seed: u64) -> Self {
        let center = config.world_center();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            time_ticks: 0,
            ship: Ship::new(center, config.ship_radius),
            pointer_target: center,
            asteroids: Vec::new(),
            bodies: Vec::new(),
            invincible_ticks: 0,
            session: Session::new(config.max_risk_buffer),
            dialogue: None,
            events: Vec::new(),
            next_id: 1,
            config,
        };
        state.populate();
        log::info!(
            "Session started (seed {}, {} asteroids, {} bodies)",
            seed,
            state.asteroids.len(),
            state.bodies.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fill the world with a fresh asteroid field and body set
    fn populate(&mut self) {
        self.asteroids.clear();
        self.bodies.clear();
        generate_asteroids(self);
        catalog::spawn_bodies(self);
    }

    /// Start a fresh session. The only way out of game over.
    pub fn restart(&mut self) {
        let center = self.config.world_center();
        self.generation += 1;
        self.ship = Ship::new(center, self.config.ship_radius);
        self.pointer_target = center;
        self.invincible_ticks = 0;
        self.dialogue = None;
        self.session.reset();
        self.populate();
        self.events.push(GameEvent::SessionRestarted {
            generation: self.generation,
        });
        log::info!("Session restarted (generation {})", self.generation);
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Top-left of the visible viewport in world space
    pub fn camera(&self) -> Vec2 {
        camera::camera_origin(
            self.ship.pos,
            self.config.viewport_size(),
            self.config.world_size(),
        )
    }

    pub fn body(&self, id: u32) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn visited_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.visited).count()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for stable iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|a| a.id);
    }
}
