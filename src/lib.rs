//! Dipper Quest - A Little Dipper space-exploration arcade game
//!
//! Core modules:
//! - `sim`: Seeded simulation (steering, asteroid physics, quizzes, scoring)
//! - `game`: Command surface and fixed-step driver used by the host
//! - `tuning`: Data-driven game balance
//! - `settings`: Host display preferences

pub mod game;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{ConfigError, SimConfig};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed simulation timestep (60 Hz, matches the per-tick asteroid speeds)
    pub const SIM_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical viewport (canvas) dimensions
    pub const GAME_WIDTH: f32 = 900.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 3000.0;
    pub const WORLD_HEIGHT: f32 = 2000.0;

    /// Ship sprite is 70px, collision circle is half of it
    pub const SHIP_RADIUS: f32 = 35.0;
    /// Fraction of remaining distance covered per tick when seeking the pointer
    pub const STEER_DAMPING: f32 = 0.1;

    /// Risk buffer ("emergency fund" hearts)
    pub const MAX_RISK_BUFFER: u32 = 5;
    pub const HIT_COST: u32 = 1;
    /// 1.5 seconds at 60 Hz. Counted in physics ticks, not wall-clock time,
    /// so the window pauses while a dialogue is open and resumes after it.
    pub const INVINCIBILITY_TICKS: u32 = 90;

    /// Asteroid field
    pub const ASTEROID_COUNT: usize = 15;
    pub const ASTEROID_SPEED: f32 = 1.5;
    pub const ASTEROID_MIN_RADIUS: f32 = 15.0;
    pub const ASTEROID_MAX_RADIUS: f32 = 25.0;
    pub const ASTEROID_SPAWN_CLEARANCE: f32 = 150.0;

    /// Scoring
    pub const BASE_SCORE: u64 = 100;
    pub const CORRECT_BONUS: u64 = 200;
    pub const WRONG_PENALTY: u64 = 50;
    pub const MIN_SCORE_MULTIPLIER: f64 = 1.5;
    pub const MAX_SCORE_MULTIPLIER: f64 = 3.0;

    /// Minimap overlay (top-right corner of the viewport)
    pub const MINIMAP_SIZE: f32 = 180.0;
    pub const MINIMAP_MARGIN: f32 = 20.0;
}

/// On-screen rectangle of the canvas element (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect with no area cannot be mapped into the viewport
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Clamp to `[lo, hi]`, collapsing to `lo` when the range is inverted
#[inline]
pub fn clamp_range(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Whether `point` lies strictly inside the circle
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) < radius
}
