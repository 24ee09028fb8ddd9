//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`SimConfig`]. Defaults match the
//! shipped game; a JSON document can override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading a balance file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulation balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Geometry ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub world_width: f32,
    pub world_height: f32,

    // === Ship ===
    pub ship_radius: f32,
    pub steer_damping: f32,

    // === Risk buffer ===
    pub max_risk_buffer: u32,
    pub hit_cost: u32,
    pub invincibility_ticks: u32,

    // === Asteroids ===
    pub asteroid_count: usize,
    /// World units per tick
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    /// No asteroid spawns this close to the ship's start point
    pub asteroid_spawn_clearance: f32,

    // === Scoring ===
    pub base_score: u64,
    pub correct_bonus: u64,
    pub wrong_penalty: u64,
    pub min_score_multiplier: f64,
    pub max_score_multiplier: f64,

    // === Minimap ===
    pub minimap_size: f32,
    pub minimap_margin: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport_width: GAME_WIDTH,
            viewport_height: GAME_HEIGHT,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            ship_radius: SHIP_RADIUS,
            steer_damping: STEER_DAMPING,

            max_risk_buffer: MAX_RISK_BUFFER,
            hit_cost: HIT_COST,
            invincibility_ticks: INVINCIBILITY_TICKS,

            asteroid_count: ASTEROID_COUNT,
            asteroid_min_speed: ASTEROID_SPEED,
            asteroid_max_speed: ASTEROID_SPEED,
            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_max_radius: ASTEROID_MAX_RADIUS,
            asteroid_spawn_clearance: ASTEROID_SPAWN_CLEARANCE,

            base_score: BASE_SCORE,
            correct_bonus: CORRECT_BONUS,
            wrong_penalty: WRONG_PENALTY,
            min_score_multiplier: MIN_SCORE_MULTIPLIER,
            max_score_multiplier: MAX_SCORE_MULTIPLIER,

            minimap_size: MINIMAP_SIZE,
            minimap_margin: MINIMAP_MARGIN,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON balance file and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
            ConfigError::Invalid { field, reason }
        }

        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(invalid("viewport", "dimensions must be positive"));
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(invalid("world", "dimensions must be positive"));
        }
        if !(self.steer_damping > 0.0 && self.steer_damping <= 1.0) {
            return Err(invalid("steer_damping", "must be in (0, 1]"));
        }
        if self.max_risk_buffer == 0 {
            return Err(invalid("max_risk_buffer", "must be at least 1"));
        }
        if self.hit_cost == 0 {
            return Err(invalid("hit_cost", "must be at least 1"));
        }
        if !(self.asteroid_min_speed >= 0.0 && self.asteroid_min_speed <= self.asteroid_max_speed)
        {
            return Err(invalid("asteroid_speed", "min must be >= 0 and <= max"));
        }
        if !(self.asteroid_min_radius > 0.0 && self.asteroid_min_radius <= self.asteroid_max_radius)
        {
            return Err(invalid("asteroid_radius", "min must be > 0 and <= max"));
        }
        let widest = self.asteroid_max_radius * 2.0;
        if widest >= self.world_width || widest >= self.world_height {
            return Err(invalid("asteroid_max_radius", "asteroids must fit in the world"));
        }
        if !(self.min_score_multiplier > 0.0
            && self.min_score_multiplier < self.max_score_multiplier)
        {
            return Err(invalid("score_multiplier", "range must be positive and non-empty"));
        }
        Ok(())
    }

    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    #[inline]
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Ship spawn point
    #[inline]
    pub fn world_center(&self) -> Vec2 {
        self.world_size() * 0.5
    }
}
