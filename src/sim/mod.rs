//! Seeded simulation module
//!
//! All gameplay logic lives here. This module must stay pure and reproducible:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID / catalog order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod catalog;
pub mod collision;
pub mod dialogue;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

#[cfg(test)]
mod proptest_sim;

pub use camera::{camera_origin, device_to_viewport, screen_to_world, world_to_screen};
pub use collision::{CollisionResult, first_ship_hit, integrate_asteroid};
pub use dialogue::{DialogueSession, DialogueStep, QuizOutcome};
pub use session::{GamePhase, HitOutcome, Session, quiz_points};
pub use snapshot::{DialogueView, SessionSummary, WorldSnapshot};
pub use state::{Asteroid, CelestialBody, GameEvent, GameState, QuizOption, Ship};
pub use tick::{TickInput, generate_asteroids, tick};
