//! Collision detection and response
//!
//! Everything in the world is a circle: asteroids bounce off the world edges
//! one axis at a time, and the ship is hit when its circle overlaps an asteroid.

use glam::Vec2;

use super::state::{Asteroid, Ship};

/// Result of a ship/asteroid check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Asteroid involved
    pub asteroid_id: u32,
    /// Center-to-center distance
    pub distance: f32,
}

/// Strict circle overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Check the ship against one asteroid
pub fn ship_asteroid_collision(ship: &Ship, asteroid: &Asteroid) -> Option<CollisionResult> {
    if !circles_overlap(ship.pos, ship.radius, asteroid.pos, asteroid.radius) {
        return None;
    }
    Some(CollisionResult {
        asteroid_id: asteroid.id,
        distance: ship.pos.distance(asteroid.pos),
    })
}

/// First asteroid (in slice order) overlapping the ship.
///
/// Short-circuits, so a tick with several overlaps reports exactly one hit.
pub fn first_ship_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<CollisionResult> {
    asteroids
        .iter()
        .find_map(|a| ship_asteroid_collision(ship, a))
}

/// Elastic bounce on one axis: keeps `pos` in `[radius, extent - radius]`.
///
/// Returns the new position and velocity.
#[inline]
pub fn bounce_axis(pos: f32, vel: f32, radius: f32, extent: f32) -> (f32, f32) {
    let lo = radius;
    let hi = extent - radius;
    if pos < lo || pos > hi {
        (pos.clamp(lo, hi), -vel)
    } else {
        (pos, vel)
    }
}

/// Advance an asteroid one tick, bouncing off the world edges per axis
/// (not corner-accurate).
pub fn integrate_asteroid(asteroid: &mut Asteroid, world: Vec2) {
    let next = asteroid.pos + asteroid.vel;
    let (x, vx) = bounce_axis(next.x, asteroid.vel.x, asteroid.radius, world.x);
    let (y, vy) = bounce_axis(next.y, asteroid.vel.y, asteroid.radius, world.y);
    asteroid.pos = Vec2::new(x, y);
    asteroid.vel = Vec2::new(vx, vy);
}
