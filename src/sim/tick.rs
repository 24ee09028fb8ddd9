//! Fixed timestep simulation tick
//!
//! One call advances the world by one 60 Hz step, always in the order
//! steer -> integrate -> collide -> respond. Collision uses positions already
//! advanced for this tick.

use glam::Vec2;
use rand::Rng;

use super::collision::{first_ship_hit, integrate_asteroid};
use super::session::HitOutcome;
use super::state::{Asteroid, GameEvent, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// World-space pointer target (from the latest pointer move)
    pub target: Option<Vec2>,
}

/// Advance the game state by one fixed timestep.
///
/// Frozen (no-op) after game over. While a dialogue is open only the steer
/// target is recorded; the world itself does not move.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.session.is_game_over() {
        return;
    }

    if let Some(target) = input.target {
        state.pointer_target = target;
    }

    if state.dialogue.is_some() {
        return;
    }

    state.time_ticks += 1;

    // Invincibility window counts down before this tick's collision check
    if state.invincible_ticks > 0 {
        state.invincible_ticks -= 1;
        if state.invincible_ticks == 0 {
            state.events.push(GameEvent::InvincibilityEnded);
        }
    }

    // 1. Steer
    let damping = state.config.steer_damping;
    state.ship.steer_toward(state.pointer_target, damping);

    // 2. Integrate asteroids
    let world = state.config.world_size();
    for asteroid in &mut state.asteroids {
        integrate_asteroid(asteroid, world);
    }

    // 3. Collide (skipped while invincible; at most one hit per tick)
    if state.is_invincible() {
        return;
    }
    let Some(hit) = first_ship_hit(&state.ship, &state.asteroids) else {
        return;
    };

    // 4. Respond
    let outcome = state.session.apply_hit(state.config.hit_cost);
    state.invincible_ticks = state.config.invincibility_ticks;
    state.events.push(GameEvent::AsteroidHit {
        asteroid_id: hit.asteroid_id,
        risk_buffer: state.session.risk_buffer,
    });
    log::debug!(
        "Asteroid {} hit ship at distance {:.1} (risk buffer {}/{})",
        hit.asteroid_id,
        hit.distance,
        state.session.risk_buffer,
        state.session.max_risk_buffer
    );

    if outcome == HitOutcome::Depleted {
        state.events.push(GameEvent::GameOver {
            score: state.session.score,
        });
        log::info!(
            "Risk buffer depleted - game over (score {}, {} of {} bodies)",
            state.session.score,
            state.visited_count(),
            state.bodies.len()
        );
    }
}

/// Scatter a fresh asteroid field: random position, heading and speed.
///
/// Positions respect the wall invariant from the start and keep clear of the
/// ship's spawn point.
pub fn generate_asteroids(state: &mut GameState) {
    const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

    let config = state.config.clone();
    let spawn = config.world_center();

    for _ in 0..config.asteroid_count {
        let radius = state
            .rng
            .random_range(config.asteroid_min_radius..=config.asteroid_max_radius);

        let mut pos = Vec2::ZERO;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            pos = Vec2::new(
                state.rng.random_range(radius..=config.world_width - radius),
                state.rng.random_range(radius..=config.world_height - radius),
            );
            if pos.distance(spawn) >= config.asteroid_spawn_clearance + radius {
                break;
            }
        }

        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state
            .rng
            .random_range(config.asteroid_min_speed..=config.asteroid_max_speed);

        let id = state.next_entity_id();
        state.asteroids.push(Asteroid {
            id,
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius,
        });
    }

    state.normalize_order();
    log::debug!("Generated {} asteroids", state.asteroids.len());
}
