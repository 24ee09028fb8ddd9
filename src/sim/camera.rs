//! Camera derivation and pointer-to-world mapping
//!
//! The camera is never stored: it follows the ship, clamped so the viewport
//! stays inside the world.

use glam::Vec2;

use crate::{ViewportRect, clamp_range};

/// Top-left of the viewport in world space.
///
/// Centers the ship, then clamps each axis to `[0, world - viewport]`. When the
/// world is narrower than the viewport on an axis, that axis stays at 0.
pub fn camera_origin(ship_pos: Vec2, viewport: Vec2, world: Vec2) -> Vec2 {
    let centered = ship_pos - viewport * 0.5;
    Vec2::new(
        clamp_range(centered.x, 0.0, world.x - viewport.x),
        clamp_range(centered.y, 0.0, world.y - viewport.y),
    )
}

/// Convert a raw pointer coordinate (client space) into logical viewport space.
///
/// Normalizes for CSS scaling and device pixel ratio. Returns `None` for a
/// zero-size rect; the caller skips the event.
pub fn device_to_viewport(device: Vec2, rect: ViewportRect, viewport: Vec2) -> Option<Vec2> {
    if rect.is_degenerate() {
        return None;
    }
    let scale = Vec2::new(viewport.x / rect.width, viewport.y / rect.height);
    Some((device - Vec2::new(rect.left, rect.top)) * scale)
}

/// Map a raw pointer coordinate all the way into world space
pub fn screen_to_world(
    device: Vec2,
    rect: ViewportRect,
    viewport: Vec2,
    camera: Vec2,
) -> Option<Vec2> {
    device_to_viewport(device, rect, viewport).map(|local| local + camera)
}

/// Inverse of [`screen_to_world`], used by scripted input and tests
pub fn world_to_screen(
    world_pos: Vec2,
    rect: ViewportRect,
    viewport: Vec2,
    camera: Vec2,
) -> Option<Vec2> {
    if rect.is_degenerate() {
        return None;
    }
    let scale = Vec2::new(rect.width / viewport.x, rect.height / viewport.y);
    Some((world_pos - camera) * scale + Vec2::new(rect.left, rect.top))
}

/// Whether a world-space circle overlaps the visible viewport (renderer culling)
pub fn is_visible(camera: Vec2, viewport: Vec2, pos: Vec2, radius: f32) -> bool {
    pos.x + radius >= camera.x
        && pos.y + radius >= camera.y
        && pos.x - radius <= camera.x + viewport.x
        && pos.y - radius <= camera.y + viewport.y
}
