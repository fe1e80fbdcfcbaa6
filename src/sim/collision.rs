//! Pointer hit testing
//!
//! Aliens are circles; a pointer hits one when it lands strictly inside.

use glam::Vec2;

use super::state::Alien;

/// Strict point-in-circle test
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Whether a pointer at `point` hits `alien`.
///
/// Non-finite coordinates never hit.
pub fn pointer_hits(point: Vec2, alien: &Alien) -> bool {
    point.is_finite() && point_in_circle(point, alien.pos, alien.radius)
}
