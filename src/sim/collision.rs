//! Crossing and containment tests
//!
//! Obstacles only ever move toward +z, so a hit is a two-step question: did a
//! group's depth plane sweep over the fighter this tick, and if so, is the
//! fighter inside one of that group's solid boxes.

use glam::Vec2;

/// True when a plane that moved from `z_previous` to `z` swept over `depth`.
///
/// Half-open on the near side so a plane landing exactly on `depth` counts
/// once, on the tick it arrives, and not again on the next tick.
#[inline]
pub fn crossed_depth(z_previous: f32, z: f32, depth: f32) -> bool {
    z_previous < depth && depth <= z
}

/// Axis-aligned box containment, bounds inclusive
#[inline]
pub fn box_contains(center: Vec2, half_extents: Vec2, point: Vec2) -> bool {
    let d = (point - center).abs();
    d.x <= half_extents.x && d.y <= half_extents.y
}
