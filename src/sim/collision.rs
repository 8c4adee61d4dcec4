//! Collision predicates for the rectangular play field
//!
//! Everything here is a pure function over positions and extents. Bounce
//! resolution is a velocity sign flip and lives in the tick; these predicates
//! only decide whether a boundary is crossed. Wall tests look one tick ahead
//! (position plus velocity) so the reflection lands in the same tick the
//! boundary would have been crossed.

use glam::Vec2;

/// Is the ball center strictly inside an axis-aligned rectangle?
///
/// Strict bounds: a center exactly on an edge does not count as a hit.
#[inline]
pub fn center_in_rect(center: Vec2, origin: Vec2, size: Vec2) -> bool {
    center.x > origin.x
        && center.x < origin.x + size.x
        && center.y > origin.y
        && center.y < origin.y + size.y
}

/// Would the next x-position leave the [radius, field_width - radius] band?
#[inline]
pub fn crosses_side_wall(x: f32, dx: f32, radius: f32, field_width: f32) -> bool {
    let next = x + dx;
    next > field_width - radius || next < radius
}

/// Would the next y-position cross the top wall?
#[inline]
pub fn crosses_ceiling(y: f32, dy: f32, radius: f32) -> bool {
    y + dy < radius
}

/// Would the next y-position cross the bottom boundary?
#[inline]
pub fn reaches_floor(y: f32, dy: f32, radius: f32, field_height: f32) -> bool {
    y + dy > field_height - radius
}

/// Strict horizontal span test (paddle bounce and item catch share it).
#[inline]
pub fn within_span(x: f32, left: f32, width: f32) -> bool {
    x > left && x < left + width
}

/// Has a falling item reached the paddle's catch window?
///
/// The vertical bound accounts for the item radius; the horizontal bound uses
/// the item's center only. The asymmetry is reference behavior, kept as-is
/// (see DESIGN.md).
#[inline]
pub fn item_caught(
    item_pos: Vec2,
    item_radius: f32,
    paddle_x: f32,
    paddle_width: f32,
    paddle_height: f32,
    field_height: f32,
) -> bool {
    item_pos.y + item_radius > field_height - paddle_height
        && within_span(item_pos.x, paddle_x, paddle_width)
}

/// Has an item fallen fully below the field?
#[inline]
pub fn item_below_field(item_y: f32, item_radius: f32, field_height: f32) -> bool {
    item_y - item_radius > field_height
}
