//! Drag gesture translation
//!
//! The pointer layer reports a drag as an angle and a distance in pixels. A drag
//! of half the canvas height or more is full power; power is on a 0..=100 scale.

use glam::Vec2;

use crate::degrees_to_direction;

/// Longest useful drag, as a fraction of canvas height
pub const MAX_DRAG_FRACTION: f32 = 0.5;

/// Convert drag distance to shot power (0..=100)
pub fn power_from_drag(distance: f32, canvas_height: f32) -> f32 {
    if !(canvas_height > 0.0) {
        return 0.0;
    }
    let fraction = (distance.abs() / canvas_height).min(MAX_DRAG_FRACTION);
    fraction * (100.0 / MAX_DRAG_FRACTION)
}

/// End point of the aim preview arrow drawn from `start` while dragging
pub fn aim_arrow_tip(start: Vec2, angle_deg: f32, power: f32) -> Vec2 {
    start - degrees_to_direction(angle_deg) * power
}
