//! Overlap tests for axis-aligned entities
//!
//! Everything in the playfield is either an axis-aligned rectangle (ships,
//! bullets, enemies) or a circle (enemy bullets, power-ups). Overlap is
//! strict: exact edge contact does not count, so two entities that merely
//! touch pass each other untouched.

use glam::Vec2;

/// An axis-aligned rectangle stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }
}

/// Strict rectangle/rectangle overlap
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Circle/rectangle overlap via closest-point clamping.
///
/// The circle intersects if the squared distance from its center to the
/// nearest point on the rectangle is strictly less than its squared radius.
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = center.clamp(rect.min(), rect.max());
    (center - closest).length_squared() < radius * radius
}
