//! Fundamental geometric types.
//!
//! Positions are top-left corners in window space: x grows to the right,
//! y grows downward.

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Signed penetration depth of `self` into `other` on each axis.
    ///
    /// Each component is the distance `self` must travel along that axis to
    /// stop overlapping; its sign points away from `other`'s center. Returns
    /// `Vec2::ZERO` when the rectangles do not overlap.
    pub fn penetration(&self, other: &Rect) -> Vec2 {
        let delta = self.center() - other.center();
        let half_sum = (self.size + other.size) * 0.5;
        let depth_x = half_sum.x - delta.x.abs();
        let depth_y = half_sum.y - delta.y.abs();

        if depth_x <= 0.0 || depth_y <= 0.0 {
            return Vec2::ZERO;
        }

        Vec2::new(
            if delta.x < 0.0 { -depth_x } else { depth_x },
            if delta.y < 0.0 { -depth_y } else { depth_y },
        )
    }
}

/// Which world edges a rectangle crosses. One bit per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundsMask(u8);

impl BoundsMask {
    pub const NONE: BoundsMask = BoundsMask(0);
    pub const LEFT: BoundsMask = BoundsMask(1 << 0);
    pub const RIGHT: BoundsMask = BoundsMask(1 << 1);
    pub const TOP: BoundsMask = BoundsMask(1 << 2);
    pub const BOTTOM: BoundsMask = BoundsMask(1 << 3);

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, side: BoundsMask) -> bool {
        self.0 & side.0 == side.0 && side.0 != 0
    }

    pub fn insert(&mut self, side: BoundsMask) {
        self.0 |= side.0;
    }

    pub fn any(&self) -> bool {
        self.0 != 0
    }
}
