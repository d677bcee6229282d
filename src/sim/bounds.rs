//! Axis-aligned rectangle geometry
//!
//! Every entity's hitbox is a rectangle derived from its center and a fixed
//! size. Edges touching the playfield border still count as inside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// An axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The whole playfield
    pub fn playfield() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Per-axis containment against the playfield: (horizontal, vertical)
    pub fn check_bound(&self) -> (bool, bool) {
        let horizontal = self.min.x >= 0.0 && self.max.x <= PLAYFIELD_WIDTH;
        let vertical = self.min.y >= 0.0 && self.max.y <= PLAYFIELD_HEIGHT;
        (horizontal, vertical)
    }

    /// True when the rectangle lies fully within the playfield
    #[inline]
    pub fn is_inside_playfield(&self) -> bool {
        self.check_bound() == (true, true)
    }
}

/// Size of the axis-aligned box enclosing a `size` rectangle rotated by `degrees`
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
