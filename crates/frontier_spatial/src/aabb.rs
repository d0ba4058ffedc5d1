//! Axis-aligned bounding squares.

use glam::Vec2;

/// An axis-aligned bounding square described by its center and half extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Center of the square.
    pub center: Vec2,
    /// Half the side length.
    pub half_extent: f32,
}

impl Aabb {
    /// Creates a square centered at `center` spanning `half_extent` on each
    /// side of it.
    #[must_use]
    pub fn new(center: Vec2, half_extent: f32) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.half_extent)
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.half_extent)
    }

    /// Returns `true` if the point lies inside the square. Bounds are closed:
    /// a point exactly on an edge is contained.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Returns `true` if the squares overlap. Bounds are closed: squares that
    /// share only an edge still intersect, so a query region touching a node
    /// boundary recurses into that node.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }
}
