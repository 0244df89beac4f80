//! Rays

use crate::common::*;
use crate::geometry::*;

/// A semi-infinite line in the lens cross-section.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray2f {
    /// Origin.
    pub o: Point2f,

    /// Direction.
    pub d: Vector2f,
}

impl Ray2f {
    /// Creates a new ray.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn new(o: Point2f, d: Vector2f) -> Self {
        Self { o, d }
    }

    /// Returns the position along the ray at parameter `t`.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> Point2f {
        self.o + self.d * t
    }
}
