//! 2D Axis Aligned Bounding Boxes.

use crate::common::*;
use crate::geometry::*;

/// 2D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds2f {
    /// Minimum bounds.
    pub p_min: Point2f,

    /// Maximum bounds.
    pub p_max: Point2f,
}

impl Bounds2f {
    /// Creates a new 2D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2f, p2: Point2f) -> Self {
        Self {
            p_min: Point2f::new(min(p1.x, p2.x), min(p1.y, p2.y)),
            p_max: Point2f::new(max(p1.x, p2.x), max(p1.y, p2.y)),
        }
    }

    /// Returns true if a point is inside the bounding box (boundary included).
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point2f) -> bool {
        p.x >= self.p_min.x && p.x <= self.p_max.x && p.y >= self.p_min.y && p.y <= self.p_max.y
    }

    /// Clips the segment `p0`-`p1` against the box using the Liang-Barsky
    /// parametric test and returns the visible part, if any.
    ///
    /// * `p0` - Start of the segment.
    /// * `p1` - End of the segment.
    pub fn clip_segment(&self, p0: Point2f, p1: Point2f) -> Option<(Point2f, Point2f)> {
        let d = p1 - p0;
        let mut t0: Float = 0.0;
        let mut t1: Float = 1.0;

        let edges = [
            (-d.x, p0.x - self.p_min.x),
            (d.x, self.p_max.x - p0.x),
            (-d.y, p0.y - self.p_min.y),
            (d.y, self.p_max.y - p0.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                // Parallel to this edge; reject when outside.
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    t0 = max(t0, r);
                } else {
                    t1 = min(t1, r);
                }
                if t0 > t1 {
                    return None;
                }
            }
        }

        Some((p0 + d * t0, p0 + d * t1))
    }
}
