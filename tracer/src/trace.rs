//! Sequential Ray Tracing

use crate::interface::*;
use optics::common::*;
use optics::geometry::*;
use optics::layout::*;
use optics::{Prescription, Surface};
use std::fmt;

/// Reason a ray did not make it through the surface stack. These are
/// expected geometric outcomes, not errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceFailure {
    /// The ray does not reach the surface.
    NoIntersection { surface: usize },

    /// The ray hits the surface outside its clear aperture.
    Vignetted { surface: usize },

    /// No transmitted ray exists at the surface.
    TotalInternalReflection { surface: usize },
}

impl TraceFailure {
    /// Returns the index of the surface where the ray was lost.
    pub fn surface(&self) -> usize {
        match self {
            Self::NoIntersection { surface }
            | Self::Vignetted { surface }
            | Self::TotalInternalReflection { surface } => *surface,
        }
    }
}

impl fmt::Display for TraceFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoIntersection { surface } => write!(f, "no intersection at surface {surface}"),
            Self::Vignetted { surface } => write!(f, "vignetted at surface {surface}"),
            Self::TotalInternalReflection { surface } => {
                write!(f, "total internal reflection at surface {surface}")
            }
        }
    }
}

/// Tracing parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceConfig {
    /// Length of the segment drawn past the last surface as a fraction of
    /// the axial length.
    pub extension_fraction: Float,

    /// Lower bound on the exit segment length.
    pub min_extension: Float,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            extension_fraction: 0.3,
            min_extension: 1.0,
        }
    }
}

/// A ray that made it through every surface.
#[derive(Clone, Debug, PartialEq)]
pub struct RayPath {
    /// Starting point in front of the first surface.
    pub origin: Point2f,

    /// Intersection points in surface order.
    pub hits: Vec<Point2f>,

    /// End of the exit segment past the last surface.
    pub exit: Point2f,
}

impl RayPath {
    /// Returns the origin, every hit and the exit point in order.
    pub fn polyline(&self) -> Vec<Point2f> {
        let mut points = Vec::with_capacity(self.hits.len() + 2);
        points.push(self.origin);
        points.extend(self.hits.iter().copied());
        points.push(self.exit);
        points
    }

    /// Returns the direction of the ray after the last surface.
    pub fn exit_direction(&self) -> Vector2f {
        let last = self.hits.last().copied().unwrap_or(self.origin);
        (self.exit - last).normalize()
    }
}

/// Trace a ray parallel to the axis at height `y0` through a prescription.
///
/// * `prescription` - The lens.
/// * `y0`           - Height above the axis.
pub fn trace(prescription: &Prescription, y0: Float) -> Result<RayPath, TraceFailure> {
    trace_surfaces(prescription.surfaces(), y0, &TraceConfig::default())
}

/// Trace a ray parallel to the axis at height `y0` through a sequence of
/// surfaces. The first vertex sits at x = 0 and the medium in front of the
/// first surface is air.
///
/// * `surfaces` - Surfaces in optical order.
/// * `y0`       - Height above the axis.
/// * `config`   - Tracing parameters.
pub fn trace_surfaces(
    surfaces: &[Surface],
    y0: Float,
    config: &TraceConfig,
) -> Result<RayPath, TraceFailure> {
    if surfaces.is_empty() {
        return Err(TraceFailure::NoIntersection { surface: 0 });
    }

    let vertices = vertex_positions(surfaces);

    // Start far enough back that every profile lies ahead of the ray.
    let origin = Point2f::new(vertices[0] - (max_semi_aperture(surfaces) + 1.0), y0);
    let mut ray = Ray2f::new(origin, Vector2f::new(1.0, 0.0));
    let mut n1 = 1.0;
    let mut hits = Vec::with_capacity(surfaces.len());

    for (i, (surface, &vertex_x)) in surfaces.iter().zip(vertices.iter()).enumerate() {
        let (p, n) = intersect(surface, vertex_x, &ray).ok_or_else(|| {
            trace!("ray y0={y0} misses surface {i}");
            TraceFailure::NoIntersection { surface: i }
        })?;

        if p.y.abs() > surface.semi_aperture() {
            trace!("ray y0={y0} vignetted at surface {i}");
            return Err(TraceFailure::Vignetted { surface: i });
        }

        let n2 = surface.ior;
        let d = if n1 == n2 {
            ray.d
        } else {
            refract(&ray.d, &n, n1 / n2).ok_or_else(|| {
                trace!("ray y0={y0} totally internally reflected at surface {i}");
                TraceFailure::TotalInternalReflection { surface: i }
            })?
        };

        hits.push(p);
        ray = Ray2f::new(p, d);
        n1 = n2;
    }

    let extension = max(
        config.min_extension,
        config.extension_fraction * axial_length(surfaces),
    );
    Ok(RayPath {
        origin,
        hits,
        exit: ray.at(extension),
    })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
