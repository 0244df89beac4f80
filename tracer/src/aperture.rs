//! Aperture Resolver

use itertools::Itertools;
use optics::common::*;
use optics::Surface;

/// Aperture resolver parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Number of bisection steps.
    pub iterations: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { iterations: 50 }
    }
}

/// A surface together with the axial position of its vertex.
#[derive(Copy, Clone, Debug)]
pub struct PlacedSurface<'a> {
    /// The surface.
    pub surface: &'a Surface,

    /// Axial position of the vertex.
    pub vertex_x: Float,
}

impl<'a> PlacedSurface<'a> {
    /// Create a new `PlacedSurface`.
    ///
    /// * `surface`  - The surface.
    /// * `vertex_x` - Axial position of the vertex.
    pub fn new(surface: &'a Surface, vertex_x: Float) -> Self {
        Self { surface, vertex_x }
    }

    /// Returns the axial position of the profile at height `h`.
    ///
    /// * `h` - Transverse height.
    #[inline]
    pub fn x_at(&self, h: Float) -> Float {
        self.surface.profile_x(self.vertex_x, h)
    }
}

/// Returns true when `front` does not protrude past `back` at height `h`.
fn is_ordered(front: &PlacedSurface, back: &PlacedSurface, h: Float) -> bool {
    front.x_at(h) <= back.x_at(h)
}

/// Returns the largest height at which the front profile stays behind the
/// back profile, or `None` if the two are ordered at the smaller nominal
/// semi-aperture already. The returned height always satisfies the ordering
/// unless the profiles already cross on the axis, in which case 0 is
/// returned.
///
/// * `front`      - The surface nearer the object side.
/// * `back`       - The next surface.
/// * `iterations` - Number of bisection steps.
pub fn max_common_aperture(
    front: &PlacedSurface,
    back: &PlacedSurface,
    iterations: usize,
) -> Option<Float> {
    let limit = min(front.surface.semi_aperture(), back.surface.semi_aperture());
    if is_ordered(front, back, limit) {
        return None;
    }

    let (mut lo, mut hi) = (0.0, limit);
    for _ in 0..iterations {
        let mid = 0.5 * (lo + hi);
        if is_ordered(front, back, mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    debug!("profiles cross, clamping semi-aperture {limit} to {lo}");
    Some(lo)
}

/// Returns the semi-apertures of two adjacent surfaces after clamping them
/// to their common non-crossing height.
///
/// * `front`  - The surface nearer the object side.
/// * `back`   - The next surface.
/// * `config` - Resolver parameters.
pub fn resolve_pair(
    front: &PlacedSurface,
    back: &PlacedSurface,
    config: &ResolverConfig,
) -> (Float, Float) {
    let front_ap = front.surface.semi_aperture();
    let back_ap = back.surface.semi_aperture();
    match max_common_aperture(front, back, config.iterations) {
        Some(h) => (min(front_ap, h), min(back_ap, h)),
        None => (front_ap, back_ap),
    }
}

/// Returns the drawable semi-aperture of every surface. Each pair of
/// neighbours is resolved independently from nominal apertures and a surface
/// keeps the smallest value imposed on it. Pairs involving a stop are left
/// alone.
///
/// * `surfaces` - Surfaces in optical order.
/// * `vertices` - Axial vertex positions.
/// * `config`   - Resolver parameters.
pub fn effective_semi_apertures(
    surfaces: &[Surface],
    vertices: &[Float],
    config: &ResolverConfig,
) -> Vec<Float> {
    let mut apertures: Vec<Float> = surfaces.iter().map(|s| s.semi_aperture()).collect();

    for (i, ((a, xa), (b, xb))) in surfaces
        .iter()
        .zip(vertices.iter().copied())
        .tuple_windows()
        .enumerate()
    {
        if a.is_stop() || b.is_stop() {
            continue;
        }

        let (front_ap, back_ap) =
            resolve_pair(&PlacedSurface::new(a, xa), &PlacedSurface::new(b, xb), config);
        apertures[i] = min(apertures[i], front_ap);
        apertures[i + 1] = min(apertures[i + 1], back_ap);
    }

    apertures
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
