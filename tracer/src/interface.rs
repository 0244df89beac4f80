//! Ray-interface interactions

use optics::common::*;
use optics::geometry::*;
use optics::surface::*;

/// Maximum Newton steps when refining an aspheric intersection.
const ASPHERIC_MAX_STEPS: usize = 32;

/// Axial convergence tolerance for aspheric intersections.
const ASPHERIC_TOLERANCE: Float = 1e-9;

/// Returns the intersection of a ray with a surface whose vertex sits at
/// `vertex_x`, along with the unit normal facing against the ray.
///
/// * `surface`  - The surface.
/// * `vertex_x` - Axial position of the vertex.
/// * `ray`      - The ray. Its direction must be normalized.
pub fn intersect(surface: &Surface, vertex_x: Float, ray: &Ray2f) -> Option<(Point2f, Vector2f)> {
    if surface.is_planar() {
        intersect_planar(vertex_x, ray)
    } else if surface.surface_type == SurfaceType::Aspheric {
        intersect_aspheric(surface, vertex_x, ray)
    } else {
        intersect_spherical(surface.radius, vertex_x, ray)
    }
}

/// Intersect a ray with the plane `x = vertex_x`.
///
/// * `vertex_x` - Axial position of the plane.
/// * `ray`      - The ray.
pub fn intersect_planar(vertex_x: Float, ray: &Ray2f) -> Option<(Point2f, Vector2f)> {
    if ray.d.x.abs() < RAY_EPSILON {
        return None;
    }

    let t = (vertex_x - ray.o.x) / ray.d.x;
    if t < -RAY_EPSILON {
        return None;
    }

    let n = Vector2f::new(-1.0, 0.0).face_against(&ray.d);
    Some((ray.at(max(t, 0.0)), n))
}

/// Intersect a ray with a circular arc of signed radius `radius` whose vertex
/// sits at `vertex_x`. Of the forward roots, the one closest to the vertex is
/// used.
///
/// * `radius`   - Signed radius of curvature.
/// * `vertex_x` - Axial position of the vertex.
/// * `ray`      - The ray.
pub fn intersect_spherical(radius: Float, vertex_x: Float, ray: &Ray2f) -> Option<(Point2f, Vector2f)> {
    // Compute `t0` and `t1` for ray-circle intersection.
    let center = Point2f::new(vertex_x + radius, 0.0);
    let o = ray.o - center;
    let a = ray.d.dot(&ray.d);
    let b = 2.0 * ray.d.dot(&o);
    let c = o.dot(&o) - radius * radius;
    let (t0, t1) = Quadratic::solve(a, b, c)?;

    let p = [t0, t1]
        .into_iter()
        .filter(|&t| t > RAY_EPSILON)
        .map(|t| ray.at(t))
        .min_by(|p0, p1| (p0.x - vertex_x).abs().total_cmp(&(p1.x - vertex_x).abs()))?;

    // Outward normal of the circle, turned to face the incoming ray.
    let n = ((p - center) * (1.0 / radius.abs())).face_against(&ray.d);
    Some((p, n))
}

/// Intersect a ray with an aspheric profile. The base sphere gives the
/// starting point and Newton iteration on the sag equation refines it.
///
/// * `surface`  - The aspheric surface.
/// * `vertex_x` - Axial position of the vertex.
/// * `ray`      - The ray.
pub fn intersect_aspheric(surface: &Surface, vertex_x: Float, ray: &Ray2f) -> Option<(Point2f, Vector2f)> {
    let start = intersect_spherical(surface.radius, vertex_x, ray)
        .or_else(|| intersect_planar(vertex_x, ray))?
        .0;
    let mut t = (start - ray.o).dot(&ray.d);

    let mut converged = false;
    for _ in 0..ASPHERIC_MAX_STEPS {
        let p = ray.at(t);
        let f = p.x - surface.profile_x(vertex_x, p.y);
        if f.abs() < ASPHERIC_TOLERANCE {
            converged = true;
            break;
        }
        let df = ray.d.x - surface.sag_slope(p.y) * ray.d.y;
        if df.abs() < RAY_EPSILON {
            return None;
        }
        t -= f / df;
    }
    if !converged || t < -RAY_EPSILON {
        return None;
    }

    let p = ray.at(t);
    let n = Vector2f::new(1.0, -surface.sag_slope(p.y))
        .normalize()
        .face_against(&ray.d);
    Some((p, n))
}

/// Computes the direction of a ray refracted at an interface using Snell's
/// law. Returns `None` on total internal reflection.
///
/// * `d`   - Normalized incident direction.
/// * `n`   - Unit normal facing against `d`.
/// * `eta` - Ratio of indices n1 / n2.
pub fn refract(d: &Vector2f, n: &Vector2f, eta: Float) -> Option<Vector2f> {
    // Compute cos(theta_t) using Snell's law
    let cos_theta_i = -n.dot(d);
    let sin_2_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i);
    let sin_2_theta_t = eta * eta * sin_2_theta_i;

    // Handle total internal reflection for transmission.
    if sin_2_theta_t > 1.0 {
        None
    } else {
        let cos_theta_t = (1.0 - sin_2_theta_t).sqrt();
        Some((eta * *d + (eta * cos_theta_i - cos_theta_t) * *n).normalize())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
