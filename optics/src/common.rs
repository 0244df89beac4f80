//! Common

use num_traits::Num;
use std::ops::{Add, Mul};

/// Lens data is specified in millimetres with up to ~6 significant digits and
/// the aperture resolver bisects down to sub-micron heights, so use 64-bit
/// precision for floating point numbers.
pub type Float = f64;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// Minimum ray parameter accepted as a forward intersection.
pub const RAY_EPSILON: Float = 1e-9;

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps a value to the closed interval [low, high].
///
/// * `val`  - The value.
/// * `low`  - Lower bound.
/// * `high` - Upper bound.
#[inline(always)]
pub fn clamp<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Solves quadratic equations.
pub struct Quadratic {}

impl Quadratic {
    /// Solve the quadratic equation a * x ^ 2  + b * x + c = 0. The roots are
    /// returned in ascending order. Returns `None` when the discriminant is
    /// negative or the equation is degenerate.
    ///
    /// * `a` - Coefficient of x ^ 2 term.
    /// * `b` - Coefficient of x term.
    /// * `c` - Coefficient of constant term.
    pub fn solve(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
        // Find quadratic discriminant
        let discrim = b * b - 4.0 * a * c;
        if discrim < 0.0 || a == 0.0 {
            return None;
        }
        let root_discrim = discrim.sqrt();

        // Compute quadratic _t_ values using the numerically stable form.
        let q = if b < 0.0 {
            -0.5 * (b - root_discrim)
        } else {
            -0.5 * (b + root_discrim)
        };

        let t0 = q / a;
        let t1 = if q != 0.0 { c / q } else { t0 };

        if t0 > t1 {
            Some((t1, t0))
        } else {
            Some((t0, t1))
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
