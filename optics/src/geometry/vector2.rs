//! 2-D Vectors

use crate::common::*;
use num_traits::Num;
use std::ops::{Add, Mul, Neg, Sub};

/// A 2-D vector containing numeric values. In the lens cross-section `x` runs
/// along the optical axis and `y` is the transverse height.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D vector containing `Float` values.
pub type Vector2f = Vector2<Float>;

impl<T: Num> Vector2<T> {
    /// Creates a new 2-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn dot(&self, other: &Self) -> T
    where
        T: Copy,
    {
        self.x * other.x + self.y * other.y
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T
    where
        T: Copy,
    {
        self.x * self.x + self.y * self.y
    }

    /// Returns the vector's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns a unit vector in the same direction. A zero vector is returned
    /// unchanged.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        let l = self.length();
        if l == T::zero() {
            *self
        } else {
            let f = T::one() / l;
            Self::new(self.x * f, self.y * f)
        }
    }

    /// Returns a vector oriented so that it lies in the hemisphere opposite
    /// to `v`.
    ///
    /// * `v` - The reference vector.
    pub fn face_against(&self, v: &Self) -> Self
    where
        T: Neg<Output = T> + PartialOrd + Copy,
    {
        if self.dot(v) > T::zero() {
            Self::new(-self.x, -self.y)
        } else {
            *self
        }
    }
}

impl<T: Num> Add for Vector2<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num> Sub for Vector2<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Num + Copy> Mul<T> for Vector2<T> {
    type Output = Self;

    /// Scale the vector.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(self.x * f, self.y * f)
    }
}

impl Mul<Vector2f> for Float {
    type Output = Vector2f;

    fn mul(self, v: Vector2f) -> Self::Output {
        Vector2f::new(self * v.x, self * v.y)
    }
}
