//! Geometry

mod bounds2;
mod point2;
mod ray;
mod vector2;

// Re-export
pub use bounds2::*;
pub use point2::*;
pub use ray::*;
pub use vector2::*;
