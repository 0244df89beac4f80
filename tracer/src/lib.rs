//! Tracer
//!
//! Sequential ray tracing through a lens cross-section and the aperture
//! resolver used to keep drawn surface silhouettes consistent.

#[macro_use]
extern crate log;

pub mod aperture;
pub mod interface;
pub mod trace;

// Re-export.
pub use aperture::*;
pub use trace::*;
