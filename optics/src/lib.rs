//! Optics
//!
//! Lens prescriptions: the surface model, structured lens records, and the
//! loader that validates them.

#[macro_use]
extern crate log;

pub mod common;
pub mod error;
pub mod fileutil;
pub mod geometry;
pub mod layout;
pub mod loader;
pub mod prescription;
pub mod record;
pub mod surface;

// Re-export.
pub use common::Float;
pub use error::*;
pub use loader::*;
pub use prescription::*;
pub use surface::*;
