//! Diagram
//!
//! Rasterized lens cross-sections used as preview icons.

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod image_io;
pub mod raster;
pub mod render;

// Re-export.
pub use config::*;
pub use error::*;
pub use image_io::*;
pub use render::*;
