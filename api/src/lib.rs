//! The API
//!
//! Host-facing glue: the lens registry, selector choices, camera settings
//! mapped to shader overrides, scene light selection and batch builders.

#[macro_use]
extern crate log;

mod build;
mod choices;
mod error;
mod lights;
mod registry;
mod settings;

// Re-export.
pub use build::*;
pub use choices::*;
pub use error::*;
pub use lights::*;
pub use registry::*;
pub use settings::*;
