//! Shader
//!
//! Serializes prescriptions and scene lights into shading-language source
//! and splices them into a shader template.

#[macro_use]
extern crate log;

pub mod error;
pub mod lens_data;
pub mod lights;
pub mod literal;
pub mod template;

// Re-export.
pub use error::*;
pub use lens_data::*;
pub use lights::*;
pub use template::*;
