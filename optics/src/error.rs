//! Errors

use crate::common::*;
use crate::surface::SurfaceType;
use std::path::PathBuf;
use thiserror::Error;

/// A broken prescription invariant. Surface indices are zero-based in optical
/// order.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Violation {
    #[error("prescription has no surfaces")]
    NoSurfaces,

    #[error("{count} surfaces exceeds MAX_SURFACES ({max})")]
    TooManySurfaces { count: usize, max: usize },

    #[error("no surface has type 'stop'")]
    NoStop,

    #[error("surfaces {indices:?} all have type 'stop'; exactly one is allowed")]
    MultipleStops { indices: Vec<usize> },

    #[error("surface {surface}: {field} must be finite, found {value}")]
    NonFinite {
        surface: usize,
        field: &'static str,
        value: Float,
    },

    #[error("surface {surface}: stop must have radius 0, found {radius}")]
    StopRadius { surface: usize, radius: Float },

    #[error("surface {surface}: aspheric surface requires a non-zero radius")]
    AsphericRadius { surface: usize },

    #[error("surface {surface}: aspheric_coeffs must hold 3 or 4 values, found {count}")]
    AsphericCoefficients { surface: usize, count: usize },

    #[error("surface {surface}: {surface_type} surface requires a non-zero radius")]
    CylindricalRadius {
        surface: usize,
        surface_type: SurfaceType,
    },

    #[error("surface {surface}: {surface_type} surface must not carry conic or aspheric_coeffs")]
    UnexpectedProfile {
        surface: usize,
        surface_type: SurfaceType,
    },

    #[error("surface {surface}: unknown type '{value}'")]
    UnknownSurfaceType { surface: usize, value: String },

    #[error("unknown coating '{0}'; expected none, single or multi")]
    UnknownCoating(String),

    #[error("stop_index {index} is out of range for {count} surfaces")]
    StopIndexOutOfRange { index: i64, count: usize },

    #[error("stop_index {index} names a surface of type '{surface_type}'")]
    StopIndexConflict {
        index: usize,
        surface_type: SurfaceType,
    },

    #[error("focus close_distance must be positive, found {0}")]
    FocusDistance(Float),

    #[error("focus variable references surface {surface}, out of range for {count} surfaces")]
    FocusSurfaceOutOfRange { surface: i64, count: usize },

    #[error("focus variable references surface {surface} which is not an air gap (ior {ior})")]
    FocusNotAirGap { surface: usize, ior: Float },

    #[error("more than one focus variable references surface {surface}")]
    FocusDuplicate { surface: usize },

    #[error("focus variable for surface {surface} needs a finite, non-negative thickness_close, found {thickness}")]
    FocusNegativeThickness { surface: usize, thickness: Float },
}

/// Errors that abort loading a lens directory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{id}: {source}")]
    Parse {
        id: String,
        source: toml::de::Error,
    },

    #[error("{id}: {violation}")]
    Invalid { id: String, violation: Violation },

    #[error("no .toml lens files found in {}", path.display())]
    Empty { path: PathBuf },
}

impl LoadError {
    /// Returns the source identifier the error refers to, if any.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::Parse { id, .. } | Self::Invalid { id, .. } => Some(id),
            _ => None,
        }
    }
}
