//! Errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while writing diagrams.
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("diagram size {size} at {supersample}x supersampling must give a canvas of 1 to {max} pixels")]
    CanvasSize { size: u32, supersample: u32, max: u32 },

    #[error("error saving diagram {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("error creating output directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
