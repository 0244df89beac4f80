//! Errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while generating shader source.
#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("shader template has no '{0}' marker")]
    MissingMarker(&'static str),

    #[error("no lenses to generate shader data from")]
    NoLenses,

    #[error("error reading shader template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
