//! Errors

use diagram::DiagramError;
use optics::LoadError;
use shader::ShaderError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the host.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Diagram(#[from] DiagramError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("registry has no lenses")]
    NoLenses,

    #[error("duplicate lens identifier '{0}'")]
    DuplicateId(String),

    #[error("unknown lens '{0}'")]
    UnknownLens(String),

    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
