//! Prescription loader

use crate::error::LoadError;
use crate::fileutil::*;
use crate::prescription::Prescription;
use crate::record::LensFile;
use std::fs;
use std::path::Path;

/// Parse and validate one lens record.
///
/// * `id`     - Source identifier.
/// * `source` - TOML text.
pub fn parse_prescription(id: &str, source: &str) -> Result<Prescription, LoadError> {
    let file: LensFile = toml::from_str(source).map_err(|source| LoadError::Parse {
        id: id.to_string(),
        source,
    })?;

    file.into_prescription(id).map_err(|violation| LoadError::Invalid {
        id: id.to_string(),
        violation,
    })
}

/// Load one lens file. The file stem is the source identifier.
///
/// * `path` - Path to the `.toml` file.
pub fn load_file(path: &Path) -> Result<Prescription, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_prescription(&file_stem(path), &source)
}

/// Load every `.toml` lens file in a directory, sorted by file name. Any
/// invalid file fails the whole load.
///
/// * `lens_dir` - Directory containing the lens files.
pub fn load_all(lens_dir: &Path) -> Result<Vec<Prescription>, LoadError> {
    let paths = files_with_extension(lens_dir, "toml").map_err(|source| LoadError::Io {
        path: lens_dir.to_path_buf(),
        source,
    })?;

    let mut lenses = Vec::with_capacity(paths.len());
    for path in paths.iter() {
        let lens = load_file(path)?;
        info!(
            "Loaded lens '{}' ({}) with {} surfaces",
            lens.id(),
            lens.name(),
            lens.surfaces().len()
        );
        lenses.push(lens);
    }

    info!("Loaded {} lenses from {}", lenses.len(), lens_dir.display());
    Ok(lenses)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
