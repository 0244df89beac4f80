//! File Utility Functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Returns the files in `dir` with the given extension, sorted by file name.
/// Subdirectories are not searched.
///
/// * `dir`       - The directory.
/// * `extension` - Extension without the leading period.
pub fn files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut paths = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |e| e == extension) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Returns the file stem used as a stable source identifier.
///
/// * `path` - The path.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
