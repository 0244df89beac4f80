//! Batch builders

use crate::error::*;
use crate::lights::*;
use crate::registry::*;
use diagram::{render_diagram, write_png, DiagramConfig, DiagramError};
use optics::common::Float;
use rayon::prelude::*;
use shader::generate_shader;
use std::fs;
use std::path::{Path, PathBuf};
use tracer::{trace, RayPath, TraceFailure};

/// Render every lens diagram and write it to `<out_dir>/<id>.png`. Lenses
/// are rendered in parallel; the returned paths are in registry order.
///
/// * `registry` - The lens registry.
/// * `config`   - Diagram configuration.
/// * `out_dir`  - Output directory. Created if missing.
pub fn build_diagrams(
    registry: &Registry,
    config: &DiagramConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ApiError> {
    config.render_size()?;
    fs::create_dir_all(out_dir).map_err(|source| DiagramError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let paths = registry
        .lenses()
        .par_iter()
        .map(|lens| {
            let path = out_dir.join(format!("{}.png", lens.id()));
            write_png(&path, &render_diagram(lens, config)?)?;
            Ok(path)
        })
        .collect::<Result<Vec<PathBuf>, DiagramError>>()?;

    info!("Generated {} diagrams in {}", paths.len(), out_dir.display());
    Ok(paths)
}

/// Generate shader source for every lens in the registry.
///
/// * `registry`  - The lens registry.
/// * `template`  - Shader template text.
/// * `collector` - Optional scene light source.
pub fn build_shader(
    registry: &Registry,
    template: &str,
    collector: Option<&dyn LightCollector>,
) -> Result<String, ApiError> {
    let lights = collector.map(|c| select_lights(c.collect()));
    Ok(generate_shader(template, registry.lenses(), lights.as_deref())?)
}

/// Trace one meridional ray through a named lens.
///
/// * `registry` - The lens registry.
/// * `id`       - Lens identifier.
/// * `height`   - Entry height above the axis.
pub fn trace_ray(
    registry: &Registry,
    id: &str,
    height: Float,
) -> Result<Result<RayPath, TraceFailure>, ApiError> {
    let lens = registry
        .get(id)
        .ok_or_else(|| ApiError::UnknownLens(id.to_string()))?;
    Ok(trace(lens, height))
}

/// Write generated text to a file.
///
/// * `path`     - Output file.
/// * `contents` - Text to write.
pub fn write_output(path: &Path, contents: &str) -> Result<(), ApiError> {
    fs::write(path, contents).map_err(|source| ApiError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}
