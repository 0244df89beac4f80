//! Shader template substitution

use crate::error::*;
use crate::lens_data::*;
use crate::lights::*;
use optics::Prescription;
use std::fs;
use std::path::Path;

/// Marker replaced with the lens data block.
pub const LENS_DATA_MARKER: &str = "// {{LENS_DATA}}";

/// Marker replaced with the scene lights block.
pub const SCENE_LIGHTS_MARKER: &str = "// {{SCENE_LIGHTS}}";

/// Read a shader template.
///
/// * `path` - Template file path.
pub fn read_template(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Substitute the generated blocks into a shader template. The lens data
/// marker is required. The scene lights marker is optional; when present
/// and no lights are given it receives an empty light list.
///
/// * `template` - Shader template text.
/// * `lenses`   - Prescriptions in registry order.
/// * `lights`   - Scene lights, already sorted and bounded.
pub fn generate_shader(
    template: &str,
    lenses: &[Prescription],
    lights: Option<&[SceneLight]>,
) -> Result<String, ShaderError> {
    if lenses.is_empty() {
        return Err(ShaderError::NoLenses);
    }
    if !template.contains(LENS_DATA_MARKER) {
        return Err(ShaderError::MissingMarker(LENS_DATA_MARKER));
    }

    let mut source = template.replace(LENS_DATA_MARKER, &generate_lens_data(lenses));
    if source.contains(SCENE_LIGHTS_MARKER) {
        let block = generate_scene_lights(lights.unwrap_or(&[]));
        source = source.replace(SCENE_LIGHTS_MARKER, &block);
    } else if lights.is_some_and(|l| !l.is_empty()) {
        debug!("Shader template has no scene lights marker; lights ignored");
    }

    info!("Generated shader source for {} lenses", lenses.len());
    Ok(source)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use optics::{LensMetadata, Surface};
    use std::io::Write;

    const TEMPLATE: &str = "shader lens_camera()\n{\n}\n\n// {{LENS_DATA}}\n\n// {{SCENE_LIGHTS}}\n";

    fn lenses() -> Vec<Prescription> {
        vec![Prescription::new(
            "singlet",
            LensMetadata::new("Singlet", 100.0, 4.0),
            vec![Surface::new(50.0, 5.0, 1.5, 30.0), Surface::stop(0.0, 20.0)],
            None,
        )
        .unwrap()]
    }

    #[test]
    fn substitutes_both_markers() {
        let lights = [SceneLight::sun([0.0, 0.0, 1.0], 2.0)];
        let source = generate_shader(TEMPLATE, &lenses(), Some(&lights)).unwrap();
        assert!(source.starts_with("shader lens_camera()\n"));
        assert!(!source.contains(LENS_DATA_MARKER));
        assert!(!source.contains(SCENE_LIGHTS_MARKER));
        assert!(source.contains("void load_lens_data("));
        assert!(source.contains("    num_lights = 1;\n"));
    }

    #[test]
    fn lights_marker_without_lights() {
        let source = generate_shader(TEMPLATE, &lenses(), None).unwrap();
        assert!(source.contains("    num_lights = 0;\n"));
    }

    #[test]
    fn lights_marker_is_optional() {
        let template = "// {{LENS_DATA}}\n";
        let source = generate_shader(template, &lenses(), None).unwrap();
        assert_eq!(source, format!("{}\n", generate_lens_data(&lenses())));
    }

    #[test]
    fn missing_lens_marker() {
        let err = generate_shader("shader x() {}\n", &lenses(), None).unwrap_err();
        assert!(matches!(err, ShaderError::MissingMarker(LENS_DATA_MARKER)));
        assert!(err.to_string().contains("{{LENS_DATA}}"));
    }

    #[test]
    fn no_lenses() {
        let err = generate_shader(TEMPLATE, &[], None).unwrap_err();
        assert!(matches!(err, ShaderError::NoLenses));
    }

    #[test]
    fn template_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEMPLATE.as_bytes()).unwrap();
        assert_eq!(read_template(file.path()).unwrap(), TEMPLATE);

        let missing = file.path().with_extension("missing");
        assert!(matches!(read_template(&missing), Err(ShaderError::Io { .. })));
    }
}
