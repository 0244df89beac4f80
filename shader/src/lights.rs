//! Scene lights block

use crate::literal::float_literal;
use optics::common::Float;

/// Maximum number of lights passed to the shader.
pub const MAX_LIGHTS: usize = 16;

/// Kind of light as seen by the lens shader.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// A light with a position and a finite radius.
    Positional,

    /// A light at infinity described by a direction.
    Sun,
}

impl LightKind {
    /// Returns the shader type code.
    pub fn code(&self) -> i32 {
        match self {
            Self::Positional => 0,
            Self::Sun => 1,
        }
    }
}

/// A light in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneLight {
    /// Kind of light.
    pub kind: LightKind,

    /// World-space position in metres. Unused for sun lights.
    pub position: [Float; 3],

    /// World-space direction toward the source. Unused for positional
    /// lights.
    pub direction: [Float; 3],

    /// Luminous intensity.
    pub intensity: Float,

    /// Source radius in millimetres.
    pub radius: Float,
}

impl SceneLight {
    /// Create a positional light.
    ///
    /// * `position`  - World-space position.
    /// * `intensity` - Luminous intensity.
    /// * `radius`    - Source radius.
    pub fn positional(position: [Float; 3], intensity: Float, radius: Float) -> Self {
        Self {
            kind: LightKind::Positional,
            position,
            direction: [0.0; 3],
            intensity,
            radius,
        }
    }

    /// Create a sun light.
    ///
    /// * `direction` - World-space direction toward the sun.
    /// * `intensity` - Luminous intensity.
    pub fn sun(direction: [Float; 3], intensity: Float) -> Self {
        Self {
            kind: LightKind::Sun,
            position: [0.0; 3],
            direction,
            intensity,
            radius: 0.0,
        }
    }
}

/// Generate the `load_scene_lights()` function. Lights past `MAX_LIGHTS`
/// are dropped.
///
/// * `lights` - Lights in the order the shader should see them.
pub fn generate_scene_lights(lights: &[SceneLight]) -> String {
    if lights.len() > MAX_LIGHTS {
        warn!("Dropping {} lights past the limit of {MAX_LIGHTS}", lights.len() - MAX_LIGHTS);
    }
    let lights = &lights[..lights.len().min(MAX_LIGHTS)];

    let mut out = String::new();
    out.push_str(&format!("#define MAX_LIGHTS {MAX_LIGHTS}\n"));
    out.push_str(&format!("#define MAX_LIGHTS_3 {}\n", MAX_LIGHTS * 3));
    out.push('\n');
    out.push_str(
        "void load_scene_lights(\n\
         \x20   output int num_lights,\n\
         \x20   output int light_types[MAX_LIGHTS],\n\
         \x20   output float light_pos[MAX_LIGHTS_3],\n\
         \x20   output float light_dir[MAX_LIGHTS_3],\n\
         \x20   output float light_intensity[MAX_LIGHTS],\n\
         \x20   output float light_radius[MAX_LIGHTS])\n\
         {\n",
    );
    out.push_str(&format!("    num_lights = {};\n", lights.len()));

    for (i, light) in lights.iter().enumerate() {
        out.push_str(&format!("    light_types[{i}] = {};\n", light.kind.code()));
        out.push_str(&format!("    {}\n", vec3_assignment("light_pos", i, &light.position)));
        out.push_str(&format!("    {}\n", vec3_assignment("light_dir", i, &light.direction)));
        out.push_str(&format!("    light_intensity[{i}] = {};\n", float_literal(light.intensity)));
        out.push_str(&format!("    light_radius[{i}] = {};\n", float_literal(light.radius)));
    }

    out.push_str("}\n");
    out
}

/// Returns the three assignments of a flattened vector array entry.
fn vec3_assignment(name: &str, i: usize, v: &[Float; 3]) -> String {
    v.iter()
        .enumerate()
        .map(|(k, c)| format!("{name}[{}] = {};", 3 * i + k, float_literal(*c)))
        .collect::<Vec<_>>()
        .join("  ")
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
