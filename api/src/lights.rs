//! Scene light selection

use optics::common::Float;
use shader::{SceneLight, MAX_LIGHTS};

/// Supplies the lights of the host scene in world space.
pub trait LightCollector {
    /// Returns every light the host knows about, in any order.
    fn collect(&self) -> Vec<SceneLight>;
}

impl<F> LightCollector for F
where
    F: Fn() -> Vec<SceneLight>,
{
    fn collect(&self) -> Vec<SceneLight> {
        self()
    }
}

/// Returns the brightest lights, at most `MAX_LIGHTS` of them, sorted by
/// descending intensity. Lights of equal intensity keep their order.
///
/// * `lights` - Collected lights.
pub fn select_lights(mut lights: Vec<SceneLight>) -> Vec<SceneLight> {
    lights.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
    lights.truncate(MAX_LIGHTS);
    lights
}

/// Returns the relative luminance of a linear RGB color.
///
/// * `rgb` - Linear RGB components.
pub fn luminance(rgb: [Float; 3]) -> Float {
    0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2]
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
