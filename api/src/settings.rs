//! Camera settings and shader overrides

use crate::registry::*;
use optics::common::*;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Lowest and highest f-number a camera accepts.
pub const FSTOP_RANGE: (Float, Float) = (0.5, 64.0);

/// Largest number of aperture blades. 0 means a circular aperture.
pub const MAX_APERTURE_BLADES: u32 = 20;

/// Largest blade rotation in radians.
pub const MAX_BLADE_ROTATION: Float = 2.0 * PI;

/// Largest flare intensity.
pub const MAX_FLARE_INTENSITY: Float = 10.0;

/// Shader visualization modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DebugMode {
    /// Standard rendering.
    #[default]
    Normal,

    /// Pinhole camera without the lens.
    Pinhole,

    /// Colors rays by why they failed.
    Diagnostic,

    /// Exit ray direction as RGB.
    ExitDirection,
}

impl DebugMode {
    /// All modes in code order.
    pub const ALL: [DebugMode; 4] = [
        DebugMode::Normal,
        DebugMode::Pinhole,
        DebugMode::Diagnostic,
        DebugMode::ExitDirection,
    ];

    /// Returns the shader code.
    pub fn code(&self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Pinhole => 1,
            Self::Diagnostic => 2,
            Self::ExitDirection => 3,
        }
    }

    /// Returns the mode's name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Pinhole => "pinhole",
            Self::Diagnostic => "diagnostic",
            Self::ExitDirection => "exit_direction",
        }
    }

    /// Parse a mode from its name.
    ///
    /// * `name` - Mode name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

/// Per-camera settings as the host stores them.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    /// Selected lens identifier or index.
    pub lens: String,

    /// Working f-number.
    pub fstop: Float,

    /// Number of aperture blades; 0 for a circular aperture.
    pub aperture_blades: u32,

    /// Blade rotation in radians.
    pub blade_rotation: Float,

    /// Simulate dispersion.
    pub chromatic_aberration: bool,

    /// Render ghost reflections.
    pub ghosts: bool,

    /// Render aperture diffraction.
    pub diffraction: bool,

    /// Strength of ghosts and diffraction.
    pub flare_intensity: Float,

    /// Visualization mode.
    pub debug_mode: DebugMode,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            lens: String::new(),
            fstop: 2.0,
            aperture_blades: 0,
            blade_rotation: 0.0,
            chromatic_aberration: true,
            ghosts: false,
            diffraction: false,
            flare_intensity: 1.0,
            debug_mode: DebugMode::Normal,
        }
    }
}

impl CameraSettings {
    /// Returns the settings with every numeric value clamped to its range.
    pub fn clamped(&self) -> Self {
        Self {
            lens: self.lens.clone(),
            fstop: clamp(self.fstop, FSTOP_RANGE.0, FSTOP_RANGE.1),
            aperture_blades: self.aperture_blades.min(MAX_APERTURE_BLADES),
            blade_rotation: clamp(self.blade_rotation, 0.0, MAX_BLADE_ROTATION),
            flare_intensity: clamp(self.flare_intensity, 0.0, MAX_FLARE_INTENSITY),
            ..*self
        }
    }

    /// Switch to another lens. The f-number is raised to the lens's maximum
    /// aperture if it is faster than the lens allows. Returns the lens focal
    /// length for the host camera.
    ///
    /// * `registry` - The lens registry.
    /// * `key`      - Lens identifier or index.
    pub fn select_lens(&mut self, registry: &Registry, key: &str) -> Float {
        let lens = registry.lens(registry.resolve(key));
        self.lens = lens.id().to_string();
        if self.fstop < lens.max_f_number() {
            self.fstop = lens.max_f_number();
        }
        lens.focal_length()
    }
}

/// A value written to a host property.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Int(i32),
    Float(Float),
}

/// Receives the per-frame shader overrides.
pub trait PropertySink {
    /// Set one named property.
    ///
    /// * `name`  - Property name.
    /// * `value` - New value.
    fn set(&mut self, name: &str, value: PropertyValue);
}

impl PropertySink for BTreeMap<String, PropertyValue> {
    fn set(&mut self, name: &str, value: PropertyValue) {
        self.insert(name.to_string(), value);
    }
}

/// Shader parameters derived from camera settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShaderOverrides {
    /// Registry index of the selected lens.
    pub lens_type: i32,

    /// Number of aperture blades.
    pub aperture_blades: i32,

    /// Blade rotation in degrees.
    pub blade_rotation: Float,

    /// 1 to simulate dispersion.
    pub chromatic_aberration: i32,

    /// 1 to render ghosts.
    pub ghosts: i32,

    /// 1 to render diffraction.
    pub diffraction: i32,

    /// Strength of ghosts and diffraction.
    pub flare_intensity: Float,

    /// Visualization mode code.
    pub debug_mode: Float,

    /// Fraction of the maximum aperture in use.
    pub aperture_scale: Float,
}

impl ShaderOverrides {
    /// Compute the overrides for a camera.
    ///
    /// * `registry` - The lens registry.
    /// * `settings` - Camera settings.
    pub fn compute(registry: &Registry, settings: &CameraSettings) -> Self {
        let settings = settings.clamped();
        let index = registry.resolve(&settings.lens);
        let lens = registry.lens(index);

        Self {
            lens_type: index as i32,
            aperture_blades: settings.aperture_blades as i32,
            blade_rotation: settings.blade_rotation.to_degrees(),
            chromatic_aberration: settings.chromatic_aberration as i32,
            ghosts: settings.ghosts as i32,
            diffraction: settings.diffraction as i32,
            flare_intensity: settings.flare_intensity,
            debug_mode: settings.debug_mode.code() as Float,
            aperture_scale: min(lens.max_f_number() / settings.fstop, 1.0),
        }
    }

    /// Write every override to a property sink.
    ///
    /// * `sink` - The host property sink.
    pub fn apply(&self, sink: &mut dyn PropertySink) {
        sink.set("lens_type", PropertyValue::Int(self.lens_type));
        sink.set("aperture_blades", PropertyValue::Int(self.aperture_blades));
        sink.set("blade_rotation", PropertyValue::Float(self.blade_rotation));
        sink.set("chromatic_aberration", PropertyValue::Int(self.chromatic_aberration));
        sink.set("ghosts", PropertyValue::Int(self.ghosts));
        sink.set("diffraction", PropertyValue::Int(self.diffraction));
        sink.set("flare_intensity", PropertyValue::Float(self.flare_intensity));
        sink.set("debug_mode", PropertyValue::Float(self.debug_mode));
        sink.set("aperture_scale", PropertyValue::Float(self.aperture_scale));
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
