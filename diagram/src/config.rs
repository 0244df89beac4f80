//! Diagram Configuration

use crate::error::DiagramError;
use image::Rgba;
use optics::common::Float;
use tracer::{ResolverConfig, TraceConfig};

/// Largest supersampled canvas edge in pixels.
pub const MAX_CANVAS_SIZE: u32 = u16::MAX as u32;

/// Colors used for each kind of mark.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Translucent fill for glass.
    pub glass_fill: Rgba<u8>,

    /// Element outlines and air-facing surfaces.
    pub surface: Rgba<u8>,

    /// Interior surfaces of cemented groups.
    pub cemented: Rgba<u8>,

    /// Aperture stop marker.
    pub stop: Rgba<u8>,

    /// Optical axis.
    pub axis: Rgba<u8>,

    /// Sample rays.
    pub ray: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            glass_fill: Rgba([128, 179, 230, 89]),
            surface: Rgba([217, 217, 217, 255]),
            cemented: Rgba([166, 166, 166, 153]),
            stop: Rgba([217, 217, 217, 255]),
            axis: Rgba([128, 128, 128, 89]),
            ray: Rgba([255, 176, 64, 140]),
        }
    }
}

/// Diagram layout and sampling parameters. Lengths are in output pixels and
/// are scaled by the supersampling factor while rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramConfig {
    /// Width and height of the output image.
    pub size: u32,

    /// Internal supersampling factor.
    pub supersample: u32,

    /// Padding around the drawing area.
    pub padding: Float,

    /// Smallest vertical padding used for wide, short systems.
    pub min_padding: Float,

    /// Aperture-to-length ratio above which vertical padding shrinks.
    pub aspect_threshold: Float,

    /// Sample ray heights as fractions of the stop semi-aperture.
    pub ray_fractions: Vec<Float>,

    /// Number of segments per surface arc.
    pub arc_steps: usize,

    /// Depth of the stop notch as a fraction of the stop semi-aperture.
    pub stop_notch: Float,

    /// Colors.
    pub palette: Palette,

    /// Aperture resolver parameters.
    pub resolver: ResolverConfig,

    /// Sample ray tracing parameters.
    pub trace: TraceConfig,
}

impl DiagramConfig {
    /// Returns the edge length of the supersampled canvas. Fails when the
    /// size is 0 or the canvas would be larger than `MAX_CANVAS_SIZE`.
    pub fn render_size(&self) -> Result<u16, DiagramError> {
        self.size
            .checked_mul(self.supersample())
            .filter(|&n| n > 0)
            .and_then(|n| u16::try_from(n).ok())
            .ok_or(DiagramError::CanvasSize {
                size: self.size,
                supersample: self.supersample(),
                max: MAX_CANVAS_SIZE,
            })
    }

    /// Returns the supersampling factor, at least 1.
    pub fn supersample(&self) -> u32 {
        self.supersample.max(1)
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            size: 256,
            supersample: 2,
            padding: 24.0,
            min_padding: 8.0,
            aspect_threshold: 1.2,
            ray_fractions: vec![-0.7, -0.5, -0.35, 0.35, 0.5, 0.7],
            arc_steps: 64,
            stop_notch: 0.15,
            palette: Palette::default(),
            resolver: ResolverConfig::default(),
            trace: TraceConfig::default(),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
