//! Structured lens records
//!
//! One TOML document per lens:
//!
//! ```toml
//! [lens]
//! name = "Double Gauss 50mm"
//! focal_length = 50.0
//! max_fstop = 2.0
//! coating = "multi"
//!
//! [[surface]]
//! radius = 29.475
//! thickness = 3.76
//! ior = 1.67
//! aperture = 25.2
//! abbe_v = 47.1
//!
//! [focus]
//! close_distance = 450.0
//!
//! [[focus.variable]]
//! surface = 9
//! thickness_close = 12.4
//! ```

use crate::common::*;
use crate::error::Violation;
use crate::prescription::*;
use crate::surface::*;
use serde::Deserialize;

fn default_squeeze() -> Float {
    1.0
}

fn default_coating() -> String {
    "none".to_string()
}

/// A complete lens file.
#[derive(Clone, Debug, Deserialize)]
pub struct LensFile {
    pub lens: LensRecord,

    #[serde(rename = "surface", default)]
    pub surfaces: Vec<SurfaceRecord>,

    #[serde(default)]
    pub focus: Option<FocusRecord>,
}

/// The `[lens]` table.
#[derive(Clone, Debug, Deserialize)]
pub struct LensRecord {
    pub name: String,
    pub focal_length: Float,
    pub max_fstop: Float,

    #[serde(default = "default_squeeze")]
    pub squeeze: Float,

    #[serde(default = "default_coating")]
    pub coating: String,

    /// Older lens files mark the stop by index instead of by surface type.
    #[serde(default)]
    pub stop_index: Option<i64>,
}

/// One `[[surface]]` entry.
#[derive(Clone, Debug, Deserialize)]
pub struct SurfaceRecord {
    pub radius: Float,
    pub thickness: Float,
    pub ior: Float,
    pub aperture: Float,
    pub abbe_v: Float,

    #[serde(rename = "type", default)]
    pub surface_type: Option<String>,

    #[serde(default)]
    pub conic: Option<Float>,

    #[serde(default)]
    pub aspheric_coeffs: Option<Vec<Float>>,
}

/// The `[focus]` table.
#[derive(Clone, Debug, Deserialize)]
pub struct FocusRecord {
    pub close_distance: Float,

    #[serde(rename = "variable", default)]
    pub variables: Vec<FocusVariableRecord>,
}

/// One `[[focus.variable]]` entry.
#[derive(Clone, Debug, Deserialize)]
pub struct FocusVariableRecord {
    pub surface: i64,
    pub thickness_close: Float,
}

impl LensFile {
    /// Validate the record and convert it to a `Prescription`.
    ///
    /// * `id` - Source identifier.
    pub fn into_prescription(self, id: &str) -> Result<Prescription, Violation> {
        let coating = Coating::from_name(&self.lens.coating)?;

        let stop_index = match self.lens.stop_index {
            Some(index) if index < 0 || index as usize >= self.surfaces.len() => {
                return Err(Violation::StopIndexOutOfRange {
                    index,
                    count: self.surfaces.len(),
                })
            }
            Some(index) => Some(index as usize),
            None => None,
        };

        let surfaces = self
            .surfaces
            .into_iter()
            .enumerate()
            .map(|(i, record)| record.into_surface(i, stop_index == Some(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let focus = self
            .focus
            .map(|f| f.into_focus_spec(surfaces.len()))
            .transpose()?;

        let metadata = LensMetadata {
            name: self.lens.name,
            focal_length: self.lens.focal_length,
            max_f_number: self.lens.max_fstop,
            squeeze: self.lens.squeeze,
            coating,
        };

        Prescription::new(id, metadata, surfaces, focus)
    }
}

impl SurfaceRecord {
    /// Convert the record to a `Surface`.
    ///
    /// * `i`         - Index of the surface.
    /// * `is_marked` - True if the lens-level `stop_index` names this surface.
    fn into_surface(self, i: usize, is_marked: bool) -> Result<Surface, Violation> {
        let declared = self
            .surface_type
            .as_deref()
            .map(|name| {
                SurfaceType::from_name(name).ok_or_else(|| Violation::UnknownSurfaceType {
                    surface: i,
                    value: name.to_string(),
                })
            })
            .transpose()?;

        let surface_type = match (declared, is_marked) {
            (Some(t), true) if t != SurfaceType::Stop => {
                return Err(Violation::StopIndexConflict {
                    index: i,
                    surface_type: t,
                })
            }
            (Some(t), _) => t,
            (None, true) => SurfaceType::Stop,
            (None, false) => Surface::inferred_type(self.radius),
        };

        Ok(Surface {
            radius: self.radius,
            thickness: self.thickness,
            ior: self.ior,
            abbe_number: self.abbe_v,
            aperture_diameter: self.aperture,
            surface_type,
            conic_constant: self.conic,
            aspheric_coeffs: self.aspheric_coeffs.unwrap_or_default(),
        })
    }
}

impl FocusRecord {
    /// Convert the record to a `FocusSpec`. Indices are range-checked here;
    /// the remaining focus rules are checked by `Prescription::new`.
    ///
    /// * `n_surfaces` - Number of surfaces in the lens.
    fn into_focus_spec(self, n_surfaces: usize) -> Result<FocusSpec, Violation> {
        let variables = self
            .variables
            .into_iter()
            .map(|v| {
                if v.surface < 0 || v.surface as usize >= n_surfaces {
                    Err(Violation::FocusSurfaceOutOfRange {
                        surface: v.surface,
                        count: n_surfaces,
                    })
                } else {
                    Ok(FocusVariable {
                        surface: v.surface as usize,
                        thickness_close: v.thickness_close,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FocusSpec {
            close_distance: self.close_distance,
            variables,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
