//! Optical surfaces

use crate::common::*;
use std::fmt;

/// Number of floats in a surface's extra profile block: conic constant
/// followed by up to four polynomial aspheric coefficients.
pub const SURFACE_EXTRA: usize = 5;

/// Maximum number of polynomial aspheric coefficients (A4, A6, A8, A10).
pub const MAX_ASPHERIC_COEFFS: usize = 4;

/// Minimum number of polynomial aspheric coefficients.
pub const MIN_ASPHERIC_COEFFS: usize = 3;

/// Kind of optical interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    /// Rotationally symmetric spherical cap.
    Spherical,
    /// Planar interface.
    Flat,
    /// Aperture stop (iris). Always planar.
    Stop,
    /// Even asphere: conic base plus polynomial terms.
    Aspheric,
    /// Cylinder with curvature along the horizontal axis only.
    CylindricalX,
    /// Cylinder with curvature along the vertical axis only.
    CylindricalY,
}

impl SurfaceType {
    /// All surface types in serialization code order.
    pub const ALL: [SurfaceType; 6] = [
        Self::Spherical,
        Self::Flat,
        Self::Stop,
        Self::Aspheric,
        Self::CylindricalX,
        Self::CylindricalY,
    ];

    /// Returns the name used in lens records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spherical => "spherical",
            Self::Flat => "flat",
            Self::Stop => "stop",
            Self::Aspheric => "aspheric",
            Self::CylindricalX => "cylindrical_x",
            Self::CylindricalY => "cylindrical_y",
        }
    }

    /// Returns the numeric code used by the shader.
    pub fn code(&self) -> i32 {
        match self {
            Self::Spherical => 0,
            Self::Flat => 1,
            Self::Stop => 2,
            Self::Aspheric => 3,
            Self::CylindricalX => 4,
            Self::CylindricalY => 5,
        }
    }

    /// Parse a surface type from its record name.
    ///
    /// * `name` - The name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Returns true for the cylindrical variants.
    pub fn is_cylindrical(&self) -> bool {
        matches!(self, Self::CylindricalX | Self::CylindricalY)
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One optical interface. Surfaces are stored in axial order and each one
/// describes the medium that follows it.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    /// Signed radius of curvature. Zero means flat. A positive radius places
    /// the centre of curvature behind the vertex.
    pub radius: Float,

    /// Axial distance to the next surface (0 for the last surface).
    pub thickness: Float,

    /// Index of refraction of the medium after this surface; 1.0 is air.
    pub ior: Float,

    /// Abbe number of the medium after this surface.
    pub abbe_number: Float,

    /// Clear diameter.
    pub aperture_diameter: Float,

    /// Surface type.
    pub surface_type: SurfaceType,

    /// Conic constant (aspheric surfaces only).
    pub conic_constant: Option<Float>,

    /// Polynomial aspheric coefficients A4, A6, A8 and optionally A10.
    pub aspheric_coeffs: Vec<Float>,
}

impl Surface {
    /// Create a new surface. The type is `Flat` when `radius` is zero and
    /// `Spherical` otherwise.
    ///
    /// * `radius`            - Signed radius of curvature.
    /// * `thickness`         - Axial distance to the next surface.
    /// * `ior`               - Index of refraction after the surface.
    /// * `aperture_diameter` - Clear diameter.
    pub fn new(radius: Float, thickness: Float, ior: Float, aperture_diameter: Float) -> Self {
        Self {
            radius,
            thickness,
            ior,
            abbe_number: 0.0,
            aperture_diameter,
            surface_type: Self::inferred_type(radius),
            conic_constant: None,
            aspheric_coeffs: vec![],
        }
    }

    /// Create an aperture stop.
    ///
    /// * `thickness`         - Axial distance to the next surface.
    /// * `aperture_diameter` - Clear diameter of the fully open iris.
    pub fn stop(thickness: Float, aperture_diameter: Float) -> Self {
        Self::new(0.0, thickness, 1.0, aperture_diameter).with_type(SurfaceType::Stop)
    }

    /// Returns the type assumed for a record that does not name one.
    ///
    /// * `radius` - Signed radius of curvature.
    pub fn inferred_type(radius: Float) -> SurfaceType {
        if radius == 0.0 {
            SurfaceType::Flat
        } else {
            SurfaceType::Spherical
        }
    }

    /// Returns the surface with the given type.
    pub fn with_type(mut self, surface_type: SurfaceType) -> Self {
        self.surface_type = surface_type;
        self
    }

    /// Returns the surface with the given Abbe number.
    pub fn with_abbe(mut self, abbe_number: Float) -> Self {
        self.abbe_number = abbe_number;
        self
    }

    /// Returns the surface with an aspheric profile.
    ///
    /// * `conic`  - Conic constant.
    /// * `coeffs` - Polynomial coefficients A4, A6, A8 (, A10).
    pub fn with_aspheric(mut self, conic: Option<Float>, coeffs: &[Float]) -> Self {
        self.conic_constant = conic;
        self.aspheric_coeffs = coeffs.to_vec();
        self
    }

    /// Returns half the clear diameter.
    #[inline]
    pub fn semi_aperture(&self) -> Float {
        self.aperture_diameter * 0.5
    }

    /// Returns true for the aperture stop.
    #[inline]
    pub fn is_stop(&self) -> bool {
        self.surface_type == SurfaceType::Stop
    }

    /// Returns true when the surface has no curvature in the cross-section.
    #[inline]
    pub fn is_planar(&self) -> bool {
        self.radius == 0.0 || matches!(self.surface_type, SurfaceType::Flat | SurfaceType::Stop)
    }

    /// Returns true when the medium after the surface is glass.
    #[inline]
    pub fn is_glass(&self) -> bool {
        self.ior > 1.0
    }

    /// Returns true when conic or polynomial data is present.
    pub fn has_profile_data(&self) -> bool {
        self.conic_constant.is_some() || !self.aspheric_coeffs.is_empty()
    }

    /// Returns the conic constant followed by the aspheric coefficients,
    /// zero-filled.
    pub fn extra(&self) -> [Float; SURFACE_EXTRA] {
        let mut extra = [0.0; SURFACE_EXTRA];
        extra[0] = self.conic_constant.unwrap_or(0.0);
        for (e, a) in extra[1..].iter_mut().zip(self.aspheric_coeffs.iter()) {
            *e = *a;
        }
        extra
    }

    /// Returns the axial displacement of the surface profile from its vertex
    /// at transverse height `h`.
    ///
    /// * `h` - Transverse height.
    pub fn sag(&self, h: Float) -> Float {
        if self.is_planar() {
            return 0.0;
        }

        let c = 1.0 / self.radius;
        if self.surface_type == SurfaceType::Aspheric {
            let k = self.conic_constant.unwrap_or(0.0);
            let h2 = h * h;
            let root = max(0.0, 1.0 - (1.0 + k) * c * c * h2).sqrt();
            let base = c * h2 / (1.0 + root);
            base + self.polynomial(h2)
        } else {
            // Past the rim of the sphere the profile is held at the equator.
            let hc = min(h.abs(), self.radius.abs());
            let h2 = hc * hc;
            c * h2 / (1.0 + max(0.0, 1.0 - c * c * h2).sqrt())
        }
    }

    /// Returns d(sag)/dh at transverse height `h`.
    ///
    /// * `h` - Transverse height.
    pub fn sag_slope(&self, h: Float) -> Float {
        if self.is_planar() {
            return 0.0;
        }

        let c = 1.0 / self.radius;
        let k = if self.surface_type == SurfaceType::Aspheric {
            self.conic_constant.unwrap_or(0.0)
        } else {
            0.0
        };
        let root = max(1e-12, 1.0 - (1.0 + k) * c * c * h * h).sqrt();
        let mut slope = c * h / root;

        if self.surface_type == SurfaceType::Aspheric {
            let mut power = h * h * h;
            for (i, a) in self.aspheric_coeffs.iter().enumerate() {
                slope += (4 + 2 * i) as Float * a * power;
                power *= h * h;
            }
        }
        slope
    }

    /// Returns the axial position of the profile at height `h` given the
    /// axial position of the vertex.
    ///
    /// * `vertex_x` - Axial position of the vertex.
    /// * `h`        - Transverse height.
    #[inline]
    pub fn profile_x(&self, vertex_x: Float, h: Float) -> Float {
        vertex_x + self.sag(h)
    }

    /// Evaluates A4 h^4 + A6 h^6 + ... for `h2` = h^2.
    fn polynomial(&self, h2: Float) -> Float {
        let mut power = h2 * h2;
        let mut sum = 0.0;
        for a in self.aspheric_coeffs.iter() {
            sum += a * power;
            power *= h2;
        }
        sum
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
