//! Lens prescriptions

use crate::common::*;
use crate::error::Violation;
use crate::layout::*;
use crate::surface::*;
use std::collections::HashSet;
use std::fmt;

/// Maximum number of surfaces in one prescription. The shader allocates its
/// per-surface arrays with this size.
pub const MAX_SURFACES: usize = 24;

/// Anti-reflection coating level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Coating {
    #[default]
    None,
    Single,
    Multi,
}

impl Coating {
    /// Parse a coating from its record name.
    ///
    /// * `name` - One of `none`, `single`, `multi`.
    pub fn from_name(name: &str) -> Result<Self, Violation> {
        match name {
            "none" => Ok(Self::None),
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            other => Err(Violation::UnknownCoating(other.to_string())),
        }
    }

    /// Returns the record name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }

    /// Returns the numeric level used by the shader.
    pub fn level(&self) -> i32 {
        match self {
            Self::None => 0,
            Self::Single => 1,
            Self::Multi => 2,
        }
    }
}

impl fmt::Display for Coating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Alternate thickness of an air gap when the lens is focused close.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FocusVariable {
    /// Index of the surface whose following gap moves.
    pub surface: usize,

    /// Thickness at the close focus distance.
    pub thickness_close: Float,
}

/// Close focus description.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusSpec {
    /// Closest focus distance.
    pub close_distance: Float,

    /// Air gaps that move while focusing.
    pub variables: Vec<FocusVariable>,
}

/// Descriptive data of a lens that does not affect ray geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct LensMetadata {
    /// Display name.
    pub name: String,

    /// Nominal focal length.
    pub focal_length: Float,

    /// Fastest f-number.
    pub max_f_number: Float,

    /// Anamorphic squeeze ratio.
    pub squeeze: Float,

    /// Coating level.
    pub coating: Coating,
}

impl LensMetadata {
    /// Create metadata with no squeeze and no coating.
    ///
    /// * `name`         - Display name.
    /// * `focal_length` - Nominal focal length.
    /// * `max_f_number` - Fastest f-number.
    pub fn new(name: &str, focal_length: Float, max_f_number: Float) -> Self {
        Self {
            name: name.to_string(),
            focal_length,
            max_f_number,
            squeeze: 1.0,
            coating: Coating::None,
        }
    }
}

/// A validated optical system. Prescriptions are immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Prescription {
    id: String,
    metadata: LensMetadata,
    surfaces: Vec<Surface>,
    focus: Option<FocusSpec>,
    stop_index: usize,
}

impl Prescription {
    /// Validate the surfaces and focus data and build a prescription.
    ///
    /// * `id`       - Stable source identifier.
    /// * `metadata` - Descriptive data.
    /// * `surfaces` - Surfaces in optical order.
    /// * `focus`    - Optional close focus description.
    pub fn new(
        id: &str,
        metadata: LensMetadata,
        surfaces: Vec<Surface>,
        focus: Option<FocusSpec>,
    ) -> Result<Self, Violation> {
        let stop_index = validate_surfaces(&surfaces)?;
        if let Some(focus) = focus.as_ref() {
            validate_focus(&surfaces, focus)?;
        }

        Ok(Self {
            id: id.to_string(),
            metadata,
            surfaces,
            focus,
            stop_index,
        })
    }

    /// Returns the source identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &LensMetadata {
        &self.metadata
    }

    pub fn focal_length(&self) -> Float {
        self.metadata.focal_length
    }

    pub fn max_f_number(&self) -> Float {
        self.metadata.max_f_number
    }

    pub fn squeeze(&self) -> Float {
        self.metadata.squeeze
    }

    pub fn coating(&self) -> Coating {
        self.metadata.coating
    }

    /// Returns the surfaces in optical order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn focus(&self) -> Option<&FocusSpec> {
        self.focus.as_ref()
    }

    /// Returns the index of the aperture stop.
    pub fn stop_index(&self) -> usize {
        self.stop_index
    }

    /// Returns the aperture stop.
    pub fn stop(&self) -> &Surface {
        &self.surfaces[self.stop_index]
    }

    /// Returns the gap after surface `i` at close focus. Surfaces without a
    /// focus variable keep their nominal thickness.
    ///
    /// * `i` - Surface index.
    pub fn thickness_close(&self, i: usize) -> Float {
        self.focus
            .as_ref()
            .and_then(|f| f.variables.iter().find(|v| v.surface == i))
            .map_or(self.surfaces[i].thickness, |v| v.thickness_close)
    }

    /// Returns the axial vertex positions.
    pub fn vertex_positions(&self) -> Vec<Float> {
        vertex_positions(&self.surfaces)
    }

    /// Returns the distance between the first and last vertex.
    pub fn axial_length(&self) -> Float {
        axial_length(&self.surfaces)
    }
}

/// Checks the per-surface invariants and returns the index of the single
/// stop.
///
/// * `surfaces` - Surfaces in optical order.
pub fn validate_surfaces(surfaces: &[Surface]) -> Result<usize, Violation> {
    if surfaces.is_empty() {
        return Err(Violation::NoSurfaces);
    }
    if surfaces.len() > MAX_SURFACES {
        return Err(Violation::TooManySurfaces {
            count: surfaces.len(),
            max: MAX_SURFACES,
        });
    }

    for (i, s) in surfaces.iter().enumerate() {
        validate_finite(i, s)?;
        validate_profile(i, s)?;
    }

    let stops: Vec<usize> = surfaces
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.is_stop().then_some(i))
        .collect();
    match stops.as_slice() {
        [] => Err(Violation::NoStop),
        [i] if surfaces[*i].radius != 0.0 => Err(Violation::StopRadius {
            surface: *i,
            radius: surfaces[*i].radius,
        }),
        [i] => Ok(*i),
        _ => Err(Violation::MultipleStops { indices: stops }),
    }
}

/// Checks that every numeric field of a surface is finite.
fn validate_finite(i: usize, s: &Surface) -> Result<(), Violation> {
    let fields = [
        ("radius", s.radius),
        ("thickness", s.thickness),
        ("ior", s.ior),
        ("abbe_v", s.abbe_number),
        ("aperture", s.aperture_diameter),
    ];
    let profile = s
        .conic_constant
        .map(|k| ("conic", k))
        .into_iter()
        .chain(s.aspheric_coeffs.iter().map(|&a| ("aspheric_coeffs", a)));

    match fields.into_iter().chain(profile).find(|(_, v)| !v.is_finite()) {
        Some((field, value)) => Err(Violation::NonFinite {
            surface: i,
            field,
            value,
        }),
        None => Ok(()),
    }
}

/// Checks that profile data matches the surface type.
fn validate_profile(i: usize, s: &Surface) -> Result<(), Violation> {
    match s.surface_type {
        SurfaceType::Aspheric => {
            if s.radius == 0.0 {
                return Err(Violation::AsphericRadius { surface: i });
            }
            let count = s.aspheric_coeffs.len();
            if !(MIN_ASPHERIC_COEFFS..=MAX_ASPHERIC_COEFFS).contains(&count) {
                return Err(Violation::AsphericCoefficients { surface: i, count });
            }
        }
        t if t.is_cylindrical() => {
            if s.radius == 0.0 {
                return Err(Violation::CylindricalRadius {
                    surface: i,
                    surface_type: t,
                });
            }
            if s.has_profile_data() {
                return Err(Violation::UnexpectedProfile {
                    surface: i,
                    surface_type: t,
                });
            }
        }
        t => {
            if s.has_profile_data() {
                return Err(Violation::UnexpectedProfile {
                    surface: i,
                    surface_type: t,
                });
            }
        }
    }
    Ok(())
}

/// Checks the focus variables against the surfaces.
///
/// * `surfaces` - Surfaces in optical order.
/// * `focus`    - Close focus description.
pub fn validate_focus(surfaces: &[Surface], focus: &FocusSpec) -> Result<(), Violation> {
    if !(focus.close_distance.is_finite() && focus.close_distance > 0.0) {
        return Err(Violation::FocusDistance(focus.close_distance));
    }

    let mut seen = HashSet::new();
    for v in focus.variables.iter() {
        let s = surfaces
            .get(v.surface)
            .ok_or(Violation::FocusSurfaceOutOfRange {
                surface: v.surface as i64,
                count: surfaces.len(),
            })?;
        if s.ior != 1.0 {
            return Err(Violation::FocusNotAirGap {
                surface: v.surface,
                ior: s.ior,
            });
        }
        if !seen.insert(v.surface) {
            return Err(Violation::FocusDuplicate { surface: v.surface });
        }
        if !(v.thickness_close >= 0.0 && v.thickness_close.is_finite()) {
            return Err(Violation::FocusNegativeThickness {
                surface: v.surface,
                thickness: v.thickness_close,
            });
        }
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn singlet() -> Vec<Surface> {
        vec![
            Surface::stop(2.0, 20.0),
            Surface::new(50.0, 5.0, 1.5, 30.0).with_abbe(64.2),
            Surface::new(-50.0, 40.0, 1.0, 30.0),
        ]
    }

    fn build(surfaces: Vec<Surface>) -> Result<Prescription, Violation> {
        Prescription::new("singlet", LensMetadata::new("Singlet", 50.0, 2.8), surfaces, None)
    }

    fn focus(variables: &[(usize, Float)]) -> FocusSpec {
        FocusSpec {
            close_distance: 500.0,
            variables: variables
                .iter()
                .map(|&(surface, thickness_close)| FocusVariable {
                    surface,
                    thickness_close,
                })
                .collect(),
        }
    }

    #[test]
    fn valid_singlet() {
        let p = build(singlet()).unwrap();
        assert_eq!(p.stop_index(), 0);
        assert_eq!(p.axial_length(), 7.0);
        assert_eq!(p.coating(), Coating::None);
        assert_eq!(p.squeeze(), 1.0);
    }

    #[test]
    fn rejects_missing_stop() {
        let mut s = singlet();
        s.remove(0);
        assert_eq!(build(s), Err(Violation::NoStop));
    }

    #[test]
    fn rejects_two_stops() {
        let mut s = singlet();
        s.push(Surface::stop(0.0, 10.0));
        assert_eq!(build(s), Err(Violation::MultipleStops { indices: vec![0, 3] }));
    }

    #[test]
    fn rejects_curved_stop() {
        let mut s = singlet();
        s[0].radius = 10.0;
        assert_eq!(
            build(s),
            Err(Violation::StopRadius {
                surface: 0,
                radius: 10.0
            })
        );
    }

    #[test]
    fn rejects_too_many_surfaces() {
        let mut s = singlet();
        while s.len() <= MAX_SURFACES {
            s.push(Surface::new(0.0, 1.0, 1.0, 10.0));
        }
        assert!(matches!(build(s), Err(Violation::TooManySurfaces { .. })));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(build(vec![]), Err(Violation::NoSurfaces));
    }

    #[test]
    fn aspheric_rules() {
        let mut s = singlet();
        s[1] = s[1]
            .clone()
            .with_type(SurfaceType::Aspheric)
            .with_aspheric(Some(-0.5), &[1e-5, 1e-8]);
        assert_eq!(
            build(s.clone()),
            Err(Violation::AsphericCoefficients { surface: 1, count: 2 })
        );

        s[1].aspheric_coeffs = vec![1e-5, 1e-8, 1e-11, 1e-14];
        assert!(build(s.clone()).is_ok());

        s[1].radius = 0.0;
        assert_eq!(build(s), Err(Violation::AsphericRadius { surface: 1 }));
    }

    #[test]
    fn cylindrical_rules() {
        let mut s = singlet();
        s[1].surface_type = SurfaceType::CylindricalX;
        assert!(build(s.clone()).is_ok());

        s[1].conic_constant = Some(-1.0);
        assert_eq!(
            build(s.clone()),
            Err(Violation::UnexpectedProfile {
                surface: 1,
                surface_type: SurfaceType::CylindricalX
            })
        );

        s[1].conic_constant = None;
        s[1].radius = 0.0;
        assert_eq!(
            build(s),
            Err(Violation::CylindricalRadius {
                surface: 1,
                surface_type: SurfaceType::CylindricalX
            })
        );
    }

    #[test]
    fn spherical_rejects_profile_data() {
        let mut s = singlet();
        s[2].aspheric_coeffs = vec![1e-5, 1e-8, 1e-11];
        assert_eq!(
            build(s),
            Err(Violation::UnexpectedProfile {
                surface: 2,
                surface_type: SurfaceType::Spherical
            })
        );
    }

    #[test]
    fn focus_rules() {
        let meta = LensMetadata::new("Singlet", 50.0, 2.8);
        let make = |f: FocusSpec| Prescription::new("s", meta.clone(), singlet(), Some(f));

        let p = make(focus(&[(2, 44.0)])).unwrap();
        assert_eq!(p.thickness_close(2), 44.0);
        assert_eq!(p.thickness_close(1), 5.0);

        assert_eq!(
            make(focus(&[(1, 4.0)])),
            Err(Violation::FocusNotAirGap { surface: 1, ior: 1.5 })
        );
        assert_eq!(
            make(focus(&[(2, -1.0)])),
            Err(Violation::FocusNegativeThickness {
                surface: 2,
                thickness: -1.0
            })
        );
        assert_eq!(
            make(focus(&[(2, 41.0), (2, 42.0)])),
            Err(Violation::FocusDuplicate { surface: 2 })
        );
        assert_eq!(
            make(focus(&[(7, 1.0)])),
            Err(Violation::FocusSurfaceOutOfRange { surface: 7, count: 3 })
        );

        let mut f = focus(&[]);
        f.close_distance = 0.0;
        assert_eq!(make(f), Err(Violation::FocusDistance(0.0)));
    }

    #[test]
    fn non_finite_focus_thickness() {
        let meta = LensMetadata::new("Singlet", 50.0, 2.8);
        let make = |f: FocusSpec| Prescription::new("s", meta.clone(), singlet(), Some(f));

        for t in [Float::NAN, Float::INFINITY] {
            let result = make(focus(&[(0, t)]));
            assert!(
                matches!(
                    result,
                    Err(Violation::FocusNegativeThickness { surface: 0, thickness })
                        if thickness.is_nan() || thickness.is_infinite()
                ),
                "thickness_close {t} accepted"
            );
        }
        assert!(make(focus(&[(0, 3.0)])).is_ok());
    }

    #[test]
    fn non_finite_surface_fields() {
        let cases: [(&str, fn(&mut Surface)); 5] = [
            ("radius", |s| s.radius = Float::NAN),
            ("thickness", |s| s.thickness = Float::INFINITY),
            ("ior", |s| s.ior = Float::NAN),
            ("abbe_v", |s| s.abbe_number = Float::NEG_INFINITY),
            ("aperture", |s| s.aperture_diameter = Float::NAN),
        ];
        for (name, set) in cases {
            let mut s = singlet();
            set(&mut s[1]);
            assert!(
                matches!(
                    build(s),
                    Err(Violation::NonFinite { surface: 1, field, value })
                        if field == name && !value.is_finite()
                ),
                "non-finite {name} accepted"
            );
        }

        let mut s = singlet();
        s[1] = s[1]
            .clone()
            .with_type(SurfaceType::Aspheric)
            .with_aspheric(Some(-0.5), &[1e-5, Float::NAN, 1e-11]);
        assert!(matches!(
            build(s),
            Err(Violation::NonFinite { surface: 1, field: "aspheric_coeffs", .. })
        ));
    }

    #[test]
    fn coating_names() {
        for c in [Coating::None, Coating::Single, Coating::Multi] {
            assert_eq!(Coating::from_name(c.name()), Ok(c));
        }
        assert_eq!(
            Coating::from_name("triple"),
            Err(Violation::UnknownCoating("triple".to_string()))
        );
    }

    proptest! {
        #[test]
        fn exactly_one_stop(n_surfaces in 1..MAX_SURFACES, stop_mask in 0u32..(1 << 6)) {
            // Mark the first six surfaces as stops according to the mask.
            let surfaces: Vec<Surface> = (0..n_surfaces)
                .map(|i| {
                    if i < 6 && stop_mask & (1 << i) != 0 {
                        Surface::stop(1.0, 10.0)
                    } else {
                        Surface::new(0.0, 1.0, 1.0, 10.0)
                    }
                })
                .collect();
            let n_stops = surfaces.iter().filter(|s| s.is_stop()).count();

            match build(surfaces) {
                Ok(p) => {
                    prop_assert_eq!(n_stops, 1);
                    prop_assert_eq!(p.surfaces().iter().filter(|s| s.is_stop()).count(), 1);
                }
                Err(Violation::NoStop) => prop_assert_eq!(n_stops, 0),
                Err(Violation::MultipleStops { indices }) => {
                    prop_assert!(n_stops > 1);
                    prop_assert_eq!(indices.len(), n_stops);
                }
                Err(e) => prop_assert!(false, "unexpected violation {}", e),
            }
        }

        #[test]
        fn aspheric_coefficient_count(count in 0usize..7, radius in prop_oneof![Just(0.0), 10.0..100.0f64]) {
            let coeffs = vec![1e-6; count];
            let mut s = singlet();
            s[1] = s[1].clone().with_type(SurfaceType::Aspheric).with_aspheric(None, &coeffs);
            s[1].radius = radius;
            let ok = build(s).is_ok();
            prop_assert_eq!(ok, radius != 0.0 && (3..=4).contains(&count));
        }
    }
}
