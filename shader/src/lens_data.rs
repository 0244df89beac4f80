//! Lens data block

use crate::literal::float_literal;
use optics::{Prescription, MAX_SURFACES, SURFACE_EXTRA};

/// Size of the flattened per-surface extra data array.
pub const MAX_SURFACE_EXTRA: usize = MAX_SURFACES * SURFACE_EXTRA;

/// Generate the `load_lens_data()` function selecting a lens by its
/// registry index. Lenses appear in the given order; an unknown index falls
/// back to the first lens.
///
/// * `lenses` - Prescriptions in registry order.
pub fn generate_lens_data(lenses: &[Prescription]) -> String {
    let mut out = String::new();
    out.push_str(&format!("#define MAX_SURFACES {MAX_SURFACES}\n"));
    out.push_str(&format!("#define SURFACE_EXTRA {SURFACE_EXTRA}\n"));
    out.push_str(&format!("#define MAX_SURFACE_EXTRA {MAX_SURFACE_EXTRA}\n"));
    out.push('\n');
    out.push_str(
        "void load_lens_data(\n\
         \x20   int lens_type,\n\
         \x20   output float radii[MAX_SURFACES],\n\
         \x20   output float thicknesses[MAX_SURFACES],\n\
         \x20   output float thicknesses_close[MAX_SURFACES],\n\
         \x20   output float iors[MAX_SURFACES],\n\
         \x20   output float apertures[MAX_SURFACES],\n\
         \x20   output float abbe_v[MAX_SURFACES],\n\
         \x20   output int surface_types[MAX_SURFACES],\n\
         \x20   output float surface_extra[MAX_SURFACE_EXTRA],\n\
         \x20   output int num_surfaces,\n\
         \x20   output int stop_index,\n\
         \x20   output int coating,\n\
         \x20   output float squeeze,\n\
         \x20   output float close_focus_distance)\n\
         {\n",
    );

    for (i, lens) in lenses.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "else if" };
        out.push_str(&format!("    {keyword} (lens_type == {i}) {{\n"));
        out.push_str(&format!("        // {}\n", comment_text(lens.name())));
        write_lens_body(&mut out, lens);
        out.push_str("    }\n");
    }

    if let Some(default) = lenses.first() {
        out.push_str("    else {\n");
        out.push_str(&format!("        // Fallback to {}\n", comment_text(default.name())));
        write_lens_body(&mut out, default);
        out.push_str("    }\n");
    }

    out.push_str("}\n");
    out
}

/// Keeps a lens name on a single comment line.
fn comment_text(name: &str) -> String {
    name.replace(|c| c == '\r' || c == '\n', " ")
}

/// Append the assignments for one lens.
fn write_lens_body(out: &mut String, lens: &Prescription) {
    let close_distance = lens.focus().map_or(0.0, |f| f.close_distance);

    out.push_str(&format!("        num_surfaces = {};\n", lens.surfaces().len()));
    out.push_str(&format!("        stop_index = {};\n", lens.stop_index()));
    out.push_str(&format!("        coating = {};\n", lens.coating().level()));
    out.push_str(&format!("        squeeze = {};\n", float_literal(lens.squeeze())));
    out.push_str(&format!(
        "        close_focus_distance = {};\n",
        float_literal(close_distance)
    ));

    for (i, s) in lens.surfaces().iter().enumerate() {
        out.push_str(&format!(
            "        radii[{i}] = {};  thicknesses[{i}] = {};  thicknesses_close[{i}] = {};  \
             iors[{i}] = {};  apertures[{i}] = {};  abbe_v[{i}] = {};  surface_types[{i}] = {};\n",
            float_literal(s.radius),
            float_literal(s.thickness),
            float_literal(lens.thickness_close(i)),
            float_literal(s.ior),
            float_literal(s.aperture_diameter),
            float_literal(s.abbe_number),
            s.surface_type.code(),
        ));

        let extra = s
            .extra()
            .iter()
            .enumerate()
            .map(|(k, v)| format!("surface_extra[{}] = {};", SURFACE_EXTRA * i + k, float_literal(*v)))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&format!("        {extra}\n"));
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use optics::*;
    use proptest::prelude::*;
    use regex::Regex;

    fn double_gauss() -> Prescription {
        let mut metadata = LensMetadata::new("Double Gauss 50mm", 50.0, 2.0);
        metadata.coating = Coating::Multi;
        metadata.squeeze = 1.33;
        let surfaces = vec![
            Surface::new(29.475, 3.76, 1.67, 25.2).with_abbe(47.1),
            Surface::new(84.83, 0.12, 1.0, 25.2),
            Surface::new(19.275, 4.025, 1.67, 23.0)
                .with_abbe(47.1)
                .with_type(SurfaceType::Aspheric)
                .with_aspheric(Some(-0.3), &[1e-6, -2e-9, 3e-12]),
            Surface::new(0.0, 3.0, 1.0, 18.0).with_type(SurfaceType::Stop),
            Surface::new(-40.0, 9.0, 1.6, 18.0).with_abbe(35.0),
            Surface::new(-60.0, 0.0, 1.0, 20.0),
        ];
        let focus = FocusSpec {
            close_distance: 450.0,
            variables: vec![FocusVariable {
                surface: 3,
                thickness_close: 4.25,
            }],
        };
        Prescription::new("double_gauss", metadata, surfaces, Some(focus)).unwrap()
    }

    fn singlet(name: &str, radius: Float) -> Prescription {
        let surfaces = vec![
            Surface::new(radius, 5.0, 1.5, 30.0).with_abbe(64.2),
            Surface::stop(0.0, 20.0),
        ];
        Prescription::new(name, LensMetadata::new(name, 100.0, 4.0), surfaces, None).unwrap()
    }

    /// Pulls `name[index] = value;` assignments out of one branch.
    fn assignments(branch: &str, name: &str) -> Vec<(usize, f64)> {
        let re = Regex::new(&format!(r"\b{name}\[(\d+)\] = ([^;]+);")).unwrap();
        re.captures_iter(branch)
            .map(|c| (c[1].parse().unwrap(), c[2].parse().unwrap()))
            .collect()
    }

    fn scalar(branch: &str, name: &str) -> f64 {
        let re = Regex::new(&format!(r"\b{name} = ([^;]+);")).unwrap();
        re.captures(branch).unwrap()[1].parse().unwrap()
    }

    /// Returns the text of the branch for `lens_type == index`.
    fn branch(source: &str, index: usize) -> &str {
        let start = source.find(&format!("(lens_type == {index}) {{")).unwrap();
        let end = start + source[start..].find("    }\n").unwrap();
        &source[start..end]
    }

    #[test]
    fn header_defines() {
        let source = generate_lens_data(&[double_gauss()]);
        assert!(source.starts_with(
            "#define MAX_SURFACES 24\n#define SURFACE_EXTRA 5\n#define MAX_SURFACE_EXTRA 120\n"
        ));
        assert!(source.contains("void load_lens_data(\n    int lens_type,\n"));
        assert!(source.ends_with("}\n"));
    }

    #[test]
    fn surface_fields_round_trip() {
        let lens = double_gauss();
        let source = generate_lens_data(&[lens.clone()]);
        let text = branch(&source, 0);

        let fields: [(&str, fn(&Surface) -> f64); 5] = [
            ("radii", |s| s.radius),
            ("thicknesses", |s| s.thickness),
            ("iors", |s| s.ior),
            ("apertures", |s| s.aperture_diameter),
            ("abbe_v", |s| s.abbe_number),
        ];
        for (name, field) in fields {
            let values = assignments(text, name);
            assert_eq!(values.len(), lens.surfaces().len(), "{name}");
            for (i, v) in values {
                assert_eq!(v, field(&lens.surfaces()[i]), "{name}[{i}]");
            }
        }
    }

    #[test]
    fn scalars_and_codes() {
        let source = generate_lens_data(&[double_gauss()]);
        let text = branch(&source, 0);
        assert_eq!(scalar(text, "num_surfaces"), 6.0);
        assert_eq!(scalar(text, "stop_index"), 3.0);
        assert_eq!(scalar(text, "coating"), 2.0);
        assert_eq!(scalar(text, "squeeze"), 1.33);
        assert_eq!(scalar(text, "close_focus_distance"), 450.0);

        let types = assignments(text, "surface_types");
        assert_eq!(types[2], (2, 3.0));
        assert_eq!(types[3], (3, 2.0));
    }

    #[test]
    fn close_thickness_defaults_to_nominal() {
        let source = generate_lens_data(&[double_gauss()]);
        let close = assignments(branch(&source, 0), "thicknesses_close");
        assert_eq!(close[3], (3, 4.25));
        assert_eq!(close[4], (4, 9.0));
    }

    #[test]
    fn extra_block_is_zero_filled() {
        let source = generate_lens_data(&[double_gauss()]);
        let extra = assignments(branch(&source, 0), "surface_extra");
        assert_eq!(extra.len(), 6 * SURFACE_EXTRA);
        let expected: Vec<(usize, f64)> = vec![(10, -0.3), (11, 1e-6), (12, -2e-9), (13, 3e-12), (14, 0.0)];
        assert_eq!(extra[10..15].to_vec(), expected);
        assert!(extra[..10].iter().all(|&(_, v)| v == 0.0));
    }

    #[test]
    fn branches_in_order_with_fallback() {
        let lenses = [singlet("alpha", 40.0), singlet("beta", 60.0)];
        let source = generate_lens_data(&lenses);

        let alpha = source.find("    if (lens_type == 0) {\n        // alpha\n").unwrap();
        let beta = source.find("    else if (lens_type == 1) {\n        // beta\n").unwrap();
        let fallback = source.find("    else {\n        // Fallback to alpha\n").unwrap();
        assert!(alpha < beta && beta < fallback);

        let fallback_radii = assignments(&source[fallback..], "radii");
        assert_eq!(fallback_radii[0], (0, 40.0));
        assert_eq!(scalar(&source[fallback..], "close_focus_distance"), 0.0);
    }

    #[test]
    fn no_lenses_no_branches() {
        let source = generate_lens_data(&[]);
        assert!(!source.contains("lens_type =="));
        assert!(!source.contains("else"));
    }

    #[test]
    fn multiline_name_stays_in_comment() {
        let source = generate_lens_data(&[singlet("two\nlines", 40.0)]);
        assert!(source.contains("        // two lines\n"));
    }

    proptest! {
        #[test]
        fn arbitrary_values_round_trip(
            radius in -1e4..1e4f64,
            thickness in 0.0..1e3f64,
            ior in 1.0..2.5f64,
            aperture in 1e-3..500.0f64,
            abbe in 0.0..100.0f64,
        ) {
            prop_assume!(radius != 0.0);
            let surfaces = vec![
                Surface::new(radius, thickness, ior, aperture).with_abbe(abbe),
                Surface::stop(0.0, aperture),
            ];
            let lens = Prescription::new("p", LensMetadata::new("p", 50.0, 2.0), surfaces, None).unwrap();
            let source = generate_lens_data(&[lens]);
            let text = branch(&source, 0);
            prop_assert_eq!(assignments(text, "radii")[0], (0, radius));
            prop_assert_eq!(assignments(text, "thicknesses")[0], (0, thickness));
            prop_assert_eq!(assignments(text, "iors")[0], (0, ior));
            prop_assert_eq!(assignments(text, "apertures")[0], (0, aperture));
            prop_assert_eq!(assignments(text, "abbe_v")[0], (0, abbe));
        }
    }
}
