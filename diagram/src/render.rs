//! Diagram Renderer

use crate::config::*;
use crate::error::*;
use crate::raster::*;
use image::{Rgba, RgbaImage};
use optics::common::*;
use optics::geometry::*;
use optics::layout::*;
use optics::{Prescription, Surface, SurfaceType};
use tracer::*;
use vello_cpu::kurbo::{BezPath, Stroke};
use vello_cpu::peniko::Color;
use vello_cpu::{Pixmap, RenderContext};

/// Stroke widths and dash pattern in output pixels.
const SURFACE_WIDTH: Float = 2.0;
const AXIS_WIDTH: Float = 1.0;
const STOP_WIDTH: Float = 2.0;
const NOTCH_WIDTH: Float = 4.0;
const RAY_WIDTH: Float = 1.0;
const AXIS_DASH: Float = 4.0;
const AXIS_GAP: Float = 3.0;

/// Returns the surfaces as they appear in the meridional cross-section.
/// A `CylindricalX` surface has no power in this plane so it is drawn flat.
///
/// * `surfaces` - Surfaces in optical order.
pub fn section_view(surfaces: &[Surface]) -> Vec<Surface> {
    surfaces
        .iter()
        .map(|s| {
            let mut s = s.clone();
            if s.surface_type == SurfaceType::CylindricalX {
                s.radius = 0.0;
            }
            s
        })
        .collect()
}

/// Returns the vertical padding in output pixels. Systems that are much
/// taller than they are long get less padding so they fill the icon.
///
/// * `max_semi_aperture` - Largest nominal semi-aperture.
/// * `length`            - Axial length.
/// * `config`            - Diagram configuration.
pub fn adaptive_padding(max_semi_aperture: Float, length: Float, config: &DiagramConfig) -> Float {
    if length <= 0.0 {
        return config.min_padding;
    }

    let aspect = 2.0 * max_semi_aperture / length;
    if aspect > config.aspect_threshold {
        lerp(config.aspect_threshold / aspect, config.min_padding, config.padding)
    } else {
        config.padding
    }
}

/// Maps lens coordinates (axial x, transverse y) to canvas pixels. The
/// canvas y axis points down.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixels per lens unit.
    pub scale: Float,

    /// Pixel column of the first vertex.
    pub x_offset: Float,

    /// Pixel row of the optical axis.
    pub y_center: Float,

    /// Horizontal padding in canvas pixels.
    pub padding_x: Float,

    /// Vertical padding in canvas pixels.
    pub padding_y: Float,

    /// Canvas edge length.
    pub size: Float,
}

impl Frame {
    /// Fit the surfaces into the supersampled canvas, preserving aspect and
    /// centering the axial extent.
    ///
    /// * `surfaces` - Surfaces in optical order.
    /// * `config`   - Diagram configuration.
    pub fn fit(surfaces: &[Surface], config: &DiagramConfig) -> Self {
        let ss = config.supersample() as Float;
        let size = config.size as Float * ss;
        let length = axial_length(surfaces);
        let max_ap = max_semi_aperture(surfaces);

        let padding_x = config.padding * ss;
        let padding_y = adaptive_padding(max_ap, length, config) * ss;
        let draw_w = max(size - 2.0 * padding_x, 0.0);
        let draw_h = max(size - 2.0 * padding_y, 0.0);

        let scale_x = if length > 0.0 { draw_w / length } else { INFINITY };
        let scale_y = if max_ap > 0.0 { draw_h / (2.0 * max_ap) } else { INFINITY };
        let scale = min(scale_x, scale_y);
        let scale = if scale.is_finite() { scale } else { 1.0 };

        Self {
            scale,
            x_offset: padding_x + (draw_w - length * scale) * 0.5,
            y_center: size * 0.5,
            padding_x,
            padding_y,
            size,
        }
    }

    /// Returns the canvas position of a point in lens coordinates.
    ///
    /// * `p` - The point.
    #[inline]
    pub fn to_px(&self, p: Point2f) -> Point2f {
        Point2f::new(self.x_offset + p.x * self.scale, self.y_center - p.y * self.scale)
    }

    /// Returns the region rays are clipped to: the canvas inset by half the
    /// padding.
    pub fn clip_bounds(&self) -> Bounds2f {
        Bounds2f::new(
            Point2f::new(self.padding_x * 0.5, self.padding_y * 0.5),
            Point2f::new(self.size - self.padding_x * 0.5, self.size - self.padding_y * 0.5),
        )
    }
}

/// Returns canvas points along a surface profile from `-semi_ap` to
/// `+semi_ap`.
fn arc_points(surface: &Surface, vertex_x: Float, semi_ap: Float, steps: usize, frame: &Frame) -> Vec<Point2f> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|k| {
            let h = -semi_ap + 2.0 * semi_ap * k as Float / steps as Float;
            frame.to_px(Point2f::new(surface.profile_x(vertex_x, h), h))
        })
        .collect()
}

/// Returns the canvas position of the rim of a surface on one side.
fn rim_point(surface: &Surface, vertex_x: Float, semi_ap: Float, sign: Float, frame: &Frame) -> Point2f {
    let h = sign * semi_ap;
    frame.to_px(Point2f::new(surface.profile_x(vertex_x, h), h))
}

/// Returns the outline of the glass between surfaces `j` and `j + 1`: the
/// front arc, then the back arc in reverse, closed at the rims.
fn glass_polygon(
    surfaces: &[Surface],
    vertices: &[Float],
    apertures: &[Float],
    j: usize,
    steps: usize,
    frame: &Frame,
) -> Vec<Point2f> {
    let front = arc_points(&surfaces[j], vertices[j], apertures[j], steps, frame);
    let back = arc_points(&surfaces[j + 1], vertices[j + 1], apertures[j + 1], steps, frame);

    let mut polygon = Vec::with_capacity(front.len() + back.len() + 2);
    polygon.extend(front.iter().copied());
    if let (Some(&first), Some(&last)) = (front.first(), back.last()) {
        polygon.push(last);
        polygon.extend(back.iter().rev().copied());
        polygon.push(first);
    }
    polygon
}

/// Returns a path through the points.
fn polyline_path(points: &[Point2f]) -> BezPath {
    let mut path = BezPath::new();
    for (k, p) in points.iter().enumerate() {
        if k == 0 {
            path.move_to((p.x, p.y));
        } else {
            path.line_to((p.x, p.y));
        }
    }
    path
}

/// Returns a closed path through the points.
fn polygon_path(points: &[Point2f]) -> BezPath {
    let mut path = polyline_path(points);
    if !points.is_empty() {
        path.close_path();
    }
    path
}

/// Returns a path of disconnected line segments.
fn segments_path(segments: &[(Point2f, Point2f)]) -> BezPath {
    let mut path = BezPath::new();
    for (p0, p1) in segments.iter() {
        path.move_to((p0.x, p0.y));
        path.line_to((p1.x, p1.y));
    }
    path
}

/// Returns the paint for a palette color.
fn paint(color: Rgba<u8>) -> Color {
    Color::from_rgba8(color[0], color[1], color[2], color[3])
}

/// Stroke a path with a solid line.
fn stroke(ctx: &mut RenderContext, path: &BezPath, width: Float, color: Rgba<u8>) {
    ctx.set_paint(paint(color));
    ctx.set_stroke(Stroke::new(width));
    ctx.stroke_path(path);
}

/// Render the cross-section diagram of a prescription. Fails only when the
/// configured canvas size is out of range.
///
/// * `prescription` - The lens.
/// * `config`       - Diagram configuration.
pub fn render_diagram(prescription: &Prescription, config: &DiagramConfig) -> Result<RgbaImage, DiagramError> {
    let render_size = config.render_size()?;
    let surfaces = section_view(prescription.surfaces());
    let ss = config.supersample() as Float;
    let frame = Frame::fit(&surfaces, config);
    let vertices = vertex_positions(&surfaces);
    let elements = find_elements(&surfaces);
    let apertures = effective_semi_apertures(&surfaces, &vertices, &config.resolver);
    let palette = &config.palette;

    let mut ctx = RenderContext::new(render_size, render_size);

    // Optical axis.
    let axis = segments_path(&[(
        Point2f::new(frame.padding_x * 0.5, frame.y_center),
        Point2f::new(frame.size - frame.padding_x * 0.5, frame.y_center),
    )]);
    ctx.set_paint(paint(palette.axis));
    ctx.set_stroke(Stroke::new(AXIS_WIDTH * ss).with_dashes(0.0, [AXIS_DASH * ss, AXIS_GAP * ss]));
    ctx.stroke_path(&axis);

    // Glass.
    ctx.set_paint(paint(palette.glass_fill));
    for element in elements.iter() {
        for j in element.front..element.back {
            let polygon = glass_polygon(&surfaces, &vertices, &apertures, j, config.arc_steps, &frame);
            ctx.fill_path(&polygon_path(&polygon));
        }
    }

    // Surface profiles.
    for (i, s) in surfaces.iter().enumerate() {
        let in_element = elements.iter().any(|e| e.contains(i));
        if s.is_stop() || (s.is_planar() && !in_element) {
            continue;
        }

        let color = if elements.iter().any(|e| e.is_cemented(i)) {
            palette.cemented
        } else {
            palette.surface
        };
        let points = arc_points(s, vertices[i], apertures[i], config.arc_steps, &frame);
        stroke(&mut ctx, &polyline_path(&points), SURFACE_WIDTH * ss, color);
    }

    // Element rims.
    let mut rims = vec![];
    for element in elements.iter() {
        for j in element.front..element.back {
            for sign in [1.0, -1.0] {
                rims.push((
                    rim_point(&surfaces[j], vertices[j], apertures[j], sign, &frame),
                    rim_point(&surfaces[j + 1], vertices[j + 1], apertures[j + 1], sign, &frame),
                ));
            }
        }
    }
    stroke(&mut ctx, &segments_path(&rims), SURFACE_WIDTH * ss, palette.surface);

    let stop_index = prescription.stop_index();
    draw_stop(&mut ctx, &surfaces, &vertices, stop_index, &frame, config);
    draw_rays(&mut ctx, &surfaces, surfaces[stop_index].semi_aperture(), &frame, config);

    ctx.flush();
    let mut pixmap = Pixmap::new(render_size, render_size);
    ctx.render_to_pixmap(&mut pixmap);

    debug!("Rendered diagram for '{}'", prescription.id());
    Ok(downsample(&pixmap, config.supersample()))
}

/// Draw the stop as two blades reaching in from the largest aperture with a
/// thicker notch at the opening.
fn draw_stop(
    ctx: &mut RenderContext,
    surfaces: &[Surface],
    vertices: &[Float],
    stop_index: usize,
    frame: &Frame,
    config: &DiagramConfig,
) {
    let ss = config.supersample() as Float;
    let x = vertices[stop_index];
    let semi_ap = surfaces[stop_index].semi_aperture();
    let outer = max_semi_aperture(surfaces);
    let notch = semi_ap * config.stop_notch;

    let mut blades = vec![];
    let mut notches = vec![];
    for sign in [1.0, -1.0] {
        let ap = frame.to_px(Point2f::new(x, sign * semi_ap));
        blades.push((frame.to_px(Point2f::new(x, sign * outer)), ap));
        notches.push((ap, frame.to_px(Point2f::new(x, sign * (semi_ap - notch)))));
    }
    stroke(ctx, &segments_path(&blades), STOP_WIDTH * ss, config.palette.stop);
    stroke(ctx, &segments_path(&notches), NOTCH_WIDTH * ss, config.palette.stop);
}

/// Trace the sample rays and stroke the ones that make it through.
fn draw_rays(ctx: &mut RenderContext, surfaces: &[Surface], stop_semi_ap: Float, frame: &Frame, config: &DiagramConfig) {
    let ss = config.supersample() as Float;
    let bounds = frame.clip_bounds();

    let mut segments = vec![];
    for fraction in config.ray_fractions.iter() {
        let y0 = fraction * stop_semi_ap;
        let path = match trace_surfaces(surfaces, y0, &config.trace) {
            Ok(path) => path,
            Err(failure) => {
                trace!("Omitting sample ray at {y0}: {failure}");
                continue;
            }
        };

        let points: Vec<Point2f> = path.polyline().into_iter().map(|p| frame.to_px(p)).collect();
        segments.extend(points.windows(2).filter_map(|w| bounds.clip_segment(w[0], w[1])));
    }
    if !segments.is_empty() {
        stroke(ctx, &segments_path(&segments), RAY_WIDTH * ss, config.palette.ray);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use optics::LensMetadata;
    use proptest::prelude::*;

    fn lens(surfaces: Vec<Surface>) -> Prescription {
        Prescription::new("test", LensMetadata::new("Test", 50.0, 2.0), surfaces, None).unwrap()
    }

    fn singlet() -> Prescription {
        lens(vec![
            Surface::new(40.0, 4.0, 1.5, 30.0),
            Surface::new(-40.0, 5.0, 1.0, 30.0),
            Surface::stop(0.0, 10.0),
        ])
    }

    fn doublet() -> Prescription {
        lens(vec![
            Surface::stop(2.0, 16.0),
            Surface::new(30.0, 5.0, 1.62, 24.0),
            Surface::new(-20.0, 2.0, 1.72, 24.0),
            Surface::new(-80.0, 0.0, 1.0, 24.0),
        ])
    }

    #[test]
    fn output_size() {
        let img = render_diagram(&singlet(), &DiagramConfig::default()).unwrap();
        assert_eq!(img.dimensions(), (256, 256));

        let config = DiagramConfig {
            size: 64,
            supersample: 1,
            ..DiagramConfig::default()
        };
        assert_eq!(render_diagram(&singlet(), &config).unwrap().dimensions(), (64, 64));
    }

    #[test]
    fn background_is_transparent() {
        let img = render_diagram(&doublet(), &DiagramConfig::default()).unwrap();
        for (x, y) in [(0, 0), (255, 0), (0, 255), (255, 255)] {
            assert_eq!(img.get_pixel(x, y)[3], 0);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = DiagramConfig::default();
        let a = render_diagram(&doublet(), &config).unwrap();
        let b = render_diagram(&doublet(), &config).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn glass_is_filled() {
        let img = render_diagram(&singlet(), &DiagramConfig::default()).unwrap();
        let glass = img.pixels().filter(|p| p[3] > 0 && p[2] > p[0]).count();
        assert!(glass > 0);
    }

    #[test]
    fn vignetted_rays_are_omitted() {
        // Every sample height lies outside the lens so no ray is drawn.
        let p = lens(vec![
            Surface::new(40.0, 4.0, 1.5, 30.0),
            Surface::new(-40.0, 5.0, 1.0, 30.0),
            Surface::stop(0.0, 100.0),
        ]);
        let config = DiagramConfig::default();
        let no_rays = DiagramConfig {
            ray_fractions: vec![],
            ..DiagramConfig::default()
        };
        assert_eq!(render_diagram(&p, &config).unwrap(), render_diagram(&p, &no_rays).unwrap());
    }

    #[test]
    fn transmitted_rays_are_drawn() {
        let config = DiagramConfig::default();
        let no_rays = DiagramConfig {
            ray_fractions: vec![],
            ..DiagramConfig::default()
        };
        assert_ne!(render_diagram(&singlet(), &config).unwrap(), render_diagram(&singlet(), &no_rays).unwrap());
    }

    /// Returns the output pixel containing the lens point `(x, y)`.
    fn pixel_at(img: &RgbaImage, frame: &Frame, x: Float, y: Float, ss: Float) -> Rgba<u8> {
        let p = frame.to_px(Point2f::new(x, y));
        *img.get_pixel((p.x / ss) as u32, (p.y / ss) as u32)
    }

    #[test]
    fn stop_is_drawn_at_its_vertex() {
        let p = singlet();
        let config = DiagramConfig {
            ray_fractions: vec![],
            palette: Palette {
                stop: Rgba([255, 0, 0, 255]),
                ..Palette::default()
            },
            ..DiagramConfig::default()
        };
        let img = render_diagram(&p, &config).unwrap();
        let frame = Frame::fit(p.surfaces(), &config);
        let stop_x = p.vertex_positions()[2];
        assert_eq!(stop_x, 9.0);

        // Both blades sit between the stop opening (5) and the largest
        // aperture (15).
        for y in [10.0, -10.0] {
            let blade = pixel_at(&img, &frame, stop_x, y, 2.0);
            assert!(blade[3] > 128, "{blade:?}");
            assert!(blade[0] > 200 && blade[1] < 40 && blade[2] < 40, "{blade:?}");
        }

        // Nothing is drawn a little in front of the stop or in its opening.
        let ahead = frame.to_px(Point2f::new(stop_x, 10.0));
        let ahead = img.get_pixel((ahead.x / 2.0) as u32 - 6, (ahead.y / 2.0) as u32);
        assert_eq!(ahead[3], 0);
        let opening = pixel_at(&img, &frame, stop_x, 2.5, 2.0);
        assert_eq!(opening[3], 0);
    }

    #[test]
    fn cemented_surfaces_use_their_own_stroke() {
        let p = doublet();
        let config = DiagramConfig {
            ray_fractions: vec![],
            palette: Palette {
                glass_fill: Rgba([0, 0, 0, 0]),
                surface: Rgba([255, 0, 0, 255]),
                cemented: Rgba([0, 255, 0, 255]),
                ..Palette::default()
            },
            ..DiagramConfig::default()
        };
        let img = render_diagram(&p, &config).unwrap();
        let frame = Frame::fit(p.surfaces(), &config);
        let vertices = p.vertex_positions();
        let surfaces = p.surfaces();

        for h in [6.0, -6.0] {
            // Surface 2 joins the two glasses.
            let x = surfaces[2].profile_x(vertices[2], h);
            let cemented = pixel_at(&img, &frame, x, h, 2.0);
            assert!(cemented[3] > 128, "{cemented:?}");
            assert!(cemented[1] > 150 && cemented[0] < 60, "{cemented:?}");

            // Surface 1 faces air.
            let x = surfaces[1].profile_x(vertices[1], h);
            let outer = pixel_at(&img, &frame, x, h, 2.0);
            assert!(outer[3] > 128, "{outer:?}");
            assert!(outer[0] > 150 && outer[1] < 60, "{outer:?}");
        }
    }

    #[test]
    fn oversized_canvas_fails() {
        let config = DiagramConfig {
            size: 50000,
            ..DiagramConfig::default()
        };
        assert!(matches!(
            render_diagram(&singlet(), &config),
            Err(DiagramError::CanvasSize { .. })
        ));
    }

    #[test]
    fn cylindrical_x_is_flat_in_section() {
        let surfaces = vec![
            Surface::new(30.0, 2.0, 1.5, 20.0).with_type(SurfaceType::CylindricalX),
            Surface::new(-30.0, 0.0, 1.0, 20.0).with_type(SurfaceType::CylindricalY),
        ];
        let section = section_view(&surfaces);
        assert_eq!(section[0].radius, 0.0);
        assert_eq!(section[0].sag(9.0), 0.0);
        assert_eq!(section[1], surfaces[1]);
    }

    #[test]
    fn padding_full_for_long_systems() {
        let config = DiagramConfig::default();
        assert_eq!(adaptive_padding(10.0, 100.0, &config), 24.0);
        assert_eq!(adaptive_padding(12.0, 20.0, &config), 24.0);
    }

    #[test]
    fn padding_shrinks_for_wide_systems() {
        let config = DiagramConfig::default();
        let p = adaptive_padding(30.0, 20.0, &config);
        assert!(approx_eq!(f64, p, 8.0 + 16.0 * 0.4, epsilon = 1e-12));
        assert_eq!(adaptive_padding(30.0, 0.0, &config), 8.0);
    }

    #[test]
    fn frame_centers_axial_extent() {
        let p = doublet();
        let config = DiagramConfig::default();
        let frame = Frame::fit(p.surfaces(), &config);
        let first = frame.to_px(Point2f::new(0.0, 0.0));
        let last = frame.to_px(Point2f::new(p.axial_length(), 0.0));
        assert!(approx_eq!(f64, first.x + last.x, 512.0, epsilon = 1e-9));
        assert_eq!(first.y, 256.0);
    }

    proptest! {
        #[test]
        fn frame_fits_drawing_area(length in 0.5..500.0f64, ap in 0.5..100.0f64) {
            let surfaces = vec![
                Surface::stop(length, 2.0 * ap),
                Surface::new(0.0, 0.0, 1.0, 2.0 * ap),
            ];
            let config = DiagramConfig::default();
            let frame = Frame::fit(&surfaces, &config);
            let top = frame.to_px(Point2f::new(0.0, ap));
            let right = frame.to_px(Point2f::new(length, -ap));
            prop_assert!(top.x >= frame.padding_x - 1e-9);
            prop_assert!(top.y >= frame.padding_y - 1e-9);
            prop_assert!(right.x <= frame.size - frame.padding_x + 1e-9);
            prop_assert!(right.y <= frame.size - frame.padding_y + 1e-9);
        }
    }
}
