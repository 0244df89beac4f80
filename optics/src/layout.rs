//! Axial layout of a surface stack

use crate::common::*;
use crate::surface::Surface;

/// Returns the axial position of each surface vertex. The first vertex sits
/// at 0 and each subsequent one is offset by the preceding thickness.
///
/// * `surfaces` - Surfaces in optical order.
pub fn vertex_positions(surfaces: &[Surface]) -> Vec<Float> {
    let mut positions = Vec::with_capacity(surfaces.len());
    let mut x = 0.0;
    for s in surfaces.iter() {
        positions.push(x);
        x += s.thickness;
    }
    positions
}

/// Returns the distance between the first and last vertex.
///
/// * `surfaces` - Surfaces in optical order.
pub fn axial_length(surfaces: &[Surface]) -> Float {
    match surfaces.split_last() {
        Some((_, rest)) => rest.iter().map(|s| s.thickness).sum(),
        None => 0.0,
    }
}

/// Returns the largest nominal semi-aperture.
///
/// * `surfaces` - Surfaces in optical order.
pub fn max_semi_aperture(surfaces: &[Surface]) -> Float {
    surfaces.iter().fold(0.0, |a, s| max(a, s.semi_aperture()))
}

/// A maximal run of surfaces enclosing glass: `front` enters the glass and
/// `back` exits it back to air.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Index of the first surface.
    pub front: usize,

    /// Index of the last surface.
    pub back: usize,
}

impl Element {
    /// Returns true if surface `i` is an interior, cemented interface.
    ///
    /// * `i` - Surface index.
    pub fn is_cemented(&self, i: usize) -> bool {
        self.front < i && i < self.back
    }

    /// Returns true if surface `i` belongs to the element.
    ///
    /// * `i` - Surface index.
    pub fn contains(&self, i: usize) -> bool {
        self.front <= i && i <= self.back
    }
}

/// Groups consecutive glass-bounding surfaces into elements.
///
/// * `surfaces` - Surfaces in optical order.
pub fn find_elements(surfaces: &[Surface]) -> Vec<Element> {
    let mut elements = vec![];
    let mut start: Option<usize> = None;
    for (i, s) in surfaces.iter().enumerate() {
        match (s.is_glass(), start) {
            (true, None) => start = Some(i),
            (false, Some(front)) => {
                elements.push(Element { front, back: i });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(front) = start {
        elements.push(Element {
            front,
            back: surfaces.len() - 1,
        });
    }
    elements
}
