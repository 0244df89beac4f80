//! Raster Conversion

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use vello_cpu::Pixmap;

/// Returns the pixmap as an image whose channels are still premultiplied by
/// alpha.
///
/// * `pixmap` - Rendered pixmap.
pub fn premultiplied_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width() as u32;
    let data = pixmap.data_as_u8_slice();
    RgbaImage::from_fn(width, pixmap.height() as u32, |x, y| {
        let i = 4 * (y * width + x) as usize;
        Rgba([data[i], data[i + 1], data[i + 2], data[i + 3]])
    })
}

/// Returns the straight-alpha form of a premultiplied pixel.
///
/// * `p` - Premultiplied pixel.
pub fn unpremultiply(p: Rgba<u8>) -> Rgba<u8> {
    let a = p[3];
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
    Rgba([channel(p[0]), channel(p[1]), channel(p[2]), a])
}

/// Reduce a supersampled pixmap by `factor` along both axes and convert it
/// to straight alpha. Filtering happens on premultiplied values so
/// transparent pixels do not darken edges.
///
/// * `pixmap` - Rendered pixmap.
/// * `factor` - Supersampling factor.
pub fn downsample(pixmap: &Pixmap, factor: u32) -> RgbaImage {
    let premultiplied = premultiplied_image(pixmap);
    let factor = factor.max(1);

    let mut image = if factor == 1 {
        premultiplied
    } else {
        let (w, h) = premultiplied.dimensions();
        imageops::resize(&premultiplied, w / factor, h / factor, FilterType::Triangle)
    };
    for p in image.pixels_mut() {
        *p = unpremultiply(*p);
    }
    image
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
