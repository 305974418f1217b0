//! Debug rasterisation of a solved layout.
//!
//! Paints each visible block with a translucent colour drawn from a seeded
//! generator. Reads finished placements only; nothing here affects geometry.

use crate::{
    config::model::Visibility,
    foundation::core::{PixelRect, Rect},
    foundation::error::{MetroError, MetroResult},
    layout::solver::LayoutOutput,
};

/// Largest preview, in pixels, that [`render_preview`] will allocate (64 Mpx,
/// 256 MiB of RGBA).
pub const MAX_PREVIEW_PIXELS: u64 = 64 * 1024 * 1024;

/// Settings for [`render_preview`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Palette seed; the same seed always yields the same colours.
    pub seed: u64,
    /// Straight-alpha opacity of every block.
    pub alpha: u8,
    /// Opaque background colour, RGBA.
    pub background: [u8; 4],
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            seed: 255,
            alpha: 100,
            background: [18, 20, 28, 255],
        }
    }
}

/// Deterministic block colours (SplitMix64).
#[derive(Clone, Copy, Debug)]
pub struct DebugPalette {
    state: u64,
    alpha: u8,
}

impl DebugPalette {
    pub fn new(seed: u64, alpha: u8) -> Self {
        Self { state: seed, alpha }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Next straight-alpha RGBA colour.
    pub fn next_color(&mut self) -> [u8; 4] {
        let v = self.next_u64().to_le_bytes();
        [v[0], v[1], v[2], self.alpha]
    }
}

impl Iterator for DebugPalette {
    type Item = [u8; 4];

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_color())
    }
}

/// Rasterise `output` into an RGBA image.
///
/// The image is as wide as the container and as tall as the larger of the
/// container height and the content height. Colours are assigned in placement
/// order, hidden blocks included, so toggling visibility keeps the others stable.
///
/// Fails with [`MetroError::Validation`] when the image would exceed
/// [`MAX_PREVIEW_PIXELS`].
pub fn render_preview(
    output: &LayoutOutput,
    opts: &PreviewOptions,
) -> MetroResult<image::RgbaImage> {
    let width = output.container.width;
    let height = output
        .container
        .height
        .max(u32::try_from(output.content_height).unwrap_or(0));

    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_PREVIEW_PIXELS {
        return Err(MetroError::validation(format!(
            "preview of {width}x{height} px exceeds the {MAX_PREVIEW_PIXELS} pixel budget"
        )));
    }

    let mut img = image::RgbaImage::from_pixel(width, height, image::Rgba(opts.background));
    let palette = DebugPalette::new(opts.seed, opts.alpha);

    for (placement, color) in output.placements.iter().zip(palette) {
        if placement.visibility != Visibility::Visible {
            continue;
        }
        fill_rect(&mut img, placement.rect, premultiply(color));
    }
    Ok(img)
}

fn fill_rect(img: &mut image::RgbaImage, rect: PixelRect, src: [u8; 4]) {
    let bounds = Rect::new(0.0, 0.0, f64::from(img.width()), f64::from(img.height()));
    let clip = rect.to_kurbo().intersect(bounds);
    if clip.width() <= 0.0 || clip.height() <= 0.0 {
        return;
    }
    // Edges are whole pixels already, so the casts are exact.
    let (x0, x1) = (clip.x0 as u32, clip.x1 as u32);
    let (y0, y1) = (clip.y0 as u32, clip.y1 as u32);

    for y in y0..y1 {
        for x in x0..x1 {
            let px = img.get_pixel_mut(x, y);
            px.0 = over(px.0, src);
        }
    }
}

fn premultiply(c: [u8; 4]) -> [u8; 4] {
    let a = u16::from(c[3]);
    [
        mul_div255(u16::from(c[0]), a),
        mul_div255(u16::from(c[1]), a),
        mul_div255(u16::from(c[2]), a),
        c[3],
    ]
}

/// Premultiplied source-over.
fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let d = mul_div255(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(d);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
