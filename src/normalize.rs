//! Decoding and normalization of input images into an opaque RGB grid.

use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage, imageops::FilterType};
use log::debug;

use crate::error::{PaletteError, Result};

/// Side length every image is resized to before sampling.
pub const CANONICAL_SIZE: u32 = 150;

/// Largest resize target accepted; keeps the grid allocation bounded.
pub const MAX_CANONICAL_SIZE: u32 = 4096;

/// Containers accepted by [`decode`]. Anything else is rejected even if the
/// `image` crate could read it.
const SUPPORTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Decode raw bytes into an image.
///
/// The container format is sniffed from the magic bytes, so callers never need
/// to pass a content type along.
pub fn decode(input: &[u8]) -> Result<DynamicImage> {
    if input.is_empty() {
        return Err(PaletteError::EmptyInput);
    }

    let format = image::guess_format(input)
        .map_err(|e| PaletteError::decode("unrecognized image format", e))?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(PaletteError::Decode {
            message: format!("unsupported image format {format:?}"),
            source: None,
        });
    }

    let img = image::load_from_memory_with_format(input, format)
        .map_err(|e| PaletteError::decode(format!("invalid {format:?} data"), e))?;
    let (w, h) = img.dimensions();
    debug!("decoded {format:?} image {w}x{h} ({:?})", img.color());
    Ok(img)
}

/// Drop transparency by compositing over opaque white.
///
/// Images without an alpha channel are converted straight to RGB; grayscale
/// values end up replicated over the three channels.
pub fn flatten(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut out = RgbImage::new(w, h);
    for (src, dst) in rgba.pixels().zip(out.pixels_mut()) {
        let [r, g, b, a] = src.0;
        let alpha = a as f32 / 255.0;
        let over_white = |c: u8| (alpha * c as f32 + (1.0 - alpha) * 255.0).round().clamp(0.0, 255.0) as u8;
        dst.0 = [over_white(r), over_white(g), over_white(b)];
    }
    out
}

/// Flatten and resize to `size`×`size`, ignoring the original aspect ratio.
///
/// A zero-area image stays zero-area; the sampler turns it into an empty
/// palette.
pub fn normalize(img: &DynamicImage, size: u32) -> RgbImage {
    let rgb = flatten(img);
    let (w, h) = rgb.dimensions();
    if w == 0 || h == 0 {
        return RgbImage::new(0, 0);
    }
    image::imageops::resize(&rgb, size, size, FilterType::CatmullRom)
}
