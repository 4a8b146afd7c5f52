//! Hex formatting of cluster centers.

use palette::Srgb;

/// Ordered `#rrggbb` strings, one per cluster center.
pub type Palette = Vec<String>;

/// Lowercase, zero-padded `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Round every center to 8-bit channels and format it, keeping the order the
/// quantizer produced.
pub fn format_palette(centers: &[Srgb<f32>]) -> Palette {
    centers
        .iter()
        .map(|&c| to_hex(c.into_format::<u8>()))
        .collect()
}
