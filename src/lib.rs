//! Dominant color extraction.
//!
//! Turns raw image bytes into a short list of `#rrggbb` strings summarizing the
//! image's main colors:
//!
//! 1. decode and composite transparency over white, then resize to a
//!    canonical square ([`normalize`]);
//! 2. draw a bounded sample of pixels ([`sample`]);
//! 3. run k-means in sRGB space, several initializations, keep the tightest
//!    ([`quantize`]);
//! 4. format the centers as hex, in clustering order ([`format`]).
//!
//! ```rust,no_run
//! use dominant_colors::{ExtractOptions, extract_palette};
//!
//! let bytes = std::fs::read("photo.png")?;
//! let colors = extract_palette(&bytes, &ExtractOptions::default().with_seed(42))?;
//! println!("{colors:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use js_sys::Array;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::prelude::*;

pub mod error;
pub mod format;
pub mod normalize;
pub mod quantize;
pub mod sample;

pub use error::{PaletteError, Result};
pub use format::{Palette, format_palette, to_hex};
pub use quantize::KMeansConfig;

/// Palette size used when the caller does not ask for one.
pub const DEFAULT_NUM_COLORS: usize = 3;

/// Everything that can be tuned about one extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractOptions {
    pub num_colors: usize,
    /// Seeds both pixel sampling and k-means. `None` draws from the OS.
    pub seed: Option<u64>,
    pub sample_cap: usize,
    pub canonical_size: u32,
    pub kmeans: KMeansConfig,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            num_colors: DEFAULT_NUM_COLORS,
            seed: None,
            sample_cap: sample::SAMPLE_CAP,
            canonical_size: normalize::CANONICAL_SIZE,
            kmeans: KMeansConfig::default(),
        }
    }
}

impl ExtractOptions {
    pub fn with_num_colors(mut self, num_colors: usize) -> Self {
        self.num_colors = num_colors;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sample_cap(mut self, sample_cap: usize) -> Self {
        self.sample_cap = sample_cap;
        self
    }

    pub fn with_canonical_size(mut self, size: u32) -> Self {
        self.canonical_size = size;
        self
    }

    pub fn with_kmeans(mut self, kmeans: KMeansConfig) -> Self {
        self.kmeans = kmeans;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.num_colors == 0 {
            return Err(PaletteError::invalid("num_colors", self.num_colors));
        }
        if self.sample_cap == 0 {
            return Err(PaletteError::invalid("sample_cap", self.sample_cap));
        }
        if self.canonical_size == 0 || self.canonical_size > normalize::MAX_CANONICAL_SIZE {
            return Err(PaletteError::invalid("canonical_size", self.canonical_size));
        }
        if self.kmeans.runs == 0 {
            return Err(PaletteError::invalid("runs", self.kmeans.runs));
        }
        Ok(())
    }
}

/// Extract the dominant colors of an encoded PNG, JPEG or WEBP image.
///
/// Returns exactly `options.num_colors` colors, or an empty palette when the
/// image cannot be split that many ways (zero area, a single color, or fewer
/// distinct colors than requested). Bad input is reported as
/// [`PaletteError::EmptyInput`] or [`PaletteError::Decode`].
pub fn extract_palette(input: &[u8], options: &ExtractOptions) -> Result<Palette> {
    options.validate()?;

    let img = normalize::decode(input)?;
    let grid = normalize::normalize(&img, options.canonical_size);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let samples = sample::sample(&grid, options.sample_cap, &mut rng);
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let kmeans_seed: u64 = rng.random();
    let centers = match quantize::quantize(&samples, options.num_colors, &options.kmeans, kmeans_seed) {
        Ok(centers) => centers,
        Err(PaletteError::Clustering { requested, distinct }) => {
            info!("only {distinct} distinct colors for {requested} clusters, returning empty palette");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let palette = format_palette(&centers);
    debug!("palette: {palette:?}");
    Ok(palette)
}

/// [`extract_palette`] with default options and OS randomness.
pub fn extract_dominant_colors(input: &[u8], num_colors: usize) -> Result<Palette> {
    extract_palette(input, &ExtractOptions::default().with_num_colors(num_colors))
}

/// JS entry point. Resolves to an array of `#rrggbb` strings.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    input: Vec<u8>,
    num_colors: Option<usize>,
    seed: Option<u64>,
) -> std::result::Result<Array, JsValue> {
    let mut options = ExtractOptions::default().with_num_colors(num_colors.unwrap_or(DEFAULT_NUM_COLORS));
    options.seed = seed;

    let palette = extract_palette(&input, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let out = Array::new();
    for hex in palette {
        out.push(&JsValue::from_str(&hex));
    }
    Ok(out)
}
