//! Pixel sampling: bounded, representative working set for clustering.

use std::collections::HashSet;

use image::RgbImage;
use log::{debug, info};
use palette::Srgb;
use rand::Rng;

/// Upper bound on the number of pixels handed to the quantizer.
pub const SAMPLE_CAP: usize = 1000;

/// Pixels drawn from a grid, in the order they were picked.
pub type SampleSet = Vec<Srgb<u8>>;

/// Flatten `grid` row-major and keep at most `cap` pixels.
///
/// * Zero-area grids and grids of a single repeated color give an empty set;
///   neither can be split into several meaningful clusters.
/// * If the grid holds no more than `cap` pixels, all of them are returned in
///   row-major order.
/// * Otherwise exactly `cap` pixels are drawn uniformly without replacement.
pub fn sample<R: Rng + ?Sized>(grid: &RgbImage, cap: usize, rng: &mut R) -> SampleSet {
    let population: Vec<Srgb<u8>> = grid
        .pixels()
        .map(|p| Srgb::new(p.0[0], p.0[1], p.0[2]))
        .collect();

    if population.is_empty() {
        info!("zero-area image, nothing to sample");
        return Vec::new();
    }
    if population.iter().all(|c| *c == population[0]) {
        info!(
            "uniform image ({}), nothing to cluster",
            crate::format::to_hex(population[0])
        );
        return Vec::new();
    }

    if population.len() <= cap {
        debug!("using all {} pixels", population.len());
        return population;
    }

    debug!("sampling {cap} of {} pixels", population.len());
    rand::seq::index::sample(rng, population.len(), cap)
        .into_iter()
        .map(|i| population[i])
        .collect()
}

/// Number of different colors in a sample set.
pub fn distinct_colors(samples: &[Srgb<u8>]) -> usize {
    samples
        .iter()
        .map(|c| c.into_components())
        .collect::<HashSet<_>>()
        .len()
}
