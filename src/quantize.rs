//! k-means color quantization in sRGB space.

use kmeans_colors::{Kmeans, get_kmeans};
use log::debug;
use palette::Srgb;

use crate::error::{PaletteError, Result};
use crate::sample::distinct_colors;

/// `kmeans_colors` stores cluster assignments as `u8`.
pub const MAX_COLORS: usize = 256;

/// Tunables for the clustering step.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansConfig {
    /// Independent k-means++ initializations; the lowest-inertia one wins.
    pub runs: usize,
    pub max_iter: usize,
    /// Stop once centroids move less than this (squared, channels in 0..=1).
    pub converge: f32,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            max_iter: 300,
            converge: 1e-4,
        }
    }
}

/// Cluster `samples` into `num_colors` groups and return their centers.
///
/// Each run `i` is seeded with `seed + i`, so the same inputs always give the
/// same centers. Centers come back in the order the winning run produced them.
///
/// Fails with [`PaletteError::Clustering`] when there are fewer distinct
/// colors than requested clusters, whatever the requested count. A count
/// above [`MAX_COLORS`] that the samples could satisfy is an
/// [`PaletteError::InvalidParameter`].
pub fn quantize(
    samples: &[Srgb<u8>],
    num_colors: usize,
    config: &KMeansConfig,
    seed: u64,
) -> Result<Vec<Srgb<f32>>> {
    if num_colors == 0 {
        return Err(PaletteError::invalid("num_colors", num_colors));
    }
    if config.runs == 0 {
        return Err(PaletteError::invalid("runs", config.runs));
    }
    if samples.is_empty() {
        return Err(PaletteError::invalid("samples", "empty"));
    }

    let distinct = distinct_colors(samples);
    if num_colors > distinct {
        return Err(PaletteError::Clustering {
            requested: num_colors,
            distinct,
        });
    }
    if num_colors > MAX_COLORS {
        return Err(PaletteError::invalid("num_colors", num_colors));
    }

    let points: Vec<Srgb<f32>> = samples.iter().map(|c| c.into_format()).collect();

    let mut best: Option<(f32, Kmeans<Srgb<f32>>)> = None;
    for run in 0..config.runs {
        let result = get_kmeans(
            num_colors,
            config.max_iter,
            config.converge,
            false,
            &points,
            seed.wrapping_add(run as u64),
        );
        let score = inertia(&points, &result.centroids);
        if best.as_ref().is_none_or(|(best_score, _)| score < *best_score) {
            best = Some((score, result));
        }
    }

    let (score, result) = best.ok_or_else(|| PaletteError::invalid("runs", config.runs))?;
    debug!(
        "k-means: {} samples, k = {num_colors}, best inertia {score:.5} over {} runs",
        points.len(),
        config.runs
    );
    Ok(result.centroids)
}

/// Sum of squared distances from each point to its nearest center.
///
/// `kmeans_colors` hands back assignments made before the last centroid
/// update, so they are recomputed here against the final centers.
pub(crate) fn inertia(points: &[Srgb<f32>], centers: &[Srgb<f32>]) -> f32 {
    points
        .iter()
        .map(|p| {
            centers
                .iter()
                .map(|c| squared_distance(*p, *c))
                .fold(f32::INFINITY, f32::min)
        })
        .sum()
}

fn squared_distance(a: Srgb<f32>, b: Srgb<f32>) -> f32 {
    let dr = a.red - b.red;
    let dg = a.green - b.green;
    let db = a.blue - b.blue;
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Srgb<u8>> {
        let mut samples = Vec::new();
        for i in 0..30u8 {
            samples.push(Srgb::new(250 - i % 5, i % 3, 0));
            samples.push(Srgb::new(0, 250 - i % 4, i % 2));
            samples.push(Srgb::new(i % 3, 0, 250 - i % 5));
        }
        samples
    }

    fn rounded(centers: &[Srgb<f32>]) -> Vec<Srgb<u8>> {
        centers.iter().map(|c| c.into_format()).collect()
    }

    #[test]
    fn finds_one_center_per_blob() {
        let centers = quantize(&blobs(), 3, &KMeansConfig::default(), 42).unwrap();
        assert_eq!(centers.len(), 3);

        let mut dominant: Vec<usize> = rounded(&centers)
            .iter()
            .map(|c| {
                let (r, g, b) = c.into_components();
                if r > 200 {
                    0
                } else if g > 200 {
                    1
                } else {
                    assert!(b > 200, "unexpected center {c:?}");
                    2
                }
            })
            .collect();
        dominant.sort();
        assert_eq!(dominant, vec![0, 1, 2]);
    }

    #[test]
    fn same_seed_same_centers() {
        let config = KMeansConfig::default();
        let a = quantize(&blobs(), 2, &config, 9).unwrap();
        let b = quantize(&blobs(), 2, &config, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn more_clusters_than_distinct_colors_is_a_clustering_error() {
        let samples = vec![Srgb::new(255u8, 0, 0), Srgb::new(0, 0, 255), Srgb::new(255, 0, 0)];
        match quantize(&samples, 3, &KMeansConfig::default(), 0) {
            Err(PaletteError::Clustering { requested, distinct }) => {
                assert_eq!((requested, distinct), (3, 2));
            }
            other => panic!("expected clustering error, got {other:?}"),
        }
    }

    #[test]
    fn exactly_distinct_many_clusters_recovers_the_colors() {
        let samples = vec![Srgb::new(255u8, 0, 0), Srgb::new(0, 0, 255), Srgb::new(0, 0, 255)];
        let mut centers = rounded(&quantize(&samples, 2, &KMeansConfig::default(), 3).unwrap());
        centers.sort_by_key(|c| c.into_components());
        assert_eq!(centers, vec![Srgb::new(0, 0, 255), Srgb::new(255, 0, 0)]);
    }

    #[test]
    fn rejects_unusable_parameters() {
        let config = KMeansConfig::default();
        assert!(matches!(
            quantize(&blobs(), 0, &config, 0),
            Err(PaletteError::InvalidParameter { .. })
        ));
        assert!(matches!(
            quantize(&[], 2, &config, 0),
            Err(PaletteError::InvalidParameter { .. })
        ));
        let no_runs = KMeansConfig { runs: 0, ..config };
        assert!(matches!(
            quantize(&blobs(), 2, &no_runs, 0),
            Err(PaletteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn more_runs_never_raise_inertia() {
        let points: Vec<Srgb<f32>> = blobs().iter().map(|c| c.into_format()).collect();
        let single = get_kmeans(3, 300, 1e-4, false, &points, 5);
        let single_score = inertia(&points, &single.centroids);

        let centers = quantize(&blobs(), 3, &KMeansConfig::default(), 5).unwrap();
        assert!(inertia(&points, &centers) <= single_score);
    }

    #[test]
    fn inertia_uses_the_nearest_center() {
        let points = [Srgb::new(0.0f32, 0.0, 0.0), Srgb::new(1.0, 0.0, 0.0)];
        let centers = [Srgb::new(1.0f32, 0.0, 0.0), Srgb::new(0.0, 0.0, 0.1)];
        assert!((inertia(&points, &centers) - 0.01).abs() < 1e-6);
        assert_eq!(inertia(&points, &points), 0.0);
    }

    #[test]
    fn too_many_colors_for_the_samples_is_a_clustering_error_past_the_cap() {
        let samples = vec![Srgb::new(255u8, 0, 0), Srgb::new(0, 0, 255)];
        assert!(matches!(
            quantize(&samples, MAX_COLORS + 44, &KMeansConfig::default(), 1),
            Err(PaletteError::Clustering { requested: 300, distinct: 2 })
        ));
    }

    #[test]
    fn satisfiable_count_past_the_cap_is_invalid() {
        let samples: Vec<Srgb<u8>> = (0..300u32)
            .map(|i| Srgb::new((i % 256) as u8, (i / 256) as u8, 7))
            .collect();
        assert!(matches!(
            quantize(&samples, MAX_COLORS + 1, &KMeansConfig::default(), 1),
            Err(PaletteError::InvalidParameter { .. })
        ));
    }
}
