//! Seeded synthetic datasets for clustering benchmarks.
//!
//! Blobs are placed on a circle in the first two coordinates with uniform
//! jitter on every axis, plus a share of uniformly scattered noise points.

use std::f64::consts::PI;

use densa_core::{Dataset, DatasetError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors raised by [`generate_blobs`] for invalid configurations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntheticError {
    /// No points were requested.
    #[error("point_count must be positive")]
    ZeroPoints,
    /// No coordinates per point were requested.
    #[error("dimensions must be positive")]
    ZeroDimensions,
    /// Blob count was zero.
    #[error("cluster_count must be positive")]
    ZeroClusters,
    /// More blobs than points.
    #[error("cluster_count {cluster_count} exceeds point_count {point_count}")]
    ClusterCountExceedsPointCount {
        /// Requested blobs.
        cluster_count: usize,
        /// Requested points.
        point_count: usize,
    },
    /// A float parameter was non-finite or out of range.
    #[error("{parameter} must be finite and within range")]
    InvalidFloatParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The generated buffer was rejected by the dataset.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Shape of a synthetic blob dataset.
#[derive(Clone, Debug)]
pub struct BlobConfig {
    /// Total points, noise included.
    pub point_count: usize,
    /// Number of blobs.
    pub cluster_count: usize,
    /// Coordinates per point.
    pub dimensions: usize,
    /// Radius of the circle the blob centres sit on.
    pub separation: f64,
    /// Half-width of the uniform jitter around each centre.
    pub spread: f64,
    /// Fraction of points scattered uniformly over the bounding box.
    pub noise_fraction: f64,
    /// RNG seed.
    pub seed: u64,
}

impl BlobConfig {
    /// Two-dimensional blobs sized for benchmark sweeps.
    #[must_use]
    pub const fn planar(point_count: usize, seed: u64) -> Self {
        Self {
            point_count,
            cluster_count: 8,
            dimensions: 2,
            separation: 10.0,
            spread: 1.0,
            noise_fraction: 0.05,
            seed,
        }
    }

    fn validate(&self) -> Result<(), SyntheticError> {
        if self.point_count == 0 {
            return Err(SyntheticError::ZeroPoints);
        }
        if self.dimensions == 0 {
            return Err(SyntheticError::ZeroDimensions);
        }
        if self.cluster_count == 0 {
            return Err(SyntheticError::ZeroClusters);
        }
        if self.cluster_count > self.point_count {
            return Err(SyntheticError::ClusterCountExceedsPointCount {
                cluster_count: self.cluster_count,
                point_count: self.point_count,
            });
        }
        if !self.separation.is_finite() || self.separation <= 0.0 {
            return Err(SyntheticError::InvalidFloatParameter {
                parameter: "separation",
            });
        }
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(SyntheticError::InvalidFloatParameter { parameter: "spread" });
        }
        if !(0.0..1.0).contains(&self.noise_fraction) {
            return Err(SyntheticError::InvalidFloatParameter {
                parameter: "noise_fraction",
            });
        }
        Ok(())
    }
}

/// Generates a deterministic blob dataset named `blobs-<seed>`.
///
/// # Errors
/// Returns [`SyntheticError`] when the configuration is invalid.
///
/// # Examples
/// ```
/// use densa_benches::source::{BlobConfig, generate_blobs};
///
/// let dataset = generate_blobs(&BlobConfig::planar(200, 7)).expect("valid config");
/// assert_eq!(dataset.len(), 200);
/// assert_eq!(dataset.dimension(), 2);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "point placement is floating-point geometry"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "point counts are far below the f64 mantissa"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "noise share is a non-negative fraction of point_count"
)]
pub fn generate_blobs(config: &BlobConfig) -> Result<Dataset, SyntheticError> {
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let noise_count = (config.point_count as f64 * config.noise_fraction) as usize;
    let blob_count = config.point_count - noise_count;
    let bound = config.separation + config.spread;

    let centres: Vec<Vec<f64>> = (0..config.cluster_count)
        .map(|cluster_index| {
            let angle = cluster_index as f64 / config.cluster_count as f64 * 2.0 * PI;
            let mut centre = vec![0.0; config.dimensions];
            if let Some(value) = centre.get_mut(0) {
                *value = config.separation * angle.cos();
            }
            if let Some(value) = centre.get_mut(1) {
                *value = config.separation * angle.sin();
            }
            centre
        })
        .collect();

    let mut values = Vec::with_capacity(config.point_count * config.dimensions);
    for centre in centres.iter().cycle().take(blob_count) {
        values.extend(
            centre
                .iter()
                .map(|&coordinate| coordinate + rng.gen_range(-config.spread..config.spread)),
        );
    }
    for _ in 0..noise_count * config.dimensions {
        values.push(rng.gen_range(-bound..bound));
    }

    Ok(Dataset::from_row_major(
        format!("blobs-{}", config.seed),
        config.dimensions,
        values,
    )?)
}
