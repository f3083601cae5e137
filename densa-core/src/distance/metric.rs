//! Pluggable distance metrics.

use super::{cosine_distance, euclidean_distance, manhattan_distance, types::Result};

/// Distance between two points of equal dimension.
///
/// Implementations must be pure, symmetric and non-negative, and must return
/// zero for identical inputs.
///
/// # Examples
/// ```
/// use densa_core::{DistanceError, Metric};
///
/// struct Chebyshev;
///
/// impl Metric for Chebyshev {
///     fn name(&self) -> &str { "chebyshev" }
///     fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64, DistanceError> {
///         if left.len() != right.len() {
///             return Err(DistanceError::DimensionMismatch { left: left.len(), right: right.len() });
///         }
///         Ok(left.iter().zip(right).map(|(l, r)| (l - r).abs()).fold(0.0, f64::max))
///     }
///     fn axis_bounded(&self) -> bool { true }
/// }
///
/// assert_eq!(Chebyshev.distance(&[0.0, 0.0], &[3.0, -4.0])?, 4.0);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait Metric {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Computes the distance between `left` and `right`.
    ///
    /// # Errors
    /// Returns a [`crate::DistanceError`] when the inputs are incompatible,
    /// most commonly [`crate::DistanceError::DimensionMismatch`].
    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64>;

    /// Whether `|left[k] - right[k]| <= distance(left, right)` holds on every
    /// axis `k`.
    ///
    /// Axis-bounded metrics can be served by the grid neighbourhood index.
    fn axis_bounded(&self) -> bool {
        false
    }
}

/// Straight-line (L2) distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn name(&self) -> &str {
        "euclidean"
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64> {
        euclidean_distance(left, right)
    }

    fn axis_bounded(&self) -> bool {
        true
    }
}

/// City-block (L1) distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Metric for Manhattan {
    fn name(&self) -> &str {
        "manhattan"
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64> {
        manhattan_distance(left, right)
    }

    fn axis_bounded(&self) -> bool {
        true
    }
}

/// Angular distance, `1 - cos(theta)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cosine;

impl Metric for Cosine {
    fn name(&self) -> &str {
        "cosine"
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64> {
        cosine_distance(left, right)
    }
}

impl<M: Metric + ?Sized> Metric for &M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64> {
        (**self).distance(left, right)
    }

    fn axis_bounded(&self) -> bool {
        (**self).axis_bounded()
    }
}
