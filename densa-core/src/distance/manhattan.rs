use crate::distance::helpers::validated_pair;
use crate::distance::types::Result;

/// Computes the Manhattan (L1) distance between two vectors.
///
/// # Examples
///
/// ```
/// use densa_core::{DistanceError, distance::manhattan_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = manhattan_distance(&[1.0, 2.0], &[4.0, -2.0])?;
///     assert!((distance - 7.0).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Fails with the same validation errors as [`crate::euclidean_distance`].
pub fn manhattan_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;
    Ok(left
        .iter()
        .zip(right.iter())
        .map(|(&l, &r)| (l - r).abs())
        .sum())
}
