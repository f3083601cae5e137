use crate::distance::helpers::validated_pair;
use crate::distance::types::Result;

/// Computes the Euclidean distance between two vectors.
///
/// # Examples
///
/// ```
/// use densa_core::{DistanceError, distance::euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance - 7.071_067_811).abs() < 1e-9);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`crate::DistanceError::ZeroLength`] when any input is empty.
/// - [`crate::DistanceError::DimensionMismatch`] when input lengths differ.
/// - [`crate::DistanceError::NonFinite`] when a value is NaN or infinite.
pub fn euclidean_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;

    let mut sum = 0.0f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let diff = l - r;
        sum += diff * diff;
    }

    Ok(sum.sqrt())
}
