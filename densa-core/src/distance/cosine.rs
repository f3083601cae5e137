use crate::distance::helpers::{accumulate_components, validated_pair};
use crate::distance::types::{DistanceError, Result, VectorKind};

/// Computes the cosine distance (`1 - cosine similarity`) between two vectors.
///
/// # Examples
///
/// ```
/// use densa_core::{DistanceError, distance::cosine_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let orthogonal = cosine_distance(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0])?;
///     assert!((orthogonal - 1.0).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::ZeroLength`] when any input is empty.
/// - [`DistanceError::DimensionMismatch`] when input lengths differ.
/// - [`DistanceError::NonFinite`] when a value is NaN or infinite.
/// - [`DistanceError::ZeroMagnitude`] when either vector has zero L2 norm.
pub fn cosine_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;
    let (dot, left_squares, right_squares) = accumulate_components(&left, &right);

    if left_squares == 0.0 {
        return Err(DistanceError::ZeroMagnitude {
            which: VectorKind::Left,
        });
    }
    if right_squares == 0.0 {
        return Err(DistanceError::ZeroMagnitude {
            which: VectorKind::Right,
        });
    }

    let similarity = dot / (left_squares.sqrt() * right_squares.sqrt());
    // Theoretical range is [-1, 1], but numerical noise can spill over.
    let similarity = similarity.clamp(-1.0, 1.0);

    Ok(1.0 - similarity)
}
