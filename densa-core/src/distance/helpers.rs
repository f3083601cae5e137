//! Shared helpers for distance implementations.

use super::types::{DistanceError, Result, Vector, VectorKind};

/// Validates both slices and ensures they share the same dimensionality.
pub(crate) fn validated_pair<'a>(
    left: &'a [f64],
    right: &'a [f64],
) -> Result<(Vector<'a>, Vector<'a>)> {
    let left = Vector::new(left, VectorKind::Left)?;
    let right = Vector::new(right, VectorKind::Right)?;
    if left.dimension() != right.dimension() {
        return Err(DistanceError::DimensionMismatch {
            left: left.dimension(),
            right: right.dimension(),
        });
    }
    Ok((left, right))
}

/// Accumulates the dot product and squared magnitudes across both vectors.
pub(crate) fn accumulate_components(left: &Vector<'_>, right: &Vector<'_>) -> (f64, f64, f64) {
    let mut dot = 0.0f64;
    let mut left_squares = 0.0f64;
    let mut right_squares = 0.0f64;

    for (&l, &r) in left.iter().zip(right.iter()) {
        dot += l * r;
        left_squares += l * l;
        right_squares += r * r;
    }

    (dot, left_squares, right_squares)
}
