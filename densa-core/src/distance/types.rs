//! Domain primitives shared by the distance routines.

use core::{fmt, ops::Deref};

use thiserror::Error;

/// Identifies whether an error was produced while inspecting the left or right
/// vector argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors emitted while computing distances.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DistanceError {
    /// Either input vector had zero length.
    #[error("vectors must have positive dimension")]
    ZeroLength,
    /// Input vectors had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand vector.
        left: usize,
        /// Dimensionality of the right-hand vector.
        right: usize,
    },
    /// Encountered a non-finite value in one of the vectors.
    #[error("{which} vector contains a non-finite value at index {index}: {value}")]
    NonFinite {
        /// Vector holding the value.
        which: VectorKind,
        /// Coordinate position of the value.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// Cosine distance is undefined for zero-magnitude vectors.
    #[error("{which} vector has zero magnitude")]
    ZeroMagnitude {
        /// Vector with zero magnitude.
        which: VectorKind,
    },
}

/// Convenient alias for distance computations.
pub type Result<T> = core::result::Result<T, DistanceError>;

/// Vector newtype that validates dimensionality and finiteness on construction.
#[derive(Clone, Copy, Debug)]
pub struct Vector<'a>(&'a [f64]);

impl<'a> Vector<'a> {
    /// Validates and constructs a [`Vector`].
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::ZeroLength`] when the slice is empty and
    /// [`DistanceError::NonFinite`] when a value is NaN or infinite.
    pub fn new(values: &'a [f64], which: VectorKind) -> Result<Self> {
        if values.is_empty() {
            return Err(DistanceError::ZeroLength);
        }

        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(DistanceError::NonFinite {
                which,
                index,
                value: *value,
            });
        }

        Ok(Self(values))
    }

    /// Returns the dimensionality of the vector.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[f64]> for Vector<'_> {
    fn as_ref(&self) -> &[f64] {
        self.0
    }
}

impl Deref for Vector<'_> {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}
