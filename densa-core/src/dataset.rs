//! Immutable point storage consumed by the clustering engine.

use std::sync::Arc;

use crate::error::DatasetError;

/// Ordered, validated collection of `D`-dimensional points.
///
/// Points live in a single row-major buffer. Order is significant: the engine
/// visits points by ascending index, so the order decides which point seeds
/// each cluster.
///
/// # Examples
/// ```
/// use densa_core::{Dataset, DatasetError};
///
/// let dataset = Dataset::try_new("demo", vec![vec![0.0, 1.0], vec![2.0, 3.0]])?;
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.dimension(), 2);
/// assert_eq!(dataset.point(1)?, &[2.0, 3.0]);
/// # Ok::<(), DatasetError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: Arc<str>,
    dimension: usize,
    values: Vec<f64>,
}

impl Dataset {
    /// Builds a dataset from individual rows.
    ///
    /// An empty `rows` vector is accepted and yields a dataset of dimension
    /// zero; the engine rejects it when asked to cluster it.
    ///
    /// # Errors
    /// Returns [`DatasetError::ZeroDimension`] when rows are empty vectors,
    /// [`DatasetError::DimensionMismatch`] when row lengths differ and
    /// [`DatasetError::NonFinite`] when a coordinate is NaN or infinite.
    pub fn try_new<R>(name: impl Into<Arc<str>>, rows: Vec<R>) -> Result<Self, DatasetError>
    where
        R: AsRef<[f64]>,
    {
        let dimension = rows.first().map_or(0, |row| row.as_ref().len());
        if !rows.is_empty() && dimension == 0 {
            return Err(DatasetError::ZeroDimension);
        }

        let mut values = Vec::with_capacity(rows.len().saturating_mul(dimension));
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dimension {
                return Err(DatasetError::DimensionMismatch {
                    row: row_index,
                    expected: dimension,
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
        }

        Self::validated(name.into(), dimension, values)
    }

    /// Builds a dataset from a row-major buffer.
    ///
    /// # Errors
    /// Returns [`DatasetError::ZeroDimension`] when `dimension` is zero but
    /// values were supplied, [`DatasetError::RaggedBuffer`] when the buffer
    /// does not split into whole rows and [`DatasetError::NonFinite`] for NaN
    /// or infinite coordinates.
    ///
    /// # Examples
    /// ```
    /// use densa_core::{Dataset, DatasetError};
    ///
    /// let dataset = Dataset::from_row_major("flat", 2, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0])?;
    /// assert_eq!(dataset.len(), 3);
    /// let err = Dataset::from_row_major("flat", 2, vec![0.0, 0.0, 1.0]).unwrap_err();
    /// assert!(matches!(err, DatasetError::RaggedBuffer { values: 3, dimension: 2 }));
    /// # Ok::<(), DatasetError>(())
    /// ```
    pub fn from_row_major(
        name: impl Into<Arc<str>>,
        dimension: usize,
        values: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        if dimension == 0 {
            if values.is_empty() {
                return Ok(Self {
                    name: name.into(),
                    dimension,
                    values,
                });
            }
            return Err(DatasetError::ZeroDimension);
        }
        if values.len() % dimension != 0 {
            return Err(DatasetError::RaggedBuffer {
                values: values.len(),
                dimension,
            });
        }
        Self::validated(name.into(), dimension, values)
    }

    fn validated(name: Arc<str>, dimension: usize, values: Vec<f64>) -> Result<Self, DatasetError> {
        if let Some((position, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(DatasetError::NonFinite {
                row: position / dimension,
                coordinate: position % dimension,
                value: *value,
            });
        }
        Ok(Self {
            name,
            dimension,
            values,
        })
    }

    /// Returns the human-readable dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len().checked_div(self.dimension).unwrap_or(0)
    }

    /// Returns whether the dataset holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of coordinates per point, or zero when empty.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the coordinates of point `index`.
    ///
    /// # Errors
    /// Returns [`DatasetError::OutOfBounds`] when `index >= len()`.
    pub fn point(&self, index: usize) -> Result<&[f64], DatasetError> {
        if self.dimension == 0 {
            return Err(DatasetError::OutOfBounds { index });
        }
        let start = index
            .checked_mul(self.dimension)
            .ok_or(DatasetError::OutOfBounds { index })?;
        let end = start
            .checked_add(self.dimension)
            .ok_or(DatasetError::OutOfBounds { index })?;
        self.values
            .get(start..end)
            .ok_or(DatasetError::OutOfBounds { index })
    }

    /// Iterates over the points in dataset order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.dimension.max(1))
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn as_row_major(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_rows_produce_an_empty_dataset() {
        let dataset = Dataset::try_new("empty", Vec::<Vec<f64>>::new()).expect("empty is allowed");
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert_eq!(dataset.dimension(), 0);
        assert_eq!(dataset.points().len(), 0);
    }

    #[test]
    fn rejects_zero_width_rows() {
        let err = Dataset::try_new("zero", vec![Vec::<f64>::new()]).expect_err("zero width");
        assert_eq!(err, DatasetError::ZeroDimension);
    }

    #[test]
    fn rejects_mismatched_rows() {
        let err = Dataset::try_new("ragged", vec![vec![0.0, 1.0], vec![1.0, 2.0], vec![3.0]])
            .expect_err("rows must match");
        assert_eq!(
            err,
            DatasetError::DimensionMismatch {
                row: 2,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinity(f64::INFINITY)]
    #[case::negative_infinity(f64::NEG_INFINITY)]
    fn rejects_non_finite_coordinates(#[case] value: f64) {
        let err = Dataset::try_new("bad", vec![vec![0.0, 0.0], vec![1.0, value]])
            .expect_err("non-finite coordinates must be rejected");
        assert!(matches!(
            err,
            DatasetError::NonFinite {
                row: 1,
                coordinate: 1,
                ..
            }
        ));
    }

    #[test]
    fn point_lookup_checks_bounds() {
        let dataset = Dataset::try_new("pair", vec![[0.0], [1.0]]).expect("valid rows");
        assert_eq!(dataset.point(1).expect("in bounds"), &[1.0]);
        assert_eq!(
            dataset.point(2).expect_err("out of bounds"),
            DatasetError::OutOfBounds { index: 2 }
        );
    }

    #[test]
    fn points_iterate_in_order() {
        let dataset =
            Dataset::from_row_major("flat", 2, vec![0.0, 1.0, 2.0, 3.0]).expect("valid buffer");
        let rows: Vec<&[f64]> = dataset.points().collect();
        assert_eq!(rows, vec![&[0.0, 1.0][..], &[2.0, 3.0][..]]);
    }

    #[test]
    fn zero_dimension_buffer_with_values_is_rejected() {
        let err = Dataset::from_row_major("flat", 0, vec![1.0]).expect_err("zero dimension");
        assert_eq!(err, DatasetError::ZeroDimension);
    }
}
