//! Dense matrix provider and its Arrow/Parquet ingestion paths.
use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatch, RecordBatchReader};
use densa_core::Dataset;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use tracing::debug;

use crate::errors::DenseMatrixProviderError;
use crate::ingest::{append_fixed_size_list_values, validate_fixed_size_list_field};

/// Points loaded from a fixed-size list column, held as a row-major buffer.
///
/// Single-precision input is widened to `f64` on ingest. Convert the provider
/// with [`DenseMatrixProvider::into_dataset`] to cluster it.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrixProvider {
    name: String,
    rows: usize,
    dimension: usize,
    values: Vec<f64>,
}

impl DenseMatrixProvider {
    pub(crate) fn from_parts(
        name: impl Into<String>,
        rows: usize,
        dimension: usize,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(values.len(), rows.saturating_mul(dimension));
        Self {
            name: name.into(),
            rows,
            dimension,
            values,
        }
    }

    /// Returns the provider name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns `true` when no rows were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the dimensionality of each row.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the underlying row-major matrix.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.values
    }

    /// Validates the matrix and hands it to the clustering engine.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::Dataset`] when a value is NaN or
    /// infinite, or when the column was zero-width.
    pub fn into_dataset(self) -> Result<Dataset, DenseMatrixProviderError> {
        Ok(Dataset::from_row_major(
            self.name,
            self.dimension,
            self.values,
        )?)
    }

    /// Loads data from an Arrow [`FixedSizeListArray`].
    ///
    /// # Errors
    /// Fails when the child type is not a float, or when a row or value is null.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut values = Vec::new();
        let dimension = append_fixed_size_list_values(array, None, 0, &mut values)?;
        Ok(Self::from_parts(name, array.len(), dimension, values))
    }

    /// Loads `column` from in-memory record batches.
    ///
    /// Every batch must carry the column with the same list width.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::ColumnNotFound`] when a batch lacks
    /// the column and [`DenseMatrixProviderError::InconsistentBatchDimension`]
    /// when widths differ between batches.
    pub fn try_from_record_batches(
        name: impl Into<String>,
        column: &str,
        batches: impl IntoIterator<Item = RecordBatch>,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut values = Vec::new();
        let mut rows = 0_usize;
        let mut dimension: Option<usize> = None;

        for batch in batches {
            let schema = batch.schema();
            let index = schema
                .index_of(column)
                .map_err(|_| DenseMatrixProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
            let width = validate_fixed_size_list_field(schema.field(index), column)?;
            match dimension {
                Some(expected) if expected != width => {
                    return Err(DenseMatrixProviderError::InconsistentBatchDimension {
                        expected,
                        actual: width,
                    });
                }
                Some(_) => {}
                None => dimension = Some(width),
            }
            let list = downcast_list(batch.column(index), column)?;
            append_fixed_size_list_values(list, dimension, rows, &mut values)?;
            rows += list.len();
        }

        Ok(Self::from_parts(
            name,
            rows,
            dimension.unwrap_or(0),
            values,
        ))
    }

    /// Loads data from a Parquet file containing `FixedSizeList<Float, D>` rows.
    ///
    /// # Errors
    /// Propagates I/O and Parquet failures along with the column validation
    /// errors of [`DenseMatrixProvider::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads data from a Parquet reader.
    ///
    /// Only `column` is decoded; other columns are projected away.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::ColumnNotFound`] for a missing
    /// column, [`DenseMatrixProviderError::NullableField`] for nullable
    /// schemas and [`DenseMatrixProviderError::InvalidColumnType`] for
    /// non-list columns.
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let name = name.into();
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let reader = builder.with_projection(mask).build()?;
        let schema = reader.schema();
        let column_index =
            schema
                .index_of(column)
                .map_err(|_| DenseMatrixProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
        let dimension = validate_fixed_size_list_field(schema.field(column_index), column)?;
        let mut values = Vec::new();
        let mut rows = 0_usize;
        for batch in reader {
            let batch = batch?;
            let list = downcast_list(batch.column(column_index), column)?;
            append_fixed_size_list_values(list, Some(dimension), rows, &mut values)?;
            rows += list.len();
        }
        debug!(provider = %name, column, rows, dimension, "parquet column loaded");
        Ok(Self::from_parts(name, rows, dimension, values))
    }
}

fn downcast_list<'a>(
    array: &'a dyn Array,
    column: &str,
) -> Result<&'a FixedSizeListArray, DenseMatrixProviderError> {
    array
        .as_any()
        .downcast_ref::<FixedSizeListArray>()
        .ok_or_else(|| DenseMatrixProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: array.data_type().clone(),
        })
}
