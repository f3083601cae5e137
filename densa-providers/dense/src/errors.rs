use arrow_schema::{ArrowError, DataType};
use densa_core::DatasetError;
use thiserror::Error;

/// Errors raised while loading dense points from Arrow or Parquet.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DenseMatrixProviderError {
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound { column: String },
    #[error("column `{column}` must be a FixedSizeList<Float32|Float64, _> but found {actual:?}")]
    InvalidColumnType { column: String, actual: DataType },
    #[error("FixedSizeList child type must be Float32 or Float64 but found {actual:?}")]
    InvalidListValueType { actual: DataType },
    #[error("invalid FixedSizeList dimension {actual}")]
    InvalidDimension { actual: i32 },
    #[error("column `{column}` must not be nullable (child nullable: {nullable_child})")]
    NullableField { column: String, nullable_child: bool },
    #[error("row {row} is null")]
    NullRow { row: usize },
    #[error("row {row} contains null value at position {value_index}")]
    NullValue { row: usize, value_index: usize },
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("matrix with {rows} rows and dimension {dimension} exceeds capacity limits")]
    CapacityOverflow { rows: usize, dimension: usize },
    #[error("inconsistent dimensions across batches: expected {expected}, got {actual}")]
    InconsistentBatchDimension { expected: usize, actual: usize },
    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable codes for [`DenseMatrixProviderError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum DenseMatrixProviderErrorCode {
    ColumnNotFound,
    InvalidColumnType,
    InvalidListValueType,
    InvalidDimension,
    NullableField,
    NullRow,
    NullValue,
    InvalidRowLength,
    CapacityOverflow,
    InconsistentBatchDimension,
    Dataset,
    Arrow,
    Parquet,
    Io,
}

impl DenseMatrixProviderErrorCode {
    /// Machine-readable form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColumnNotFound => "DENSE_COLUMN_NOT_FOUND",
            Self::InvalidColumnType => "DENSE_INVALID_COLUMN_TYPE",
            Self::InvalidListValueType => "DENSE_INVALID_LIST_VALUE_TYPE",
            Self::InvalidDimension => "DENSE_INVALID_DIMENSION",
            Self::NullableField => "DENSE_NULLABLE_FIELD",
            Self::NullRow => "DENSE_NULL_ROW",
            Self::NullValue => "DENSE_NULL_VALUE",
            Self::InvalidRowLength => "DENSE_INVALID_ROW_LENGTH",
            Self::CapacityOverflow => "DENSE_CAPACITY_OVERFLOW",
            Self::InconsistentBatchDimension => "DENSE_INCONSISTENT_BATCH_DIMENSION",
            Self::Dataset => "DENSE_INVALID_DATASET",
            Self::Arrow => "DENSE_ARROW",
            Self::Parquet => "DENSE_PARQUET",
            Self::Io => "DENSE_IO",
        }
    }
}

impl std::fmt::Display for DenseMatrixProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DenseMatrixProviderError {
    /// Stable code for this error.
    #[must_use]
    pub const fn code(&self) -> DenseMatrixProviderErrorCode {
        use DenseMatrixProviderErrorCode as Code;
        match self {
            Self::ColumnNotFound { .. } => Code::ColumnNotFound,
            Self::InvalidColumnType { .. } => Code::InvalidColumnType,
            Self::InvalidListValueType { .. } => Code::InvalidListValueType,
            Self::InvalidDimension { .. } => Code::InvalidDimension,
            Self::NullableField { .. } => Code::NullableField,
            Self::NullRow { .. } => Code::NullRow,
            Self::NullValue { .. } => Code::NullValue,
            Self::InvalidRowLength { .. } => Code::InvalidRowLength,
            Self::CapacityOverflow { .. } => Code::CapacityOverflow,
            Self::InconsistentBatchDimension { .. } => Code::InconsistentBatchDimension,
            Self::Dataset(_) => Code::Dataset,
            Self::Arrow(_) => Code::Arrow,
            Self::Parquet(_) => Code::Parquet,
            Self::Io(_) => Code::Io,
        }
    }
}
