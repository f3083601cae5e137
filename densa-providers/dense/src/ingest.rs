//! Helpers for widening fixed-size list arrays into row-major `f64` buffers.
use arrow_array::types::{Float32Type, Float64Type};
use arrow_array::{Array, ArrowPrimitiveType, FixedSizeListArray, PrimitiveArray};
use arrow_schema::{DataType, Field};

use crate::errors::DenseMatrixProviderError;

fn is_float_type(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Float32 | DataType::Float64)
}

pub(crate) fn validate_fixed_size_list_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseMatrixProviderError> {
    match field.data_type() {
        DataType::FixedSizeList(child, width) => {
            if field.is_nullable() || child.is_nullable() {
                return Err(DenseMatrixProviderError::NullableField {
                    column: column.to_owned(),
                    nullable_child: child.is_nullable(),
                });
            }
            if !is_float_type(child.data_type()) {
                return Err(DenseMatrixProviderError::InvalidListValueType {
                    actual: child.data_type().clone(),
                });
            }
            usize::try_from(*width)
                .map_err(|_| DenseMatrixProviderError::InvalidDimension { actual: *width })
        }
        other => Err(DenseMatrixProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

pub(crate) fn append_fixed_size_list_values(
    array: &FixedSizeListArray,
    expected_dimension: Option<usize>,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<usize, DenseMatrixProviderError> {
    let dimension = validate_fixed_size_list(array)?;
    if let Some(expected) = expected_dimension.filter(|&expected| expected != dimension) {
        return Err(DenseMatrixProviderError::InconsistentBatchDimension {
            expected,
            actual: dimension,
        });
    }
    copy_list_values(array, dimension, start_row, out)?;
    Ok(dimension)
}

pub(crate) fn validate_fixed_size_list(
    array: &FixedSizeListArray,
) -> Result<usize, DenseMatrixProviderError> {
    let value_type = array.value_type();
    if !is_float_type(&value_type) {
        return Err(DenseMatrixProviderError::InvalidListValueType { actual: value_type });
    }
    usize::try_from(array.value_length()).map_err(|_| DenseMatrixProviderError::InvalidDimension {
        actual: array.value_length(),
    })
}

pub(crate) fn copy_list_values(
    array: &FixedSizeListArray,
    dimension: usize,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<(), DenseMatrixProviderError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(dimension)
        .ok_or(DenseMatrixProviderError::CapacityOverflow { rows, dimension })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let absolute_row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(DenseMatrixProviderError::NullRow { row: absolute_row });
        }
        let row = array.value(row_index);
        let any = row.as_any();
        if let Some(floats) = any.downcast_ref::<PrimitiveArray<Float32Type>>() {
            extend_row(floats, absolute_row, dimension, out)?;
        } else if let Some(doubles) = any.downcast_ref::<PrimitiveArray<Float64Type>>() {
            extend_row(doubles, absolute_row, dimension, out)?;
        } else {
            return Err(DenseMatrixProviderError::InvalidListValueType {
                actual: row.data_type().clone(),
            });
        }
    }
    Ok(())
}

fn extend_row<T>(
    row: &PrimitiveArray<T>,
    absolute_row: usize,
    dimension: usize,
    out: &mut Vec<f64>,
) -> Result<(), DenseMatrixProviderError>
where
    T: ArrowPrimitiveType,
    T::Native: Into<f64>,
{
    if row.len() != dimension {
        return Err(DenseMatrixProviderError::InvalidRowLength {
            row: absolute_row,
            expected: dimension,
            actual: row.len(),
        });
    }
    if row.null_count() > 0
        && let Some(value_index) = (0..dimension).find(|&idx| row.is_null(idx))
    {
        return Err(DenseMatrixProviderError::NullValue {
            row: absolute_row,
            value_index,
        });
    }
    out.extend(row.values().iter().map(|&value| value.into()));
    Ok(())
}
