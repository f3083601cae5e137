use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, Float64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::convert::TryFrom;
use std::sync::Arc;

fn width(dimension: usize) -> i32 {
    i32::try_from(dimension).expect("dimension fits in i32")
}

pub(crate) fn build_f32_list(
    rows: &[Vec<f32>],
    dimension: usize,
    child_nullable: bool,
) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float32Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, child_nullable)),
        width(dimension),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn build_f64_list(rows: &[Vec<f64>], dimension: usize) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float64Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float64, false)),
        width(dimension),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn points_2d() -> FixedSizeListArray {
    build_f32_list(
        &[vec![0.0, 0.0], vec![0.5, 0.0], vec![4.0, 4.0]],
        2,
        false,
    )
}

pub(crate) fn feature_field(
    child: DataType,
    dimension: usize,
    child_nullable: bool,
    list_nullable: bool,
) -> Field {
    Field::new(
        "features",
        DataType::FixedSizeList(
            Arc::new(Field::new("item", child, child_nullable)),
            width(dimension),
        ),
        list_nullable,
    )
}

pub(crate) fn batch(field: Field, array: FixedSizeListArray) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![field]));
    RecordBatch::try_new(schema, vec![Arc::new(array) as ArrayRef]).expect("batch")
}

pub(crate) fn write_batches(batches: &[RecordBatch]) -> Vec<u8> {
    let schema = batches.first().expect("at least one batch").schema();
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).expect("writer");
        for batch in batches {
            writer.write(batch).expect("write");
        }
        writer.close().expect("close");
    }
    buffer
}

pub(crate) fn write_parquet(field: Field, array: FixedSizeListArray) -> Bytes {
    Bytes::from(write_batches(&[batch(field, array)]))
}
