use std::sync::Arc;

use densa_core::{
    ClusterId, DatasetError, DatasetErrorCode, DbscanError, DbscanErrorCode, DistanceError, Label,
    NeighbourSearch, NonContiguousClusterIds,
};
use rstest::rstest;

#[rstest]
#[case(DatasetError::OutOfBounds { index: 0 }, DatasetErrorCode::OutOfBounds)]
#[case(
    DatasetError::DimensionMismatch { row: 1, expected: 2, actual: 3 },
    DatasetErrorCode::DimensionMismatch,
)]
#[case(DatasetError::ZeroDimension, DatasetErrorCode::ZeroDimension)]
#[case(
    DatasetError::NonFinite { row: 0, coordinate: 1, value: f64::NAN },
    DatasetErrorCode::NonFinite,
)]
#[case(
    DatasetError::RaggedBuffer { values: 5, dimension: 2 },
    DatasetErrorCode::RaggedBuffer,
)]
fn returns_expected_dataset_code(#[case] error: DatasetError, #[case] expected: DatasetErrorCode) {
    assert_eq!(error.code(), expected);
    assert!(error.code().as_str().starts_with("DATASET_"));
}

#[rstest]
#[case(DbscanError::InvalidEps { got: 0.0 }, DbscanErrorCode::InvalidEps, None)]
#[case(
    DbscanError::InvalidMinSamples { got: 0 },
    DbscanErrorCode::InvalidMinSamples,
    None,
)]
#[case(
    DbscanError::EmptyDataset { dataset: Arc::from("empty") },
    DbscanErrorCode::EmptyDataset,
    None,
)]
#[case(
    DbscanError::SearchUnavailable { requested: NeighbourSearch::Grid },
    DbscanErrorCode::SearchUnavailable,
    None,
)]
#[case(
    DbscanError::GridUnsupported { metric: Arc::from("cosine"), dimension: 3 },
    DbscanErrorCode::GridUnsupported,
    None,
)]
#[case(
    DbscanError::Dataset {
        dataset: Arc::from("points"),
        error: DatasetError::OutOfBounds { index: 4 },
    },
    DbscanErrorCode::DatasetFailure,
    Some(DatasetErrorCode::OutOfBounds),
)]
#[case(
    DbscanError::Distance {
        left: 0,
        right: 1,
        error: DistanceError::DimensionMismatch { left: 2, right: 3 },
    },
    DbscanErrorCode::DistanceFailure,
    None,
)]
#[case(
    DbscanError::RelabelConflict {
        point: 2,
        current: Label::Assigned(ClusterId::new(0)),
        requested: Label::Assigned(ClusterId::new(1)),
    },
    DbscanErrorCode::RelabelConflict,
    None,
)]
#[case(DbscanError::Unlabelled { point: 3 }, DbscanErrorCode::Unlabelled, None)]
#[case(
    DbscanError::InvalidResult { error: NonContiguousClusterIds::Gap },
    DbscanErrorCode::InvalidResult,
    None,
)]
fn returns_expected_dbscan_code(
    #[case] error: DbscanError,
    #[case] expected: DbscanErrorCode,
    #[case] dataset_code: Option<DatasetErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
    assert_eq!(error.dataset_code(), dataset_code);
}

#[test]
fn relabel_conflict_names_both_labels() {
    let err = DbscanError::RelabelConflict {
        point: 7,
        current: Label::Assigned(ClusterId::new(0)),
        requested: Label::Noise,
    };
    assert_eq!(
        err.to_string(),
        "point 7 is cluster 0 and cannot become noise"
    );
}

#[test]
fn dataset_failures_name_the_dataset() {
    let err = DbscanError::Dataset {
        dataset: Arc::from("survey"),
        error: DatasetError::ZeroDimension,
    };
    assert!(err.to_string().contains("survey"));
    assert!(std::error::Error::source(&err).is_some());
}
