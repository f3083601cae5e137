//! Error types for the densa core library.
//!
//! Every public error enum carries a stable machine-readable code so the CLI
//! and downstream services can match on failures without parsing messages.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    distance::DistanceError, label::Label, neighbourhood::NeighbourSearch,
    result::NonContiguousClusterIds,
};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building or reading a [`crate::Dataset`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DatasetError {
    /// Requested point was outside the dataset.
    #[error("point {index} is out of bounds")]
    OutOfBounds {
        /// The requested point index.
        index: usize,
    },
    /// A row had a different number of coordinates than the first row.
    #[error("row {row} has {actual} coordinates but expected {expected}")]
    DimensionMismatch {
        /// Row whose length disagreed with the dataset dimension.
        row: usize,
        /// Dimension established by the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// Points must have at least one coordinate.
    #[error("dataset points must have positive dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("row {row} contains a non-finite value at coordinate {coordinate}: {value}")]
    NonFinite {
        /// Row holding the value.
        row: usize,
        /// Coordinate position within the row.
        coordinate: usize,
        /// The rejected value.
        value: f64,
    },
    /// A flat buffer did not divide evenly into rows.
    #[error("buffer of {values} values cannot be split into rows of dimension {dimension}")]
    RaggedBuffer {
        /// Number of values supplied.
        values: usize,
        /// Requested row dimension.
        dimension: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DatasetError`] variants.
    enum DatasetErrorCode for DatasetError {
        /// Requested point was outside the dataset.
        OutOfBounds => OutOfBounds { .. } => "DATASET_OUT_OF_BOUNDS",
        /// A row had a different number of coordinates than the first row.
        DimensionMismatch => DimensionMismatch { .. } => "DATASET_DIMENSION_MISMATCH",
        /// Points must have at least one coordinate.
        ZeroDimension => ZeroDimension => "DATASET_ZERO_DIMENSION",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "DATASET_NON_FINITE",
        /// A flat buffer did not divide evenly into rows.
        RaggedBuffer => RaggedBuffer { .. } => "DATASET_RAGGED_BUFFER",
    }
}

/// Error type produced when configuring or running [`crate::Dbscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DbscanError {
    /// The neighbourhood radius must be finite and strictly positive.
    #[error("eps must be a finite value greater than zero (got {got})")]
    InvalidEps {
        /// The rejected radius.
        got: f64,
    },
    /// At least one point (the point itself) is needed to form a neighbourhood.
    #[error("min_samples must be at least 1 (got {got})")]
    InvalidMinSamples {
        /// The rejected minimum neighbourhood size.
        got: usize,
    },
    /// The dataset handed to the engine had no points.
    #[error("dataset `{dataset}` contains no points")]
    EmptyDataset {
        /// Name of the empty dataset.
        dataset: Arc<str>,
    },
    /// The requested neighbour search is not compiled into this build.
    #[error("neighbour search {requested:?} is not available in this build")]
    SearchUnavailable {
        /// Strategy that could not be satisfied.
        requested: NeighbourSearch,
    },
    /// Grid search needs an axis-bounded metric and a small dimension.
    #[error(
        "grid neighbour search cannot index {dimension}-dimensional points with metric `{metric}`"
    )]
    GridUnsupported {
        /// Name of the configured metric.
        metric: Arc<str>,
        /// Dimension of the dataset.
        dimension: usize,
    },
    /// Reading the dataset failed mid-run.
    #[error("dataset `{dataset}` failed: {error}")]
    Dataset {
        /// Name of the failing dataset.
        dataset: Arc<str>,
        #[source]
        /// Underlying dataset error.
        error: DatasetError,
    },
    /// The metric rejected a pair of points.
    #[error("distance between points {left} and {right} failed: {error}")]
    Distance {
        /// Index of the query point.
        left: usize,
        /// Index of the candidate point.
        right: usize,
        #[source]
        /// Underlying metric error.
        error: DistanceError,
    },
    /// A point was about to leave a cluster it already belongs to.
    ///
    /// This indicates a broken expansion invariant rather than bad input and
    /// is never retried.
    #[error("point {point} is {current} and cannot become {requested}")]
    RelabelConflict {
        /// The point whose label was contested.
        point: usize,
        /// Label held at the time of the conflict.
        current: Label,
        /// Label the engine attempted to write.
        requested: Label,
    },
    /// A point finished the run without a terminal label.
    #[error("point {point} was never classified")]
    Unlabelled {
        /// The point left unvisited.
        point: usize,
    },
    /// The engine produced cluster identifiers that are not contiguous.
    #[error("run produced invalid cluster identifiers: {error}")]
    InvalidResult {
        #[source]
        /// Underlying validation failure.
        error: NonContiguousClusterIds,
    },
}

define_error_codes! {
    /// Stable codes describing [`DbscanError`] variants.
    enum DbscanErrorCode for DbscanError {
        /// The neighbourhood radius must be finite and strictly positive.
        InvalidEps => InvalidEps { .. } => "DENSA_INVALID_EPS",
        /// At least one point is needed to form a neighbourhood.
        InvalidMinSamples => InvalidMinSamples { .. } => "DENSA_INVALID_MIN_SAMPLES",
        /// The dataset handed to the engine had no points.
        EmptyDataset => EmptyDataset { .. } => "DENSA_EMPTY_DATASET",
        /// The requested neighbour search is not compiled into this build.
        SearchUnavailable => SearchUnavailable { .. } => "DENSA_SEARCH_UNAVAILABLE",
        /// Grid search needs an axis-bounded metric and a small dimension.
        GridUnsupported => GridUnsupported { .. } => "DENSA_GRID_UNSUPPORTED",
        /// Reading the dataset failed mid-run.
        DatasetFailure => Dataset { .. } => "DENSA_DATASET_FAILURE",
        /// The metric rejected a pair of points.
        DistanceFailure => Distance { .. } => "DENSA_DISTANCE_FAILURE",
        /// A point was about to leave a cluster it already belongs to.
        RelabelConflict => RelabelConflict { .. } => "DENSA_RELABEL_CONFLICT",
        /// A point finished the run without a terminal label.
        Unlabelled => Unlabelled { .. } => "DENSA_UNLABELLED_POINT",
        /// The engine produced cluster identifiers that are not contiguous.
        InvalidResult => InvalidResult { .. } => "DENSA_INVALID_RESULT",
    }
}

impl DbscanError {
    /// Retrieve the inner [`DatasetErrorCode`] when the error originated in a
    /// [`crate::Dataset`].
    #[must_use]
    pub const fn dataset_code(&self) -> Option<DatasetErrorCode> {
        match self {
            Self::Dataset { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DbscanError>;
