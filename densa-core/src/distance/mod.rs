//! Distance primitives and the [`Metric`] seam used by neighbourhood queries.
//!
//! The free functions validate their inputs and surface detailed errors; the
//! unit metrics wrap them so the engine can stay generic over the distance in
//! use.

mod cosine;
mod euclidean;
mod helpers;
mod manhattan;
mod metric;
mod types;

pub use self::cosine::cosine_distance;
pub use self::euclidean::euclidean_distance;
pub use self::manhattan::manhattan_distance;
pub use self::metric::{Cosine, Euclidean, Manhattan, Metric};
pub use self::types::{DistanceError, Result, Vector, VectorKind};
