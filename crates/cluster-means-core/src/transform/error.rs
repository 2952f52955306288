//! Error types for the transform pipeline.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by index validation, aggregation, and output assembly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The same point index appears more than once across the cluster
    /// collection; clusters must partition their index space.
    #[error("Point index {index} appears in more than one cluster, cannot aggregate")]
    DuplicateIndex { index: u32 },

    /// A cluster holds no member indices, so its mean is undefined.
    #[error("Cluster has no member indices, statistics are undefined")]
    EmptyCluster,

    /// A member index does not exist in the chosen source dataset.
    #[error("Point index {index} is out of bounds for a source of {num_points} points")]
    IndexOutOfBounds { index: u32, num_points: usize },

    /// A statistics vector has the wrong number of dimensions.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A computed output row falls outside the output buffer.
    #[error("Output row {row} is out of range for a buffer of {num_rows} rows")]
    RowOutOfRange { row: usize, num_rows: usize },

    /// The assembled buffer does not hold the expected number of values.
    #[error("Assembled buffer holds {actual} values, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Broadcast output needs a point-typed direct parent above the cluster
    /// dataset, and none exists.
    #[error("Cluster dataset {id} has no point-typed direct parent")]
    MissingDirectParent { id: Uuid },

    /// A transform parameter failed validation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl TransformError {
    /// Create a dimension-mismatch error.
    #[inline]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an invalid-parameter error.
    #[inline]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}
