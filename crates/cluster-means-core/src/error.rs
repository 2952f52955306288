//! Error types for cluster-means-core.
//!
//! [`CoreError`] is the top-level error for the crate; transform-internal
//! failures surface through the [`TransformError`] sub-error and convert via
//! `From`. All fallible operations return [`CoreResult<T>`].

use thiserror::Error;
use uuid::Uuid;

use crate::transform::TransformError;

/// Top-level error type for cluster-means operations.
///
/// # Examples
///
/// ```rust
/// use cluster_means_core::error::CoreError;
/// use uuid::Uuid;
///
/// let err = CoreError::DatasetNotFound { id: Uuid::nil() };
/// assert!(err.to_string().contains("not found"));
/// assert!(!err.is_critical());
/// ```
#[derive(Debug, Error)]
pub enum CoreError {
    /// A dataset id did not resolve in the registry.
    #[error("Dataset not found: {id}")]
    DatasetNotFound {
        /// The id that failed to resolve.
        id: Uuid,
    },

    /// A dataset held a different payload than the operation requires.
    #[error("Dataset {id} does not hold {expected} data")]
    WrongDatasetKind {
        /// The offending dataset.
        id: Uuid,
        /// Payload-type name the operation needed.
        expected: &'static str,
    },

    /// The user declined the source selection; nothing was created.
    ///
    /// Also produced when no compatible source exists, since an empty
    /// candidate list leaves the selector nothing valid to confirm.
    #[error("Source selection cancelled, no dataset created")]
    SelectionCancelled,

    /// The selection collaborator confirmed an unusable choice.
    ///
    /// The reference picker disables confirmation until a valid dataset is
    /// chosen, so this is a defensive re-check, not an expected path.
    #[error("Invalid source selection: {0}")]
    InvalidSelection(String),

    /// A field value failed validation constraints.
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Name of the field that failed validation.
        field: String,
        /// Description of the failure.
        message: String,
    },

    /// Failure inside the transform pipeline.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Error during serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Create a validation error.
    #[inline]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-selection error.
    #[inline]
    pub fn invalid_selection(message: impl Into<String>) -> Self {
        Self::InvalidSelection(message.into())
    }

    /// True for user-driven aborts that are not defects.
    #[inline]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::SelectionCancelled)
    }

    /// True for internal-consistency failures that indicate a bug upstream
    /// rather than bad input.
    #[inline]
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::Transform(
                TransformError::IndexOutOfBounds { .. }
                    | TransformError::RowOutOfRange { .. }
                    | TransformError::BufferSizeMismatch { .. }
            )
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

/// Result type alias for cluster-means operations.
pub type CoreResult<T> = Result<T, CoreError>;
