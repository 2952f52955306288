//! Parameters for the cluster-means transform.

use serde::{Deserialize, Serialize};

use super::error::TransformError;

/// Default name suffix appended to the source dataset name.
pub const DEFAULT_OUTPUT_SUFFIX: &str = " Cluster Means";

/// What to do with a cluster that has no member indices.
///
/// An empty cluster has no defined mean (division by zero), so the run must
/// either skip it or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DegenerateClusterPolicy {
    /// Skip the cluster with a warning; its statistics and output row stay
    /// all-zero. Other clusters remain valid, so this is the default.
    #[default]
    Skip,
    /// Fail the whole run on the first empty cluster.
    Abort,
}

impl DegenerateClusterPolicy {
    /// Get description of this policy.
    pub fn description(&self) -> &'static str {
        match self {
            DegenerateClusterPolicy::Skip => {
                "Skip empty clusters with a warning, leaving zeroed statistics"
            }
            DegenerateClusterPolicy::Abort => "Fail the run on the first empty cluster",
        }
    }
}

/// Parameters for a cluster-means transform run.
///
/// # Example
///
/// ```
/// use cluster_means_core::transform::{transform_defaults, DegenerateClusterPolicy};
///
/// let params = transform_defaults();
/// assert_eq!(params.degenerate_policy, DegenerateClusterPolicy::Skip);
/// assert!(params.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    /// Policy for clusters with no member indices.
    pub degenerate_policy: DegenerateClusterPolicy,

    /// Aggregate clusters on a worker pool. Per-cluster accumulation stays
    /// sequential either way, so results are identical.
    pub parallel: bool,

    /// Suffix appended to the source dataset name to form the output name.
    pub output_suffix: String,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            degenerate_policy: DegenerateClusterPolicy::Skip,
            parallel: true,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl TransformParams {
    /// Set the degenerate-cluster policy.
    #[must_use]
    pub fn with_degenerate_policy(mut self, policy: DegenerateClusterPolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Enable or disable the per-cluster worker pool.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the output name suffix.
    ///
    /// Value is NOT automatically corrected - use validate() to check.
    #[must_use]
    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Validate parameters.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` if `output_suffix` is
    /// empty; the output must be distinguishable from its source by name.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.output_suffix.is_empty() {
            return Err(TransformError::invalid_parameter(
                "output_suffix must not be empty, the output would shadow its source's name",
            ));
        }
        Ok(())
    }
}

/// Get default transform parameters.
pub fn transform_defaults() -> TransformParams {
    TransformParams::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = transform_defaults();
        assert_eq!(params.degenerate_policy, DegenerateClusterPolicy::Skip);
        assert!(params.parallel);
        assert_eq!(params.output_suffix, DEFAULT_OUTPUT_SUFFIX);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn builder_does_not_auto_correct() {
        let params = transform_defaults().with_output_suffix("");
        assert_eq!(params.output_suffix, "");
        assert!(params.validate().is_err());
    }

    #[test]
    fn builder_pattern() {
        let params = transform_defaults()
            .with_degenerate_policy(DegenerateClusterPolicy::Abort)
            .with_parallel(false)
            .with_output_suffix(" Means");
        assert_eq!(params.degenerate_policy, DegenerateClusterPolicy::Abort);
        assert!(!params.parallel);
        assert_eq!(params.output_suffix, " Means");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn serde_round_trip() {
        let params = transform_defaults().with_degenerate_policy(DegenerateClusterPolicy::Abort);
        let json = serde_json::to_string(&params).expect("serialize");
        let restored: TransformParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(params, restored);
    }

    #[test]
    fn policy_descriptions_differ() {
        assert_ne!(
            DegenerateClusterPolicy::Skip.description(),
            DegenerateClusterPolicy::Abort.description()
        );
    }
}
