//! The cluster-means transform pipeline.
//!
//! Turns a cluster dataset into a new point dataset of per-cluster
//! statistics, in five steps: index validation, candidate-source
//! resolution, external selection, per-cluster aggregation, and output
//! assembly with an all-or-nothing publish.
//!
//! # Key Types
//!
//! - [`ClusterMeansTransform`]: the orchestrator
//! - [`TransformParams`] / [`DegenerateClusterPolicy`]: run configuration
//! - [`IndexCensus`]: validated index-space summary
//! - [`ClusterStatistics`]: per-cluster mean and standard deviation
//! - [`AssembledOutput`]: output buffer plus selection mapping
//! - [`TransformError`]: error type for pipeline failures

pub mod aggregate;
pub mod assembler;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod resolver;
pub mod validator;

pub use aggregate::{compute_all, compute_statistics, ClusterStatistics};
pub use assembler::{assemble_per_cluster, assemble_per_parent_point, AssembledOutput};
pub use error::TransformError;
pub use params::{transform_defaults, DegenerateClusterPolicy, TransformParams};
pub use pipeline::ClusterMeansTransform;
pub use resolver::find_candidates;
pub use validator::{validate_indices, IndexCensus};
