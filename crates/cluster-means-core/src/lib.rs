//! Cluster Means Core Library
//!
//! Computes per-dimension mean and population standard deviation for every
//! cluster of point indices in a cluster dataset, against a structurally
//! compatible parent point dataset, and materializes the result as a new
//! point dataset with a selection mapping back to the source.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`Dataset`, `PointData`, `Cluster`, `SelectionMap`, etc.)
//! - Collaborator traits (`DatasetRegistry`, `SourceSelector`)
//! - The transform pipeline (`ClusterMeansTransform` and its stages)
//! - In-memory stubs for tests and in-process hosts
//!
//! The host data framework stays behind the collaborator traits: the core
//! never touches global state, receives its registry and selector as
//! dependencies, and publishes output in a single all-or-nothing step.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cluster_means_core::stubs::{FixedSelector, InMemoryRegistry};
//! use cluster_means_core::traits::DatasetRegistry;
//! use cluster_means_core::transform::ClusterMeansTransform;
//! use cluster_means_core::types::{Cluster, ClusterData, Dataset, PointData};
//!
//! let registry = Arc::new(InMemoryRegistry::new());
//! let base = PointData::from_f32(vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0], 2).unwrap();
//! let base_id = registry.insert(Dataset::points("base", base)).unwrap();
//!
//! let clusters = ClusterData::new(vec![Cluster::new(vec![0, 2]), Cluster::new(vec![1, 3])]);
//! let input = registry
//!     .insert(Dataset::clusters("detected clusters", clusters).with_parent(base_id))
//!     .unwrap();
//!
//! let transform = ClusterMeansTransform::new(registry.clone(), Arc::new(FixedSelector::pick(0)));
//! let output = transform.run(input).unwrap();
//! assert_eq!(registry.get(output).unwrap().num_points(), Some(2));
//! assert_eq!(registry.get(output).unwrap().name, "base Cluster Means");
//! ```

pub mod error;
pub mod stubs;
pub mod traits;
pub mod transform;
pub mod types;

// Re-exports for convenience
pub use error::{CoreError, CoreResult};
pub use transform::{ClusterMeansTransform, DegenerateClusterPolicy, TransformParams};
pub use types::{Cluster, ClusterData, Dataset, DatasetKind, LinkedData, PointData, SelectionMap};
