//! Domain types for cluster-statistics aggregation.
//!
//! # Key Types
//!
//! - [`PointData`]: point-major numeric buffer with a typed backing store
//! - [`PointView`]: per-dataset row accessor, widening to `f32`
//! - [`Cluster`] / [`ClusterData`]: index groups with derived statistics
//! - [`Dataset`] / [`DatasetKind`]: registered handles with hierarchy metadata
//! - [`SelectionMap`] / [`LinkedData`]: cross-dataset index translation

pub mod cluster;
pub mod dataset;
pub mod linked;
pub mod points;

pub use cluster::{Cluster, ClusterData};
pub use dataset::{Dataset, DatasetKind, NO_SELECTION_GROUP};
pub use linked::{LinkedData, SelectionMap};
pub use points::{PointData, PointStorage, PointView};
