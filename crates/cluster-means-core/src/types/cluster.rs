//! Clusters of point indices with derived per-dimension statistics.

use serde::{Deserialize, Serialize};

/// A group of point indices into a parent dataset's index space.
///
/// `mean` and `stddev` are empty until an aggregation run fills them; once
/// filled they hold exactly one value per source dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Member point indices, ordered, possibly non-contiguous.
    pub indices: Vec<u32>,
    /// Per-dimension mean over the member points.
    pub mean: Vec<f32>,
    /// Per-dimension population standard deviation over the member points.
    pub stddev: Vec<f32>,
}

impl Cluster {
    /// Create a cluster from its member indices, with no statistics yet.
    pub fn new(indices: Vec<u32>) -> Self {
        Self {
            indices,
            mean: Vec::new(),
            stddev: Vec::new(),
        }
    }

    /// Number of member points.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether statistics have been computed for this cluster.
    #[inline]
    pub fn has_statistics(&self) -> bool {
        !self.mean.is_empty()
    }
}

/// An ordered collection of clusters, the payload of a cluster dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterData {
    pub clusters: Vec<Cluster>,
}

impl ClusterData {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
