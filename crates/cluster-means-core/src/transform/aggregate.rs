//! Per-cluster statistics over a source row view.
//!
//! Two passes per cluster, in member-index order: sums give the mean,
//! squared deviations give the population standard deviation (no Bessel
//! correction). All arithmetic is `f32`, matching the source
//! representation; keeping the accumulation order fixed keeps results
//! bit-identical across runs and thread counts.

use rayon::prelude::*;
use tracing::warn;

use crate::types::{Cluster, PointView};

use super::error::TransformError;
use super::params::DegenerateClusterPolicy;

/// Per-dimension mean and population standard deviation of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStatistics {
    pub mean: Vec<f32>,
    pub stddev: Vec<f32>,
}

/// Compute mean and population standard deviation over the member indices.
///
/// # Errors
///
/// - `TransformError::EmptyCluster` if `indices` is empty.
/// - `TransformError::IndexOutOfBounds` if any index does not exist in the
///   source; checked up front so no partial statistics escape.
///
/// # Example
///
/// ```
/// use cluster_means_core::transform::compute_statistics;
/// use cluster_means_core::types::PointData;
///
/// let source =
///     PointData::from_f32(vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0], 2).unwrap();
/// let stats = compute_statistics(&[0, 2], &source.view()).unwrap();
/// assert_eq!(stats.mean, [2.0, 20.0]);
/// assert_eq!(stats.stddev, [1.0, 10.0]);
/// ```
pub fn compute_statistics(
    indices: &[u32],
    view: &PointView<'_>,
) -> Result<ClusterStatistics, TransformError> {
    if indices.is_empty() {
        return Err(TransformError::EmptyCluster);
    }

    let num_points = view.num_points();
    for &index in indices {
        if index as usize >= num_points {
            return Err(TransformError::IndexOutOfBounds { index, num_points });
        }
    }

    let num_dimensions = view.num_dimensions();
    let count = indices.len() as f32;
    let mut row = vec![0.0f32; num_dimensions];

    let mut mean = vec![0.0f32; num_dimensions];
    for &index in indices {
        view.copy_row(index as usize, &mut row);
        for (m, value) in mean.iter_mut().zip(&row) {
            *m += value;
        }
    }
    for m in &mut mean {
        *m /= count;
    }

    let mut stddev = vec![0.0f32; num_dimensions];
    for &index in indices {
        view.copy_row(index as usize, &mut row);
        for ((s, value), m) in stddev.iter_mut().zip(&row).zip(&mean) {
            let centered = value - m;
            *s += centered * centered;
        }
    }
    for s in &mut stddev {
        *s = (*s / count).sqrt();
    }

    Ok(ClusterStatistics { mean, stddev })
}

/// Compute statistics for every cluster against one source view.
///
/// Clusters are independent, so `parallel` fans them out on the rayon pool
/// with an order-preserving collect; the per-cluster computation is
/// untouched, so both paths produce the same bits.
///
/// `None` entries mark clusters skipped under
/// [`DegenerateClusterPolicy::Skip`]; any error fails the whole batch.
pub fn compute_all(
    clusters: &[Cluster],
    view: &PointView<'_>,
    policy: DegenerateClusterPolicy,
    parallel: bool,
) -> Result<Vec<Option<ClusterStatistics>>, TransformError> {
    let run = |(position, cluster): (usize, &Cluster)| {
        if cluster.is_empty() {
            return match policy {
                DegenerateClusterPolicy::Skip => {
                    warn!(cluster = position, "skipping cluster with no member indices");
                    Ok(None)
                }
                DegenerateClusterPolicy::Abort => Err(TransformError::EmptyCluster),
            };
        }
        compute_statistics(&cluster.indices, view).map(Some)
    };

    if parallel {
        clusters.par_iter().enumerate().map(run).collect()
    } else {
        clusters.iter().enumerate().map(run).collect()
    }
}
