//! Output buffer assembly.
//!
//! Two mutually exclusive layouts:
//!
//! - per cluster: one row per cluster carrying its mean, plus a selection
//!   map back to the member indices;
//! - per parent point: one row per point of the cluster dataset's direct
//!   parent, every member row receiving its cluster's mean, remaining rows
//!   zero. Traceability comes from the existing ancestor linkage, so no new
//!   selection map is built.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::types::{Cluster, Dataset, SelectionMap};

use super::error::TransformError;

/// An assembled output buffer with its row count and, in per-cluster
/// layout, the mapping back to source indices.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledOutput {
    /// Row-major values, `num_rows x num_dimensions`.
    pub values: Vec<f32>,
    pub num_rows: usize,
    /// Output row -> source member indices; per-cluster layout only.
    pub selection_map: Option<SelectionMap>,
}

/// Build the per-cluster layout: row `r` is cluster `r`'s mean, and the
/// selection map sends `r` to that cluster's member indices.
///
/// # Errors
///
/// - `TransformError::DimensionMismatch` if any cluster's mean has the
///   wrong length (statistics were not computed against this source).
/// - `TransformError::BufferSizeMismatch` if the finished buffer is the
///   wrong size; an internal-consistency defect, never silently truncated.
pub fn assemble_per_cluster(
    clusters: &[Cluster],
    num_dimensions: usize,
) -> Result<AssembledOutput, TransformError> {
    let num_rows = clusters.len();
    let mut values = Vec::with_capacity(num_rows * num_dimensions);
    let mut selection_map = SelectionMap::new();

    for (row, cluster) in clusters.iter().enumerate() {
        if cluster.mean.len() != num_dimensions {
            return Err(TransformError::dimension_mismatch(
                num_dimensions,
                cluster.mean.len(),
            ));
        }
        values.extend_from_slice(&cluster.mean);
        selection_map.insert(row as u32, cluster.indices.clone());
    }

    let expected = num_rows * num_dimensions;
    if values.len() != expected {
        return Err(TransformError::BufferSizeMismatch {
            expected,
            actual: values.len(),
        });
    }

    Ok(AssembledOutput {
        values,
        num_rows,
        selection_map: Some(selection_map),
    })
}

/// Build the per-parent-point layout: broadcast every cluster's mean onto
/// the direct-parent rows of its member indices.
///
/// Member indices live in the chosen source's index space. When the direct
/// parent's first linked-data entry targets that source, the entry is
/// inverted into a source-to-local table and used to translate; member
/// indices with no local counterpart are skipped. Without such an entry the
/// member indices are taken as direct-parent rows directly.
///
/// # Errors
///
/// - `TransformError::MissingDirectParent` if `direct_parent` holds no
///   point data.
/// - `TransformError::DimensionMismatch` as in [`assemble_per_cluster`].
/// - `TransformError::RowOutOfRange` if any row falls outside the parent's
///   point count; an internal-consistency defect, never silently truncated.
pub fn assemble_per_parent_point(
    clusters: &[Cluster],
    num_dimensions: usize,
    direct_parent: &Dataset,
    source: Uuid,
) -> Result<AssembledOutput, TransformError> {
    let parent_points = direct_parent
        .as_points()
        .ok_or(TransformError::MissingDirectParent {
            id: direct_parent.id,
        })?;
    let num_rows = parent_points.num_points();
    let mut values = vec![0.0f32; num_rows * num_dimensions];

    // Inverted once per assembly, discarded after use.
    let reverse = direct_parent
        .linked
        .first()
        .filter(|linked| linked.target == source)
        .map(|linked| invert_to_local(&linked.mapping));
    if reverse.is_some() {
        debug!(parent = %direct_parent.name, "translating member indices through linked data");
    }

    for cluster in clusters {
        if cluster.mean.len() != num_dimensions {
            return Err(TransformError::dimension_mismatch(
                num_dimensions,
                cluster.mean.len(),
            ));
        }
        for &index in &cluster.indices {
            let row = match &reverse {
                Some(table) => match table.get(&index) {
                    Some(&local) => local as usize,
                    None => continue,
                },
                None => index as usize,
            };
            if row >= num_rows {
                return Err(TransformError::RowOutOfRange { row, num_rows });
            }
            let start = row * num_dimensions;
            values[start..start + num_dimensions].copy_from_slice(&cluster.mean);
        }
    }

    Ok(AssembledOutput {
        values,
        num_rows,
        selection_map: None,
    })
}

/// Invert a stored mapping into source-index -> local-row, assigning local
/// rows in ascending key order.
fn invert_to_local(mapping: &SelectionMap) -> HashMap<u32, u32> {
    let mut reverse = HashMap::with_capacity(mapping.len());
    for (local, global) in mapping.keys().enumerate() {
        reverse.insert(*global, local as u32);
    }
    reverse
}
