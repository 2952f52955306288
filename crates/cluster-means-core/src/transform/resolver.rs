//! Candidate-source discovery.
//!
//! A cluster collection indexes into some point space, but which registered
//! dataset holds that space is structural knowledge: it is the cluster
//! dataset's ancestry, widened by selection groups (other datasets tagged as
//! representations of the same underlying points). This module ranks the
//! structurally compatible candidates; an external selector picks one.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::CoreResult;
use crate::traits::DatasetRegistry;
use crate::types::Dataset;

use super::validator::IndexCensus;

/// Find datasets structurally compatible as the aggregation source.
///
/// Two sweeps:
///
/// 1. The ancestor chain, nearest first. An ancestor qualifies when it is
///    point-typed, full (a genuine point space, not a subselection view),
///    and either exactly partitioned by the clusters
///    (`num_points == unique_count`) or large enough that index validity is
///    plausible (`num_points >= max_index`).
/// 2. For every selection-group tag carried by an accepted ancestor, all
///    point datasets in the registry sharing that tag and matching the
///    unique count exactly, in registry order.
///
/// Ancestor candidates come first, then group matches; a dataset never
/// appears twice.
pub fn find_candidates(
    registry: &dyn DatasetRegistry,
    cluster_dataset: &Dataset,
    census: &IndexCensus,
) -> CoreResult<Vec<Arc<Dataset>>> {
    let mut candidates: Vec<Arc<Dataset>> = Vec::new();

    for ancestor in registry.ancestors(cluster_dataset.id)? {
        let Some(points) = ancestor.as_points() else {
            continue;
        };
        if !ancestor.full {
            debug!(dataset = %ancestor.name, "excluding subselection ancestor");
            continue;
        }
        let num_points = points.num_points();
        if num_points != census.unique_count && num_points < census.max_index as usize {
            debug!(
                dataset = %ancestor.name,
                num_points,
                unique_count = census.unique_count,
                max_index = census.max_index,
                "excluding ancestor, too small for the cluster index space"
            );
            continue;
        }
        candidates.push(ancestor);
    }

    let group_tags: BTreeSet<i32> = candidates
        .iter()
        .filter(|dataset| dataset.in_selection_group())
        .map(|dataset| dataset.group_index)
        .collect();

    for tag in group_tags {
        for dataset in registry.all_datasets() {
            if dataset.group_index != tag {
                continue;
            }
            let Some(points) = dataset.as_points() else {
                continue;
            };
            if points.num_points() != census.unique_count {
                continue;
            }
            if candidates.iter().any(|c| c.id == dataset.id) {
                continue;
            }
            debug!(dataset = %dataset.name, tag, "adding selection-group candidate");
            candidates.push(dataset);
        }
    }

    Ok(candidates)
}
