//! DatasetRegistry trait: the injected dataset-hierarchy collaborator.
//!
//! The aggregation core never reaches into ambient global state; every
//! lookup, hierarchy walk, and publish goes through this trait. Hosts adapt
//! their data framework behind it; tests use
//! [`crate::stubs::InMemoryRegistry`].

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::CoreResult;
use crate::types::{ClusterData, Dataset};

/// Registry and hierarchy access for datasets.
///
/// # Implementation Notes
///
/// - `all_datasets` must return a stable iteration order; candidate ordering
///   downstream depends on it.
/// - `insert` is the publish primitive and must be atomic: a dataset is
///   either fully registered or not at all.
/// - Implementations should log failures via `tracing` before returning.
pub trait DatasetRegistry: Send + Sync {
    /// Look up a dataset by id.
    ///
    /// # Errors
    /// - `CoreError::DatasetNotFound` if the id does not resolve.
    fn get(&self, id: Uuid) -> CoreResult<Arc<Dataset>>;

    /// Every registered dataset, in stable registry order.
    fn all_datasets(&self) -> Vec<Arc<Dataset>>;

    /// Register a new dataset, in one all-or-nothing step.
    ///
    /// Returns the id of the registered dataset.
    fn insert(&self, dataset: Dataset) -> CoreResult<Uuid>;

    /// Replace the cluster payload of an existing cluster dataset.
    ///
    /// # Errors
    /// - `CoreError::DatasetNotFound` if the id does not resolve.
    /// - `CoreError::WrongDatasetKind` if the dataset is not cluster-typed.
    fn update_clusters(&self, id: Uuid, clusters: ClusterData) -> CoreResult<()>;

    /// Notify the host that a dataset's data changed.
    fn notify_data_changed(&self, id: Uuid);

    /// Immediate structural parent of a dataset, if any.
    fn parent(&self, id: Uuid) -> CoreResult<Option<Arc<Dataset>>> {
        match self.get(id)?.parent {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Ancestor chain of a dataset, nearest parent first.
    ///
    /// Stops on a repeated id, so a malformed cyclic hierarchy terminates
    /// instead of looping.
    fn ancestors(&self, id: Uuid) -> CoreResult<Vec<Arc<Dataset>>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(id);

        let mut next = self.get(id)?.parent;
        while let Some(parent_id) = next {
            if !seen.insert(parent_id) {
                break;
            }
            let parent = self.get(parent_id)?;
            next = parent.parent;
            chain.push(parent);
        }
        Ok(chain)
    }
}
