//! In-memory implementation of DatasetRegistry.
//!
//! Backs unit and integration tests, and hosts that keep their whole
//! hierarchy in process. Lookups are concurrent via `DashMap`; a separate
//! insertion-order log keeps `all_datasets` deterministic, and every change
//! notification is recorded for assertions.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::traits::DatasetRegistry;
use crate::types::{ClusterData, Dataset, DatasetKind};

/// A recorded registry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    /// A dataset was registered.
    DatasetAdded(Uuid),
    /// A dataset's data changed.
    DataChanged(Uuid),
}

/// In-memory dataset registry.
///
/// # Thread Safety
///
/// Thread-safe via `DashMap`; the order and event logs sit behind
/// `parking_lot` locks. Datasets are handed out as `Arc` snapshots, so
/// readers are never invalidated by later updates.
///
/// # Example
///
/// ```
/// use cluster_means_core::stubs::InMemoryRegistry;
/// use cluster_means_core::traits::DatasetRegistry;
/// use cluster_means_core::types::{Dataset, PointData};
///
/// let registry = InMemoryRegistry::new();
/// let data = PointData::from_f32(vec![1.0, 2.0], 2).unwrap();
/// let id = registry.insert(Dataset::points("base", data)).unwrap();
/// assert_eq!(registry.get(id).unwrap().name, "base");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    data: DashMap<Uuid, Arc<Dataset>>,
    order: RwLock<Vec<Uuid>>,
    events: RwLock<Vec<DataEvent>>,
}

impl InMemoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        info!("Creating new InMemoryRegistry");
        Self::default()
    }

    /// Number of registered datasets.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Snapshot of every recorded event, in order.
    pub fn events(&self) -> Vec<DataEvent> {
        self.events.read().clone()
    }
}

impl DatasetRegistry for InMemoryRegistry {
    fn get(&self, id: Uuid) -> CoreResult<Arc<Dataset>> {
        self.data
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(CoreError::DatasetNotFound { id })
    }

    fn all_datasets(&self) -> Vec<Arc<Dataset>> {
        self.order
            .read()
            .iter()
            .filter_map(|id| self.data.get(id).map(|entry| Arc::clone(entry.value())))
            .collect()
    }

    fn insert(&self, dataset: Dataset) -> CoreResult<Uuid> {
        let id = dataset.id;
        debug!(dataset = %dataset.name, %id, "registering dataset");
        self.data.insert(id, Arc::new(dataset));
        self.order.write().push(id);
        self.events.write().push(DataEvent::DatasetAdded(id));
        Ok(id)
    }

    fn update_clusters(&self, id: Uuid, clusters: ClusterData) -> CoreResult<()> {
        let mut entry = self
            .data
            .get_mut(&id)
            .ok_or(CoreError::DatasetNotFound { id })?;
        let dataset = Arc::make_mut(entry.value_mut());
        match &mut dataset.kind {
            DatasetKind::Clusters(existing) => {
                *existing = clusters;
                Ok(())
            }
            _ => Err(CoreError::WrongDatasetKind {
                id,
                expected: "clusters",
            }),
        }
    }

    fn notify_data_changed(&self, id: Uuid) {
        debug!(%id, "dataset data changed");
        self.events.write().push(DataEvent::DataChanged(id));
    }
}
