//! Dataset handles: identity, hierarchy position, and payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cluster::ClusterData;
use super::linked::LinkedData;
use super::points::PointData;

/// Group index value meaning "not in any selection group".
pub const NO_SELECTION_GROUP: i32 = -1;

/// Payload of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatasetKind {
    Points(PointData),
    Clusters(ClusterData),
}

impl DatasetKind {
    /// Short payload-type name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Points(_) => "points",
            DatasetKind::Clusters(_) => "clusters",
        }
    }
}

/// A dataset registered in the hierarchy.
///
/// Carries the structural metadata the aggregation core reads: the parent
/// link (hierarchy position), the selection-group tag correlating
/// semantically equivalent datasets, whether the dataset represents its full
/// underlying point space (as opposed to a subselection view), and whether
/// it was derived from its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: Uuid,
    pub name: String,
    /// Immediate structural parent, if any.
    pub parent: Option<Uuid>,
    /// Selection-group tag; negative means no group.
    pub group_index: i32,
    /// True if this dataset covers its whole underlying point space.
    pub full: bool,
    /// True if this dataset was derived from its parent.
    pub derived: bool,
    pub kind: DatasetKind,
    /// Stored mappings into other datasets.
    pub linked: Vec<LinkedData>,
}

impl Dataset {
    fn new(name: impl Into<String>, kind: DatasetKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent: None,
            group_index: NO_SELECTION_GROUP,
            full: true,
            derived: false,
            kind,
            linked: Vec::new(),
        }
    }

    /// Create a full, parentless point dataset.
    pub fn points(name: impl Into<String>, data: PointData) -> Self {
        Self::new(name, DatasetKind::Points(data))
    }

    /// Create a cluster dataset.
    pub fn clusters(name: impl Into<String>, data: ClusterData) -> Self {
        Self::new(name, DatasetKind::Clusters(data))
    }

    /// Attach this dataset below a parent in the hierarchy.
    #[must_use]
    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Tag this dataset with a selection group.
    #[must_use]
    pub fn with_group_index(mut self, group_index: i32) -> Self {
        self.group_index = group_index;
        self
    }

    /// Mark this dataset as a subselection view rather than a full space.
    #[must_use]
    pub fn as_subselection(mut self) -> Self {
        self.full = false;
        self
    }

    /// Mark this dataset as derived from its parent.
    #[must_use]
    pub fn as_derived(mut self) -> Self {
        self.derived = true;
        self
    }

    /// Attach a linked-data mapping.
    #[must_use]
    pub fn with_linked_data(mut self, linked: LinkedData) -> Self {
        self.linked.push(linked);
        self
    }

    #[inline]
    pub fn is_points(&self) -> bool {
        matches!(self.kind, DatasetKind::Points(_))
    }

    #[inline]
    pub fn is_clusters(&self) -> bool {
        matches!(self.kind, DatasetKind::Clusters(_))
    }

    pub fn as_points(&self) -> Option<&PointData> {
        match &self.kind {
            DatasetKind::Points(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_clusters(&self) -> Option<&ClusterData> {
        match &self.kind {
            DatasetKind::Clusters(data) => Some(data),
            _ => None,
        }
    }

    /// Point count, for point datasets.
    pub fn num_points(&self) -> Option<usize> {
        self.as_points().map(PointData::num_points)
    }

    /// Whether this dataset carries a selection-group tag.
    #[inline]
    pub fn in_selection_group(&self) -> bool {
        self.group_index >= 0
    }
}
