//! SourceSelector trait: the external selection collaborator.
//!
//! The reference host shows a modal picker listing candidate datasets with
//! an assign-to-direct-parent toggle, keeping confirmation disabled until a
//! valid dataset is picked. Any synchronous single-choice mechanism
//! satisfies the contract.

use std::sync::Arc;

use crate::types::Dataset;

/// The resolved selection: which source to aggregate against, and how to
/// lay out the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceChoice {
    /// The chosen aggregation source; must identify one of the offered
    /// candidates.
    pub dataset: uuid::Uuid,
    /// True to broadcast cluster means onto every point of the cluster
    /// dataset's direct parent; false for one output row per cluster.
    pub broadcast_to_parent: bool,
}

/// Synchronous single-choice resolution over candidate source datasets.
///
/// Blocks the calling thread until resolved. Returning `None` means the
/// user cancelled, which is also the only sensible outcome when
/// `candidates` is empty.
pub trait SourceSelector: Send + Sync {
    fn choose(&self, candidates: &[Arc<Dataset>]) -> Option<SourceChoice>;
}
