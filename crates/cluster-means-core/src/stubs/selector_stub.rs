//! Scripted implementation of SourceSelector.

use std::sync::Arc;

use crate::traits::{SourceChoice, SourceSelector};
use crate::types::Dataset;

/// A selector with a pre-scripted answer, standing in for the modal picker.
///
/// Picks a candidate by list position, or cancels. A pick that falls
/// outside the offered list resolves to cancellation, mirroring a picker
/// whose confirm stays disabled with nothing valid chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector {
    pick: Option<usize>,
    broadcast: bool,
}

impl FixedSelector {
    /// Pick the candidate at `position`, requesting one row per cluster.
    pub fn pick(position: usize) -> Self {
        Self {
            pick: Some(position),
            broadcast: false,
        }
    }

    /// Pick the candidate at `position`, requesting broadcast onto the
    /// direct parent.
    pub fn pick_broadcast(position: usize) -> Self {
        Self {
            pick: Some(position),
            broadcast: true,
        }
    }

    /// Always cancel.
    pub fn cancel() -> Self {
        Self {
            pick: None,
            broadcast: false,
        }
    }
}

impl SourceSelector for FixedSelector {
    fn choose(&self, candidates: &[Arc<Dataset>]) -> Option<SourceChoice> {
        let position = self.pick?;
        candidates.get(position).map(|dataset| SourceChoice {
            dataset: dataset.id,
            broadcast_to_parent: self.broadcast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointData;

    fn candidate(name: &str) -> Arc<Dataset> {
        let data = PointData::from_f32(vec![0.0; 4], 2).expect("valid buffer");
        Arc::new(Dataset::points(name, data))
    }

    #[test]
    fn picks_by_position() {
        let candidates = vec![candidate("a"), candidate("b")];
        let choice = FixedSelector::pick(1).choose(&candidates).unwrap();
        assert_eq!(choice.dataset, candidates[1].id);
        assert!(!choice.broadcast_to_parent);
    }

    #[test]
    fn cancel_and_out_of_range_resolve_to_none() {
        let candidates = vec![candidate("a")];
        assert!(FixedSelector::cancel().choose(&candidates).is_none());
        assert!(FixedSelector::pick(5).choose(&candidates).is_none());
        assert!(FixedSelector::pick(0).choose(&[]).is_none());
    }
}
