//! Linked-data mappings between datasets.
//!
//! A [`SelectionMap`] translates a selection in one dataset into member
//! indices of another: key = row index in the owning dataset, value = the
//! corresponding indices in the target. Keys iterate in sorted order, which
//! downstream inversion relies on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sorted mapping from a row index to a set of indices in another dataset.
///
/// # Example
///
/// ```
/// use cluster_means_core::types::SelectionMap;
///
/// let mut map = SelectionMap::new();
/// map.insert(0, vec![0, 2]);
/// map.insert(1, vec![1, 3]);
/// assert_eq!(map.get(0), Some(&[0u32, 2u32][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionMap {
    map: BTreeMap<u32, Vec<u32>>,
}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the target indices for a row, replacing any previous entry.
    pub fn insert(&mut self, key: u32, indices: Vec<u32>) {
        self.map.insert(key, indices);
    }

    /// Target indices for a row, if recorded.
    pub fn get(&self, key: u32) -> Option<&[u32]> {
        self.map.get(&key).map(Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &u32> {
        self.map.keys()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&u32, &Vec<u32>)> {
        self.map.iter()
    }
}

/// A stored mapping from the owning dataset to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedData {
    /// The dataset the mapping points into.
    pub target: Uuid,
    /// Row-to-indices translation table.
    pub mapping: SelectionMap,
}

impl LinkedData {
    pub fn new(target: Uuid, mapping: SelectionMap) -> Self {
        Self { target, mapping }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_iterate_sorted() {
        let mut map = SelectionMap::new();
        map.insert(7, vec![1]);
        map.insert(2, vec![2]);
        map.insert(5, vec![3]);
        let keys: Vec<u32> = map.keys().copied().collect();
        assert_eq!(keys, [2, 5, 7]);
    }

    #[test]
    fn serde_round_trip() {
        let mut map = SelectionMap::new();
        map.insert(0, vec![0, 2]);
        map.insert(1, vec![1, 3]);
        let linked = LinkedData::new(Uuid::new_v4(), map);

        let json = serde_json::to_string(&linked).expect("serialize");
        let restored: LinkedData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(linked, restored);
    }
}
