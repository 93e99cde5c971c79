use std::{cmp::Ordering, collections::BTreeMap};

use derivative::Derivative;

use crate::{cost::Cost, handle::Handle};

/// A directed edge triple.  Two edges with the same endpoints are distinct
/// exactly when their costs differ.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge<H, C> {
    pub from: H,
    pub to: H,
    pub cost: C,
}

impl<H, C> Edge<H, C> {
    pub fn new(from: H, to: H, cost: C) -> Self {
        Self { from, to, cost }
    }
}

impl<H, C> From<(H, H, C)> for Edge<H, C> {
    fn from((from, to, cost): (H, H, C)) -> Self {
        Self { from, to, cost }
    }
}

impl<H, C> From<Edge<H, C>> for (H, H, C) {
    fn from(edge: Edge<H, C>) -> Self {
        (edge.from, edge.to, edge.cost)
    }
}

/// Per-source storage of outgoing `(target, cost)` pairs.
///
/// Sources are kept in ascending handle order and each source's pairs are
/// kept sorted by `(target, cost)`, so every iteration order is
/// deterministic.  A pair is stored at most once per source.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "H: Clone, C: Clone"),
    Debug(bound = "H: std::fmt::Debug, C: std::fmt::Debug"),
    Default(bound = "")
)]
pub struct AdjacencyStore<H, C> {
    /// Invariant: no vector is empty, and every vector is sorted by
    /// `compare_pair` without duplicates.
    entries: BTreeMap<H, Vec<(H, C)>>,
    /// Total number of stored pairs across all sources.
    entry_count: usize,
}

fn compare_pair<H: Handle, C: Cost>(pair: &(H, C), to: H, cost: &C) -> Ordering {
    pair.0.cmp(&to).then_with(|| pair.1.cost_cmp(cost))
}

impl<H, C> AdjacencyStore<H, C>
where
    H: Handle,
    C: Cost,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `(to, cost)` under `from`.  Returns `false` if the pair was
    /// already present.
    pub fn insert(&mut self, from: H, to: H, cost: C) -> bool {
        let pairs = self.entries.entry(from).or_default();
        match pairs.binary_search_by(|pair| compare_pair(pair, to, &cost)) {
            Ok(_) => false,
            Err(position) => {
                pairs.insert(position, (to, cost));
                self.entry_count += 1;
                true
            }
        }
    }

    /// Removes `(to, cost)` from under `from`.  Returns `false` if the pair
    /// was not present.
    pub fn remove(&mut self, from: H, to: H, cost: C) -> bool {
        let Some(pairs) = self.entries.get_mut(&from) else {
            return false;
        };
        let Ok(position) = pairs.binary_search_by(|pair| compare_pair(pair, to, &cost)) else {
            return false;
        };
        pairs.remove(position);
        if pairs.is_empty() {
            self.entries.remove(&from);
        }
        self.entry_count -= 1;
        true
    }

    /// Checks whether `(to, cost)` is stored under `from`.
    pub fn contains(&self, from: H, to: H, cost: C) -> bool {
        self.entries.get(&from).is_some_and(|pairs| {
            pairs
                .binary_search_by(|pair| compare_pair(pair, to, &cost))
                .is_ok()
        })
    }

    /// Checks whether any pair targeting `to` is stored under `from`,
    /// regardless of cost.
    pub fn contains_target(&self, from: H, to: H) -> bool {
        self.entries.get(&from).is_some_and(|pairs| {
            let start = pairs.partition_point(|pair| pair.0 < to);
            pairs.get(start).is_some_and(|pair| pair.0 == to)
        })
    }

    /// Iterates over the `(to, cost)` pairs stored under `from`, in
    /// ascending `(to, cost)` order.
    pub fn neighbors(&self, from: H) -> impl Iterator<Item = (H, C)> + '_ {
        self.entries
            .get(&from)
            .into_iter()
            .flat_map(|pairs| pairs.iter().copied())
    }

    /// Iterates over every stored pair as an [`Edge`], ascending by source
    /// and then by `(to, cost)`.
    pub fn iter(&self) -> impl Iterator<Item = Edge<H, C>> + '_ {
        self.entries.iter().flat_map(|(&from, pairs)| {
            pairs
                .iter()
                .map(move |&(to, cost)| Edge { from, to, cost })
        })
    }

    /// Gets the total number of stored pairs.
    pub fn len(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn test_pairs_are_sets_per_source() {
        let mut store = AdjacencyStore::<u32, i32>::new();
        assert!(store.insert(0, 1, 5));
        assert!(!store.insert(0, 1, 5));
        assert!(store.insert(0, 1, 7));
        assert_eq!(store.len(), 2);
        assert!(store.contains(0, 1, 5));
        assert!(store.contains(0, 1, 7));
        assert!(!store.contains(1, 0, 5));
    }

    #[test]
    fn test_contains_target_ignores_cost() {
        let mut store = AdjacencyStore::<u32, f64>::new();
        store.insert(2, 4, 1.5);
        store.insert(2, 6, 0.5);
        assert!(store.contains_target(2, 4));
        assert!(store.contains_target(2, 6));
        assert!(!store.contains_target(2, 5));
        assert!(!store.contains_target(3, 4));
    }

    #[test]
    fn test_remove() {
        let mut store = AdjacencyStore::<u32, u32>::new();
        store.insert(0, 1, 1);
        assert!(!store.remove(0, 1, 2));
        assert!(!store.remove(5, 1, 1));
        assert!(store.remove(0, 1, 1));
        assert!(store.is_empty());
        assert_eq!(store.neighbors(0).count(), 0);
    }

    #[test]
    fn test_iteration_is_ordered() {
        let mut store = AdjacencyStore::<u32, u32>::new();
        store.insert(3, 0, 9);
        store.insert(1, 2, 4);
        store.insert(1, 2, 1);
        store.insert(1, 0, 8);
        let edges: Vec<(u32, u32, u32)> = store.iter().map(Into::into).collect();
        assert_eq!(edges, vec![(1, 0, 8), (1, 2, 1), (1, 2, 4), (3, 0, 9)]);
        assert_eq!(
            store.neighbors(1).collect::<Vec<_>>(),
            vec![(0, 8), (2, 1), (2, 4)]
        );
    }

    #[quickcheck]
    fn prop_len_matches_iteration(ops: Vec<(bool, u8, u8, u8)>) -> bool {
        let mut store = AdjacencyStore::<u8, u8>::new();
        for (insert, from, to, cost) in ops {
            let (from, to, cost) = (from % 8, to % 8, cost % 4);
            if insert {
                store.insert(from, to, cost);
            } else {
                store.remove(from, to, cost);
            }
        }
        let edges: Vec<_> = store.iter().collect();
        let sorted = edges
            .windows(2)
            .all(|w| (w[0].from, w[0].to, w[0].cost) < (w[1].from, w[1].to, w[1].cost));
        store.len() == edges.len() && sorted
    }
}
