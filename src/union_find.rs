use std::collections::HashMap;

use derivative::Derivative;

use crate::handle::Handle;

/// A disjoint-set forest over handles, with union by rank and path
/// compression.
///
/// Elements are created lazily: a handle that has never been united is its
/// own singleton set.  Roots have no entry in `parent`.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "H: Clone"),
    Debug(bound = "H: std::fmt::Debug"),
    Default(bound = "")
)]
pub struct Connectivity<H> {
    parent: HashMap<H, H>,
    rank: HashMap<H, u32>,
}

impl<H: Handle> Connectivity<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the representative of the set containing `node`, pointing every
    /// node on the way directly at it.
    pub fn find(&mut self, node: H) -> H {
        let mut root = node;
        while let Some(&parent) = self.parent.get(&root) {
            root = parent;
        }
        let mut current = node;
        while current != root {
            match self.parent.insert(current, root) {
                Some(next) => current = next,
                None => break,
            }
        }
        root
    }

    /// Merges the sets containing `a` and `b`.  Returns `false` if they were
    /// already the same set.
    pub fn unite(&mut self, a: H, b: H) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        let rank_a = self.rank.get(&root_a).copied().unwrap_or(0);
        let rank_b = self.rank.get(&root_b).copied().unwrap_or(0);
        if rank_a < rank_b {
            self.parent.insert(root_a, root_b);
        } else {
            self.parent.insert(root_b, root_a);
            if rank_a == rank_b {
                self.rank.insert(root_a, rank_a + 1);
            }
        }
        true
    }

    pub fn is_connected(&mut self, a: H, b: H) -> bool {
        self.find(a) == self.find(b)
    }
}
