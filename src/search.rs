use std::collections::VecDeque;

use crate::{Graph, handle::Handle};

/// The point at which a traversal records a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisitOrder {
    /// Record a node when it is first reached.
    Pre,
    /// Record a node once the nodes it scheduled have been handled.
    Post,
}

#[derive(Clone, Copy, Debug)]
enum Visit<H> {
    Pre(H),
    Post(H),
}

/// A set of visited handles that can be shared between traversals, so that
/// a sweep over several roots explores each node once.
#[cfg(feature = "bitvec")]
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    bits: bitvec::vec::BitVec,
}

#[cfg(feature = "bitvec")]
impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set sized for handles below `num_nodes`.
    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            bits: bitvec::vec::BitVec::repeat(false, num_nodes),
        }
    }

    /// Marks `handle` as visited.  Returns `false` if it already was.
    pub fn insert<H: Handle>(&mut self, handle: H) -> bool {
        let index = handle.index();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        let seen = self.bits[index];
        self.bits.set(index, true);
        !seen
    }

    pub fn contains<H: Handle>(&self, handle: H) -> bool {
        self.bits.get(handle.index()).is_some_and(|bit| *bit)
    }

    /// Gets the number of visited handles.
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }
}

/// A set of visited handles that can be shared between traversals, so that
/// a sweep over several roots explores each node once.
#[cfg(not(feature = "bitvec"))]
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    seen: std::collections::HashSet<usize>,
}

#[cfg(not(feature = "bitvec"))]
impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set sized for handles below `num_nodes`.
    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            seen: std::collections::HashSet::with_capacity(num_nodes),
        }
    }

    /// Marks `handle` as visited.  Returns `false` if it already was.
    pub fn insert<H: Handle>(&mut self, handle: H) -> bool {
        self.seen.insert(handle.index())
    }

    pub fn contains<H: Handle>(&self, handle: H) -> bool {
        self.seen.contains(&handle.index())
    }

    /// Gets the number of visited handles.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Gets the distinct registered targets of `from`'s edges.  Edges to handles
/// that were never issued are not followed.
fn targets<G: Graph>(graph: &G, from: G::Handle) -> Vec<G::Handle> {
    graph
        .successors(from)
        .filter(|&to| graph.handle_exists(to))
        .collect()
}

/// Iterative depth-first traversal from a single root.
///
/// A node is marked visited when it is first popped; nodes already visited,
/// including those marked by earlier traversals sharing the same
/// [`VisitedSet`], are skipped.  Neighbors are explored in ascending handle
/// order.  In [`VisitOrder::Post`] a node is yielded after every node reached
/// through it, which makes the sequence a valid finishing order.
pub struct DfsIterator<'g, G: Graph> {
    graph: &'g G,
    order: VisitOrder,
    visited: VisitedSet,
    stack: Vec<Visit<G::Handle>>,
}

impl<'g, G> DfsIterator<'g, G>
where
    G: Graph,
{
    pub fn new(graph: &'g G, from: G::Handle, order: VisitOrder) -> Self {
        Self::with_visited(
            graph,
            from,
            order,
            VisitedSet::with_capacity(graph.num_nodes()),
        )
    }

    /// Creates a traversal that skips every node already in `visited`.
    pub fn with_visited(
        graph: &'g G,
        from: G::Handle,
        order: VisitOrder,
        visited: VisitedSet,
    ) -> Self {
        let mut stack = Vec::new();
        if graph.handle_exists(from) {
            stack.push(Visit::Pre(from));
        }
        Self {
            graph,
            order,
            visited,
            stack,
        }
    }

    /// Consumes the traversal, returning the visited set so it can be handed
    /// to the next traversal.
    pub fn into_visited(self) -> VisitedSet {
        self.visited
    }
}

impl<'g, G> Iterator for DfsIterator<'g, G>
where
    G: Graph,
{
    type Item = G::Handle;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(visit) = self.stack.pop() {
            match visit {
                Visit::Pre(node) => {
                    if !self.visited.insert(node) {
                        continue;
                    }
                    if self.order == VisitOrder::Post {
                        self.stack.push(Visit::Post(node));
                    }
                    for neighbor in targets(self.graph, node).into_iter().rev() {
                        if !self.visited.contains(neighbor) {
                            self.stack.push(Visit::Pre(neighbor));
                        }
                    }
                    if self.order == VisitOrder::Pre {
                        return Some(node);
                    }
                }
                Visit::Post(node) => return Some(node),
            }
        }
        None
    }
}

/// Breadth-first traversal from a single root.
///
/// A node is marked visited when it is enqueued, so it is scheduled at most
/// once.  A queue finishes nodes in the order it reaches them, so a
/// breadth-first traversal has a single visiting order: post-order and
/// pre-order coincide.
pub struct BfsIterator<'g, G: Graph> {
    graph: &'g G,
    visited: VisitedSet,
    queue: VecDeque<G::Handle>,
}

impl<'g, G> BfsIterator<'g, G>
where
    G: Graph,
{
    pub fn new(graph: &'g G, from: G::Handle) -> Self {
        Self::with_visited(graph, from, VisitedSet::with_capacity(graph.num_nodes()))
    }

    /// Creates a traversal that skips every node already in `visited`.
    pub fn with_visited(graph: &'g G, from: G::Handle, mut visited: VisitedSet) -> Self {
        let mut queue = VecDeque::new();
        if graph.handle_exists(from) && visited.insert(from) {
            queue.push_back(from);
        }
        Self {
            graph,
            visited,
            queue,
        }
    }

    /// Consumes the traversal, returning the visited set so it can be handed
    /// to the next traversal.
    pub fn into_visited(self) -> VisitedSet {
        self.visited
    }
}

impl<'g, G> Iterator for BfsIterator<'g, G>
where
    G: Graph,
{
    type Item = G::Handle;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        for neighbor in targets(self.graph, node) {
            if self.visited.insert(neighbor) {
                self.queue.push_back(neighbor);
            }
        }
        Some(node)
    }
}

/// Runs a depth-first traversal from every registered node in ascending
/// handle order, skipping nodes reached from an earlier root.
pub(crate) fn full_dfs<G: Graph>(graph: &G, order: VisitOrder) -> Vec<G::Handle> {
    let mut result = Vec::with_capacity(graph.num_nodes());
    let mut visited = VisitedSet::with_capacity(graph.num_nodes());
    for root in graph.handles() {
        if visited.contains(root) {
            continue;
        }
        let mut iter = DfsIterator::with_visited(graph, root, order, visited);
        result.extend(&mut iter);
        visited = iter.into_visited();
    }
    result
}

/// Runs a breadth-first traversal from every registered node in ascending
/// handle order, skipping nodes reached from an earlier root.
pub(crate) fn full_bfs<G: Graph>(graph: &G) -> Vec<G::Handle> {
    let mut result = Vec::with_capacity(graph.num_nodes());
    let mut visited = VisitedSet::with_capacity(graph.num_nodes());
    for root in graph.handles() {
        if visited.contains(root) {
            continue;
        }
        let mut iter = BfsIterator::with_visited(graph, root, visited);
        result.extend(&mut iter);
        visited = iter.into_visited();
    }
    result
}
