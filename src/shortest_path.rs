use std::{
    cmp::Ordering,
    collections::{BTreeMap, BinaryHeap},
};

use crate::{
    Graph,
    cost::Cost,
    handle::Handle,
    tracing_support::{debug_event, info_span},
};

/// A path between two nodes together with its total cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Route<H, C> {
    pub cost: C,
    /// The nodes on the path, starting with the source and ending with the
    /// target.
    pub nodes: Vec<H>,
}

/// Single-source shortest path results: the best known distance to every
/// reached node and the predecessor through which it was reached.
///
/// An empty result means the source was never registered.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths<H, C> {
    start: H,
    distances: BTreeMap<H, C>,
    predecessors: BTreeMap<H, H>,
}

impl<H, C> ShortestPaths<H, C>
where
    H: Handle,
    C: Cost,
{
    fn new(start: H) -> Self {
        Self {
            start,
            distances: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    fn reach(&mut self, node: H, distance: C, predecessor: H) {
        self.distances.insert(node, distance);
        self.predecessors.insert(node, predecessor);
    }

    /// Gets the source of the search.
    pub fn start(&self) -> H {
        self.start
    }

    /// Gets the distance from the source to `node`, if `node` was reached.
    pub fn distance(&self, node: H) -> Option<C> {
        self.distances.get(&node).copied()
    }

    /// Gets the node preceding `node` on its shortest path.
    pub fn predecessor(&self, node: H) -> Option<H> {
        self.predecessors.get(&node).copied()
    }

    /// Gets the distance map, ordered by handle.
    pub fn distances(&self) -> &BTreeMap<H, C> {
        &self.distances
    }

    /// Gets the predecessor map, ordered by handle.
    pub fn predecessors(&self) -> &BTreeMap<H, H> {
        &self.predecessors
    }

    /// Checks whether nothing was reached, not even the source.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Reconstructs the path from the source to `end` by following
    /// predecessors.  Returns `None` if `end` was not reached.
    pub fn path_to(&self, end: H) -> Option<Vec<H>> {
        if !self.distances.contains_key(&end) {
            return None;
        }
        let mut path = vec![end];
        let mut current = end;
        while current != self.start {
            // A predecessor chain longer than the map can only come from a
            // cycle, which a violated cost precondition can produce.
            if path.len() > self.predecessors.len() + 1 {
                return None;
            }
            current = *self.predecessors.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// Gets the path from the source to `end` along with its cost.
    pub fn route(&self, end: H) -> Option<Route<H, C>> {
        let cost = self.distance(end)?;
        let nodes = self.path_to(end)?;
        Some(Route { cost, nodes })
    }
}

/// The outcome of a shortest path search that can fail in more than one way.
#[derive(Clone, Debug, PartialEq)]
pub enum ShortestPathOutcome<H, C> {
    /// The search completed.
    Found(ShortestPaths<H, C>),
    /// The source node was never registered, so nothing is reachable.
    Unreachable,
    /// A cycle of negative total cost is reachable from the source, so
    /// shortest paths are undefined.
    NegativeCycle,
}

impl<H, C> ShortestPathOutcome<H, C> {
    /// Gets the search results, if the search completed.
    pub fn found(self) -> Option<ShortestPaths<H, C>> {
        match self {
            ShortestPathOutcome::Found(paths) => Some(paths),
            _ => None,
        }
    }

    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, ShortestPathOutcome::NegativeCycle)
    }
}

/// A queued node for Dijkstra's algorithm.  `BinaryHeap` is a max-heap, so
/// the ordering is reversed: the best cost under `compare` comes out first,
/// with ties broken by the lower handle.
struct QueueEntry<'a, H, C, F> {
    cost: C,
    node: H,
    compare: &'a F,
}

impl<H, C, F> Ord for QueueEntry<'_, H, C, F>
where
    H: Handle,
    F: Fn(&C, &C) -> Ordering,
{
    fn cmp(&self, other: &Self) -> Ordering {
        (self.compare)(&self.cost, &other.cost)
            .reverse()
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl<H, C, F> PartialOrd for QueueEntry<'_, H, C, F>
where
    H: Handle,
    F: Fn(&C, &C) -> Ordering,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<H, C, F> PartialEq for QueueEntry<'_, H, C, F>
where
    H: Handle,
    F: Fn(&C, &C) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<H, C, F> Eq for QueueEntry<'_, H, C, F>
where
    H: Handle,
    F: Fn(&C, &C) -> Ordering,
{
}

/// Dijkstra's algorithm from `start`, stopping early once `end` is settled.
///
/// `compare` ranks distances; a distance ranked `Less` is better.  Edge costs
/// must never make a distance better than the one it extends (for the
/// ascending order: costs must be non-negative).  This is not checked, and
/// violating it produces wrong results.
pub(crate) fn dijkstra<G, F>(
    graph: &G,
    start: G::Handle,
    end: Option<G::Handle>,
    compare: F,
) -> ShortestPaths<G::Handle, G::Cost>
where
    G: Graph,
    F: Fn(&G::Cost, &G::Cost) -> Ordering,
{
    let _span = info_span!("dijkstra", start = ?start, end = ?end).entered();
    let mut paths = ShortestPaths::new(start);
    if !graph.handle_exists(start) {
        debug_event!(start = ?start, "dijkstra from unregistered node");
        return paths;
    }
    paths.distances.insert(start, G::Cost::zero());
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry {
        cost: G::Cost::zero(),
        node: start,
        compare: &compare,
    });

    while let Some(QueueEntry { cost: distance, node, .. }) = queue.pop() {
        if paths
            .distance(node)
            .is_some_and(|best| compare(&best, &distance) == Ordering::Less)
        {
            // Stale entry; a better distance was queued later.
            continue;
        }
        if end == Some(node) {
            break;
        }
        for (neighbor, cost) in graph.neighbors(node) {
            let candidate = distance + cost;
            let improves = match paths.distances.get(&neighbor) {
                None => true,
                Some(current) => compare(&candidate, current) == Ordering::Less,
            };
            if improves {
                paths.reach(neighbor, candidate, node);
                queue.push(QueueEntry {
                    cost: candidate,
                    node: neighbor,
                    compare: &compare,
                });
            }
        }
    }
    paths
}

/// The Bellman-Ford algorithm from `start`.  Handles negative edge costs and
/// reports a negative cycle reachable from `start`.
pub(crate) fn bellman_ford<G: Graph>(
    graph: &G,
    start: G::Handle,
) -> ShortestPathOutcome<G::Handle, G::Cost> {
    let _span = info_span!("bellman_ford", start = ?start).entered();
    if !graph.handle_exists(start) {
        debug_event!(start = ?start, "bellman-ford from unregistered node");
        return ShortestPathOutcome::Unreachable;
    }
    let edges: Vec<_> = graph.adjacency().iter().collect();
    let mut paths = ShortestPaths::new(start);
    paths.distances.insert(start, G::Cost::zero());

    // Relaxes every edge once, returning the first improvement found when
    // `probe` is set instead of applying it.
    let relax_all = |paths: &mut ShortestPaths<G::Handle, G::Cost>, probe: bool| {
        let mut changed = false;
        for edge in &edges {
            let Some(distance) = paths.distance(edge.from) else {
                continue;
            };
            let candidate = distance + edge.cost;
            let improves = match paths.distance(edge.to) {
                None => !probe,
                Some(current) => candidate.cost_cmp(&current) == Ordering::Less,
            };
            if improves {
                if probe {
                    return true;
                }
                paths.reach(edge.to, candidate, edge.from);
                changed = true;
            }
        }
        changed
    };

    for _ in 1..graph.num_nodes() {
        if !relax_all(&mut paths, false) {
            break;
        }
    }
    if relax_all(&mut paths, true) {
        debug_event!(start = ?start, "negative cycle reachable from start");
        return ShortestPathOutcome::NegativeCycle;
    }
    ShortestPathOutcome::Found(paths)
}

/// Shortest paths over nodes listed in topological order.  Each node's
/// outgoing edges are relaxed once, in order; processing stops when `end` is
/// reached, since no later node can lead back to it.
///
/// The order must be a valid topological order of an acyclic graph.  This is
/// not checked.
pub(crate) fn dag_shortest_paths<G: Graph>(
    graph: &G,
    topological_order: &[G::Handle],
    start: G::Handle,
    end: G::Handle,
) -> ShortestPaths<G::Handle, G::Cost> {
    let _span = info_span!("dag_shortest_path", start = ?start, end = ?end).entered();
    let mut paths = ShortestPaths::new(start);
    if !graph.handle_exists(start) {
        debug_event!(start = ?start, "dag shortest path from unregistered node");
        return paths;
    }
    paths.distances.insert(start, G::Cost::zero());
    for &node in topological_order {
        if node == end {
            break;
        }
        let Some(distance) = paths.distance(node) else {
            continue;
        };
        for (neighbor, cost) in graph.neighbors(node) {
            let candidate = distance + cost;
            if paths
                .distance(neighbor)
                .is_none_or(|current| candidate.cost_cmp(&current) == Ordering::Less)
            {
                paths.reach(neighbor, candidate, node);
            }
        }
    }
    paths
}
