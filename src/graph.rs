use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt::{self, Debug},
    hash::Hash,
    marker::PhantomData,
};

use derivative::Derivative;

use crate::{
    adjacency::{AdjacencyStore, Edge},
    cost::Cost,
    directedness::{Directed, Directedness, Undirected},
    error::{EdgeError, NodeError},
    handle::Handle,
    interner::NodeInterner,
    search::{self, BfsIterator, DfsIterator, VisitOrder},
    shortest_path::{self, Route, ShortestPathOutcome, ShortestPaths},
    tracing_support::{debug_event, info_span},
    union_find::Connectivity,
};

/// Read access to a weighted multigraph whose nodes are interned to dense
/// handles.
///
/// Implementors supply the node interner, the adjacency store and the
/// logical edge count; every query, traversal and shortest path search is
/// provided on top of those.  Handles passed to queries are never validated
/// beyond returning `false` or an empty result for handles that were never
/// issued.
pub trait Graph: Sized {
    type Node: Eq + Hash;
    type Cost: Cost;
    type Handle: Handle;
    type Directedness: Directedness;

    /// Whether every implementation of this type is known to be acyclic.
    /// Only used to shape generated test data.
    const ACYCLIC: bool = false;

    fn interner(&self) -> &NodeInterner<Self::Node, Self::Handle>;

    fn adjacency(&self) -> &AdjacencyStore<Self::Handle, Self::Cost>;

    /// Gets the number of logical edges.  For undirected graphs an edge
    /// stored in both directions counts once.
    fn num_edges(&self) -> usize;

    /// Returns true if the graph is directed.
    fn is_directed(&self) -> bool {
        Self::Directedness::is_directed()
    }

    fn num_nodes(&self) -> usize {
        self.interner().len()
    }

    /// Checks whether no node has been registered.
    fn is_empty(&self) -> bool {
        self.interner().is_empty()
    }

    /// Checks whether `node` has been registered.
    fn exist_node(&self, node: &Self::Node) -> bool {
        self.interner().exists(node)
    }

    /// Gets the handle of a registered node.
    fn handle_of(&self, node: &Self::Node) -> Option<Self::Handle> {
        self.interner().handle_of(node)
    }

    /// Gets the handle of a registered node, or [`NodeError::NotExist`].
    fn resolve(&self, node: &Self::Node) -> Result<Self::Handle, NodeError> {
        self.interner().resolve(node)
    }

    /// Checks whether `handle` was issued to some node.
    fn handle_exists(&self, handle: Self::Handle) -> bool {
        self.interner().handle_is_issued(handle)
    }

    /// Iterates over every issued handle in ascending order.
    fn handles(&self) -> impl Iterator<Item = Self::Handle> + '_ {
        self.interner().handles()
    }

    /// Checks whether the exact edge `(from, to, cost)` exists.
    fn exist_edge(&self, from: Self::Handle, to: Self::Handle, cost: Self::Cost) -> bool {
        self.handle_exists(from) && self.adjacency().contains(from, to, cost)
    }

    /// Checks whether any edge from `from` to `to` exists, whatever its cost.
    fn exist_blank_edge(&self, from: Self::Handle, to: Self::Handle) -> bool {
        self.handle_exists(from) && self.adjacency().contains_target(from, to)
    }

    /// Iterates over the `(to, cost)` pairs leaving `from`, ascending by
    /// target and then by cost.  For undirected graphs this includes every
    /// edge touching `from`.
    fn neighbors(
        &self,
        from: Self::Handle,
    ) -> impl Iterator<Item = (Self::Handle, Self::Cost)> + '_ {
        self.adjacency().neighbors(from)
    }

    /// Iterates over the distinct nodes reachable from `from` by one edge,
    /// in ascending order.
    fn successors(&self, from: Self::Handle) -> impl Iterator<Item = Self::Handle> + '_ {
        let mut last = None;
        self.neighbors(from)
            .filter_map(move |(to, _)| (last.replace(to) != Some(to)).then_some(to))
    }

    /// Lists every logical edge, ascending by `(from, to, cost)`.  An
    /// undirected edge is listed once, with `from <= to`.
    fn edges(&self) -> Vec<Edge<Self::Handle, Self::Cost>> {
        let directed = self.is_directed();
        self.adjacency()
            .iter()
            .filter(|edge| directed || edge.from <= edge.to)
            .collect()
    }

    // Traversal

    /// Lists the nodes reachable from `from` in depth-first order.  Lower
    /// handles are explored first.  Empty if `from` was never issued.
    fn explore_dfs(&self, from: Self::Handle, order: VisitOrder) -> Vec<Self::Handle> {
        let _span = info_span!("explore", kind = "dfs", from = ?from).entered();
        DfsIterator::new(self, from, order).collect()
    }

    /// Lists the nodes reachable from `from` in breadth-first order.  Empty
    /// if `from` was never issued.
    ///
    /// Breadth-first search has no finishing order distinct from its
    /// discovery order, so both orders give the same result.
    fn explore_bfs(&self, from: Self::Handle, _order: VisitOrder) -> Vec<Self::Handle> {
        let _span = info_span!("explore", kind = "bfs", from = ?from, order = ?_order).entered();
        BfsIterator::new(self, from).collect()
    }

    /// Lists every node once in depth-first order, starting a new search
    /// from each unvisited handle in ascending order.
    fn dfs(&self, order: VisitOrder) -> Vec<Self::Handle> {
        let _span = info_span!("dfs", order = ?order).entered();
        search::full_dfs(self, order)
    }

    /// Lists every node once in breadth-first order, starting a new search
    /// from each unvisited handle in ascending order.
    fn bfs(&self, _order: VisitOrder) -> Vec<Self::Handle> {
        let _span = info_span!("bfs", order = ?_order).entered();
        search::full_bfs(self)
    }

    /// Lazily performs a depth-first search starting from `from`.
    fn dfs_iter(&self, from: Self::Handle, order: VisitOrder) -> DfsIterator<'_, Self> {
        DfsIterator::new(self, from, order)
    }

    /// Lazily performs a breadth-first search starting from `from`.
    fn bfs_iter(&self, from: Self::Handle) -> BfsIterator<'_, Self> {
        BfsIterator::new(self, from)
    }

    // Shortest paths

    /// Finds the cheapest route from `start` to `end` with Dijkstra's
    /// algorithm.  Returns `None` if `start` was never issued or `end` is
    /// unreachable.
    ///
    /// Edge costs must be non-negative.  This is not checked.
    fn dijkstra(
        &self,
        start: Self::Handle,
        end: Self::Handle,
    ) -> Option<Route<Self::Handle, Self::Cost>> {
        self.dijkstra_by(start, end, Self::Cost::cost_cmp)
    }

    /// Like [`Self::dijkstra`], but ranks distances with `compare`; a
    /// distance ranked [`Ordering::Less`] is preferred.
    fn dijkstra_by<F>(
        &self,
        start: Self::Handle,
        end: Self::Handle,
        compare: F,
    ) -> Option<Route<Self::Handle, Self::Cost>>
    where
        F: Fn(&Self::Cost, &Self::Cost) -> Ordering,
    {
        shortest_path::dijkstra(self, start, Some(end), compare).route(end)
    }

    /// Computes shortest path distances and predecessors from `start`.  The
    /// search may stop as soon as `end` is settled, so only the entries for
    /// `end` and the nodes on its path are guaranteed to be final.
    fn singular_shortest_path(
        &self,
        start: Self::Handle,
        end: Self::Handle,
    ) -> ShortestPaths<Self::Handle, Self::Cost> {
        shortest_path::dijkstra(self, start, Some(end), Self::Cost::cost_cmp)
    }

    /// Computes shortest paths from `start` with the Bellman-Ford algorithm,
    /// which allows negative edge costs.
    fn bellman_ford(&self, start: Self::Handle) -> ShortestPathOutcome<Self::Handle, Self::Cost> {
        shortest_path::bellman_ford(self, start)
    }
}

/// Mutation of a [`Graph`].  Nodes and edges are only ever added; the cost of
/// an existing edge can be changed with [`Self::modify_edge`].
pub trait GraphMut: Graph {
    /// Creates a new, empty graph.
    fn new() -> Self;

    /// Registers `node`, returning its handle.  Registering a node again
    /// returns the handle it was first given.
    ///
    /// # Panics
    ///
    /// Panics if the handle type has no room for another node.
    fn register_node(&mut self, node: Self::Node) -> Self::Handle {
        match self.try_register_node(node) {
            Ok(handle) => handle,
            Err(error) => panic!(
                "handle space exhausted after {} nodes: {error}",
                self.num_nodes()
            ),
        }
    }

    /// Registers `node`, returning its handle, or [`NodeError::GeneralError`]
    /// if the handle type has no room for another node.
    fn try_register_node(&mut self, node: Self::Node) -> Result<Self::Handle, NodeError>;

    /// Adds the edge `(from, to, cost)`.  Adding an edge that already exists
    /// does nothing.  The endpoints are not checked against the registered
    /// nodes.
    fn register_edge(&mut self, from: Self::Handle, to: Self::Handle, cost: Self::Cost);

    /// Changes the cost of the edge `(from, to, old_cost)` to `new_cost`.
    /// If the edge `(from, to, new_cost)` already exists the two merge.
    fn modify_edge(
        &mut self,
        from: Self::Handle,
        to: Self::Handle,
        old_cost: Self::Cost,
        new_cost: Self::Cost,
    ) -> Result<(), EdgeError>;
}

/// A weighted multigraph over interned nodes.  Edges between the same pair
/// of nodes are distinct exactly when their costs differ.
///
/// `D` selects whether edges are [`Directed`] or [`Undirected`]; see
/// [`DiGraph`] and [`UniGraph`].
#[derive(Derivative)]
#[derivative(Clone(bound = "N: Clone, C: Clone, H: Clone"), Default(bound = ""))]
pub struct WeightedGraph<N, C, H = u32, D = Directed> {
    nodes: NodeInterner<N, H>,
    adjacency: AdjacencyStore<H, C>,
    /// Number of logical edges.
    edge_count: usize,
    directedness: PhantomData<D>,
}

/// A directed weighted multigraph.
pub type DiGraph<N, C, H = u32> = WeightedGraph<N, C, H, Directed>;

/// An undirected weighted multigraph.  Every edge is stored in both
/// directions, self-loops once.
pub type UniGraph<N, C, H = u32> = WeightedGraph<N, C, H, Undirected>;

impl<N, C, H, D> Graph for WeightedGraph<N, C, H, D>
where
    N: Eq + Hash,
    C: Cost,
    H: Handle,
    D: Directedness,
{
    type Node = N;
    type Cost = C;
    type Handle = H;
    type Directedness = D;

    fn interner(&self) -> &NodeInterner<N, H> {
        &self.nodes
    }

    fn adjacency(&self) -> &AdjacencyStore<H, C> {
        &self.adjacency
    }

    fn num_edges(&self) -> usize {
        self.edge_count
    }
}

impl<N, C, H, D> GraphMut for WeightedGraph<N, C, H, D>
where
    N: Eq + Hash,
    C: Cost,
    H: Handle,
    D: Directedness,
{
    fn new() -> Self {
        Self::default()
    }

    fn try_register_node(&mut self, node: N) -> Result<H, NodeError> {
        self.nodes.try_get_or_assign(node)
    }

    fn register_edge(&mut self, from: H, to: H, cost: C) {
        let inserted = self.adjacency.insert(from, to, cost);
        if !D::is_directed() && from != to {
            self.adjacency.insert(to, from, cost);
        }
        if inserted {
            self.edge_count += 1;
        }
    }

    fn modify_edge(&mut self, from: H, to: H, old_cost: C, new_cost: C) -> Result<(), EdgeError> {
        let mirrored = !D::is_directed() && from != to;
        let present = self.adjacency.contains(from, to, old_cost)
            && (!mirrored || self.adjacency.contains(to, from, old_cost));
        if !present {
            debug_event!(from = ?from, to = ?to, cost = ?old_cost, "modify_edge: no such edge");
            return Err(EdgeError::NotExist);
        }
        if old_cost.cost_cmp(&new_cost) == Ordering::Equal {
            return Ok(());
        }

        // Both directions were checked above, so nothing below can fail.
        self.adjacency.remove(from, to, old_cost);
        let inserted = self.adjacency.insert(from, to, new_cost);
        if mirrored {
            self.adjacency.remove(to, from, old_cost);
            self.adjacency.insert(to, from, new_cost);
        }
        if !inserted {
            self.edge_count -= 1;
        }
        Ok(())
    }
}

impl<N, C, H, D> Debug for WeightedGraph<N, C, H, D>
where
    N: Eq + Hash,
    C: Cost,
    H: Handle,
    D: Directedness,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if D::is_directed() { "DiGraph" } else { "UniGraph" };
        f.debug_struct(name)
            .field("num_nodes", &self.num_nodes())
            .field("edges", &self.edges())
            .finish()
    }
}

/// A trait which is automatically implemented for directed graphs, providing
/// methods specific to directed graphs.
pub trait GraphDirected: Graph {
    /// Finds the strongly connected component containing the given node.
    #[cfg(feature = "pathfinding")]
    fn strongly_connected_component(&self, start: Self::Handle) -> Vec<Self::Handle> {
        pathfinding::prelude::strongly_connected_component(&start, |&handle| {
            self.successors(handle)
        })
    }

    /// Partitions the graph into strongly connected components.
    #[cfg(feature = "pathfinding")]
    fn strongly_connected_components(&self) -> Vec<Vec<Self::Handle>> {
        let _span = info_span!("strongly_connected_components").entered();
        pathfinding::prelude::strongly_connected_components(
            &self.handles().collect::<Vec<_>>(),
            |&handle| self.successors(handle),
        )
    }
}

impl<G> GraphDirected for G where G: Graph<Directedness = Directed> {}

/// A trait which is automatically implemented for undirected graphs, providing
/// methods specific to undirected graphs.
pub trait GraphUndirected: Graph {
    /// Finds a minimum spanning forest with Kruskal's algorithm.  The result
    /// has one edge fewer than the number of nodes for every connected
    /// component, listed in the order they were selected.
    fn mst_kruskal(&self) -> Vec<Edge<Self::Handle, Self::Cost>> {
        crate::mst::kruskal(self)
    }

    /// Partitions the nodes into connected components.  Each component is
    /// sorted, and components are ordered by their lowest handle.
    fn connected_components(&self) -> Vec<Vec<Self::Handle>> {
        let _span = info_span!("connected_components").entered();
        let mut connectivity = Connectivity::new();
        for edge in self.adjacency().iter() {
            connectivity.unite(edge.from, edge.to);
        }
        let mut component_of_root = HashMap::new();
        let mut components: Vec<Vec<Self::Handle>> = Vec::new();
        for handle in self.handles() {
            let root = connectivity.find(handle);
            let index = *component_of_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[index].push(handle);
        }
        components
    }
}

impl<G> GraphUndirected for G where G: Graph<Directedness = Undirected> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_edge_is_idempotent() {
        let mut graph = DiGraph::<&str, u32>::new();
        let a = graph.register_node("a");
        let b = graph.register_node("b");
        graph.register_edge(a, b, 3);
        graph.register_edge(a, b, 3);
        graph.register_edge(a, b, 4);
        assert_eq!(graph.num_edges(), 2);
        assert!(graph.exist_edge(a, b, 3));
        assert!(graph.exist_edge(a, b, 4));
        assert!(!graph.exist_edge(b, a, 3));
        assert!(graph.exist_blank_edge(a, b));
        assert!(!graph.exist_blank_edge(b, a));
    }

    #[test]
    fn test_queries_on_unissued_handles() {
        let mut graph = DiGraph::<u32, u32>::new();
        graph.register_node(7);
        assert!(graph.exist_node(&7));
        assert!(!graph.exist_node(&8));
        assert!(graph.handle_exists(0));
        assert!(!graph.handle_exists(1));
        assert!(!graph.exist_edge(5, 0, 1));
        assert!(!graph.exist_blank_edge(5, 0));
        assert_eq!(graph.resolve(&8), Err(NodeError::NotExist));
        assert_eq!(graph.neighbors(5).count(), 0);
    }

    #[test]
    fn test_undirected_edges_count_once() {
        let mut graph = UniGraph::<char, u32>::new();
        let a = graph.register_node('a');
        let b = graph.register_node('b');
        graph.register_edge(a, b, 2);
        graph.register_edge(b, a, 2);
        graph.register_edge(a, a, 1);
        assert_eq!(graph.num_edges(), 2);
        assert!(graph.exist_edge(b, a, 2));
        assert_eq!(graph.adjacency().len(), 3);
        let edges: Vec<(u32, u32, u32)> = graph.edges().into_iter().map(Into::into).collect();
        assert_eq!(edges, vec![(0, 0, 1), (0, 1, 2)]);
    }

    #[test]
    fn test_modify_directed_edge() {
        let mut graph = DiGraph::<u32, u32>::new();
        graph.register_node(0);
        graph.register_node(1);
        graph.register_edge(0, 1, 5);
        assert_eq!(graph.modify_edge(0, 1, 6, 7), Err(EdgeError::NotExist));
        assert_eq!(graph.modify_edge(0, 1, 5, 7), Ok(()));
        assert!(!graph.exist_edge(0, 1, 5));
        assert!(graph.exist_edge(0, 1, 7));
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.modify_edge(0, 1, 7, 7), Ok(()));
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_modify_into_existing_edge_merges() {
        let mut graph = DiGraph::<u32, u32>::new();
        graph.register_node(0);
        graph.register_node(1);
        graph.register_edge(0, 1, 1);
        graph.register_edge(0, 1, 2);
        assert_eq!(graph.num_edges(), 2);
        graph.modify_edge(0, 1, 1, 2).unwrap();
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_modify_undirected_edge_updates_both_directions() {
        let mut graph = UniGraph::<u32, i32>::new();
        graph.register_node(0);
        graph.register_node(1);
        graph.register_edge(0, 1, 4);
        graph.modify_edge(1, 0, 4, -2).unwrap();
        assert!(graph.exist_edge(0, 1, -2));
        assert!(graph.exist_edge(1, 0, -2));
        assert!(!graph.exist_edge(0, 1, 4));
        assert_eq!(graph.num_edges(), 1);

        graph.register_edge(0, 1, 9);
        graph.modify_edge(0, 1, 9, -2).unwrap();
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.adjacency().len(), 2);
    }

    #[test]
    fn test_modify_undirected_self_loop() {
        let mut graph = UniGraph::<u32, u32>::new();
        graph.register_node(0);
        graph.register_edge(0, 0, 1);
        graph.modify_edge(0, 0, 1, 3).unwrap();
        assert!(graph.exist_edge(0, 0, 3));
        assert_eq!(graph.adjacency().len(), 1);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_successors_are_distinct() {
        let mut graph = DiGraph::<u32, u32>::new();
        for i in 0..3 {
            graph.register_node(i);
        }
        graph.register_edge(0, 2, 1);
        graph.register_edge(0, 1, 5);
        graph.register_edge(0, 2, 3);
        assert_eq!(graph.successors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            graph.neighbors(0).collect::<Vec<_>>(),
            vec![(1, 5), (2, 1), (2, 3)]
        );
    }

    #[test]
    fn test_connected_components() {
        let mut graph = UniGraph::<char, u32>::new();
        let h: Vec<_> = "abcdef".chars().map(|c| graph.register_node(c)).collect();
        graph.register_edge(h[3], h[0], 1);
        graph.register_edge(h[1], h[4], 1);
        graph.register_edge(h[4], h[2], 1);
        assert_eq!(
            graph.connected_components(),
            vec![vec![0, 3], vec![1, 2, 4], vec![5]]
        );
    }

    #[cfg(feature = "pathfinding")]
    #[test]
    fn test_strongly_connected_components() {
        let mut graph = DiGraph::<u32, u32>::new();
        for i in 0..5 {
            graph.register_node(i);
        }
        graph.register_edge(0, 1, 1);
        graph.register_edge(1, 2, 1);
        graph.register_edge(2, 0, 1);
        graph.register_edge(2, 3, 1);
        graph.register_edge(3, 4, 1);
        let mut components: Vec<Vec<u32>> = graph
            .strongly_connected_components()
            .into_iter()
            .map(|mut c| {
                c.sort();
                c
            })
            .collect();
        components.sort();
        assert_eq!(components, vec![vec![0, 1, 2], vec![3], vec![4]]);

        let mut component = graph.strongly_connected_component(1);
        component.sort();
        assert_eq!(component, vec![0, 1, 2]);
    }

    #[test]
    fn test_debug_lists_edges() {
        let mut graph = UniGraph::<&str, u8>::new();
        let a = graph.register_node("a");
        let b = graph.register_node("b");
        graph.register_edge(b, a, 7);
        assert_eq!(
            format!("{graph:?}"),
            "UniGraph { num_nodes: 2, edges: [Edge { from: 0, to: 1, cost: 7 }] }"
        );
    }

    #[test]
    fn test_try_register_node_reports_exhaustion() {
        let mut graph = DiGraph::<u32, u32, u8>::new();
        for i in 0..256 {
            graph.register_node(i);
        }
        assert_eq!(graph.try_register_node(256), Err(NodeError::GeneralError));
        assert_eq!(graph.try_register_node(3), Ok(3));
    }

    #[test]
    #[should_panic(expected = "handle space exhausted")]
    fn test_register_node_panics_when_exhausted() {
        let mut graph = UniGraph::<u32, u32, u8>::new();
        for i in 0..=256 {
            graph.register_node(i);
        }
    }
}
