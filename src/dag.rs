use std::hash::Hash;

use derivative::Derivative;

use crate::{
    adjacency::AdjacencyStore,
    cost::Cost,
    directedness::Directed,
    error::{EdgeError, NodeError},
    graph::{DiGraph, Graph, GraphMut},
    handle::Handle,
    interner::NodeInterner,
    search::VisitOrder,
    shortest_path::{self, ShortestPaths},
    tracing_support::info_span,
};

/// A directed graph that its owner promises is acyclic.
///
/// Acyclicity is never checked.  It is what makes [`Dag::topo_sort`] and the
/// linear-time [`Graph::singular_shortest_path`] correct; on a graph with a
/// cycle both return meaningless results.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone, C: Clone, H: Clone"),
    Debug(bound = "N: Eq + Hash, C: Cost, H: Handle"),
    Default(bound = "")
)]
pub struct Dag<N, C, H = u32> {
    graph: DiGraph<N, C, H>,
}

impl<N, C, H> Dag<N, C, H>
where
    N: Eq + Hash,
    C: Cost,
    H: Handle,
{
    /// Orders every node so that each edge points from an earlier node to a
    /// later one: the reverse of a full post-order depth-first search.
    pub fn topo_sort(&self) -> Vec<H> {
        let _span = info_span!("topo_sort").entered();
        let mut order = self.graph.dfs(VisitOrder::Post);
        order.reverse();
        order
    }

    pub fn as_digraph(&self) -> &DiGraph<N, C, H> {
        &self.graph
    }

    pub fn into_inner(self) -> DiGraph<N, C, H> {
        self.graph
    }
}

impl<N, C, H> From<DiGraph<N, C, H>> for Dag<N, C, H> {
    fn from(graph: DiGraph<N, C, H>) -> Self {
        Self { graph }
    }
}

impl<N, C, H> Graph for Dag<N, C, H>
where
    N: Eq + Hash,
    C: Cost,
    H: Handle,
{
    type Node = N;
    type Cost = C;
    type Handle = H;
    type Directedness = Directed;

    const ACYCLIC: bool = true;

    fn interner(&self) -> &NodeInterner<N, H> {
        self.graph.interner()
    }

    fn adjacency(&self) -> &AdjacencyStore<H, C> {
        self.graph.adjacency()
    }

    fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    /// Relaxes each node's outgoing edges once, in topological order.
    /// Negative edge costs are allowed.
    fn singular_shortest_path(&self, start: H, end: H) -> ShortestPaths<H, C> {
        let order = self.topo_sort();
        shortest_path::dag_shortest_paths(self, &order, start, end)
    }
}

impl<N, C, H> GraphMut for Dag<N, C, H>
where
    N: Eq + Hash,
    C: Cost,
    H: Handle,
{
    fn new() -> Self {
        Self::default()
    }

    fn try_register_node(&mut self, node: N) -> Result<H, NodeError> {
        self.graph.try_register_node(node)
    }

    fn register_edge(&mut self, from: H, to: H, cost: C) {
        self.graph.register_edge(from, to, cost);
    }

    fn modify_edge(&mut self, from: H, to: H, old_cost: C, new_cost: C) -> Result<(), EdgeError> {
        self.graph.modify_edge(from, to, old_cost, new_cost)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn position(order: &[u32], node: u32) -> usize {
        order
            .iter()
            .position(|&n| n == node)
            .expect("every node is ordered")
    }

    #[test]
    fn test_topo_sort_diamond() {
        let mut dag = Dag::<u32, u32>::new();
        for i in 0..4 {
            dag.register_node(i);
        }
        dag.register_edge(0, 1, 1);
        dag.register_edge(1, 3, 1);
        dag.register_edge(0, 2, 1);
        dag.register_edge(2, 3, 1);
        let order = dag.topo_sort();
        assert_eq!(order, vec![0, 2, 1, 3]);
        assert!(position(&order, 0) < position(&order, 1));
        assert!(position(&order, 0) < position(&order, 2));
        assert!(position(&order, 1) < position(&order, 3));
        assert!(position(&order, 2) < position(&order, 3));
    }

    #[test]
    fn test_topo_sort_places_late_roots_first() {
        let mut dag = Dag::<char, u32>::new();
        let a = dag.register_node('a');
        let b = dag.register_node('b');
        let c = dag.register_node('c');
        dag.register_edge(c, a, 1);
        dag.register_edge(a, b, 1);
        assert_eq!(dag.topo_sort(), vec![c, a, b]);
    }

    #[test]
    fn test_dag_shortest_path_allows_negative_costs() {
        let mut dag = Dag::<u32, i32>::new();
        for i in 0..5 {
            dag.register_node(i);
        }
        dag.register_edge(0, 1, 2);
        dag.register_edge(0, 2, 6);
        dag.register_edge(1, 2, 1);
        dag.register_edge(2, 3, -4);
        dag.register_edge(1, 3, 3);
        dag.register_edge(3, 4, 1);
        let paths = dag.singular_shortest_path(0, 4);
        assert_eq!(paths.distance(3), Some(-1));
        assert_eq!(paths.distance(4), Some(0));
        assert_eq!(paths.path_to(4), Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_dag_shortest_path_sample_graph() {
        let mut dag = Dag::<u32, u32>::new();
        for i in 0..7 {
            dag.register_node(i);
        }
        for (from, to, cost) in [(0, 1, 1), (0, 2, 4), (1, 2, 2), (1, 3, 5), (2, 3, 1)] {
            dag.register_edge(from, to, cost);
        }
        let paths = dag.singular_shortest_path(0, 3);
        assert_eq!(paths.route(3).map(|r| (r.cost, r.nodes)), Some((4, vec![0, 1, 2, 3])));
        assert_eq!(paths.distance(5), None);
    }

    #[test]
    fn test_dag_shortest_path_unregistered_start() {
        let mut dag = Dag::<u32, u32>::new();
        dag.register_node(0);
        assert!(dag.singular_shortest_path(3, 0).is_empty());
    }

    #[test]
    fn test_conversions() {
        let mut graph = DiGraph::<&str, u32>::new();
        let a = graph.register_node("a");
        let b = graph.register_node("b");
        graph.register_edge(a, b, 1);
        let dag = Dag::from(graph);
        assert_eq!(dag.as_digraph().num_edges(), 1);
        assert!(dag.exist_edge(a, b, 1));
        let graph = dag.into_inner();
        assert!(graph.exist_node(&"b"));
    }

    #[quickcheck]
    fn prop_topo_sort_respects_edges(edges: Vec<(u8, u8)>) -> bool {
        let mut dag = Dag::<u8, u8>::new();
        for i in 0..16 {
            dag.register_node(i);
        }
        for (a, b) in edges {
            let (a, b) = (a % 16, b % 16);
            // Only forward edges, so the graph stays acyclic.
            if a < b {
                dag.register_edge(u32::from(a), u32::from(b), 1);
            }
        }
        let order = dag.topo_sort();
        let mut rank = [0; 16];
        for (i, &node) in order.iter().enumerate() {
            rank[node as usize] = i;
        }
        order.len() == 16
            && dag
                .edges()
                .iter()
                .all(|e| rank[e.from as usize] < rank[e.to as usize])
    }

    #[quickcheck]
    fn prop_dag_shortest_path_agrees_with_dijkstra(edges: Vec<(u8, u8, u8)>) -> bool {
        let mut dag = Dag::<u8, u32>::new();
        for i in 0..12 {
            dag.register_node(i);
        }
        for (a, b, cost) in edges {
            let (a, b) = (a % 12, b % 12);
            if a < b {
                dag.register_edge(u32::from(a), u32::from(b), u32::from(cost));
            }
        }
        let linear = dag.singular_shortest_path(0, 11);
        let route = dag.as_digraph().dijkstra(0, 11);
        linear.distance(11) == route.map(|r| r.cost)
    }
}
