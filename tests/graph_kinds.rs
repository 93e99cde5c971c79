mod directed {
    pub use leangraph::{DiGraph, graph_tests, graph_tests::TestDataBuilder, prelude::*};

    pub struct DiGraphBuilder;

    impl TestDataBuilder for DiGraphBuilder {
        type Graph = DiGraph<u32, u32>;

        fn new_node(&self, i: usize) -> u32 {
            i as u32
        }
    }

    pub struct WideHandleBuilder;

    impl TestDataBuilder for WideHandleBuilder {
        type Graph = DiGraph<i64, f32, usize>;

        fn new_node(&self, i: usize) -> i64 {
            -(i as i64)
        }
    }

    graph_tests!(u32_costs, DiGraphBuilder, DiGraphBuilder);
    graph_tests!(f32_costs, WideHandleBuilder, WideHandleBuilder);
}

mod undirected {
    pub use leangraph::{UniGraph, graph_tests, graph_tests::TestDataBuilder, prelude::*};

    pub struct StringNodeBuilder;

    impl TestDataBuilder for StringNodeBuilder {
        type Graph = UniGraph<String, f64>;

        fn new_node(&self, i: usize) -> String {
            format!("n{i}")
        }
    }

    pub struct SignedCostBuilder;

    impl TestDataBuilder for SignedCostBuilder {
        type Graph = UniGraph<u64, i64>;

        fn new_node(&self, i: usize) -> u64 {
            i as u64 * 3
        }
    }

    graph_tests!(string_nodes, StringNodeBuilder, StringNodeBuilder;

        #[test]
        fn test_mst_spans_sample_graph() {
            let mut graph = StringNodeBuilder.new_graph();
            let h: Vec<_> = (0..4)
                .map(|i| graph.register_node(StringNodeBuilder.new_node(i)))
                .collect();
            let edges = [(0, 1, 1.0), (0, 2, 4.0), (1, 2, 2.0), (1, 3, 5.0), (2, 3, 1.0)];
            for (from, to, cost) in edges {
                graph.register_edge(h[from], h[to], cost);
            }
            let tree = graph.mst_kruskal();
            assert_eq!(tree.len(), 3);
            assert_eq!(tree.iter().map(|e| e.cost).sum::<f64>(), 4.0);
            assert_eq!(graph.connected_components(), vec![h.clone()]);
        }
    );
    graph_tests!(signed_costs, SignedCostBuilder, SignedCostBuilder);
}

mod acyclic {
    pub use leangraph::{Dag, graph_tests, graph_tests::TestDataBuilder, prelude::*};

    pub struct DagBuilder;

    impl TestDataBuilder for DagBuilder {
        type Graph = Dag<u64, i32>;

        fn new_node(&self, i: usize) -> u64 {
            i as u64
        }
    }

    graph_tests!(dag, DagBuilder, DagBuilder;

        #[test]
        fn test_topo_sort_of_diamond() {
            let mut dag = DagBuilder.new_graph();
            let h: Vec<_> = (0..4).map(|i| dag.register_node(i)).collect();
            dag.register_edge(h[0], h[1], 1);
            dag.register_edge(h[1], h[3], 1);
            dag.register_edge(h[0], h[2], 1);
            dag.register_edge(h[2], h[3], 1);
            let order = dag.topo_sort();
            let position = |node| order.iter().position(|&n| n == node).unwrap();
            assert!(position(h[0]) < position(h[1]));
            assert!(position(h[0]) < position(h[2]));
            assert!(position(h[1]) < position(h[3]));
            assert!(position(h[2]) < position(h[3]));
        }
    );
}

#[cfg(feature = "pathfinding")]
mod pathfinding_cross_check {
    use leangraph::{DiGraph, UniGraph, graph_test_support::ArbGraph, prelude::*};
    use quickcheck_macros::quickcheck;

    fn reference_cost<G>(graph: &G, start: u32, end: u32) -> Option<u32>
    where
        G: Graph<Handle = u32, Cost = u32>,
    {
        pathfinding::prelude::dijkstra(&start, |&node| graph.neighbors(node), |&node| node == end)
            .map(|(_, cost)| cost)
    }

    #[quickcheck]
    fn prop_dijkstra_matches_pathfinding(ArbGraph { graph }: ArbGraph<DiGraph<u8, u32>>) -> bool {
        let Some(end) = graph.handles().last() else {
            return true;
        };
        graph.dijkstra(0, end).map(|route| route.cost) == reference_cost(&graph, 0, end)
    }

    #[quickcheck]
    fn prop_bellman_ford_matches_pathfinding(
        ArbGraph { graph }: ArbGraph<UniGraph<u8, u32>>,
    ) -> bool {
        let Some(paths) = graph.bellman_ford(0).found() else {
            return graph.is_empty();
        };
        graph
            .handles()
            .all(|node| paths.distance(node) == reference_cost(&graph, 0, node))
    }

    #[quickcheck]
    fn prop_components_match_pathfinding(ArbGraph { graph }: ArbGraph<UniGraph<u8, u32>>) -> bool {
        let nodes: Vec<u32> = graph.handles().collect();
        let mut expected: Vec<Vec<u32>> =
            pathfinding::prelude::connected_components(&nodes, |&node| graph.successors(node))
                .into_iter()
                .map(|component| {
                    let mut component: Vec<_> = component.into_iter().collect();
                    component.sort();
                    component
                })
                .collect();
        expected.sort();
        graph.connected_components() == expected
    }
}
