use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use quickcheck::Arbitrary;

use crate::prelude::*;
use crate::tracing_support::{TimingScope, info_span, init_tracing, set_timing_scope};

/// A random graph built through [`GraphMut`], for property tests.
///
/// Costs are drawn from `0..16`.  Graphs whose type is
/// [`ACYCLIC`](Graph::ACYCLIC) only get edges from a lower handle to a higher
/// one, so they stay acyclic.
#[derive(Debug, Clone)]
pub struct ArbGraph<G> {
    pub graph: G,
}

impl<G> Arbitrary for ArbGraph<G>
where
    G: GraphMut + Clone + std::fmt::Debug + 'static,
    G::Node: Arbitrary,
    G::Cost: From<u8>,
{
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_nodes = usize::arbitrary(g) % 20; // Limit size for testing
        let num_edges = usize::arbitrary(g) % 50;
        let num_extra_parallel_edges = usize::arbitrary(g) % 5;
        let num_extra_self_loops = usize::arbitrary(g) % 5;

        let mut graph = G::new();
        // Identities may repeat, in which case the existing handle is reused.
        let nodes: Vec<_> = (0..num_nodes)
            .map(|_| graph.register_node(G::Node::arbitrary(g)))
            .collect();
        let new_cost = |g: &mut quickcheck::Gen| G::Cost::from(u8::arbitrary(g) % 16);

        for i in 0..num_edges {
            if nodes.len() < 2 {
                break;
            }
            let mut from = nodes[usize::arbitrary(g) % nodes.len()];
            let mut to = nodes[usize::arbitrary(g) % nodes.len()];
            if G::ACYCLIC {
                match from.cmp(&to) {
                    Ordering::Equal => continue,
                    Ordering::Greater => std::mem::swap(&mut from, &mut to),
                    Ordering::Less => {}
                }
            }
            let cost = new_cost(g);
            graph.register_edge(from, to, cost);
            if i < num_extra_parallel_edges {
                let cost = new_cost(g);
                graph.register_edge(from, to, cost);
            }
            if i < num_extra_self_loops && !G::ACYCLIC {
                let cost = new_cost(g);
                graph.register_edge(from, from, cost);
            }
        }

        ArbGraph { graph }
    }
}

pub fn has_duplicates<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return true;
        }
    }
    false
}

/// Checks the internal consistency of a graph.
pub fn check_graph_consistency<G: Graph>(graph: &G) {
    let _scope = set_timing_scope(TimingScope::Consistency);
    init_tracing();

    // Handles are exactly 0..num_nodes.
    {
        let _span = info_span!("check_handles").entered();
        for (index, handle) in graph.handles().enumerate() {
            assert_eq!(handle.index(), index);
            assert!(graph.handle_exists(handle));
        }
        assert_eq!(graph.handles().count(), graph.num_nodes());
        if let Some(past_end) = G::Handle::from_index(graph.num_nodes()) {
            assert!(!graph.handle_exists(past_end));
        }
    }

    // Every stored pair is sorted, unique and visible through the queries.
    let stored: Vec<_> = {
        let _span = info_span!("adjacency.iter").entered();
        graph.adjacency().iter().collect()
    };
    assert_eq!(stored.len(), graph.adjacency().len());
    for pair in stored.windows(2) {
        let order = (pair[0].from, pair[0].to)
            .cmp(&(pair[1].from, pair[1].to))
            .then_with(|| pair[0].cost.cost_cmp(&pair[1].cost));
        assert_eq!(order, Ordering::Less, "adjacency out of order: {pair:?}");
    }
    for edge in &stored {
        let _span = info_span!("check_stored_edge").entered();
        assert!(graph.adjacency().contains(edge.from, edge.to, edge.cost));
        assert!(graph.adjacency().contains_target(edge.from, edge.to));
        assert!(
            graph
                .neighbors(edge.from)
                .any(|(to, cost)| to == edge.to && cost.cost_cmp(&edge.cost) == Ordering::Equal)
        );
        if !graph.is_directed() {
            assert!(
                graph.adjacency().contains(edge.to, edge.from, edge.cost),
                "undirected edge stored in one direction only: {edge:?}"
            );
        }
    }

    // The logical edge count matches enumeration.
    let edges = {
        let _span = info_span!("edges").entered();
        graph.edges()
    };
    assert_eq!(edges.len(), graph.num_edges());
    for edge in &edges {
        if graph.handle_exists(edge.from) {
            assert!(graph.exist_edge(edge.from, edge.to, edge.cost));
            assert!(graph.exist_blank_edge(edge.from, edge.to));
        }
        if !graph.is_directed() {
            assert!(edge.from <= edge.to);
        }
    }
    if graph.is_directed() {
        assert_eq!(edges.len(), stored.len());
    } else {
        let self_loops = edges.iter().filter(|e| e.from == e.to).count();
        assert_eq!(2 * edges.len() - self_loops, stored.len());
    }

    // Check is_empty consistency
    assert_eq!(graph.is_empty(), graph.num_nodes() == 0);
}
