use crate::{Graph, GraphMut};

/// Generates a large graph with an irregular structure using custom closures
/// for node identities and edge costs.
///
/// The graph structure includes:
/// - Cluster 1: Dense cluster (50 nodes, ~60% connectivity)
/// - Cluster 2: Medium cluster (80 nodes, ~30% connectivity)
/// - Cluster 3: Large sparse cluster (150 nodes, ~8% connectivity)
/// - Hub nodes (20 nodes with many connections)
/// - Scattered nodes (100 nodes with few connections)
/// - Bridge nodes connecting clusters (10 nodes)
/// - Long-range connections between random nodes
/// - Reciprocal pairs and self loops
///
/// For [`ACYCLIC`](Graph::ACYCLIC) graph types every edge is pointed from the
/// earlier node to the later one, and self loops are left out.
///
/// Returns the handles of the 410 generated nodes in creation order.
pub fn generate_large_graph<G, FN, FC>(
    graph: &mut G,
    mut new_node: FN,
    mut new_cost: FC,
) -> Vec<G::Handle>
where
    G: GraphMut,
    FN: FnMut(usize) -> <G as Graph>::Node,
    FC: FnMut(usize) -> <G as Graph>::Cost,
{
    let mut edge_counter = 0;
    let mut all_nodes: Vec<G::Handle> = Vec::new();

    let mut add_nodes = |graph: &mut G, all_nodes: &mut Vec<G::Handle>, count: usize| {
        for _ in 0..count {
            let index = all_nodes.len();
            all_nodes.push(graph.register_node(new_node(index)));
        }
    };
    let mut add_edge = |graph: &mut G, all_nodes: &[G::Handle], i: usize, j: usize| {
        let (i, j) = if G::ACYCLIC { (i.min(j), i.max(j)) } else { (i, j) };
        if G::ACYCLIC && i == j {
            return;
        }
        graph.register_edge(all_nodes[i], all_nodes[j], new_cost(edge_counter));
        edge_counter += 1;
    };

    // Cluster 1: Dense cluster (50 nodes, highly connected)
    let cluster1_start = all_nodes.len();
    add_nodes(graph, &mut all_nodes, 50);
    for i in cluster1_start..all_nodes.len() {
        for j in (i + 1)..all_nodes.len() {
            if (i * 7 + j * 11) % 10 < 6 {
                add_edge(graph, &all_nodes, i, j);
            }
        }
    }

    // Cluster 2: Medium cluster (80 nodes, moderately connected)
    let cluster2_start = all_nodes.len();
    add_nodes(graph, &mut all_nodes, 80);
    for i in cluster2_start..all_nodes.len() {
        for j in (i + 1)..all_nodes.len() {
            if (i * 13 + j * 17) % 10 < 3 {
                add_edge(graph, &all_nodes, i, j);
            }
        }
    }

    // Cluster 3: Large sparse cluster (150 nodes, sparsely connected)
    let cluster3_start = all_nodes.len();
    add_nodes(graph, &mut all_nodes, 150);
    for i in cluster3_start..all_nodes.len() {
        for j in (i + 1)..all_nodes.len() {
            if (i * 19 + j * 23) % 100 < 8 {
                add_edge(graph, &all_nodes, i, j);
            }
        }
    }

    // Hub nodes, each connected to a spread of earlier nodes
    let hubs_start = all_nodes.len();
    for _ in 0..20 {
        add_nodes(graph, &mut all_nodes, 1);
        let hub = all_nodes.len() - 1;
        for i in 0..hub {
            if (hubs_start * 29 + i * 31) % 7 < 4 {
                add_edge(graph, &all_nodes, hub, i);
            }
        }
    }

    // Scattered nodes with one to three connections each
    let scattered_start = all_nodes.len();
    for _ in 0..100 {
        add_nodes(graph, &mut all_nodes, 1);
        let node = all_nodes.len() - 1;
        let num_connections = ((scattered_start + all_nodes.len()) % 3) + 1;
        for c in 0..num_connections {
            let target = (scattered_start * 37 + all_nodes.len() * 41 + c * 43) % node;
            add_edge(graph, &all_nodes, node, target);
        }
    }

    // Bridge nodes connecting the three clusters
    for i in 0..10 {
        add_nodes(graph, &mut all_nodes, 1);
        let bridge = all_nodes.len() - 1;
        let idx1 = (i * 47) % (cluster2_start - cluster1_start) + cluster1_start;
        let idx2 = (i * 53) % (cluster3_start - cluster2_start) + cluster2_start;
        let idx3 = (i * 59) % (hubs_start - cluster3_start) + cluster3_start;
        add_edge(graph, &all_nodes, bridge, idx1);
        add_edge(graph, &all_nodes, bridge, idx2);
        add_edge(graph, &all_nodes, bridge, idx3);
    }

    // Long-range connections
    for i in 0..200 {
        let idx1 = (i * 61) % all_nodes.len();
        let idx2 = (i * 67 + 100) % all_nodes.len();
        if idx1 != idx2 {
            add_edge(graph, &all_nodes, idx1, idx2);
        }
    }

    // Reciprocal pairs
    for i in 0..50 {
        let idx1 = (i * 73 + 7) % all_nodes.len();
        let idx2 = (i * 79 + 11) % all_nodes.len();
        if idx1 == idx2 {
            continue;
        }
        add_edge(graph, &all_nodes, idx1, idx2);
        add_edge(graph, &all_nodes, idx2, idx1);
    }

    // Self loops
    for i in 0..50 {
        let idx = (i * 71) % all_nodes.len();
        add_edge(graph, &all_nodes, idx, idx);
    }

    all_nodes
}
