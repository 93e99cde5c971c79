use crate::{
    Graph, adjacency::Edge, cost::Cost, tracing_support::info_span, union_find::Connectivity,
};

/// Kruskal's algorithm: scan the logical edges by ascending cost and keep each
/// one that joins two different components.  The sort is stable, so among
/// equal costs the lower `(from, to)` wins.
pub(crate) fn kruskal<G: Graph>(graph: &G) -> Vec<Edge<G::Handle, G::Cost>> {
    let _span = info_span!("mst_kruskal").entered();
    let mut edges = graph.edges();
    edges.sort_by(|a, b| a.cost.cost_cmp(&b.cost));
    let mut connectivity = Connectivity::new();
    edges
        .into_iter()
        .filter(|edge| connectivity.unite(edge.from, edge.to))
        .collect()
}
