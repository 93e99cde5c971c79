//! Builds a small sample graph and prints its traversals and shortest paths.
//!
//! Usage:
//!   cargo run --example sample_graph
//!   cargo run --example sample_graph -- --kind undirected --order post
//!   cargo run --example sample_graph -- --from a --to g

use std::{fmt::Debug, process};

use clap::{Parser, ValueEnum};
use leangraph::{Dag, DiGraph, UniGraph, prelude::*, tracing_support::init_tracing};

/// Seven nodes forming a binary tree rooted at `a`.
const NODES: [char; 7] = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];
const EDGES: [(char, char, u32); 6] = [
    ('a', 'b', 0),
    ('a', 'c', 0),
    ('b', 'd', 0),
    ('b', 'e', 0),
    ('c', 'f', 0),
    ('c', 'g', 0),
];

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Directed,
    Undirected,
    Dag,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Pre,
    Post,
}

impl From<Order> for VisitOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Pre => VisitOrder::Pre,
            Order::Post => VisitOrder::Post,
        }
    }
}

/// Print traversals and shortest paths of the sample graph.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which kind of graph to build
    #[arg(long, value_enum, default_value = "directed")]
    kind: Kind,

    /// Traversal order
    #[arg(long, value_enum, default_value = "pre")]
    order: Order,

    /// Node to start single-source queries from
    #[arg(long, default_value = "a")]
    from: char,

    /// Target node for the shortest path query
    #[arg(long, default_value = "g")]
    to: char,
}

fn build<G: GraphMut<Node = char, Cost = u32>>() -> G {
    let mut graph = G::new();
    for node in NODES {
        graph.register_node(node);
    }
    for (from, to, cost) in EDGES {
        // Already registered, so this only looks the handles up.
        let (from, to) = (graph.register_node(from), graph.register_node(to));
        graph.register_edge(from, to, cost);
    }
    graph
}

fn names<G: Graph<Node = char>>(handles: &[G::Handle]) -> String {
    handles
        .iter()
        .map(|handle| NODES[handle.index()].to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn report<G: Graph<Node = char> + Debug>(graph: &G, args: &Args) -> Result<(), NodeError> {
    let order = VisitOrder::from(args.order);
    let from = graph.resolve(&args.from)?;
    let to = graph.resolve(&args.to)?;

    println!("{graph:?}");
    println!("dfs:          {}", names::<G>(&graph.dfs(order)));
    println!("bfs:          {}", names::<G>(&graph.bfs(order)));
    println!("explore_dfs:  {}", names::<G>(&graph.explore_dfs(from, order)));
    println!("explore_bfs:  {}", names::<G>(&graph.explore_bfs(from, order)));
    match graph.dijkstra(from, to) {
        Some(route) => println!(
            "dijkstra:     {} (cost {:?})",
            names::<G>(&route.nodes),
            route.cost
        ),
        None => println!("dijkstra:     {} is unreachable from {}", args.to, args.from),
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), NodeError> {
    match args.kind {
        Kind::Directed => report(&build::<DiGraph<char, u32>>(), args),
        Kind::Undirected => {
            let graph = build::<UniGraph<char, u32>>();
            report(&graph, args)?;
            let tree: Vec<_> = graph
                .mst_kruskal()
                .iter()
                .map(|e| format!("{}-{}", NODES[e.from.index()], NODES[e.to.index()]))
                .collect();
            println!("mst_kruskal:  {}", tree.join(" "));
            Ok(())
        }
        Kind::Dag => {
            let dag = build::<Dag<char, u32>>();
            report(&dag, args)?;
            println!("topo_sort:    {}", names::<Dag<char, u32>>(&dag.topo_sort()));
            Ok(())
        }
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}
