//! In-memory weighted multigraphs over interned nodes.
//!
//! Nodes of any hashable type are registered once and given dense integer
//! handles; edges are `(from, to, cost)` triples between handles, and two
//! edges between the same nodes coexist when their costs differ.  Three graph
//! kinds share one query surface through the [`Graph`] and [`GraphMut`]
//! traits: [`DiGraph`], [`UniGraph`] and [`Dag`].

pub mod adjacency;
pub mod cost;
pub mod dag;
pub mod directedness;
pub mod error;
pub mod graph;
pub mod handle;
pub mod interner;
pub mod prelude;
pub mod search;
pub mod shortest_path;
pub mod tracing_support;
pub mod union_find;

mod mst;

#[doc(hidden)]
pub mod generate_large_graph;
#[doc(hidden)]
pub mod graph_test_support;

pub use adjacency::Edge;
pub use dag::Dag;
pub use error::{EdgeError, NodeError};
pub use graph::{DiGraph, Graph, GraphDirected, GraphMut, GraphUndirected, UniGraph, WeightedGraph};
pub use search::VisitOrder;
pub use shortest_path::{Route, ShortestPathOutcome, ShortestPaths};
