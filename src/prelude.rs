pub use crate::cost::Cost;
pub use crate::dag::Dag;
pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::error::{EdgeError, NodeError};
pub use crate::graph::{DiGraph, Graph, GraphDirected, GraphMut, GraphUndirected, UniGraph};
pub use crate::handle::Handle;
pub use crate::search::VisitOrder;
pub use crate::shortest_path::{Route, ShortestPathOutcome, ShortestPaths};
