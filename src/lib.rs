//! Single source shortest paths with Dijkstra's algorithm.
//!
//! A search fills a [`DijkstraResult`] that keeps, per reached vertex, the
//! shortest distance and, depending on the [`BacktraceMode`], the parent
//! vertex and the edge taken from it. Paths are rebuilt from that table on
//! demand.

pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

pub use error::{GraphReadError, SearchError};
pub use graphs::{edge::WeightedEdge, hash_graph::HashGraph, Distance, Graph, Vertex, Weight};
pub use search::{
    collections::dijkstra_result::{BacktraceMode, DijkstraResult, ResultRecord},
    dijkstra::{multi_source, Dijkstra},
    path::Path,
};
