use std::{fmt::Debug, hash::Hash};

use crate::error::SearchError;

use self::edge::WeightedEdge;

pub mod edge;
pub mod graph_factory;
pub mod graph_functions;
pub mod hash_graph;
pub mod vec_vec_graph;

pub type Weight = i64;
pub type Distance = i64;

/// Opaque vertex identifier. Anything that can key a hash map and be handed
/// across threads qualifies.
pub trait Vertex: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Debug + Send + Sync {}

pub trait Graph: Send + Sync {
    type Vertex: Vertex;

    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        self.vertices()
            .map(|vertex| self.out_edges(&vertex).map_or(0, |edges| edges.len()) as u32)
            .sum::<u32>()
    }

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    fn vertices(&self) -> Box<dyn Iterator<Item = Self::Vertex> + Send + '_>;

    /// Outgoing edges of `tail` in insertion order. Declared vertices without
    /// outgoing edges yield an empty slice, undeclared ones an error.
    fn out_edges(
        &self,
        tail: &Self::Vertex,
    ) -> Result<&[WeightedEdge<Self::Vertex>], SearchError<Self::Vertex>>;

    /// Smallest weight among the parallel edges `tail -> head`.
    fn get_weight(&self, tail: &Self::Vertex, head: &Self::Vertex) -> Option<Weight> {
        self.out_edges(tail)
            .ok()?
            .iter()
            .filter(|edge| edge.head() == head)
            .map(WeightedEdge::weight)
            .min()
    }
}
