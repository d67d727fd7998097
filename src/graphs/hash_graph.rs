use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use super::{edge::WeightedEdge, Graph, Vertex, Weight};
use crate::error::SearchError;

/// Adjacency map for arbitrary hashable vertices. Parallel edges are kept in
/// insertion order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Vertex + Serialize",
    deserialize = "V: Vertex + Deserialize<'de>"
))]
pub struct HashGraph<V> {
    out_edges: HashMap<V, Vec<WeightedEdge<V>>>,
}

impl<V: Vertex> Default for HashGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Graph for HashGraph<V> {
    type Vertex = V;

    fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.out_edges.values().map(Vec::len).sum::<usize>() as u32
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.out_edges.contains_key(vertex)
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = V> + Send + '_> {
        Box::new(self.out_edges.keys().cloned())
    }

    fn out_edges(&self, tail: &V) -> Result<&[WeightedEdge<V>], SearchError<V>> {
        self.out_edges
            .get(tail)
            .map(Vec::as_slice)
            .ok_or_else(|| SearchError::UnknownVertex(tail.clone()))
    }
}

impl<V: Vertex> HashGraph<V> {
    pub fn new() -> Self {
        HashGraph {
            out_edges: HashMap::new(),
        }
    }

    pub fn from_edges(edges: &[WeightedEdge<V>]) -> HashGraph<V> {
        let mut graph = HashGraph::new();
        edges.iter().for_each(|edge| graph.add_edge(edge.clone()));
        graph
    }

    /// Declares `vertex` without giving it any edges. Declaring twice is a
    /// no-op.
    pub fn add_vertex(&mut self, vertex: V) {
        self.out_edges.entry(vertex).or_default();
    }

    /// Appends `edge` to its tail's adjacency list and declares both
    /// endpoints. Negative weights are accepted here and rejected by the
    /// search.
    pub fn add_edge(&mut self, edge: WeightedEdge<V>) {
        self.add_vertex(edge.head().clone());
        self.out_edges
            .entry(edge.tail().clone())
            .or_default()
            .push(edge);
    }

    pub fn connect(&mut self, tail: V, head: V, weight: Weight) {
        self.add_edge(WeightedEdge::new(tail, head, weight));
    }
}

#[cfg(test)]
mod tests {
    use super::HashGraph;
    use crate::{
        error::SearchError,
        graphs::{edge::WeightedEdge, Graph},
    };

    #[test]
    fn declares_both_endpoints() {
        let mut graph = HashGraph::new();
        graph.connect("a", "b", 3);

        assert!(graph.contains_vertex(&"a"));
        assert!(graph.contains_vertex(&"b"));
        assert_eq!(graph.out_edges(&"b"), Ok(&[][..]));
        assert_eq!(graph.number_of_vertices(), 2);
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn unknown_vertex_is_an_error() {
        let graph: HashGraph<&str> = HashGraph::from_edges(&[WeightedEdge::new("a", "b", 1)]);

        assert_eq!(graph.out_edges(&"z"), Err(SearchError::UnknownVertex("z")));
        assert_eq!(graph.get_weight(&"z", &"a"), None);
    }

    #[test]
    fn keeps_parallel_edges_in_insertion_order() {
        let mut graph = HashGraph::new();
        graph.connect(1, 2, 7);
        graph.connect(1, 3, 1);
        graph.connect(1, 2, 4);

        let heads: Vec<_> = graph
            .out_edges(&1)
            .unwrap()
            .iter()
            .map(|edge| (*edge.head(), edge.weight()))
            .collect();
        assert_eq!(heads, vec![(2, 7), (3, 1), (2, 4)]);
        assert_eq!(graph.get_weight(&1, &2), Some(4));
    }

    #[test]
    fn isolated_vertex() {
        let mut graph = HashGraph::new();
        graph.add_vertex('d');
        graph.add_vertex('d');

        assert_eq!(graph.number_of_vertices(), 1);
        assert!(graph.out_edges(&'d').unwrap().is_empty());
    }
}
