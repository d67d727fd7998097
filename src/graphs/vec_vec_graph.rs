use serde::{Deserialize, Serialize};

use super::{edge::WeightedEdge, Graph, Weight};
use crate::error::SearchError;

/// Dense graph over the vertex ids `0..number_of_vertices`. Holds at most one
/// edge per (tail, head) pair, sorted by head.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct VecVecGraph {
    edges: Vec<Vec<WeightedEdge<u32>>>,
}

impl VecVecGraph {
    pub fn with_vertices(number_of_vertices: u32) -> VecVecGraph {
        VecVecGraph {
            edges: vec![Vec::new(); number_of_vertices as usize],
        }
    }

    /// Builds a graph keeping only the lightest of parallel edges.
    pub fn from_edges(edges: &[WeightedEdge<u32>]) -> VecVecGraph {
        let mut graph = VecVecGraph::default();
        edges.iter().for_each(|edge| graph.insert_lightest(edge));
        graph
    }

    /// Adds `edge` unless an edge between the same vertices is at least as
    /// light.
    pub fn insert_lightest(&mut self, edge: &WeightedEdge<u32>) {
        let lighter = self
            .get_weight(edge.tail(), edge.head())
            .map_or(true, |current| edge.weight() < current);
        if lighter {
            self.set_weight(*edge.tail(), *edge.head(), Some(edge.weight()));
        }
    }

    /// Connects, reweights or (with `None`) disconnects `tail -> head`.
    pub fn set_weight(&mut self, tail: u32, head: u32, weight: Option<Weight>) {
        // Ensure the edge endpoints is within the bounds of self.edges.
        let max_edge_endpoints = std::cmp::max(tail, head) as usize;
        if max_edge_endpoints >= self.edges.len() {
            self.edges.resize(max_edge_endpoints + 1, Vec::new());
        }

        let edges_sharing_tail = &mut self.edges[tail as usize];
        let edge_index = edges_sharing_tail.binary_search_by_key(&head, |other| *other.head());

        match (weight, edge_index) {
            (Some(weight), Ok(index)) => {
                edges_sharing_tail[index] = WeightedEdge::new(tail, head, weight);
            }
            (Some(weight), Err(index)) => {
                edges_sharing_tail.insert(index, WeightedEdge::new(tail, head, weight));
            }
            (None, Ok(index)) => {
                edges_sharing_tail.remove(index);
            }
            (None, Err(_)) => {}
        }
    }
}

impl Graph for VecVecGraph {
    type Vertex = u32;

    fn number_of_vertices(&self) -> u32 {
        self.edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.edges.iter().map(Vec::len).sum::<usize>() as u32
    }

    fn contains_vertex(&self, vertex: &u32) -> bool {
        (*vertex as usize) < self.edges.len()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = u32> + Send + '_> {
        Box::new(0..self.number_of_vertices())
    }

    fn out_edges(&self, tail: &u32) -> Result<&[WeightedEdge<u32>], SearchError<u32>> {
        self.edges
            .get(*tail as usize)
            .map(Vec::as_slice)
            .ok_or(SearchError::UnknownVertex(*tail))
    }

    fn get_weight(&self, tail: &u32, head: &u32) -> Option<Weight> {
        let edges_sharing_tail = self.edges.get(*tail as usize)?;

        let edge_index = edges_sharing_tail
            .binary_search_by_key(head, |edge| *edge.head())
            .ok()?;

        Some(edges_sharing_tail[edge_index].weight())
    }
}

#[cfg(test)]
mod tests {
    use super::VecVecGraph;
    use crate::{
        error::SearchError,
        graphs::{edge::WeightedEdge, Graph},
    };

    #[test]
    fn from_edges_keeps_lightest() {
        let graph = VecVecGraph::from_edges(&[
            WeightedEdge::new(0, 2, 9),
            WeightedEdge::new(0, 1, 4),
            WeightedEdge::new(0, 2, 3),
            WeightedEdge::new(0, 2, 5),
        ]);

        assert_eq!(graph.get_weight(&0, &2), Some(3));
        assert_eq!(graph.number_of_edges(), 2);
        let heads: Vec<_> = graph
            .out_edges(&0)
            .unwrap()
            .iter()
            .map(|edge| *edge.head())
            .collect();
        assert_eq!(heads, vec![1, 2]);
    }

    #[test]
    fn heaviest_weight_is_kept() {
        let graph = VecVecGraph::from_edges(&[WeightedEdge::new(0, 1, i64::MAX)]);

        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.get_weight(&0, &1), Some(i64::MAX));
        assert_eq!(graph.number_of_vertices(), 2);
    }

    #[test]
    fn dense_ids_are_declared() {
        let mut graph = VecVecGraph::default();
        graph.set_weight(0, 4, Some(1));

        assert_eq!(graph.number_of_vertices(), 5);
        assert!(graph.out_edges(&3).unwrap().is_empty());
        assert_eq!(graph.out_edges(&5), Err(SearchError::UnknownVertex(5)));
    }

    #[test]
    fn disconnect() {
        let mut graph = VecVecGraph::with_vertices(3);
        graph.set_weight(1, 2, Some(6));
        graph.set_weight(1, 2, None);

        assert_eq!(graph.get_weight(&1, &2), None);
        assert_eq!(graph.number_of_vertices(), 3);
    }
}
