use serde::{Deserialize, Serialize};

use super::collections::dijkstra_result::{BacktraceMode, DijkstraResult};
use crate::{
    error::SearchError,
    graphs::{edge::WeightedEdge, Distance, Vertex},
};

/// Represents a path in a graph.
///
/// This struct encapsulates the vertices that form a path in the graph and the
/// total distance associated with traversing this path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path<V> {
    pub vertices: Vec<V>,
    pub distance: Distance,
}

impl<V: Vertex> DijkstraResult<V> {
    /// Rebuilds the shortest path from the source to `target` by following
    /// parent links.
    pub fn reconstruct(&self, target: &V) -> Result<Path<V>, SearchError<V>> {
        if !self.mode().records_parent() {
            return Err(SearchError::InsufficientBacktrace {
                required: BacktraceMode::OnlyParent,
                actual: self.mode(),
            });
        }

        let distance = self
            .distance(target)
            .ok_or_else(|| SearchError::Unreachable(target.clone()))?;

        // Start tracing back from the target vertex.
        let mut vertices = vec![target.clone()];
        let mut current = target;
        while let Some(parent) = self.parent(current) {
            // a simple path visits every finalized vertex at most once
            if vertices.len() >= self.len() {
                return Err(SearchError::BrokenBacktrace(target.clone()));
            }
            vertices.push(parent.clone());
            current = parent;
        }

        // Reverse the path to start from the source vertex.
        vertices.reverse();

        Ok(Path { vertices, distance })
    }

    /// The edges of the shortest path from the source to `target`, in travel
    /// order. Empty for the source itself.
    pub fn reconstruct_edges(&self, target: &V) -> Result<Vec<WeightedEdge<V>>, SearchError<V>> {
        if !self.mode().records_edge() {
            return Err(SearchError::InsufficientBacktrace {
                required: BacktraceMode::Full,
                actual: self.mode(),
            });
        }

        if !self.is_reached(target) {
            return Err(SearchError::Unreachable(target.clone()));
        }

        let mut edges = Vec::new();
        let mut current = target;
        while let Some(edge) = self.edge(current) {
            if edges.len() >= self.len() {
                return Err(SearchError::BrokenBacktrace(target.clone()));
            }
            edges.push(edge.clone());
            current = edge.tail();
        }
        edges.reverse();

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::Path;
    use crate::{
        error::SearchError,
        graphs::edge::WeightedEdge,
        search::collections::dijkstra_result::{BacktraceMode, DijkstraResult},
    };

    fn chain(mode: BacktraceMode) -> DijkstraResult<&'static str> {
        let mut result = DijkstraResult::new("s", mode);
        result.add_result("s", 0, None);
        result.add_result("m", 2, Some(WeightedEdge::new("s", "m", 2)));
        result.add_result("t", 5, Some(WeightedEdge::new("m", "t", 3)));
        result
    }

    #[test]
    fn reconstruct_follows_parents() {
        for mode in [BacktraceMode::OnlyParent, BacktraceMode::Full] {
            let result = chain(mode);
            assert_eq!(
                result.reconstruct(&"t"),
                Ok(Path {
                    vertices: vec!["s", "m", "t"],
                    distance: 5
                })
            );
            assert_eq!(
                result.reconstruct(&"s"),
                Ok(Path {
                    vertices: vec!["s"],
                    distance: 0
                })
            );
        }
    }

    #[test]
    fn reconstruct_needs_parents() {
        let result = chain(BacktraceMode::None);
        assert_eq!(
            result.reconstruct(&"t"),
            Err(SearchError::InsufficientBacktrace {
                required: BacktraceMode::OnlyParent,
                actual: BacktraceMode::None
            })
        );
    }

    #[test]
    fn reconstruct_unreached() {
        let result = chain(BacktraceMode::Full);
        assert_eq!(result.reconstruct(&"x"), Err(SearchError::Unreachable("x")));
        assert_eq!(
            result.reconstruct_edges(&"x"),
            Err(SearchError::Unreachable("x"))
        );
    }

    #[test]
    fn parent_cycle_is_reported() {
        for mode in [BacktraceMode::OnlyParent, BacktraceMode::Full] {
            let mut result = DijkstraResult::new("s", mode);
            result.add_result("s", 0, None);
            result.add_result("a", 1, Some(WeightedEdge::new("b", "a", 1)));
            result.add_result("b", 2, Some(WeightedEdge::new("a", "b", 1)));

            assert_eq!(
                result.reconstruct(&"a"),
                Err(SearchError::BrokenBacktrace("a"))
            );
            assert_eq!(result.reconstruct(&"s").map(|path| path.distance), Ok(0));
        }

        let mut full = DijkstraResult::new("s", BacktraceMode::Full);
        full.add_result("s", 0, None);
        full.add_result("a", 1, Some(WeightedEdge::new("a", "a", 1)));
        assert_eq!(
            full.reconstruct_edges(&"a"),
            Err(SearchError::BrokenBacktrace("a"))
        );
    }

    #[test]
    fn reconstruct_edges_in_travel_order() {
        let result = chain(BacktraceMode::Full);
        assert_eq!(
            result.reconstruct_edges(&"t"),
            Ok(vec![
                WeightedEdge::new("s", "m", 2),
                WeightedEdge::new("m", "t", 3)
            ])
        );
        assert_eq!(result.reconstruct_edges(&"s"), Ok(Vec::new()));

        let only_parent = chain(BacktraceMode::OnlyParent);
        assert!(matches!(
            only_parent.reconstruct_edges(&"t"),
            Err(SearchError::InsufficientBacktrace { .. })
        ));
    }
}
