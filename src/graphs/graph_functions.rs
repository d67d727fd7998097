use itertools::Itertools;

use super::{edge::WeightedEdge, hash_graph::HashGraph, Distance, Graph, Vertex};
use crate::search::path::Path;

pub fn all_edges<G: Graph + ?Sized>(graph: &G) -> Vec<WeightedEdge<G::Vertex>> {
    graph
        .vertices()
        .flat_map(|vertex| graph.out_edges(&vertex).unwrap_or_default().to_vec())
        .collect()
}

/// Returns the most negative edge, if the graph has one. Among edges of equal
/// weight the pick follows the graph's vertex order, which `HashGraph` does
/// not fix.
pub fn find_negative_edge<G: Graph + ?Sized>(graph: &G) -> Option<WeightedEdge<G::Vertex>> {
    graph
        .vertices()
        .filter_map(|vertex| {
            graph
                .out_edges(&vertex)
                .ok()?
                .iter()
                .filter(|edge| edge.is_negative())
                .min_by_key(|edge| edge.weight())
                .cloned()
        })
        .min_by_key(|edge| edge.weight())
}

pub fn add_edge_bidirectional<V: Vertex>(graph: &mut HashGraph<V>, edge: &WeightedEdge<V>) {
    graph.add_edge(edge.clone());
    graph.add_edge(edge.reversed());
}

/// Check if a path is a walk through the graph whose edges add up to the
/// distance it claims.
pub fn validate_path<G: Graph + ?Sized>(graph: &G, path: &Path<G::Vertex>) -> Result<(), String> {
    if path.vertices.is_empty() {
        return Err("path is empty".to_string());
    }

    let mut total: Distance = 0;
    for (tail, head) in path.vertices.iter().tuple_windows() {
        match graph.get_weight(tail, head) {
            Some(weight) => total += weight,
            None => return Err(format!("no edge between {:?} and {:?} found", tail, head)),
        }
    }

    if total != path.distance {
        return Err(format!(
            "wrong path distance: edges sum to {} but path claims {}",
            total, path.distance
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{add_edge_bidirectional, all_edges, find_negative_edge, validate_path};
    use crate::{
        graphs::{edge::WeightedEdge, hash_graph::HashGraph},
        search::path::Path,
    };

    fn triangle() -> HashGraph<char> {
        HashGraph::from_edges(&[
            WeightedEdge::new('a', 'b', 1),
            WeightedEdge::new('b', 'c', 2),
            WeightedEdge::new('a', 'c', 4),
        ])
    }

    #[test]
    fn negative_edge_is_found() {
        let mut graph = triangle();
        assert_eq!(find_negative_edge(&graph), None);

        graph.connect('x', 'y', -1);
        assert_eq!(find_negative_edge(&graph), Some(WeightedEdge::new('x', 'y', -1)));
    }

    #[test]
    fn most_negative_edge_wins() {
        // every graph gets a freshly seeded map
        for _ in 0..10 {
            let mut graph = triangle();
            graph.connect('p', 'q', -1);
            graph.connect('c', 'd', -7);
            graph.connect('x', 'y', -3);
            graph.connect('c', 'e', -2);

            assert_eq!(
                find_negative_edge(&graph),
                Some(WeightedEdge::new('c', 'd', -7))
            );
        }
    }

    #[test]
    fn bidirectional_doubles_edges() {
        let mut graph = HashGraph::new();
        add_edge_bidirectional(&mut graph, &WeightedEdge::new(0, 1, 3));

        let mut edges = all_edges(&graph);
        edges.sort_by_key(|edge| *edge.tail());
        assert_eq!(
            edges,
            vec![WeightedEdge::new(0, 1, 3), WeightedEdge::new(1, 0, 3)]
        );
    }

    #[test]
    fn path_validation() {
        let graph = triangle();

        let good = Path {
            vertices: vec!['a', 'b', 'c'],
            distance: 3,
        };
        assert_eq!(validate_path(&graph, &good), Ok(()));

        let wrong_distance = Path {
            vertices: vec!['a', 'c'],
            distance: 3,
        };
        assert!(validate_path(&graph, &wrong_distance).is_err());

        let missing_edge = Path {
            vertices: vec!['c', 'a'],
            distance: 4,
        };
        assert!(validate_path(&graph, &missing_edge).is_err());

        let single = Path {
            vertices: vec!['a'],
            distance: 0,
        };
        assert_eq!(validate_path(&graph, &single), Ok(()));
    }
}
