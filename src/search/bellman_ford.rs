//! Bellman-Ford single source distances.
//!
//! Runs in O(V * E) and accepts negative weights, which makes it a slow but
//! independent reference for the distances Dijkstra computes.

use ahash::{HashMap, HashMapExt};

use crate::{
    error::SearchError,
    graphs::{graph_functions::all_edges, Distance, Graph},
};

/// Distances from `source` to every reachable vertex. Fails if a negative
/// cycle is reachable from `source`.
pub fn bellman_ford<G: Graph + ?Sized>(
    graph: &G,
    source: &G::Vertex,
) -> Result<HashMap<G::Vertex, Distance>, SearchError<G::Vertex>> {
    if !graph.contains_vertex(source) {
        return Err(SearchError::UnknownVertex(source.clone()));
    }

    let edges = all_edges(graph);
    let mut distances: HashMap<G::Vertex, Distance> = HashMap::new();
    distances.insert(source.clone(), 0);

    // relax every edge until nothing changes, at most V - 1 rounds
    for _ in 1..graph.number_of_vertices() {
        let mut updated = false;

        for edge in edges.iter() {
            let Some(&distance_tail) = distances.get(edge.tail()) else {
                continue;
            };
            let candidate = distance_tail.saturating_add(edge.weight());
            if distances
                .get(edge.head())
                .map_or(true, |&current| candidate < current)
            {
                distances.insert(edge.head().clone(), candidate);
                updated = true;
            }
        }

        if !updated {
            return Ok(distances);
        }
    }

    // one more round that still relaxes means a negative cycle
    for edge in edges.iter() {
        if let Some(&distance_tail) = distances.get(edge.tail()) {
            let candidate = distance_tail.saturating_add(edge.weight());
            if distances
                .get(edge.head())
                .map_or(true, |&current| candidate < current)
            {
                return Err(SearchError::NegativeCycle(source.clone()));
            }
        }
    }

    Ok(distances)
}
