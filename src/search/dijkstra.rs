use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use ahash::{HashMap, HashMapExt};
use log::{debug, trace};
use rayon::prelude::*;

use super::{
    collections::{
        dijkstra_result::{BacktraceMode, DijkstraResult},
        vertex_distance_queue::{BinaryHeapFrontier, VertexDistanceQueue},
    },
    path::Path,
};
use crate::{
    error::SearchError,
    graphs::{edge::WeightedEdge, graph_functions::find_negative_edge, Distance, Graph, Vertex},
};

/// Counters collected while a search runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Vertices whose distance became final.
    pub finalized: usize,
    /// Outgoing edges looked at from finalized vertices.
    pub relaxed_edges: usize,
    /// Relaxations that lowered a tentative distance.
    pub improvements: usize,
    /// Frontier pops of vertices that were already final.
    pub stale_pops: usize,
}

/// Everything that changes during one search. Owned by the caller and handed
/// to [`Dijkstra::step`], so a search can be driven one vertex at a time.
pub struct SearchState<V, Q> {
    frontier: Q,
    tentative: HashMap<V, Distance>,
    // edge that produced the current tentative distance, kept only if the
    // mode records parents
    pending: HashMap<V, WeightedEdge<V>>,
    result: DijkstraResult<V>,
    stats: SearchStats,
    failure: Option<SearchError<V>>,
}

impl<V: Vertex, Q: VertexDistanceQueue<V>> SearchState<V, Q> {
    fn new(source: V, mode: BacktraceMode, mut frontier: Q) -> Self {
        frontier.clear();
        frontier.push_or_improve(source.clone(), 0);

        let mut tentative = HashMap::new();
        tentative.insert(source.clone(), 0);

        SearchState {
            frontier,
            tentative,
            pending: HashMap::new(),
            result: DijkstraResult::new(source, mode),
            stats: SearchStats::default(),
            failure: None,
        }
    }

    /// True once the frontier ran dry without an error. A custom frontier
    /// that keeps superseded entries may report a finished search as
    /// unfinished until the next step drains them.
    pub fn is_finished(&self) -> bool {
        self.failure.is_none() && self.frontier.is_empty()
    }

    /// The error that stopped this search. Every later step returns it again.
    pub fn failure(&self) -> Option<&SearchError<V>> {
        self.failure.as_ref()
    }

    /// Vertices finalized so far.
    pub fn result(&self) -> &DijkstraResult<V> {
        &self.result
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best distance found so far for a vertex that is not final yet.
    pub fn tentative_distance(&self, vertex: &V) -> Option<Distance> {
        if self.result.is_reached(vertex) {
            return None;
        }
        self.tentative.get(vertex).copied()
    }

    pub fn into_result(self) -> DijkstraResult<V> {
        self.result
    }
}

/// Dijkstra's algorithm over a borrowed graph. Holds no search state of its
/// own, so one instance can serve many searches, also from several threads.
pub struct Dijkstra<'a, G: ?Sized> {
    graph: &'a G,
    cancelled: Option<Arc<AtomicBool>>,
}

impl<'a, G: Graph + ?Sized> Dijkstra<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Dijkstra {
            graph,
            cancelled: None,
        }
    }

    /// Makes every search check `flag` before each frontier pop and stop with
    /// [`SearchError::Cancelled`] once it is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    /// Prepares a search from `source` using a binary heap frontier.
    pub fn init(
        &self,
        source: G::Vertex,
        mode: BacktraceMode,
    ) -> Result<SearchState<G::Vertex, BinaryHeapFrontier<G::Vertex>>, SearchError<G::Vertex>>
    {
        self.init_with_frontier(source, mode, BinaryHeapFrontier::new())
    }

    /// Prepares a search from `source` on a caller supplied frontier. The
    /// whole graph is checked for negative weights first, so a failing search
    /// never produces any result entries.
    pub fn init_with_frontier<Q: VertexDistanceQueue<G::Vertex>>(
        &self,
        source: G::Vertex,
        mode: BacktraceMode,
        frontier: Q,
    ) -> Result<SearchState<G::Vertex, Q>, SearchError<G::Vertex>> {
        if !self.graph.contains_vertex(&source) {
            return Err(SearchError::UnknownVertex(source));
        }

        if let Some(edge) = find_negative_edge(self.graph) {
            return Err(negative_weight(&edge));
        }

        debug!(
            "dijkstra from {:?} on {} vertices, {} edges, backtrace {}",
            source,
            self.graph.number_of_vertices(),
            self.graph.number_of_edges(),
            mode
        );

        Ok(SearchState::new(source, mode, frontier))
    }

    /// Finalizes the next vertex and relaxes its outgoing edges. Returns the
    /// finalized vertex, or `None` once the frontier is exhausted. After an
    /// error other than cancellation the state is poisoned and every further
    /// call returns that error.
    pub fn step<Q: VertexDistanceQueue<G::Vertex>>(
        &self,
        state: &mut SearchState<G::Vertex, Q>,
    ) -> Result<Option<G::Vertex>, SearchError<G::Vertex>> {
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }

        let outcome = self.finalize_next(state);
        if let Err(error) = &outcome {
            if !matches!(error, SearchError::Cancelled) {
                state.failure = Some(error.clone());
            }
        }
        outcome
    }

    fn finalize_next<Q: VertexDistanceQueue<G::Vertex>>(
        &self,
        state: &mut SearchState<G::Vertex, Q>,
    ) -> Result<Option<G::Vertex>, SearchError<G::Vertex>> {
        loop {
            if self.is_cancelled() {
                return Err(SearchError::Cancelled);
            }

            if state.frontier.is_empty() {
                return Ok(None);
            }

            let (tail, distance_tail) = state.frontier.pop_min()?;
            if state.result.is_reached(&tail) {
                state.stats.stale_pops += 1;
                continue;
            }

            // every edge must be relaxable before anything is recorded
            let out_edges = self.graph.out_edges(&tail)?;
            for edge in out_edges {
                if edge.is_negative() {
                    return Err(negative_weight(edge));
                }
                if !state.result.is_reached(edge.head())
                    && distance_tail.checked_add(edge.weight()).is_none()
                {
                    return Err(SearchError::DistanceOverflow {
                        vertex: edge.head().clone(),
                    });
                }
            }

            let via = state.pending.remove(&tail);
            state.tentative.remove(&tail);
            trace!("finalize {:?} at {}", tail, distance_tail);
            state.result.add_result(tail.clone(), distance_tail, via);
            state.stats.finalized += 1;

            let records_parent = state.result.mode().records_parent();
            for edge in out_edges {
                state.stats.relaxed_edges += 1;

                let head = edge.head();
                if state.result.is_reached(head) {
                    continue;
                }

                let alternative_distance_head = distance_tail + edge.weight();
                let improves = state
                    .tentative
                    .get(head)
                    .map_or(true, |&current_distance_head| {
                        alternative_distance_head < current_distance_head
                    });

                if improves {
                    state
                        .tentative
                        .insert(head.clone(), alternative_distance_head);
                    if records_parent {
                        state.pending.insert(head.clone(), edge.clone());
                    }
                    state
                        .frontier
                        .push_or_improve(head.clone(), alternative_distance_head);
                    state.stats.improvements += 1;
                }
            }

            return Ok(Some(tail));
        }
    }

    /// Runs `state` until the frontier is empty.
    pub fn run<Q: VertexDistanceQueue<G::Vertex>>(
        &self,
        mut state: SearchState<G::Vertex, Q>,
    ) -> Result<DijkstraResult<G::Vertex>, SearchError<G::Vertex>> {
        while self.step(&mut state)?.is_some() {}

        debug!(
            "dijkstra from {:?} done: {:?}",
            state.result.source(),
            state.stats
        );
        Ok(state.into_result())
    }

    /// Distances (and backtrace, depending on `mode`) from `source` to every
    /// reachable vertex.
    pub fn single_source(
        &self,
        source: G::Vertex,
        mode: BacktraceMode,
    ) -> Result<DijkstraResult<G::Vertex>, SearchError<G::Vertex>> {
        let state = self.init(source, mode)?;
        self.run(state)
    }

    /// Like [`Dijkstra::single_source`] but stops as soon as `target` is
    /// final. Every entry of the returned table is final; vertices farther
    /// away than `target` are missing.
    pub fn single_pair(
        &self,
        source: G::Vertex,
        target: &G::Vertex,
        mode: BacktraceMode,
    ) -> Result<DijkstraResult<G::Vertex>, SearchError<G::Vertex>> {
        if !self.graph.contains_vertex(target) {
            return Err(SearchError::UnknownVertex(target.clone()));
        }

        let mut state = self.init(source, mode)?;
        while let Some(vertex) = self.step(&mut state)? {
            if &vertex == target {
                break;
            }
        }

        debug!(
            "dijkstra {:?} -> {:?} done: {:?}",
            state.result.source(),
            target,
            state.stats
        );
        Ok(state.into_result())
    }

    pub fn shortest_path(
        &self,
        source: G::Vertex,
        target: &G::Vertex,
    ) -> Result<Path<G::Vertex>, SearchError<G::Vertex>> {
        self.single_pair(source, target, BacktraceMode::OnlyParent)?
            .reconstruct(target)
    }

    pub fn shortest_path_distance(
        &self,
        source: G::Vertex,
        target: &G::Vertex,
    ) -> Result<Distance, SearchError<G::Vertex>> {
        self.single_pair(source, target, BacktraceMode::None)?
            .distance(target)
            .ok_or_else(|| SearchError::Unreachable(target.clone()))
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// One independent single source search per entry of `sources`, run in
/// parallel on the shared graph. Results keep the order of `sources`.
pub fn multi_source<G: Graph + ?Sized>(
    graph: &G,
    sources: &[G::Vertex],
    mode: BacktraceMode,
) -> Vec<Result<DijkstraResult<G::Vertex>, SearchError<G::Vertex>>> {
    let dijkstra = Dijkstra::new(graph);
    sources
        .par_iter()
        .map(|source| dijkstra.single_source(source.clone(), mode))
        .collect()
}

fn negative_weight<V: Vertex>(edge: &WeightedEdge<V>) -> SearchError<V> {
    SearchError::NegativeWeight {
        tail: edge.tail().clone(),
        head: edge.head().clone(),
        weight: edge.weight(),
    }
}
