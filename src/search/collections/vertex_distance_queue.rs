use std::{cmp::Ordering, collections::BinaryHeap};

use ahash::{HashMap, HashMapExt};

use crate::{
    error::SearchError,
    graphs::{Distance, Vertex},
};

/// A priority queue that manages vertices and their tentative distances.
/// Graph searches repeatedly take the closest vertex out of it.
pub trait VertexDistanceQueue<V: Vertex> {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Inserts `vertex` or lowers its tentative distance. Does nothing if the
    /// vertex is already queued with a distance less than or equal to
    /// `distance`.
    fn push_or_improve(&mut self, vertex: V, distance: Distance);

    /// Removes and returns the vertex with the smallest distance. Ties go to
    /// the vertex whose current distance was pushed first.
    fn pop_min(&mut self) -> Result<(V, Distance), SearchError<V>>;

    /// Number of queued vertices.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct FrontierEntry<V> {
    distance: Distance,
    sequence: u64,
    vertex: V,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl<V> Ord for FrontierEntry<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip the ordering on distances. Ties fall back to the sequence
        // number, which is unique per entry.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<V> PartialOrd for FrontierEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> PartialEq for FrontierEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl<V> Eq for FrontierEntry<V> {}

/// Binary heap without decrease-key. Improving a vertex pushes a fresh entry;
/// entries superseded that way are dropped when they reach the top.
pub struct BinaryHeapFrontier<V> {
    heap: BinaryHeap<FrontierEntry<V>>,
    // distance and sequence number of the live entry of every queued vertex
    active: HashMap<V, (Distance, u64)>,
    next_sequence: u64,
}

impl<V: Vertex> Default for BinaryHeapFrontier<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> BinaryHeapFrontier<V> {
    pub fn new() -> Self {
        BinaryHeapFrontier {
            heap: BinaryHeap::new(),
            active: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Tentative distance of a queued vertex.
    pub fn tentative_distance(&self, vertex: &V) -> Option<Distance> {
        self.active.get(vertex).map(|&(distance, _)| distance)
    }
}

impl<V: Vertex> VertexDistanceQueue<V> for BinaryHeapFrontier<V> {
    fn clear(&mut self) {
        self.heap.clear();
        self.active.clear();
        self.next_sequence = 0;
    }

    fn push_or_improve(&mut self, vertex: V, distance: Distance) {
        if let Some(&(current, _)) = self.active.get(&vertex) {
            if current <= distance {
                return;
            }
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.active.insert(vertex.clone(), (distance, sequence));
        self.heap.push(FrontierEntry {
            distance,
            sequence,
            vertex,
        });
    }

    fn pop_min(&mut self) -> Result<(V, Distance), SearchError<V>> {
        while let Some(entry) = self.heap.pop() {
            let is_live = self.active.get(&entry.vertex) == Some(&(entry.distance, entry.sequence));
            if is_live {
                self.active.remove(&entry.vertex);
                return Ok((entry.vertex, entry.distance));
            }
        }

        Err(SearchError::EmptyFrontier)
    }

    fn len(&self) -> usize {
        self.active.len()
    }
}
