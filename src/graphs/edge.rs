use serde::{Deserialize, Serialize};

use super::{Vertex, Weight};

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct WeightedEdge<V> {
    tail: V,
    head: V,
    weight: Weight,
}

impl<V: Vertex> WeightedEdge<V> {
    pub fn new(tail: V, head: V, weight: Weight) -> WeightedEdge<V> {
        WeightedEdge { tail, head, weight }
    }

    pub fn tail(&self) -> &V {
        &self.tail
    }

    pub fn head(&self) -> &V {
        &self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn is_negative(&self) -> bool {
        self.weight < 0
    }

    pub fn reversed(&self) -> WeightedEdge<V> {
        WeightedEdge {
            tail: self.head.clone(),
            head: self.tail.clone(),
            weight: self.weight,
        }
    }
}

