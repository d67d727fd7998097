use std::{fmt, str::FromStr};

use ahash::{HashMap, HashMapExt};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graphs::{edge::WeightedEdge, Distance, Vertex};

/// How much of the search tree a [`DijkstraResult`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BacktraceMode {
    /// Distances only.
    None,
    /// Distances and the preceding vertex on a shortest path.
    #[value(name = "only_parent")]
    OnlyParent,
    /// Distances, preceding vertex and the edge taken from it.
    Full,
}

impl BacktraceMode {
    pub fn records_parent(self) -> bool {
        !matches!(self, BacktraceMode::None)
    }

    pub fn records_edge(self) -> bool {
        matches!(self, BacktraceMode::Full)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BacktraceMode::None => "none",
            BacktraceMode::OnlyParent => "only_parent",
            BacktraceMode::Full => "full",
        }
    }
}

impl fmt::Display for BacktraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BacktraceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(BacktraceMode::None),
            "only_parent" => Ok(BacktraceMode::OnlyParent),
            "full" => Ok(BacktraceMode::Full),
            other => Err(format!(
                "unknown backtrace mode {:?}, expected none, only_parent or full",
                other
            )),
        }
    }
}

/// What is known about a finalized vertex. The variant is fixed by the
/// backtrace mode of the search. The source has no parent and no edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultRecord<V> {
    Distance(Distance),
    DistanceParent {
        distance: Distance,
        parent: Option<V>,
    },
    DistanceParentEdge {
        distance: Distance,
        parent: Option<V>,
        edge: Option<WeightedEdge<V>>,
    },
}

impl<V: Vertex> ResultRecord<V> {
    fn new(mode: BacktraceMode, distance: Distance, via: Option<WeightedEdge<V>>) -> Self {
        match mode {
            BacktraceMode::None => ResultRecord::Distance(distance),
            BacktraceMode::OnlyParent => ResultRecord::DistanceParent {
                distance,
                parent: via.map(|edge| edge.tail().clone()),
            },
            BacktraceMode::Full => ResultRecord::DistanceParentEdge {
                distance,
                parent: via.as_ref().map(|edge| edge.tail().clone()),
                edge: via,
            },
        }
    }

    pub fn distance(&self) -> Distance {
        match self {
            ResultRecord::Distance(distance)
            | ResultRecord::DistanceParent { distance, .. }
            | ResultRecord::DistanceParentEdge { distance, .. } => *distance,
        }
    }

    pub fn parent(&self) -> Option<&V> {
        match self {
            ResultRecord::Distance(_) => None,
            ResultRecord::DistanceParent { parent, .. }
            | ResultRecord::DistanceParentEdge { parent, .. } => parent.as_ref(),
        }
    }

    pub fn edge(&self) -> Option<&WeightedEdge<V>> {
        match self {
            ResultRecord::DistanceParentEdge { edge, .. } => edge.as_ref(),
            _ => None,
        }
    }
}

/// Shortest distances from one source, plus as much backtrace as the mode
/// asks for. Only vertices the search finalized have an entry.
#[derive(Clone, Debug, Serialize)]
#[serde(bound(serialize = "V: Vertex + Serialize"))]
pub struct DijkstraResult<V> {
    source: V,
    mode: BacktraceMode,
    records: HashMap<V, ResultRecord<V>>,
    finalization_order: Vec<V>,
}

impl<V: Vertex> DijkstraResult<V> {
    pub(crate) fn new(source: V, mode: BacktraceMode) -> Self {
        DijkstraResult {
            source,
            mode,
            records: HashMap::new(),
            finalization_order: Vec::new(),
        }
    }

    /// Records a finalized vertex. `via` is the edge that reached it and is
    /// `None` for the source.
    pub(crate) fn add_result(
        &mut self,
        vertex: V,
        distance: Distance,
        via: Option<WeightedEdge<V>>,
    ) {
        let record = ResultRecord::new(self.mode, distance, via);
        let previous = self.records.insert(vertex.clone(), record);
        debug_assert!(previous.is_none(), "{:?} finalized twice", vertex);
        self.finalization_order.push(vertex);
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn mode(&self) -> BacktraceMode {
        self.mode
    }

    /// The record of `vertex`, or `None` if the search never reached it.
    pub fn get(&self, vertex: &V) -> Option<&ResultRecord<V>> {
        self.records.get(vertex)
    }

    pub fn distance(&self, vertex: &V) -> Option<Distance> {
        self.get(vertex).map(ResultRecord::distance)
    }

    pub fn parent(&self, vertex: &V) -> Option<&V> {
        self.get(vertex)?.parent()
    }

    pub fn edge(&self, vertex: &V) -> Option<&WeightedEdge<V>> {
        self.get(vertex)?.edge()
    }

    pub fn is_reached(&self, vertex: &V) -> bool {
        self.records.contains_key(vertex)
    }

    /// Position of `vertex` in finalization order, starting at 1 for the
    /// source.
    pub fn dijkstra_rank(&self, vertex: &V) -> Option<usize> {
        self.finalization_order
            .iter()
            .position(|other| other == vertex)
            .map(|index| index + 1)
    }

    /// Vertices in the order they were finalized, which is by non-decreasing
    /// distance.
    pub fn finalization_order(&self) -> &[V] {
        &self.finalization_order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &ResultRecord<V>)> + '_ {
        self.finalization_order
            .iter()
            .filter_map(|vertex| Some((vertex, self.records.get(vertex)?)))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BacktraceMode, DijkstraResult, ResultRecord};
    use crate::graphs::edge::WeightedEdge;

    fn filled(mode: BacktraceMode) -> DijkstraResult<char> {
        let mut result = DijkstraResult::new('a', mode);
        result.add_result('a', 0, None);
        result.add_result('b', 1, Some(WeightedEdge::new('a', 'b', 1)));
        result
    }

    #[test]
    fn record_shape_follows_mode() {
        let none = filled(BacktraceMode::None);
        assert_eq!(none.get(&'b'), Some(&ResultRecord::Distance(1)));
        assert_eq!(none.parent(&'b'), None);

        let only_parent = filled(BacktraceMode::OnlyParent);
        assert_eq!(
            only_parent.get(&'b'),
            Some(&ResultRecord::DistanceParent {
                distance: 1,
                parent: Some('a')
            })
        );
        assert_eq!(only_parent.edge(&'b'), None);

        let full = filled(BacktraceMode::Full);
        assert_eq!(full.parent(&'b'), Some(&'a'));
        assert_eq!(full.edge(&'b'), Some(&WeightedEdge::new('a', 'b', 1)));
    }

    #[test]
    fn source_is_distinct_from_unreached() {
        let result = filled(BacktraceMode::Full);

        assert_eq!(result.distance(&'a'), Some(0));
        assert_eq!(result.parent(&'a'), None);
        assert_eq!(result.edge(&'a'), None);
        assert!(result.is_reached(&'a'));

        assert_eq!(result.distance(&'z'), None);
        assert!(!result.is_reached(&'z'));
    }

    #[test]
    fn finalization_order_and_rank() {
        let result = filled(BacktraceMode::None);

        assert_eq!(result.finalization_order(), &['a', 'b']);
        assert_eq!(result.dijkstra_rank(&'a'), Some(1));
        assert_eq!(result.dijkstra_rank(&'b'), Some(2));
        assert_eq!(result.dijkstra_rank(&'c'), None);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn mode_strings() {
        for mode in [
            BacktraceMode::None,
            BacktraceMode::OnlyParent,
            BacktraceMode::Full,
        ] {
            assert_eq!(mode.as_str().parse::<BacktraceMode>(), Ok(mode));
        }
        assert!("parent".parse::<BacktraceMode>().is_err());
        assert_eq!(
            serde_json::to_string(&BacktraceMode::OnlyParent).unwrap(),
            "\"only_parent\""
        );
    }
}
