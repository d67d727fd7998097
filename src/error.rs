use std::path::PathBuf;

use thiserror::Error;

use crate::{
    graphs::{Distance, Weight},
    search::collections::dijkstra_result::BacktraceMode,
};

/// Errors raised while searching a graph or reading a finished search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError<V> {
    #[error("edge {tail:?} -> {head:?} has negative weight {weight}")]
    NegativeWeight { tail: V, head: V, weight: Weight },

    #[error("vertex {0:?} is not part of the graph")]
    UnknownVertex(V),

    #[error("pop on an empty frontier")]
    EmptyFrontier,

    #[error("backtrace mode {actual:?} does not record enough to rebuild paths, need {required:?}")]
    InsufficientBacktrace {
        required: BacktraceMode,
        actual: BacktraceMode,
    },

    #[error("vertex {0:?} was not reached from the source")]
    Unreachable(V),

    #[error("parent links from {0:?} do not lead back to the source")]
    BrokenBacktrace(V),

    #[error("distance to {vertex:?} exceeds {}", Distance::MAX)]
    DistanceOverflow { vertex: V },

    #[error("search was cancelled")]
    Cancelled,

    #[error("a negative cycle is reachable from {0:?}")]
    NegativeCycle(V),
}

/// Errors raised while loading a graph from disk.
#[derive(Debug, Error)]
pub enum GraphReadError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: no {field} found")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: unable to parse weight {value:?}")]
    InvalidWeight { line: usize, value: String },

    #[error("line {line}: unexpected trailing token {value:?}")]
    TrailingToken { line: usize, value: String },

    #[error("unable to decode graph snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
}
