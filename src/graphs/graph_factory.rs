use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
};

use indicatif::ProgressIterator;

use super::{edge::WeightedEdge, hash_graph::HashGraph, Weight};
use crate::{error::GraphReadError, utility::get_progressspinner};

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Reads a graph, picking the format by file extension: `.bincode` is a
    /// snapshot, anything else an edge list.
    pub fn from_file(path: &Path) -> Result<HashGraph<String>, GraphReadError> {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("bincode") => Self::from_bincode_file(path),
            _ => Self::from_edge_list_file(path),
        }
    }

    pub fn from_edge_list_file(path: &Path) -> Result<HashGraph<String>, GraphReadError> {
        let file = File::open(path).map_err(|source| GraphReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let spinner = get_progressspinner(&format!("Reading {}", path.display()));
        let parsed = parse_edge_list(BufReader::new(file).lines().progress_with(spinner.clone()));
        spinner.finish_and_clear();
        let edges = parsed.map_err(|error| match error {
            GraphReadError::Io { source, .. } => GraphReadError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        log::info!("read {} edges from {}", edges.len(), path.display());
        Ok(HashGraph::from_edges(&edges))
    }

    pub fn from_bincode_file(path: &Path) -> Result<HashGraph<String>, GraphReadError> {
        let file = File::open(path).map_err(|source| GraphReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let spinner = get_progressspinner(&format!("Reading {}", path.display()));
        let graph: bincode::Result<HashGraph<String>> =
            bincode::deserialize_from(BufReader::new(file));
        spinner.finish_and_clear();

        Ok(graph?)
    }

    pub fn to_bincode_file(graph: &HashGraph<String>, path: &Path) -> Result<(), GraphReadError> {
        let file = File::create(path).map_err(|source| GraphReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        bincode::serialize_into(BufWriter::new(file), graph)?;

        Ok(())
    }
}

/// Parses `src dst weight` lines. Blank lines and lines starting with `#`
/// are skipped.
pub fn parse_edge_list<I>(lines: I) -> Result<Vec<WeightedEdge<String>>, GraphReadError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut edges = Vec::new();

    for (index, line) in lines.enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| GraphReadError::Io {
            path: Default::default(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut values = line.split_whitespace();
        let mut next_field = |field| {
            values.next().ok_or(GraphReadError::MissingField {
                line: line_number,
                field,
            })
        };
        let tail = next_field("tail")?.to_string();
        let head = next_field("head")?.to_string();
        let raw_weight = next_field("weight")?;
        let weight: Weight = raw_weight
            .parse()
            .map_err(|_| GraphReadError::InvalidWeight {
                line: line_number,
                value: raw_weight.to_string(),
            })?;

        if let Some(extra) = values.next() {
            return Err(GraphReadError::TrailingToken {
                line: line_number,
                value: extra.to_string(),
            });
        }

        edges.push(WeightedEdge::new(tail, head, weight));
    }

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Cursor};

    use super::parse_edge_list;
    use crate::{error::GraphReadError, graphs::edge::WeightedEdge};

    fn parse(text: &str) -> Result<Vec<WeightedEdge<String>>, GraphReadError> {
        parse_edge_list(Cursor::new(text.to_string()).lines())
    }

    #[test]
    fn parses_lines() {
        let edges = parse("# comment\nA B 1\n\n  B C 2  \nA C 4\n").unwrap();

        assert_eq!(
            edges,
            vec![
                WeightedEdge::new("A".to_string(), "B".to_string(), 1),
                WeightedEdge::new("B".to_string(), "C".to_string(), 2),
                WeightedEdge::new("A".to_string(), "C".to_string(), 4),
            ]
        );
    }

    #[test]
    fn negative_weights_parse() {
        let edges = parse("x y -3").unwrap();
        assert_eq!(edges[0].weight(), -3);
    }

    #[test]
    fn reports_line_numbers() {
        assert!(matches!(
            parse("A B 1\nA B\n"),
            Err(GraphReadError::MissingField {
                line: 2,
                field: "weight"
            })
        ));
        assert!(matches!(
            parse("A B one"),
            Err(GraphReadError::InvalidWeight { line: 1, .. })
        ));
        assert!(matches!(
            parse("\nA B 1 2"),
            Err(GraphReadError::TrailingToken { line: 2, .. })
        ));
    }
}
