use std::{error::Error, path::PathBuf};

use clap::Parser;
use dijkstra_paths::{
    graphs::graph_factory::GraphFactory, BacktraceMode, Dijkstra, Distance, Graph, WeightedEdge,
};
use log::info;
use serde::Serialize;

/// Shortest distances from one vertex of an edge list (`src dst weight` per
/// line) or a .bincode snapshot.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file
    #[arg(short, long)]
    graph: PathBuf,
    /// Source vertex
    #[arg(short, long)]
    source: String,
    /// Print the shortest path to this vertex instead of the whole table
    #[arg(short, long)]
    target: Option<String>,
    /// How much backtrace to record
    #[arg(short, long, value_enum, default_value_t = BacktraceMode::Full)]
    mode: BacktraceMode,
    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Row<'a> {
    vertex: &'a str,
    distance: Distance,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edge: Option<&'a WeightedEdge<String>>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let graph = GraphFactory::from_file(&args.graph)?;
    info!(
        "graph has {} vertices and {} edges",
        graph.number_of_vertices(),
        graph.number_of_edges()
    );

    let dijkstra = Dijkstra::new(&graph);

    if let Some(target) = args.target {
        let result = dijkstra.single_pair(args.source, &target, args.mode)?;
        let path = result.reconstruct(&target)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&path)?);
        } else {
            println!("{} ({})", path.vertices.join(" -> "), path.distance);
        }
        return Ok(());
    }

    let result = dijkstra.single_source(args.source, args.mode)?;
    info!("reached {} vertices", result.len());

    let rows: Vec<_> = result
        .iter()
        .map(|(vertex, record)| Row {
            vertex: vertex.as_str(),
            distance: record.distance(),
            parent: record.parent().map(String::as_str),
            edge: record.edge(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in rows {
            match row.parent {
                Some(parent) => println!("{} {} {}", row.vertex, row.distance, parent),
                None => println!("{} {}", row.vertex, row.distance),
            }
        }
    }

    Ok(())
}
