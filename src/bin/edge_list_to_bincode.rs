use std::{error::Error, path::PathBuf};

use clap::Parser;
use dijkstra_paths::{graphs::graph_factory::GraphFactory, Graph};
use log::info;

/// Reading a .bincode file is way faster than parsing an edge list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile with one `src dst weight` edge per line
    #[arg(short, long)]
    edge_list: PathBuf,
    /// Outfile in .bincode format
    #[arg(short, long)]
    graph_bincode: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let graph = GraphFactory::from_edge_list_file(&args.edge_list)?;
    info!(
        "writing {} vertices and {} edges to {}",
        graph.number_of_vertices(),
        graph.number_of_edges(),
        args.graph_bincode.display()
    );
    GraphFactory::to_bincode_file(&graph, &args.graph_bincode)?;

    Ok(())
}
