use std::{
    error::Error,
    time::{Duration, Instant},
};

use clap::Parser;
use dijkstra_paths::{
    search::bellman_ford::bellman_ford,
    utility::{get_progressbar_long_jobs, random_graph, random_sources},
    BacktraceMode, Dijkstra, Graph,
};
use indicatif::ProgressIterator;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

/// Times single source searches on a random graph.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of vertices of the random graph
    #[arg(short = 'n', long, default_value_t = 100_000)]
    number_of_vertices: u32,
    /// Number of edges drawn for the random graph
    #[arg(short = 'm', long, default_value_t = 400_000)]
    number_of_edges: u32,
    /// Largest edge weight
    #[arg(short = 'w', long, default_value_t = 1_000)]
    max_weight: i64,
    /// Number of searches to run
    #[arg(short = 'b', long, default_value_t = 100)]
    number_of_benchmarks: u32,
    /// Backtrace recorded by every search
    #[arg(long, value_enum, default_value_t = BacktraceMode::OnlyParent)]
    mode: BacktraceMode,
    /// Seed for the graph and the sources
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Compare every search against Bellman-Ford (slow)
    #[arg(long)]
    validate: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let graph = random_graph(
        &mut rng,
        args.number_of_vertices,
        args.number_of_edges,
        args.max_weight,
    );
    info!(
        "random graph with {} vertices and {} edges",
        graph.number_of_vertices(),
        graph.number_of_edges()
    );
    let sources = random_sources(&mut rng, &graph, args.number_of_benchmarks);

    let dijkstra = Dijkstra::new(&graph);
    let mut durations = Vec::new();
    let mut mismatches = 0;

    let bar = get_progressbar_long_jobs("Dijkstra", sources.len() as u64);
    for &source in sources.iter().progress_with(bar) {
        let start = Instant::now();
        let result = dijkstra.single_source(source, args.mode)?;
        durations.push(start.elapsed());

        if args.validate {
            let expected = bellman_ford(&graph, &source)?;
            let agrees = expected.len() == result.len()
                && expected
                    .iter()
                    .all(|(vertex, &distance)| result.distance(vertex) == Some(distance));
            if !agrees {
                warn!("search from {} disagrees with bellman-ford", source);
                mismatches += 1;
            }
        }
    }

    println!(
        "Average dijkstra duration is {:?}",
        durations.iter().sum::<Duration>() / durations.len().max(1) as u32
    );

    let start = Instant::now();
    let results = dijkstra_paths::multi_source(&graph, &sources, args.mode);
    let parallel = start.elapsed();
    let failed = results.iter().filter(|result| result.is_err()).count();
    println!(
        "{} parallel searches took {:?} ({} failed)",
        results.len(),
        parallel,
        failed
    );

    if args.validate {
        println!("{} searches disagreed with bellman-ford", mismatches);
    }

    Ok(())
}
