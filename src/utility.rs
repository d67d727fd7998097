use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::prelude::*;

use crate::graphs::{edge::WeightedEdge, vec_vec_graph::VecVecGraph, Graph, Weight};

pub fn get_progressbar_long_jobs(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
            .unwrap(),
    );
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Random directed graph on `number_of_vertices` dense ids with about
/// `number_of_edges` edges of weight `0..=max_weight`. Self loops are skipped
/// and parallel edges collapse to the lightest one.
pub fn random_graph<R: Rng>(
    rng: &mut R,
    number_of_vertices: u32,
    number_of_edges: u32,
    max_weight: Weight,
) -> VecVecGraph {
    let mut graph = VecVecGraph::with_vertices(number_of_vertices);

    for _ in 0..number_of_edges {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        let weight = rng.gen_range(0..=max_weight);
        if tail != head {
            graph.insert_lightest(&WeightedEdge::new(tail, head, weight));
        }
    }

    graph
}

/// `number_of_sources` vertices drawn uniformly from `graph`.
pub fn random_sources<R: Rng>(rng: &mut R, graph: &VecVecGraph, number_of_sources: u32) -> Vec<u32> {
    (0..number_of_sources)
        .map(|_| rng.gen_range(0..graph.number_of_vertices()))
        .collect()
}
