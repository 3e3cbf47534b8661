//! Load a graph and a query file, build the index, answer the queries.
//!
//! ```text
//! cargo run --release --example greach -- graph.txt queries.txt
//! ```
//!
//! Graph format: `graph_for_greach`, the node count, then `u: v1 v2 ... #` lines.
//! Query format: `source target expected` triples, `expected` in {-1, 0, 1}.
//!
//! A query whose known expectation disagrees with the computed answer stops the run with
//! an integrity error and a non-zero exit status.

use std::path::Path;
use std::time::Instant;

use greach::{load_graph, load_queries, run_queries, IndexConfig, ReachIndex};
use tracing::info;

fn main() -> Result<(), greach::Error> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = std::env::args().skip(1);
    let (Some(graph_path), Some(query_path)) = (args.next(), args.next()) else {
        eprintln!("usage: greach <graph-file> <query-file>");
        std::process::exit(2);
    };

    let t = Instant::now();
    let graph = load_graph(Path::new(&graph_path))?;
    info!(edges = graph.edge_count(), elapsed = ?t.elapsed(), "read graph");

    let t = Instant::now();
    let index: ReachIndex = ReachIndex::build(&graph, IndexConfig::default());
    let index_mb = index.index_bytes() as f64 / (1024.0 * 1024.0);
    info!(nodes = index.node_count(), elapsed = ?t.elapsed(), "index built");
    info!("index space: {index_mb:.3}MB");

    let t = Instant::now();
    let mut queries = load_queries(Path::new(&query_path), index.node_count())?;
    info!(queries = queries.len(), elapsed = ?t.elapsed(), "read queries");

    let t = Instant::now();
    let stats = run_queries(&index, &mut queries)?;
    info!(elapsed = ?t.elapsed(), "queries answered");

    info!("reachable: {}", stats.reachable);
    info!(
        "answered without search: {} filter or structural + {} interval (positive or negative) = {}, searched {}",
        stats.filter_resolved,
        stats.interval_resolved,
        stats.label_resolved(),
        stats.searched
    );
    Ok(())
}
