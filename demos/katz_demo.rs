//! Temporal vs. aggregated Katz centrality on a small message log.
//!
//! ```text
//! cargo run --example katz_demo
//! RUST_LOG=lattix_evolving=debug cargo run --example katz_demo
//! ```

use lattix_evolving::prelude::*;
use lattix_evolving::formats::{Csv, CsvConfig};
use tracing_subscriber::EnvFilter;

const LOG: &str = "\
source,target,timestamp
alice,bob,1
bob,carol,1
carol,dave,2
alice,carol,3
dave,alice,4
bob,dave,4
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let g: EvolvingGraph<String, u32> =
        Csv::read(LOG.as_bytes(), &CsvConfig::default(), GraphConfig::default())?;
    println!(
        "{} people, {} messages over {} timestamps",
        g.num_nodes(),
        g.num_edges(),
        g.num_timestamps()
    );

    let start = TimeNode::new("alice".to_string(), 1);
    let goal = TimeNode::new("dave".to_string(), 2);
    match shortest_path(&g, &start, &goal)? {
        Some(path) => {
            let hops: Vec<String> = path.iter().map(ToString::to_string).collect();
            println!("alice@1 reaches dave@2: {}", hops.join(" -> "));
        }
        None => println!("alice@1 cannot reach dave@2"),
    }

    println!("\nTemporal Katz (broadcast):");
    let temporal = katz_temporal(&g, &TemporalKatzConfig::default())?;
    if let Some(scores) = temporal.scores() {
        for (name, score) in scores.ranked() {
            println!("  {name:<6} {score:.4}");
        }
    }

    println!("\nAggregated Katz (order ignored):");
    let aggregated = katz_evolving(&g, &KatzConfig { normalize: true, ..Default::default() })?;
    for (name, score) in aggregated.ranked() {
        println!("  {name:<6} {score:.4}");
    }
    Ok(())
}
