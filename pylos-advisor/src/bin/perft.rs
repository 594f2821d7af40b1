//! Count the legal-move tree from the initial position.
//!
//! Every fully specified move (removal variants included) is a distinct
//! edge, and transpositions are NOT merged. Decided positions are leaves.

use std::time::Instant;

use anyhow::{ensure, Result};
use clap::Parser;

use pylos_core::movegen::successors;
use pylos_core::GameState;

#[derive(Parser)]
#[command(name = "pylos-perft", about = "Count Pylos game-tree nodes per depth")]
struct Cli {
    /// Deepest ply to count
    #[arg(long, default_value_t = 4)]
    depth: usize,
}

/// Nodes per ply below `state`, added into `counts[ply]`.
fn count(state: &GameState, ply: usize, depth: usize, counts: &mut [u64], decided: &mut u64) {
    if ply == depth {
        return;
    }
    for (_, child) in successors(state) {
        counts[ply] += 1;
        if child.winner().is_some() {
            *decided += 1;
            continue;
        }
        count(&child, ply + 1, depth, counts, decided);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    ensure!(cli.depth >= 1, "depth must be at least 1");

    println!("Pylos Game Tree Counter");
    println!("=======================");

    let state = GameState::new();
    let start = Instant::now();
    let mut counts = vec![0u64; cli.depth];
    let mut decided = 0;
    count(&state, 0, cli.depth, &mut counts, &mut decided);

    let mut total = 1u64;
    for (ply, nodes) in counts.iter().enumerate() {
        total += nodes;
        println!("depth {:>2}: {:>12} nodes", ply + 1, nodes);
    }
    println!("Total nodes: {}", total);
    println!("Decided positions: {}", decided);
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());
    log::info!("counted {} nodes to depth {}", total, cli.depth);

    Ok(())
}
