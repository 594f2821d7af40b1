//! Search statistics tracking.

use std::time::{Duration, Instant};

/// Statistics collected during one advisor search.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    /// Nodes whose children were generated
    pub nodes_expanded: u64,

    /// Leaves given a static score (depth limit or decided game)
    pub leaves_evaluated: u64,

    /// Moves skipped by alpha-beta
    pub branches_pruned: u64,

    /// Deepest ply reached
    pub max_depth: u64,

    /// Wall time of the search, set by `finish`
    pub elapsed: Duration,

    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record that a node at `depth` had its children generated.
    #[inline]
    pub fn record_expansion(&mut self, depth: usize) {
        self.nodes_expanded += 1;
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn record_leaf(&mut self, depth: usize) {
        self.leaves_evaluated += 1;
        self.max_depth = self.max_depth.max(depth as u64);
    }

    /// Stop the clock.
    pub fn finish(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed = start.elapsed();
        }
    }

    /// Nodes (expanded plus leaves) visited per second.
    pub fn nodes_per_sec(&self) -> f64 {
        let elapsed = self.elapsed.as_secs_f64();
        if elapsed > 0.0 {
            (self.nodes_expanded + self.leaves_evaluated) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Fold another search into this one, for per-game or per-run totals.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_expanded += other.nodes_expanded;
        self.leaves_evaluated += other.leaves_evaluated;
        self.branches_pruned += other.branches_pruned;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.elapsed += other.elapsed;
    }

    pub fn log_summary(&self) {
        let pruning_pct = if self.leaves_evaluated + self.branches_pruned > 0 {
            100.0 * self.branches_pruned as f64
                / (self.leaves_evaluated + self.branches_pruned) as f64
        } else {
            0.0
        };

        log::debug!(
            "search: expanded={} leaves={} pruned={} ({:.1}%) depth={} time={:.3}s rate={:.0}/s",
            self.nodes_expanded,
            self.leaves_evaluated,
            self.branches_pruned,
            pruning_pct,
            self.max_depth,
            self.elapsed.as_secs_f64(),
            self.nodes_per_sec(),
        );
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Nodes expanded: {}", self.nodes_expanded);
        println!("Leaves evaluated: {}", self.leaves_evaluated);
        println!("Branches pruned: {}", self.branches_pruned);
        println!("Max depth: {}", self.max_depth);
        println!("Search time: {:.2}s", self.elapsed.as_secs_f64());
        println!("Average rate: {:.0} nodes/sec", self.nodes_per_sec());
    }
}
