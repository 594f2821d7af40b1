//! Advisor settings, read from the `[advisor]` table of the config file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::AdvisorError;

/// Deepest search the advisor accepts. Branching grows fast once squares
/// start forming, so anything deeper is impractical between two turns.
pub const MAX_DEPTH: usize = 6;

/// How the advisor picks among candidate moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Early exits, square blocking, then best reserve differential along any path.
    #[default]
    Heuristic,
    /// Alternating minimax over the reserve differential.
    Minimax,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Heuristic => write!(f, "heuristic"),
            Strategy::Minimax => write!(f, "minimax"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Plies explored below the current position.
    pub depth: usize,
    pub strategy: Strategy,
    /// Alpha-beta pruning for the minimax strategy.
    pub prune: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            strategy: Strategy::Heuristic,
            prune: true,
        }
    }
}

impl AdvisorConfig {
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(AdvisorError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}
