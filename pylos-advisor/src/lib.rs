//! Move advisor for Pylos.
//!
//! [`advise`] looks a few plies ahead from a position and returns the move
//! to play, using one of two strategies:
//!
//! - [`Strategy::Heuristic`]: builds a [`tree::Node`] tree and applies the
//!   early-exit, square-blocking and reserve-differential rules in
//!   [`heuristic`].
//! - [`Strategy::Minimax`]: alternating minimax over the reserve
//!   differential, see [`minimax`].
//!
//! The advisor never touches the caller's state; every node works on its
//! own copy.

use pylos_core::{Coord, GameState, Move, Player};

pub mod config;
pub mod heuristic;
pub mod minimax;
pub mod stats;
pub mod tree;

pub use config::{AdvisorConfig, Strategy};
pub use stats::SearchStats;

use crate::tree::Node;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorError {
    #[error("no legal move available")]
    NoLegalMove,

    #[error("the game is already decided, {0} won")]
    GameOver(Player),

    #[error("search depth must be between 1 and {}, got {0}", config::MAX_DEPTH)]
    InvalidDepth(usize),
}

/// Cells where the advisor blocked a square.
///
/// The sphere placed there should stay put, so raises starting from these
/// cells are only played when nothing else is available. The list lives as
/// long as the caller keeps it, usually one game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvoidList(Vec<Coord>);

impl AvoidList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coord: Coord) {
        if !self.0.contains(&coord) {
            self.0.push(coord);
        }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.0.iter()
    }
}

/// A chosen move and what it cost to find.
#[derive(Clone, Debug)]
pub struct Advice {
    pub mov: Move,
    pub stats: SearchStats,
}

/// Choose a move for the player to move in `state`.
///
/// Both strategies refuse a decided position with [`AdvisorError::GameOver`].
pub fn advise(
    state: &GameState,
    avoid: &mut AvoidList,
    config: &AdvisorConfig,
) -> Result<Advice, AdvisorError> {
    config.validate()?;
    if let Some(winner) = state.winner() {
        return Err(AdvisorError::GameOver(winner));
    }

    let mut stats = SearchStats::new();
    let mov = match config.strategy {
        Strategy::Heuristic => {
            let root = Node::build(*state, config.depth, &mut stats);
            heuristic::choose(&root, avoid)
        }
        Strategy::Minimax => minimax::search(state, config.depth, config.prune, &mut stats),
    };
    stats.finish();
    stats.log_summary();

    let mov = mov.ok_or(AdvisorError::NoLegalMove)?;
    log::debug!("{} advises {}", state.turn(), mov);
    Ok(Advice { mov, stats })
}
