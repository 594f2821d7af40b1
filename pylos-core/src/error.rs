use crate::{Coord, Player};

/// Reasons the rule engine rejects a query or a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("the position {0} is outside of the board")]
    OutOfBounds(Coord),

    #[error("the position {0} is not free")]
    Occupied(Coord),

    #[error("the position {0} is not stable")]
    Unsupported(Coord),

    #[error("the position {0} is empty")]
    Empty(Coord),

    #[error("the position {0} is not movable")]
    Blocked(Coord),

    #[error("the sphere at {0} is not yours")]
    NotOwner(Coord),

    #[error("{0} has no more spheres")]
    EmptyReserve(Player),

    #[error("you can only move to an upper layer ({from} -> {to})")]
    NotAscending { from: Coord, to: Coord },

    #[error("no square formed at {0}, you cannot remove spheres")]
    NoSquareFormed(Coord),

    #[error("can't remove more than 2 spheres (got {0})")]
    TooManyRemovals(usize),

    #[error("invalid move: {0}")]
    MalformedMove(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}
