//! Legal move enumeration.
//!
//! Everything here is built on the [`GameState`] legality predicates, so a
//! generated move is always accepted by [`GameState::update`].
//!
//! Moves are generated in a fixed order:
//! 1. Placements from the reserve (layer, then row, then column)
//! 2. Raises (by origin, then by target in the same order)
//!
//! Each move is followed directly by its removal variants when its
//! destination completes a square.

use crate::{Cell, Coord, GameState, Move, Player};

/// Every empty cell a sphere could be put on right now.
pub fn legal_placements(state: &GameState) -> Vec<Coord> {
    Coord::all()
        .filter(|&coord| state.valid_position(coord).is_ok())
        .collect()
}

/// Spheres of `player` that nothing rests on.
pub fn legal_move_origins(state: &GameState, player: Player) -> Vec<Coord> {
    Coord::all()
        .filter(|&coord| state.safe_get(coord) == Some(Cell::Occupied(player)))
        .filter(|&coord| state.can_move(coord).is_ok())
        .collect()
}

/// Cells the sphere at `origin` could be raised to.
///
/// Targets are computed with the origin already lifted, so cells resting on
/// the origin itself are not offered.
pub fn legal_move_targets(state: &GameState, origin: Coord) -> Vec<Coord> {
    let owner = match state.safe_get(origin) {
        Some(Cell::Occupied(player)) => player,
        _ => return Vec::new(),
    };

    let mut lifted = *state;
    if lifted.remove_sphere(origin, owner).is_err() {
        return Vec::new();
    }

    legal_placements(&lifted)
        .into_iter()
        .filter(|target| target.layer > origin.layer)
        .collect()
}

/// Spheres of `player` that may be taken back in the given post-move state.
pub fn removable_after(state: &GameState, player: Player) -> Vec<Coord> {
    legal_move_origins(state, player)
}

/// All single spheres and all unordered pairs of distinct spheres.
pub fn removal_combinations(candidates: &[Coord]) -> Vec<Vec<Coord>> {
    let mut combos: Vec<Vec<Coord>> = candidates.iter().map(|&c| vec![c]).collect();
    for (i, &first) in candidates.iter().enumerate() {
        for &second in &candidates[i + 1..] {
            combos.push(vec![first, second]);
        }
    }
    combos
}

/// Every fully specified legal move for `player`, removal variants included.
pub fn all_moves(state: &GameState, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();

    if state.reserve(player) >= 1 {
        for to in legal_placements(state) {
            push_with_removals(state, player, Move::place(to), &mut moves);
        }
    }

    for from in legal_move_origins(state, player) {
        for to in legal_move_targets(state, from) {
            push_with_removals(state, player, Move::raise(from, to), &mut moves);
        }
    }

    moves
}

/// Legal moves for the player to move, each paired with the state it leads to.
///
/// Successors are produced by running [`GameState::play`], so the search
/// never bypasses the rules. A move the engine rejects is simply skipped.
pub fn successors(state: &GameState) -> Vec<(Move, GameState)> {
    all_moves(state, state.turn())
        .into_iter()
        .filter_map(|mov| state.play(&mov).ok().map(|next| (mov, next)))
        .collect()
}

/// Push `base` and, if it completes a square, every removal variant of it.
fn push_with_removals(state: &GameState, player: Player, base: Move, moves: &mut Vec<Move>) {
    let mut after = *state;
    if after.update(&base, player).is_err() {
        return;
    }

    let variants = if after.creates_square(base.to()) {
        removal_combinations(&removable_after(&after, player))
    } else {
        Vec::new()
    };

    moves.push(base.clone());
    moves.extend(variants.into_iter().map(|removals| base.clone().with_removals(removals)));
}
