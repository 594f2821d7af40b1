//! Depth-limited iterative minimax with optional alpha-beta pruning.
//!
//! Scores are reserve differentials from the advisor's point of view. The
//! advisor maximizes on its own plies and the opponent minimizes on theirs.

use pylos_core::movegen::all_moves;
use pylos_core::{GameState, Move, Player};

use crate::heuristic::reserve_differential;
use crate::stats::SearchStats;

/// Score of a decided game. Reserve differentials never come close.
pub const WIN_SCORE: i32 = 1_000;

const INFINITY: i32 = i32::MAX / 2;

/// Stack frame for iterative minimax.
struct Frame {
    state: GameState,
    /// Fully specified moves for the player to move here
    moves: Vec<Move>,
    /// Index into moves
    move_idx: usize,
    /// Best score found so far
    best: i32,
    alpha: i32,
    beta: i32,
    /// Whether the advisor is to move here
    is_maximizing: bool,
    /// Number of children evaluated
    children_evaluated: u32,
}

impl Frame {
    fn new(state: GameState, moves: Vec<Move>, advisor: Player, alpha: i32, beta: i32) -> Self {
        let is_maximizing = state.turn() == advisor;
        Self {
            state,
            moves,
            move_idx: 0,
            best: if is_maximizing { -INFINITY } else { INFINITY },
            alpha,
            beta,
            is_maximizing,
            children_evaluated: 0,
        }
    }

    /// Fold a child's score into this frame. Returns true if it is a new best.
    #[inline]
    fn update_best(&mut self, score: i32) -> bool {
        self.children_evaluated += 1;
        let improved = if self.is_maximizing {
            score > self.best
        } else {
            score < self.best
        };
        if improved {
            self.best = score;
        }
        if self.is_maximizing {
            self.alpha = self.alpha.max(self.best);
        } else {
            self.beta = self.beta.min(self.best);
        }
        improved
    }
}

/// Static score of `state` reached at `ply`, or None if it should be searched deeper.
///
/// Decided games score `WIN_SCORE` minus the ply, so quicker wins (and slower
/// losses) are preferred.
fn leaf_score(state: &GameState, advisor: Player, ply: usize, depth: usize) -> Option<i32> {
    match state.winner() {
        Some(winner) if winner == advisor => Some(WIN_SCORE - ply as i32),
        Some(_) => Some(-(WIN_SCORE - ply as i32)),
        None if ply >= depth => Some(reserve_differential(state, advisor)),
        None => None,
    }
}

/// Search `depth` plies below `state` and return the best move for the player to move.
///
/// With `prune` set, alpha-beta cuts are applied. The chosen move is the same
/// either way: the first move, in generation order, with the best score.
pub fn search(state: &GameState, depth: usize, prune: bool, stats: &mut SearchStats) -> Option<Move> {
    let advisor = state.turn();
    let root_moves = all_moves(state, advisor);
    if root_moves.is_empty() {
        return None;
    }

    let mut stack: Vec<Frame> = Vec::with_capacity(depth + 1);
    let mut best_root: Option<usize> = None;

    stats.record_expansion(0);
    stack.push(Frame::new(*state, root_moves, advisor, -INFINITY, INFINITY));

    while let Some(top) = stack.len().checked_sub(1) {
        let frame = &mut stack[top];

        // Alpha-beta: the rest of this frame cannot change the parent's choice.
        if prune && frame.children_evaluated > 0 && frame.alpha >= frame.beta {
            let remaining = frame.moves.len() - frame.move_idx;
            stats.branches_pruned += remaining as u64;
            frame.move_idx = frame.moves.len();
        }

        if frame.move_idx < frame.moves.len() {
            let idx = frame.move_idx;
            frame.move_idx += 1;

            // Generated moves are legal; a rejection just drops the candidate.
            let Ok(child) = frame.state.play(&frame.moves[idx]) else {
                continue;
            };
            let ply = top + 1;

            let child_moves = match leaf_score(&child, advisor, ply, depth) {
                Some(score) => {
                    stats.record_leaf(ply);
                    if frame.update_best(score) && top == 0 {
                        best_root = Some(idx);
                    }
                    continue;
                }
                None => all_moves(&child, child.turn()),
            };

            if child_moves.is_empty() {
                // Cannot happen while the game is undecided; score it statically.
                stats.record_leaf(ply);
                let score = reserve_differential(&child, advisor);
                if frame.update_best(score) && top == 0 {
                    best_root = Some(idx);
                }
                continue;
            }

            let (alpha, beta) = (frame.alpha, frame.beta);
            stats.record_expansion(ply);
            stack.push(Frame::new(child, child_moves, advisor, alpha, beta));
        } else {
            // No more moves - pop frame and hand its score to the parent
            let Some(done) = stack.pop() else {
                break;
            };
            let at_root = stack.len() == 1;
            if let Some(parent) = stack.last_mut() {
                let score = if done.children_evaluated == 0 {
                    reserve_differential(&done.state, advisor)
                } else {
                    done.best
                };
                if parent.update_best(score) && at_root {
                    best_root = Some(parent.move_idx - 1);
                }
            } else {
                // Root finished
                return best_root.map(|idx| done.moves[idx].clone());
            }
        }
    }

    None
}
