//! Heuristic move selection over a bounded search tree.
//!
//! The policy, in order:
//! 1. A depth-1 move after which either reserve is down to one sphere is
//!    played at once.
//! 2. If the opponent could complete a square at depth 2 on a cell that is
//!    empty now, occupy that cell first and remember it in the avoid list.
//! 3. Otherwise each depth-1 move is scored by the best reserve
//!    differential summed along any path below it; the strictly greatest
//!    score wins and ties go to the earliest move.

use pylos_core::{Cell, GameState, Move, Player};

use crate::tree::Node;
use crate::AvoidList;

/// Reserve differential from `player`'s point of view.
#[inline]
pub fn reserve_differential(state: &GameState, player: Player) -> i32 {
    state.reserve(player) as i32 - state.reserve(player.opponent()) as i32
}

/// Pick a move for the player to move at `root`, or None if it has no children.
pub fn choose(root: &Node, avoid: &mut AvoidList) -> Option<Move> {
    let advisor = root.state.turn();

    for child in root {
        if child.state.reserve(Player::Light) == 1 || child.state.reserve(Player::Dark) == 1 {
            log::debug!("reserve nearly empty after {:?}, playing it", child.mov);
            return child.mov.clone();
        }

        if let Some(block) = blocking_move(root, child) {
            log::info!("blocking a square at {}", block.to());
            avoid.insert(block.to());
            return Some(block);
        }
    }

    let mut best: Option<(i32, &Move)> = None;
    let mut fallback: Option<(i32, &Move)> = None;

    for child in root {
        let Some(mov) = child.mov.as_ref() else {
            continue;
        };
        let score = best_path_sum(child, advisor);

        let slot = match mov.from() {
            Some(origin) if avoid.contains(origin) => &mut fallback,
            _ => &mut best,
        };
        if slot.map_or(true, |(kept, _)| score > kept) {
            *slot = Some((score, mov));
        }
    }

    best.or(fallback).map(|(score, mov)| {
        log::debug!("best differential {} for {}", score, mov);
        mov.clone()
    })
}

/// The depth-1 placement that takes a cell the opponent could square on next turn.
fn blocking_move(root: &Node, child: &Node) -> Option<Move> {
    for grandchild in child {
        let Some(threat) = grandchild.mov.as_ref() else {
            continue;
        };
        let cell = threat.to();
        if root.state.safe_get(cell) != Some(Cell::Empty) || !grandchild.state.creates_square(cell) {
            continue;
        }

        let block = Move::place(cell);
        if root.iter().any(|c| c.mov.as_ref() == Some(&block)) {
            return Some(block);
        }
    }
    None
}

/// Greatest sum of per-ply differentials along any path from `node` to a leaf.
fn best_path_sum(node: &Node, advisor: Player) -> i32 {
    let own = reserve_differential(&node.state, advisor);
    node.iter()
        .map(|child| best_path_sum(child, advisor))
        .max()
        .map_or(own, |below| own + below)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SearchStats;
    use pylos_core::Coord;

    fn c(layer: i8, row: i8, column: i8) -> Coord {
        Coord::new(layer, row, column)
    }

    fn play_all(state: &mut GameState, moves: &[(Player, Coord)]) {
        for &(player, coord) in moves {
            state.update(&Move::place(coord), player).unwrap();
        }
    }

    #[test]
    fn test_reserve_differential_orientation() {
        let mut state = GameState::new();
        play_all(&mut state, &[(Player::Light, c(0, 0, 0))]);
        assert_eq!(reserve_differential(&state, Player::Light), -1);
        assert_eq!(reserve_differential(&state, Player::Dark), 1);
    }

    #[test]
    fn test_initial_position_picks_first_move_on_tie() {
        let mut stats = SearchStats::new();
        let root = Node::build(GameState::new(), 2, &mut stats);
        let mut avoid = AvoidList::default();
        assert_eq!(choose(&root, &mut avoid), Some(Move::place(c(0, 0, 0))));
        assert!(avoid.is_empty());
    }

    #[test]
    fn test_blocks_opponent_square() {
        let mut state = GameState::new();
        // Dark threatens (0, 1, 1); Light to move.
        play_all(
            &mut state,
            &[
                (Player::Light, c(0, 3, 3)),
                (Player::Dark, c(0, 0, 0)),
                (Player::Light, c(0, 3, 2)),
                (Player::Dark, c(0, 0, 1)),
                (Player::Light, c(0, 2, 0)),
                (Player::Dark, c(0, 1, 0)),
            ],
        );
        assert_eq!(state.turn(), Player::Light);

        let mut stats = SearchStats::new();
        let root = Node::build(state, 2, &mut stats);
        let mut avoid = AvoidList::default();

        assert_eq!(choose(&root, &mut avoid), Some(Move::place(c(0, 1, 1))));
        assert!(avoid.contains(c(0, 1, 1)));
    }

    #[test]
    fn test_early_exit_when_reserve_nearly_empty() {
        let mut state = GameState::new();
        for row in 0..4 {
            for column in 0..4 {
                let player = if (row + column) % 2 == 0 { Player::Light } else { Player::Dark };
                state.update(&Move::place(c(0, row, column)), player).unwrap();
            }
        }
        // Light down to two spheres, Light to move.
        let upper: Vec<Coord> = Coord::all().filter(|c| c.layer == 1).collect();
        for (i, &coord) in upper.iter().take(6).enumerate() {
            let player = if i % 2 == 0 { Player::Light } else { Player::Dark };
            state.update(&Move::place(coord), player).unwrap();
        }
        for &coord in &upper[6..8] {
            state.update(&Move::place(coord), Player::Light).unwrap();
        }
        assert_eq!(state.reserve(Player::Light), 2);
        assert_eq!(state.turn(), Player::Light);

        let mut stats = SearchStats::new();
        let root = Node::build(state, 2, &mut stats);
        let mut avoid = AvoidList::default();
        let chosen = choose(&root, &mut avoid).unwrap();

        // The first depth-1 child leaving a reserve at one is the first placement.
        let first = root
            .iter()
            .find(|n| n.state.reserve(Player::Light) == 1 || n.state.reserve(Player::Dark) == 1)
            .and_then(|n| n.mov.clone())
            .unwrap();
        assert_eq!(chosen, first);
    }

    #[test]
    fn test_prefers_square_with_removals() {
        let mut state = GameState::new();
        // Light can complete a square at (0, 1, 1) and take spheres back.
        play_all(
            &mut state,
            &[
                (Player::Light, c(0, 0, 0)),
                (Player::Dark, c(0, 3, 3)),
                (Player::Light, c(0, 0, 1)),
                (Player::Dark, c(0, 3, 2)),
                (Player::Light, c(0, 1, 0)),
                (Player::Dark, c(0, 2, 3)),
            ],
        );

        let mut stats = SearchStats::new();
        let root = Node::build(state, 1, &mut stats);
        let mut avoid = AvoidList::default();
        let chosen = choose(&root, &mut avoid).unwrap();

        assert_eq!(chosen.to(), c(0, 1, 1));
        assert_eq!(chosen.removals().len(), 2);
    }

    #[test]
    fn test_deeper_path_sum_changes_choice() {
        let mut state = GameState::new();
        // Light holds the top edge of the first square; Dark is scattered.
        play_all(
            &mut state,
            &[
                (Player::Light, c(0, 0, 0)),
                (Player::Dark, c(0, 3, 3)),
                (Player::Light, c(0, 0, 1)),
                (Player::Dark, c(0, 3, 1)),
            ],
        );

        // One ply deep every placement scores -1, so the first one is kept.
        let mut stats = SearchStats::new();
        let shallow = Node::build(state, 1, &mut stats);
        let mut avoid = AvoidList::default();
        assert_eq!(choose(&shallow, &mut avoid), Some(Move::place(c(0, 0, 2))));

        // Three plies deep, (0, 1, 0) leads to a square with two removals:
        // -1 + 0 + 1 beats any other path.
        let deep = Node::build(state, 3, &mut stats);
        let child = deep
            .iter()
            .find(|n| n.mov == Some(Move::place(c(0, 1, 0))))
            .unwrap();
        assert_eq!(best_path_sum(child, Player::Light), 0);
        // Without a square the third ply costs Light another sphere.
        let first = deep.iter().next().unwrap();
        assert_eq!(best_path_sum(first, Player::Light), -2);

        let mut avoid = AvoidList::default();
        assert_eq!(choose(&deep, &mut avoid), Some(Move::place(c(0, 1, 0))));
        assert!(avoid.is_empty());
    }

    #[test]
    fn test_avoided_origins_are_a_last_resort() {
        let mut state = GameState::new();
        for row in 0..4 {
            for column in 0..4 {
                let player = if (row + column) % 2 == 0 { Player::Light } else { Player::Dark };
                state.update(&Move::place(c(0, row, column)), player).unwrap();
            }
        }

        let mut stats = SearchStats::new();
        let root = Node::build(state, 1, &mut stats);

        let mut avoid = AvoidList::default();
        let unrestricted = choose(&root, &mut avoid).unwrap();

        // Every raise origin avoided: the choice must not be a raise from one.
        let mut avoid = AvoidList::default();
        for coord in Coord::all().filter(|c| c.layer == 0) {
            avoid.insert(coord);
        }
        let restricted = choose(&root, &mut avoid).unwrap();

        // Raises keep the reserve and beat any placement when nothing is avoided.
        assert!(!unrestricted.is_place());
        assert_eq!(restricted, Move::place(c(1, 0, 0)));
    }
}
