//! Authoritative game state and the rules that mutate it.

use std::fmt;

use crate::{layer_size, Board, Cell, Coord, Move, Player, RuleError, LAYERS, MAX_REMOVALS, SPHERES_PER_PLAYER};

/// Board, reserves and the player to move.
///
/// `GameState` is a small `Copy` value (one u64 plus three bytes), so every
/// search node can own an independent snapshot without sharing anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GameState {
    board: Board,
    reserve: [u8; 2],
    turn: Player,
}

impl GameState {
    /// Empty board, 15 spheres each, Light to play.
    pub fn new() -> GameState {
        GameState {
            board: Board::new(),
            reserve: [SPHERES_PER_PLAYER; 2],
            turn: Player::Light,
        }
    }

    /// Assemble a state from its parts, checking the board invariants.
    ///
    /// Every occupied cell above layer 0 must be supported, and each player's
    /// spheres on the board plus in reserve must add up to 15.
    pub fn from_parts(board: Board, reserve: [u8; 2], turn: Player) -> Result<GameState, RuleError> {
        let state = GameState { board, reserve, turn };

        for coord in Coord::all().filter(|c| c.layer > 0) {
            if state.safe_get(coord) == Some(Cell::Empty) {
                continue;
            }
            let unsupported = coord
                .supports()
                .iter()
                .any(|&below| state.safe_get(below).map_or(true, Cell::is_empty));
            if unsupported {
                return Err(RuleError::InvalidState(format!(
                    "sphere at {} is not supported",
                    coord
                )));
            }
        }

        for player in Player::both() {
            let total = board.spheres_of(player) + reserve[player.index()] as u32;
            if total != SPHERES_PER_PLAYER as u32 {
                return Err(RuleError::InvalidState(format!(
                    "{} owns {} spheres, expected {}",
                    player, total, SPHERES_PER_PLAYER
                )));
            }
        }

        Ok(state)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Spheres left in `player`'s reserve.
    #[inline]
    pub fn reserve(&self, player: Player) -> u8 {
        self.reserve[player.index()]
    }

    /// Both reserves, indexed by player id.
    #[inline]
    pub fn reserves(&self) -> [u8; 2] {
        self.reserve
    }

    /// The player to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn spheres_on_board(&self) -> u32 {
        self.board.spheres()
    }

    // ========== Queries ==========

    /// Read a cell, failing with `OutOfBounds` for coordinates off the pyramid.
    pub fn get(&self, coord: Coord) -> Result<Cell, RuleError> {
        self.board.get(coord).ok_or(RuleError::OutOfBounds(coord))
    }

    /// Read a cell, None when the coordinate is off the pyramid.
    #[inline]
    pub fn safe_get(&self, coord: Coord) -> Option<Cell> {
        self.board.get(coord)
    }

    /// Check that a sphere could be put at `coord`: the cell is free and,
    /// above the base, all four cells underneath are occupied.
    pub fn valid_position(&self, coord: Coord) -> Result<(), RuleError> {
        if !self.get(coord)?.is_empty() {
            return Err(RuleError::Occupied(coord));
        }

        if coord.layer > 0 {
            for below in coord.supports() {
                if self.get(below)?.is_empty() {
                    return Err(RuleError::Unsupported(coord));
                }
            }
        }
        Ok(())
    }

    /// Check that the sphere at `coord` could be picked up: the cell holds a
    /// sphere and nothing rests on it.
    pub fn can_move(&self, coord: Coord) -> Result<(), RuleError> {
        if self.get(coord)?.is_empty() {
            return Err(RuleError::Empty(coord));
        }

        if (coord.layer as usize) < LAYERS - 1 {
            let covered = coord
                .supported()
                .iter()
                .any(|&above| matches!(self.safe_get(above), Some(Cell::Occupied(_))));
            if covered {
                return Err(RuleError::Blocked(coord));
            }
        }
        Ok(())
    }

    /// True if `coord` is part of a 2×2 block of one player's spheres on its layer.
    pub fn creates_square(&self, coord: Coord) -> bool {
        [
            coord,
            coord.offset(0, -1, 0),
            coord.offset(0, -1, -1),
            coord.offset(0, 0, -1),
        ]
        .into_iter()
        .any(|anchor| self.is_square(anchor))
    }

    /// True if the 2×2 block anchored at `anchor` holds four spheres of one player.
    fn is_square(&self, anchor: Coord) -> bool {
        let owner = match self.safe_get(anchor) {
            Some(Cell::Occupied(player)) => player,
            _ => return false,
        };
        [
            anchor.offset(0, 1, 0),
            anchor.offset(0, 1, 1),
            anchor.offset(0, 0, 1),
        ]
        .into_iter()
        .all(|c| self.safe_get(c) == Some(Cell::Occupied(owner)))
    }

    /// Return the winner, if any.
    ///
    /// A player whose reserve is exhausted hands the game to the other one.
    pub fn winner(&self) -> Option<Player> {
        if self.reserve[Player::Light.index()] < 1 {
            Some(Player::Dark)
        } else if self.reserve[Player::Dark.index()] < 1 {
            Some(Player::Light)
        } else {
            None
        }
    }

    // ========== Mutation ==========

    /// Put one of `player`'s spheres at `coord` after checking `valid_position`.
    ///
    /// Does NOT touch the reserve.
    pub fn set(&mut self, coord: Coord, player: Player) -> Result<(), RuleError> {
        self.valid_position(coord)?;
        self.put(coord, Cell::Occupied(player));
        Ok(())
    }

    /// Take `player`'s sphere off `coord` after checking `can_move` and ownership.
    ///
    /// Does NOT touch the reserve.
    pub fn remove_sphere(&mut self, coord: Coord, player: Player) -> Result<(), RuleError> {
        self.can_move(coord)?;
        if self.get(coord)? != Cell::Occupied(player) {
            return Err(RuleError::NotOwner(coord));
        }
        self.put(coord, Cell::Empty);
        Ok(())
    }

    #[inline]
    fn put(&mut self, coord: Coord, cell: Cell) {
        if let Some(idx) = coord.index() {
            self.board.set_cell(idx, cell);
        }
    }

    /// Apply `mov` on behalf of `player` and pass the turn.
    ///
    /// The update is all-or-nothing: the move runs on a scratch copy that is
    /// only committed once every step, removals included, has succeeded.
    pub fn update(&mut self, mov: &Move, player: Player) -> Result<(), RuleError> {
        let mut next = *self;
        next.apply(mov, player)?;
        *self = next;
        Ok(())
    }

    /// Copy of this state after the player to move plays `mov`.
    pub fn play(&self, mov: &Move) -> Result<GameState, RuleError> {
        let mut next = *self;
        next.update(mov, self.turn)?;
        Ok(next)
    }

    fn apply(&mut self, mov: &Move, player: Player) -> Result<(), RuleError> {
        match *mov {
            Move::Place { to, .. } => {
                if self.reserve(player) < 1 {
                    return Err(RuleError::EmptyReserve(player));
                }
                self.set(to, player)?;
                self.reserve[player.index()] -= 1;
            }
            Move::Raise { from, to, .. } => {
                if to.layer <= from.layer {
                    return Err(RuleError::NotAscending { from, to });
                }
                self.remove_sphere(from, player)?;
                self.set(to, player)?;
            }
        }

        let removals = mov.removals();
        if !removals.is_empty() {
            if !self.creates_square(mov.to()) {
                return Err(RuleError::NoSquareFormed(mov.to()));
            }
            if removals.len() > MAX_REMOVALS {
                return Err(RuleError::TooManyRemovals(removals.len()));
            }
            for &coord in removals {
                self.remove_sphere(coord, player)?;
                self.reserve[player.index()] += 1;
            }
        }

        self.turn = self.turn.opponent();
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = |cell: Cell| cell.owner().map_or('_', Player::symbol);

        for layer in 0..LAYERS {
            let size = layer_size(layer);
            writeln!(f, " {}", "_".repeat(size * 2 - 1))?;
            for row in 0..size {
                write!(f, "|")?;
                for column in 0..size {
                    let coord = Coord::new(layer as i8, row as i8, column as i8);
                    let cell = self.safe_get(coord).unwrap_or(Cell::Empty);
                    write!(f, "{}|", symbol(cell))?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        for player in Player::both() {
            writeln!(f, "Reserve of {}:", player)?;
            for _ in 0..self.reserve(player) {
                write!(f, "{} ", player.symbol())?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }

        write!(f, "{} to play !", self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(layer: i8, row: i8, column: i8) -> Coord {
        Coord::new(layer, row, column)
    }

    /// Place spheres for `player` without caring about turn order.
    fn place_all(state: &mut GameState, player: Player, coords: &[Coord]) {
        for &coord in coords {
            state.update(&Move::place(coord), player).unwrap();
        }
    }

    /// Fill the whole base layer with alternating owners that never form a square.
    fn fill_base_checkerboard(state: &mut GameState) {
        for row in 0..4 {
            for column in 0..4 {
                let player = if (row + column) % 2 == 0 { Player::Light } else { Player::Dark };
                state.update(&Move::place(c(0, row, column)), player).unwrap();
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.reserves(), [15, 15]);
        assert_eq!(state.turn(), Player::Light);
        assert_eq!(state.spheres_on_board(), 0);
        assert_eq!(state.winner(), None);
        for coord in Coord::all() {
            assert_eq!(state.get(coord), Ok(Cell::Empty));
        }
    }

    #[test]
    fn test_get_out_of_bounds() {
        let state = GameState::new();
        for coord in [c(-1, 0, 0), c(0, -1, 0), c(0, 0, 4), c(2, 2, 0), c(4, 0, 0)] {
            assert_eq!(state.get(coord), Err(RuleError::OutOfBounds(coord)));
            assert_eq!(state.safe_get(coord), None);
        }
    }

    #[test]
    fn test_place_scenario() {
        let mut state = GameState::new();
        state.update(&Move::place(c(0, 0, 0)), Player::Light).unwrap();
        assert_eq!(state.get(c(0, 0, 0)), Ok(Cell::Occupied(Player::Light)));
        assert_eq!(state.reserves(), [14, 15]);
        assert_eq!(state.turn(), Player::Dark);
    }

    #[test]
    fn test_place_unsupported_leaves_state_unchanged() {
        let mut state = GameState::new();
        let before = state;
        let err = state.update(&Move::place(c(1, 0, 0)), Player::Light);
        assert_eq!(err, Err(RuleError::Unsupported(c(1, 0, 0))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_valid_position_occupied() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Light, &[c(0, 2, 2)]);
        assert_eq!(state.valid_position(c(0, 2, 2)), Err(RuleError::Occupied(c(0, 2, 2))));
    }

    #[test]
    fn test_valid_position_needs_all_four_supports() {
        let mut state = GameState::new();
        let supports = c(1, 0, 0).supports();
        for (i, &below) in supports.iter().enumerate() {
            assert_eq!(
                state.valid_position(c(1, 0, 0)),
                Err(RuleError::Unsupported(c(1, 0, 0))),
                "supported after only {} spheres",
                i
            );
            place_all(&mut state, Player::Dark, &[below]);
        }
        assert_eq!(state.valid_position(c(1, 0, 0)), Ok(()));
    }

    #[test]
    fn test_can_move_empty() {
        let state = GameState::new();
        assert_eq!(state.can_move(c(0, 1, 1)), Err(RuleError::Empty(c(0, 1, 1))));
    }

    #[test]
    fn test_can_move_blocked_iff_covered() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        for coord in Coord::all().filter(|c| c.layer == 0) {
            assert_eq!(state.can_move(coord), Ok(()));
        }

        state.update(&Move::place(c(1, 1, 1)), Player::Light).unwrap();
        for coord in Coord::all().filter(|c| c.layer == 0) {
            let covered = c(1, 1, 1).supports().contains(&coord);
            let result = state.can_move(coord);
            if covered {
                assert_eq!(result, Err(RuleError::Blocked(coord)));
            } else {
                assert_eq!(result, Ok(()));
            }
        }
        assert_eq!(state.can_move(c(1, 1, 1)), Ok(()));
    }

    #[test]
    fn test_place_empty_reserve() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        // Drain Light's reserve into the upper layers.
        let upper: Vec<Coord> = Coord::all().filter(|c| c.layer > 0).collect();
        for &coord in upper.iter().take(7) {
            state.update(&Move::place(coord), Player::Light).unwrap();
        }
        assert_eq!(state.reserve(Player::Light), 0);

        let before = state;
        let err = state.update(&Move::place(upper[7]), Player::Light);
        assert_eq!(err, Err(RuleError::EmptyReserve(Player::Light)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_creates_square() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Light, &[c(0, 1, 1), c(0, 1, 2), c(0, 2, 1)]);
        assert!(!state.creates_square(c(0, 1, 1)));

        place_all(&mut state, Player::Light, &[c(0, 2, 2)]);
        for coord in [c(0, 1, 1), c(0, 1, 2), c(0, 2, 1), c(0, 2, 2)] {
            assert!(state.creates_square(coord), "{} should be in the square", coord);
        }
        assert!(!state.creates_square(c(0, 0, 0)));
        assert!(!state.creates_square(c(0, 3, 3)));
    }

    #[test]
    fn test_creates_square_mixed_owners() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Light, &[c(0, 0, 0), c(0, 0, 1), c(0, 1, 0)]);
        place_all(&mut state, Player::Dark, &[c(0, 1, 1)]);
        assert!(!state.creates_square(c(0, 0, 0)));
        assert!(!state.creates_square(c(0, 1, 1)));
    }

    #[test]
    fn test_creates_square_at_board_edge() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Dark, &[c(0, 2, 2), c(0, 2, 3), c(0, 3, 2), c(0, 3, 3)]);
        assert!(state.creates_square(c(0, 3, 3)));
    }

    #[test]
    fn test_removals_need_a_square() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Light, &[c(0, 0, 0)]);

        let mov = Move::place(c(0, 1, 1)).with_removals(vec![c(0, 0, 0)]);
        let before = state;
        assert_eq!(state.update(&mov, Player::Light), Err(RuleError::NoSquareFormed(c(0, 1, 1))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_square_removals_restore_reserve() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Light, &[c(0, 0, 0), c(0, 0, 1), c(0, 1, 0)]);
        place_all(&mut state, Player::Dark, &[c(0, 3, 3)]);

        // Completing the square with a placement lets Light take two spheres back.
        let mov = Move::place(c(0, 1, 1)).with_removals(vec![c(0, 0, 0), c(0, 0, 1)]);
        let reserve_before = state.reserve(Player::Light);
        state.update(&mov, Player::Light).unwrap();

        assert_eq!(state.get(c(0, 0, 0)), Ok(Cell::Empty));
        assert_eq!(state.get(c(0, 0, 1)), Ok(Cell::Empty));
        assert_eq!(state.get(c(0, 1, 1)), Ok(Cell::Occupied(Player::Light)));
        // One sphere placed, two taken back.
        assert_eq!(state.reserve(Player::Light), reserve_before - 1 + 2);
        let reserves: u32 = state.reserves().iter().map(|&r| r as u32).sum();
        assert_eq!(state.spheres_on_board() + reserves, 30);
    }

    #[test]
    fn test_raise_with_removals_scenario() {
        let mut state = GameState::new();
        // Light square at the corner; Light also owns a spare sphere to raise.
        place_all(&mut state, Player::Light, &[c(0, 0, 0), c(0, 0, 1), c(0, 1, 0), c(0, 1, 1)]);
        place_all(&mut state, Player::Light, &[c(0, 3, 0)]);
        // Support for (1, 1, 2): (0,1,2) (0,2,2) (0,2,3) (0,1,3)
        place_all(&mut state, Player::Dark, &[c(0, 1, 2), c(0, 2, 2), c(0, 2, 3), c(0, 1, 3)]);
        // Light spheres next to (1, 1, 2) on layer 1 so the raise completes a square there:
        // (1,0,1) (1,0,2) (1,1,1) need support from layer 0.
        place_all(&mut state, Player::Dark, &[c(0, 0, 2), c(0, 0, 3), c(0, 2, 0), c(0, 2, 1)]);
        place_all(&mut state, Player::Light, &[c(1, 0, 1), c(1, 0, 2), c(1, 1, 1)]);

        let reserve_before = state.reserve(Player::Light);
        let raise = Move::raise(c(0, 3, 0), c(1, 1, 2)).with_removals(vec![c(1, 0, 1), c(1, 0, 2)]);
        state.update(&raise, Player::Light).unwrap();

        assert_eq!(state.get(c(0, 3, 0)), Ok(Cell::Empty));
        assert_eq!(state.get(c(1, 1, 2)), Ok(Cell::Occupied(Player::Light)));
        assert_eq!(state.get(c(1, 0, 1)), Ok(Cell::Empty));
        assert_eq!(state.get(c(1, 0, 2)), Ok(Cell::Empty));
        assert_eq!(state.reserve(Player::Light), reserve_before + 2);
        let on_board = state.spheres_on_board();
        assert_eq!(on_board + state.reserve(Player::Light) as u32 + state.reserve(Player::Dark) as u32, 30);
    }

    #[test]
    fn test_too_many_removals() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Light, &[c(0, 0, 0), c(0, 0, 1), c(0, 1, 0), c(0, 3, 3)]);

        let mov = Move::place(c(0, 1, 1))
            .with_removals(vec![c(0, 0, 0), c(0, 0, 1), c(0, 3, 3)]);
        let before = state;
        assert_eq!(state.update(&mov, Player::Light), Err(RuleError::TooManyRemovals(3)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_failed_second_removal_is_atomic() {
        let mut state = GameState::new();
        place_all(&mut state, Player::Light, &[c(0, 0, 0), c(0, 0, 1), c(0, 1, 0)]);
        place_all(&mut state, Player::Dark, &[c(0, 3, 3)]);

        // The second removal targets an opponent sphere: nothing may be applied.
        let mov = Move::place(c(0, 1, 1)).with_removals(vec![c(0, 0, 0), c(0, 3, 3)]);
        let before = state;
        assert_eq!(state.update(&mov, Player::Light), Err(RuleError::NotOwner(c(0, 3, 3))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_raise_must_ascend() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        state.update(&Move::place(c(1, 0, 0)), Player::Light).unwrap();

        let before = state;
        let mov = Move::raise(c(1, 0, 0), c(0, 0, 0));
        assert_eq!(
            state.update(&mov, Player::Light),
            Err(RuleError::NotAscending { from: c(1, 0, 0), to: c(0, 0, 0) })
        );
        let mov = Move::raise(c(0, 3, 3), c(0, 2, 2));
        assert!(matches!(state.update(&mov, Player::Light), Err(RuleError::NotAscending { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn test_raise_onto_own_support_rolls_back() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);

        // (0, 0, 0) supports (1, 0, 0): lifting it makes the destination unstable.
        let before = state;
        let mov = Move::raise(c(0, 0, 0), c(1, 0, 0));
        assert_eq!(state.update(&mov, Player::Light), Err(RuleError::Unsupported(c(1, 0, 0))));
        assert_eq!(state, before);
        assert_eq!(state.get(c(0, 0, 0)), Ok(Cell::Occupied(Player::Light)));
    }

    #[test]
    fn test_raise_keeps_reserve() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        let reserve = state.reserves();

        // (0, 3, 3) is Light and does not support (1, 0, 0).
        state.update(&Move::raise(c(0, 3, 3), c(1, 0, 0)), Player::Light).unwrap();
        assert_eq!(state.reserves(), reserve);
        assert_eq!(state.get(c(0, 3, 3)), Ok(Cell::Empty));
        assert_eq!(state.get(c(1, 0, 0)), Ok(Cell::Occupied(Player::Light)));
    }

    #[test]
    fn test_raise_opponent_sphere() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        let mov = Move::raise(c(0, 3, 2), c(1, 0, 0));
        assert_eq!(state.update(&mov, Player::Light), Err(RuleError::NotOwner(c(0, 3, 2))));
    }

    #[test]
    fn test_remove_sphere_checks() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        state.update(&Move::place(c(1, 0, 0)), Player::Light).unwrap();

        assert_eq!(state.remove_sphere(c(0, 0, 0), Player::Light), Err(RuleError::Blocked(c(0, 0, 0))));
        assert_eq!(state.remove_sphere(c(0, 3, 2), Player::Light), Err(RuleError::NotOwner(c(0, 3, 2))));
        assert_eq!(state.remove_sphere(c(2, 0, 0), Player::Light), Err(RuleError::Empty(c(2, 0, 0))));
        assert_eq!(state.remove_sphere(c(1, 0, 0), Player::Light), Ok(()));
        assert_eq!(state.get(c(1, 0, 0)), Ok(Cell::Empty));
    }

    #[test]
    fn test_winner_direction() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        for coord in Coord::all().filter(|c| c.layer > 0).take(7) {
            state.update(&Move::place(coord), Player::Light).unwrap();
        }
        assert_eq!(state.reserve(Player::Light), 0);
        assert_eq!(state.winner(), Some(Player::Dark));
    }

    #[test]
    fn test_winner_undecided_with_spheres_left() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        assert_eq!(state.reserves(), [7, 7]);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_turn_flips_for_every_update() {
        let mut state = GameState::new();
        state.update(&Move::place(c(0, 0, 0)), Player::Light).unwrap();
        assert_eq!(state.turn(), Player::Dark);
        state.update(&Move::place(c(0, 0, 1)), Player::Dark).unwrap();
        assert_eq!(state.turn(), Player::Light);
    }

    #[test]
    fn test_play_uses_turn_and_leaves_self_untouched() {
        let state = GameState::new();
        let next = state.play(&Move::place(c(0, 2, 2))).unwrap();
        assert_eq!(next.get(c(0, 2, 2)), Ok(Cell::Occupied(Player::Light)));
        assert_eq!(state.get(c(0, 2, 2)), Ok(Cell::Empty));
    }

    #[test]
    fn test_from_parts_rejects_floating_sphere() {
        let mut board = Board::new();
        board.set_cell(c(1, 0, 0).index().unwrap(), Cell::Occupied(Player::Light));
        let err = GameState::from_parts(board, [14, 15], Player::Dark);
        assert!(matches!(err, Err(RuleError::InvalidState(_))));
    }

    #[test]
    fn test_from_parts_rejects_bad_reserve() {
        let err = GameState::from_parts(Board::new(), [15, 14], Player::Light);
        assert!(matches!(err, Err(RuleError::InvalidState(_))));
    }

    #[test]
    fn test_from_parts_accepts_reachable_state() {
        let mut state = GameState::new();
        fill_base_checkerboard(&mut state);
        state.update(&Move::place(c(1, 2, 2)), Player::Light).unwrap();
        let rebuilt = GameState::from_parts(*state.board(), state.reserves(), state.turn());
        assert_eq!(rebuilt, Ok(state));
    }

    #[test]
    fn test_display_layout() {
        let mut state = GameState::new();
        state.update(&Move::place(c(0, 0, 0)), Player::Light).unwrap();
        let text = state.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(" _______"));
        assert_eq!(lines.next(), Some("|@|_|_|_|"));
        assert!(text.contains(&format!("Reserve of Light:\n{}\n", "@ ".repeat(14))));
        assert!(text.contains(&format!("Reserve of Dark:\n{}\n", "O ".repeat(15))));
        assert!(text.ends_with("Dark to play !"));
    }
}
