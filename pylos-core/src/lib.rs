//! Pylos game logic with bit-based board representation.
//!
//! # Board Encoding (64-bit)
//!
//! ```text
//! Bits 0-59:  Board state (30 cells × 2 bits per cell)
//! Bits 60-63: Unused (always zero)
//!
//! Each cell (2 bits):
//!   0 = empty, 1 = Light (player 0), 2 = Dark (player 1)
//!
//! Cells are stored layer-major, then row-major:
//!   layer 0 (4×4): cells  0-15
//!   layer 1 (3×3): cells 16-24
//!   layer 2 (2×2): cells 25-28
//!   layer 3 (1×1): cell  29
//! ```
//!
//! Reserves and the player to move live next to the board in [`GameState`],
//! which is `Copy` so search code can branch on plain values.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod error;
pub mod movegen;
pub mod state;
pub mod wire;

pub use error::RuleError;
pub use state::GameState;
pub use wire::VisibleState;

/// Number of layers in the pyramid.
pub const LAYERS: usize = 4;

/// Total number of cells on the board (16 + 9 + 4 + 1).
pub const CELLS: usize = 30;

/// Spheres each player starts with.
pub const SPHERES_PER_PLAYER: u8 = 15;

/// Maximum number of spheres that may be taken back after forming a square.
pub const MAX_REMOVALS: usize = 2;

/// First cell index of each layer.
const LAYER_OFFSETS: [usize; LAYERS] = [0, 16, 25, 29];

/// Side length of a layer: layer `i` is a `(4 - i) × (4 - i)` grid.
#[inline]
pub const fn layer_size(layer: usize) -> usize {
    LAYERS - layer
}

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Player {
    /// Player 0, drawn as `@`.
    Light = 0,
    /// Player 1, drawn as `O`.
    Dark = 1,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Light => Player::Dark,
            Player::Dark => Player::Light,
        }
    }

    /// Index into per-player arrays (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert from a player id (0 or 1).
    #[inline]
    pub fn from_index(idx: u8) -> Option<Player> {
        match idx {
            0 => Some(Player::Light),
            1 => Some(Player::Dark),
            _ => None,
        }
    }

    /// Symbol used by the console renderer.
    pub fn symbol(self) -> char {
        match self {
            Player::Light => '@',
            Player::Dark => 'O',
        }
    }

    pub fn both() -> impl Iterator<Item = Player> {
        [Player::Light, Player::Dark].into_iter()
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Player::from_index(value).ok_or_else(|| format!("invalid player id {}", value))
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player as u8
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Light => write!(f, "Light"),
            Player::Dark => write!(f, "Dark"),
        }
    }
}

/// Content of a single board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    #[inline]
    fn from_bits(bits: u64) -> Cell {
        match bits {
            1 => Cell::Occupied(Player::Light),
            2 => Cell::Occupied(Player::Dark),
            _ => Cell::Empty,
        }
    }

    #[inline]
    fn to_bits(self) -> u64 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(player) => player as u64 + 1,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The player owning the sphere in this cell, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// Board coordinate `(layer, row, column)`.
///
/// Components are signed so neighbor probing (`row - 1`, `column - 1`) and
/// negative input from the wire can be represented and rejected as
/// [`RuleError::OutOfBounds`] instead of wrapping.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i8; 3]", into = "[i8; 3]")]
pub struct Coord {
    pub layer: i8,
    pub row: i8,
    pub column: i8,
}

impl Coord {
    #[inline]
    pub const fn new(layer: i8, row: i8, column: i8) -> Coord {
        Coord { layer, row, column }
    }

    /// Shift by the given deltas. The result may be off the board.
    #[inline]
    pub const fn offset(self, layer: i8, row: i8, column: i8) -> Coord {
        Coord {
            layer: self.layer + layer,
            row: self.row + row,
            column: self.column + column,
        }
    }

    /// Cell index on the packed board, or None if outside the pyramid.
    #[inline]
    pub fn index(self) -> Option<usize> {
        if self.layer < 0 || self.row < 0 || self.column < 0 {
            return None;
        }
        let layer = self.layer as usize;
        if layer >= LAYERS {
            return None;
        }
        let size = layer_size(layer);
        let (row, column) = (self.row as usize, self.column as usize);
        if row >= size || column >= size {
            return None;
        }
        Some(LAYER_OFFSETS[layer] + row * size + column)
    }

    /// Check if this coordinate lies on the board.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.index().is_some()
    }

    /// The four cells a sphere at this coordinate rests on (one layer down).
    pub fn supports(self) -> [Coord; 4] {
        [
            self.offset(-1, 0, 0),
            self.offset(-1, 1, 0),
            self.offset(-1, 1, 1),
            self.offset(-1, 0, 1),
        ]
    }

    /// The four cells one layer up that could rest on this coordinate.
    pub fn supported(self) -> [Coord; 4] {
        [
            self.offset(1, 0, 0),
            self.offset(1, -1, 0),
            self.offset(1, -1, -1),
            self.offset(1, 0, -1),
        ]
    }

    /// Iterate over all 30 board coordinates, layer by layer, row-major.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..LAYERS).flat_map(|layer| {
            let size = layer_size(layer);
            (0..size * size).map(move |i| {
                Coord::new(layer as i8, (i / size) as i8, (i % size) as i8)
            })
        })
    }
}

impl From<[i8; 3]> for Coord {
    fn from([layer, row, column]: [i8; 3]) -> Coord {
        Coord { layer, row, column }
    }
}

impl From<Coord> for [i8; 3] {
    fn from(coord: Coord) -> [i8; 3] {
        [coord.layer, coord.row, coord.column]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.layer, self.row, self.column)
    }
}

/// A move in the game.
///
/// Serializes to the wire format
/// `{"move": "place", "to": [l, r, c]}` or
/// `{"move": "move", "from": [l, r, c], "to": [l, r, c]}`,
/// optionally with `"remove": [[l, r, c], ...]`.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "lowercase")]
pub enum Move {
    /// Place a sphere from the reserve onto the board.
    Place {
        to: Coord,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        remove: Vec<Coord>,
    },
    /// Lift one of your spheres to a strictly higher layer.
    #[serde(rename = "move")]
    Raise {
        from: Coord,
        to: Coord,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        remove: Vec<Coord>,
    },
}

impl Move {
    pub fn place(to: Coord) -> Move {
        Move::Place { to, remove: Vec::new() }
    }

    pub fn raise(from: Coord, to: Coord) -> Move {
        Move::Raise { from, to, remove: Vec::new() }
    }

    /// Attach the spheres to take back after completing a square.
    pub fn with_removals(mut self, removals: Vec<Coord>) -> Move {
        match &mut self {
            Move::Place { remove, .. } | Move::Raise { remove, .. } => *remove = removals,
        }
        self
    }

    /// Get the destination of the move.
    #[inline]
    pub fn to(&self) -> Coord {
        match self {
            Move::Place { to, .. } | Move::Raise { to, .. } => *to,
        }
    }

    /// Get the origin of a raise, None for placements.
    #[inline]
    pub fn from(&self) -> Option<Coord> {
        match self {
            Move::Place { .. } => None,
            Move::Raise { from, .. } => Some(*from),
        }
    }

    /// Spheres taken back by this move.
    #[inline]
    pub fn removals(&self) -> &[Coord] {
        match self {
            Move::Place { remove, .. } | Move::Raise { remove, .. } => remove,
        }
    }

    #[inline]
    pub fn is_place(&self) -> bool {
        matches!(self, Move::Place { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { to, .. } => write!(f, "place {}", to)?,
            Move::Raise { from, to, .. } => write!(f, "move {} -> {}", from, to)?,
        }
        let removals = self.removals();
        if !removals.is_empty() {
            write!(f, " remove")?;
            for coord in removals {
                write!(f, " {}", coord)?;
            }
        }
        Ok(())
    }
}

/// Compact board state - fits in a single u64.
///
/// See module documentation for encoding details. The board does no rule
/// checking; that is the job of [`GameState`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Board(pub u64);

impl Board {
    /// Bits per cell.
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u64 = 0b11;

    /// Create a new empty board.
    #[inline]
    pub fn new() -> Board {
        Board(0)
    }

    /// Get the raw u64 encoding.
    #[inline]
    pub fn to_u64(self) -> u64 {
        self.0
    }

    /// Get the cell at a packed index (0-29).
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        debug_assert!(idx < CELLS);
        Cell::from_bits((self.0 >> (idx as u32 * Self::CELL_BITS)) & Self::CELL_MASK)
    }

    /// Overwrite the cell at a packed index (0-29).
    #[inline]
    pub fn set_cell(&mut self, idx: usize, cell: Cell) {
        debug_assert!(idx < CELLS);
        let shift = idx as u32 * Self::CELL_BITS;
        self.0 = (self.0 & !(Self::CELL_MASK << shift)) | (cell.to_bits() << shift);
    }

    /// Get the cell at a coordinate, None if the coordinate is off the board.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        coord.index().map(|idx| self.cell(idx))
    }

    /// Count spheres on the board, for both players.
    pub fn spheres(&self) -> u32 {
        (0..CELLS).filter(|&idx| !self.cell(idx).is_empty()).count() as u32
    }

    /// Count spheres of one player on the board.
    pub fn spheres_of(&self, player: Player) -> u32 {
        (0..CELLS)
            .filter(|&idx| self.cell(idx) == Cell::Occupied(player))
            .count() as u32
    }
}
