//! JSON wire models exchanged between server and clients.
//!
//! ```text
//! move:  {"move": "place", "to": [l, r, c]}
//!        {"move": "move", "from": [l, r, c], "to": [l, r, c]}
//!        either may carry "remove": [[l, r, c], ...]
//! state: {"board": [layer0, layer1, layer2, layer3], "reserve": [n0, n1], "turn": 0|1}
//! ```
//!
//! Each layer is a list of rows, each row a list of cells, and each cell is
//! `null` or the owning player id.

use serde::{Deserialize, Serialize};

use crate::{layer_size, Board, Cell, Coord, GameState, Move, Player, RuleError, LAYERS};

/// Game state as seen by clients.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct VisibleState {
    pub board: Vec<Vec<Vec<Option<Player>>>>,
    pub reserve: [u8; 2],
    pub turn: Player,
}

impl From<&GameState> for VisibleState {
    fn from(state: &GameState) -> Self {
        let board = (0..LAYERS)
            .map(|layer| {
                let size = layer_size(layer);
                (0..size)
                    .map(|row| {
                        (0..size)
                            .map(|column| {
                                let coord = Coord::new(layer as i8, row as i8, column as i8);
                                state.safe_get(coord).and_then(Cell::owner)
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        VisibleState {
            board,
            reserve: state.reserves(),
            turn: state.turn(),
        }
    }
}

impl TryFrom<VisibleState> for GameState {
    type Error = RuleError;

    fn try_from(visible: VisibleState) -> Result<Self, Self::Error> {
        if visible.board.len() != LAYERS {
            return Err(RuleError::InvalidState(format!(
                "expected {} layers, got {}",
                LAYERS,
                visible.board.len()
            )));
        }

        let mut board = Board::new();
        for (layer, rows) in visible.board.iter().enumerate() {
            let size = layer_size(layer);
            if rows.len() != size || rows.iter().any(|row| row.len() != size) {
                return Err(RuleError::InvalidState(format!(
                    "layer {} must be {}x{}",
                    layer, size, size
                )));
            }
            for (row, cells) in rows.iter().enumerate() {
                for (column, cell) in cells.iter().enumerate() {
                    if let (Some(player), Some(idx)) = (
                        cell,
                        Coord::new(layer as i8, row as i8, column as i8).index(),
                    ) {
                        board.set_cell(idx, Cell::Occupied(*player));
                    }
                }
            }
        }

        GameState::from_parts(board, visible.reserve, visible.turn)
    }
}

impl Move {
    /// Decode a move, reporting any decode failure as `MalformedMove`.
    pub fn from_json(text: &str) -> Result<Move, RuleError> {
        serde_json::from_str(text).map_err(|e| RuleError::MalformedMove(e.to_string()))
    }

    /// Decode a move from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Move, RuleError> {
        serde_json::from_value(value).map_err(|e| RuleError::MalformedMove(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl GameState {
    /// Decode a visible state and check it against the board invariants.
    pub fn from_json(text: &str) -> Result<GameState, RuleError> {
        let visible: VisibleState =
            serde_json::from_str(text).map_err(|e| RuleError::InvalidState(e.to_string()))?;
        GameState::try_from(visible)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&VisibleState::from(self))
    }
}
