//! The authoritative game held by the server.

use pylos_core::movegen::all_moves;
use pylos_core::{GameState, Move, Player};

use crate::error::SessionError;

/// A move that was applied, with the player who made it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub player: Player,
    pub mov: Move,
}

/// One game between two named players.
#[derive(Debug, Default)]
pub struct GameSession {
    state: GameState,
    players: [Option<String>; 2],
    history: Vec<HistoryEntry>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn players(&self) -> &[Option<String>; 2] {
        &self.players
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Both seats are taken.
    pub fn started(&self) -> bool {
        self.players.iter().all(Option::is_some)
    }

    /// Seat a player: the first to join plays Light, the second Dark.
    pub fn join(&mut self, name: &str) -> Result<Player, SessionError> {
        let seat = self
            .players
            .iter()
            .position(Option::is_none)
            .ok_or(SessionError::TableFull)?;
        self.players[seat] = Some(name.to_string());
        Player::from_index(seat as u8).ok_or(SessionError::TableFull)
    }

    /// Legal moves for the player to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.winner().is_some() {
            return Vec::new();
        }
        all_moves(&self.state, self.state.turn())
    }

    /// Apply `mov` on behalf of `player`.
    ///
    /// Nothing changes on error.
    pub fn submit(&mut self, player: Player, mov: Move) -> Result<(), SessionError> {
        if !self.started() {
            return Err(SessionError::NotStarted);
        }
        if let Some(winner) = self.state.winner() {
            return Err(SessionError::GameOver(winner));
        }
        let turn = self.state.turn();
        if player != turn {
            return Err(SessionError::NotYourTurn { player, turn });
        }

        self.state.update(&mov, player)?;
        self.history.push(HistoryEntry { player, mov });
        Ok(())
    }

    /// Start over with the same players.
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.history.clear();
    }
}
