//! Request and response bodies of the game server.

use pylos_core::{Move, Player, VisibleState};
use serde::{Deserialize, Serialize};

use crate::session::GameSession;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub player: Player,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameModel {
    pub state: VisibleState,
    pub players: [Option<String>; 2],
    pub started: bool,
    pub winner: Option<Player>,
    pub move_count: usize,
}

impl From<&GameSession> for GameModel {
    fn from(session: &GameSession) -> Self {
        GameModel {
            state: VisibleState::from(session.state()),
            players: session.players().clone(),
            started: session.started(),
            winner: session.state().winner(),
            move_count: session.history().len(),
        }
    }
}

/// The move stays raw JSON so a bad shape is reported as a rule error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub player: Player,
    #[serde(rename = "move")]
    pub mov: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryModel {
    pub index: usize,
    pub player: Player,
    #[serde(rename = "move")]
    pub mov: Move,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthModel {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorModel {
    pub detail: String,
}
