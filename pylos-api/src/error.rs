use std::path::PathBuf;

use pylos_advisor::AdvisorError;
use pylos_core::{Player, RuleError};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Reasons the server refuses a join or a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("the game already has two players")]
    TableFull,

    #[error("waiting for a second player")]
    NotStarted,

    #[error("the game is over, {0} won")]
    GameOver(Player),

    #[error("it is {turn}'s turn, not {player}'s")]
    NotYourTurn { player: Player, turn: Player },

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Errors that end a client session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server refused the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("server sent an invalid game state: {0}")]
    InvalidState(#[from] RuleError),

    #[error("advisor error: {0}")]
    Advisor(#[from] AdvisorError),

    #[error("advisor task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
