//! Automated player that connects to a game server.

use std::time::Duration;

use pylos_advisor::{advise, AdvisorConfig, AvoidList};
use pylos_core::{GameState, Move, Player};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ClientError;
use crate::models::{ErrorModel, GameModel, JoinRequest, JoinResponse};

/// What one look at the server led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Not our move yet, or the opponent has not joined.
    Waiting,
    Played(Move),
    Finished(Player),
}

pub struct Client {
    http: reqwest::Client,
    base_url: String,
    name: String,
    player: Option<Player>,
    advisor: AdvisorConfig,
    avoid: AvoidList,
    poll_interval: Duration,
}

impl Client {
    pub fn new(
        base_url: impl Into<String>,
        name: impl Into<String>,
        advisor: AdvisorConfig,
        poll_interval: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            name: name.into(),
            player: None,
            advisor,
            avoid: AvoidList::new(),
            poll_interval,
        }
    }

    pub fn player(&self) -> Option<Player> {
        self.player
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Take a seat at the server's table.
    pub async fn join(&mut self) -> Result<Player, ClientError> {
        let response = self
            .http
            .post(self.url("/join"))
            .json(&JoinRequest {
                name: self.name.clone(),
            })
            .send()
            .await?;
        let joined: JoinResponse = decode(response).await?;
        log::info!("{} joined as {}", self.name, joined.player);
        self.player = Some(joined.player);
        self.avoid.clear();
        Ok(joined.player)
    }

    pub async fn game(&self) -> Result<GameModel, ClientError> {
        let response = self.http.get(self.url("/game")).send().await?;
        decode(response).await
    }

    /// Look at the game once and move if it is our turn.
    pub async fn play_turn(&mut self) -> Result<Turn, ClientError> {
        let player = match self.player {
            Some(player) => player,
            None => self.join().await?,
        };

        let game = self.game().await?;
        if let Some(winner) = game.winner {
            return Ok(Turn::Finished(winner));
        }
        if !game.started || game.state.turn != player {
            return Ok(Turn::Waiting);
        }

        let state = GameState::try_from(game.state)?;
        // The search is CPU-bound; keep it off the async workers.
        let mut avoid = std::mem::take(&mut self.avoid);
        let config = self.advisor.clone();
        let (advice, avoid) = tokio::task::spawn_blocking(move || {
            let advice = advise(&state, &mut avoid, &config);
            (advice, avoid)
        })
        .await?;
        self.avoid = avoid;
        let advice = advice?;
        log::debug!(
            "{} chose {} after {} nodes",
            self.name,
            advice.mov,
            advice.stats.nodes_expanded
        );

        let response = self
            .http
            .post(self.url("/move"))
            .json(&json!({ "player": player, "move": advice.mov }))
            .send()
            .await?;
        let _: GameModel = decode(response).await?;
        log::info!("{} played {}", self.name, advice.mov);
        Ok(Turn::Played(advice.mov))
    }

    /// Join, then play until the server reports a winner.
    pub async fn run(&mut self) -> Result<Player, ClientError> {
        if self.player.is_none() {
            self.join().await?;
        }
        loop {
            match self.play_turn().await? {
                Turn::Finished(winner) => {
                    if Some(winner) == self.player {
                        log::info!("{} won", self.name);
                    } else {
                        log::info!("{} lost, {} won", self.name, winner);
                    }
                    return Ok(winner);
                }
                Turn::Played(_) => {}
                Turn::Waiting => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}

/// Decode a success body, or turn the server's `{"detail"}` into an error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let detail = match response.json::<ErrorModel>().await {
        Ok(body) => body.detail,
        Err(_) => status.to_string(),
    };
    Err(ClientError::Rejected {
        status: status.as_u16(),
        detail,
    })
}
