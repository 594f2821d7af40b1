//! HTTP game server.
//!
//! One [`GameSession`] is shared by every request. Handlers lock it, do their
//! synchronous work and release it before responding.
//!
//! Endpoints:
//! - `GET  /health`   liveness probe
//! - `POST /join`     take the next free seat
//! - `GET  /game`     current game view
//! - `GET  /moves`    legal moves for the player to move
//! - `POST /move`     play a move
//! - `GET  /history`  moves played so far
//! - `POST /reset`    new game, same players

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pylos_core::Move;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::models::{
    ErrorModel, GameModel, HealthModel, HistoryEntryModel, JoinRequest, JoinResponse, MoveRequest,
};
use crate::session::GameSession;

// =============================================================================
// App State
// =============================================================================

pub struct AppStateInner {
    session: Mutex<GameSession>,
}

pub type AppState = Arc<AppStateInner>;

pub fn new_state() -> AppState {
    Arc::new(AppStateInner {
        session: Mutex::new(GameSession::new()),
    })
}

impl AppStateInner {
    // Session updates are atomic, so a poisoned lock still guards a valid game.
    fn session(&self) -> MutexGuard<'_, GameSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type ApiError = (StatusCode, Json<ErrorModel>);

fn session_error(err: SessionError) -> ApiError {
    let status = match err {
        SessionError::Rule(_) => StatusCode::BAD_REQUEST,
        SessionError::TableFull
        | SessionError::NotStarted
        | SessionError::GameOver(_)
        | SessionError::NotYourTurn { .. } => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ErrorModel {
            detail: err.to_string(),
        }),
    )
}

// =============================================================================
// Handlers
// =============================================================================

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

async fn join(
    State(state): State<AppState>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, ApiError> {
    let mut session = state.session();
    let player = session.join(&req.name).map_err(|e| {
        log::warn!("{} cannot join: {}", req.name, e);
        session_error(e)
    })?;
    log::info!("{} joined as {}", req.name, player);
    if session.started() {
        log::info!("both players are here, the game starts");
    }
    Ok(Json(JoinResponse {
        player,
        name: req.name,
    }))
}

async fn get_game(State(state): State<AppState>) -> Json<GameModel> {
    let session = state.session();
    Json(GameModel::from(&*session))
}

async fn get_moves(State(state): State<AppState>) -> Json<Vec<Move>> {
    let session = state.session();
    Json(session.legal_moves())
}

async fn make_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameModel>, ApiError> {
    let mov = Move::from_value(req.mov).map_err(|e| session_error(e.into()))?;

    let mut session = state.session();
    if let Err(e) = session.submit(req.player, mov.clone()) {
        log::warn!("{} played {}: {}", req.player, mov, e);
        return Err(session_error(e));
    }
    log::info!("{} played {}", req.player, mov);
    log::debug!("\n{}", session.state());
    if let Some(winner) = session.state().winner() {
        log::info!("{} wins after {} moves", winner, session.history().len());
    }
    Ok(Json(GameModel::from(&*session)))
}

async fn get_history(State(state): State<AppState>) -> Json<Vec<HistoryEntryModel>> {
    let session = state.session();
    let moves = session
        .history()
        .iter()
        .enumerate()
        .map(|(i, entry)| HistoryEntryModel {
            index: i + 1,
            player: entry.player,
            mov: entry.mov.clone(),
        })
        .collect();
    Json(moves)
}

async fn reset_game(State(state): State<AppState>) -> Json<GameModel> {
    let mut session = state.session();
    session.reset();
    log::info!("game reset");
    Json(GameModel::from(&*session))
}

// =============================================================================
// Router
// =============================================================================

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/join", post(join))
        .route("/game", get(get_game))
        .route("/moves", get(get_moves))
        .route("/move", post(make_move))
        .route("/history", get(get_history))
        .route("/reset", post(reset_game))
        .layer(cors)
        .with_state(state)
}

/// Serve a fresh game on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    let app = router(new_state());
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("shutting down");
            }
        })
        .await
}

pub async fn run(config: &ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    log::info!("server running on http://{}", listener.local_addr()?);
    serve(listener).await
}
