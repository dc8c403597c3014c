//! HTTP server exposing per-session games.
//!
//! Routes are a thin layer over [`SessionManager`]; all validation lives
//! in the game rules.

use crate::config::ServerConfig;
use crate::games::sticks::{Move, MoveError, RoundOutcome, StateView};
use crate::session::{SessionError, SessionManager};
use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Body for starting a new game. `rows` falls back to the server ladder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGameRequest {
    /// Row lengths for this game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<usize>>,
}

/// Body for a human move.
///
/// Either an explicit range or the raw picks a client collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveRequest {
    /// Take `count` sticks from `row` starting at `start`.
    Range {
        /// Target row.
        row: usize,
        /// First stick.
        start: usize,
        /// Number of sticks.
        count: usize,
    },
    /// Take exactly the picked `(row, index)` sticks.
    Selection {
        /// Picked sticks.
        picks: Vec<(usize, usize)>,
    },
}

impl MoveRequest {
    /// Resolves the request into a single-row contiguous move.
    #[instrument]
    pub fn into_move(self) -> Result<Move, MoveError> {
        match self {
            MoveRequest::Range { row, start, count } => Ok(Move::new(row, start, count)),
            MoveRequest::Selection { picks } => Move::from_selection(&picks),
        }
    }
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        MoveRequest::Range {
            row: mv.row,
            start: mv.start,
            count: mv.count,
        }
    }
}

/// Response for a full round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    /// State after both moves.
    pub state: StateView,
    /// The human move that was applied.
    pub human: Move,
    /// The opponent's reply, if any.
    pub computer: Option<Move>,
}

/// Error body returned on every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable snake_case error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Failure surfaced by a route.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// Session-layer error.
    #[display("{}", _0)]
    Session(SessionError),

    /// Malformed request body.
    #[display("Bad request: {}", _0)]
    #[from(ignore)]
    BadRequest(String),
}

impl From<MoveError> for ApiError {
    fn from(err: MoveError) -> Self {
        ApiError::Session(SessionError::Move(err))
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Session(SessionError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Session(SessionError::Ladder(_)) => (StatusCode::BAD_REQUEST, "invalid_ladder"),
            ApiError::Session(SessionError::Move(e)) => {
                let status = match e {
                    MoveError::OutOfTurn(_) | MoveError::GameOver => StatusCode::CONFLICT,
                    MoveError::InvalidRow { .. }
                    | MoveError::InvalidRange(_)
                    | MoveError::SticksUnavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    MoveError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.kind())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        warn!(status = %status, error = kind, message = %self, "Request failed");
        let body = ErrorBody {
            error: kind.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router over shared sessions.
#[instrument(skip(sessions))]
pub fn router(sessions: SessionManager) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sessions", get(list_sessions))
        .route("/sessions/{id}/new-game", post(new_game))
        .route("/sessions/{id}/state", get(get_state))
        .route("/sessions/{id}/move", post(human_move))
        .route("/sessions/{id}/computer-move", post(computer_move))
        .route("/sessions/{id}/round", post(round))
        .layer(ServiceBuilder::new().map_request(|req: Request| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(sessions)
}

/// Decodes a JSON request body, reporting failures as `bad_request`.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(sessions))]
async fn list_sessions(State(sessions): State<SessionManager>) -> Json<Vec<String>> {
    Json(sessions.list_sessions())
}

#[instrument(skip(sessions, body))]
async fn new_game(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<StateView>, ApiError> {
    let request: NewGameRequest = if body.is_empty() {
        NewGameRequest::default()
    } else {
        parse_body(&body)?
    };

    let state = sessions.new_game(&id, request.rows)?;
    Ok(Json(StateView::new(&state, sessions.win_condition())))
}

#[instrument(skip(sessions))]
async fn get_state(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
) -> Json<StateView> {
    let state = sessions.state(&id);
    Json(StateView::new(&state, sessions.win_condition()))
}

#[instrument(skip(sessions, body))]
async fn human_move(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<StateView>, ApiError> {
    let mv = parse_body::<MoveRequest>(&body)?.into_move()?;
    let state = sessions.human_move(&id, mv)?;
    Ok(Json(StateView::new(&state, sessions.win_condition())))
}

#[instrument(skip(sessions))]
async fn computer_move(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
) -> Result<Json<StateView>, ApiError> {
    let state = sessions.computer_move(&id)?;
    Ok(Json(StateView::new(&state, sessions.win_condition())))
}

#[instrument(skip(sessions, body))]
async fn round(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<RoundView>, ApiError> {
    let mv = parse_body::<MoveRequest>(&body)?.into_move()?;
    let RoundOutcome {
        state,
        human,
        computer,
    } = sessions.round(&id, mv)?;

    Ok(Json(RoundView {
        state: StateView::new(&state, sessions.win_condition()),
        human,
        computer,
    }))
}

/// Runs the HTTP server until Ctrl+C.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let sessions = SessionManager::with_rules(config.rows().clone(), *config.win_condition())?;
    let app = router(sessions);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
