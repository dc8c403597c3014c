//! Type-safe HTTP client for the game server's REST API.

use crate::games::sticks::StateView;
use crate::server::{ErrorBody, MoveRequest, NewGameRequest, RoundView};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Error talking to the game server.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[display("HTTP error: {}", _0)]
    Http(reqwest::Error),

    /// The server rejected the request.
    #[display("Server error ({}): {}", status, message)]
    #[from(ignore)]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error kind reported by the server.
        kind: String,
        /// Message reported by the server.
        message: String,
    },
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Server { .. } => None,
        }
    }
}

/// HTTP game client bound to a single session.
#[derive(Debug, Clone)]
pub struct RestGameClient {
    base_url: String,
    session_id: String,
    client: reqwest::Client,
}

impl RestGameClient {
    /// Creates a client for `session_id` on the server at `base_url`.
    #[instrument]
    pub fn new(base_url: String, session_id: String) -> Self {
        info!("Creating REST client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_id,
            client: reqwest::Client::new(),
        }
    }

    /// Session this client plays in.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn url(&self, action: &str) -> String {
        format!("{}/sessions/{}/{}", self.base_url, self.session_id, action)
    }

    /// Starts a new game, optionally with a custom ladder.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn new_game(&self, rows: Option<Vec<usize>>) -> Result<StateView, ClientError> {
        let response = self
            .client
            .post(self.url("new-game"))
            .json(&NewGameRequest { rows })
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetches the current state.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn state(&self) -> Result<StateView, ClientError> {
        let response = self.client.get(self.url("state")).send().await?;
        Self::decode(response).await
    }

    /// Submits a human move.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn human_move(&self, request: &MoveRequest) -> Result<StateView, ClientError> {
        let response = self.client.post(self.url("move")).json(request).send().await?;
        Self::decode(response).await
    }

    /// Asks the server's opponent to move.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn computer_move(&self) -> Result<StateView, ClientError> {
        let response = self.client.post(self.url("computer-move")).send().await?;
        Self::decode(response).await
    }

    /// Submits a human move and receives the opponent's reply.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn round(&self, request: &MoveRequest) -> Result<RoundView, ClientError> {
        let response = self.client.post(self.url("round")).json(request).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        debug!(status = %status, "Response received");

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body: ErrorBody = response.json().await?;
        warn!(status = %status, error = %body.error, "Server rejected request");
        Err(ClientError::Server {
            status: status.as_u16(),
            kind: body.error,
            message: body.message,
        })
    }
}
