//! Game session management keyed by session identifier.
//!
//! The game rules are stateless; this store owns one [`GameState`] per
//! session and serializes every read-modify-write behind a single lock.

use crate::games::sticks::{
    DEFAULT_LADDER, GameState, LadderError, Move, MoveError, RoundOutcome, WinCondition,
    apply_computer_move, apply_human_move, play_round, validate_ladder,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// One player's game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The game state.
    pub state: GameState,
}

impl GameSession {
    /// Creates a session with a fresh game on the given ladder.
    #[instrument(skip(ladder))]
    pub fn new(id: SessionId, ladder: &[usize]) -> Self {
        info!(session_id = %id, ?ladder, "Creating new game session");
        Self {
            id,
            state: GameState::new(ladder),
        }
    }
}

/// Error returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// No game has been started for this session.
    #[display("Session {} not found", _0)]
    #[from(ignore)]
    NotFound(SessionId),

    /// The move was rejected; the session state is unchanged.
    #[display("{}", _0)]
    Move(MoveError),

    /// The requested ladder cannot start a game.
    #[display("{}", _0)]
    Ladder(LadderError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::NotFound(_) => None,
            SessionError::Move(e) => Some(e),
            SessionError::Ladder(e) => Some(e),
        }
    }
}

/// Manages all game sessions.
///
/// Cheap to clone; clones share the same sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    ladder: Vec<usize>,
    win_condition: WinCondition,
}

impl SessionManager {
    /// Creates a session manager using the default ladder and normal play.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ladder: DEFAULT_LADDER.to_vec(),
            win_condition: WinCondition::default(),
        }
    }

    /// Creates a session manager whose new games use `ladder` unless a
    /// request names its own.
    #[instrument]
    pub fn with_rules(
        ladder: Vec<usize>,
        win_condition: WinCondition,
    ) -> Result<Self, LadderError> {
        validate_ladder(&ladder)?;
        info!(?ladder, ?win_condition, "Creating session manager");
        Ok(Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ladder,
            win_condition,
        })
    }

    /// Default ladder for new games.
    pub fn ladder(&self) -> &[usize] {
        &self.ladder
    }

    /// How winners are decided.
    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, GameSession>> {
        // A panic while holding the lock cannot leave a half-applied move:
        // transitions build a new state before it is stored.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new game, replacing any existing game in the session.
    #[instrument(skip(self))]
    pub fn new_game(
        &self,
        id: &str,
        ladder: Option<Vec<usize>>,
    ) -> Result<GameState, SessionError> {
        let ladder = ladder.unwrap_or_else(|| self.ladder.clone());
        validate_ladder(&ladder).inspect_err(|e| warn!(error = %e, "Rejected ladder"))?;

        let session = GameSession::new(id.to_string(), &ladder);
        let state = session.state.clone();
        self.lock().insert(id.to_string(), session);

        info!(session_id = id, "Started new game");
        Ok(state)
    }

    /// Returns the current state, creating a default game on first contact.
    #[instrument(skip(self))]
    pub fn state(&self, id: &str) -> GameState {
        self.lock()
            .entry(id.to_string())
            .or_insert_with(|| GameSession::new(id.to_string(), &self.ladder))
            .state
            .clone()
    }

    /// Gets a session by ID without creating one.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &str) -> Option<GameSession> {
        let session = self.lock().get(id).cloned();
        if session.is_none() {
            debug!(session_id = id, "Session not found");
        }
        session
    }

    /// Applies a human move to the session's game.
    #[instrument(skip(self))]
    pub fn human_move(&self, id: &str, mv: Move) -> Result<GameState, SessionError> {
        self.transition(id, |state| {
            let next = apply_human_move(state, mv)?;
            Ok((next.clone(), next))
        })
    }

    /// Lets the automated opponent move in the session's game.
    #[instrument(skip(self))]
    pub fn computer_move(&self, id: &str) -> Result<GameState, SessionError> {
        self.transition(id, |state| {
            let next = apply_computer_move(state)?;
            Ok((next.clone(), next))
        })
    }

    /// Applies a human move and the opponent's reply as one step.
    #[instrument(skip(self))]
    pub fn round(&self, id: &str, mv: Move) -> Result<RoundOutcome, SessionError> {
        self.transition(id, |state| {
            let outcome = play_round(state, mv)?;
            Ok((outcome.state.clone(), outcome))
        })
    }

    /// Runs a validated transition while holding the lock.
    ///
    /// The lock covers read, validate, and store, so two requests on the
    /// same session cannot both pass the turn check.
    fn transition<T>(
        &self,
        id: &str,
        f: impl FnOnce(&GameState) -> Result<(GameState, T), MoveError>,
    ) -> Result<T, SessionError> {
        let mut sessions = self.lock();

        let session = sessions.get_mut(id).ok_or_else(|| {
            warn!(session_id = id, "Move on unknown session");
            SessionError::NotFound(id.to_string())
        })?;

        let (next, result) = f(&session.state)?;
        session.state = next;
        Ok(result)
    }

    /// Lists all active session IDs, sorted.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.lock().keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }

    /// Drops a session. Returns true if it existed.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            info!(session_id = id, "Removed session");
        }
        removed
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
