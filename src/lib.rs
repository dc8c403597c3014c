//! Strictly Sticks library - a type-safe stick-removal game
//!
//! Two actors, a human and a simple computer opponent, take turns removing
//! adjacent sticks from a single row until none remain.
//!
//! # Architecture
//!
//! - **Games**: Pure rules over a passed-in [`GameState`] (validation,
//!   turn order, terminal detection, opponent policy)
//! - **Session**: Keyed store of one game per session identifier
//! - **Server**: HTTP routes over the session store
//! - **Client**: REST client and line-oriented terminal play
//!
//! # Example
//!
//! ```
//! use strictly_sticks::{GameState, Move, apply_computer_move, apply_human_move};
//!
//! # fn example() -> Result<(), strictly_sticks::MoveError> {
//! let state = GameState::new(&[1, 2, 3, 4]);
//! let state = apply_human_move(&state, Move::new(3, 0, 2))?;
//! let state = apply_computer_move(&state)?;
//! assert_eq!(state.row(0).map(|r| r.remaining()), Some(0));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod config;
mod games;
mod session;

// Public modules used by the binary
pub mod cli;
pub mod server;
pub mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - HTTP client
pub use client::{ClientError, RestGameClient};

// Crate-level exports - Server types
pub use server::{ApiError, ErrorBody, MoveRequest, NewGameRequest, RoundView, router};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError, SessionId, SessionManager};

// Crate-level exports - Terminal play
pub use terminal::{Command as TerminalCommand, LocalTable, Table, parse_command};

// Crate-level exports - Game types
pub use games::sticks::{
    Actor, ActorsTurn, AlternatingTurnInvariant, Contract, DEFAULT_LADDER, GameNotOver, GameState,
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation, LadderError, LegalMove,
    MAX_ROW_LEN, MAX_ROWS, MonotonicRemovalInvariant, Move, MoveContract, MoveError, PlayedMove,
    RangeFault, RangeInBounds, RoundOutcome, Row, RowInBounds, StateView, Stick, SticksAvailable,
    SticksInvariants, WinCondition, apply_computer_move, apply_human_move, choose_move,
    is_finished, next_actor, outcome, play_round, remaining, validate_ladder, xor_total,
};
