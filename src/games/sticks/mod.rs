//! Stick-removal game (a nim variant).
//!
//! Rows of sticks form a ladder; players alternate taking one or more
//! adjacent sticks from a single row until none remain.

mod action;
mod contracts;
mod invariants;
mod opponent;
mod rules;
mod types;
mod view;

pub use action::{Move, MoveError, PlayedMove, RangeFault};
pub use contracts::{
    ActorsTurn, Contract, GameNotOver, LegalMove, MoveContract, RangeInBounds, RowInBounds,
    SticksAvailable,
};
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, MonotonicRemovalInvariant, SticksInvariants,
};
pub use opponent::choose_move;
pub use rules::{
    RoundOutcome, apply_computer_move, apply_human_move, is_finished, next_actor, outcome,
    play_round, remaining, xor_total,
};
pub use types::{
    Actor, DEFAULT_LADDER, GameState, LadderError, MAX_ROW_LEN, MAX_ROWS, Row, Stick,
    WinCondition, validate_ladder,
};
pub use view::StateView;
