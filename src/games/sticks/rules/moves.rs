//! Validated move application for both actors.

use super::super::action::{Move, MoveError, PlayedMove};
use super::super::contracts::{ActorsTurn, Contract, GameNotOver, MoveContract};
use super::super::opponent::choose_move;
use super::super::types::{Actor, GameState};
use tracing::{debug, instrument, warn};

/// Applies a human move, returning the updated state.
///
/// # Errors
///
/// Preconditions are checked in order and the first failure wins:
/// `GameOver`, `OutOfTurn`, `InvalidRow`, `InvalidRange`,
/// `SticksUnavailable`. The input state is never modified.
#[instrument(skip(state), fields(row = mv.row, start = mv.start, count = mv.count))]
pub fn apply_human_move(state: &GameState, mv: Move) -> Result<GameState, MoveError> {
    commit(state, PlayedMove::new(Actor::Human, mv))
}

/// Lets the automated opponent take its move, returning the updated state.
///
/// # Errors
///
/// `GameOver` if no sticks remain, `OutOfTurn` if the computer moved last.
///
/// `GameOver` is checked before the turn, the same order human moves use.
/// A computer that just took the last stick and is asked again therefore
/// gets `GameOver`, not `OutOfTurn`.
#[instrument(skip(state))]
pub fn apply_computer_move(state: &GameState) -> Result<GameState, MoveError> {
    GameNotOver::check(state)?;
    ActorsTurn::check(state, Actor::Computer)?;

    let mv = choose_move(state).ok_or(MoveError::GameOver)?;
    debug!(%mv, "Opponent chose move");

    commit(state, PlayedMove::new(Actor::Computer, mv))
}

/// Validates and applies a move on a copy of the state.
///
/// Contract enforcement:
/// - Preconditions checked always
/// - Postconditions checked in debug builds only
fn commit(state: &GameState, play: PlayedMove) -> Result<GameState, MoveError> {
    MoveContract::pre(state, &play).inspect_err(|e| {
        warn!(actor = %play.actor, mv = %play.mv, error = %e, "Move rejected");
    })?;

    let mut next = state.clone();
    next.apply(play);

    #[cfg(debug_assertions)]
    MoveContract::post(state, &next)?;

    debug!(%play, remaining = super::remaining(&next), "Move applied");
    Ok(next)
}
