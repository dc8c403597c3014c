//! Terminal-state detection and derived queries.
//!
//! Everything here is recomputed from the rows on every call.

use super::super::{Actor, GameState, Row, WinCondition};
use tracing::instrument;

/// Returns true once no stick remains in any row.
#[instrument(skip(state))]
pub fn is_finished(state: &GameState) -> bool {
    state.rows().iter().all(Row::is_cleared)
}

/// Total number of sticks still on the table.
#[instrument(skip(state))]
pub fn remaining(state: &GameState) -> usize {
    state.rows().iter().map(Row::remaining).sum()
}

/// Bitwise XOR of the per-row remaining counts (the classical nim-sum).
///
/// Display only; termination never looks at it.
#[instrument(skip(state))]
pub fn xor_total(state: &GameState) -> usize {
    state
        .rows()
        .iter()
        .map(Row::remaining)
        .fold(0, |acc, count| acc ^ count)
}

/// The actor expected to move next.
///
/// `None` at the start (either may open) and once the game is over.
#[instrument(skip(state))]
pub fn next_actor(state: &GameState) -> Option<Actor> {
    if is_finished(state) {
        return None;
    }
    state.last_actor().map(Actor::opponent)
}

/// The winner of a finished game under the given condition.
///
/// The actor who took the last stick is the last actor.
#[instrument(skip(state))]
pub fn outcome(state: &GameState, condition: WinCondition) -> Option<Actor> {
    if !is_finished(state) {
        return None;
    }
    let last = state.last_actor()?;
    Some(match condition {
        WinCondition::LastStickWins => last,
        WinCondition::LastStickLoses => last.opponent(),
    })
}
