//! Automated opponent that takes the first available stick.
//!
//! Scans rows from the top and removes exactly one stick from the first
//! row that still has any. Predictable and easy to beat; the first mover
//! can force a win against it.

use super::action::Move;
use super::types::GameState;
use tracing::instrument;

/// Returns the opponent's move, or `None` once no sticks remain.
#[instrument(skip(state))]
pub fn choose_move(state: &GameState) -> Option<Move> {
    state
        .rows()
        .iter()
        .enumerate()
        .find_map(|(i, row)| row.first_present().map(|j| Move::new(i, j, 1)))
}
