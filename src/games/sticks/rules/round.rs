//! A human move followed by the opponent's automatic reply.

use super::super::action::{Move, MoveError};
use super::super::types::GameState;
use super::moves::{apply_computer_move, apply_human_move};
use super::termination::is_finished;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Result of a full round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct RoundOutcome {
    /// State after both moves.
    pub state: GameState,
    /// The human move that was applied.
    pub human: Move,
    /// The opponent's reply, absent if the human took the last stick.
    pub computer: Option<Move>,
}

/// Applies the human move, then the computer's reply if sticks remain.
///
/// # Errors
///
/// Any error from the human move; the input state is left untouched.
#[instrument(skip(state), fields(row = mv.row, start = mv.start, count = mv.count))]
pub fn play_round(state: &GameState, mv: Move) -> Result<RoundOutcome, MoveError> {
    let after_human = apply_human_move(state, mv)?;

    if is_finished(&after_human) {
        info!("Human took the last stick");
        return Ok(RoundOutcome::new(after_human, mv, None));
    }

    let after_computer = apply_computer_move(&after_human)?;
    let reply = after_computer.history().last().map(|play| play.mv);
    Ok(RoundOutcome::new(after_computer, mv, reply))
}
