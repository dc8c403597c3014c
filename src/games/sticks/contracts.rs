//! Contract-based validation for the stick-removal game.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError, PlayedMove, RangeFault};
use super::invariants::{InvariantSet, SticksInvariants};
use super::rules::is_finished;
use super::types::{Actor, GameState};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: At least one stick remains.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with `GameOver` once every stick is gone.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        if is_finished(state) {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The actor did not make the previous move.
pub struct ActorsTurn;

impl ActorsTurn {
    /// Fails with `OutOfTurn` if `actor` moved last.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, actor: Actor) -> Result<(), MoveError> {
        if state.last_actor() == Some(actor) {
            Err(MoveError::OutOfTurn(actor))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target row exists.
pub struct RowInBounds;

impl RowInBounds {
    /// Fails with `InvalidRow` if the row index is past the last row.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, mv: &Move) -> Result<(), MoveError> {
        if mv.row >= state.rows().len() {
            Err(MoveError::InvalidRow {
                row: mv.row,
                rows: state.rows().len(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: The move takes at least one stick and stays inside its row.
pub struct RangeInBounds;

impl RangeInBounds {
    /// Fails with `InvalidRange` for an empty or overrunning range.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, mv: &Move) -> Result<(), MoveError> {
        let len = state.row(mv.row).map_or(0, |row| row.len());

        if mv.count == 0 {
            return Err(MoveError::InvalidRange(RangeFault::Empty));
        }
        match mv.end() {
            Some(end) if end <= len => Ok(()),
            _ => Err(MoveError::InvalidRange(RangeFault::OutOfBounds {
                start: mv.start,
                count: mv.count,
                len,
            })),
        }
    }
}

/// Precondition: Every stick in the range is still present.
pub struct SticksAvailable;

impl SticksAvailable {
    /// Fails with `SticksUnavailable` naming the first taken stick in range.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, mv: &Move) -> Result<(), MoveError> {
        let taken = state
            .row(mv.row)
            .and_then(|row| row.first_removed_in(mv.range()));

        match taken {
            Some(index) => Err(MoveError::SticksUnavailable { row: mv.row, index }),
            None => Ok(()),
        }
    }
}

/// Composite precondition, checked in order with the first failure winning:
/// game not over, actor's turn, row in bounds, range in bounds, sticks available.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, play: &PlayedMove) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        ActorsTurn::check(state, play.actor)?;
        RowInBounds::check(state, &play.mv)?;
        RangeInBounds::check(state, &play.mv)?;
        SticksAvailable::check(state, &play.mv)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: see [`LegalMove`].
///
/// Postconditions:
/// - Row lengths unchanged
/// - No stick went from removed to present
/// - Exactly one history entry was appended
/// - All [`SticksInvariants`] hold
pub struct MoveContract;

impl Contract<GameState, PlayedMove> for MoveContract {
    fn pre(state: &GameState, action: &PlayedMove) -> Result<(), MoveError> {
        LegalMove::check(state, action)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if before.row_lengths() != after.row_lengths() {
            warn!("Row lengths changed");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: row lengths changed".to_string(),
            ));
        }

        let restored = before
            .rows()
            .iter()
            .zip(after.rows())
            .flat_map(|(b, a)| b.sticks().iter().zip(a.sticks()))
            .any(|(b, a)| !b.is_present() && a.is_present());
        if restored {
            warn!("Removed stick reappeared");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: removed stick reappeared".to_string(),
            ));
        }

        if after.history().len() != before.history().len() + 1 {
            warn!(
                before = before.history().len(),
                after = after.history().len(),
                "History did not grow by one"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: history did not grow by one".to_string(),
            ));
        }

        // Verify all invariants using the composed set
        SticksInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sticks::{Stick, apply_human_move};

    fn human(row: usize, start: usize, count: usize) -> PlayedMove {
        PlayedMove::new(Actor::Human, Move::new(row, start, count))
    }

    #[test]
    fn test_precondition_legal() {
        let state = GameState::default();
        assert!(MoveContract::pre(&state, &human(3, 0, 4)).is_ok());
    }

    #[test]
    fn test_precondition_order_turn_before_row() {
        let state = apply_human_move(&GameState::default(), Move::new(0, 0, 1)).unwrap();
        // Bad row too, but turn is checked first
        assert_eq!(
            MoveContract::pre(&state, &human(9, 0, 1)),
            Err(MoveError::OutOfTurn(Actor::Human))
        );
    }

    #[test]
    fn test_precondition_zero_count() {
        let state = GameState::default();
        assert_eq!(
            MoveContract::pre(&state, &human(2, 0, 0)),
            Err(MoveError::InvalidRange(RangeFault::Empty))
        );
    }

    #[test]
    fn test_precondition_overflowing_range() {
        let state = GameState::default();
        assert!(matches!(
            MoveContract::pre(&state, &human(2, usize::MAX, 2)),
            Err(MoveError::InvalidRange(RangeFault::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::default();
        let after = apply_human_move(&before, Move::new(2, 0, 2)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_restored_stick() {
        let before = apply_human_move(&GameState::default(), Move::new(2, 0, 2)).unwrap();
        let mut after = before.clone();
        after.apply(PlayedMove::new(Actor::Computer, Move::new(0, 0, 1)));
        after.rows[2].set(0, Stick::Present);

        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
