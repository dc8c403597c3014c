//! First-class action types for the stick-removal game.
//!
//! Moves are domain events, not side effects. They represent an
//! actor's intent and can be validated independently of execution.

use super::types::Actor;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::instrument;

/// A move: take `count` adjacent sticks from `row`, starting at `start`.
///
/// A move is single-row and contiguous by construction. Raw client
/// selections go through [`Move::from_selection`] to get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Target row.
    pub row: usize,
    /// First stick taken.
    pub start: usize,
    /// Number of sticks taken.
    pub count: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(row: usize, start: usize, count: usize) -> Self {
        Self { row, start, count }
    }

    /// One past the last stick taken, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.start.checked_add(self.count)
    }

    /// Index range covered by this move.
    ///
    /// Only meaningful once the move has passed range validation.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start.saturating_add(self.count)
    }

    /// Builds a move from raw `(row, index)` picks.
    ///
    /// The picks may arrive in any order but must name at least one
    /// stick, stay within a single row, contain no duplicates, and be
    /// adjacent once sorted.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidRange`] describing the first violated
    /// constraint.
    #[instrument]
    pub fn from_selection(picks: &[(usize, usize)]) -> Result<Self, MoveError> {
        let Some(&(row, _)) = picks.first() else {
            return Err(MoveError::InvalidRange(RangeFault::Empty));
        };

        if picks.iter().any(|&(r, _)| r != row) {
            return Err(MoveError::InvalidRange(RangeFault::MultipleRows));
        }

        let mut indices: Vec<usize> = picks.iter().map(|&(_, i)| i).collect();
        indices.sort_unstable();

        if let Some(w) = indices.windows(2).find(|w| w[0] == w[1]) {
            return Err(MoveError::InvalidRange(RangeFault::Duplicate(w[0])));
        }
        if indices.windows(2).any(|w| w[1] != w[0] + 1) {
            return Err(MoveError::InvalidRange(RangeFault::NotContiguous));
        }

        Ok(Self::new(row, indices[0], indices.len()))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {} sticks {}..{}",
            self.row,
            self.start,
            self.start.saturating_add(self.count)
        )
    }
}

/// A move together with the actor who made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct PlayedMove {
    /// Who moved.
    pub actor: Actor,
    /// What was taken.
    pub mv: Move,
}

impl std::fmt::Display for PlayedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} took {}", self.actor, self.mv)
    }
}

/// Why a selection or range does not describe a legal slice of a row.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RangeFault {
    /// Nothing was selected.
    #[display("no sticks selected")]
    Empty,

    /// Selection spans more than one row.
    #[display("selection spans more than one row")]
    MultipleRows,

    /// The same stick was picked twice.
    #[display("stick {} selected twice", _0)]
    Duplicate(usize),

    /// Picks leave a gap.
    #[display("selected sticks are not adjacent")]
    NotContiguous,

    /// The range runs past the end of the row.
    #[display("sticks {}+{} exceed row length {}", start, count, len)]
    OutOfBounds {
        /// First stick requested.
        start: usize,
        /// Number requested.
        count: usize,
        /// Row length.
        len: usize,
    },
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MoveError {
    /// The actor also made the previous move.
    #[display("It's not {}'s turn", _0)]
    OutOfTurn(Actor),

    /// No sticks remain.
    #[display("Game is already over")]
    GameOver,

    /// Row index out of bounds.
    #[display("Row {} does not exist (game has {} rows)", row, rows)]
    InvalidRow {
        /// Requested row.
        row: usize,
        /// Number of rows in the game.
        rows: usize,
    },

    /// Empty, out-of-bounds, split or non-adjacent selection.
    #[display("Invalid range: {}", _0)]
    InvalidRange(RangeFault),

    /// A selected stick was already taken.
    #[display("Stick {} in row {} is already taken", index, row)]
    SticksUnavailable {
        /// Target row.
        row: usize,
        /// First taken stick inside the selection.
        index: usize,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl std::error::Error for MoveError {}
