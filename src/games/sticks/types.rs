//! Core domain types for the stick-removal game.

use super::action::PlayedMove;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::instrument;

/// Row lengths used when no ladder is configured.
pub const DEFAULT_LADDER: [usize; 4] = [1, 2, 3, 4];

/// Maximum number of rows a ladder may have.
pub const MAX_ROWS: usize = 32;

/// Maximum number of sticks in a single row.
pub const MAX_ROW_LEN: usize = 32;

/// A single stick slot in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stick {
    /// Stick is still on the table.
    Present,
    /// Stick has been taken.
    Removed,
}

impl Stick {
    /// Returns true if the stick is still on the table.
    pub fn is_present(self) -> bool {
        matches!(self, Stick::Present)
    }

    /// Binary flag used on the wire (`1` present, `0` removed).
    pub fn flag(self) -> u8 {
        match self {
            Stick::Present => 1,
            Stick::Removed => 0,
        }
    }
}

/// One of the two participants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Actor {
    /// The human player, moving through a client.
    Human,
    /// The automated opponent.
    Computer,
}

impl Actor {
    /// Returns the other actor.
    pub fn opponent(self) -> Self {
        match self {
            Actor::Human => Actor::Computer,
            Actor::Computer => Actor::Human,
        }
    }
}

/// How the winner is decided once the last stick is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Normal play: whoever takes the last stick wins.
    #[default]
    LastStickWins,
    /// Misère play: whoever takes the last stick loses.
    LastStickLoses,
}

/// A fixed-length row of sticks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    sticks: Vec<Stick>,
}

impl Row {
    /// Creates a row with every stick present.
    pub fn full(len: usize) -> Self {
        Self {
            sticks: vec![Stick::Present; len],
        }
    }

    /// Number of slots in the row (present or removed).
    pub fn len(&self) -> usize {
        self.sticks.len()
    }

    /// Returns true if the row has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.sticks.is_empty()
    }

    /// Gets the stick at the given index.
    pub fn get(&self, index: usize) -> Option<Stick> {
        self.sticks.get(index).copied()
    }

    /// Returns all slots in index order.
    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    /// Number of sticks still present.
    pub fn remaining(&self) -> usize {
        self.sticks.iter().filter(|s| s.is_present()).count()
    }

    /// Returns true if every stick in the row has been taken.
    pub fn is_cleared(&self) -> bool {
        self.sticks.iter().all(|s| !s.is_present())
    }

    /// Index of the first present stick.
    pub fn first_present(&self) -> Option<usize> {
        self.sticks.iter().position(|s| s.is_present())
    }

    /// Index of the first removed stick within `range`, if any.
    ///
    /// Out-of-bounds ranges report nothing; bounds are a separate check.
    pub fn first_removed_in(&self, range: Range<usize>) -> Option<usize> {
        let slice = self.sticks.get(range.clone()).unwrap_or(&[]);
        range
            .zip(slice)
            .find(|(_, s)| !s.is_present())
            .map(|(i, _)| i)
    }

    /// Row as wire flags.
    pub fn flags(&self) -> Vec<u8> {
        self.sticks.iter().map(|s| s.flag()).collect()
    }

    /// Takes every stick in `range` (unchecked).
    pub(crate) fn remove(&mut self, range: Range<usize>) {
        for stick in &mut self.sticks[range] {
            *stick = Stick::Removed;
        }
    }

    /// Overwrites a single slot. Only used to build corrupted states in tests.
    #[cfg(test)]
    pub(crate) fn set(&mut self, index: usize, stick: Stick) {
        self.sticks[index] = stick;
    }
}

/// Error raised when a row configuration cannot start a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LadderError {
    /// The ladder has no rows.
    #[display("Ladder must have at least one row")]
    Empty,

    /// The ladder has more rows than allowed.
    #[display("Ladder has {} rows (maximum {})", _0, MAX_ROWS)]
    TooManyRows(usize),

    /// A row length is zero or too large.
    #[display("Row {} has length {} (must be 1..={})", row, len, MAX_ROW_LEN)]
    BadRowLength {
        /// Offending row index.
        row: usize,
        /// Offending length.
        len: usize,
    },
}

impl std::error::Error for LadderError {}

/// Checks that a row configuration describes a playable game.
#[instrument]
pub fn validate_ladder(row_lengths: &[usize]) -> Result<(), LadderError> {
    if row_lengths.is_empty() {
        return Err(LadderError::Empty);
    }
    if row_lengths.len() > MAX_ROWS {
        return Err(LadderError::TooManyRows(row_lengths.len()));
    }
    if let Some((row, &len)) = row_lengths
        .iter()
        .enumerate()
        .find(|(_, len)| **len == 0 || **len > MAX_ROW_LEN)
    {
        return Err(LadderError::BadRowLength { row, len });
    }
    Ok(())
}

/// Complete game state.
///
/// Everything else (finished, XOR total, winner) is derived on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) rows: Vec<Row>,
    pub(crate) last_actor: Option<Actor>,
    pub(crate) history: Vec<PlayedMove>,
}

impl GameState {
    /// Creates a fresh game with every stick present and no actor yet.
    #[instrument]
    pub fn new(row_lengths: &[usize]) -> Self {
        Self {
            rows: row_lengths.iter().map(|&len| Row::full(len)).collect(),
            last_actor: None,
            history: Vec::new(),
        }
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Gets a row by index.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Row lengths this game was created with.
    pub fn row_lengths(&self) -> Vec<usize> {
        self.rows.iter().map(Row::len).collect()
    }

    /// The actor whose move was accepted most recently.
    pub fn last_actor(&self) -> Option<Actor> {
        self.last_actor
    }

    /// Accepted moves in order.
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// Rows as wire flags.
    pub fn flags(&self) -> Vec<Vec<u8>> {
        self.rows.iter().map(Row::flags).collect()
    }

    /// Applies a move (unchecked - use `rules::apply_human_move` and
    /// `rules::apply_computer_move` for validation).
    pub(crate) fn apply(&mut self, play: PlayedMove) {
        self.rows[play.mv.row].remove(play.mv.range());
        self.last_actor = Some(play.actor);
        self.history.push(play);
    }

    /// Formats the rows as a human-readable string.
    ///
    /// Present sticks are drawn as `|`, removed ones as `.`.
    pub fn display(&self) -> String {
        super::view::render(&self.flags())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&DEFAULT_LADDER)
    }
}
