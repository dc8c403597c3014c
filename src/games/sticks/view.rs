//! Read-only projection of a game for clients.

use super::rules::{is_finished, next_actor, outcome, remaining, xor_total};
use super::types::{Actor, GameState, WinCondition};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Wire view of a game, with every derived field filled in.
///
/// Rows are `0`/`1` flags, one inner list per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateView {
    /// Row flags (`1` present, `0` removed).
    pub rows: Vec<Vec<u8>>,
    /// True once no sticks remain.
    pub finished: bool,
    /// XOR of per-row remaining counts.
    pub xor_total: usize,
    /// Actor of the last accepted move.
    pub last_actor: Option<Actor>,
    /// Actor expected to move next, if determined.
    pub next_actor: Option<Actor>,
    /// Sticks left on the table.
    pub remaining: usize,
    /// Winner, once finished.
    pub winner: Option<Actor>,
}

impl StateView {
    /// Projects a state under the given win condition.
    #[instrument(skip(state))]
    pub fn new(state: &GameState, condition: WinCondition) -> Self {
        Self {
            rows: state.flags(),
            finished: is_finished(state),
            xor_total: xor_total(state),
            last_actor: state.last_actor(),
            next_actor: next_actor(state),
            remaining: remaining(state),
            winner: outcome(state, condition),
        }
    }

    /// Formats the rows as a human-readable string.
    pub fn display(&self) -> String {
        render(&self.rows)
    }
}

/// Draws flag rows, `|` for present sticks and `.` for removed ones.
pub(crate) fn render(rows: &[Vec<u8>]) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let sticks: Vec<&str> = row
                .iter()
                .map(|&flag| if flag == 1 { "|" } else { "." })
                .collect();
            format!("{}: {}", i, sticks.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sticks::{Move, apply_human_move};

    #[test]
    fn test_view_of_new_game() {
        let view = StateView::new(&GameState::default(), WinCondition::LastStickWins);
        assert_eq!(view.rows, vec![vec![1], vec![1, 1], vec![1, 1, 1], vec![1, 1, 1, 1]]);
        assert!(!view.finished);
        assert_eq!(view.xor_total, 4);
        assert_eq!(view.remaining, 10);
        assert_eq!(view.winner, None);
    }

    #[test]
    fn test_view_serializes_lowercase_actor() {
        let state = apply_human_move(&GameState::default(), Move::new(3, 0, 2)).unwrap();
        let view = StateView::new(&state, WinCondition::LastStickWins);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["last_actor"], "human");
        assert_eq!(json["next_actor"], "computer");
        assert_eq!(json["rows"][3], serde_json::json!([0, 0, 1, 1]));
    }
}
