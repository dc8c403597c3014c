//! History consistency invariant: every taken stick is accounted for.

use super::super::GameState;
use super::Invariant;

/// Invariant: Sticks taken equals the sum of move counts in history.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let taken: usize = state
            .rows()
            .iter()
            .map(|row| row.len() - row.remaining())
            .sum();

        let recorded: usize = state.history().iter().map(|play| play.mv.count).sum();

        taken == recorded
    }

    fn description() -> &'static str {
        "Removed stick count matches move history"
    }
}
