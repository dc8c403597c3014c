//! Monotonic removal invariant: a taken stick never comes back.

use super::super::GameState;
use super::Invariant;

/// Invariant: Sticks only ever go from present to removed.
///
/// Verified by replaying the move history on a fresh ladder: every
/// replayed move must take sticks that are still present, and the
/// replayed rows must match the current rows exactly.
pub struct MonotonicRemovalInvariant;

impl Invariant<GameState> for MonotonicRemovalInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = GameState::new(&state.row_lengths());

        for play in state.history() {
            let mv = play.mv;
            let Some(row) = reconstructed.row(mv.row) else {
                return false;
            };
            match mv.end() {
                Some(end) if mv.count > 0 && end <= row.len() => {}
                _ => return false,
            }
            // Sticks must be present before taking
            if row.first_removed_in(mv.range()).is_some() {
                return false;
            }
            reconstructed.apply(*play);
        }

        reconstructed.rows() == state.rows()
    }

    fn description() -> &'static str {
        "Sticks are removed monotonically (never restored)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sticks::{Move, Stick, apply_computer_move, apply_human_move};

    #[test]
    fn test_new_game_holds() {
        assert!(MonotonicRemovalInvariant::holds(&GameState::default()));
    }

    #[test]
    fn test_moves_hold() {
        let state = apply_human_move(&GameState::default(), Move::new(3, 1, 3)).unwrap();
        let state = apply_computer_move(&state).unwrap();
        assert!(MonotonicRemovalInvariant::holds(&state));
    }

    #[test]
    fn test_restored_stick_violates() {
        let mut state = apply_human_move(&GameState::default(), Move::new(2, 0, 1)).unwrap();

        // Put the stick back
        state.rows[2].set(0, Stick::Present);

        assert!(!MonotonicRemovalInvariant::holds(&state));
    }
}
