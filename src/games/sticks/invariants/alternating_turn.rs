//! Alternating turn invariant: human and computer take turns.

use super::super::GameState;
use super::Invariant;

/// Invariant: Actors alternate.
///
/// No two consecutive history entries share an actor, and the recorded
/// last actor is the actor of the final history entry (none when the
/// history is empty). Either actor may open the game.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();

        if history.windows(2).any(|w| w[0].actor == w[1].actor) {
            return false;
        }

        history.last().map(|play| play.actor) == state.last_actor()
    }

    fn description() -> &'static str {
        "Actors alternate turns (human, computer, human, ...)"
    }
}
