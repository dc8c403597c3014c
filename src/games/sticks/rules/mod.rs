//! Game rules for the stick-removal game.
//!
//! This module contains pure functions over a passed-in [`GameState`]:
//! validated transitions return a new state and never touch the input.
//!
//! [`GameState`]: super::GameState

pub mod moves;
pub mod round;
pub mod termination;

pub use moves::{apply_computer_move, apply_human_move};
pub use round::{RoundOutcome, play_round};
pub use termination::{is_finished, next_actor, outcome, remaining, xor_total};
