//! Tests for move contracts and invariants.

use serde_json::json;
use strictly_sticks::{
    Actor, ActorsTurn, AlternatingTurnInvariant, Contract, GameNotOver, GameState,
    HistoryConsistentInvariant, Invariant, InvariantSet, LegalMove, MonotonicRemovalInvariant,
    Move, MoveContract, MoveError, PlayedMove, RangeFault, RangeInBounds, RowInBounds,
    SticksAvailable, SticksInvariants, apply_computer_move, apply_human_move,
};

/// Builds a state from raw parts, bypassing the rules.
fn raw_state(rows: &[&[&str]], last_actor: Option<&str>, history: serde_json::Value) -> GameState {
    let rows: Vec<_> = rows.iter().map(|r| json!({ "sticks": r })).collect();
    serde_json::from_value(json!({
        "rows": rows,
        "last_actor": last_actor,
        "history": history,
    }))
    .expect("Valid state JSON")
}

fn play(actor: Actor, row: usize, start: usize, count: usize) -> PlayedMove {
    PlayedMove::new(actor, Move::new(row, start, count))
}

#[test]
fn test_individual_preconditions() {
    let state = GameState::default();

    assert!(GameNotOver::check(&state).is_ok());
    assert!(ActorsTurn::check(&state, Actor::Human).is_ok());
    assert!(ActorsTurn::check(&state, Actor::Computer).is_ok());
    assert!(RowInBounds::check(&state, &Move::new(3, 0, 1)).is_ok());
    assert!(matches!(
        RowInBounds::check(&state, &Move::new(4, 0, 1)),
        Err(MoveError::InvalidRow { .. })
    ));
    assert_eq!(
        RangeInBounds::check(&state, &Move::new(2, 1, 0)),
        Err(MoveError::InvalidRange(RangeFault::Empty))
    );
    assert!(matches!(
        RangeInBounds::check(&state, &Move::new(2, usize::MAX, 2)),
        Err(MoveError::InvalidRange(RangeFault::OutOfBounds { .. }))
    ));
    assert!(SticksAvailable::check(&state, &Move::new(3, 0, 4)).is_ok());
}

#[test]
fn test_game_over_checked_before_turn() {
    let state = apply_human_move(&GameState::new(&[1]), Move::new(0, 0, 1)).unwrap();
    assert_eq!(
        LegalMove::check(&state, &play(Actor::Human, 7, 7, 0)),
        Err(MoveError::GameOver)
    );
}

#[test]
fn test_turn_checked_before_row() {
    let state = apply_computer_move(&GameState::default()).unwrap();
    assert_eq!(
        LegalMove::check(&state, &play(Actor::Computer, 99, 0, 1)),
        Err(MoveError::OutOfTurn(Actor::Computer))
    );
}

#[test]
fn test_row_checked_before_range() {
    let state = GameState::default();
    assert_eq!(
        LegalMove::check(&state, &play(Actor::Human, 4, 0, 0)),
        Err(MoveError::InvalidRow { row: 4, rows: 4 })
    );
}

#[test]
fn test_range_checked_before_availability() {
    let state = apply_human_move(&GameState::default(), Move::new(1, 0, 2)).unwrap();
    let state = apply_computer_move(&state).unwrap();
    assert_eq!(
        LegalMove::check(&state, &play(Actor::Human, 1, 0, 3)),
        Err(MoveError::InvalidRange(RangeFault::OutOfBounds { start: 0, count: 3, len: 2 }))
    );
    assert_eq!(
        LegalMove::check(&state, &play(Actor::Human, 1, 1, 1)),
        Err(MoveError::SticksUnavailable { row: 1, index: 1 })
    );
}

#[test]
fn test_contract_post_accepts_real_transition() {
    let before = GameState::default();
    let after = apply_human_move(&before, Move::new(2, 0, 2)).unwrap();
    assert!(MoveContract::pre(&before, &play(Actor::Human, 2, 0, 2)).is_ok());
    assert!(MoveContract::post(&before, &after).is_ok());
}

#[test]
fn test_contract_post_rejects_restored_stick() {
    let before = raw_state(
        &[&["Removed", "Present"]],
        Some("human"),
        json!([{ "actor": "human", "mv": { "row": 0, "start": 0, "count": 1 } }]),
    );
    let after = raw_state(
        &[&["Present", "Removed"]],
        Some("computer"),
        json!([
            { "actor": "human", "mv": { "row": 0, "start": 0, "count": 1 } },
            { "actor": "computer", "mv": { "row": 0, "start": 1, "count": 1 } }
        ]),
    );
    assert!(matches!(
        MoveContract::post(&before, &after),
        Err(MoveError::InvariantViolation(_))
    ));
}

#[test]
fn test_contract_post_rejects_missing_history() {
    let before = GameState::new(&[2]);
    let after = raw_state(&[&["Removed", "Present"]], Some("human"), json!([]));
    assert!(matches!(
        MoveContract::post(&before, &after),
        Err(MoveError::InvariantViolation(_))
    ));
}

#[test]
fn test_invariants_hold_through_play() {
    let mut state = GameState::default();
    for mv in [Move::new(3, 1, 3), Move::new(2, 0, 1), Move::new(1, 0, 2)] {
        state = apply_human_move(&state, mv).unwrap();
        assert!(SticksInvariants::check_all(&state).is_ok());
        state = apply_computer_move(&state).unwrap();
        assert!(SticksInvariants::check_all(&state).is_ok());
    }
}

#[test]
fn test_invariants_detect_corruption() {
    // Two human moves in a row, and history that does not match the rows
    let state = raw_state(
        &[&["Removed", "Removed", "Present"]],
        Some("human"),
        json!([
            { "actor": "human", "mv": { "row": 0, "start": 0, "count": 1 } },
            { "actor": "human", "mv": { "row": 0, "start": 2, "count": 1 } }
        ]),
    );

    assert!(!AlternatingTurnInvariant::holds(&state));
    assert!(!MonotonicRemovalInvariant::holds(&state));
    assert!(HistoryConsistentInvariant::holds(&state));

    let violations = SticksInvariants::check_all(&state).unwrap_err();
    assert_eq!(violations.len(), 2);
}
