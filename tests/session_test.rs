//! Tests for per-session game storage.

use std::sync::Arc;
use std::thread;
use strictly_sticks::{
    Actor, LadderError, Move, MoveError, SessionError, SessionManager, WinCondition,
};

#[test]
fn test_state_creates_default_game_on_first_contact() {
    let sessions = SessionManager::new();
    assert!(sessions.get_session("alice").is_none());

    let state = sessions.state("alice");
    assert_eq!(state.row_lengths(), vec![1, 2, 3, 4]);
    assert!(sessions.get_session("alice").is_some());
}

#[test]
fn test_move_on_unknown_session_not_found() {
    let sessions = SessionManager::new();
    assert_eq!(
        sessions.human_move("ghost", Move::new(0, 0, 1)),
        Err(SessionError::NotFound("ghost".to_string()))
    );
    assert!(matches!(
        sessions.computer_move("ghost"),
        Err(SessionError::NotFound(_))
    ));
    assert!(sessions.list_sessions().is_empty());
}

#[test]
fn test_new_game_replaces_state() {
    let sessions = SessionManager::new();
    sessions.new_game("alice", None).unwrap();
    sessions.human_move("alice", Move::new(3, 0, 4)).unwrap();

    let fresh = sessions.new_game("alice", Some(vec![3, 5])).unwrap();
    assert_eq!(fresh.row_lengths(), vec![3, 5]);
    assert_eq!(sessions.state("alice"), fresh);
    assert_eq!(fresh.last_actor(), None);
}

#[test]
fn test_new_game_rejects_bad_ladder() {
    let sessions = SessionManager::new();
    sessions.new_game("alice", None).unwrap();
    let before = sessions.state("alice");

    assert_eq!(
        sessions.new_game("alice", Some(vec![])),
        Err(SessionError::Ladder(LadderError::Empty))
    );
    assert!(matches!(
        sessions.new_game("alice", Some(vec![2, 0])),
        Err(SessionError::Ladder(LadderError::BadRowLength { row: 1, len: 0 }))
    ));
    assert_eq!(sessions.state("alice"), before);
}

#[test]
fn test_sessions_are_isolated() {
    let sessions = SessionManager::new();
    sessions.new_game("alice", None).unwrap();
    sessions.new_game("bob", None).unwrap();

    sessions.human_move("alice", Move::new(3, 0, 4)).unwrap();

    assert_eq!(sessions.state("bob").last_actor(), None);
    assert_eq!(sessions.state("alice").last_actor(), Some(Actor::Human));
    assert_eq!(sessions.list_sessions(), vec!["alice", "bob"]);
}

#[test]
fn test_rejected_move_keeps_session_state() {
    let sessions = SessionManager::new();
    sessions.new_game("alice", None).unwrap();
    sessions.human_move("alice", Move::new(2, 0, 1)).unwrap();
    let before = sessions.state("alice");

    assert_eq!(
        sessions.human_move("alice", Move::new(2, 1, 1)),
        Err(SessionError::Move(MoveError::OutOfTurn(Actor::Human)))
    );
    assert_eq!(sessions.state("alice"), before);
}

#[test]
fn test_round_stores_both_moves() {
    let sessions = SessionManager::new();
    sessions.new_game("alice", None).unwrap();

    let outcome = sessions.round("alice", Move::new(3, 0, 2)).unwrap();
    assert_eq!(outcome.computer, Some(Move::new(0, 0, 1)));
    assert_eq!(sessions.state("alice"), outcome.state);
    assert_eq!(outcome.state.last_actor(), Some(Actor::Computer));
}

#[test]
fn test_concurrent_moves_are_serialized() {
    let sessions = Arc::new(SessionManager::new());
    sessions.new_game("race", Some(vec![8, 8])).unwrap();

    // Every thread tries to move as the human; only one can win the turn
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let sessions = Arc::clone(&sessions);
            thread::spawn(move || sessions.human_move("race", Move::new(i % 2, i / 2, 1)))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().filter(|r| r.is_err()).all(|r| {
        matches!(r, Err(SessionError::Move(MoveError::OutOfTurn(Actor::Human))))
    }));
    assert_eq!(sessions.state("race").history().len(), 1);
}

#[test]
fn test_with_rules_validates_ladder() {
    assert!(SessionManager::with_rules(vec![], WinCondition::LastStickWins).is_err());
    assert!(SessionManager::with_rules(vec![33], WinCondition::LastStickWins).is_err());

    let sessions = SessionManager::with_rules(vec![5], WinCondition::LastStickLoses).unwrap();
    assert_eq!(sessions.ladder(), &[5]);
    assert_eq!(sessions.win_condition(), WinCondition::LastStickLoses);
    assert_eq!(sessions.state("x").row_lengths(), vec![5]);
}

#[test]
fn test_remove_session() {
    let sessions = SessionManager::new();
    sessions.new_game("alice", None).unwrap();
    assert!(sessions.remove_session("alice"));
    assert!(!sessions.remove_session("alice"));
    assert!(sessions.get_session("alice").is_none());
}
