//! Board invariants over arbitrary sequences of play.

use proptest::prelude::*;
use proptest::sample::Index;
use skirmish_core::{Faction, PieceKind, Position, StateSnapshot, TileKind};
use skirmish_engine::{legal_decisions, Board, GameStatus};
use std::collections::HashSet;

/// The standard setup with every special piece kind mixed in, some terrain,
/// and automated factions in the turn order.
fn mixed_setup() -> StateSnapshot {
    let mut snapshot = StateSnapshot::standard()
        .with_piece(Position::new(1, 7), PieceKind::Summoner, Faction::White)
        .with_piece(Position::new(6, 7), PieceKind::Sentry, Faction::White)
        .with_piece(Position::new(2, 6), PieceKind::Berserker, Faction::White)
        .with_piece(Position::new(5, 7), PieceKind::Jester, Faction::White)
        .with_piece(Position::new(6, 0), PieceKind::Summoner, Faction::Black)
        .with_piece(Position::new(1, 0), PieceKind::Sentry, Faction::Black)
        .with_piece(Position::new(5, 1), PieceKind::Berserker, Faction::Black)
        .with_piece(Position::new(2, 0), PieceKind::Jester, Faction::Black)
        .with_tile(Position::new(3, 4), TileKind::Chasm)
        .with_tile(Position::new(4, 3), TileKind::Wall)
        .with_tile(Position::new(0, 4), TileKind::Void)
        .with_tile(Position::new(7, 3), TileKind::Floor);
    for faction in [Faction::WhiteAuto, Faction::BlackAuto] {
        snapshot.turn_order.push(faction.code() as i32);
        snapshot.leadership.insert(faction.code() as i32, 0);
    }
    snapshot
}

/// Plays the chosen decisions, passing whenever the side to move has none.
fn play(mut board: Board, choices: &[Index]) -> Result<Board, TestCaseError> {
    for choice in choices {
        if board.status() == GameStatus::Stalemate {
            break;
        }
        let decisions = legal_decisions(&board, board.current_turn());
        if decisions.is_empty() {
            board.pass().map_err(|e| TestCaseError::fail(e.to_string()))?;
        } else {
            let decision = choice.get(&decisions);
            board
                .realize(&decision.outcome)
                .map_err(|e| TestCaseError::fail(format!("{}: {e}", decision.outcome)))?;
        }
        check_invariants(&board)?;
    }
    Ok(board)
}

fn check_invariants(board: &Board) -> Result<(), TestCaseError> {
    let mut ids = HashSet::new();
    for tile in board.tiles() {
        if let Some(piece) = tile.piece() {
            prop_assert_eq!(piece.position(), tile.position());
            prop_assert!(ids.insert(piece.id()), "duplicate id {}", piece.id());
            prop_assert!(board.turn_order().contains(&piece.faction()));
            prop_assert!(!tile.kind().evicts_occupant());
        }
    }
    for faction in board.turn_order() {
        let points = board.leadership(*faction).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!((0..=Board::MAX_LEADERSHIP).contains(&points));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn standard_play_keeps_invariants(choices in prop::collection::vec(any::<Index>(), 0..80)) {
        play(Board::standard().unwrap(), &choices)?;
    }

    #[test]
    fn mixed_play_keeps_invariants(choices in prop::collection::vec(any::<Index>(), 0..80)) {
        let board = Board::from_snapshot(&mixed_setup()).unwrap();
        play(board, &choices)?;
    }

    #[test]
    fn snapshot_survives_reload(choices in prop::collection::vec(any::<Index>(), 0..40)) {
        let board = play(Board::from_snapshot(&mixed_setup()).unwrap(), &choices)?;
        let state = board.get_state();
        let reloaded = Board::from_snapshot(&state).unwrap();
        prop_assert_eq!(reloaded.get_state(), state);
        prop_assert_eq!(reloaded.current_turn(), board.current_turn());
    }

    #[test]
    fn outcomes_are_recomputed_identically(choices in prop::collection::vec(any::<Index>(), 0..40)) {
        let board = play(Board::standard().unwrap(), &choices)?;
        for piece in board.pieces() {
            prop_assert_eq!(&piece.compute_outcomes(&board), piece.outcomes());
        }
    }
}
