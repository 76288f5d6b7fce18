//! Property tests for the engine invariants.
//!
//! Generated seeds and action sequences drive real games; every step is
//! checked against the rules that must hold whatever the player does.

use proptest::prelude::*;

use flip_tetris::core::{Board, EngineConfig, GameState, LockEvent, Shape};
use flip_tetris::types::{GameAction, PieceKind, Phase, LINE_SCORES};

fn any_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn play_action() -> impl Strategy<Value = GameAction> {
    prop::sample::select(vec![
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Hold,
    ])
}

fn board_strategy() -> impl Strategy<Value = Board> {
    prop::collection::vec(any::<bool>(), 10 * 12).prop_map(|bits| {
        let mut board = Board::new(10, 12);
        for (i, filled) in bits.into_iter().enumerate() {
            if filled {
                board.set((i % 10) as i8, (i / 10) as i8, Some(PieceKind::Z));
            }
        }
        board
    })
}

/// A lock scores exactly the table entry times the level it happened at.
fn check_line_score(
    event: Option<LockEvent>,
    level_before: u32,
    leveling: bool,
) -> Result<(), TestCaseError> {
    if let Some(event) = event {
        prop_assert!(event.lines_cleared <= 4);
        let factor = if leveling { level_before } else { 1 };
        prop_assert_eq!(
            event.score_delta,
            LINE_SCORES[event.lines_cleared as usize] * factor
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn four_rotations_are_identity(kind in any_kind(), clockwise in any::<bool>()) {
        let shape = Shape::of(kind);
        let mut rotated = shape;
        for _ in 0..4 {
            rotated = rotated.rotated(clockwise);
        }
        prop_assert_eq!(rotated, shape);
    }

    #[test]
    fn rejected_moves_change_nothing(
        seed in any::<u32>(),
        actions in prop::collection::vec(play_action(), 1..60),
        dx in -2i8..=2,
        dy in -2i8..=2,
    ) {
        let mut game = GameState::new(seed);
        game.start();
        for action in actions {
            game.apply_action(action);
        }
        prop_assume!(game.is_live());

        let board = game.board().clone();
        let piece = game.active();
        let moved = game.try_move(dx, dy);
        prop_assert_eq!(game.board(), &board);
        if moved {
            let after = game.active().unwrap();
            prop_assert!(after.is_valid(game.board()));
            prop_assert_eq!((after.x, after.y), (piece.unwrap().x + dx, piece.unwrap().y + dy));
        } else {
            prop_assert_eq!(game.active(), piece);
        }
    }

    #[test]
    fn locking_without_clears_adds_four_cells(
        seed in any::<u32>(),
        moves in prop::collection::vec(play_action(), 0..8),
    ) {
        let mut game = GameState::new(seed);
        game.start();
        for action in moves {
            if action != GameAction::HardDrop {
                game.apply_action(action);
            }
        }
        let before = game.board().occupied_count();

        prop_assert!(game.hard_drop());
        let event = game.take_last_event().unwrap();
        prop_assume!(event.lines_cleared == 0);
        prop_assert_eq!(event.cells_locked, 4);
        prop_assert_eq!(game.board().occupied_count(), before + 4);
    }

    #[test]
    fn clears_keep_dimensions_and_remove_full_rows(mut board in board_strategy()) {
        let full_before = (0..12).filter(|&y| board.is_row_full(y)).count();
        let occupied_before = board.occupied_count();

        let cleared = board.clear_full_rows(flip_tetris::types::Gravity::Down);

        prop_assert_eq!(cleared.len(), full_before);
        prop_assert_eq!(board.rows().count(), 12);
        prop_assert!(board.rows().all(|row| row.len() == 10));
        prop_assert!((0..12).all(|y| !board.is_row_full(y)));
        prop_assert_eq!(board.occupied_count(), occupied_before - full_before * 10);
    }

    #[test]
    fn score_and_lines_never_decrease(
        seed in any::<u32>(),
        flip in any::<bool>(),
        actions in prop::collection::vec(play_action(), 1..200),
    ) {
        let config = if flip { EngineConfig::flip() } else { EngineConfig::classic() };
        let mut game = GameState::with_config(config, seed).unwrap();
        game.start();

        let leveling = game.config().leveling;
        let (mut score, mut lines) = (0, 0);
        for action in actions {
            let level = game.level();
            game.apply_action(action);
            check_line_score(game.take_last_event(), level, leveling)?;

            let level = game.level();
            game.tick(16);
            check_line_score(game.take_last_event(), level, leveling)?;

            prop_assert!(game.score() >= score);
            prop_assert!(game.lines() >= lines);
            score = game.score();
            lines = game.lines();

            if game.phase() == Phase::GameOver {
                prop_assert!(game.active().is_none());
                break;
            }
        }
    }
}
