//! End-to-end engine scenarios on the default 20x20 board.

use flip_tetris::core::{EngineConfig, GameState, SpawnPolicy};
use flip_tetris::types::{GameAction, Gravity, Phase, PieceKind};

fn game_with(kinds: &[PieceKind], config: EngineConfig) -> GameState {
    let config = EngineConfig {
        spawn: SpawnPolicy::Cycle(kinds.to_vec()),
        ..config
    };
    let mut game = GameState::with_config(config, 42).unwrap();
    game.start();
    game
}

#[test]
fn o_piece_hard_drop_on_empty_board() {
    let mut game = game_with(&[PieceKind::O], EngineConfig::classic());
    let before = game.board().occupied_count();

    assert!(game.apply_action(GameAction::HardDrop));

    let event = game.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(event.score_delta, 0);
    assert_eq!(game.board().occupied_count(), before + 4);
    // Bottom row holds the lower half of the O.
    assert!(game.board().is_occupied(9, 19));
    assert!(game.board().is_occupied(10, 19));
    // Only the hard drop bonus: 18 rows at 2 points each.
    assert_eq!(game.score(), 36);
    assert_eq!(game.lines(), 0);
}

#[test]
fn vertical_i_completes_bottom_row() {
    let config = EngineConfig {
        timing: flip_tetris::core::Timing {
            clear_delay_ms: 0,
            ..Default::default()
        },
        ..EngineConfig::classic()
    };
    let mut game = game_with(&[PieceKind::I], config);
    for x in 0..20 {
        if x != 10 {
            game.board_mut().set(x, 19, Some(PieceKind::J));
        }
    }

    assert!(game.apply_action(GameAction::RotateCw));
    assert_eq!(game.active().unwrap().minos()[0].0, 10);
    assert!(game.apply_action(GameAction::HardDrop));

    let event = game.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.score_delta, 100);
    assert_eq!(game.score(), 100 + 32);
    assert_eq!(game.board().rows().count(), 20);
    // Three cells of the I survive, one per row above the floor.
    assert_eq!(game.board().occupied_count(), 3);
    assert!(game.board().is_occupied(10, 19));
    assert!(game.active().is_some());
}

#[test]
fn blocked_spawn_ends_game() {
    let config = EngineConfig::classic();
    let mut game = GameState::with_config(config, 3).unwrap();
    for y in 0..4 {
        for x in 6..14 {
            game.board_mut().set(x, y, Some(PieceKind::Z));
        }
    }
    game.start();

    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.active().is_none());
    assert!(!game.apply_action(GameAction::MoveLeft));
}

#[test]
fn stacking_to_the_top_ends_game() {
    let mut game = game_with(&[PieceKind::O], EngineConfig::classic());
    let mut drops = 0;
    while game.phase() == Phase::Playing {
        game.apply_action(GameAction::HardDrop);
        drops += 1;
        assert!(drops <= 10);
    }
    assert_eq!(drops, 10);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.board().occupied_count(), 40);
}

#[test]
fn classic_levels_speed_up_every_ten_lines() {
    let config = EngineConfig {
        width: 4,
        timing: flip_tetris::core::Timing {
            clear_delay_ms: 0,
            ..Default::default()
        },
        ..EngineConfig::classic()
    };
    let mut game = game_with(&[PieceKind::I], config);
    assert_eq!(game.drop_interval_ms(), 800);

    // A horizontal I fills a 4-wide row on its own.
    for _ in 0..10 {
        game.apply_action(GameAction::HardDrop);
    }
    assert_eq!(game.lines(), 10);
    assert_eq!(game.level(), 2);
    assert_eq!(game.drop_interval_ms(), 750);

    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.take_last_event().unwrap().score_delta, 200);
}

#[test]
fn flip_variant_turns_board_after_hundred_points() {
    let mut game = game_with(&[PieceKind::I], EngineConfig { width: 4, ..EngineConfig::flip() });
    assert_eq!(game.gravity(), Gravity::Down);

    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.score(), 100 + 2 * 18);
    assert_eq!(game.gravity(), Gravity::Up);
    assert_eq!(game.flip_count(), 1);

    // Spawns against the bottom edge now and falls towards row 0.
    let piece = game.active().unwrap();
    assert_eq!(piece.y, 16);
    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.gravity(), Gravity::Down);
    assert_eq!(game.flip_count(), 2);
    assert_eq!(game.level(), 1);
}

#[test]
fn flip_keeps_resting_stack_on_new_floor() {
    let mut game = game_with(&[PieceKind::I], EngineConfig::flip());
    for x in 0..20 {
        if x != 10 {
            game.board_mut().set(x, 19, Some(PieceKind::S));
        }
    }
    game.board_mut().set(3, 18, Some(PieceKind::T));
    game.apply_action(GameAction::RotateCw);
    game.apply_action(GameAction::HardDrop);

    assert_eq!(game.gravity(), Gravity::Up);
    // Leftovers: the T and three I cells, now hanging from row 0.
    assert_eq!(game.board().occupied_count(), 4);
    assert!(game.board().is_occupied(3, 0));
    assert!(game.board().is_occupied(10, 0));
    assert!(game.board().is_occupied(10, 2));
}

#[test]
fn pause_menu_restart_and_home() {
    let mut game = game_with(&[PieceKind::T], EngineConfig::classic());
    game.apply_action(GameAction::HardDrop);

    assert!(game.apply_action(GameAction::Pause));
    assert_eq!(game.phase(), Phase::Paused);
    assert!(!game.apply_action(GameAction::HardDrop));

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.board().occupied_count(), 0);

    assert!(game.apply_action(GameAction::Home));
    assert_eq!(game.phase(), Phase::Start);
    assert!(game.start());
}

#[test]
fn same_seed_same_game() {
    let play = |seed| {
        let mut game = GameState::new(seed);
        game.start();
        for i in 0..30 {
            let action = match i % 3 {
                0 => GameAction::MoveLeft,
                1 => GameAction::RotateCw,
                _ => GameAction::HardDrop,
            };
            game.apply_action(action);
        }
        (game.score(), game.board().clone())
    };
    assert_eq!(play(2024), play(2024));
}
