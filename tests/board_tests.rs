//! Board tests

use flip_tetris::core::Board;
use flip_tetris::types::{Gravity, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..board.width() as i8 {
        board.set(x, y, Some(PieceKind::I));
    }
}

#[test]
fn test_board_default_empty() {
    let board = Board::default();
    assert_eq!(board.width(), DEFAULT_BOARD_WIDTH);
    assert_eq!(board.height(), DEFAULT_BOARD_HEIGHT);

    // All cells should be empty
    for y in 0..DEFAULT_BOARD_HEIGHT as i8 {
        for x in 0..DEFAULT_BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(12, 8);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(12, 0), None);
    assert_eq!(board.get(0, 8), None);
    assert!(board.is_out_of_bounds(12, 7));
    assert!(!board.is_valid(12, 7));
    assert_eq!(board.row(7).map(|row| row.len()), Some(12));
    assert!(board.row(8).is_none());
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
}

#[test]
fn test_partial_row_is_not_cleared() {
    let mut board = Board::default();
    for x in 0..19 {
        board.set(x, 19, Some(PieceKind::L));
    }
    assert!(!board.is_row_full(19));
    assert!(board.clear_full_rows(Gravity::Down).is_empty());
    assert_eq!(board.occupied_count(), 19);
}

#[test]
fn test_clear_four_rows_keeps_height() {
    let mut board = Board::default();
    for y in 16..20 {
        fill_row(&mut board, y);
    }
    board.set(3, 15, Some(PieceKind::S));

    let cleared = board.clear_full_rows(Gravity::Down);
    assert_eq!(cleared.len(), 4);
    assert_eq!(board.rows().count(), 20);
    assert!(board.rows().all(|row| row.len() == 20));
    assert_eq!(board.get(3, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_non_adjacent_rows_clear_together() {
    let mut board = Board::new(4, 6);
    fill_row(&mut board, 5);
    board.set(0, 4, Some(PieceKind::Z));
    fill_row(&mut board, 3);
    board.set(1, 2, Some(PieceKind::J));

    let cleared = board.clear_full_rows(Gravity::Down);
    assert_eq!(cleared.len(), 2);
    assert_eq!(board.get(0, 5), Some(Some(PieceKind::Z)));
    assert_eq!(board.get(1, 4), Some(Some(PieceKind::J)));
}

#[test]
fn test_inverted_clear_compacts_towards_row_zero() {
    let mut board = Board::new(4, 6);
    fill_row(&mut board, 1);
    board.set(2, 0, Some(PieceKind::O));
    board.set(2, 2, Some(PieceKind::T));

    let cleared = board.clear_full_rows(Gravity::Up);
    assert_eq!(cleared.as_slice(), &[1]);
    assert_eq!(board.get(2, 0), Some(Some(PieceKind::O)));
    assert_eq!(board.get(2, 1), Some(Some(PieceKind::T)));
    assert!(board.row(5).unwrap().iter().all(|c| c.is_none()));
}

#[test]
fn test_reverse_twice_is_identity() {
    let mut board = Board::new(5, 7);
    board.set(1, 0, Some(PieceKind::I));
    board.set(4, 3, Some(PieceKind::L));
    board.set(0, 6, Some(PieceKind::S));
    let before = board.clone();

    board.reverse_rows();
    assert_ne!(board, before);
    board.reverse_rows();
    assert_eq!(board, before);
}

#[test]
fn test_board_clear() {
    let mut board = Board::default();
    fill_row(&mut board, 0);
    board.clear();
    assert_eq!(board.occupied_count(), 0);
}
