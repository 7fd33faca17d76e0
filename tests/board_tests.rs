//! Board tests - grid access, collision and line clearing

use blockfall::core::{get_shape, Board};
use blockfall::types::{ShapeKind, DEFAULT_COLS, DEFAULT_ROWS};

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), DEFAULT_COLS);
    assert_eq!(board.height(), DEFAULT_ROWS);

    for y in 0..DEFAULT_ROWS as i32 {
        for x in 0..DEFAULT_COLS as i32 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(6, 4);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(4, 0), None);
    assert_eq!(board.get(0, 6), None);
    assert!(board.is_out_of_bounds(4, 5));
    assert!(!board.is_out_of_bounds(3, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(5, 10, Some(ShapeKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(ShapeKind::T)));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_valid(5, 10));

    assert!(board.set(5, 10, None));
    assert!(board.is_valid(5, 10));

    assert!(!board.set(-1, 0, Some(ShapeKind::I)));
    assert!(!board.set(0, 20, Some(ShapeKind::I)));
}

#[test]
fn test_out_of_range_always_collides_regardless_of_contents() {
    let empty = Board::default();
    let mut full = Board::default();
    for y in 0..20 {
        for x in 0..10 {
            full.set(x, y, Some(ShapeKind::S));
        }
    }

    for kind in ShapeKind::ALL {
        let shape = get_shape(kind);
        let width = shape.cols() as i32;
        let height = shape.rows() as i32;
        for board in [&empty, &full] {
            // Left of column 0
            assert!(board.collides(&shape, -1, 5), "{:?}", kind);
            // Right edge past the last column
            assert!(board.collides(&shape, 10 - width + 1, 5), "{:?}", kind);
            // Below the floor
            assert!(board.collides(&shape, 3, 20 - height + 1), "{:?}", kind);
        }
        assert!(!empty.collides(&shape, 0, 0), "{:?}", kind);
        assert!(!empty.collides(&shape, 10 - width, 20 - height), "{:?}", kind);
    }
}

#[test]
fn test_rows_above_top_never_collide() {
    let mut board = Board::default();
    for x in 0..10 {
        board.set(x, 5, Some(ShapeKind::L));
    }
    let o = get_shape(ShapeKind::O);
    assert!(!board.collides(&o, 4, -2));
    assert!(!board.collides(&o, 4, -1));
    assert!(!board.collides(&o, 4, 3));
    assert!(board.collides(&o, 4, 4));
}

#[test]
fn test_collides_with_filled_cell() {
    let mut board = Board::default();
    board.set(5, 19, Some(ShapeKind::I));
    let o = get_shape(ShapeKind::O);
    assert!(board.collides(&o, 4, 18));
    assert!(board.collides(&o, 5, 18));
    assert!(!board.collides(&o, 6, 18));
    assert!(!board.collides(&o, 4, 17));
}

#[test]
fn test_board_row_full() {
    let mut board = Board::default();
    for x in 0..10 {
        board.set(x, 19, Some(ShapeKind::I));
    }
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(18));
    assert!(!board.is_row_full(20));
    assert_eq!(board.full_rows().collect::<Vec<_>>(), vec![19]);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::default();
    for x in 0..10 {
        board.set(x, 19, Some(ShapeKind::I));
        board.set(x, 17, Some(ShapeKind::I));
    }
    board.set(0, 18, Some(ShapeKind::T));
    board.set(9, 16, Some(ShapeKind::J));

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.get(0, 19), Some(Some(ShapeKind::T)));
    assert_eq!(board.get(9, 18), Some(Some(ShapeKind::J)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_four_rows_inserts_empty_rows_on_top() {
    let mut board = Board::default();
    for y in 16..20 {
        for x in 0..10 {
            board.set(x, y, Some(ShapeKind::I));
        }
    }
    board.set(3, 15, Some(ShapeKind::O));

    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.get(3, 19), Some(Some(ShapeKind::O)));
    assert_eq!(board.filled_count(), 1);
    assert_eq!(board.height(), 20);
    for y in 0..4 {
        assert!(board.rows().nth(y).unwrap().iter().all(|c| c.is_none()));
    }
}

#[test]
fn test_clear_without_full_rows_is_noop() {
    let mut board = Board::default();
    board.set(2, 19, Some(ShapeKind::Z));
    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_lock_piece_writes_cells() {
    let mut board = Board::default();
    let t = get_shape(ShapeKind::T);
    assert!(board.lock_piece(&t, 3, 18, ShapeKind::T));
    assert_eq!(board.filled_count(), 4);
    assert!(board.is_occupied(3, 18));
    assert!(board.is_occupied(4, 18));
    assert!(board.is_occupied(5, 18));
    assert!(board.is_occupied(4, 19));
}

#[test]
fn test_lock_piece_skips_cells_above_top() {
    let mut board = Board::default();
    let vertical_i = get_shape(ShapeKind::I).rotate_cw();
    assert!(!board.lock_piece(&vertical_i, 0, -2, ShapeKind::I));
    assert_eq!(board.filled_count(), 2);
    assert!(board.is_occupied(0, 0));
    assert!(board.is_occupied(0, 1));
}

#[test]
fn test_color_rows() {
    let mut rows = vec![vec![0u8; 4]; 3];
    rows[2] = vec![1, 2, 0, 7];
    let board = Board::from_color_rows(&rows).unwrap();
    assert_eq!(board.get(3, 2), Some(Some(ShapeKind::Z)));
    assert_eq!(board.color_rows(), rows);

    let mut out = vec![vec![9u8; 10]; 30];
    board.write_color_grid(&mut out);
    assert_eq!(out, rows);
}
