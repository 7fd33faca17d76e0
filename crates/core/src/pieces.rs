//! Pieces module - tetromino shape templates and matrix rotation
//!
//! Every shape is a small rectangular matrix of filled/empty cells. Templates are
//! immutable: rotating produces a new matrix. There is no rotation system with
//! kick tables here; a rotation that does not fit at the current anchor simply
//! fails (see `Session::rotate`).

use crate::types::{ShapeKind, MAX_SHAPE_SIZE};

type Matrix = [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

/// Rectangular occupancy matrix of a piece, at most 4x4.
///
/// Cells outside `rows x cols` are always empty so two shapes compare equal
/// exactly when their visible matrices are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: Matrix,
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` for an empty, ragged or oversized matrix.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let rows: [&[u8]; 2] = [&[1, 1, 0], &[0, 1, 1]];
    /// let s = Shape::from_rows(&rows).unwrap();
    /// assert_eq!((s.rows(), s.cols()), (2, 3));
    ///
    /// let ragged: [&[u8]; 2] = [&[1, 1], &[1]];
    /// assert!(Shape::from_rows(&ragged).is_none());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if height > MAX_SHAPE_SIZE || width == 0 || width > MAX_SHAPE_SIZE {
            return None;
        }
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.as_ref().iter().enumerate() {
                cells[r][c] = value != 0;
            }
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    /// Height of the matrix
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Width of the matrix
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Offsets `(dx, dy)` of every filled cell, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols())
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i32, r as i32))
        })
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> usize {
        self.occupied().count()
    }

    /// Rotate 90° clockwise.
    ///
    /// For a `rows x cols` matrix the result is `cols x rows` with
    /// `new[r][c] = old[rows - 1 - c][r]`.
    ///
    /// ```
    /// use blockfall_core::{get_shape, Shape};
    /// use blockfall_core::types::ShapeKind;
    ///
    /// let i = get_shape(ShapeKind::I);
    /// let vertical = i.rotate_cw();
    /// assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
    /// assert_eq!(vertical.rotate_cw().rotate_cw().rotate_cw(), i);
    /// ```
    pub fn rotate_cw(&self) -> Shape {
        let rows = self.rows();
        let cols = self.cols();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (new_row, line) in cells.iter_mut().enumerate().take(cols) {
            for (new_col, cell) in line.iter_mut().enumerate().take(rows) {
                *cell = self.cells[rows - 1 - new_col][new_row];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Matrix as rows of 0/1 values (for observers)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| (0..self.cols()).map(|c| self.cells[r][c] as u8).collect())
            .collect()
    }
}

/// Template matrix for a shape kind, in spawn orientation
pub fn get_shape(kind: ShapeKind) -> Shape {
    match kind {
        ShapeKind::I => template(&[&[1, 1, 1, 1]]),
        ShapeKind::T => template(&[&[1, 1, 1], &[0, 1, 0]]),
        ShapeKind::L => template(&[&[1, 1, 1], &[1, 0, 0]]),
        ShapeKind::J => template(&[&[1, 1, 1], &[0, 0, 1]]),
        ShapeKind::O => template(&[&[1, 1], &[1, 1]]),
        ShapeKind::S => template(&[&[1, 1, 0], &[0, 1, 1]]),
        ShapeKind::Z => template(&[&[0, 1, 1], &[1, 1, 0]]),
    }
}

/// Templates are well-formed literals; copy them without validation
fn template(rows: &[&[u8]]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let width = rows.first().map_or(0, |row| row.len());
    for (r, row) in rows.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            cells[r][c] = value != 0;
        }
    }
    Shape {
        rows: rows.len() as u8,
        cols: width as u8,
        cells,
    }
}

/// Spawn column for a shape: horizontally centered on the board
pub fn spawn_x(board_cols: u16, shape: &Shape) -> i32 {
    (board_cols / 2) as i32 - (shape.cols() / 2) as i32
}

/// Spawn row for every shape
pub const SPAWN_Y: i32 = 0;
