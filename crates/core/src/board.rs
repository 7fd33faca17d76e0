//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid (20 x 10 by default) where each cell is empty
//! or holds the kind of the piece that locked there. Cells live in one flat
//! row-major vector; dimensions are fixed at creation.
//! Coordinates: (x, y) where x is the column (left to right) and y the row (top to
//! bottom). Rows above the board (y < 0) exist only for pieces, never for cells.

use crate::pieces::Shape;
use crate::types::{Cell, ShapeKind};

/// The game board - flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u16,
    cols: u16,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    /// Build a board from rows of color ids (0 = empty, 1-7 = shape kinds).
    ///
    /// Returns `None` when the rows are empty, ragged or contain an unknown id.
    pub fn from_color_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if width == 0 || height > u16::MAX as usize || width > u16::MAX as usize {
            return None;
        }

        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for &id in row {
                let cell = ShapeKind::from_color_id(id);
                if id != 0 && cell.is_none() {
                    return None;
                }
                cells.push(cell);
            }
        }

        Some(Self {
            rows: height as u16,
            cols: width as u16,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    /// Number of columns
    pub fn width(&self) -> u16 {
        self.cols
    }

    /// Number of rows
    pub fn height(&self) -> u16 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.cols as i32 || y < 0 || y >= self.rows as i32
    }

    /// Test placing `shape` with its top-left corner at (x, y).
    ///
    /// A filled shape cell collides when its column is outside the board, when
    /// its row is at or below the floor, or when it lands on a filled cell.
    /// Cells above the top edge (row < 0) never collide.
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.occupied().any(|(dx, dy)| {
            // Positions past the i32 range are off the board
            let (Some(bx), Some(by)) = (x.checked_add(dx), y.checked_add(dy)) else {
                return true;
            };
            if bx < 0 || bx >= self.cols as i32 || by >= self.rows as i32 {
                return true;
            }
            by >= 0 && self.is_occupied(bx, by)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        let width = self.cols as usize;
        let start = y * width;
        self.cells[start..start + width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Indices of all full rows, bottom to top
    pub fn full_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows as usize).rev().filter(|&y| self.is_row_full(y))
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Rows are judged against the board as it is before any removal; the
    /// surviving rows keep their order and the same number of empty rows are
    /// inserted at the top. Uses a two-pointer compaction without allocating.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.cols as usize;
        let mut cleared = 0;
        let mut write_y = self.rows as usize;

        // Scan from bottom to top
        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Empty the rows uncovered at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Write the filled cells of a piece onto the board.
    ///
    /// Cells above the top edge are skipped. Returns false if any cell was
    /// skipped that way (the piece locked partially out of view).
    pub fn lock_piece(&mut self, shape: &Shape, x: i32, y: i32, kind: ShapeKind) -> bool {
        let mut fully_visible = true;
        for (dx, dy) in shape.occupied() {
            let py = y.saturating_add(dy);
            if py < 0 {
                fully_visible = false;
                continue;
            }
            self.set(x.saturating_add(dx), py, Some(kind));
        }
        fully_visible
    }

    /// Number of filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Iterate over rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols.max(1) as usize)
    }

    /// Write the board as color ids into `out`, reusing its allocations
    pub fn write_color_grid(&self, out: &mut Vec<Vec<u8>>) {
        out.resize_with(self.rows as usize, Vec::new);
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.clear();
            dst.extend(src.iter().map(|cell| cell.map_or(0, ShapeKind::color_id)));
        }
    }

    /// Board as rows of color ids
    pub fn color_rows(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        self.write_color_grid(&mut out);
        out
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_ROWS, crate::types::DEFAULT_COLS)
    }
}
