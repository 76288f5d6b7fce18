//! Board module - the occupancy grid
//!
//! The board is a `width x height` grid where each cell is empty or tagged with
//! the piece kind that locked there. Storage is a flat row-major vector sized
//! once per session.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Row 0 is the top edge of the screen whatever the gravity direction; the
//! "floor" is the bottom row under [`Gravity::Down`] and row 0 under
//! [`Gravity::Up`].

use arrayvec::ArrayVec;

use crate::types::{Cell, Gravity, PieceKind, MAX_BOARD_DIM};

/// Row indices removed by one clear, in floor-to-ceiling scan order.
pub type ClearedRows = ArrayVec<u8, { MAX_BOARD_DIM as usize }>;

/// The game board, flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Dimensions are clamped to `1..=MAX_BOARD_DIM`; callers going through
    /// [`crate::EngineConfig::validate`] never hit the clamp.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.clamp(1, MAX_BOARD_DIM);
        let height = height.clamp(1, MAX_BOARD_DIM);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Cells of row `y`, left to right. `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        self.cells.get(start..start + width)
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Row index of the `i`-th row counted from the floor.
    #[inline(always)]
    fn row_from_floor(&self, i: usize, gravity: Gravity) -> usize {
        match gravity {
            Gravity::Down => self.height as usize - 1 - i,
            Gravity::Up => i,
        }
    }

    fn copy_row(&mut self, src: usize, dst: usize) {
        let width = self.width as usize;
        self.cells
            .copy_within(src * width..src * width + width, dst * width);
    }

    fn clear_row(&mut self, y: usize) {
        let width = self.width as usize;
        self.cells[y * width..y * width + width].fill(None);
    }

    /// Remove every full row at once and compact the rest towards the floor.
    ///
    /// One empty row per removed row appears at the ceiling edge, so the row
    /// count never changes. Two-pointer pass, no allocation.
    pub fn clear_full_rows(&mut self, gravity: Gravity) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let height = self.height as usize;
        let mut kept = 0usize;

        for i in 0..height {
            let read_y = self.row_from_floor(i, gravity);
            if self.is_row_full(read_y) {
                cleared.push(read_y as u8);
                continue;
            }
            let write_y = self.row_from_floor(kept, gravity);
            if write_y != read_y {
                self.copy_row(read_y, write_y);
            }
            kept += 1;
        }

        for i in kept..height {
            let y = self.row_from_floor(i, gravity);
            self.clear_row(y);
        }

        cleared
    }

    /// Write the given absolute cells into the board.
    ///
    /// Destructive merge: whatever was in the cell is replaced. Out-of-bounds
    /// cells are skipped. Returns the number of cells written.
    pub fn merge_piece(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> usize {
        cells
            .iter()
            .filter(|&&(x, y)| self.set(x, y, Some(kind)))
            .count()
    }

    /// Mirror the board vertically (row order reversed).
    pub fn reverse_rows(&mut self) {
        let height = self.height as usize;
        let width = self.width as usize;
        for y in 0..height / 2 {
            let other = height - 1 - y;
            for x in 0..width {
                self.cells.swap(y * width + x, other * width + x);
            }
        }
    }

    /// Empty the `count` rows furthest from the floor (the spawn edge).
    pub fn clear_ceiling_band(&mut self, count: u8, gravity: Gravity) {
        let height = self.height as usize;
        for i in 0..(count as usize).min(height) {
            let y = self.row_from_floor(height - 1 - i, gravity);
            self.clear_row(y);
        }
    }

    /// Let every block fall towards the floor until nothing moves.
    ///
    /// Each pass walks rows from the one just above the floor outwards and
    /// moves a block one cell whenever the cell below it (in the gravity
    /// direction) is empty. Passes repeat until one makes no move. Returns the
    /// total number of single-cell moves.
    pub fn settle(&mut self, gravity: Gravity) -> u32 {
        let height = self.height as usize;
        let width = self.width as i8;
        let dy = gravity.dy();
        let mut total = 0u32;

        loop {
            let mut moved = 0u32;
            for i in 1..height {
                let y = self.row_from_floor(i, gravity) as i8;
                for x in 0..width {
                    let Some(Some(kind)) = self.get(x, y) else {
                        continue;
                    };
                    let mut cy = y;
                    while self.is_valid(x, cy + dy) {
                        self.set(x, cy + dy, Some(kind));
                        self.set(x, cy, None);
                        cy += dy;
                        moved += 1;
                    }
                }
            }
            if moved == 0 {
                break;
            }
            total += moved;
        }

        total
    }

    /// Read-only view of the cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(
            crate::types::DEFAULT_BOARD_WIDTH,
            crate::types::DEFAULT_BOARD_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..board.width() as i8 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(20, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(19, 0), Some(19));
        assert_eq!(board.index(0, 1), Some(20));
        assert_eq!(board.index(19, 19), Some(399));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(20, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_non_square() {
        let mut board = Board::new(10, 6);
        assert_eq!(board.cells().len(), 60);
        assert!(board.set(9, 5, Some(PieceKind::T)));
        assert!(!board.set(10, 5, Some(PieceKind::T)));
        assert_eq!(board.row(5).map(|row| row[9]), Some(Some(PieceKind::T)));
        assert_eq!(board.row(6), None);
        assert!(!board.is_row_full(6));
        assert_eq!(board.rows().count(), 6);
    }

    #[test]
    fn test_clear_full_rows_down_inserts_at_top() {
        let mut board = Board::new(4, 6);
        fill_row(&mut board, 5);
        fill_row(&mut board, 3);
        board.set(1, 4, Some(PieceKind::T));
        board.set(2, 2, Some(PieceKind::S));

        let cleared = board.clear_full_rows(Gravity::Down);
        assert_eq!(cleared.as_slice(), &[5, 3]);

        // Row 4 fell to the floor, row 2 fell two rows.
        assert_eq!(board.get(1, 5), Some(Some(PieceKind::T)));
        assert_eq!(board.get(2, 4), Some(Some(PieceKind::S)));
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.rows().count(), 6);
    }

    #[test]
    fn test_clear_full_rows_up_inserts_at_bottom() {
        let mut board = Board::new(4, 6);
        fill_row(&mut board, 0);
        board.set(3, 1, Some(PieceKind::L));

        let cleared = board.clear_full_rows(Gravity::Up);
        assert_eq!(cleared.as_slice(), &[0]);
        assert_eq!(board.get(3, 0), Some(Some(PieceKind::L)));
        assert!(board.row(5).unwrap().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_reverse_rows() {
        let mut board = Board::new(3, 5);
        board.set(0, 0, Some(PieceKind::I));
        board.set(2, 3, Some(PieceKind::Z));
        board.reverse_rows();
        assert_eq!(board.get(0, 4), Some(Some(PieceKind::I)));
        assert_eq!(board.get(2, 1), Some(Some(PieceKind::Z)));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_clear_ceiling_band() {
        let mut board = Board::new(3, 6);
        for y in 0..6 {
            board.set(0, y, Some(PieceKind::O));
        }
        board.clear_ceiling_band(2, Gravity::Down);
        assert!(board.is_valid(0, 0));
        assert!(board.is_valid(0, 1));
        assert!(board.is_occupied(0, 2));

        board.clear_ceiling_band(2, Gravity::Up);
        assert!(board.is_valid(0, 5));
        assert!(board.is_valid(0, 4));
        assert!(board.is_occupied(0, 3));
    }

    #[test]
    fn test_settle_down_and_up() {
        let mut board = Board::new(2, 5);
        board.set(0, 0, Some(PieceKind::J));
        board.set(0, 2, Some(PieceKind::L));
        board.set(1, 1, Some(PieceKind::T));

        let moves = board.settle(Gravity::Down);
        assert!(moves > 0);
        assert_eq!(board.get(0, 4), Some(Some(PieceKind::L)));
        assert_eq!(board.get(0, 3), Some(Some(PieceKind::J)));
        assert_eq!(board.get(1, 4), Some(Some(PieceKind::T)));

        board.settle(Gravity::Up);
        assert_eq!(board.get(0, 0), Some(Some(PieceKind::J)));
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::L)));
        assert_eq!(board.get(1, 0), Some(Some(PieceKind::T)));
        assert_eq!(board.settle(Gravity::Up), 0);
    }

    #[test]
    fn test_merge_piece_skips_out_of_bounds() {
        let mut board = Board::new(4, 4);
        let written = board.merge_piece(&[(0, 0), (1, 0), (-1, 0), (0, 4)], PieceKind::O);
        assert_eq!(written, 2);
        assert_eq!(board.occupied_count(), 2);
    }
}
