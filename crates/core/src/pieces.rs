//! Pieces module - tetromino matrices, matrix rotation and wall kicks
//!
//! Each kind is stored once in its spawn orientation as a small square
//! matrix (2x2 for O, 4x4 for I, 3x3 for the rest). Other orientations are
//! produced by rotating the matrix 90 degrees, never looked up from a table.

use crate::types::{Gravity, PieceKind};

/// Side of the backing array; every catalogue matrix fits inside it.
pub const MATRIX_DIM: usize = 4;

/// Offset of a single mino relative to the matrix's top-left corner, `(x, y)`
pub type MinoOffset = (i8, i8);

/// Ordered wall kicks tried after the unkicked rotation collides.
///
/// `dy` is measured against gravity: negative values lift the piece away
/// from the floor, whichever way the floor currently is.
pub const KICKS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, -1),
    (1, -1),
    (-1, -1),
    (2, 0),
    (-2, 0),
    (0, -2),
];

/// A square occupancy matrix in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MATRIX_DIM]; MATRIX_DIM],
}

const I_ROWS: [[u8; MATRIX_DIM]; MATRIX_DIM] = [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
const O_ROWS: [[u8; MATRIX_DIM]; MATRIX_DIM] = [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]];
const T_ROWS: [[u8; MATRIX_DIM]; MATRIX_DIM] = [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]];
const S_ROWS: [[u8; MATRIX_DIM]; MATRIX_DIM] = [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]];
const Z_ROWS: [[u8; MATRIX_DIM]; MATRIX_DIM] = [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]];
const J_ROWS: [[u8; MATRIX_DIM]; MATRIX_DIM] = [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]];
const L_ROWS: [[u8; MATRIX_DIM]; MATRIX_DIM] = [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]];

impl Shape {
    fn from_rows(size: u8, rows: &[[u8; MATRIX_DIM]; MATRIX_DIM]) -> Self {
        let mut cells = [[false; MATRIX_DIM]; MATRIX_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                cells[r][c] = bit != 0;
            }
        }
        Self { size, cells }
    }

    /// Spawn orientation of a kind.
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(4, &I_ROWS),
            PieceKind::O => Self::from_rows(2, &O_ROWS),
            PieceKind::T => Self::from_rows(3, &T_ROWS),
            PieceKind::S => Self::from_rows(3, &S_ROWS),
            PieceKind::Z => Self::from_rows(3, &Z_ROWS),
            PieceKind::J => Self::from_rows(3, &J_ROWS),
            PieceKind::L => Self::from_rows(3, &L_ROWS),
        }
    }

    /// Side length of the square matrix.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Rotated 90 degrees clockwise: `out[c][n-1-r] = in[r][c]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MATRIX_DIM]; MATRIX_DIM];
        for r in 0..n {
            for c in 0..n {
                cells[c][n - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Rotated 90 degrees counter-clockwise: `out[n-1-c][r] = in[r][c]`
    pub fn rotated_ccw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MATRIX_DIM]; MATRIX_DIM];
        for r in 0..n {
            for c in 0..n {
                cells[n - 1 - c][r] = self.cells[r][c];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    pub fn rotated(&self, clockwise: bool) -> Self {
        if clockwise {
            self.rotated_cw()
        } else {
            self.rotated_ccw()
        }
    }

    /// Filled cells as `(x, y)` offsets, row-major.
    ///
    /// Every catalogue matrix and all of its rotations hold exactly four.
    pub fn minos(&self) -> [MinoOffset; 4] {
        let mut out = [(0, 0); 4];
        let mut i = 0;
        for r in 0..self.size as usize {
            for c in 0..self.size as usize {
                if self.cells[r][c] && i < 4 {
                    out[i] = (c as i8, r as i8);
                    i += 1;
                }
            }
        }
        debug_assert_eq!(i, 4, "tetromino matrix must hold four minos");
        out
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&filled| filled).count()
    }
}

/// Try to rotate a shape standing at (`x`, `y`), kicking if needed.
///
/// The unkicked position is tried first, then [`KICKS`] in order. Returns
/// the rotated shape and the applied offset, or `None` when every candidate
/// collides.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    clockwise: bool,
    gravity: Gravity,
    is_valid: impl Fn(i8, i8) -> bool,
) -> Option<(Shape, (i8, i8))> {
    let rotated = shape.rotated(clockwise);
    let minos = rotated.minos();

    std::iter::once((0, 0))
        .chain(KICKS.iter().map(|&(dx, dy)| (dx, dy * gravity.dy())))
        .find(|&(dx, dy)| {
            minos
                .iter()
                .all(|&(mx, my)| is_valid(x + dx + mx, y + dy + my))
        })
        .map(|offset| (rotated, offset))
}
