//! Active falling piece logic

use crate::board::Board;
use crate::tetromino::{Shape, TetrominoType};

/// A piece: a shape placed on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino (kept for coloring)
    pub kind: TetrominoType,
    /// Current shape, possibly rotated
    pub shape: Shape,
    /// Board column of the shape's left edge
    pub x: i32,
    /// Board row of the shape's top edge, may be negative above the board
    pub y: i32,
}

impl Piece {
    /// Create a new piece at the origin (used for the preview)
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x: 0,
            y: 0,
        }
    }

    /// Place this piece at the spawn position: horizontally centered, row 0
    pub fn spawned(&self, board_width: usize) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.clone(),
            x: (board_width / 2) as i32 - (self.shape.width() / 2) as i32,
            y: 0,
        }
    }

    /// Get the absolute (row, col) positions of every block
    pub fn block_positions(&self) -> Vec<(i32, i32)> {
        self.shape
            .filled_cells()
            .map(|(r, c)| (self.y + r as i32, self.x + c as i32))
            .collect()
    }

    /// Try to shift by (dx, dy), returns true if successful
    pub fn try_move(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        let (x, y) = (self.x + dx, self.y + dy);
        if board.collides(x, y, &self.shape) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    /// Try to rotate clockwise in place, no wall kicks
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotated_cw();
        if board.collides(self.x, self.y, &rotated) {
            return false;
        }
        self.shape = rotated;
        true
    }
}
