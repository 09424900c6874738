//! Tetromino definitions and shapes
//!
//! Each of the 7 tetrominoes is defined once as a boolean matrix in its own
//! local frame (row 0 at the top). Rotation always builds a new [`Shape`].

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    T,
    L,
    J,
    O, // square
    Z,
    S,
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
        }
    }

    /// Get all tetromino types in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::T,
            TetrominoType::L,
            TetrominoType::J,
            TetrominoType::O,
            TetrominoType::Z,
            TetrominoType::S,
        ]
    }

    /// Get the spawn shape for this tetromino
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            TetrominoType::T => Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
            TetrominoType::L => Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
            TetrominoType::J => Shape::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoType::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            TetrominoType::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        }
    }
}

/// An immutable occupancy matrix, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from rows of 0/1 values. Rows shorter than the first are
    /// padded with empty cells.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut cells = vec![false; rows.len() * cols];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().take(cols).enumerate() {
                cells[r * cols + c] = value != 0;
            }
        }
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    /// Number of rows in the bounding matrix
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Number of columns in the bounding matrix
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Whether the local cell (row, col) is occupied
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Iterate over occupied local cells as (row, col)
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// Rotate 90° clockwise: transpose, then reverse each resulting row.
    pub fn rotated_cw(&self) -> Shape {
        let rows = self.cols;
        let cols = self.rows;
        let mut cells = vec![false; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                // row r of the transpose is column r of the source, reversed
                cells[r * cols + c] = self.is_filled(self.rows - 1 - c, r);
            }
        }
        Shape { rows, cols, cells }
    }
}
