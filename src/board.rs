//! Game board representation and collision detection

use crate::tetromino::Shape;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// The game board
///
/// Cells are plain occupied flags; locked blocks carry no identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Grid stored as [row][col], row 0 is the top, rows increase downward
    cells: Vec<Vec<bool>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty 20x10 board
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create an empty board with custom dimensions
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![false; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<bool> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }

    /// Mark a cell occupied
    /// Returns false if out of bounds
    pub fn fill(&mut self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        match self
            .cells
            .get_mut(row as usize)
            .and_then(|cells| cells.get_mut(col as usize))
        {
            Some(cell) => {
                *cell = true;
                true
            }
            None => false,
        }
    }

    /// Check whether `shape` placed with its top-left at (x, y) collides.
    ///
    /// Horizontal bounds and the floor always apply. Cells above the top
    /// (`y < 0`) are not checked against occupancy so a piece may straddle
    /// row 0.
    pub fn collides(&self, x: i32, y: i32, shape: &Shape) -> bool {
        shape.filled_cells().any(|(r, c)| {
            let board_x = x + c as i32;
            let board_y = y + r as i32;
            if board_x < 0 || board_x >= self.width as i32 || board_y >= self.height as i32 {
                return true;
            }
            board_y >= 0 && self.cells[board_y as usize][board_x as usize]
        })
    }

    /// Clear completed lines and return the number cleared
    ///
    /// Scans bottom to top. A cleared row is replaced by an empty row at the
    /// top, and the same index is examined again since the row above has
    /// shifted into it.
    pub fn clear_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut row = self.height;

        while row > 0 {
            if self.is_line_full(row - 1) {
                self.cells.remove(row - 1);
                self.cells.insert(0, vec![false; self.width]);
                lines_cleared += 1;
            } else {
                row -= 1;
            }
        }

        lines_cleared
    }

    /// Check if a line is completely filled
    pub fn is_line_full(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .is_some_and(|cells| cells.iter().all(|&filled| filled))
    }

    /// Number of occupied cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&filled| filled).count())
            .sum()
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    fn fill_row(board: &mut Board, row: i32) {
        for col in 0..board.width() as i32 {
            board.fill(row, col);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.width(), BOARD_WIDTH);
        assert_eq!(board.height(), BOARD_HEIGHT);
    }

    #[test]
    fn test_fill_and_get() {
        let mut board = Board::new();
        assert!(board.fill(5, 5));
        assert_eq!(board.get(5, 5), Some(true));
        assert_eq!(board.get(5, 6), Some(false));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_HEIGHT as i32, 0), None);
        assert_eq!(board.get(0, BOARD_WIDTH as i32), None);
        assert!(!board.fill(-1, 0));
        assert!(!board.fill(0, BOARD_WIDTH as i32));
        assert!(board.is_empty());
    }

    #[test]
    fn test_horizontal_i_past_right_edge_collides() {
        let board = Board::new();
        let bar = TetrominoType::I.shape();
        assert!(board.collides(8, 0, &bar));
        assert!(!board.collides(6, 0, &bar));
        assert!(board.collides(-1, 0, &bar));
    }

    #[test]
    fn test_floor_collides() {
        let board = Board::new();
        let square = TetrominoType::O.shape();
        assert!(!board.collides(0, BOARD_HEIGHT as i32 - 2, &square));
        assert!(board.collides(0, BOARD_HEIGHT as i32 - 1, &square));
    }

    #[test]
    fn test_cells_above_top_skip_occupancy_but_not_walls() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        let vertical = TetrominoType::I.shape().rotated_cw();
        // Entirely above the board: no occupancy check
        assert!(!board.collides(3, -4, &vertical));
        // Bottom cell reaches the filled row 0
        assert!(board.collides(3, -3, &vertical));
        // Walls still apply above the board
        assert!(board.collides(-1, -4, &vertical));
        assert!(board.collides(BOARD_WIDTH as i32, -4, &vertical));
    }

    #[test]
    fn test_occupied_cell_collides() {
        let mut board = Board::new();
        board.fill(10, 4);
        let t = TetrominoType::T.shape();
        // T stem sits at local (1, 1)
        assert!(board.collides(3, 9, &t));
        assert!(!board.collides(3, 8, &t));
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::new();
        let bottom = BOARD_HEIGHT as i32 - 1;
        fill_row(&mut board, bottom);
        board.fill(bottom - 1, 0);

        let cleared = board.clear_lines();
        assert_eq!(cleared, 1);
        // The block above the cleared row shifts down into it
        assert_eq!(board.get(bottom, 0), Some(true));
        assert_eq!(board.get(bottom - 1, 0), Some(false));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_rows_five_and_seven() {
        let mut board = Board::new();
        fill_row(&mut board, 5);
        fill_row(&mut board, 7);
        // Mixed rows around the full ones
        board.fill(4, 1);
        board.fill(6, 2);
        board.fill(8, 3);
        board.fill(0, 9);

        let before = board.filled_count();
        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.filled_count(), before - 2 * BOARD_WIDTH);

        // Rows above both cleared rows drop by two
        assert_eq!(board.get(6, 1), Some(true));
        assert_eq!(board.get(2, 9), Some(true));
        // Row between them drops by one
        assert_eq!(board.get(7, 2), Some(true));
        // Row below is untouched
        assert_eq!(board.get(8, 3), Some(true));
        // Two empty rows at the top
        assert!(board.rows().take(2).all(|row| row.iter().all(|&c| !c)));
        assert!(!board.is_line_full(5));
        assert!(!board.is_line_full(7));
    }

    #[test]
    fn test_clear_adjacent_lines_rechecks_same_row() {
        let mut board = Board::new();
        for row in 16..20 {
            fill_row(&mut board, row);
        }
        board.fill(15, 0);

        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board.get(19, 0), Some(true));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_small_board_compaction() {
        // 3 wide, 4 tall:
        // . # .      . . .
        // # # #  ->  . . .
        // # . .      . # .
        // # # #      # . .
        let mut board = Board::with_size(3, 4);
        assert_eq!((board.width(), board.height()), (3, 4));
        board.fill(0, 1);
        fill_row(&mut board, 1);
        board.fill(2, 0);
        fill_row(&mut board, 3);

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(2, 1), Some(true));
        assert_eq!(board.get(3, 0), Some(true));
        assert!(board.rows().take(2).all(|row| row.iter().all(|&c| !c)));
        // Floor and walls follow the custom size
        let square = crate::tetromino::TetrominoType::O.shape();
        assert!(board.collides(2, 0, &square));
        assert!(board.collides(0, 3, &square));
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut board = Board::new();
        board.fill(19, 0);
        board.fill(3, 4);
        let snapshot = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, snapshot);
    }
}
