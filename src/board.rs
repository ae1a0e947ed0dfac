//! Game board representation, placement legality and line clearing

use crate::piece::Piece;
use tracing::debug;

/// Default board edge length
pub const BOARD_SIZE: usize = 10;

/// Palette slot used to tint a filled cell. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Primary,
    Secondary,
}

/// A cell on the board - either empty or filled with a tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Tint),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board, a square grid addressed as (row, col) with row 0 on top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major, `size * size` cells
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

impl Board {
    /// Create an empty `size` x `size` board. The smallest board is 1x1.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Edge length
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    /// On-board (row, col) of a piece cell offset from the anchor, if any
    fn offset(&self, row: i32, col: i32, (dx, dy): (u8, u8)) -> Option<(usize, usize)> {
        let r = row.checked_add(i32::from(dy))?;
        let c = col.checked_add(i32::from(dx))?;
        self.index(r, c)?;
        Some((r as usize, c as usize))
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Whether (row, col) is on the board and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(|cell| cell.is_filled())
    }

    /// Check whether `piece` anchored at (row, col) fits entirely on empty cells
    pub fn can_place(&self, row: i32, col: i32, piece: &Piece) -> bool {
        piece.cells.iter().all(|&cell| {
            self.offset(row, col, cell)
                .is_some_and(|(r, c)| self.cells[r * self.size + c].is_empty())
        })
    }

    /// Place `piece` at (row, col), filling its footprint with `tint`.
    /// Returns false and leaves the board untouched if the placement is illegal.
    pub fn place(&mut self, row: i32, col: i32, piece: &Piece, tint: Tint) -> bool {
        if !self.can_place(row, col, piece) {
            return false;
        }
        for &cell in piece.cells {
            if let Some((r, c)) = self.offset(row, col, cell) {
                self.cells[r * self.size + c] = Cell::Filled(tint);
            }
        }
        true
    }

    /// The on-board cells a placement at (row, col) would cover
    pub fn footprint<'a>(
        &'a self,
        row: i32,
        col: i32,
        piece: &'a Piece,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        piece
            .cells
            .iter()
            .filter_map(move |&cell| self.offset(row, col, cell))
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row * self.size..(row + 1) * self.size]
            .iter()
            .all(|cell| cell.is_filled())
    }

    fn is_col_full(&self, col: usize) -> bool {
        (0..self.size).all(|row| self.cells[row * self.size + col].is_filled())
    }

    /// Clear every full row and column at once and return how many lines were full.
    ///
    /// A row and a column that cross count as two lines; their shared cell is
    /// simply emptied.
    pub fn clear_full_lines(&mut self) -> usize {
        let full_rows: Vec<usize> = (0..self.size).filter(|&r| self.is_row_full(r)).collect();
        let full_cols: Vec<usize> = (0..self.size).filter(|&c| self.is_col_full(c)).collect();

        let total = full_rows.len() + full_cols.len();
        if total == 0 {
            return 0;
        }

        for &row in &full_rows {
            self.clear_row(row);
        }
        for &col in &full_cols {
            self.clear_col(col);
        }

        debug!(rows = ?full_rows, cols = ?full_cols, "cleared full lines");
        total
    }

    /// Empty one whole row and one whole column regardless of their contents
    pub fn clear_cross(&mut self, row: usize, col: usize) {
        if row < self.size {
            self.clear_row(row);
        }
        if col < self.size {
            self.clear_col(col);
        }
    }

    fn clear_row(&mut self, row: usize) {
        self.cells[row * self.size..(row + 1) * self.size].fill(Cell::Empty);
    }

    fn clear_col(&mut self, col: usize) {
        for row in 0..self.size {
            self.cells[row * self.size + col] = Cell::Empty;
        }
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::by_id;

    fn mono() -> &'static Piece {
        by_id("1").unwrap()
    }

    fn fill_row(board: &mut Board, row: i32) {
        for col in 0..board.size() as i32 {
            assert!(board.place(row, col, mono(), Tint::Primary));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(board.size(), BOARD_SIZE);
        assert_eq!(board.rows().count(), BOARD_SIZE);
        assert!(board.rows().all(|row| row.len() == BOARD_SIZE));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::default();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_SIZE as i32, 0), None);
        assert_eq!(board.get(0, BOARD_SIZE as i32), None);
    }

    #[test]
    fn test_place_marks_footprint() {
        let mut board = Board::default();
        let t = by_id("T4").unwrap();
        assert!(board.place(3, 4, t, Tint::Secondary));
        for &(dx, dy) in t.cells {
            assert_eq!(
                board.get(3 + dy as i32, 4 + dx as i32),
                Some(Cell::Filled(Tint::Secondary))
            );
        }
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let board = Board::default();
        let bar = by_id("I4h").unwrap();
        assert!(board.can_place(0, 6, bar));
        assert!(!board.can_place(0, 7, bar));
        assert!(!board.can_place(-1, 0, bar));
        assert!(!board.can_place(10, 0, mono()));
    }

    #[test]
    fn test_can_place_matches_cellwise_check() {
        let mut board = Board::default();
        board.place(4, 4, by_id("O4").unwrap(), Tint::Primary);
        board.place(0, 0, by_id("I4v").unwrap(), Tint::Primary);

        for piece in crate::piece::all_pieces() {
            for row in -2..12 {
                for col in -2..12 {
                    let expected = piece.cells.iter().all(|&(dx, dy)| {
                        let (r, c) = (row + dy as i32, col + dx as i32);
                        (0..10).contains(&r) && (0..10).contains(&c) && !board.is_occupied(r, c)
                    });
                    assert_eq!(board.can_place(row, col, piece), expected);
                }
            }
        }
    }

    #[test]
    fn test_illegal_place_leaves_board_unchanged() {
        let mut board = Board::default();
        board.place(0, 1, mono(), Tint::Primary);
        let before = board.clone();

        // overlaps (0, 1)
        assert!(!board.place(0, 0, by_id("2h").unwrap(), Tint::Secondary));
        // hangs off the right edge
        assert!(!board.place(5, 9, by_id("2h").unwrap(), Tint::Secondary));
        assert_eq!(board, before);
    }

    #[test]
    fn test_no_full_lines_is_noop() {
        let mut board = Board::default();
        board.place(2, 2, by_id("S4").unwrap(), Tint::Primary);
        let before = board.clone();
        assert_eq!(board.clear_full_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_single_row() {
        let mut board = Board::default();
        fill_row(&mut board, 0);
        board.place(1, 0, mono(), Tint::Secondary);

        assert_eq!(board.clear_full_lines(), 1);
        assert!(board.rows().next().unwrap().iter().all(|c| c.is_empty()));
        // rows do not shift
        assert!(board.is_occupied(1, 0));
    }

    #[test]
    fn test_clear_single_column() {
        let mut board = Board::default();
        for row in 0..10 {
            board.place(row, 3, mono(), Tint::Primary);
        }
        assert_eq!(board.clear_full_lines(), 1);
        assert!(board.is_empty());
    }

    #[test]
    fn test_crossing_row_and_column_count_twice() {
        let mut board = Board::default();
        for i in 0..10 {
            if i != 5 {
                board.place(5, i, mono(), Tint::Primary);
                board.place(i, 5, mono(), Tint::Primary);
            }
        }
        // the shared cell completes both lines
        assert!(board.place(5, 5, mono(), Tint::Secondary));
        assert_eq!(board.clear_full_lines(), 2);
        assert_eq!(board.get(5, 5), Some(Cell::Empty));
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_cross_ignores_fullness() {
        let mut board = Board::default();
        board.place(2, 0, mono(), Tint::Primary);
        board.place(0, 7, mono(), Tint::Primary);
        board.place(9, 9, mono(), Tint::Primary);

        board.clear_cross(2, 7);
        assert!(!board.is_occupied(2, 0));
        assert!(!board.is_occupied(0, 7));
        assert!(board.is_occupied(9, 9));
    }

    #[test]
    fn test_footprint_skips_offboard_cells() {
        let board = Board::default();
        let bar = by_id("I4h").unwrap();
        let cells: Vec<_> = board.footprint(0, 8, bar).collect();
        assert_eq!(cells, vec![(0, 8), (0, 9)]);
    }

    #[test]
    fn test_custom_size() {
        let mut board = Board::new(5);
        fill_row(&mut board, 4);
        assert!(!board.can_place(0, 5, mono()));
        assert_eq!(board.clear_full_lines(), 1);
    }

    #[test]
    fn test_extreme_anchors_are_rejected() {
        let mut board = Board::default();
        let square = by_id("O4").unwrap();
        for (row, col) in [(i32::MAX, i32::MAX), (i32::MAX, 0), (0, i32::MAX), (i32::MIN, i32::MIN)] {
            assert!(!board.can_place(row, col, square));
            assert!(!board.place(row, col, square, Tint::Primary));
            assert_eq!(board.footprint(row, col, square).count(), 0);
        }
        assert!(board.is_empty());
    }

    #[test]
    fn test_zero_size_becomes_single_cell() {
        let mut board = Board::new(0);
        assert_eq!(board.size(), 1);
        assert_eq!(board.rows().count(), 1);
        assert!(board.place(0, 0, mono(), Tint::Primary));
        assert!(!board.can_place(0, 0, mono()));
        assert_eq!(board.clear_full_lines(), 2);
        assert!(board.is_empty());
    }
}
