//! Scoring rules

/// Points per cleared line
pub const LINE_BONUS: u64 = 10;
/// Coins per cleared line
pub const COINS_PER_LINE: u64 = 2;

/// Points for a single placement: one per cell, plus the line bonus
pub fn placement_points(cells: usize, lines: usize) -> u64 {
    cells as u64 + lines as u64 * LINE_BONUS
}

/// Coins earned by clearing `lines` lines
pub fn coins_for_lines(lines: usize) -> u64 {
    lines as u64 * COINS_PER_LINE
}

/// Score tracking for one playthrough
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Pieces placed
    pub placements: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one point per cell of a placed piece
    pub fn add_placement(&mut self, cells: usize) {
        self.points += placement_points(cells, 0);
        self.placements += 1;
    }

    /// Add the line bonus and return the coins it earns
    pub fn add_clear(&mut self, lines: usize) -> u64 {
        self.points += lines as u64 * LINE_BONUS;
        self.lines += lines as u32;
        coins_for_lines(lines)
    }
}
