//! Polyomino definitions and the piece catalog
//!
//! Every shape is a set of (dx, dy) offsets from its anchor cell. dx grows
//! rightward, dy grows downward, and all offsets are non-negative so the
//! anchor is the top-left corner of the shape's bounding box.

use crate::rng::RandomSource;

/// A placeable shape
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Short tag, stable across releases
    pub id: &'static str,
    /// Cell offsets (dx, dy) relative to the anchor
    pub cells: &'static [(u8, u8)],
}

impl Piece {
    /// Number of cells in the footprint (also the points a placement earns)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Bounding box width in cells
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(dx, _)| dx as usize + 1).max().unwrap_or(0)
    }

    /// Bounding box height in cells
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(_, dy)| dy as usize + 1).max().unwrap_or(0)
    }

    /// Whether the shape covers the given offset
    pub fn contains(&self, dx: usize, dy: usize) -> bool {
        self.cells
            .iter()
            .any(|&(cx, cy)| cx as usize == dx && cy as usize == dy)
    }
}

/// The full catalog, in a fixed order
static PIECES: [Piece; 13] = [
    // Monomino
    Piece { id: "1", cells: &[(0, 0)] },
    // Dominoes
    Piece { id: "2h", cells: &[(0, 0), (1, 0)] },
    Piece { id: "2v", cells: &[(0, 0), (0, 1)] },
    // Straight trominoes
    Piece { id: "3h", cells: &[(0, 0), (1, 0), (2, 0)] },
    Piece { id: "3v", cells: &[(0, 0), (0, 1), (0, 2)] },
    // Bent trominoes
    // L3: X.   J3: .X
    //     XX       XX
    Piece { id: "L3", cells: &[(0, 0), (0, 1), (1, 1)] },
    Piece { id: "J3", cells: &[(1, 0), (0, 1), (1, 1)] },
    // S4: .XX   Z4: XX.
    //     XX.       .XX
    Piece { id: "S4", cells: &[(1, 0), (2, 0), (0, 1), (1, 1)] },
    Piece { id: "Z4", cells: &[(0, 0), (1, 0), (1, 1), (2, 1)] },
    Piece { id: "T4", cells: &[(0, 0), (1, 0), (2, 0), (1, 1)] },
    Piece { id: "O4", cells: &[(0, 0), (1, 0), (0, 1), (1, 1)] },
    Piece { id: "I4h", cells: &[(0, 0), (1, 0), (2, 0), (3, 0)] },
    Piece { id: "I4v", cells: &[(0, 0), (0, 1), (0, 2), (0, 3)] },
];

/// All placeable pieces
pub fn all_pieces() -> &'static [Piece] {
    &PIECES
}

/// Look up a piece by its tag
pub fn by_id(id: &str) -> Option<&'static Piece> {
    PIECES.iter().find(|piece| piece.id == id)
}

/// Pick a uniformly random piece
pub fn pick(rng: &mut dyn RandomSource) -> &'static Piece {
    &PIECES[rng.next_index(PIECES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_thirteen_unique_pieces() {
        let ids: HashSet<_> = all_pieces().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 13);
    }

    #[test]
    fn test_every_piece_is_anchored_at_origin() {
        for piece in all_pieces() {
            let min_dx = piece.cells.iter().map(|c| c.0).min().unwrap();
            let min_dy = piece.cells.iter().map(|c| c.1).min().unwrap();
            assert_eq!((min_dx, min_dy), (0, 0), "piece {}", piece.id);

            let unique: HashSet<_> = piece.cells.iter().collect();
            assert_eq!(unique.len(), piece.cell_count(), "piece {}", piece.id);
        }
    }

    #[test]
    fn test_bounding_box() {
        let s = by_id("S4").unwrap();
        assert_eq!((s.width(), s.height()), (3, 2));
        assert!(s.contains(2, 0));
        assert!(!s.contains(0, 0));

        let bar = by_id("I4v").unwrap();
        assert_eq!((bar.width(), bar.height()), (1, 4));
        assert_eq!(bar.cell_count(), 4);
    }

    #[test]
    fn test_pick_reaches_every_piece() {
        let mut rng = SeededRng::from_key("catalog");
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            seen.insert(pick(&mut rng).id);
        }
        assert_eq!(seen.len(), all_pieces().len());
    }
}
