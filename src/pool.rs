//! The tray of offered pieces
//!
//! Three pieces are dealt at a time. A new batch is dealt only once every
//! piece of the previous one has been placed.

use crate::piece::{self, Piece};
use crate::rng::RandomSource;
use tracing::warn;

/// Number of pieces dealt per batch
pub const POOL_SIZE: usize = 3;

/// One offered piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub piece: &'static Piece,
    pub consumed: bool,
}

/// The current batch of offered pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    slots: [Slot; POOL_SIZE],
}

impl Pool {
    /// Deal a fresh batch
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot {
                piece: piece::pick(rng),
                consumed: false,
            }),
        }
    }

    /// Build a pool from explicit pieces
    pub fn from_pieces(pieces: [&'static Piece; POOL_SIZE]) -> Self {
        Self {
            slots: pieces.map(|piece| Slot {
                piece,
                consumed: false,
            }),
        }
    }

    /// Replace every slot with a freshly picked piece
    pub fn refill(&mut self, rng: &mut dyn RandomSource) {
        for slot in &mut self.slots {
            slot.piece = piece::pick(rng);
            slot.consumed = false;
        }
    }

    /// Mark a slot as placed.
    ///
    /// The caller must have placed the piece already. Consuming an unknown or
    /// already consumed slot is rejected and returns false.
    pub fn consume(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if !slot.consumed => {
                slot.consumed = true;
                true
            }
            Some(_) => {
                warn!(index, "pool slot already consumed");
                false
            }
            None => {
                warn!(index, "pool slot out of range");
                false
            }
        }
    }

    /// The piece in slot `index`, if it is still on offer
    pub fn piece(&self, index: usize) -> Option<&'static Piece> {
        self.slots
            .get(index)
            .filter(|slot| !slot.consumed)
            .map(|slot| slot.piece)
    }

    pub fn all_consumed(&self) -> bool {
        self.slots.iter().all(|slot| slot.consumed)
    }

    /// Pieces still on offer, with their slot index
    pub fn active_pieces(&self) -> impl Iterator<Item = (usize, &'static Piece)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.consumed)
            .map(|(i, slot)| (i, slot.piece))
    }

    /// All slots, consumed or not
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}
