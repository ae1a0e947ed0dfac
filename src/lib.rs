//! SNAP & STACK - a block placement puzzle engine
//!
//! Pieces are dealt three at a time and dropped anywhere on a square board.
//! Filling a whole row or column clears it for points and coins; the run
//! ends when none of the offered pieces fits.
//!
//! The crate holds the rules only. A front-end reads snapshots from
//! [`Game`] and calls back into it with (row, col, pool slot) requests.
//!
//! ```
//! use snapstack::{Game, MemoryStore, PlayMode, Profile};
//!
//! let mut game = Game::new(PlayMode::Daily("2024-05-01".into()), Profile::default(), MemoryStore::new());
//! let (slot, piece) = game.pool().active_pieces().next().unwrap();
//! assert!(game.board().can_place(0, 0, piece));
//! assert!(game.attempt_placement(0, 0, slot).placed);
//! assert_eq!(game.score().points, piece.cell_count() as u64);
//! ```

pub mod board;
pub mod game;
pub mod mode;
pub mod piece;
pub mod pool;
pub mod profile;
pub mod rng;
pub mod score;

pub use board::{Board, Cell, Tint, BOARD_SIZE};
pub use game::{Game, GameState, Placement};
pub use mode::PlayMode;
pub use piece::Piece;
pub use pool::{Pool, Slot, POOL_SIZE};
pub use profile::{FileStore, MemoryStore, Profile, ProfileStore, StoreError};
pub use rng::{EntropyRng, RandomSource, SeededRng};
pub use score::Score;
