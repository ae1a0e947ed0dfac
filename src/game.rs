//! Core game state and logic
//!
//! [`Game`] runs one playthrough at a time: it owns the board, the pool of
//! offered pieces and the score, and applies every scoring event to the
//! player profile, which it persists through the injected store.

use crate::board::{Board, Tint, BOARD_SIZE};
use crate::mode::PlayMode;
use crate::pool::Pool;
use crate::profile::{Profile, ProfileStore};
use crate::rng::{EntropyRng, RandomSource};
use crate::score::Score;
use tracing::{debug, info, trace, warn};

/// Playthrough state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// No offered piece fits anywhere. Left only by a continuation or a new playthrough.
    GameOver,
}

/// Outcome of a placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub placed: bool,
    pub lines_cleared: usize,
}

impl Placement {
    fn rejected() -> Self {
        Self::default()
    }
}

/// The main game struct
pub struct Game<S: ProfileStore> {
    board: Board,
    pool: Pool,
    score: Score,
    state: GameState,
    mode: PlayMode,
    /// Piece picks and continuation clears
    rng: Box<dyn RandomSource>,
    /// Cell tints only, kept apart so seeded runs stay reproducible
    tint_rng: EntropyRng,
    profile: Profile,
    store: S,
}

impl<S: ProfileStore> Game<S> {
    /// Start a playthrough on a standard 10x10 board
    pub fn new(mode: PlayMode, profile: Profile, store: S) -> Self {
        Self::with_board_size(mode, BOARD_SIZE, profile, store)
    }

    /// Start a playthrough on a `size` x `size` board
    pub fn with_board_size(mode: PlayMode, size: usize, profile: Profile, store: S) -> Self {
        let mut rng = mode.gameplay_rng();
        let pool = Pool::new(rng.as_mut());
        info!(mode = mode.name(), size, "new playthrough");

        let mut game = Self {
            board: Board::new(size),
            pool,
            score: Score::new(),
            state: GameState::Playing,
            mode,
            rng,
            tint_rng: EntropyRng::new(),
            profile,
            store,
        };
        game.persist();
        game
    }

    /// Throw away the current board and score and deal a fresh pool
    pub fn new_playthrough(&mut self, mode: PlayMode) {
        self.rng = mode.gameplay_rng();
        self.board = Board::new(self.board.size());
        self.pool = Pool::new(self.rng.as_mut());
        self.score = Score::new();
        self.state = GameState::Playing;
        info!(mode = mode.name(), "new playthrough");
        self.mode = mode;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mode(&self) -> &PlayMode {
        &self.mode
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Place the piece from pool slot `pool_index` anchored at (row, col).
    ///
    /// On success the piece scores one point per cell, full lines are cleared
    /// for 10 points and 2 coins each, the slot is consumed (dealing a new
    /// batch once all three are gone) and the game-over check runs. On
    /// failure nothing changes.
    pub fn attempt_placement(&mut self, row: i32, col: i32, pool_index: usize) -> Placement {
        if self.state != GameState::Playing {
            warn!(row, col, pool_index, "placement requested after game over");
            return Placement::rejected();
        }
        let Some(piece) = self.pool.piece(pool_index) else {
            warn!(pool_index, "placement requested for an inactive pool slot");
            return Placement::rejected();
        };
        if !self.board.can_place(row, col, piece) {
            trace!(row, col, piece = piece.id, "placement does not fit");
            return Placement::rejected();
        }

        let tint = self.next_tint();
        self.board.place(row, col, piece, tint);
        self.score.add_placement(piece.cell_count());

        let lines_cleared = self.board.clear_full_lines();
        if lines_cleared > 0 {
            self.profile.coins += self.score.add_clear(lines_cleared);
        }

        self.pool.consume(pool_index);
        if self.pool.all_consumed() {
            self.pool.refill(self.rng.as_mut());
        }

        self.profile.record_score(self.score.points);
        self.persist();
        debug!(
            row,
            col,
            piece = piece.id,
            lines_cleared,
            score = self.score.points,
            "piece placed"
        );

        self.check_game_over();
        Placement {
            placed: true,
            lines_cleared,
        }
    }

    /// Whether any offered piece fits anywhere on the board
    pub fn has_any_move(&self) -> bool {
        let size = self.board.size() as i32;
        self.pool.active_pieces().any(|(_, piece)| {
            (0..size).any(|row| (0..size).any(|col| self.board.can_place(row, col, piece)))
        })
    }

    /// End the playthrough if no move is left. Returns whether the game is over.
    pub fn check_game_over(&mut self) -> bool {
        if self.state == GameState::GameOver {
            return true;
        }
        if self.has_any_move() {
            return false;
        }

        self.state = GameState::GameOver;
        self.profile.record_game_over();
        self.persist();
        info!(
            score = self.score.points,
            best = self.profile.best,
            interstitial_due = self.profile.interstitial_due(),
            "game over"
        );
        true
    }

    /// Revive a finished game by emptying one random row and one random column.
    ///
    /// Only valid after game over; returns the cleared (row, col), or `None`
    /// without touching anything while still playing. Score and coins are
    /// left alone.
    pub fn continue_with_clear(&mut self) -> Option<(usize, usize)> {
        if self.state != GameState::GameOver {
            warn!("continuation requested while still playing");
            return None;
        }

        let size = self.board.size();
        let row = self.rng.next_index(size);
        let col = self.rng.next_index(size);
        self.board.clear_cross(row, col);
        self.state = GameState::Playing;
        info!(row, col, "continued after game over");
        Some((row, col))
    }

    /// Update the daily streak for today's run
    pub fn record_daily(&mut self, yesterday: &str) {
        let PlayMode::Daily(today) = &self.mode else {
            return;
        };
        let today = today.clone();
        self.profile.record_daily(&today, yesterday);
        self.persist();
    }

    fn next_tint(&mut self) -> Tint {
        if self.tint_rng.next_f64() < 0.5 {
            Tint::Primary
        } else {
            Tint::Secondary
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.profile.save(&mut self.store) {
            warn!("could not save profile: {}", e);
        }
    }
}

#[cfg(test)]
impl<S: ProfileStore> Game<S> {
    /// Playthrough with a hand-built board and pool
    pub(crate) fn with_parts(board: Board, pool: Pool, rng: Box<dyn RandomSource>, store: S) -> Self {
        Self {
            board,
            pool,
            score: Score::new(),
            state: GameState::Playing,
            mode: PlayMode::Free,
            rng,
            tint_rng: EntropyRng::with_seed(0),
            profile: Profile::default(),
            store,
        }
    }
}
