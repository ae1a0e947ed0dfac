//! Front-end state: the cursor, the tray selection and status text

use crate::input::{Action, KeyBindings};
use snapstack::{Game, Piece, PlayMode, ProfileStore};

/// Everything the terminal front-end tracks around a [`Game`]
pub struct App<S: ProfileStore> {
    pub game: Game<S>,
    pub bindings: KeyBindings,
    /// Anchor cell of the selected piece (row, col)
    pub cursor: (i32, i32),
    /// Selected tray slot
    pub selected: usize,
    /// Last notable event, shown under the stats
    pub status: Option<String>,
    pub show_preview: bool,
}

impl<S: ProfileStore> App<S> {
    pub fn new(game: Game<S>, bindings: KeyBindings, show_preview: bool) -> Self {
        let mut app = Self {
            game,
            bindings,
            cursor: (0, 0),
            selected: 0,
            status: None,
            show_preview,
        };
        app.select_first_active();
        app
    }

    /// Piece currently picked from the tray
    pub fn selected_piece(&self) -> Option<&'static Piece> {
        self.game.pool().piece(self.selected)
    }

    /// Apply an action. Returns false when the player quits.
    pub fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_cursor(0, -1),
            Action::MoveRight => self.move_cursor(0, 1),
            Action::MoveUp => self.move_cursor(-1, 0),
            Action::MoveDown => self.move_cursor(1, 0),
            Action::SelectSlot(slot) => {
                if self.game.pool().piece(slot).is_some() {
                    self.selected = slot;
                }
            }
            Action::NextSlot => self.select_next(),
            Action::Place => self.place(),
            Action::Continue => self.continue_game(),
            Action::NewRun => {
                let mode = self.game.mode().clone();
                self.game.new_playthrough(mode);
                self.status = None;
                self.select_first_active();
            }
            Action::Quit => return false,
        }
        true
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let max = self.game.board().size() as i32 - 1;
        self.cursor.0 = (self.cursor.0 + d_row).clamp(0, max);
        self.cursor.1 = (self.cursor.1 + d_col).clamp(0, max);
    }

    fn place(&mut self) {
        if self.game.is_game_over() {
            return;
        }
        let (row, col) = self.cursor;
        let result = self.game.attempt_placement(row, col, self.selected);
        if !result.placed {
            self.status = Some("Doesn't fit there".to_string());
            return;
        }

        self.status = match result.lines_cleared {
            0 => None,
            1 => Some("Line clear!".to_string()),
            n => Some(format!("{} lines cleared!", n)),
        };
        if self.selected_piece().is_none() {
            self.select_first_active();
        }
    }

    /// Revive a finished run. The front-end grants the continuation directly.
    fn continue_game(&mut self) {
        if self.game.continue_with_clear().is_none() {
            return;
        }
        self.status = Some("Continued - a row and column were cleared".to_string());
        // the forced clear is not guaranteed to open room for every shape
        self.game.check_game_over();
    }

    fn select_first_active(&mut self) {
        if let Some((slot, _)) = self.game.pool().active_pieces().next() {
            self.selected = slot;
        }
    }

    fn select_next(&mut self) {
        let active: Vec<usize> = self.game.pool().active_pieces().map(|(i, _)| i).collect();
        if let Some(&next) = active
            .iter()
            .find(|&&i| i > self.selected)
            .or_else(|| active.first())
        {
            self.selected = next;
        }
    }

    /// Whether the game is in the daily challenge mode
    pub fn is_daily(&self) -> bool {
        matches!(self.game.mode(), PlayMode::Daily(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapstack::{MemoryStore, Profile};

    fn app() -> App<MemoryStore> {
        let game = Game::new(
            PlayMode::Daily("2024-07-04".into()),
            Profile::default(),
            MemoryStore::new(),
        );
        App::new(game, KeyBindings::default(), true)
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = app();
        app.handle(Action::MoveUp);
        app.handle(Action::MoveLeft);
        assert_eq!(app.cursor, (0, 0));
        for _ in 0..20 {
            app.handle(Action::MoveDown);
            app.handle(Action::MoveRight);
        }
        assert_eq!(app.cursor, (9, 9));
    }

    #[test]
    fn test_place_moves_selection_to_remaining_piece() {
        let mut app = app();
        assert_eq!(app.selected, 0);
        assert!(app.handle(Action::Place));
        assert_eq!(app.game.pool().piece(0), None);
        assert_eq!(app.selected, 1);
        assert!(app.game.score().points > 0);
        assert_eq!(app.game.score().placements, 1);
    }

    #[test]
    fn test_next_slot_wraps() {
        let mut app = app();
        app.handle(Action::NextSlot);
        app.handle(Action::NextSlot);
        assert_eq!(app.selected, 2);
        app.handle(Action::NextSlot);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_new_run_resets_score() {
        let mut app = app();
        app.handle(Action::Place);
        app.handle(Action::NewRun);
        assert_eq!(app.game.score().points, 0);
        assert!(app.game.board().is_empty());
        assert!(app.is_daily());
    }

    #[test]
    fn test_continue_while_playing_is_ignored() {
        let mut app = app();
        app.handle(Action::Continue);
        assert!(app.status.is_none());
        assert!(!app.handle(Action::Quit));
    }
}
