//! Key mapping from terminal events to front-end actions

use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use snapstack::POOL_SIZE;

/// Input actions the front-end can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Pick the tray slot with this index
    SelectSlot(usize),
    NextSlot,
    Place,
    Continue,
    NewRun,
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub move_up: Vec<KeyCode>,
    pub move_down: Vec<KeyCode>,
    pub place: Vec<KeyCode>,
    pub next_piece: Vec<KeyCode>,
    pub continue_game: Vec<KeyCode>,
    pub new_run: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!("ignoring unknown key binding {:?}", s);
                        return None;
                    }
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            move_left: Self::parse_keys(&keys.move_left),
            move_right: Self::parse_keys(&keys.move_right),
            move_up: Self::parse_keys(&keys.move_up),
            move_down: Self::parse_keys(&keys.move_down),
            place: Self::parse_keys(&keys.place),
            next_piece: Self::parse_keys(&keys.next_piece),
            continue_game: Self::parse_keys(&keys.continue_game),
            new_run: Self::parse_keys(&keys.new_run),
            quit: Self::parse_keys(&keys.quit),
        }
    }

    /// Map a key press to an action
    pub fn action(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);

        // Digits pick tray slots directly
        if let KeyCode::Char(c @ '1'..='9') = code {
            let slot = c as usize - '1' as usize;
            if slot < POOL_SIZE {
                return Some(Action::SelectSlot(slot));
            }
        }

        let table = [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.place, Action::Place),
            (&self.next_piece, Action::NextSlot),
            (&self.continue_game, Action::Continue),
            (&self.new_run, Action::NewRun),
            (&self.quit, Action::Quit),
        ];
        table
            .into_iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Name a key code the way settings files spell it
pub fn key_to_string(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        other => format!("{:?}", other),
    }
}
