//! Keyboard input mapping
//!
//! Turns crossterm key events into engine actions using the configured key
//! bindings. Holding a key relies on the terminal's own key repeat.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the engine
    Game(Action),
    Restart,
    Quit,
}

/// Key bindings resolved to key codes - supports multiple keys per command
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into a KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        match s.to_lowercase().as_str() {
            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "space" => Some(KeyCode::Char(' ')),
            "enter" => Some(KeyCode::Enter),
            "tab" => Some(KeyCode::Tab),
            "esc" | "escape" => Some(KeyCode::Esc),
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyCode::Char(c)),
                    _ => {
                        tracing::warn!("Ignoring unknown key binding {:?}", s);
                        None
                    }
                }
            }
        }
    }

    /// Parse a list of key strings, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            move_left: Self::parse_keys(&keys.move_left),
            move_right: Self::parse_keys(&keys.move_right),
            soft_drop: Self::parse_keys(&keys.soft_drop),
            rotate: Self::parse_keys(&keys.rotate),
            restart: Self::parse_keys(&keys.restart),
            quit: Self::parse_keys(&keys.quit),
        }
    }
}

/// Input handler
pub struct InputHandler {
    bindings: KeyBindings,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl InputHandler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Map a key event to a command, None if unbound or not a press
    pub fn key_down(&self, key: KeyEvent) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let code = normalize_key(key.code);
        let b = &self.bindings;

        if b.move_left.contains(&code) {
            Some(Command::Game(Action::MoveLeft))
        } else if b.move_right.contains(&code) {
            Some(Command::Game(Action::MoveRight))
        } else if b.soft_drop.contains(&code) {
            Some(Command::Game(Action::SoftDrop))
        } else if b.rotate.contains(&code) {
            Some(Command::Game(Action::Rotate))
        } else if b.restart.contains(&code) {
            Some(Command::Restart)
        } else if b.quit.contains(&code) {
            Some(Command::Quit)
        } else {
            None
        }
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
