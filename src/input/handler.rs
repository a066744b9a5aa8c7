use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Replace the snake's heading
    Steer(Direction),
    Quit,
    None,
}

/// Keyboard layout for the human game
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => KeyAction::Quit,
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => KeyAction::Quit,
            code => heading_for(code).map_or(KeyAction::None, KeyAction::Steer),
        }
    }
}

/// Arrow keys and WASD, case-insensitive
fn heading_for(code: KeyCode) -> Option<Direction> {
    let heading = match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Direction::Up,
            's' => Direction::Down,
            'a' => Direction::Left,
            'd' => Direction::Right,
            _ => return None,
        },
        _ => return None,
    };
    Some(heading)
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
