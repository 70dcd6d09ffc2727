//! Keyboard input mapping
//!
//! Translates terminal key presses into game actions using the configured
//! bindings. Repeat handling is left to the terminal's own key repeat.

use crate::game::Action;
use crate::settings::{KeyList, Settings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate_cw: Vec<KeyCode>,
    pub rotate_ccw: Vec<KeyCode>,
    pub hold: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub reset: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode, `None` for names we don't know
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &KeyList) -> Vec<KeyCode> {
        keys.names()
            .iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Unknown key name in bindings: {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate_cw: Self::parse_keys(&settings.keys.rotate_cw),
            rotate_ccw: Self::parse_keys(&settings.keys.rotate_ccw),
            hold: Self::parse_keys(&settings.keys.hold),
            pause: Self::parse_keys(&settings.keys.pause),
            reset: Self::parse_keys(&settings.keys.reset),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// The action bound to `code`, checked in a fixed priority order
    fn action_for(&self, code: KeyCode) -> Option<Action> {
        [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.soft_drop, Action::SoftDrop),
            (&self.hard_drop, Action::HardDrop),
            (&self.rotate_cw, Action::RotateCW),
            (&self.rotate_ccw, Action::RotateCCW),
            (&self.hold, Action::Hold),
            (&self.pause, Action::Pause),
            (&self.reset, Action::Reset),
            (&self.quit, Action::Quit),
        ]
        .into_iter()
        .find(|(keys, _)| keys.contains(&code))
        .map(|(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Maps key presses to actions
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press event
    pub fn key_down(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        self.bindings.action_for(normalize_key(key.code))
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Action::HardDrop));
        assert_eq!(input.key_down(press(KeyCode::Char('X'))), Some(Action::RotateCW));
        assert_eq!(input.key_down(press(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(input.key_down(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(input.key_down(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), Some(Action::Quit));
        // plain 'c' is hold
        assert_eq!(input.key_down(press(KeyCode::Char('c'))), Some(Action::Hold));
    }

    #[test]
    fn test_custom_bindings_skip_unknown_names() {
        let mut settings = Settings::default();
        settings.keys.hold = KeyList::new(["Tab", "NotAKey"]);
        let input = InputHandler::from_settings(&settings);
        assert_eq!(input.key_down(press(KeyCode::Tab)), Some(Action::Hold));
        assert_eq!(input.key_down(press(KeyCode::Char('c'))), None);
    }
}
