use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::textarea::TextArea;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("Empty key binding")]
    EmptyBinding,

    #[error("Unknown modifier '{modifier}' in key binding '{binding}'")]
    UnknownModifier { modifier: String, binding: String },

    #[error("Unknown key '{0}'")]
    UnknownKey(String),

    #[error("Shift cannot modify a character key in '{0}'; bind the shifted character instead")]
    ShiftedChar(String),
}

/// An editing operation a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Produced for unbound printable keys; cannot be bound from config.
    #[serde(skip)]
    TypeChar(char),
    Newline,
    BackSpaceChar,
    DeleteChar,
    DeleteToStartOfLine,
    Clear,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    GoToStartOfLine,
    GoToEndOfLine,
    ToggleOverwrite,
    Quit,
}

impl Action {
    /// Runs the action against `area`. `Quit` leaves the area untouched.
    pub fn apply(self, area: &mut TextArea) {
        match self {
            Action::TypeChar(c) => area.type_rune(c),
            Action::Newline => area.type_rune('\n'),
            Action::BackSpaceChar => area.back_space_char(),
            Action::DeleteChar => area.delete_char(),
            Action::DeleteToStartOfLine => area.delete_to_start_of_line(),
            Action::Clear => area.clear(),
            Action::MoveLeft => area.move_cursor_left(),
            Action::MoveRight => area.move_cursor_right(),
            Action::MoveUp => area.move_cursor_up(),
            Action::MoveDown => area.move_cursor_down(),
            Action::GoToStartOfLine => area.go_to_start_of_line(),
            Action::GoToEndOfLine => area.go_to_end_of_line(),
            Action::ToggleOverwrite => area.toggle_overwrite(),
            Action::Quit => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Normalizes an incoming event. Terminals report SHIFT alongside
    /// already-shifted characters, so it is dropped for `Char` keys.
    fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        if let KeyCode::Char(_) = event.code {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self::normalized(event.code, modifiers)
    }

    /// Ctrl and Alt chords compare on the lowercase character, so `ctrl+U`
    /// and a Ctrl+u press meet on the same binding.
    fn normalized(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let code = match code {
            KeyCode::Char(c)
                if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                KeyCode::Char(c.to_ascii_lowercase())
            }
            other => other,
        };
        Self::new(code, modifiers)
    }
}

/// Parses bindings such as `ctrl+u`, `alt+enter`, `Home` or `x`.
impl FromStr for KeyBinding {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeymapError::EmptyBinding);
        }

        let (modifier_part, key_part) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        let mut modifiers = KeyModifiers::NONE;
        for name in modifier_part.split('+').filter(|m| !m.is_empty()) {
            modifiers |= match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => {
                    return Err(KeymapError::UnknownModifier {
                        modifier: name.to_string(),
                        binding: s.to_string(),
                    })
                }
            };
        }

        let code = parse_key_code(key_part)?;
        if matches!(code, KeyCode::Char(_)) && modifiers.contains(KeyModifiers::SHIFT) {
            return Err(KeymapError::ShiftedChar(s.to_string()));
        }
        Ok(Self::normalized(code, modifiers))
    }
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(KeymapError::UnknownKey(key.to_string())),
        },
    };
    Ok(code)
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) if self.modifiers.contains(KeyModifiers::CONTROL) => {
                write!(f, "{}", c.to_ascii_uppercase())
            }
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Maps key presses to [`Action`]s.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let defaults = [
            (KeyBinding::plain(KeyCode::Backspace), Action::BackSpaceChar),
            (KeyBinding::ctrl('h'), Action::BackSpaceChar),
            (KeyBinding::plain(KeyCode::Delete), Action::DeleteChar),
            (KeyBinding::ctrl('d'), Action::DeleteChar),
            (KeyBinding::plain(KeyCode::Left), Action::MoveLeft),
            (KeyBinding::ctrl('b'), Action::MoveLeft),
            (KeyBinding::plain(KeyCode::Right), Action::MoveRight),
            (KeyBinding::ctrl('f'), Action::MoveRight),
            (KeyBinding::plain(KeyCode::Up), Action::MoveUp),
            (KeyBinding::ctrl('p'), Action::MoveUp),
            (KeyBinding::plain(KeyCode::Down), Action::MoveDown),
            (KeyBinding::ctrl('n'), Action::MoveDown),
            (KeyBinding::plain(KeyCode::Home), Action::GoToStartOfLine),
            (KeyBinding::ctrl('a'), Action::GoToStartOfLine),
            (KeyBinding::plain(KeyCode::End), Action::GoToEndOfLine),
            (KeyBinding::ctrl('e'), Action::GoToEndOfLine),
            (KeyBinding::ctrl('u'), Action::DeleteToStartOfLine),
            (KeyBinding::plain(KeyCode::Insert), Action::ToggleOverwrite),
            (KeyBinding::plain(KeyCode::Enter), Action::Newline),
            (
                KeyBinding::new(KeyCode::Enter, KeyModifiers::ALT),
                Action::Newline,
            ),
            (KeyBinding::ctrl('l'), Action::Clear),
            (KeyBinding::plain(KeyCode::Esc), Action::Quit),
            (KeyBinding::ctrl('c'), Action::Quit),
        ];

        Self {
            bindings: defaults.into_iter().collect(),
        }
    }
}

impl Keymap {
    /// A keymap with no bindings; only printable keys type.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, binding: KeyBinding, action: Action) {
        self.bindings.insert(binding, action);
    }

    /// Layers user bindings (`"ctrl+k" -> delete_to_start_of_line`) over this keymap.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, Action>,
    ) -> Result<Self, KeymapError> {
        for (key, action) in overrides {
            let binding: KeyBinding = key.parse()?;
            tracing::debug!("Binding {} to {:?}", binding, action);
            self.bind(binding, *action);
        }
        Ok(self)
    }

    /// Resolves a key event. Bound keys win; otherwise a character typed
    /// without Ctrl or Alt types itself. Releases and repeats of non-press
    /// kinds are ignored.
    pub fn resolve(&self, event: &KeyEvent) -> Option<Action> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let binding = KeyBinding::from_event(event);
        if let Some(action) = self.bindings.get(&binding) {
            return Some(*action);
        }

        match binding.code {
            KeyCode::Char(c)
                if !binding
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::TypeChar(c))
            }
            _ => None,
        }
    }

    /// Keys bound to `action`, sorted by their display form.
    pub fn keys_for(&self, action: Action) -> Vec<KeyBinding> {
        let mut keys: Vec<KeyBinding> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(|k| k.to_string());
        keys
    }
}
