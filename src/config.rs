use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::Command;
use crate::style::Palette;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct KeyBinding {
    code: KeyCode,
    ctrl: bool,
}

impl KeyBinding {
    pub fn plain(code: KeyCode) -> Self {
        Self { code, ctrl: false }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self { code, ctrl: true }
    }

    /// Shift is already reflected in the key code (`H` vs `h`, BackTab), so
    /// only Ctrl is significant
    pub fn from_event(key: KeyEvent) -> Self {
        Self {
            code: key.code,
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        }
    }
}

pub struct KeyMap {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyMap {
    pub fn lookup(&self, key: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyBinding::from_event(key)).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyCode::*;
        Self {
            bindings: HashMap::from([
                (KeyBinding::plain(Char('q')), Command::Quit),
                (KeyBinding::plain(Esc), Command::Quit),
                (KeyBinding::ctrl(Char('c')), Command::Quit),

                (KeyBinding::plain(Char('h')), Command::ScrollLeft),
                (KeyBinding::plain(Left), Command::ScrollLeft),
                (KeyBinding::plain(Char('l')), Command::ScrollRight),
                (KeyBinding::plain(Right), Command::ScrollRight),
                (KeyBinding::plain(Up), Command::ScrollUp),
                (KeyBinding::plain(Down), Command::ScrollDown),

                (KeyBinding::plain(Char('k')), Command::SelectRowUp),
                (KeyBinding::plain(Char('j')), Command::SelectRowDown),

                (KeyBinding::plain(Char('H')), Command::SelectColLeft),
                (KeyBinding::plain(BackTab), Command::SelectColLeft),
                (KeyBinding::plain(Char('L')), Command::SelectColRight),
                (KeyBinding::plain(Tab), Command::SelectColRight),

                (KeyBinding::plain(Char('d')), Command::DeleteColumn),
                (KeyBinding::plain(Delete), Command::DeleteColumn),
            ]),
        }
    }
}

pub struct AppConfig {
    pub keymap: KeyMap,
    pub palette: Palette,
}

impl AppConfig {
    pub fn new(palette: Palette) -> Self {
        Self {
            keymap: KeyMap::default(),
            palette,
        }
    }
}
