//! Simulated keyboard input vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys the desktop connector presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Control modifier.
    Control,
    /// Command (macOS) or Super (elsewhere) modifier.
    Super,
    /// Shift modifier.
    Shift,
    /// Alt or Option modifier.
    Alt,
    /// Return key.
    Enter,
    /// Space bar.
    Space,
    /// Backtick key, which toggles the integrated terminal.
    Backtick,
    /// Printable character key.
    Char(char),
}

impl Key {
    /// Returns the X11 keysym name of the key.
    #[must_use]
    pub fn keysym(self) -> String {
        match self {
            Self::Control => "ctrl".to_owned(),
            Self::Super => "super".to_owned(),
            Self::Shift => "shift".to_owned(),
            Self::Alt => "alt".to_owned(),
            Self::Enter => "Return".to_owned(),
            Self::Space => "space".to_owned(),
            Self::Backtick => "grave".to_owned(),
            Self::Char(c) => c.to_string(),
        }
    }
}

/// Keys pressed together, modifiers first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord(Vec<Key>);

impl KeyChord {
    /// Creates a chord from keys in press order.
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self(keys.into_iter().collect())
    }

    /// Returns the keys of the chord.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Renders the chord in `xdotool key` syntax, e.g. `ctrl+l`.
    #[must_use]
    pub fn to_keysyms(&self) -> String {
        self.0
            .iter()
            .map(|key| key.keysym())
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_keysyms())
    }
}

/// Host platform, which decides the primary shortcut modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS: shortcuts use Command and the launcher is Spotlight.
    MacOs,
    /// Linux and Windows: shortcuts use Control and the launcher is Super.
    Other,
}

impl Platform {
    /// Detects the platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }

    /// Returns the modifier used for editor shortcuts.
    #[must_use]
    pub const fn primary_modifier(self) -> Key {
        match self {
            Self::MacOs => Key::Super,
            Self::Other => Key::Control,
        }
    }

    /// Returns a chord of the primary modifier and one character.
    #[must_use]
    pub fn shortcut(self, key: char) -> KeyChord {
        KeyChord::new([self.primary_modifier(), Key::Char(key)])
    }
}
