//! Compiling shortcut tokens into modifier flags and a key.
//!
//! A token is `-`-separated: every segment but the last names a modifier,
//! the last names the key.  Modifiers outside the table below are dropped.
//! Keys are looked up in the macOS ANSI virtual key-code table; a key that
//! is not there is kept as literal text to be typed instead.

use std::fmt;

/// Modifier keys understood by System Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Command,
    Control,
    Option,
    Shift,
}

impl Modifier {
    /// Look up a modifier name or synonym (case-insensitive).
    pub fn from_name(name: &str) -> Option<Modifier> {
        match name.to_lowercase().as_str() {
            "cmd" | "command" => Some(Modifier::Command),
            "ctrl" | "control" => Some(Modifier::Control),
            "alt" | "option" => Some(Modifier::Option),
            "shift" => Some(Modifier::Shift),
            _ => None,
        }
    }

    /// The AppleScript `using {…}` flag for this modifier.
    pub fn applescript(self) -> &'static str {
        match self {
            Modifier::Command => "command down",
            Modifier::Control => "control down",
            Modifier::Option => "option down",
            Modifier::Shift => "shift down",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Command => write!(f, "command"),
            Modifier::Control => write!(f, "control"),
            Modifier::Option => write!(f, "option"),
            Modifier::Shift => write!(f, "shift"),
        }
    }
}

/// The key half of a compiled shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIdentifier {
    /// A physical key with a known virtual key code.
    ResolvedCode(u16),
    /// Text with no known key code, typed character by character.
    LiteralText(String),
}

/// A token split into its recognized modifiers and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShortcut {
    /// Recognized modifiers, in token order, without duplicates.
    pub modifiers: Vec<Modifier>,
    pub key: KeyIdentifier,
    /// Modifier segments exactly as written, including unrecognized ones.
    pub raw_modifiers: Vec<String>,
    /// The key segment exactly as written.
    pub raw_key: String,
}

/// Split a token into its modifier segments and key segment, ignoring
/// empty segments.
pub fn split_token(token: &str) -> (Vec<&str>, &str) {
    let mut parts: Vec<&str> = token.split('-').filter(|p| !p.is_empty()).collect();
    match parts.pop() {
        Some(key) => (parts, key),
        None => (Vec::new(), ""),
    }
}

/// Compile `token`.  Pure: depends only on the token and static tables.
pub fn compile(token: &str) -> CompiledShortcut {
    let (raw_modifiers, raw_key) = split_token(token);

    let mut modifiers = Vec::new();
    for m in raw_modifiers.iter().filter_map(|m| Modifier::from_name(m)) {
        if !modifiers.contains(&m) {
            modifiers.push(m);
        }
    }

    let key = match key_code(raw_key) {
        Some(code) => KeyIdentifier::ResolvedCode(code),
        None => KeyIdentifier::LiteralText(raw_key.to_string()),
    };

    CompiledShortcut {
        modifiers,
        key,
        raw_modifiers: raw_modifiers.iter().map(|m| m.to_string()).collect(),
        raw_key: raw_key.to_string(),
    }
}

/// Virtual key code for a key name (case-insensitive).
pub fn key_code(name: &str) -> Option<u16> {
    let name = name.to_lowercase();
    KEY_CODES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

/// macOS ANSI virtual key codes (`Events.h`, `kVK_*`).
pub const KEY_CODES: &[(&str, u16)] = &[
    ("a", 0),
    ("s", 1),
    ("d", 2),
    ("f", 3),
    ("h", 4),
    ("g", 5),
    ("z", 6),
    ("x", 7),
    ("c", 8),
    ("v", 9),
    ("iso_section", 10),
    ("b", 11),
    ("q", 12),
    ("w", 13),
    ("e", 14),
    ("r", 15),
    ("y", 16),
    ("t", 17),
    ("1", 18),
    ("2", 19),
    ("3", 20),
    ("4", 21),
    ("6", 22),
    ("5", 23),
    ("equal", 24),
    ("9", 25),
    ("7", 26),
    ("minus", 27),
    ("8", 28),
    ("0", 29),
    ("right_bracket", 30),
    ("o", 31),
    ("u", 32),
    ("left_bracket", 33),
    ("i", 34),
    ("p", 35),
    ("return", 36),
    ("l", 37),
    ("j", 38),
    ("quote", 39),
    ("k", 40),
    ("semicolon", 41),
    ("backslash", 42),
    ("comma", 43),
    ("slash", 44),
    ("n", 45),
    ("m", 46),
    ("period", 47),
    ("tab", 48),
    ("space", 49),
    ("grave", 50),
    ("delete", 51),
    ("escape", 53),
    ("command", 55),
    ("shift", 56),
    ("caps_lock", 57),
    ("option", 58),
    ("control", 59),
    ("right_shift", 60),
    ("right_option", 61),
    ("right_control", 62),
    ("function", 63),
    ("f17", 64),
    ("keypad_decimal", 65),
    ("keypad_multiply", 67),
    ("keypad_plus", 69),
    ("keypad_clear", 71),
    ("volume_up", 72),
    ("volume_down", 73),
    ("mute", 74),
    ("keypad_divide", 75),
    ("keypad_enter", 76),
    ("keypad_minus", 78),
    ("f18", 79),
    ("f19", 80),
    ("keypad_equals", 81),
    ("keypad_0", 82),
    ("keypad_1", 83),
    ("keypad_2", 84),
    ("keypad_3", 85),
    ("keypad_4", 86),
    ("keypad_5", 87),
    ("keypad_6", 88),
    ("keypad_7", 89),
    ("f20", 90),
    ("keypad_8", 91),
    ("keypad_9", 92),
    ("f5", 96),
    ("f6", 97),
    ("f7", 98),
    ("f3", 99),
    ("f8", 100),
    ("f9", 101),
    ("f11", 103),
    ("f13", 105),
    ("f16", 106),
    ("f14", 107),
    ("f10", 109),
    ("f12", 111),
    ("f15", 113),
    ("help", 114),
    ("home", 115),
    ("page_up", 116),
    ("forward_delete", 117),
    ("f4", 118),
    ("end", 119),
    ("f2", 120),
    ("page_down", 121),
    ("f1", 122),
    ("left_arrow", 123),
    ("right_arrow", 124),
    ("down_arrow", 125),
    ("up_arrow", 126),
];
