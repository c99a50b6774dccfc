//! Air75 key positions and the factory keymap
//!
//! Matrix index is `row * 16 + column`. Slots without a physical key are
//! named `reserved<index>`.

use std::collections::HashMap;
use std::sync::OnceLock;

use nudelta_transport::protocol::keymap::KEY_COUNT;
use nudelta_transport::KeymapBuffer;

use crate::keycodes;

/// Matrix columns per row
pub const COLUMNS: usize = 16;

/// Physical keys, one slice per row in column order.
/// Each entry is `(position name, factory action)`.
const ROWS: [&[(&str, &str)]; 6] = [
    &[
        ("esc", "esc"),
        ("f1", "f1"),
        ("f2", "f2"),
        ("f3", "f3"),
        ("f4", "f4"),
        ("f5", "f5"),
        ("f6", "f6"),
        ("f7", "f7"),
        ("f8", "f8"),
        ("f9", "f9"),
        ("f10", "f10"),
        ("f11", "f11"),
        ("f12", "f12"),
        ("printscreen", "printscreen"),
        ("insert", "insert"),
        ("delete", "delete"),
    ],
    &[
        ("grave", "grave"),
        ("1", "1"),
        ("2", "2"),
        ("3", "3"),
        ("4", "4"),
        ("5", "5"),
        ("6", "6"),
        ("7", "7"),
        ("8", "8"),
        ("9", "9"),
        ("0", "0"),
        ("minus", "minus"),
        ("equal", "equal"),
        ("backspace", "backspace"),
        ("home", "home"),
    ],
    &[
        ("tab", "tab"),
        ("q", "q"),
        ("w", "w"),
        ("e", "e"),
        ("r", "r"),
        ("t", "t"),
        ("y", "y"),
        ("u", "u"),
        ("i", "i"),
        ("o", "o"),
        ("p", "p"),
        ("leftbracket", "leftbracket"),
        ("rightbracket", "rightbracket"),
        ("backslash", "backslash"),
        ("pgup", "pgup"),
    ],
    &[
        ("capslock", "capslock"),
        ("a", "a"),
        ("s", "s"),
        ("d", "d"),
        ("f", "f"),
        ("g", "g"),
        ("h", "h"),
        ("j", "j"),
        ("k", "k"),
        ("l", "l"),
        ("semicolon", "semicolon"),
        ("quote", "quote"),
        ("enter", "enter"),
        ("pgdn", "pgdn"),
    ],
    &[
        ("leftshift", "shift"),
        ("z", "z"),
        ("x", "x"),
        ("c", "c"),
        ("v", "v"),
        ("b", "b"),
        ("n", "n"),
        ("m", "m"),
        ("comma", "comma"),
        ("dot", "dot"),
        ("slash", "slash"),
        ("rightshift", "rightshift"),
        ("up", "up"),
        ("end", "end"),
    ],
    &[
        ("leftctrl", "ctrl"),
        ("leftmeta", "meta"),
        ("leftalt", "alt"),
        ("space", "space"),
        ("rightalt", "rightalt"),
        ("fn", "fn"),
        ("rightctrl", "rightctrl"),
        ("left", "left"),
        ("down", "down"),
        ("right", "right"),
    ],
];

struct KeyTable {
    names: Vec<String>,
    by_name: HashMap<String, usize>,
    defaults: KeymapBuffer,
}

fn table() -> &'static KeyTable {
    static TABLE: OnceLock<KeyTable> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

fn build_table() -> KeyTable {
    let mut names: Vec<String> = (0..KEY_COUNT).map(|i| format!("reserved{i}")).collect();
    let mut defaults = KeymapBuffer::zeroed();

    for (row, keys) in ROWS.iter().enumerate() {
        for (col, &(name, action)) in keys.iter().enumerate() {
            let index = row * COLUMNS + col;
            names[index] = name.to_string();
            // Every factory action is in the action table
            defaults.set(index, keycodes::action_code(action).unwrap_or(keycodes::NONE));
        }
    }

    let by_name = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.clone(), i))
        .collect();

    KeyTable {
        names,
        by_name,
        defaults,
    }
}

/// Matrix index of a key position name (case-insensitive)
pub fn key_index(name: &str) -> Option<usize> {
    table().by_name.get(&name.to_ascii_lowercase()).copied()
}

/// Canonical name of a matrix index
pub fn key_name(index: usize) -> Option<&'static str> {
    table().names.get(index).map(String::as_str)
}

/// Check if a matrix index has a physical key
pub fn is_physical(index: usize) -> bool {
    let (row, col) = (index / COLUMNS, index % COLUMNS);
    ROWS.get(row).is_some_and(|keys| col < keys.len())
}

/// Number of physical keys on the board
pub fn physical_key_count() -> usize {
    ROWS.iter().map(|keys| keys.len()).sum()
}

/// Factory keymap: every key produces its own legend, reserved slots are empty
pub fn default_keymap() -> &'static KeymapBuffer {
    &table().defaults
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_every_slot() {
        for index in 0..KEY_COUNT {
            let name = key_name(index).unwrap();
            assert_eq!(key_index(name), Some(index), "{name}");
        }
        assert_eq!(key_name(KEY_COUNT), None);
    }

    #[test]
    fn physical_positions() {
        assert_eq!(physical_key_count(), 84);
        assert_eq!(key_index("esc"), Some(0));
        assert_eq!(key_index("grave"), Some(16));
        assert_eq!(key_index("q"), Some(33));
        assert_eq!(key_index("leftctrl"), Some(80));
        assert_eq!(key_index("right"), Some(89));
        assert!(is_physical(89));
        assert!(!is_physical(90));
        assert_eq!(key_name(90), Some("reserved90"));
        assert_eq!(key_name(255), Some("reserved255"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(key_index("LeftShift"), key_index("leftshift"));
        assert_eq!(key_index("RESERVED200"), Some(200));
        assert_eq!(key_index("numpad5"), None);
    }

    #[test]
    fn default_keymap_matches_legends() {
        let defaults = default_keymap();
        for (index, &code) in defaults.codes().iter().enumerate() {
            if is_physical(index) {
                assert_ne!(code, keycodes::NONE, "{:?}", key_name(index));
            } else {
                assert_eq!(code, keycodes::NONE);
            }
        }
        let idx = |n| key_index(n).unwrap();
        assert_eq!(defaults.get(idx("q")), keycodes::action_code("q"));
        assert_eq!(defaults.get(idx("leftctrl")), keycodes::action_code("ctrl"));
        assert_eq!(defaults.get(idx("fn")), keycodes::action_code("fn"));
    }
}
