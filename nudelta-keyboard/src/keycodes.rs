//! Action names and their 32-bit key codes
//!
//! A key code is the little-endian `u32` of `[kind, modifiers, usage_lo, usage_hi]`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Key code kind, byte 0 of a code
pub mod kind {
    /// HID keyboard page (0x07) usage, byte 1 is the modifier mask
    pub const KEY: u8 = 0x00;
    /// HID consumer page (0x0C) usage, 16 bits
    pub const CONSUMER: u8 = 0x03;
    /// Firmware function, byte 2 selects it
    pub const SPECIAL_FN: u8 = 0x0A;
}

/// HID modifier bits, byte 1 of a keyboard code
pub mod mods {
    pub const LCTRL: u8 = 0x01;
    pub const LSHIFT: u8 = 0x02;
    pub const LALT: u8 = 0x04;
    pub const LGUI: u8 = 0x08;
    pub const RCTRL: u8 = 0x10;
    pub const RSHIFT: u8 = 0x20;
    pub const RALT: u8 = 0x40;
    pub const RGUI: u8 = 0x80;
}

/// Code meaning "no action"
pub const NONE: u32 = 0;

const fn key(usage: u8) -> u32 {
    (usage as u32) << 16
}

const fn consumer(usage: u16) -> u32 {
    kind::CONSUMER as u32 | (usage as u32) << 16
}

const fn special(function: u8) -> u32 {
    kind::SPECIAL_FN as u32 | (function as u32) << 16
}

/// Split a code into `[kind, modifiers, usage_lo, usage_hi]`
pub fn code_bytes(code: u32) -> [u8; 4] {
    code.to_le_bytes()
}

/// Add modifier bits to a keyboard code. Returns `None` for codes of other kinds.
pub fn with_modifiers(code: u32, modifiers: u8) -> Option<u32> {
    let [k, m, lo, hi] = code_bytes(code);
    (k == kind::KEY && code != NONE).then(|| u32::from_le_bytes([k, m | modifiers, lo, hi]))
}

const ACTIONS: &[(&str, u32)] = &[
    ("none", NONE),
    // Letters
    ("a", key(0x04)),
    ("b", key(0x05)),
    ("c", key(0x06)),
    ("d", key(0x07)),
    ("e", key(0x08)),
    ("f", key(0x09)),
    ("g", key(0x0A)),
    ("h", key(0x0B)),
    ("i", key(0x0C)),
    ("j", key(0x0D)),
    ("k", key(0x0E)),
    ("l", key(0x0F)),
    ("m", key(0x10)),
    ("n", key(0x11)),
    ("o", key(0x12)),
    ("p", key(0x13)),
    ("q", key(0x14)),
    ("r", key(0x15)),
    ("s", key(0x16)),
    ("t", key(0x17)),
    ("u", key(0x18)),
    ("v", key(0x19)),
    ("w", key(0x1A)),
    ("x", key(0x1B)),
    ("y", key(0x1C)),
    ("z", key(0x1D)),
    // Number row
    ("1", key(0x1E)),
    ("2", key(0x1F)),
    ("3", key(0x20)),
    ("4", key(0x21)),
    ("5", key(0x22)),
    ("6", key(0x23)),
    ("7", key(0x24)),
    ("8", key(0x25)),
    ("9", key(0x26)),
    ("0", key(0x27)),
    ("enter", key(0x28)),
    ("esc", key(0x29)),
    ("backspace", key(0x2A)),
    ("tab", key(0x2B)),
    ("space", key(0x2C)),
    ("minus", key(0x2D)),
    ("equal", key(0x2E)),
    ("leftbracket", key(0x2F)),
    ("rightbracket", key(0x30)),
    ("backslash", key(0x31)),
    ("semicolon", key(0x33)),
    ("quote", key(0x34)),
    ("grave", key(0x35)),
    ("comma", key(0x36)),
    ("dot", key(0x37)),
    ("slash", key(0x38)),
    ("capslock", key(0x39)),
    // Function row
    ("f1", key(0x3A)),
    ("f2", key(0x3B)),
    ("f3", key(0x3C)),
    ("f4", key(0x3D)),
    ("f5", key(0x3E)),
    ("f6", key(0x3F)),
    ("f7", key(0x40)),
    ("f8", key(0x41)),
    ("f9", key(0x42)),
    ("f10", key(0x43)),
    ("f11", key(0x44)),
    ("f12", key(0x45)),
    ("printscreen", key(0x46)),
    ("scrolllock", key(0x47)),
    ("pause", key(0x48)),
    // Navigation
    ("insert", key(0x49)),
    ("home", key(0x4A)),
    ("pgup", key(0x4B)),
    ("delete", key(0x4C)),
    ("end", key(0x4D)),
    ("pgdn", key(0x4E)),
    ("right", key(0x4F)),
    ("left", key(0x50)),
    ("down", key(0x51)),
    ("up", key(0x52)),
    ("menu", key(0x65)),
    ("f13", key(0x68)),
    ("f14", key(0x69)),
    ("f15", key(0x6A)),
    ("f16", key(0x6B)),
    ("f17", key(0x6C)),
    ("f18", key(0x6D)),
    ("f19", key(0x6E)),
    ("f20", key(0x6F)),
    ("f21", key(0x70)),
    ("f22", key(0x71)),
    ("f23", key(0x72)),
    ("f24", key(0x73)),
    // Modifiers
    ("ctrl", key(0xE0)),
    ("shift", key(0xE1)),
    ("alt", key(0xE2)),
    ("meta", key(0xE3)),
    ("rightctrl", key(0xE4)),
    ("rightshift", key(0xE5)),
    ("rightalt", key(0xE6)),
    ("rightmeta", key(0xE7)),
    // Media
    ("mediaplaypause", consumer(0x00CD)),
    ("medianext", consumer(0x00B5)),
    ("mediaprev", consumer(0x00B6)),
    ("mediastop", consumer(0x00B7)),
    ("mediamute", consumer(0x00E2)),
    ("mediavolup", consumer(0x00E9)),
    ("mediavoldown", consumer(0x00EA)),
    ("brightnessup", consumer(0x006F)),
    ("brightnessdown", consumer(0x0070)),
    // Firmware layers
    ("fn", special(0x01)),
    ("fn2", special(0x02)),
];

const MODIFIERS: &[(&str, u8)] = &[
    ("ctrl", mods::LCTRL),
    ("shift", mods::LSHIFT),
    ("alt", mods::LALT),
    ("meta", mods::LGUI),
    ("rightctrl", mods::RCTRL),
    ("rightshift", mods::RSHIFT),
    ("rightalt", mods::RALT),
    ("rightmeta", mods::RGUI),
];

struct ActionTable {
    by_name: HashMap<&'static str, u32>,
    by_code: HashMap<u32, &'static str>,
}

fn table() -> &'static ActionTable {
    static TABLE: OnceLock<ActionTable> = OnceLock::new();
    TABLE.get_or_init(|| ActionTable {
        by_name: ACTIONS.iter().copied().collect(),
        by_code: ACTIONS.iter().map(|&(name, code)| (code, name)).collect(),
    })
}

/// Look up the code for an action name (case-insensitive)
pub fn action_code(name: &str) -> Option<u32> {
    table()
        .by_name
        .get(name.to_ascii_lowercase().as_str())
        .copied()
}

/// Canonical action name for a code, if it is a known action
pub fn action_name(code: u32) -> Option<&'static str> {
    table().by_code.get(&code).copied()
}

/// HID modifier bit for a modifier name (case-insensitive)
pub fn modifier_bit(name: &str) -> Option<u8> {
    let name = name.to_ascii_lowercase();
    MODIFIERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, bit)| bit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_bijective() {
        let names: HashSet<_> = ACTIONS.iter().map(|(n, _)| *n).collect();
        let codes: HashSet<_> = ACTIONS.iter().map(|(_, c)| *c).collect();
        assert_eq!(names.len(), ACTIONS.len(), "duplicate action name");
        assert_eq!(codes.len(), ACTIONS.len(), "duplicate action code");

        for &(name, code) in ACTIONS {
            assert_eq!(action_code(name), Some(code));
            assert_eq!(action_name(code), Some(name));
        }
    }

    #[test]
    fn code_layout() {
        assert_eq!(code_bytes(action_code("a").unwrap()), [0x00, 0x00, 0x04, 0x00]);
        assert_eq!(code_bytes(action_code("mediavolup").unwrap()), [0x03, 0x00, 0xE9, 0x00]);
        assert_eq!(code_bytes(action_code("fn2").unwrap()), [0x0A, 0x00, 0x02, 0x00]);
        assert_eq!(action_code("none"), Some(0));
    }

    #[test]
    fn lookups_are_case_insensitive() {
        assert_eq!(action_code("ESC"), action_code("esc"));
        assert_eq!(modifier_bit("Shift"), Some(mods::LSHIFT));
        assert_eq!(action_code("hyper"), None);
        assert_eq!(modifier_bit("fn"), None);
        assert_eq!(action_name(0xDEAD_BEEF), None);
    }

    #[test]
    fn modifiers_only_apply_to_keys() {
        let a = action_code("a").unwrap();
        let ctrl_a = with_modifiers(a, mods::LCTRL | mods::LSHIFT).unwrap();
        assert_eq!(code_bytes(ctrl_a), [0x00, 0x03, 0x04, 0x00]);
        assert_eq!(action_name(ctrl_a), None);

        assert_eq!(with_modifiers(action_code("mediamute").unwrap(), mods::LCTRL), None);
        assert_eq!(with_modifiers(NONE, mods::LCTRL), None);
    }
}
