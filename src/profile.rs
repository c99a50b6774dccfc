//! YAML keymap profiles
//!
//! ```yaml
//! keys:
//!   capslock: ctrl
//!   rightalt: { key: f13, modifiers: [shift] }
//! ```
//!
//! Each entry maps a key position to an action. Keys that are not mentioned
//! keep their factory action.

use std::path::Path;

use nudelta_keyboard::{keycodes, layout, KeymapBuffer};
use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

use crate::error::CliError;

/// Profile parsing and validation errors
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config file: {0}")]
    Format(String),

    #[error("Invalid config file: a key for '{0}' does not exist.")]
    UnknownKey(String),

    #[error("Invalid config file: a code for '{0}' was not found.")]
    UnknownCode(String),

    #[error("Invalid config file: modifier '{0}' is not known.")]
    UnknownModifier(String),
}

/// YAML scalar that may be written bare (`1`) or quoted (`"1"`)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
        }
    }
}

/// Action as written in a profile
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActionRepr {
    /// `capslock: ctrl`
    Name(Scalar),
    /// `capslock: { key: c, modifiers: [ctrl] }`
    Combo(ComboRepr),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComboRepr {
    key: Scalar,
    #[serde(default)]
    modifiers: Vec<String>,
}

/// One `position -> action` entry of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remap {
    pub key: String,
    pub action: String,
    pub modifiers: Vec<String>,
}

impl Remap {
    /// Resolve to `(matrix index, key code)`
    pub fn resolve(&self) -> Result<(usize, u32), ProfileError> {
        let index =
            layout::key_index(&self.key).ok_or_else(|| ProfileError::UnknownKey(self.key.clone()))?;
        let mut code = keycodes::action_code(&self.action)
            .ok_or_else(|| ProfileError::UnknownCode(self.action.clone()))?;

        if !self.modifiers.is_empty() {
            let mut bits = 0u8;
            for name in &self.modifiers {
                bits |= keycodes::modifier_bit(name)
                    .ok_or_else(|| ProfileError::UnknownModifier(name.clone()))?;
            }
            code = keycodes::with_modifiers(code, bits).ok_or_else(|| {
                ProfileError::Format(format!(
                    "modifiers cannot be applied to '{}' (key '{}').",
                    self.action, self.key
                ))
            })?;
        }
        Ok((index, code))
    }
}

/// A parsed profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// `None` when the document has no `keys` section
    pub keys: Option<Vec<Remap>>,
}

impl Profile {
    /// Parse a profile from YAML text
    pub fn from_yaml(text: &str) -> Result<Self, ProfileError> {
        let document: Value = serde_yaml::from_str(text)?;
        let keys = match &document {
            Value::Mapping(map) => map.get("keys"),
            Value::Null => None,
            _ => return Err(ProfileError::Format("top level is not a map.".into())),
        };

        let keys = match keys {
            None | Some(Value::Null) => return Ok(Self { keys: None }),
            Some(Value::Mapping(map)) => map,
            Some(_) => return Err(ProfileError::Format("key 'keys' is not a map.".into())),
        };

        let mut remaps = Vec::with_capacity(keys.len());
        for (position, action) in keys {
            let key = serde_yaml::from_value::<Scalar>(position.clone())
                .map_err(|_| ProfileError::Format(format!("key name {position:?} is not a string.")))?
                .into_string();
            let repr: ActionRepr = serde_yaml::from_value(action.clone()).map_err(|_| {
                ProfileError::Format(format!("the action for '{key}' is not a name or a key map."))
            })?;
            let (action, modifiers) = match repr {
                ActionRepr::Name(name) => (name.into_string(), Vec::new()),
                ActionRepr::Combo(combo) => (combo.key.into_string(), combo.modifiers),
            };
            remaps.push(Remap {
                key,
                action,
                modifiers,
            });
        }
        Ok(Self { keys: Some(remaps) })
    }

    /// Read and parse a profile file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::reading(path, e))?;
        Ok(Self::from_yaml(&text)?)
    }

    /// Apply the remaps on top of `base`. Entries are checked in document
    /// order and the first bad one fails the whole profile.
    pub fn apply(&self, base: &KeymapBuffer) -> Result<KeymapBuffer, ProfileError> {
        let mut keymap = base.clone();
        for remap in self.keys.iter().flatten() {
            let (index, code) = remap.resolve()?;
            debug!(
                "{} (#{}) -> {} (0x{:08x})",
                remap.key, index, remap.action, code
            );
            keymap.set(index, code);
        }
        Ok(keymap)
    }

    /// The keymap this profile describes: the factory keymap with the
    /// remaps applied. `None` when there is nothing to write.
    pub fn to_keymap(&self) -> Result<Option<KeymapBuffer>, ProfileError> {
        if self.keys.is_none() {
            return Ok(None);
        }
        self.apply(nudelta_keyboard::default_keymap()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_combo_forms() {
        let profile = Profile::from_yaml(
            "keys:\n  capslock: ctrl\n  rightalt: { key: f13, modifiers: [shift, Ctrl] }\n",
        )
        .unwrap();
        let keys = profile.keys.unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(
            keys[0],
            Remap {
                key: "capslock".into(),
                action: "ctrl".into(),
                modifiers: vec![],
            }
        );
        assert_eq!(keys[1].action, "f13");
        assert_eq!(keys[1].modifiers, vec!["shift", "Ctrl"]);
    }

    #[test]
    fn misspelled_combo_field_is_rejected() {
        let err = Profile::from_yaml("keys:\n  capslock: { key: c, modifer: [ctrl] }\n").unwrap_err();
        assert!(matches!(err, ProfileError::Format(_)));
        assert!(err.to_string().contains("'capslock'"));

        assert!(matches!(
            Profile::from_yaml("keys:\n  capslock: { modifiers: [ctrl] }\n"),
            Err(ProfileError::Format(_))
        ));
    }

    #[test]
    fn numeric_scalars_are_names() {
        let profile = Profile::from_yaml("keys:\n  1: 2\n  q: 0\n").unwrap();
        let keys = profile.keys.unwrap();
        assert_eq!((keys[0].key.as_str(), keys[0].action.as_str()), ("1", "2"));
        assert_eq!(keys[1].action, "0");
    }

    #[test]
    fn missing_keys_section() {
        assert_eq!(Profile::from_yaml("name: empty\n").unwrap().keys, None);
        assert_eq!(Profile::from_yaml("keys:\n").unwrap().keys, None);
        assert_eq!(Profile::from_yaml("name: empty\n").unwrap().to_keymap().unwrap(), None);
    }

    #[test]
    fn keys_must_be_a_map() {
        let err = Profile::from_yaml("keys: [a, b]\n").unwrap_err();
        assert!(matches!(err, ProfileError::Format(_)));
        assert_eq!(
            err.to_string(),
            "Invalid config file: key 'keys' is not a map."
        );
        assert!(matches!(
            Profile::from_yaml("keys: nope\n"),
            Err(ProfileError::Format(_))
        ));
    }

    #[test]
    fn resolve_errors_name_the_entry() {
        let remap = |key: &str, action: &str, modifiers: &[&str]| Remap {
            key: key.into(),
            action: action.into(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
        };

        let err = remap("numpad5", "a", &[]).resolve().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid config file: a key for 'numpad5' does not exist."
        );
        assert!(matches!(
            remap("q", "hyper", &[]).resolve(),
            Err(ProfileError::UnknownCode(name)) if name == "hyper"
        ));
        assert!(matches!(
            remap("q", "a", &["super"]).resolve(),
            Err(ProfileError::UnknownModifier(name)) if name == "super"
        ));
        assert!(matches!(
            remap("q", "mediamute", &["ctrl"]).resolve(),
            Err(ProfileError::Format(_))
        ));
    }

    #[test]
    fn combo_sets_modifier_byte() {
        let (index, code) = Remap {
            key: "q".into(),
            action: "c".into(),
            modifiers: vec!["ctrl".into(), "rightshift".into()],
        }
        .resolve()
        .unwrap();
        assert_eq!(Some(index), layout::key_index("q"));
        assert_eq!(
            code.to_le_bytes(),
            [
                keycodes::kind::KEY,
                keycodes::mods::LCTRL | keycodes::mods::RSHIFT,
                0x06,
                0x00
            ]
        );
    }
}
