//! YAML profile command

use std::path::Path;

use nudelta::Profile;

use super::{with_keyboard, CommandResult};

/// Apply a YAML profile on top of the factory keymap and write it
pub fn load(path: &Path) -> CommandResult {
    let profile = Profile::load(path)?;
    let Some(keymap) = profile.to_keymap()? else {
        println!("'{}' has no 'keys' section, nothing to write.", path.display());
        return Ok(());
    };

    with_keyboard(|keyboard| {
        keyboard.set_keymap(&keymap)?;
        println!("Wrote keymap config in '{}' to keyboard.", path.display());
        Ok(())
    })
}
