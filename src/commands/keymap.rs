//! Binary keymap commands

use std::path::Path;

use nudelta::keyfile;

use super::{with_keyboard, CommandResult};

/// Write the factory keymap to the keyboard
pub fn reset() -> CommandResult {
    with_keyboard(|keyboard| {
        keyboard.reset_keymap()?;
        println!("Wrote default keymap config to keyboard.");
        Ok(())
    })
}

/// Dump the current keymap to a binary file, and optionally a hex dump
pub fn dump(path: &Path, hex: Option<&Path>) -> CommandResult {
    with_keyboard(|keyboard| {
        let keymap = keyboard.get_keymap()?;

        keyfile::write_keymap(path, &keymap)?;
        println!("Wrote current keymap to '{}'.", path.display());

        if let Some(hex) = hex {
            keyfile::write_hex_dump(hex, &keymap)?;
            println!("Wrote current keymap in hex format to '{}'.", hex.display());
        }
        Ok(())
    })
}

/// Load a binary keymap file onto the keyboard
pub fn load(path: &Path) -> CommandResult {
    // Read the file before touching the device
    let keymap = keyfile::read_keymap(path)?;
    with_keyboard(|keyboard| {
        keyboard.set_keymap(&keymap)?;
        println!("Wrote keymap '{}' to keyboard.", path.display());
        Ok(())
    })
}
