//! Command handlers for the CLI application.
//!
//! - `query`: read-only commands (version, firmware, list)
//! - `keymap`: binary keymap commands (dump, load, reset)
//! - `profile`: YAML profile loading

pub mod keymap;
pub mod profile;
pub mod query;

use nudelta_keyboard::Air75;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Open the keyboard and run a closure with it.
///
/// Fails when no keyboard is connected. The session is released when the
/// closure returns, whether or not it succeeded.
pub fn with_keyboard<F>(f: F) -> CommandResult
where
    F: FnOnce(&mut Air75) -> CommandResult,
{
    let mut keyboard = Air75::open_first()?;
    println!(
        "Found NuPhy Air75 at path {} (Firmware {:04x})",
        keyboard.device_info().path,
        keyboard.firmware_version()
    );
    f(&mut keyboard)
}
