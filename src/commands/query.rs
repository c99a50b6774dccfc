//! Read-only commands

use super::{with_keyboard, CommandResult};

const LICENSE_NOTICE: &str = "\
Copyright (c) Mohamed Gaber 2022

Licensed under the GNU General Public License, version 3, or at your option,
any later version.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.";

/// Print version and license
pub fn version() -> CommandResult {
    println!("nudelta console v{}", env!("CARGO_PKG_VERSION"));
    println!("{LICENSE_NOTICE}");
    Ok(())
}

/// Print the firmware version (the device banner already shows it)
pub fn firmware() -> CommandResult {
    with_keyboard(|_| Ok(()))
}

/// List every HID interface of connected Air75 keyboards
pub fn list() -> CommandResult {
    let interfaces = nudelta_keyboard::list_interfaces()?;
    if interfaces.is_empty() {
        println!("No NuPhy Air75 interfaces found.");
        return Ok(());
    }

    println!("NuPhy Air75 HID interfaces:");
    for (d, role) in interfaces {
        println!(
            "  if={:<2} page=0x{:04X} usage=0x{:04X} rel={:04x} {:<13} {}",
            d.interface_number, d.usage_page, d.usage, d.release_number, role, d.path
        );
    }
    Ok(())
}
