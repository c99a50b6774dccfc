// CLI definitions using clap

use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nudelta")]
#[command(author, about = "Keymap configuration for the NuPhy Air75")]
#[command(group(
    ArgGroup::new("action")
        .args(["version", "firmware", "reset_keys", "dump_keys", "load_keys", "load_profile", "list"])
        .multiple(false)
))]
pub struct Cli {
    /// Show version and license information
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Print the keyboard's firmware version
    #[arg(short, long)]
    pub firmware: bool,

    /// Restore the factory keymap
    #[arg(short, long)]
    pub reset_keys: bool,

    /// Dump the current keymap to a binary file
    #[arg(short = 'D', long, value_name = "FILE")]
    pub dump_keys: Option<PathBuf>,

    /// Also write a hex dump of the keymap (with --dump-keys)
    #[arg(short = 'H', long = "dump-hex-to", value_name = "FILE", requires = "dump_keys")]
    pub dump_hex_to: Option<PathBuf>,

    /// Load a keymap from a binary file
    #[arg(short = 'L', long, value_name = "FILE")]
    pub load_keys: Option<PathBuf>,

    /// Load a keymap from a YAML profile
    #[arg(short = 'l', long, value_name = "FILE")]
    pub load_profile: Option<PathBuf>,

    /// List every HID interface of connected Air75 keyboards
    #[arg(long)]
    pub list: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// The single action requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Version,
    Firmware,
    ResetKeys,
    DumpKeys {
        path: PathBuf,
        hex: Option<PathBuf>,
    },
    LoadKeys(PathBuf),
    LoadProfile(PathBuf),
    List,
}

impl Cli {
    /// The requested action, `None` when no action flag was given
    pub fn action(&self) -> Option<Action> {
        if self.version {
            Some(Action::Version)
        } else if self.firmware {
            Some(Action::Firmware)
        } else if self.reset_keys {
            Some(Action::ResetKeys)
        } else if let Some(path) = &self.dump_keys {
            Some(Action::DumpKeys {
                path: path.clone(),
                hex: self.dump_hex_to.clone(),
            })
        } else if let Some(path) = &self.load_keys {
            Some(Action::LoadKeys(path.clone()))
        } else if let Some(path) = &self.load_profile {
            Some(Action::LoadProfile(path.clone()))
        } else if self.list {
            Some(Action::List)
        } else {
            None
        }
    }

    /// Default log filter for the verbosity level
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
