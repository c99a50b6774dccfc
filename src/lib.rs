//! nudelta: keymap configuration for the NuPhy Air75
//!
//! The device side lives in `nudelta-transport` and `nudelta-keyboard`; this
//! crate adds the file formats used by the command line tool.

pub mod error;
pub mod keyfile;
pub mod profile;

pub use error::CliError;
pub use profile::{Profile, ProfileError, Remap};
