//! Errors surfaced by the command-line tool

use std::io;
use std::path::PathBuf;

use nudelta_keyboard::KeyboardError;
use thiserror::Error;

use crate::profile::ProfileError;

/// Errors from the CLI layer
#[derive(Error, Debug)]
pub enum CliError {
    /// A keymap or profile file could not be opened, read or written
    #[error("Failed to open '{}' for {action}: {error}", path.display())]
    FileAccess {
        path: PathBuf,
        action: &'static str,
        error: io::Error,
    },

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Keyboard(#[from] KeyboardError),
}

impl CliError {
    pub fn reading(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            action: "reading",
            error,
        }
    }

    pub fn writing(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            action: "writing",
            error,
        }
    }
}
