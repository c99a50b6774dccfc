//! Keyboard interface error types

use nudelta_transport::TransportError;
use thiserror::Error;

/// Errors from keyboard operations
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// No usable keyboard is connected
    #[error("Device not found: {0}")]
    NotFound(String),

    /// A keymap with the wrong number of codes was passed in
    #[error("Invalid keymap length: expected {expected} keys, got {actual}")]
    InvalidKeymapLength { expected: usize, actual: usize },
}
