//! Transport error types

use thiserror::Error;

/// Errors that can occur while talking to the keyboard or decoding its reports
#[derive(Error, Debug)]
pub enum TransportError {
    // HID-specific errors
    #[error("HID error: {0}")]
    HidError(String),

    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),

    // Framing errors
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Invalid report id: expected 0x{expected:02X}, got 0x{actual:02X}")]
    InvalidReportId { expected: u8, actual: u8 },

    #[error("Invalid response: expected cmd 0x{expected:02X}, got 0x{actual:02X}")]
    InvalidResponse { expected: u8, actual: u8 },

    #[error("Out of sequence: expected page {expected}, got page {actual}")]
    OutOfSequence { expected: u8, actual: u8 },

    #[error("Page count mismatch: expected {expected} pages, report announces {actual}")]
    PageCountMismatch { expected: u8, actual: u8 },

    #[error("Missing pages: expected {expected} reports, got {actual}")]
    MissingPages { expected: usize, actual: usize },

    #[error("Invalid keymap length: expected {expected} keys, got {actual}")]
    InvalidKeymapLength { expected: usize, actual: usize },

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::HidPermissionDenied(msg)
        } else {
            TransportError::HidError(msg)
        }
    }
}
