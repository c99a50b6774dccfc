//! Common types for the transport layer

use crate::error::TransportError;
use crate::protocol::keymap::{CODE_SIZE, KEYMAP_BYTES, KEY_COUNT};

/// Identification of one located keyboard interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Platform HID path used to open the interface
    pub path: String,
    /// USB interface number (-1 when the backend does not know it)
    pub interface_number: i32,
    /// HID usage page of the top-level collection
    pub usage_page: u16,
    /// HID usage of the top-level collection
    pub usage: u16,
    /// bcdDevice as reported at enumeration time
    pub release_number: u16,
    /// Product name if available
    pub product_name: Option<String>,
}

impl From<&hidapi::DeviceInfo> for DeviceDescriptor {
    fn from(info: &hidapi::DeviceInfo) -> Self {
        Self {
            vid: info.vendor_id(),
            pid: info.product_id(),
            path: info.path().to_string_lossy().into_owned(),
            interface_number: info.interface_number(),
            usage_page: info.usage_page(),
            usage: info.usage(),
            release_number: info.release_number(),
            product_name: info.product_string().map(str::to_owned),
        }
    }
}

/// A complete keymap: one 32-bit key code per matrix slot.
///
/// Always exactly [`KEY_COUNT`] codes long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapBuffer(Vec<u32>);

impl KeymapBuffer {
    /// Wrap a vector of codes, rejecting any length other than [`KEY_COUNT`]
    pub fn new(codes: Vec<u32>) -> Result<Self, TransportError> {
        if codes.len() != KEY_COUNT {
            return Err(TransportError::InvalidKeymapLength {
                expected: KEY_COUNT,
                actual: codes.len(),
            });
        }
        Ok(Self(codes))
    }

    /// A keymap with every slot set to `0` (no action)
    pub fn zeroed() -> Self {
        Self(vec![0; KEY_COUNT])
    }

    /// Parse the flat little-endian wire image (exactly [`KEYMAP_BYTES`] long)
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, TransportError> {
        if bytes.len() != KEYMAP_BYTES {
            return Err(TransportError::InvalidKeymapLength {
                expected: KEY_COUNT,
                actual: bytes.len() / CODE_SIZE,
            });
        }
        Ok(Self(crate::protocol::unpack_codes(bytes)))
    }

    /// Flat little-endian wire image of the keymap
    pub fn to_le_bytes(&self) -> Vec<u8> {
        crate::protocol::pack_codes(&self.0)
    }

    pub fn codes(&self) -> &[u32] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.0.get(index).copied()
    }

    /// Set the code at `index`. Returns `false` if the index is out of range.
    pub fn set(&mut self, index: usize, code: u32) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = code;
                true
            }
            None => false,
        }
    }
}
