//! Keymap access for NuPhy Air75 keyboards
//!
//! [`Air75`] is a session over an open [`Transport`]: it reads the firmware
//! version on open and moves whole keymaps to and from the keyboard. The
//! [`layout`] and [`keycodes`] tables translate between matrix indices,
//! key codes and their names.

pub mod error;
pub mod keycodes;
pub mod layout;

pub use error::KeyboardError;
pub use layout::default_keymap;
pub use nudelta_transport::{DeviceDescriptor, InterfaceRole, KeymapBuffer};

use nudelta_transport::protocol::{self, cmd, Report, REPORT_SIZE};
use nudelta_transport::{HidWiredTransport, Transport, TransportError};
use tracing::{debug, info};

/// Shown when no keyboard could be located
pub const NOT_FOUND_MESSAGE: &str = "Couldn't find a NuPhy Air75 connected to this device";

/// Locate the vendor configuration interface of a connected Air75
pub fn find() -> Result<Option<DeviceDescriptor>, KeyboardError> {
    Ok(nudelta_transport::discovery::find()?)
}

/// List every interface of connected Air75 keyboards with its role
pub fn list_interfaces() -> Result<Vec<(DeviceDescriptor, InterfaceRole)>, KeyboardError> {
    Ok(nudelta_transport::discovery::list()?)
}

/// An open connection to one Air75
pub struct Air75 {
    transport: Box<dyn Transport>,
    firmware_version: u16,
}

impl Air75 {
    /// Find the first connected keyboard and open it
    pub fn open_first() -> Result<Self, KeyboardError> {
        let descriptor = find()?.ok_or_else(|| KeyboardError::NotFound(NOT_FOUND_MESSAGE.into()))?;
        Self::open(&descriptor)
    }

    /// Open the interface described by `descriptor` and read its firmware version
    pub fn open(descriptor: &DeviceDescriptor) -> Result<Self, KeyboardError> {
        let transport = HidWiredTransport::open(descriptor)?;
        Self::with_transport(Box::new(transport))
    }

    /// Start a session over an already open transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Result<Self, KeyboardError> {
        let mut session = Self {
            transport,
            firmware_version: 0,
        };
        session.firmware_version = session.read_version()?;
        info!(
            "Opened Air75 at {} (firmware {:04x})",
            session.device_info().path,
            session.firmware_version
        );
        Ok(session)
    }

    pub fn device_info(&self) -> &DeviceDescriptor {
        self.transport.device_info()
    }

    /// Firmware version read when the session was opened
    pub fn firmware_version(&self) -> u16 {
        self.firmware_version
    }

    /// Send a request and read back the response frame
    fn query(&mut self, request: &Report) -> Result<Report, KeyboardError> {
        self.transport.write_report(request.as_frame())?;
        let mut buf = [0u8; REPORT_SIZE];
        let n = self.transport.read_report(&mut buf)?;
        Ok(protocol::parse_report(&buf[..n.min(REPORT_SIZE)])?)
    }

    fn read_version(&mut self) -> Result<u16, KeyboardError> {
        let response = self.query(&protocol::build_request(cmd::GET_VERSION, 0))?;
        response.check_response(cmd::GET_VERSION, 0)?;
        Ok(protocol::parse_version(&response))
    }

    /// Read the full keymap, one page at a time
    pub fn get_keymap(&mut self) -> Result<KeymapBuffer, KeyboardError> {
        let mut responses = Vec::with_capacity(protocol::keymap::PAGE_COUNT);
        for page in 0..protocol::keymap::PAGE_COUNT as u8 {
            let response = self.query(&protocol::build_request(cmd::GET_KEYMAP, page))?;
            // Fail on the first bad page rather than after reading all of them
            response.check_response(cmd::GET_KEYMAP, page)?;
            responses.push(response);
        }
        let keymap = protocol::decode_keymap(&responses)?;
        info!("Read keymap ({} pages)", responses.len());
        Ok(keymap)
    }

    /// Write a full keymap. Pages are written in order and the first failed
    /// write aborts the transfer; pages already written stay written.
    pub fn set_keymap(&mut self, keymap: &KeymapBuffer) -> Result<(), KeyboardError> {
        let frames = protocol::encode_keymap(keymap);
        for frame in &frames {
            debug!("Writing keymap page {}/{}", frame.page + 1, frames.len());
            self.transport.write_report(frame.as_frame())?;
        }
        info!("Wrote keymap ({} pages)", frames.len());
        Ok(())
    }

    /// Write a keymap given as raw codes. The length is checked before
    /// anything is sent.
    pub fn set_keymap_codes(&mut self, codes: &[u32]) -> Result<(), KeyboardError> {
        let keymap = KeymapBuffer::new(codes.to_vec()).map_err(|e| match e {
            TransportError::InvalidKeymapLength { expected, actual } => {
                KeyboardError::InvalidKeymapLength { expected, actual }
            }
            other => KeyboardError::Transport(other),
        })?;
        self.set_keymap(&keymap)
    }

    /// Restore the factory keymap
    pub fn reset_keymap(&mut self) -> Result<(), KeyboardError> {
        self.set_keymap(default_keymap())
    }
}

impl Drop for Air75 {
    fn drop(&mut self) {
        debug!("Releasing Air75 at {}", self.device_info().path);
    }
}
