//! HID transport layer for NuPhy Air75 keyboard configuration
//!
//! - [`discovery`] finds the vendor configuration interface
//! - [`protocol`] frames keymaps into feature reports and back
//! - [`HidWiredTransport`] talks to the interface through `hidapi`

pub mod discovery;
pub mod error;
pub mod protocol;
pub mod types;

mod hid_wired;

pub use discovery::{find_in, is_air75, HidDiscovery, InterfaceRole};
pub use error::TransportError;
pub use hid_wired::HidWiredTransport;
pub use protocol::{
    build_request, decode_keymap, encode_keymap, parse_report, parse_version, Report,
    REPORT_ID, REPORT_SIZE,
};
pub use types::{DeviceDescriptor, KeymapBuffer};

/// Blocking report-level access to a keyboard.
///
/// Implemented by [`HidWiredTransport`] for real hardware and by scripted
/// transports in tests.
pub trait Transport: Send {
    /// Write one complete frame, report id first, as a feature report
    fn write_report(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Read one feature report into `buf` and return the number of bytes
    /// the device produced
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;

    /// Descriptor of the interface this transport is bound to
    fn device_info(&self) -> &DeviceDescriptor;
}
